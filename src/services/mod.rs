pub mod radiation_table;
pub mod table_cache;
pub mod yield_estimator;
