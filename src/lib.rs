//! Photovoltaic yield estimation from municipal solar-radiation tables.
//!
//! [`services::radiation_table::RadiationTable`] ingests the dataset,
//! [`services::yield_estimator`] turns one record plus
//! [`models::estimate::SystemParameters`] into annual and monthly figures, and
//! [`services::table_cache::TableCache`] keeps loaded tables until their source changes.

pub mod error;
pub mod models;
pub mod services;
