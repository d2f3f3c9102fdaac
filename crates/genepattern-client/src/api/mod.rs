//! Endpoint catalog.
//!
//! One method per REST operation, grouped by resource. Each method only maps
//! typed parameters onto an [`ApiRequest`](crate::ApiRequest) and hands it to
//! [`GenePatternClient::dispatch`](crate::GenePatternClient::dispatch).
//! Path segments such as job ids, file paths and LSIDs are inserted verbatim.

pub mod data;
pub mod disk;
pub mod jobs;
pub mod server_config;
pub mod tags;
pub mod tasks;
pub mod uploads;
pub mod usage;
