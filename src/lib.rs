//! DNS record management for zones hosted at IONOS.
//!
//! [`IonosProvider`] implements [`DNSProvider`] on top of the IONOS DNS REST
//! API: list, append, set (create-or-update) and delete records in a zone.

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod providers;

pub use crate::config::Config;
pub use crate::core::provider::DNSProvider;
pub use crate::core::record::DNSRecord;
pub use crate::error::Error;
pub use crate::providers::ionos::IonosProvider;
