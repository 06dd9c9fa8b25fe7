mod client;
mod config;
mod error;

pub use client::{convert_attribute, convert_message, SqsQueue};
pub use config::{SqsSettings, MAX_BATCH, MAX_WAIT_SECONDS};
pub use error::classify_service_error;
