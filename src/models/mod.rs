//! Data models for LeadFlow entities

pub mod client;
pub mod codec;
pub mod daily_report;
pub mod status_type;
