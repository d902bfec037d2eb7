//! API handlers for LeadFlow REST endpoints

pub mod clients;
pub mod daily_reports;
pub mod health;
pub mod openapi;
pub mod status_types;
