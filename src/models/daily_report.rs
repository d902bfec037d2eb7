//! Daily report model (per-calendar-date business metrics snapshot)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::codec;

/// Daily report record. At most one report exists per calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyReport {
    pub id: Uuid,
    /// Report date (YYYY-MM-DD), unique across the collection
    pub date: NaiveDate,
    #[serde(default)]
    pub orders_in_assembly: i64,
    #[serde(default)]
    pub sets_count: i64,
    #[serde(default)]
    pub orders_amount: f64,
    #[serde(default)]
    pub money_received_today: f64,
    #[serde(default)]
    pub call_attempts: i64,
    #[serde(default)]
    pub successful_calls: i64,
    #[serde(default)]
    pub self_messaged_client: i64,
    #[serde(default)]
    pub responses: i64,
    #[serde(default)]
    pub chats_today: i64,
    #[serde(default)]
    pub clients_no_order: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(with = "codec::iso_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Create daily report request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDailyReport {
    pub date: NaiveDate,
    #[serde(default)]
    pub orders_in_assembly: i64,
    #[serde(default)]
    pub sets_count: i64,
    #[serde(default)]
    pub orders_amount: f64,
    #[serde(default)]
    pub money_received_today: f64,
    #[serde(default)]
    pub call_attempts: i64,
    #[serde(default)]
    pub successful_calls: i64,
    #[serde(default)]
    pub self_messaged_client: i64,
    #[serde(default)]
    pub responses: i64,
    #[serde(default)]
    pub chats_today: i64,
    #[serde(default)]
    pub clients_no_order: i64,
    #[serde(default)]
    pub comment: String,
}

impl DailyReport {
    /// Build a full record from a create request, assigning id and timestamp
    pub fn new(input: CreateDailyReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: input.date,
            orders_in_assembly: input.orders_in_assembly,
            sets_count: input.sets_count,
            orders_amount: input.orders_amount,
            money_received_today: input.money_received_today,
            call_attempts: input.call_attempts,
            successful_calls: input.successful_calls,
            self_messaged_client: input.self_messaged_client,
            responses: input.responses,
            chats_today: input.chats_today,
            clients_no_order: input.clients_no_order,
            comment: input.comment,
            created_at: Utc::now(),
        }
    }
}

/// Partial update request; only supplied fields are written
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDailyReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders_in_assembly: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money_received_today: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_attempts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successful_calls: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_messaged_client: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chats_today: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients_no_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_date_serializes_as_iso_string() {
        let report = DailyReport::new(CreateDailyReport {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            orders_in_assembly: 4,
            sets_count: 0,
            orders_amount: 0.0,
            money_received_today: 0.0,
            call_attempts: 0,
            successful_calls: 0,
            self_messaged_client: 0,
            responses: 0,
            chats_today: 0,
            clients_no_order: 0,
            comment: String::new(),
        });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["date"], "2024-03-15");
        assert_eq!(json["orders_in_assembly"], 4);
    }

    #[test]
    fn test_create_report_defaults_metrics_to_zero() {
        let input: CreateDailyReport = serde_json::from_str(r#"{"date": "2024-03-15"}"#).unwrap();
        assert_eq!(input.sets_count, 0);
        assert_eq!(input.orders_amount, 0.0);
        assert_eq!(input.comment, "");
    }
}
