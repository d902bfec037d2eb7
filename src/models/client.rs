//! Client (sales lead) models and aggregate reporting

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::codec;

/// Contact-attempt outcome flags embedded in every client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ActionStatus {
    pub made_order: bool,
    pub completed_survey: bool,
    pub notified_about_promotion: bool,
    pub has_additional_questions: bool,
    pub need_callback: bool,
    pub not_answering: bool,
    pub planning_order: bool,
}

/// Client record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Client {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    /// Free-text pipeline stage, matched against ClientStatusType names by convention
    pub client_status: String,
    #[serde(default)]
    pub crm_link: String,
    #[serde(default)]
    pub expected_order_sets: i64,
    #[serde(default)]
    pub expected_order_amount: f64,
    #[serde(default)]
    pub sets_ordered_this_month: i64,
    #[serde(default)]
    pub amount_this_month: f64,
    #[serde(default)]
    pub debt: f64,
    #[serde(default)]
    pub last_contact_date: Option<NaiveDate>,
    #[serde(default)]
    pub task_description: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub action_status: ActionStatus,
    #[serde(with = "codec::iso_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Create client request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClient {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    pub client_status: String,
    #[serde(default)]
    pub crm_link: String,
    #[serde(default)]
    pub expected_order_sets: i64,
    #[serde(default)]
    pub expected_order_amount: f64,
    #[serde(default)]
    pub sets_ordered_this_month: i64,
    #[serde(default)]
    pub amount_this_month: f64,
    #[serde(default)]
    pub debt: f64,
    #[serde(default)]
    pub last_contact_date: Option<NaiveDate>,
    #[serde(default)]
    pub task_description: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub action_status: ActionStatus,
}

impl Client {
    /// Build a full record from a create request, assigning id and timestamp
    pub fn new(input: CreateClient) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            client_status: input.client_status,
            crm_link: input.crm_link,
            expected_order_sets: input.expected_order_sets,
            expected_order_amount: input.expected_order_amount,
            sets_ordered_this_month: input.sets_ordered_this_month,
            amount_this_month: input.amount_this_month,
            debt: input.debt,
            last_contact_date: input.last_contact_date,
            task_description: input.task_description,
            comment: input.comment,
            action_status: input.action_status,
            created_at: Utc::now(),
        }
    }
}

/// Partial update request; only supplied fields are written
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateClient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crm_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_order_sets: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_order_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets_ordered_this_month: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_this_month: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_contact_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_status: Option<ActionStatus>,
}

/// Query parameters for the client list
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ClientQuery {
    /// Named filter: one of the seven action flag names, or "has_debt".
    /// Unknown names fall back to an unfiltered listing.
    pub status_filter: Option<String>,
}

/// Per-flag client counts over the full collection
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientStatistics {
    pub total_clients: u64,
    pub made_order: u64,
    pub completed_survey: u64,
    pub notified_about_promotion: u64,
    pub has_additional_questions: u64,
    pub need_callback: u64,
    pub not_answering: u64,
    pub planning_order: u64,
    pub has_debt: u64,
}

impl ClientStatistics {
    /// Fold the full client collection into flag counts
    pub fn from_clients(clients: &[Client]) -> Self {
        let count = |pred: fn(&Client) -> bool| clients.iter().filter(|c| pred(c)).count() as u64;
        Self {
            total_clients: clients.len() as u64,
            made_order: count(|c| c.action_status.made_order),
            completed_survey: count(|c| c.action_status.completed_survey),
            notified_about_promotion: count(|c| c.action_status.notified_about_promotion),
            has_additional_questions: count(|c| c.action_status.has_additional_questions),
            need_callback: count(|c| c.action_status.need_callback),
            not_answering: count(|c| c.action_status.not_answering),
            planning_order: count(|c| c.action_status.planning_order),
            has_debt: count(|c| c.debt > 0.0),
        }
    }
}

/// Collection-wide sums of the commercial metrics
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientSummary {
    pub total_expected_sets: i64,
    pub total_expected_amount: f64,
    pub total_ordered_sets: i64,
    pub total_ordered_amount: f64,
    pub total_debt: f64,
}

impl ClientSummary {
    /// Sum the commercial metrics over the full client collection.
    ///
    /// Monetary fields are accumulated in decimal arithmetic so that the
    /// 2-decimal rounding applies to the exact sum, not to an IEEE
    /// approximation of it.
    pub fn from_clients(clients: &[Client]) -> Self {
        let mut expected_sets: i64 = 0;
        let mut ordered_sets: i64 = 0;
        let mut expected_amount = Decimal::ZERO;
        let mut ordered_amount = Decimal::ZERO;
        let mut debt = Decimal::ZERO;

        for client in clients {
            expected_sets += client.expected_order_sets;
            ordered_sets += client.sets_ordered_this_month;
            expected_amount += Decimal::from_f64(client.expected_order_amount).unwrap_or_default();
            ordered_amount += Decimal::from_f64(client.amount_this_month).unwrap_or_default();
            debt += Decimal::from_f64(client.debt).unwrap_or_default();
        }

        Self {
            total_expected_sets: expected_sets,
            total_expected_amount: round2(expected_amount),
            total_ordered_sets: ordered_sets,
            total_ordered_amount: round2(ordered_amount),
            total_debt: round2(debt),
        }
    }
}

/// Round a monetary sum to 2 decimal places, midpoint away from zero
fn round2(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(debt: f64) -> Client {
        Client::new(CreateClient {
            first_name: "Анна".to_string(),
            last_name: "Петрова".to_string(),
            phone: String::new(),
            client_status: "Новый".to_string(),
            crm_link: String::new(),
            expected_order_sets: 0,
            expected_order_amount: 0.0,
            sets_ordered_this_month: 0,
            amount_this_month: 0.0,
            debt,
            last_contact_date: None,
            task_description: String::new(),
            comment: String::new(),
            action_status: ActionStatus::default(),
        })
    }

    #[test]
    fn test_statistics_over_empty_collection() {
        let stats = ClientStatistics::from_clients(&[]);
        assert_eq!(stats.total_clients, 0);
        assert_eq!(stats.made_order, 0);
        assert_eq!(stats.has_debt, 0);
    }

    #[test]
    fn test_statistics_counts_flags_and_debt() {
        let mut clients = vec![client(0.0), client(120.0), client(0.0)];
        clients[0].action_status.made_order = true;
        clients[1].action_status.made_order = true;
        clients[2].action_status.need_callback = true;

        let stats = ClientStatistics::from_clients(&clients);
        assert_eq!(stats.total_clients, 3);
        assert_eq!(stats.made_order, 2);
        assert_eq!(stats.need_callback, 1);
        assert_eq!(stats.not_answering, 0);
        assert_eq!(stats.has_debt, 1);
    }

    #[test]
    fn test_summary_over_empty_collection_is_zero() {
        let summary = ClientSummary::from_clients(&[]);
        assert_eq!(summary.total_expected_sets, 0);
        assert_eq!(summary.total_expected_amount, 0.0);
        assert_eq!(summary.total_ordered_sets, 0);
        assert_eq!(summary.total_ordered_amount, 0.0);
        assert_eq!(summary.total_debt, 0.0);
    }

    #[test]
    fn test_summary_rounds_the_sum_not_the_records() {
        let clients = vec![client(100.004), client(50.001)];
        let summary = ClientSummary::from_clients(&clients);
        assert_eq!(summary.total_debt, 150.01);
    }

    #[test]
    fn test_summary_sums_sets_and_amounts() {
        let mut a = client(10.0);
        a.expected_order_sets = 5;
        a.expected_order_amount = 1000.50;
        a.sets_ordered_this_month = 2;
        a.amount_this_month = 300.25;
        let mut b = client(0.0);
        b.expected_order_sets = 3;
        b.expected_order_amount = 499.50;
        b.sets_ordered_this_month = 1;
        b.amount_this_month = 99.75;

        let summary = ClientSummary::from_clients(&[a, b]);
        assert_eq!(summary.total_expected_sets, 8);
        assert_eq!(summary.total_expected_amount, 1500.0);
        assert_eq!(summary.total_ordered_sets, 3);
        assert_eq!(summary.total_ordered_amount, 400.0);
        assert_eq!(summary.total_debt, 10.0);
    }

    #[test]
    fn test_create_client_defaults() {
        let input: CreateClient = serde_json::from_str(
            r#"{"first_name": "Анна", "last_name": "Петрова", "client_status": "Новый"}"#,
        )
        .unwrap();
        let created = Client::new(input);
        assert_eq!(created.phone, "");
        assert_eq!(created.debt, 0.0);
        assert_eq!(created.last_contact_date, None);
        assert_eq!(created.action_status, ActionStatus::default());
    }

    #[test]
    fn test_client_serializes_dates_as_iso_strings() {
        let mut created = client(0.0);
        created.last_contact_date = Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        let json = serde_json::to_value(&created).unwrap();
        assert_eq!(json["last_contact_date"], "2024-03-15");
        let created_at = json["created_at"].as_str().unwrap();
        assert!(created_at.contains('T') && created_at.ends_with("+00:00"));
    }

    #[test]
    fn test_update_client_skips_absent_fields() {
        let update: UpdateClient = serde_json::from_str(r#"{"debt": 42.5}"#).unwrap();
        let doc = bson::to_document(&update).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get_f64("debt").unwrap(), 42.5);

        let empty: UpdateClient = serde_json::from_str("{}").unwrap();
        assert!(bson::to_document(&empty).unwrap().is_empty());
    }
}
