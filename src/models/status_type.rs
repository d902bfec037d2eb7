//! Status type models (pipeline stage labels and action flag labels)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::codec;

fn default_color() -> String {
    "#3B82F6".to_string()
}

/// User-defined lead-pipeline stage label.
///
/// `Client.client_status` is free text matched against these names by
/// convention only; there is no foreign-key enforcement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientStatusType {
    pub id: Uuid,
    pub name: String,
    /// Hex color used by the front-end
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(with = "codec::iso_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Create/replace payload for a client status type
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateClientStatusType {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
}

impl ClientStatusType {
    /// Build a full record from a create request, assigning id and timestamp
    pub fn new(input: CreateClientStatusType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            color: input.color,
            created_at: Utc::now(),
        }
    }
}

/// Label for one of the boolean action flags
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActionStatusType {
    pub id: Uuid,
    pub name: String,
    /// Machine-readable flag name (made_order, completed_survey, ...)
    pub key: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(with = "codec::iso_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Create/replace payload for an action status type
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateActionStatusType {
    pub name: String,
    pub key: String,
    #[serde(default = "default_color")]
    pub color: String,
}

impl ActionStatusType {
    /// Build a full record from a create request, assigning id and timestamp
    pub fn new(input: CreateActionStatusType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            key: input.key,
            color: input.color,
            created_at: Utc::now(),
        }
    }
}
