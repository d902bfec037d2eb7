//! Repository layer for document store operations

pub mod clients;
pub mod daily_reports;
pub mod status_types;

use bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::Database;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Main repository struct holding the injected database handle
#[derive(Clone)]
pub struct Repository {
    pub db: Database,
    pub client_status_types: status_types::ClientStatusTypesRepository,
    pub action_status_types: status_types::ActionStatusTypesRepository,
    pub clients: clients::ClientsRepository,
    pub daily_reports: daily_reports::DailyReportsRepository,
}

impl Repository {
    /// Create a new repository with the given database handle
    pub fn new(db: Database) -> Self {
        Self {
            client_status_types: status_types::ClientStatusTypesRepository::new(db.clone()),
            action_status_types: status_types::ActionStatusTypesRepository::new(db.clone()),
            clients: clients::ClientsRepository::new(db.clone()),
            daily_reports: daily_reports::DailyReportsRepository::new(db.clone()),
            db,
        }
    }

    /// Create the indexes the invariants rely on
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.daily_reports.ensure_indexes().await
    }

    /// Verify store connectivity
    pub async fn ping(&self) -> AppResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

/// Build a `$set` document from a partial update payload.
///
/// Absent fields are skipped by the payload's serde representation; supplying
/// no fields at all is a validation error.
pub(crate) fn update_document<T: Serialize>(data: &T) -> AppResult<Document> {
    let set = bson::to_document(data)?;
    if set.is_empty() {
        return Err(AppError::Validation("No fields to update".to_string()));
    }
    Ok(set)
}

/// True when the error is the store's unique-index violation
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        &*err.kind,
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == 11000
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::client::UpdateClient;
    use crate::models::daily_report::UpdateDailyReport;

    #[test]
    fn test_update_document_rejects_empty_payloads() {
        let err = update_document(&UpdateClient::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = update_document(&UpdateDailyReport::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_update_document_keeps_only_supplied_fields() {
        let update = UpdateClient {
            comment: Some("готов к заказу".to_string()),
            debt: Some(0.0),
            ..Default::default()
        };
        let set = update_document(&update).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_str("comment").unwrap(), "готов к заказу");
        assert_eq!(set.get_f64("debt").unwrap(), 0.0);
    }
}
