//! Clients repository and aggregate reporting queries

use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, ClientStatistics, ClientSummary, CreateClient, UpdateClient},
    models::codec,
};

const COLLECTION: &str = "clients";

/// Names of the seven embedded action flags
const ACTION_FLAGS: [&str; 7] = [
    "made_order",
    "completed_survey",
    "notified_about_promotion",
    "has_additional_questions",
    "need_callback",
    "not_answering",
    "planning_order",
];

#[derive(Clone)]
pub struct ClientsRepository {
    db: Database,
}

impl ClientsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Document> {
        self.db.collection(COLLECTION)
    }

    /// List clients, optionally restricted by a named status filter
    pub async fn list(&self, status_filter: Option<&str>) -> AppResult<Vec<Client>> {
        let mut cursor = self
            .collection()
            .find(status_filter_query(status_filter))
            .await?;

        let mut clients = Vec::new();
        while let Some(mut doc) = cursor.try_next().await? {
            codec::from_storage(&mut doc);
            clients.push(bson::from_document(doc)?);
        }
        Ok(clients)
    }

    /// Get a client by ID
    pub async fn get(&self, id: Uuid) -> AppResult<Client> {
        let mut doc = self
            .collection()
            .find_one(doc! { "id": id.to_string() })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))?;
        codec::from_storage(&mut doc);
        Ok(bson::from_document(doc)?)
    }

    /// Create a client
    pub async fn create(&self, input: CreateClient) -> AppResult<Client> {
        let client = Client::new(input);
        let mut doc = bson::to_document(&client)?;
        codec::to_storage(&mut doc);
        self.collection().insert_one(doc).await?;
        Ok(client)
    }

    /// Apply a partial update and return the refreshed client
    pub async fn update(&self, id: Uuid, data: &UpdateClient) -> AppResult<Client> {
        let mut set = super::update_document(data)?;
        codec::to_storage(&mut set);

        let result = self
            .collection()
            .update_one(doc! { "id": id.to_string() }, doc! { "$set": set })
            .await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Client {} not found", id)));
        }

        self.get(id).await
    }

    /// Replace only the free-text comment
    pub async fn update_comment(&self, id: Uuid, comment: &str) -> AppResult<()> {
        let result = self
            .collection()
            .update_one(
                doc! { "id": id.to_string() },
                doc! { "$set": { "comment": comment } },
            )
            .await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Client {} not found", id)));
        }
        Ok(())
    }

    /// Delete a client
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = self
            .collection()
            .delete_one(doc! { "id": id.to_string() })
            .await?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Client {} not found", id)));
        }
        Ok(())
    }

    /// Per-flag counts over the full collection
    pub async fn statistics(&self) -> AppResult<ClientStatistics> {
        let clients = self.list(None).await?;
        Ok(ClientStatistics::from_clients(&clients))
    }

    /// Collection-wide sums of the commercial metrics
    pub async fn summary(&self) -> AppResult<ClientSummary> {
        let clients = self.list(None).await?;
        Ok(ClientSummary::from_clients(&clients))
    }
}

/// Map a named status filter to a store query.
///
/// Unknown names fall back to an unfiltered listing rather than an error.
fn status_filter_query(filter: Option<&str>) -> Document {
    let Some(name) = filter else {
        return Document::new();
    };

    if ACTION_FLAGS.contains(&name) {
        let mut query = Document::new();
        query.insert(format!("action_status.{}", name), true);
        return query;
    }

    if name == "has_debt" {
        return doc! { "debt": { "$gt": 0.0 } };
    }

    tracing::debug!(filter = name, "unknown status filter, listing all clients");
    Document::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::Bson;

    #[test]
    fn test_flag_filters_target_the_embedded_field() {
        for flag in ACTION_FLAGS {
            let query = status_filter_query(Some(flag));
            assert_eq!(
                query.get(format!("action_status.{}", flag)),
                Some(&Bson::Boolean(true)),
                "filter {} should target its embedded flag",
                flag
            );
            assert_eq!(query.len(), 1);
        }
    }

    #[test]
    fn test_has_debt_filter_selects_positive_debt() {
        let query = status_filter_query(Some("has_debt"));
        assert_eq!(query, doc! { "debt": { "$gt": 0.0 } });
    }

    #[test]
    fn test_unknown_filter_falls_back_to_unfiltered() {
        assert!(status_filter_query(Some("vip_only")).is_empty());
        assert!(status_filter_query(None).is_empty());
    }
}
