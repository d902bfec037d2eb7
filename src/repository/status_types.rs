//! Status type repositories (client pipeline labels and action flag labels)

use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::codec,
    models::status_type::{
        ActionStatusType, ClientStatusType, CreateActionStatusType, CreateClientStatusType,
    },
};

#[derive(Clone)]
pub struct ClientStatusTypesRepository {
    db: Database,
}

impl ClientStatusTypesRepository {
    const COLLECTION: &'static str = "client_status_types";

    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Document> {
        self.db.collection(Self::COLLECTION)
    }

    /// List all client status types
    pub async fn list(&self) -> AppResult<Vec<ClientStatusType>> {
        let mut cursor = self.collection().find(Document::new()).await?;
        let mut status_types = Vec::new();
        while let Some(mut doc) = cursor.try_next().await? {
            codec::from_storage(&mut doc);
            status_types.push(bson::from_document(doc)?);
        }
        Ok(status_types)
    }

    /// Get a client status type by ID
    pub async fn get(&self, id: Uuid) -> AppResult<ClientStatusType> {
        let mut doc = self
            .collection()
            .find_one(doc! { "id": id.to_string() })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Status type {} not found", id)))?;
        codec::from_storage(&mut doc);
        Ok(bson::from_document(doc)?)
    }

    /// Create a client status type
    pub async fn create(&self, input: CreateClientStatusType) -> AppResult<ClientStatusType> {
        let status_type = ClientStatusType::new(input);
        let mut doc = bson::to_document(&status_type)?;
        codec::to_storage(&mut doc);
        self.collection().insert_one(doc).await?;
        Ok(status_type)
    }

    /// Replace the name and color of a client status type
    pub async fn update(
        &self,
        id: Uuid,
        data: &CreateClientStatusType,
    ) -> AppResult<ClientStatusType> {
        let mut set = bson::to_document(data)?;
        codec::to_storage(&mut set);

        let result = self
            .collection()
            .update_one(doc! { "id": id.to_string() }, doc! { "$set": set })
            .await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Status type {} not found", id)));
        }

        self.get(id).await
    }

    /// Delete a client status type. Clients referencing its name are untouched.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = self
            .collection()
            .delete_one(doc! { "id": id.to_string() })
            .await?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Status type {} not found", id)));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct ActionStatusTypesRepository {
    db: Database,
}

impl ActionStatusTypesRepository {
    const COLLECTION: &'static str = "action_status_types";

    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Document> {
        self.db.collection(Self::COLLECTION)
    }

    /// List all action status types
    pub async fn list(&self) -> AppResult<Vec<ActionStatusType>> {
        let mut cursor = self.collection().find(Document::new()).await?;
        let mut status_types = Vec::new();
        while let Some(mut doc) = cursor.try_next().await? {
            codec::from_storage(&mut doc);
            status_types.push(bson::from_document(doc)?);
        }
        Ok(status_types)
    }

    /// Get an action status type by ID
    pub async fn get(&self, id: Uuid) -> AppResult<ActionStatusType> {
        let mut doc = self
            .collection()
            .find_one(doc! { "id": id.to_string() })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Action status type {} not found", id)))?;
        codec::from_storage(&mut doc);
        Ok(bson::from_document(doc)?)
    }

    /// Create an action status type
    pub async fn create(&self, input: CreateActionStatusType) -> AppResult<ActionStatusType> {
        let status_type = ActionStatusType::new(input);
        let mut doc = bson::to_document(&status_type)?;
        codec::to_storage(&mut doc);
        self.collection().insert_one(doc).await?;
        Ok(status_type)
    }

    /// Replace the name, key and color of an action status type
    pub async fn update(
        &self,
        id: Uuid,
        data: &CreateActionStatusType,
    ) -> AppResult<ActionStatusType> {
        let mut set = bson::to_document(data)?;
        codec::to_storage(&mut set);

        let result = self
            .collection()
            .update_one(doc! { "id": id.to_string() }, doc! { "$set": set })
            .await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Action status type {} not found",
                id
            )));
        }

        self.get(id).await
    }

    /// Delete an action status type
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = self
            .collection()
            .delete_one(doc! { "id": id.to_string() })
            .await?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Action status type {} not found",
                id
            )));
        }
        Ok(())
    }
}
