//! Daily reports repository

use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::codec,
    models::daily_report::{CreateDailyReport, DailyReport, UpdateDailyReport},
};

const COLLECTION: &str = "daily_reports";

#[derive(Clone)]
pub struct DailyReportsRepository {
    db: Database,
}

impl DailyReportsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Document> {
        self.db.collection(COLLECTION)
    }

    /// Create the unique index backing the one-report-per-date invariant
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "date": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection().create_index(index).await?;
        Ok(())
    }

    /// List all reports, newest date first
    pub async fn list(&self) -> AppResult<Vec<DailyReport>> {
        let mut cursor = self
            .collection()
            .find(Document::new())
            .sort(doc! { "date": -1 })
            .await?;

        let mut reports = Vec::new();
        while let Some(mut doc) = cursor.try_next().await? {
            codec::from_storage(&mut doc);
            reports.push(bson::from_document(doc)?);
        }
        Ok(reports)
    }

    /// Get a report by ID
    pub async fn get(&self, id: Uuid) -> AppResult<DailyReport> {
        let mut doc = self
            .collection()
            .find_one(doc! { "id": id.to_string() })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;
        codec::from_storage(&mut doc);
        Ok(bson::from_document(doc)?)
    }

    /// Create a report, enforcing at most one report per calendar date.
    ///
    /// The pre-check gives the friendly failure; the unique index on `date`
    /// is what actually closes the read-then-write race between two
    /// concurrent creations for the same day.
    pub async fn create(&self, input: CreateDailyReport) -> AppResult<DailyReport> {
        let existing = self
            .collection()
            .find_one(doc! { "date": input.date.to_string() })
            .await?;
        if existing.is_some() {
            return Err(duplicate_date_error());
        }

        let report = DailyReport::new(input);
        let mut doc = bson::to_document(&report)?;
        codec::to_storage(&mut doc);
        self.collection().insert_one(doc).await.map_err(|e| {
            if super::is_duplicate_key(&e) {
                duplicate_date_error()
            } else {
                e.into()
            }
        })?;
        Ok(report)
    }

    /// Apply a partial update and return the refreshed report
    pub async fn update(&self, id: Uuid, data: &UpdateDailyReport) -> AppResult<DailyReport> {
        let mut set = super::update_document(data)?;
        codec::to_storage(&mut set);

        let result = self
            .collection()
            .update_one(doc! { "id": id.to_string() }, doc! { "$set": set })
            .await
            .map_err(|e| {
                if super::is_duplicate_key(&e) {
                    duplicate_date_error()
                } else {
                    e.into()
                }
            })?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        self.get(id).await
    }

    /// Delete a report
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = self
            .collection()
            .delete_one(doc! { "id": id.to_string() })
            .await?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }
        Ok(())
    }
}

fn duplicate_date_error() -> AppError {
    AppError::Duplicate("Report for this date already exists".to_string())
}
