//! Bootcamp repository for all MongoDB operations on the bootcamps collection.

use async_trait::async_trait;
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{FindOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};

use crate::constants::{
    CODE_INTERNAL_ERROR, COLLECTION_BOOTCAMPS, COLLECTION_COURSES, ERR_SERVER_ERROR,
};
use crate::errors::ApiError;
use crate::models::Bootcamp;

/// Reads behind the paginated list endpoint.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Count documents matching a filter.
    async fn count(&self, filter: Document) -> Result<u64, ApiError>;

    /// Fetch one page of raw documents, optionally projected.
    async fn find_page(
        &self,
        filter: Document,
        projection: Option<Document>,
        sort: Document,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Document>, ApiError>;
}

/// Skip and limit as the driver accepts them; both are sent as i64.
fn driver_window(skip: u64, limit: u64) -> (u64, i64) {
    let skip = i64::try_from(skip).unwrap_or(i64::MAX);
    (skip.unsigned_abs(), i64::try_from(limit).unwrap_or(i64::MAX))
}

/// Repository for bootcamp-related database operations.
pub struct BootcampRepository {
    collection: Collection<Bootcamp>,
    /// Untyped view of the same collection, for projected reads.
    raw: Collection<Document>,
    courses: Collection<Document>,
}

impl BootcampRepository {
    pub fn new(db: &Database) -> Self {
        let collection: Collection<Bootcamp> = db.collection(COLLECTION_BOOTCAMPS);
        Self {
            raw: collection.clone_with_type(),
            collection,
            courses: db.collection(COLLECTION_COURSES),
        }
    }

    /// Create database indexes for commonly queried fields.
    ///
    /// Called once during application startup. It creates:
    /// - Unique index on `name`
    /// - 2dsphere index on `location` for radius searches
    /// - Index on `user` for the one-bootcamp-per-publisher check
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for bootcamps collection...");

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "location": "2dsphere" })
                .build(),
            IndexModel::builder().keys(doc! { "user": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        info!("Database indexes created successfully");
        Ok(())
    }

    /// Insert a new bootcamp and return its id.
    pub async fn insert(&self, bootcamp: &Bootcamp) -> Result<ObjectId, ApiError> {
        let result = self.collection.insert_one(bootcamp).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::internal(CODE_INTERNAL_ERROR, ERR_SERVER_ERROR))
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Bootcamp>, ApiError> {
        debug!("Repository: Finding bootcamp by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Fetch every bootcamp matching a filter, unpaginated.
    pub async fn find_all(&self, filter: Document) -> Result<Vec<Bootcamp>, ApiError> {
        debug!("Repository: Finding all bootcamps with filter: {:?}", filter);
        let cursor = self.collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Number of bootcamps owned by a user.
    pub async fn count_by_user(&self, user: ObjectId) -> Result<u64, ApiError> {
        self.count(doc! { "user": user }).await
    }

    /// Apply a `$set` and return the updated document.
    pub async fn update(&self, id: ObjectId, update: Document) -> Result<Option<Bootcamp>, ApiError> {
        debug!("Repository: Updating bootcamp {} with {:?}", id, update);
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update })
            .return_document(ReturnDocument::After)
            .await?)
    }

    /// Set the stored photo file name.
    pub async fn update_photo(&self, id: ObjectId, photo: &str) -> Result<(), ApiError> {
        debug!("Repository: Updating photo for bootcamp: {}", id);
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$set": { "photo": photo } })
            .await?;
        Ok(())
    }

    /// Delete a bootcamp together with the courses that reference it.
    pub async fn delete(&self, id: ObjectId) -> Result<u64, ApiError> {
        let courses = self.courses.delete_many(doc! { "bootcamp": id }).await?;
        if courses.deleted_count > 0 {
            info!(
                "Removed {} courses belonging to bootcamp {}",
                courses.deleted_count, id
            );
        }
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}

#[async_trait]
impl PageSource for BootcampRepository {
    async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        Ok(self.collection.count_documents(filter).await?)
    }

    async fn find_page(
        &self,
        filter: Document,
        projection: Option<Document>,
        sort: Document,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Document>, ApiError> {
        debug!(
            "Repository: Finding bootcamps with filter: {:?}, skip: {}, limit: {}",
            filter, skip, limit
        );
        let (skip, limit) = driver_window(skip, limit);
        let options = FindOptions::builder()
            .projection(projection)
            .sort(sort)
            .skip(skip)
            .limit(limit)
            .build();
        let cursor = self.raw.find(filter).with_options(options).await?;

        Ok(cursor.try_collect().await?)
    }
}
