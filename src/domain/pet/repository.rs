use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::{domain::pet::model::{Pet, PetDocument}, utils::errors::ApiError};

/// Everything a full collection scan produced.
///
/// Documents that could not be decoded do not abort the scan; their decode
/// errors are collected in `skipped` in scan order.
#[derive(Debug, Default)]
pub struct PetListing {
    pub pets: Vec<Pet>,
    pub skipped: Vec<String>,
}

#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Persists a new document and returns its id.
    async fn insert_pet(&self, pet: PetDocument) -> Result<ObjectId, ApiError>;
    async fn find_pet(&self, id: ObjectId) -> Result<Option<Pet>, ApiError>;
    /// Overwrites every mutable field of the matching document with the values
    /// in `pet`, empty ones included. Returns how many documents matched.
    async fn replace_pet_fields(&self, id: ObjectId, pet: Pet) -> Result<u64, ApiError>;
    /// Returns how many documents were deleted.
    async fn delete_pet(&self, id: ObjectId) -> Result<u64, ApiError>;
    async fn get_all_pets(&self) -> Result<PetListing, ApiError>;
}
