use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::{self, doc, from_document, Document};
use mongodb::bson::oid::ObjectId;
use mongodb::Collection;

use crate::infrastructure::database::mongo_context::MongoContext;
use crate::domain::pet::repository::{PetListing, PetRepository};
use crate::domain::pet::model::{Pet, PetDocument};
use crate::utils::errors::ApiError;

pub struct MongoPetRepository {
    pets: Collection<PetDocument>
}

impl MongoPetRepository {
    pub fn new(context: &MongoContext, collection: &str) -> Self {
        Self {
            pets: context.collection(collection)
        }
    }
}

#[async_trait]
impl PetRepository for MongoPetRepository {
    async fn insert_pet(&self, pet: PetDocument) -> Result<ObjectId, ApiError> {
        self.pets.insert_one(&pet).await?;
        Ok(pet.id)
    }

    async fn find_pet(&self, id: ObjectId) -> Result<Option<Pet>, ApiError> {
        match self.pets.find_one(doc! { "_id": id }).await {
            Ok(pet) => Ok(pet.map(Pet::from)),
            Err(e) => Err(ApiError::MongoError(e))
        }
    }

    async fn replace_pet_fields(&self, id: ObjectId, pet: Pet) -> Result<u64, ApiError> {
        let mut fields = bson::to_document(&PetDocument::new(id, pet))?;
        fields.remove("_id");

        let result = self.pets
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;

        Ok(result.matched_count)
    }

    async fn delete_pet(&self, id: ObjectId) -> Result<u64, ApiError> {
        match self.pets.delete_one(doc! { "_id": id }).await {
            Ok(result) => Ok(result.deleted_count),
            Err(e) => Err(ApiError::MongoError(e))
        }
    }

    async fn get_all_pets(&self) -> Result<PetListing, ApiError> {
        // Raw documents, so one malformed record does not fail the whole cursor.
        let raw = self.pets.clone_with_type::<Document>();
        let mut cursor = raw.find(doc! {}).await?;
        let mut listing = PetListing::default();

        while let Some(doc) = cursor.next().await {
            match doc {
                Ok(document) => match from_document::<PetDocument>(document) {
                    Ok(pet) => listing.pets.push(pet.into()),
                    Err(e) => listing.skipped.push(e.to_string()),
                },
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(listing)
    }
}
