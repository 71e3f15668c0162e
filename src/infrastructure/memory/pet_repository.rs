use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{self, from_document, Document};
use mongodb::bson::oid::ObjectId;

use crate::domain::pet::repository::{PetListing, PetRepository};
use crate::domain::pet::model::{Pet, PetDocument};
use crate::utils::errors::ApiError;

/// Process-local pet store keeping BSON documents in insertion order.
///
/// Documents go through the same BSON encoding as in MongoDB, so decode
/// behaviour matches the real collection. Used by the handler tests.
#[derive(Default)]
pub struct InMemoryPetRepository {
    documents: RwLock<Vec<Document>>,
    latency: Option<Duration>,
}

impl InMemoryPetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation sleeps for `latency` before touching the store.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency: Some(latency), ..Self::default() }
    }

    /// Stores a document as-is, bypassing the pet encoding.
    pub fn insert_raw(&self, document: Document) -> Result<(), ApiError> {
        self.write()?.push(document);
        Ok(())
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Document>>, ApiError> {
        self.documents
            .read()
            .map_err(|e| ApiError::InternalServerError(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Document>>, ApiError> {
        self.documents
            .write()
            .map_err(|e| ApiError::InternalServerError(e.to_string()))
    }

    fn position(documents: &[Document], id: ObjectId) -> Option<usize> {
        documents
            .iter()
            .position(|document| document.get_object_id("_id").ok() == Some(id))
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn insert_pet(&self, pet: PetDocument) -> Result<ObjectId, ApiError> {
        self.delay().await;
        let document = bson::to_document(&pet)?;
        self.write()?.push(document);
        Ok(pet.id)
    }

    async fn find_pet(&self, id: ObjectId) -> Result<Option<Pet>, ApiError> {
        self.delay().await;
        let documents = self.read()?;

        match Self::position(&documents, id) {
            Some(index) => {
                let pet: PetDocument = from_document(documents[index].clone())?;
                Ok(Some(pet.into()))
            },
            None => Ok(None)
        }
    }

    async fn replace_pet_fields(&self, id: ObjectId, pet: Pet) -> Result<u64, ApiError> {
        self.delay().await;
        let mut fields = bson::to_document(&PetDocument::new(id, pet))?;
        fields.remove("_id");

        let mut documents = self.write()?;
        match Self::position(&documents, id) {
            Some(index) => {
                let stored = &mut documents[index];
                for (key, value) in fields {
                    stored.insert(key, value);
                }
                Ok(1)
            },
            None => Ok(0)
        }
    }

    async fn delete_pet(&self, id: ObjectId) -> Result<u64, ApiError> {
        self.delay().await;
        let mut documents = self.write()?;

        match Self::position(&documents, id) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            },
            None => Ok(0)
        }
    }

    async fn get_all_pets(&self) -> Result<PetListing, ApiError> {
        self.delay().await;
        let documents = self.read()?;
        let mut listing = PetListing::default();

        for document in documents.iter() {
            match from_document::<PetDocument>(document.clone()) {
                Ok(pet) => listing.pets.push(pet.into()),
                Err(e) => listing.skipped.push(e.to_string()),
            }
        }
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn pet(name: &str) -> Pet {
        Pet {
            name: name.to_string(),
            date_of_birth: "2020-01-01".to_string(),
            owner_name: "Ana".to_string(),
            animal_type: "Dog".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let repo = InMemoryPetRepository::new();
        let id = repo.insert_pet(PetDocument::new(ObjectId::new(), pet("Rex"))).await.unwrap();

        let found = repo.find_pet(id).await.unwrap().unwrap();
        assert_eq!(found.id, Some(id));
        assert_eq!(found.name, "Rex");

        assert!(repo.find_pet(ObjectId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_overwrites_and_reports_matches() {
        let repo = InMemoryPetRepository::new();
        let original = Pet { breed: "Beagle".to_string(), ..pet("Rex") };
        let id = repo.insert_pet(PetDocument::new(ObjectId::new(), original)).await.unwrap();

        assert_eq!(repo.replace_pet_fields(id, pet("Rex2")).await.unwrap(), 1);
        let updated = repo.find_pet(id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Rex2");
        assert_eq!(updated.breed, "");

        assert_eq!(repo.replace_pet_fields(ObjectId::new(), pet("Ghost")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_counts() {
        let repo = InMemoryPetRepository::new();
        let id = repo.insert_pet(PetDocument::new(ObjectId::new(), pet("Rex"))).await.unwrap();

        assert_eq!(repo.delete_pet(id).await.unwrap(), 1);
        assert_eq!(repo.delete_pet(id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_listing_keeps_order_and_skips_bad_documents() {
        let repo = InMemoryPetRepository::new();
        repo.insert_pet(PetDocument::new(ObjectId::new(), pet("First"))).await.unwrap();
        repo.insert_raw(doc! { "_id": "not-an-object-id", "name": 42 }).unwrap();
        repo.insert_pet(PetDocument::new(ObjectId::new(), pet("Second"))).await.unwrap();

        let listing = repo.get_all_pets().await.unwrap();
        let names: Vec<&str> = listing.pets.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(listing.skipped.len(), 1);
    }
}
