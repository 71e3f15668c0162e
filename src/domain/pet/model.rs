use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::errors::ApiError;

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

// `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ObjectId's own Serialize impl emits extended JSON (`{"$oid": ...}`); clients get plain hex.
fn serialize_hex_id<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(id) => serializer.serialize_str(&id.to_hex()),
        None => serializer.serialize_none(),
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(default)]
pub struct PetSize {
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub height: f64,
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub weight: f64,
}

impl PetSize {
    pub fn is_zero(&self) -> bool {
        is_zero(&self.height) && is_zero(&self.weight)
    }
}

/// A pet as clients send and receive it.
///
/// The same shape is used for request bodies and response payloads. An `id`
/// in a request body is never read: ids are assigned by the store.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Pet {
    #[serde(
        skip_deserializing,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_hex_id"
    )]
    pub id: Option<ObjectId>,
    #[serde(rename = "Name", alias = "name", skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "DateOfBirth", alias = "dateOfBirth", skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub date_of_birth: String,
    #[serde(rename = "OwnerName", alias = "ownerName", skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub owner_name: String,
    #[serde(rename = "AnimalType", alias = "animalType", skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub animal_type: String,
    #[serde(rename = "Breed", alias = "breed", skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub breed: String,
    #[serde(rename = "Size", alias = "size", skip_serializing_if = "PetSize::is_zero", deserialize_with = "null_as_default")]
    pub size: PetSize,
    #[serde(rename = "favorite_toy", alias = "favoriteToy", skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub favorite_toy: String,
}

impl Pet {
    /// Checks that every required field is present and non-empty.
    pub fn validate(&self) -> Result<(), ApiError> {
        let required = [
            ("Name", &self.name),
            ("DateOfBirth", &self.date_of_birth),
            ("OwnerName", &self.owner_name),
            ("AnimalType", &self.animal_type),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| *field)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::BadRequest(format!("missing required field(s): {}", missing.join(", "))))
        }
    }
}

/// The stored form of a pet. The store-generated id lives in `_id`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub animal_type: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub size: PetSize,
    #[serde(default)]
    pub favorite_toy: String,
}

impl PetDocument {
    /// Builds the document for `pet` under `id`. Any id carried by `pet` is ignored.
    pub fn new(id: ObjectId, pet: Pet) -> Self {
        PetDocument {
            id,
            name: pet.name,
            date_of_birth: pet.date_of_birth,
            owner_name: pet.owner_name,
            animal_type: pet.animal_type,
            breed: pet.breed,
            size: PetSize {
                height: pet.size.height,
                weight: pet.size.weight,
            },
            favorite_toy: pet.favorite_toy,
        }
    }
}

impl From<PetDocument> for Pet {
    fn from(doc: PetDocument) -> Self {
        Pet {
            id: Some(doc.id),
            name: doc.name,
            date_of_birth: doc.date_of_birth,
            owner_name: doc.owner_name,
            animal_type: doc.animal_type,
            breed: doc.breed,
            size: doc.size,
            favorite_toy: doc.favorite_toy,
        }
    }
}

/// Result of a successful insert.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CreatedPet {
    #[serde(rename = "InsertedID")]
    pub inserted_id: String,
}

impl From<ObjectId> for CreatedPet {
    fn from(id: ObjectId) -> Self {
        CreatedPet { inserted_id: id.to_hex() }
    }
}

/// Parses a path segment into a pet id.
///
/// A malformed id is not an error of its own: it yields `None`, which callers
/// treat as a lookup that matches no document.
pub fn parse_pet_id(raw: &str) -> Option<ObjectId> {
    match ObjectId::parse_str(raw) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!("pet id {:?} is not a valid ObjectId ({}), treating as no match", raw, e);
            None
        }
    }
}
