use actix_web::{http::StatusCode, web, Responder, ResponseError};
use mongodb::bson::oid::ObjectId;

use crate::{
    api::{response::PetResponse, state::AppState},
    domain::pet::model::{parse_pet_id, CreatedPet, Pet, PetDocument},
    utils::{deadline::with_deadline, errors::ApiError},
};

const NO_DOCUMENTS: &str = "no documents in result";

fn no_documents() -> ApiError {
    ApiError::InternalServerError(NO_DOCUMENTS.to_string())
}

pub async fn create_pet(
    state: web::Data<AppState>,
    pet: web::Json<Pet>
) -> impl Responder {
    let pet = pet.into_inner();
    if let Err(e) = pet.validate() {
        tracing::warn!("rejected pet creation: {}", e);
        return e.error_response();
    }

    let new_pet = PetDocument::new(ObjectId::new(), pet);

    match with_deadline(state.request_timeout, state.pets.insert_pet(new_pet)).await {
        Ok(id) => {
            tracing::debug!("created pet {}", id);
            PetResponse::success(StatusCode::CREATED, CreatedPet::from(id)).into_http()
        },
        Err(e) => {
            tracing::error!("failed to create pet: {}", e);
            e.error_response()
        }
    }
}

// A missing pet is reported as a 500, the same as a backend failure.
pub async fn get_a_pet(
    state: web::Data<AppState>,
    pet_id: web::Path<String>
) -> impl Responder {
    let id = parse_pet_id(&pet_id);

    let result = with_deadline(state.request_timeout, async {
        let Some(id) = id else {
            return Err(no_documents());
        };
        state.pets.find_pet(id).await?.ok_or_else(no_documents)
    }).await;

    match result {
        Ok(pet) => PetResponse::success(StatusCode::OK, pet).into_http(),
        Err(e) => {
            tracing::warn!("failed to get pet {}: {}", pet_id, e);
            e.error_response()
        }
    }
}

/// Overwrites every mutable field of the pet with the request body.
///
/// Answers with the re-fetched record, or with an empty record when no pet
/// has the given id.
pub async fn edit_a_pet(
    state: web::Data<AppState>,
    pet_id: web::Path<String>,
    pet: web::Json<Pet>
) -> impl Responder {
    let id = parse_pet_id(&pet_id);

    let pet = pet.into_inner();
    if let Err(e) = pet.validate() {
        tracing::warn!("rejected update of pet {}: {}", pet_id, e);
        return e.error_response();
    }

    let result = with_deadline(state.request_timeout, async {
        let Some(id) = id else {
            return Ok(Pet::default());
        };

        let matched = state.pets.replace_pet_fields(id, pet).await?;
        if matched == 1 {
            state.pets.find_pet(id).await?.ok_or_else(no_documents)
        } else {
            Ok(Pet::default())
        }
    }).await;

    match result {
        Ok(updated) => PetResponse::success(StatusCode::OK, updated).into_http(),
        Err(e) => {
            tracing::error!("failed to update pet {}: {}", pet_id, e);
            e.error_response()
        }
    }
}

pub async fn delete_a_pet(
    state: web::Data<AppState>,
    pet_id: web::Path<String>
) -> impl Responder {
    let id = parse_pet_id(&pet_id);

    let result = with_deadline(state.request_timeout, async {
        match id {
            Some(id) => state.pets.delete_pet(id).await,
            None => Ok(0),
        }
    }).await;

    match result {
        Ok(0) => ApiError::NotFound("Pet with specified ID not found!".to_string()).error_response(),
        Ok(_) => PetResponse::success(StatusCode::OK, "Pet successfully deleted!").into_http(),
        Err(e) => {
            tracing::error!("failed to delete pet {}: {}", pet_id, e);
            e.error_response()
        }
    }
}

pub async fn get_all_pets(
    state: web::Data<AppState>
) -> impl Responder {
    match with_deadline(state.request_timeout, state.pets.get_all_pets()).await {
        Ok(listing) => {
            for reason in &listing.skipped {
                tracing::warn!("skipped undecodable pet document: {}", reason);
            }
            PetResponse::success(StatusCode::OK, listing.pets).into_http()
        },
        Err(e) => {
            tracing::error!("failed to list pets: {}", e);
            e.error_response()
        }
    }
}
