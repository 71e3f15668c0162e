use actix_web::web;

use crate::api::handlers::pet_handlers::{create_pet, delete_a_pet, edit_a_pet, get_a_pet, get_all_pets};
use crate::utils::errors::ApiError;

pub fn pet_routes(cfg: &mut web::ServiceConfig) {
    // Malformed bodies answer with the same envelope as every other error.
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
    );

    cfg.service(
        web::resource("/pet")
            .route(web::post().to(create_pet))
    );

    cfg.service(
        web::resource("/pet/{petId}")
            .route(web::get().to(get_a_pet))
            .route(web::put().to(edit_a_pet))
            .route(web::delete().to(delete_a_pet))
    );

    cfg.service(
        web::resource("/pets")
            .route(web::get().to(get_all_pets))
    );
}
