use std::sync::Arc;
use std::time::Duration;

use crate::domain::pet::repository::PetRepository;
use crate::utils::config::DEFAULT_REQUEST_TIMEOUT_SECS;

/// Dependencies shared by every request, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pets: Arc<dyn PetRepository>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(pets: Arc<dyn PetRepository>, request_timeout: Duration) -> Self {
        AppState { pets, request_timeout }
    }

    pub fn with_default_timeout(pets: Arc<dyn PetRepository>) -> Self {
        Self::new(pets, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }
}
