pub mod config;
pub mod deadline;
pub mod errors;

pub use config::AppConfig;
pub use errors::ApiError;
