use std::error::Error;
use serde::{Deserialize, Serialize};
use mongodb::{options::ClientOptions, Client, Collection, Database};
use regex::Regex;

pub type ContextError = Box<dyn Error + Send + Sync>;

#[derive(Clone, Debug)]
pub struct MongoContext {
    client: Client,
    db: Database
}

impl MongoContext {
    pub async fn init(uri: &str, db_name: &str) -> Result<MongoContext, ContextError> {
        tracing::info!("Attempting to connect to MongoDB database {}", db_name);

        Self::validate_mongo_uri(uri)?;

        let mut client_options = ClientOptions::parse(uri)
            .await?;

        client_options.app_name = Some("PetsApp".to_string());

        let client = Client::with_options(client_options)
            .map_err(|e| {
                tracing::error!("Failed to create MongoDB client: {}", e);
                format!("Failed to create MongoDB client: {}", e)
            })?;

        client.list_database_names()
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                format!("Failed to connect to MongoDB: {}", e)
            })?;

        let db = client.database(db_name);
        tracing::info!("Successfully connected to MongoDB database: {}", db_name);

        Ok(MongoContext { client, db })
    }

    pub fn get_db(&self) -> &Database {
        &self.db
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync + Unpin + for<'de> Deserialize<'de> + Serialize,
    {
        self.db.collection::<T>(name)
    }

    fn validate_mongo_uri(uri: &str) -> Result<(), ContextError> {
        let trimmed_uri = uri.trim();
        if trimmed_uri.is_empty() {
            return Err("Invalid MongoDB URI: cannot be empty or whitespace".into());
        }

        let host_part = if let Some(rest) = trimmed_uri.strip_prefix("mongodb://") {
            rest
        } else if let Some(rest) = trimmed_uri.strip_prefix("mongodb+srv://") {
            rest
        } else {
            return Err(format!("Invalid MongoDB URI: must start with 'mongodb://' or 'mongodb+srv://'. Got: {}", uri).into());
        };

        if host_part.trim().is_empty() {
            return Err("Invalid MongoDB URI: missing host after protocol".into());
        }

        if uri.contains(char::is_whitespace) {
            return Err("Invalid MongoDB URI: cannot contain whitespace".into());
        }

        let re = Regex::new(r"^mongodb(\+srv)?://([^/\s]+)(/.*)?$")?;
        if !re.is_match(trimmed_uri) {
            return Err(format!("Invalid MongoDB URI format. Expected format: mongodb://host[:port][/database] or mongodb+srv://host[/database]. Got: {}", uri).into());
        }

        Ok(())
    }

}
