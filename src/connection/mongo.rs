use super::{ConnectionError, Connector};
use crate::configuration::DatabaseSettings;
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;

const APP_NAME: &str = "tour-ratings";

#[derive(Debug, Clone)]
pub struct MongoConnector {
    uri: String,
    database_name: String,
    timeout: Duration,
}

impl MongoConnector {
    pub fn new(settings: &DatabaseSettings) -> Self {
        Self {
            uri: settings.uri.clone(),
            database_name: settings.name.clone(),
            timeout: Duration::from_secs(settings.connect_timeout_secs),
        }
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = Database;

    async fn connect(&self) -> Result<Database, ConnectionError> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(|err| ConnectionError::InvalidUri(err.to_string()))?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(self.timeout);
        options.server_selection_timeout = Some(self.timeout);

        let client = Client::with_options(options)
            .map_err(|err| ConnectionError::InvalidUri(err.to_string()))?;
        let database = client.database(&self.database_name);

        // The driver connects lazily; ping so a bad endpoint fails here.
        database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|err| ConnectionError::Unreachable(err.to_string()))?;

        Ok(database)
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", redact_uri(&self.uri), self.database_name)
    }
}

/// Drops the `user:password@` part of a connection string.
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://").map(|i| i + 3) else {
        return uri.to_string();
    };
    let rest = &uri[scheme_end..];
    let authority = rest.find(['/', '?']).map_or(rest, |end| &rest[..end]);
    match authority.rfind('@') {
        Some(at) => format!("{}{}", &uri[..scheme_end], &rest[at + 1..]),
        None => uri.to_string(),
    }
}
