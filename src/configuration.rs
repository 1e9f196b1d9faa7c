use serde;

pub const DEFAULT_DATABASE_URI: &str = "mongodb://localhost:27017";
pub const DATABASE_URI_ENV: &str = "MONGODB_URI";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Mongo,
    /// Process-local store, nothing survives a restart
    Memory,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub uri: String,
    pub name: String,
    pub backend: DatabaseBackend,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: DEFAULT_DATABASE_URI.to_string(),
            name: "tours".to_string(),
            backend: DatabaseBackend::Mongo,
            connect_timeout_secs: 5,
        }
    }
}

/// Non-empty value of the endpoint override, if any.
fn database_uri_override(value: Option<String>) -> Option<String> {
    value.filter(|uri| !uri.trim().is_empty())
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let defaults = DatabaseSettings::default();

    // Defaults first, then the optional `configuration.yaml`, then MONGODB_URI
    let settings = config::Config::builder()
        .set_default("app_host", "127.0.0.1")?
        .set_default("app_port", 8000)?
        .set_default("database.uri", defaults.uri)?
        .set_default("database.name", defaults.name)?
        .set_default("database.backend", "mongo")?
        .set_default("database.connect_timeout_secs", defaults.connect_timeout_secs as i64)?
        .add_source(config::File::with_name("configuration").required(false))
        .set_override_option(
            "database.uri",
            database_uri_override(std::env::var(DATABASE_URI_ENV).ok()),
        )?
        .build()?;

    settings.try_deserialize()
}
