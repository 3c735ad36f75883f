use config::{ConfigError, Environment};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub secret: SecretSetting,
    pub payment: PaymentSetting,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub name: String,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.name)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct JWT {
    pub secret: SecretString,
    pub expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSetting {
    pub jwt: JWT,
}

/// Payment gateway credentials and connection parameters.
///
/// `key_secret` doubles as the HMAC key for callback signature
/// verification, matching the gateway's documented scheme.
#[derive(Debug, Deserialize, Clone)]
pub struct PaymentSetting {
    pub base_url: String,
    pub key_id: String,
    pub key_secret: SecretString,
    pub currency: String,
    pub timeout_milliseconds: u64,
}

impl PaymentSetting {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");
    let builder = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("configuration.yaml"),
        ))
        .add_source(Environment::default().separator("__"))
        .build()?;
    builder.try_deserialize::<Settings>()
}
