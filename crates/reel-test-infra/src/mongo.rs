use crate::Result;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MONGO_PORT: u16 = 27017;

#[derive(Debug, Clone, TypedBuilder)]
pub struct MongoConfig {
    #[builder(default = "8.0".to_string())]
    tag: String,
    #[builder(default = "testdb".to_string())]
    database: String,
    #[builder(default = "root".to_string())]
    username: String,
    #[builder(default = "mypassword".to_string())]
    password: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MongoConfig {
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Test fixture for a disposable MongoDB server.
///
/// The server starts with a root user. The entrypoint restarts `mongod`
/// once the user is created, so the first connection attempts may be
/// refused; callers should retry until a ping succeeds.
pub struct MongoServer {
    container: ContainerAsync<GenericImage>,
    config: MongoConfig,
}

impl MongoServer {
    /// Starts a MongoDB container suitable for integration tests.
    pub async fn new(config: MongoConfig) -> Result<Self> {
        let container = GenericImage::new("mongo", config.tag.as_str())
            .with_exposed_port(MONGO_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Waiting for connections"))
            .with_env_var("MONGO_INITDB_ROOT_USERNAME", config.username.as_str())
            .with_env_var("MONGO_INITDB_ROOT_PASSWORD", config.password.as_str())
            .start()
            .await?;

        Ok(Self { container, config })
    }

    pub async fn host(&self) -> Result<String> {
        let host = self.container.get_host().await?.to_string();

        match host.as_str() {
            "localhost" => Ok(String::from("127.0.0.1")),
            _ => Ok(host),
        }
    }

    pub async fn port(&self) -> Result<u16> {
        Ok(self.container.get_host_port_ipv4(MONGO_PORT).await?)
    }

    /// Connection string authenticating as the root user against `admin`.
    pub async fn uri(&self) -> Result<String> {
        let host = self.host().await?;
        let port = self.port().await?;
        Ok(format!(
            "mongodb://{}:{}@{}:{}/?authSource=admin",
            self.config.username, self.config.password, host, port
        ))
    }

    /// Logical database tests should use.
    pub fn database(&self) -> &str {
        self.config.database()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MongoConfig::default();
        assert_eq!(config.tag, "8.0");
        assert_eq!(config.database(), "testdb");
        assert_eq!(config.username, "root");
    }

    #[test]
    fn test_custom_config() {
        let config = MongoConfig::builder()
            .tag("7.0".to_string())
            .database("movies_it".to_string())
            .build();
        assert_eq!(config.tag, "7.0");
        assert_eq!(config.database(), "movies_it");
        assert_eq!(config.password, "mypassword");
    }
}
