//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that creates a MongoDB container for testing.

use mongodb::{Client, Database};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;
use uuid::Uuid;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
/// Each instance hands out a freshly named database, so collections never leak
/// between tests even if a container is reused.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let db = mongo.database();
///
/// let names = db.list_collection_names().await.unwrap();
/// assert!(names.is_empty());
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    database_name: String,
    pub connection_string: String,
}

impl TestMongo {
    /// Create a new test MongoDB instance
    ///
    /// Uses the MongoDB 7 image.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to connect to MongoDB");

        let database_name = format!("test_{}", Uuid::now_v7().simple());

        tracing::info!(port = host_port, database = %database_name, "Test MongoDB ready (mongo:7)");

        Self {
            container,
            client,
            database_name,
            connection_string,
        }
    }

    /// Database dedicated to this test
    pub fn database(&self) -> Database {
        self.client.database(&self.database_name)
    }

    /// Get a cloned client (useful for passing to services)
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// Get the connection string for manual client creation
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

// Container is automatically cleaned up when TestMongo is dropped
impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!(database = %self.database_name, "Cleaning up test MongoDB container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    #[ignore] // Requires Docker
    async fn test_mongo_connection() {
        let mongo = TestMongo::new().await;
        let db = mongo.database();

        db.collection::<mongodb::bson::Document>("smoke")
            .insert_one(doc! { "name": "smoke" })
            .await
            .unwrap();

        let found = db
            .collection::<mongodb::bson::Document>("smoke")
            .find_one(doc! { "name": "smoke" })
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    #[ignore] // Requires Docker
    async fn test_databases_are_isolated() {
        let mongo = TestMongo::new().await;
        let other = TestMongo::new().await;
        assert_ne!(mongo.database().name(), other.database().name());
    }
}
