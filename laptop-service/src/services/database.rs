use super::query::LaptopQuery;
use super::store::LaptopStore;
use crate::models::Laptop;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use metrics::{counter, histogram};
use mongodb::{
    bson::{doc, oid::ObjectId},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;
use std::time::Instant;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoDb {
    /// Opens the client and pings the server.
    ///
    /// The driver connects lazily, so the ping is what surfaces an unreachable
    /// or misconfigured server at startup instead of on the first request.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, collection = %collection, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);

        let mongo = Self {
            client,
            db,
            collection: collection.to_string(),
        };
        mongo.health_check().await?;

        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(mongo)
    }

    pub fn laptops(&self) -> Collection<Laptop> {
        self.db.collection(&self.collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

fn record_operation(operation: &'static str, start: Instant, succeeded: bool) {
    histogram!("db_operation_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
    if !succeeded {
        counter!("db_errors_total", "operation" => operation).increment(1);
    }
}

#[async_trait]
impl LaptopStore for MongoDb {
    async fn find(&self, query: &LaptopQuery) -> Result<Vec<Laptop>, AppError> {
        let filter = query.filter_document();
        tracing::debug!(filter = %filter, limit = ?query.limit, sort = ?query.sort, "Querying laptops");

        let start = Instant::now();
        let result: mongodb::error::Result<Vec<Laptop>> = async {
            let cursor = self.laptops().find(filter, query.find_options()).await?;
            cursor.try_collect().await
        }
        .await;
        record_operation("find", start, result.is_ok());

        Ok(result?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Laptop>, AppError> {
        let start = Instant::now();
        let result = self.laptops().find_one(doc! { "_id": id }, None).await;
        record_operation("find_one", start, result.is_ok());

        Ok(result?)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
