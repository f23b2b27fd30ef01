//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) storage for orders and sender
//! profiles.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database and bootstrap the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("courier")
            .use_db("courier")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;

        tracing::info!("Database ready (embedded SurrealDB at {db_path})");

        Ok(Self { db })
    }

    /// Schema bootstrap — idempotent DEFINE statements.
    ///
    /// The UNIQUE index on trackingId is the final arbiter against two
    /// generators racing past the existence check with the same candidate.
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query("DEFINE TABLE IF NOT EXISTS order SCHEMALESS")
            .query("DEFINE INDEX IF NOT EXISTS order_tracking_id ON TABLE order FIELDS trackingId UNIQUE")
            .query("DEFINE INDEX IF NOT EXISTS order_sender ON TABLE order FIELDS senderId")
            .query("DEFINE TABLE IF NOT EXISTS sender SCHEMALESS")
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        Ok(())
    }
}
