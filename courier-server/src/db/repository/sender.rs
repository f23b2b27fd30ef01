//! Sender Profile Repository

use std::collections::HashMap;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Sender;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "sender";

#[derive(Clone, Debug)]
pub struct SenderRepository {
    base: BaseRepository,
}

impl SenderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Upsert the display profile for an external identity
    pub async fn upsert(
        &self,
        id: &str,
        name: &str,
        address: Option<&str>,
    ) -> RepoResult<Sender> {
        let sender = Sender {
            id: None,
            name: name.to_string(),
            address: address.map(|a| a.to_string()),
        };
        let saved: Option<Sender> = self.base.db().upsert((TABLE, id)).content(sender).await?;
        saved.ok_or_else(|| RepoError::Database("Failed to upsert sender profile".to_string()))
    }

    /// Find profile by external user id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Sender>> {
        let sender: Option<Sender> = self.base.db().select((TABLE, id)).await?;
        Ok(sender)
    }

    /// Bulk lookup for read-time enrichment, keyed by sender id.
    ///
    /// The admin listing joins a handful of distinct senders; per-id point
    /// reads keep this free of query-string assembly.
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<HashMap<String, Sender>> {
        let mut profiles = HashMap::with_capacity(ids.len());
        for id in ids {
            if let Some(sender) = self.find_by_id(id).await? {
                profiles.insert(id.clone(), sender);
            }
        }
        Ok(profiles)
    }
}
