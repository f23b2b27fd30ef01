//! Sender Profile Model
//!
//! Read-side projection of the external identity, refreshed whenever the
//! sender creates an order. Used only to enrich admin listings.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Sender display profile, keyed by the external user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sender {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub address: Option<String>,
}
