//! Persisted row models

use serde::{Deserialize, Serialize};

use crate::tickets::schema::Risk;

/// A persisted support ticket.
///
/// `id` is the internal storage key and is never serialized; `unique_id`
/// is the externally addressable tracking handle. Timestamps are RFC 3339
/// strings in UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    #[serde(skip)]
    pub id: i64,
    pub user_id: String,
    pub thread_id: String,
    pub user_name: String,
    pub subject: String,
    pub description: String,
    pub risk: Risk,
    pub unique_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A long-term key/value note attached to a user (e.g. their name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMemory {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}
