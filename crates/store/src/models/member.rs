use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for one member row. `id` and `created_at` come back
/// from the store.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateMember {
    pub name: String,
    pub role: String,
}
