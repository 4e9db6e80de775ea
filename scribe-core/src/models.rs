use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// A persisted note. `id` and `created_at` are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    #[serde(rename = "userID")]
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Store input for a note that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
}

/// Body of `POST /notes`. Any other field the client sends is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

impl CreateNoteRequest {
    /// Bind the request to its owner. The owner never comes from the body.
    pub fn into_new_note(self, owner: Identity) -> NewNote {
        NewNote {
            user_id: owner.user_id,
            title: self.title,
            content: self.content,
        }
    }
}

/// The user an authenticated request acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    pub user_id: UserId,
}
