use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::NoteStore;
use crate::error::StoreError;
use crate::models::{NewNote, Note, UserId};

#[derive(Debug)]
struct Inner {
    next_id: i64,
    notes: Vec<Note>,
}

/// In-process store with the same id and ordering rules as the Postgres one.
#[derive(Debug)]
pub struct MemoryNoteStore {
    inner: Mutex<Inner>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                notes: Vec::new(),
            }),
        }
    }

    /// Number of notes held, across all users.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.notes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn create(&self, note: NewNote) -> Result<Note, StoreError> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let created = Note {
            id,
            user_id: note.user_id,
            title: note.title,
            content: note.content,
            created_at: Utc::now(),
        };
        inner.notes.push(created.clone());
        Ok(created)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Note>, StoreError> {
        let inner = self.inner.lock().await;
        let mut notes: Vec<Note> = inner
            .notes
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(notes)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
