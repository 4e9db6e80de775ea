//! Note persistence.
//!
//! `NoteStore` is the seam the request handlers talk to. `PgNoteStore` is the
//! production backend; `MemoryNoteStore` keeps everything in process.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{NewNote, Note, UserId};

pub use memory::MemoryNoteStore;
pub use postgres::PgNoteStore;

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist `note`, assigning its id and creation time.
    async fn create(&self, note: NewNote) -> Result<Note, StoreError>;

    /// All notes owned by `user_id`, newest first. Empty when there are none.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Note>, StoreError>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
