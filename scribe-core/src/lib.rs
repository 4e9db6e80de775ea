pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod spellcheck;
pub mod store;

pub use auth::{CredentialResolver, StaticCredentials};
pub use config::ScribeConfig;
pub use error::{ScribeError, StoreError};
pub use models::{CreateNoteRequest, Identity, NewNote, Note, UserId};
pub use spellcheck::{SpellChecker, SpellcheckError, SpellcheckSuggestion, YandexSpeller};
pub use store::{MemoryNoteStore, NoteStore, PgNoteStore};
