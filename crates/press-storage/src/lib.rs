//! press-storage - Storage library for press
//!
//! This crate provides store implementations for the collaborator traits in
//! `press-core`: an in-memory store, a JSON snapshot store on disk, and an
//! outbox notifier that writes admin alerts to files.

mod file_store;
mod memory;
mod outbox;
mod snapshot;

pub use file_store::{default_data_dir, FileSystemStorage};
pub use memory::MemoryStore;
pub use outbox::{OutboxMessage, OutboxNotifier};
pub use snapshot::{CategoryLink, SiteSnapshot, CURRENT_SCHEMA_VERSION};
