//! Folder-expansion store port.
//!
//! The host keeps "which folders are expanded" as one process-global value
//! that its file explorer reads synchronously while rebuilding. The core
//! snapshots and restores that single cell around layout applies; it never
//! owns a per-workspace copy of it.

/// Opaque folder-expansion structure, copied through verbatim.
pub type FolderState = serde_json::Value;

pub trait FolderStateStore {
    /// Absent state means "nothing recorded", never an error.
    fn read(&self) -> Option<FolderState>;
    fn write(&mut self, state: &FolderState);
    fn clear(&mut self);
}
