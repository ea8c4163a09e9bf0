//! Host-native workspace store port.
//!
//! Earlier revisions of this plugin wrapped the host's own save/load
//! functions at runtime. The core now depends on this narrow read seam
//! instead: import copies entries through it, and operations that need the
//! native side fail fast when it reports unavailable.

use compact_str::CompactString;

use crate::kernel::services::ports::data::WorkspaceRecord;
use crate::kernel::services::ports::layout::LayoutBlob;

pub trait NativeWorkspaceStore {
    fn available(&self) -> bool;
    fn list_names(&self) -> Vec<CompactString>;
    fn active_name(&self) -> Option<CompactString>;
    /// Foreign layout schema; copied through verbatim.
    fn read(&self, name: &str) -> Option<LayoutBlob>;
}

/// Storage surface shared by workspace backends. The standalone kernel
/// store implements it directly; native adapters implement it over the
/// host's own storage, making the two swappable for listing and reporting.
pub trait WorkspaceBackend {
    fn list_names(&self) -> Vec<CompactString>;
    fn active_name(&self) -> Option<CompactString>;
    fn load(&self, name: &str) -> Option<WorkspaceRecord>;
    fn save(&mut self, name: &str, record: WorkspaceRecord);
}
