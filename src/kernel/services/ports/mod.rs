//! Service ports: traits + data contracts.

pub mod data;
pub mod folders;
pub mod layout;
pub mod native;
pub mod notices;

pub use data::{PluginData, PluginDataStore, Settings, WorkspaceRecord, WorkspaceStorage, STORAGE_VERSION};
pub use folders::{FolderState, FolderStateStore};
pub use layout::{LayoutBlob, LayoutEngine, LayoutError, Side, SidebarState};
pub use native::{NativeWorkspaceStore, WorkspaceBackend};
pub use notices::NoticeSink;
