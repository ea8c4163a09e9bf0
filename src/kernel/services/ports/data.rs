//! Plugin data contracts: settings, workspace records and the persisted
//! blob, plus the store trait the persistence adapters implement.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::kernel::navigation::NavigationSnapshot;
use crate::kernel::services::ports::layout::LayoutBlob;

/// Persisted-blob schema tag. Version "1" kept navigation snapshots in a
/// separate top-level map; "2" embeds them in their records.
pub const STORAGE_VERSION: &str = "2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Record and restore sidebar/folder memory at all.
    pub remember_navigation: bool,
    /// Keep navigation chrome constant across switches (restore opt-out;
    /// capture still runs so snapshots stay fresh).
    pub maintain_across_workspaces: bool,
    pub remember_folder_state: bool,
    pub confirm_delete: bool,
    /// Switching auto-saves the outgoing workspace.
    pub save_on_switch: bool,
    pub auto_save_on_change: bool,
    pub natural_sort: bool,
    pub debug: bool,
    /// Wait between layout apply and the deferred panel restore. Tuned, not
    /// derived; the host gives no rebuild-complete signal.
    pub settle_delay_ms: u64,
    pub auto_save_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remember_navigation: true,
            maintain_across_workspaces: false,
            remember_folder_state: true,
            confirm_delete: true,
            save_on_switch: true,
            auto_save_on_change: false,
            natural_sort: true,
            debug: false,
            settle_delay_ms: 200,
            auto_save_debounce_ms: 2000,
        }
    }
}

/// One saved workspace. The map key is its name; the record does not carry
/// a second copy of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    pub layout: LayoutBlob,
    #[serde(default)]
    pub last_saved_ms: u64,
    /// `None` means "no navigation memory recorded", which is distinct
    /// from an explicit empty snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceStorage {
    #[serde(default)]
    pub workspaces: FxHashMap<CompactString, WorkspaceRecord>,
    #[serde(default)]
    pub active_workspace: Option<CompactString>,
    #[serde(default = "legacy_version")]
    pub version: String,
}

fn legacy_version() -> String {
    "1".to_string()
}

impl Default for WorkspaceStorage {
    fn default() -> Self {
        Self {
            workspaces: FxHashMap::default(),
            active_workspace: None,
            version: STORAGE_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginData {
    pub settings: Settings,
    pub workspace_storage: WorkspaceStorage,
    /// Pre-v2 side table; folded into the records by `migrate`.
    #[serde(skip_serializing_if = "FxHashMap::is_empty")]
    pub navigation_layouts: FxHashMap<CompactString, NavigationSnapshot>,
}

impl PluginData {
    /// Upgrades older payloads in place. Returns whether anything changed.
    pub fn migrate(&mut self) -> bool {
        if self.workspace_storage.version == STORAGE_VERSION
            && self.navigation_layouts.is_empty()
        {
            return false;
        }

        let layouts = std::mem::take(&mut self.navigation_layouts);
        for (name, snapshot) in layouts {
            if let Some(record) = self.workspace_storage.workspaces.get_mut(&name) {
                if record.navigation.is_none() {
                    record.navigation = Some(snapshot);
                }
            }
        }
        self.workspace_storage.version = STORAGE_VERSION.to_string();
        true
    }
}

pub trait PluginDataStore {
    fn load(&self) -> std::io::Result<Option<PluginData>>;
    fn save(&mut self, data: &PluginData) -> std::io::Result<()>;
}
