//! Kernel state: workspace records, switcher UI state, settings and the
//! operation phase.

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::kernel::naming;
use crate::kernel::services::ports::{
    Settings, WorkspaceBackend, WorkspaceRecord, WorkspaceStorage,
};

/// Authoritative name → record mapping plus the active pointer.
///
/// `order` carries insertion order for the unsorted listing mode; rename
/// keeps a name's position, duplicate and first save append.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspacesState {
    records: FxHashMap<CompactString, WorkspaceRecord>,
    order: Vec<CompactString>,
    active: Option<CompactString>,
}

impl WorkspacesState {
    pub fn from_storage(storage: WorkspaceStorage) -> Self {
        let mut order: Vec<CompactString> = storage.workspaces.keys().cloned().collect();
        // Map iteration order is arbitrary; start deterministic.
        order.sort_by(|a, b| naming::compare_names(a, b));
        Self {
            records: storage.workspaces,
            order,
            active: storage.active_workspace,
        }
    }

    pub fn to_storage(&self) -> WorkspaceStorage {
        WorkspaceStorage {
            workspaces: self.records.clone(),
            active_workspace: self.active.clone(),
            ..WorkspaceStorage::default()
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&WorkspaceRecord> {
        self.records.get(name)
    }

    /// The active pointer may dangle after an external deletion; a dangling
    /// pointer reads as "no active workspace".
    pub fn active_name(&self) -> Option<&str> {
        self.active
            .as_deref()
            .filter(|name| self.records.contains_key(*name))
    }

    pub fn active_record(&self) -> Option<&WorkspaceRecord> {
        self.active_name().and_then(|name| self.records.get(name))
    }

    pub fn set_active(&mut self, name: &str) -> bool {
        if self.active.as_deref() == Some(name) {
            return false;
        }
        self.active = Some(CompactString::from(name));
        true
    }

    pub fn upsert(&mut self, name: &CompactString, record: WorkspaceRecord) {
        if self.records.insert(name.clone(), record).is_none() {
            self.order.push(name.clone());
        }
    }

    /// Removes the record; clears the active pointer if it named it.
    pub fn remove(&mut self, name: &str) -> Option<WorkspaceRecord> {
        let record = self.records.remove(name)?;
        self.order.retain(|entry| entry != name);
        if self.active.as_deref() == Some(name) {
            self.active = None;
        }
        Some(record)
    }

    /// Moves the record under the new key. The old key stops resolving, the
    /// list position is kept, the active pointer follows. Callers validate;
    /// a conflicting or missing key leaves the state untouched.
    pub fn rename(&mut self, from: &str, to: &CompactString) -> bool {
        if self.records.contains_key(to) {
            return false;
        }
        let Some(record) = self.records.remove(from) else {
            return false;
        };
        self.records.insert(to.clone(), record);
        if let Some(slot) = self.order.iter_mut().find(|entry| entry.as_str() == from) {
            *slot = to.clone();
        }
        if self.active.as_deref() == Some(from) {
            self.active = Some(to.clone());
        }
        true
    }

    pub fn list(&self, natural_sort: bool) -> Vec<CompactString> {
        let mut names = self.order.clone();
        if natural_sort {
            names.sort_by(|a, b| naming::compare_names(a, b));
        }
        names
    }
}

impl WorkspaceBackend for WorkspacesState {
    fn list_names(&self) -> Vec<CompactString> {
        self.order.clone()
    }

    fn active_name(&self) -> Option<CompactString> {
        WorkspacesState::active_name(self).map(CompactString::from)
    }

    fn load(&self, name: &str) -> Option<WorkspaceRecord> {
        self.records.get(name).cloned()
    }

    fn save(&mut self, name: &str, record: WorkspaceRecord) {
        self.upsert(&CompactString::from(name), record);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitcherMode {
    #[default]
    Switch,
    Manage,
}

/// Inline rename edit inside the switcher. The typed value survives a
/// collision so the user can fix it instead of retyping.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameEdit {
    pub original: CompactString,
    pub value: String,
    pub cursor: usize,
    pub error: Option<String>,
}

impl RenameEdit {
    pub fn new(original: CompactString) -> Self {
        let value = original.to_string();
        let cursor = value.len();
        Self {
            original,
            value,
            cursor,
            error: None,
        }
    }

    pub fn insert(&mut self, ch: char) {
        self.error = None;
        if self.cursor > self.value.len() {
            self.cursor = self.value.len();
        }
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.error = None;
        let prev = self.value[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwitcherState {
    pub visible: bool,
    pub mode: SwitcherMode,
    pub query: String,
    pub selected: usize,
    pub rename: Option<RenameEdit>,
    pub confirm_delete: Option<CompactString>,
}

impl SwitcherState {
    pub fn open(&mut self, mode: SwitcherMode) {
        *self = Self::default();
        self.visible = true;
        self.mode = mode;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn push_query(&mut self, ch: char) {
        self.query.push(ch);
        self.selected = 0;
    }

    pub fn pop_query(&mut self) -> bool {
        if self.query.pop().is_none() {
            return false;
        }
        self.selected = 0;
        true
    }

    /// Indices into `names` matching the query, case-insensitive substring.
    pub fn match_indices(&self, names: &[CompactString]) -> Vec<usize> {
        if self.query.is_empty() {
            return (0..names.len()).collect();
        }
        let needle = self.query.to_lowercase();
        names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.to_lowercase().contains(&needle))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Bookkeeping for the save/load pipeline; tracks the most recent
/// operation. Completions clear it when they match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OpPhase {
    #[default]
    Idle,
    Saving(CompactString),
    Loading(CompactString),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginState {
    pub settings: Settings,
    pub workspaces: WorkspacesState,
    pub switcher: SwitcherState,
    pub phase: OpPhase,
}

impl PluginState {
    pub fn new(settings: Settings, storage: WorkspaceStorage) -> Self {
        Self {
            settings,
            workspaces: WorkspacesState::from_storage(storage),
            switcher: SwitcherState::default(),
            phase: OpPhase::Idle,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
