//! In-memory host doubles: layout engine, folder store, native store and
//! notice sink over one shared, scriptable state cell.
//!
//! Every host-side mutation is appended to an operation log so callers can
//! assert sequencing (folder write before layout apply, panel restore
//! after).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use compact_str::CompactString;

use crate::kernel::services::ports::{
    FolderState, FolderStateStore, LayoutBlob, LayoutEngine, LayoutError, NativeWorkspaceStore,
    NoticeSink, Side, SidebarState, WorkspaceBackend, WorkspaceRecord,
};

/// Everything host-side the plugin can observe or mutate.
#[derive(Debug, Default)]
pub struct HostState {
    pub layout: LayoutBlob,
    pub left: SidebarState,
    pub right: SidebarState,
    pub folder_state: Option<FolderState>,
    pub native_available: bool,
    pub native_entries: Vec<(CompactString, LayoutBlob)>,
    pub native_active: Option<CompactString>,
    pub notices: Vec<String>,
    pub ops: Vec<HostOp>,
    /// Every `apply_layout` reports failure until cleared (the layout
    /// still lands, the way a spurious rebuild error behaves).
    pub fail_apply: bool,
    /// Folder writes block this long before completing.
    pub folder_write_delay: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOp {
    CaptureLayout,
    FolderWrite,
    FolderClear,
    ApplyLayout,
    SetSidebarOpen(Side),
    FocusSidebarTab(Side),
    SetSidebarWidth(Side),
}

fn lock(inner: &Mutex<HostState>) -> MutexGuard<'_, HostState> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle that hands out port implementations sharing one host cell.
#[derive(Clone, Default)]
pub struct MemoryHost {
    inner: Arc<Mutex<HostState>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut HostState) -> R) -> R {
        f(&mut lock(&self.inner))
    }

    pub fn layout_engine(&self) -> MemoryLayoutEngine {
        MemoryLayoutEngine {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn folder_store(&self) -> MemoryFolderStore {
        MemoryFolderStore {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn notice_sink(&self) -> MemoryNoticeSink {
        MemoryNoticeSink {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn native_store(&self) -> MemoryNativeStore {
        MemoryNativeStore {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn ops(&self) -> Vec<HostOp> {
        self.with_state(|host| host.ops.clone())
    }

    pub fn clear_ops(&self) {
        self.with_state(|host| host.ops.clear());
    }

    pub fn notices(&self) -> Vec<String> {
        self.with_state(|host| host.notices.clone())
    }
}

pub struct MemoryLayoutEngine {
    inner: Arc<Mutex<HostState>>,
}

impl LayoutEngine for MemoryLayoutEngine {
    fn capture_layout(&self) -> LayoutBlob {
        let mut host = lock(&self.inner);
        host.ops.push(HostOp::CaptureLayout);
        host.layout.clone()
    }

    fn apply_layout(&mut self, layout: &LayoutBlob) -> Result<(), LayoutError> {
        let mut host = lock(&self.inner);
        host.ops.push(HostOp::ApplyLayout);
        host.layout = layout.clone();
        if host.fail_apply {
            return Err(LayoutError("deferred pane rebuild failed".to_string()));
        }
        Ok(())
    }

    fn sidebar(&self, side: Side) -> SidebarState {
        let host = lock(&self.inner);
        match side {
            Side::Left => host.left.clone(),
            Side::Right => host.right.clone(),
        }
    }

    fn set_sidebar_open(&mut self, side: Side, open: bool) {
        let mut host = lock(&self.inner);
        host.ops.push(HostOp::SetSidebarOpen(side));
        match side {
            Side::Left => host.left.open = open,
            Side::Right => host.right.open = open,
        }
    }

    fn focus_sidebar_tab(&mut self, side: Side, view_type: &str) {
        let mut host = lock(&self.inner);
        host.ops.push(HostOp::FocusSidebarTab(side));
        let panel = match side {
            Side::Left => &mut host.left,
            Side::Right => &mut host.right,
        };
        panel.active_tab = Some(CompactString::from(view_type));
    }

    fn set_sidebar_width(&mut self, side: Side, width: u32) {
        let mut host = lock(&self.inner);
        host.ops.push(HostOp::SetSidebarWidth(side));
        let panel = match side {
            Side::Left => &mut host.left,
            Side::Right => &mut host.right,
        };
        panel.width = Some(width);
    }
}

pub struct MemoryFolderStore {
    inner: Arc<Mutex<HostState>>,
}

impl FolderStateStore for MemoryFolderStore {
    fn read(&self) -> Option<FolderState> {
        lock(&self.inner).folder_state.clone()
    }

    fn write(&mut self, state: &FolderState) {
        // The delay runs outside the lock; the op is recorded when the
        // write completes, so the log shows true completion order.
        let delay = lock(&self.inner).folder_write_delay;
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        let mut host = lock(&self.inner);
        host.ops.push(HostOp::FolderWrite);
        host.folder_state = Some(state.clone());
    }

    fn clear(&mut self) {
        let mut host = lock(&self.inner);
        host.ops.push(HostOp::FolderClear);
        host.folder_state = None;
    }
}

pub struct MemoryNoticeSink {
    inner: Arc<Mutex<HostState>>,
}

impl NoticeSink for MemoryNoticeSink {
    fn notify(&mut self, text: &str) {
        lock(&self.inner).notices.push(text.to_string());
    }
}

pub struct MemoryNativeStore {
    inner: Arc<Mutex<HostState>>,
}

impl NativeWorkspaceStore for MemoryNativeStore {
    fn available(&self) -> bool {
        lock(&self.inner).native_available
    }

    fn list_names(&self) -> Vec<CompactString> {
        lock(&self.inner)
            .native_entries
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn active_name(&self) -> Option<CompactString> {
        lock(&self.inner).native_active.clone()
    }

    fn read(&self, name: &str) -> Option<LayoutBlob> {
        lock(&self.inner)
            .native_entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, layout)| layout.clone())
    }
}

/// The native store doubles as a workspace backend: records map onto bare
/// layout entries, navigation is not part of the foreign schema.
impl WorkspaceBackend for MemoryNativeStore {
    fn list_names(&self) -> Vec<CompactString> {
        NativeWorkspaceStore::list_names(self)
    }

    fn active_name(&self) -> Option<CompactString> {
        NativeWorkspaceStore::active_name(self)
    }

    fn load(&self, name: &str) -> Option<WorkspaceRecord> {
        self.read(name).map(|layout| WorkspaceRecord {
            layout,
            last_saved_ms: 0,
            navigation: None,
        })
    }

    fn save(&mut self, name: &str, record: WorkspaceRecord) {
        let mut host = lock(&self.inner);
        match host
            .native_entries
            .iter_mut()
            .find(|(entry, _)| entry == name)
        {
            Some(entry) => entry.1 = record.layout,
            None => host
                .native_entries
                .push((CompactString::from(name), record.layout)),
        }
    }
}
