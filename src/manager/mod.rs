//! Plugin lifecycle glue: wires the kernel to the host ports, executes
//! effects and owns the timing state (settle restore, auto-save debounce,
//! persistence completions).

mod tick;

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use compact_str::CompactString;

use crate::kernel::navigation::{self, NavigationSnapshot};
use crate::kernel::services::adapters::{self, AsyncRuntime, MemoryHost, RuntimeMessage};
use crate::kernel::services::bus::{EventBus, ListenerResult, WorkspaceEvent};
use crate::kernel::services::ports::{
    FolderStateStore, LayoutEngine, NativeWorkspaceStore, NoticeSink, PluginData,
    PluginDataStore, Settings, WorkspaceBackend,
};
use crate::kernel::{Action, Command, Effect, FolderPlan, PluginState, Store};

pub(crate) const MAX_RUNTIME_DRAIN_PER_TICK: usize = 64;

/// Host collaborators handed in on plugin load. Every port is mandatory;
/// a host that cannot provide one fails the load instead of limping.
pub struct Host {
    pub layout: Box<dyn LayoutEngine>,
    pub folders: Box<dyn FolderStateStore>,
    pub native: Box<dyn NativeWorkspaceStore>,
    pub notices: Box<dyn NoticeSink>,
}

impl Host {
    /// Wires all four ports to one in-memory host cell.
    pub fn memory(host: &MemoryHost) -> Self {
        Self {
            layout: Box::new(host.layout_engine()),
            folders: Box::new(host.folder_store()),
            native: Box::new(host.native_store()),
            notices: Box::new(host.notice_sink()),
        }
    }
}

struct PendingRestore {
    deadline: Instant,
    name: CompactString,
    snapshot: NavigationSnapshot,
}

pub struct WorkspaceManager {
    store: Store,
    host: Host,
    bus: EventBus,
    runtime: AsyncRuntime,
    runtime_rx: Receiver<RuntimeMessage>,
    /// Panel restore armed by a load, fired once the layout engine has had
    /// its settle window.
    pending_restore: Option<PendingRestore>,
    pending_auto_save: Option<Instant>,
    persist_failures: u64,
    export_dir: Option<PathBuf>,
}

impl WorkspaceManager {
    pub fn new(host: Host, data_store: Box<dyn PluginDataStore + Send>) -> io::Result<Self> {
        let mut data = data_store.load()?.unwrap_or_default();
        let migrated = data.migrate();
        if migrated {
            tracing::info!("migrated legacy navigation layouts into workspace records");
        }

        let (tx, runtime_rx) = mpsc::channel();
        let runtime = AsyncRuntime::new(tx, data_store)?;

        let PluginData {
            settings,
            workspace_storage,
            ..
        } = data;
        let store = Store::new(PluginState::new(settings, workspace_storage));

        let manager = Self {
            store,
            host,
            bus: EventBus::new(),
            runtime,
            runtime_rx,
            pending_restore: None,
            pending_auto_save: None,
            persist_failures: 0,
            export_dir: adapters::get_export_dir(),
        };
        if migrated {
            manager.queue_persist();
        }
        Ok(manager)
    }

    pub fn state(&self) -> &PluginState {
        self.store.state()
    }

    /// Read side of the workspace-backend port other components program
    /// against.
    pub fn backend(&self) -> &dyn WorkspaceBackend {
        &self.store.state().workspaces
    }

    pub fn run_command(&mut self, command: Command) -> bool {
        self.dispatch(Action::RunCommand(command))
    }

    pub fn save_workspace(&mut self, name: &str) -> bool {
        self.dispatch(Action::SaveWorkspace {
            name: CompactString::from(name),
            background: false,
        })
    }

    pub fn load_workspace(&mut self, name: &str) -> bool {
        self.dispatch(Action::LoadWorkspace {
            name: CompactString::from(name),
        })
    }

    pub fn list_names(&self) -> Vec<CompactString> {
        let state = self.store.state();
        state.workspaces.list(state.settings.natural_sort)
    }

    pub fn active_workspace(&self) -> Option<&str> {
        self.store.state().workspaces.active_name()
    }

    pub fn apply_settings(&mut self, settings: Settings) -> bool {
        self.dispatch(Action::ApplySettings(settings))
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&WorkspaceEvent) -> ListenerResult + 'static,
    {
        self.bus.subscribe(listener);
    }

    /// Host layout-change hook; (re)arms the auto-save debounce.
    pub fn on_layout_changed(&mut self) {
        let state = self.store.state();
        if !state.settings.auto_save_on_change {
            return;
        }
        if state.workspaces.active_name().is_none() {
            return;
        }
        self.pending_auto_save =
            Some(Instant::now() + Duration::from_millis(state.settings.auto_save_debounce_ms));
    }

    /// Plugin teardown: the debounce is cancelled outright, one final
    /// snapshot is queued and the persistence queue is drained.
    pub fn unload(mut self) {
        self.pending_restore = None;
        if self.pending_auto_save.take().is_some() {
            tracing::debug!("pending auto-save cancelled on unload");
        }
        self.queue_persist();
        self.runtime.flush();
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        let mut state_changed = result.state_changed;
        for effect in result.effects {
            state_changed |= self.run_effect(effect);
        }
        state_changed
    }

    fn run_effect(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::CaptureWorkspace {
                name,
                include_navigation,
                include_folders,
            } => {
                let layout = self.host.layout.capture_layout();
                let navigation = include_navigation.then(|| {
                    navigation::capture(
                        self.host.layout.as_ref(),
                        self.host.folders.as_ref(),
                        include_folders,
                    )
                });
                self.dispatch(Action::WorkspaceCaptured {
                    name,
                    layout,
                    navigation,
                    saved_at_ms: epoch_ms(),
                })
            }
            Effect::RestoreWorkspace {
                name,
                restore_panels,
                restore_folders,
            } => {
                // A switch supersedes whatever an earlier load or layout
                // change left pending.
                self.pending_auto_save = None;
                self.pending_restore = None;

                // Effects run in order, so a capture queued ahead of this
                // restore has already landed in the record read here.
                let Some(record) = self.store.state().workspaces.get(&name).cloned() else {
                    tracing::warn!(workspace = %name, "workspace vanished before its restore ran");
                    return false;
                };

                // Folder state must be in place before the engine rebuild
                // reads it; write() returns only once the store took it.
                match FolderPlan::for_restore(restore_folders, record.navigation.as_ref()) {
                    FolderPlan::Write(state) => self.host.folders.write(&state),
                    FolderPlan::Clear => self.host.folders.clear(),
                    FolderPlan::Skip => {}
                }

                if let Err(err) = self.host.layout.apply_layout(&record.layout) {
                    // The engine raises spurious errors from unrelated
                    // extensions during rebuild; the switch still counts.
                    tracing::warn!(workspace = %name, %err, "layout apply reported failure");
                }

                if restore_panels {
                    if let Some(snapshot) = record.navigation {
                        let settle = self.store.state().settings.settle_delay_ms;
                        self.pending_restore = Some(PendingRestore {
                            deadline: Instant::now() + Duration::from_millis(settle),
                            name: name.clone(),
                            snapshot,
                        });
                    }
                }

                self.dispatch(Action::WorkspaceApplied { name })
            }
            Effect::ReadNative { overwrite } => {
                if !self.host.native.available() {
                    return self.dispatch(Action::NativeUnavailable);
                }
                let names = self.host.native.list_names();
                let mut entries = Vec::with_capacity(names.len());
                for name in names {
                    if let Some(layout) = self.host.native.read(&name) {
                        entries.push((name, layout));
                    }
                }
                self.dispatch(Action::NativeImported {
                    entries,
                    overwrite,
                    saved_at_ms: epoch_ms(),
                })
            }
            Effect::PersistData => {
                self.queue_persist();
                false
            }
            Effect::Notify(text) => {
                self.host.notices.notify(&text);
                false
            }
            Effect::Emit(event) => {
                self.bus.emit(&event);
                false
            }
            Effect::DumpDebug => {
                self.dump_debug();
                false
            }
            Effect::ExportDebug => {
                let Some(dir) = self.export_dir.clone() else {
                    self.host.notices.notify("Export directory is not available");
                    return false;
                };
                match serde_json::to_string_pretty(&self.snapshot_data()) {
                    Ok(payload) => self.runtime.export_debug(dir, payload),
                    Err(err) => {
                        tracing::error!(%err, "debug export serialization failed");
                    }
                }
                false
            }
        }
    }

    fn snapshot_data(&self) -> PluginData {
        let state = self.store.state();
        PluginData {
            settings: state.settings.clone(),
            workspace_storage: state.workspaces.to_storage(),
            navigation_layouts: Default::default(),
        }
    }

    fn queue_persist(&self) {
        self.runtime.persist_data(self.snapshot_data());
    }

    fn dump_debug(&self) {
        let state = self.store.state();
        tracing::info!(
            workspaces = state.workspaces.len(),
            active = ?state.workspaces.active_name(),
            phase = ?state.phase,
            persist_failures = self.persist_failures,
            "workspace store"
        );
        Self::dump_backend("standalone", &state.workspaces);
        tracing::info!(
            available = self.host.native.available(),
            names = ?self.host.native.list_names(),
            active = ?self.host.native.active_name(),
            "native backend"
        );
    }

    fn dump_backend(label: &str, backend: &dyn WorkspaceBackend) {
        for name in backend.list_names() {
            let Some(record) = backend.load(&name) else {
                continue;
            };
            tracing::info!(
                backend = label,
                %name,
                saved_at_ms = record.last_saved_ms,
                has_navigation = record.navigation.is_some(),
                "workspace record"
            );
        }
    }
}

fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/manager.rs"]
mod tests;
