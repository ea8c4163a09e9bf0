use compact_str::CompactString;

use crate::kernel::services::bus::WorkspaceEvent;

#[derive(Debug, Clone)]
pub enum Effect {
    /// Read the live layout (and optionally navigation) from the host.
    /// Completes with `Action::WorkspaceCaptured`.
    CaptureWorkspace {
        name: CompactString,
        include_navigation: bool,
        include_folders: bool,
    },
    /// Push a stored layout back into the host. The record is read from
    /// kernel state when the effect runs, so a capture ordered ahead of it
    /// in the same batch is what gets applied. Folder state lands before
    /// the layout apply; panel restoration waits for the layout to settle.
    /// Completes with `Action::WorkspaceApplied`.
    RestoreWorkspace {
        name: CompactString,
        restore_panels: bool,
        restore_folders: bool,
    },
    /// Read the host-native workspace list. Completes with
    /// `Action::NativeImported` or `Action::NativeUnavailable`.
    ReadNative {
        overwrite: bool,
    },
    /// Queue the current plugin data for persistence.
    PersistData,
    Notify(String),
    Emit(WorkspaceEvent),
    DumpDebug,
    ExportDebug,
}
