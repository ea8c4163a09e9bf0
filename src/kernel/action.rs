use compact_str::CompactString;

use crate::kernel::command::Command;
use crate::kernel::navigation::NavigationSnapshot;
use crate::kernel::services::ports::{LayoutBlob, Settings};
use crate::kernel::state::SwitcherMode;

#[derive(Debug, Clone)]
pub enum Action {
    RunCommand(Command),
    /// Start saving the current layout under `name`. Background saves come
    /// from the auto-save debounce and complete without a notice.
    SaveWorkspace {
        name: CompactString,
        background: bool,
    },
    /// Capture completion; carries everything read from the host.
    WorkspaceCaptured {
        name: CompactString,
        layout: LayoutBlob,
        navigation: Option<NavigationSnapshot>,
        saved_at_ms: u64,
    },
    /// Start applying the named workspace to the host.
    LoadWorkspace {
        name: CompactString,
    },
    /// Apply completion; the host accepted the layout.
    WorkspaceApplied {
        name: CompactString,
    },
    DeleteWorkspace {
        name: CompactString,
    },
    RenameWorkspace {
        from: CompactString,
        to: CompactString,
    },
    /// `new_name` defaults to a "(copy)" variant of the source.
    DuplicateWorkspace {
        source: CompactString,
        new_name: Option<CompactString>,
    },
    ImportNative {
        overwrite: bool,
    },
    NativeImported {
        entries: Vec<(CompactString, LayoutBlob)>,
        overwrite: bool,
        saved_at_ms: u64,
    },
    NativeUnavailable,
    ApplySettings(Settings),
    SwitcherOpen {
        mode: SwitcherMode,
    },
    SwitcherClose,
    SwitcherAppend(char),
    SwitcherBackspace,
    SwitcherMoveSelection(isize),
    SwitcherConfirm {
        save_first: bool,
    },
    SwitcherRenameBegin,
    SwitcherRenameAppend(char),
    SwitcherRenameBackspace,
    SwitcherRenameCancel,
    SwitcherRenameAccept,
    SwitcherDeleteSelected,
    SwitcherDeleteConfirm,
    SwitcherDeleteCancel,
    SwitcherDuplicateSelected,
}
