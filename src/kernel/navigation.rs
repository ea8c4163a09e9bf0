//! Sidebar and folder-expansion snapshots: the slice of workspace state the
//! generic layout blob does not reproduce.

use serde::{Deserialize, Serialize};

use crate::kernel::services::ports::{
    FolderState, FolderStateStore, LayoutEngine, Side, SidebarState,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    #[serde(default)]
    pub left: SidebarState,
    #[serde(default)]
    pub right: SidebarState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folders: Option<FolderState>,
}

/// Reads the sidebar chrome and, when asked, the global folder-expansion
/// cell. Side-effect-free.
pub fn capture(
    layout: &dyn LayoutEngine,
    folders: &dyn FolderStateStore,
    include_folders: bool,
) -> NavigationSnapshot {
    NavigationSnapshot {
        left: layout.sidebar(Side::Left),
        right: layout.sidebar(Side::Right),
        folders: if include_folders { folders.read() } else { None },
    }
}

/// What to do with the global folder cell before a layout apply.
#[derive(Debug, Clone, PartialEq)]
pub enum FolderPlan {
    Write(FolderState),
    Clear,
    Skip,
}

impl FolderPlan {
    /// A requested restore replaces the global cell wholesale. A record
    /// without a folder snapshot clears it, so state from the previous
    /// workspace cannot leak into one that never saved any.
    pub fn for_restore(requested: bool, snapshot: Option<&NavigationSnapshot>) -> FolderPlan {
        if !requested {
            return FolderPlan::Skip;
        }
        match snapshot.and_then(|snap| snap.folders.clone()) {
            Some(state) => FolderPlan::Write(state),
            None => FolderPlan::Clear,
        }
    }
}

/// Reapplies sidebar chrome. Only panels whose current state differs from
/// the snapshot are touched, so a repeated restore is a no-op.
pub fn restore_panels(layout: &mut dyn LayoutEngine, snapshot: &NavigationSnapshot) {
    restore_side(layout, Side::Left, &snapshot.left);
    restore_side(layout, Side::Right, &snapshot.right);
}

fn restore_side(layout: &mut dyn LayoutEngine, side: Side, target: &SidebarState) {
    let current = layout.sidebar(side);
    if current.open != target.open {
        layout.set_sidebar_open(side, target.open);
    }
    if !target.open {
        return;
    }
    if let Some(tab) = target.active_tab.as_deref() {
        if current.active_tab.as_deref() != Some(tab) {
            layout.focus_sidebar_tab(side, tab);
        }
    }
    if let Some(width) = target.width {
        if current.width != Some(width) {
            layout.set_sidebar_width(side, width);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/navigation.rs"]
mod tests;
