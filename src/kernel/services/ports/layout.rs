//! Layout engine port: the host subsystem that owns pane layout and the
//! sidebar chrome.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Opaque pane-layout structure produced by the host. Stored and replayed
/// verbatim, never interpreted.
pub type LayoutBlob = serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SidebarState {
    #[serde(default)]
    pub open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<CompactString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug)]
pub struct LayoutError(pub String);

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layout engine: {}", self.0)
    }
}

impl std::error::Error for LayoutError {}

pub trait LayoutEngine {
    /// Snapshot of the current pane arrangement.
    fn capture_layout(&self) -> LayoutBlob;
    /// Replays a previously captured arrangement. The engine is known to
    /// raise spurious errors from unrelated extensions during rebuild;
    /// callers log and continue.
    fn apply_layout(&mut self, layout: &LayoutBlob) -> Result<(), LayoutError>;
    fn sidebar(&self, side: Side) -> SidebarState;
    fn set_sidebar_open(&mut self, side: Side, open: bool);
    fn focus_sidebar_tab(&mut self, side: Side, view_type: &str);
    fn set_sidebar_width(&mut self, side: Side, width: u32);
}
