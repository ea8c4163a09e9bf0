//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the plugin (kernel-facing).
//! - `adapters`: OS/runtime specific implementations (IO/async).
//! - `bus`: in-process workspace event fan-out.

pub mod adapters;
pub mod bus;
pub mod ports;

pub use bus::{EventBus, ListenerResult, WorkspaceEvent};
