//! Headless plugin core (state/action/effect).

pub mod action;
pub mod command;
pub mod effect;
pub mod naming;
pub mod navigation;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use command::{Command, CommandInfo, COMMANDS};
pub use effect::Effect;
pub use navigation::{FolderPlan, NavigationSnapshot};
pub use state::{OpPhase, PluginState, RenameEdit, SwitcherMode, SwitcherState, WorkspacesState};
pub use store::{DispatchResult, Store};
