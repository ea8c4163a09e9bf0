use compact_str::CompactString;

use crate::kernel::command::Command;

use super::{Action, Effect, PluginState, SwitcherMode};

mod switcher;
mod workspaces;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

pub struct Store {
    state: PluginState,
}

impl Store {
    pub fn new(state: PluginState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &PluginState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::RunCommand(cmd) => self.dispatch_command(cmd),
            Action::SwitcherOpen { .. }
            | Action::SwitcherClose
            | Action::SwitcherAppend(_)
            | Action::SwitcherBackspace
            | Action::SwitcherMoveSelection(_)
            | Action::SwitcherConfirm { .. }
            | Action::SwitcherRenameBegin
            | Action::SwitcherRenameAppend(_)
            | Action::SwitcherRenameBackspace
            | Action::SwitcherRenameCancel
            | Action::SwitcherRenameAccept
            | Action::SwitcherDeleteSelected
            | Action::SwitcherDeleteConfirm
            | Action::SwitcherDeleteCancel
            | Action::SwitcherDuplicateSelected => self.reduce_switcher_action(action),
            other => self.reduce_workspace_action(other),
        }
    }

    fn dispatch_command(&mut self, command: Command) -> DispatchResult {
        match command {
            Command::OpenSwitcher => self.dispatch(Action::SwitcherOpen {
                mode: SwitcherMode::Switch,
            }),
            Command::OpenEditor => self.dispatch(Action::SwitcherOpen {
                mode: SwitcherMode::Manage,
            }),
            Command::SaveCurrent => match self.state.workspaces.active_name() {
                Some(name) => {
                    let name = CompactString::from(name);
                    self.dispatch(Action::SaveWorkspace {
                        name,
                        background: false,
                    })
                }
                None => DispatchResult {
                    effects: vec![Effect::Notify("No active workspace to save".to_string())],
                    state_changed: false,
                },
            },
            Command::DuplicateCurrent => match self.state.workspaces.active_name() {
                Some(name) => {
                    let source = CompactString::from(name);
                    self.dispatch(Action::DuplicateWorkspace {
                        source,
                        new_name: None,
                    })
                }
                None => DispatchResult {
                    effects: vec![Effect::Notify(
                        "No active workspace to duplicate".to_string(),
                    )],
                    state_changed: false,
                },
            },
            Command::ImportNative => self.dispatch(Action::ImportNative { overwrite: false }),
            Command::ImportNativeOverwrite => {
                self.dispatch(Action::ImportNative { overwrite: true })
            }
            Command::DebugDump => DispatchResult {
                effects: vec![Effect::DumpDebug],
                state_changed: false,
            },
            Command::DebugExport => DispatchResult {
                effects: vec![Effect::ExportDebug],
                state_changed: false,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
