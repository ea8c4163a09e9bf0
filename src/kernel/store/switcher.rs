use compact_str::CompactString;

use crate::kernel::state::RenameEdit;
use crate::kernel::Action;

impl super::Store {
    pub(super) fn reduce_switcher_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::SwitcherOpen { mode } => {
                self.state.switcher.open(mode);
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Action::SwitcherClose => {
                if !self.state.switcher.visible {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                self.state.switcher.reset();
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Action::SwitcherAppend(ch) => {
                if !self.state.switcher.visible {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                self.state.switcher.push_query(ch);
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Action::SwitcherBackspace => {
                let changed = self.state.switcher.visible && self.state.switcher.pop_query();
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: changed,
                }
            }
            Action::SwitcherMoveSelection(delta) => {
                if !self.state.switcher.visible {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                let names = self.state.workspaces.list(self.state.settings.natural_sort);
                let count = self.state.switcher.match_indices(&names).len();
                if count == 0 {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                let current = self.state.switcher.selected.min(count - 1) as isize;
                let next = (current + delta).clamp(0, count as isize - 1) as usize;
                let changed = next != self.state.switcher.selected;
                self.state.switcher.selected = next;
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: changed,
                }
            }
            Action::SwitcherConfirm { save_first } => {
                if !self.state.switcher.visible {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                match self.switcher_selected_name() {
                    Some(target) => {
                        self.state.switcher.reset();

                        // The load already captures the outgoing workspace
                        // when save-on-switch is enabled; only add an
                        // explicit capture when it will not.
                        let will_auto_capture = self.state.settings.save_on_switch
                            && self
                                .state
                                .workspaces
                                .active_name()
                                .is_some_and(|active| active != target.as_str());
                        let mut effects = Vec::new();
                        if save_first && !will_auto_capture {
                            if let Some(active) =
                                self.state.workspaces.active_name().map(CompactString::from)
                            {
                                let save = self.reduce_workspace_action(Action::SaveWorkspace {
                                    name: active,
                                    background: true,
                                });
                                effects.extend(save.effects);
                            }
                        }
                        let load =
                            self.reduce_workspace_action(Action::LoadWorkspace { name: target });
                        effects.extend(load.effects);
                        super::DispatchResult {
                            effects,
                            state_changed: true,
                        }
                    }
                    // Nothing matches the query: create a workspace named
                    // after it.
                    None => {
                        let query = CompactString::from(self.state.switcher.query.trim());
                        if query.is_empty() {
                            return super::DispatchResult {
                                effects: Vec::new(),
                                state_changed: false,
                            };
                        }
                        self.state.switcher.reset();
                        let mut result = self.reduce_workspace_action(Action::SaveWorkspace {
                            name: query,
                            background: false,
                        });
                        result.state_changed = true;
                        result
                    }
                }
            }
            Action::SwitcherRenameBegin => {
                if !self.state.switcher.visible || self.state.switcher.rename.is_some() {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                let Some(name) = self.switcher_selected_name() else {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                };
                self.state.switcher.rename = Some(RenameEdit::new(name));
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Action::SwitcherRenameAppend(ch) => match self.state.switcher.rename.as_mut() {
                Some(edit) => {
                    edit.insert(ch);
                    super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: true,
                    }
                }
                None => super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: false,
                },
            },
            Action::SwitcherRenameBackspace => {
                let changed = self
                    .state
                    .switcher
                    .rename
                    .as_mut()
                    .is_some_and(|edit| edit.backspace());
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: changed,
                }
            }
            Action::SwitcherRenameCancel => {
                let changed = self.state.switcher.rename.take().is_some();
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: changed,
                }
            }
            Action::SwitcherRenameAccept => {
                let Some(edit) = self.state.switcher.rename.as_mut() else {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                };
                let from = edit.original.clone();
                let to = CompactString::from(edit.value.trim());

                // Invalid targets re-prompt with the typed value intact.
                if to.is_empty() {
                    edit.error = Some("Workspace name cannot be empty".to_string());
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: true,
                    };
                }
                if to != from && self.state.workspaces.has(&to) {
                    edit.error = Some(format!("A workspace named \"{to}\" already exists"));
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: true,
                    };
                }

                self.state.switcher.rename = None;
                if to == from {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: true,
                    };
                }
                let mut result =
                    self.reduce_workspace_action(Action::RenameWorkspace { from, to });
                result.state_changed = true;
                result
            }
            Action::SwitcherDeleteSelected => {
                if !self.state.switcher.visible {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                let Some(name) = self.switcher_selected_name() else {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                };
                if self.state.settings.confirm_delete {
                    self.state.switcher.confirm_delete = Some(name);
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: true,
                    };
                }
                let mut result = self.reduce_workspace_action(Action::DeleteWorkspace { name });
                self.clamp_switcher_selection();
                result.state_changed = true;
                result
            }
            Action::SwitcherDeleteConfirm => {
                let Some(name) = self.state.switcher.confirm_delete.take() else {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                };
                let mut result = self.reduce_workspace_action(Action::DeleteWorkspace { name });
                self.clamp_switcher_selection();
                result.state_changed = true;
                result
            }
            Action::SwitcherDeleteCancel => {
                let changed = self.state.switcher.confirm_delete.take().is_some();
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: changed,
                }
            }
            Action::SwitcherDuplicateSelected => {
                if !self.state.switcher.visible {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                let Some(source) = self.switcher_selected_name() else {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                };
                let mut result = self.reduce_workspace_action(Action::DuplicateWorkspace {
                    source,
                    new_name: None,
                });
                result.state_changed = true;
                result
            }
            _ => unreachable!("non-switcher action passed to reduce_switcher_action"),
        }
    }

    fn switcher_selected_name(&self) -> Option<CompactString> {
        let names = self.state.workspaces.list(self.state.settings.natural_sort);
        let indices = self.state.switcher.match_indices(&names);
        let slot = indices
            .get(self.state.switcher.selected)
            .or_else(|| indices.last())
            .copied()?;
        names.get(slot).cloned()
    }

    fn clamp_switcher_selection(&mut self) {
        let names = self.state.workspaces.list(self.state.settings.natural_sort);
        let count = self.state.switcher.match_indices(&names).len();
        if count == 0 {
            self.state.switcher.selected = 0;
        } else if self.state.switcher.selected >= count {
            self.state.switcher.selected = count - 1;
        }
    }
}
