use compact_str::CompactString;

use crate::kernel::naming;
use crate::kernel::services::bus::WorkspaceEvent;
use crate::kernel::services::ports::WorkspaceRecord;
use crate::kernel::{Action, Effect, OpPhase};

impl super::Store {
    pub(super) fn reduce_workspace_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::SaveWorkspace { name, background } => {
                if name.trim().is_empty() {
                    return super::DispatchResult {
                        effects: vec![Effect::Notify(
                            "Workspace name cannot be empty".to_string(),
                        )],
                        state_changed: false,
                    };
                }

                let settings = &self.state.settings;
                let effects = vec![Effect::CaptureWorkspace {
                    name: name.clone(),
                    include_navigation: settings.remember_navigation,
                    include_folders: settings.remember_navigation
                        && settings.remember_folder_state,
                }];
                if background {
                    return super::DispatchResult {
                        effects,
                        state_changed: false,
                    };
                }

                self.state.phase = OpPhase::Saving(name);
                super::DispatchResult {
                    effects,
                    state_changed: true,
                }
            }
            Action::WorkspaceCaptured {
                name,
                layout,
                navigation,
                saved_at_ms,
            } => {
                // A capture without navigation keeps whatever the record
                // already remembered instead of erasing it.
                let navigation = navigation.or_else(|| {
                    self.state
                        .workspaces
                        .get(&name)
                        .and_then(|record| record.navigation.clone())
                });
                self.state.workspaces.upsert(
                    &name,
                    WorkspaceRecord {
                        layout,
                        last_saved_ms: saved_at_ms,
                        navigation,
                    },
                );
                self.state.workspaces.set_active(&name);

                let mut effects = vec![Effect::PersistData];
                if matches!(&self.state.phase, OpPhase::Saving(n) if *n == name) {
                    self.state.phase = OpPhase::Idle;
                    effects.push(Effect::Notify(format!("Saved workspace \"{name}\"")));
                }
                super::DispatchResult {
                    effects,
                    state_changed: true,
                }
            }
            Action::LoadWorkspace { name } => {
                if !self.state.workspaces.has(&name) {
                    return super::DispatchResult {
                        effects: vec![Effect::Notify(format!(
                            "Workspace \"{name}\" not found"
                        ))],
                        state_changed: false,
                    };
                }

                let settings = &self.state.settings;
                let restore_navigation =
                    settings.remember_navigation && !settings.maintain_across_workspaces;

                let mut effects = Vec::new();
                if settings.save_on_switch {
                    if let Some(active) = self.state.workspaces.active_name() {
                        if active != name {
                            effects.push(Effect::CaptureWorkspace {
                                name: CompactString::from(active),
                                include_navigation: settings.remember_navigation,
                                include_folders: settings.remember_navigation
                                    && settings.remember_folder_state,
                            });
                        }
                    }
                }
                effects.push(Effect::RestoreWorkspace {
                    name: name.clone(),
                    restore_panels: restore_navigation,
                    restore_folders: restore_navigation && settings.remember_folder_state,
                });

                self.state.phase = OpPhase::Loading(name);
                super::DispatchResult {
                    effects,
                    state_changed: true,
                }
            }
            Action::WorkspaceApplied { name } => {
                self.state.workspaces.set_active(&name);
                if matches!(&self.state.phase, OpPhase::Loading(n) if *n == name) {
                    self.state.phase = OpPhase::Idle;
                }
                super::DispatchResult {
                    effects: vec![
                        Effect::PersistData,
                        Effect::Emit(WorkspaceEvent::Opened { name: name.clone() }),
                        Effect::Notify(format!("Loaded workspace \"{name}\"")),
                    ],
                    state_changed: true,
                }
            }
            Action::DeleteWorkspace { name } => {
                if self.state.workspaces.remove(&name).is_none() {
                    return super::DispatchResult {
                        effects: vec![Effect::Notify(format!(
                            "Workspace \"{name}\" not found"
                        ))],
                        state_changed: false,
                    };
                }
                super::DispatchResult {
                    effects: vec![
                        Effect::PersistData,
                        Effect::Emit(WorkspaceEvent::Deleted { name: name.clone() }),
                        Effect::Notify(format!("Deleted workspace \"{name}\"")),
                    ],
                    state_changed: true,
                }
            }
            Action::RenameWorkspace { from, to } => {
                let to = CompactString::from(to.trim());
                if to.is_empty() {
                    return super::DispatchResult {
                        effects: vec![Effect::Notify(
                            "Workspace name cannot be empty".to_string(),
                        )],
                        state_changed: false,
                    };
                }
                if from == to {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                if !self.state.workspaces.has(&from) {
                    return super::DispatchResult {
                        effects: vec![Effect::Notify(format!(
                            "Workspace \"{from}\" not found"
                        ))],
                        state_changed: false,
                    };
                }
                if self.state.workspaces.has(&to) {
                    return super::DispatchResult {
                        effects: vec![Effect::Notify(format!(
                            "A workspace named \"{to}\" already exists"
                        ))],
                        state_changed: false,
                    };
                }

                self.state.workspaces.rename(&from, &to);
                super::DispatchResult {
                    effects: vec![
                        Effect::PersistData,
                        Effect::Emit(WorkspaceEvent::Renamed {
                            from,
                            to: to.clone(),
                        }),
                        Effect::Notify(format!("Renamed workspace to \"{to}\"")),
                    ],
                    state_changed: true,
                }
            }
            Action::DuplicateWorkspace { source, new_name } => {
                let Some(record) = self.state.workspaces.get(&source) else {
                    return super::DispatchResult {
                        effects: vec![Effect::Notify(format!(
                            "Workspace \"{source}\" not found"
                        ))],
                        state_changed: false,
                    };
                };
                let record = record.clone();

                let name = match new_name {
                    Some(name) => {
                        let name = CompactString::from(name.trim());
                        if name.is_empty() {
                            return super::DispatchResult {
                                effects: vec![Effect::Notify(
                                    "Workspace name cannot be empty".to_string(),
                                )],
                                state_changed: false,
                            };
                        }
                        if self.state.workspaces.has(&name) {
                            return super::DispatchResult {
                                effects: vec![Effect::Notify(format!(
                                    "A workspace named \"{name}\" already exists"
                                ))],
                                state_changed: false,
                            };
                        }
                        name
                    }
                    None => naming::copy_name(&source, |candidate| {
                        self.state.workspaces.has(candidate)
                    }),
                };

                self.state.workspaces.upsert(&name, record);
                super::DispatchResult {
                    effects: vec![
                        Effect::PersistData,
                        Effect::Notify(format!("Duplicated \"{source}\" as \"{name}\"")),
                    ],
                    state_changed: true,
                }
            }
            Action::ImportNative { overwrite } => super::DispatchResult {
                effects: vec![Effect::ReadNative { overwrite }],
                state_changed: false,
            },
            Action::NativeImported {
                entries,
                overwrite,
                saved_at_ms,
            } => {
                if entries.is_empty() {
                    return super::DispatchResult {
                        effects: vec![Effect::Notify("No native workspaces found".to_string())],
                        state_changed: false,
                    };
                }

                let mut imported = 0usize;
                let mut skipped = 0usize;
                for (name, layout) in entries {
                    if !overwrite && self.state.workspaces.has(&name) {
                        skipped += 1;
                        continue;
                    }
                    // Native entries carry no navigation; an overwrite keeps
                    // the navigation the plugin already remembered.
                    let navigation = self
                        .state
                        .workspaces
                        .get(&name)
                        .and_then(|record| record.navigation.clone());
                    self.state.workspaces.upsert(
                        &name,
                        WorkspaceRecord {
                            layout,
                            last_saved_ms: saved_at_ms,
                            navigation,
                        },
                    );
                    imported += 1;
                }

                let mut text = format!("Imported {imported} native workspace(s)");
                if skipped > 0 {
                    text.push_str(&format!(", skipped {skipped} existing"));
                }
                let mut effects = Vec::new();
                if imported > 0 {
                    effects.push(Effect::PersistData);
                }
                effects.push(Effect::Notify(text));
                super::DispatchResult {
                    effects,
                    state_changed: imported > 0,
                }
            }
            Action::NativeUnavailable => super::DispatchResult {
                effects: vec![Effect::Notify(
                    "Native workspace data is not available".to_string(),
                )],
                state_changed: false,
            },
            Action::ApplySettings(settings) => {
                if self.state.settings == settings {
                    return super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                self.state.settings = settings;
                super::DispatchResult {
                    effects: vec![Effect::PersistData],
                    state_changed: true,
                }
            }
            _ => unreachable!("non-workspace action passed to reduce_workspace_action"),
        }
    }
}
