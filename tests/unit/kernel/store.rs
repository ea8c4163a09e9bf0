use super::*;
use crate::kernel::navigation::NavigationSnapshot;
use crate::kernel::services::bus::WorkspaceEvent;
use crate::kernel::services::ports::{Settings, SidebarState, WorkspaceRecord, WorkspaceStorage};
use crate::kernel::state::OpPhase;
use serde_json::json;

fn new_store() -> Store {
    Store::new(PluginState::new(Settings::default(), WorkspaceStorage::default()))
}

fn record(layout: serde_json::Value) -> WorkspaceRecord {
    WorkspaceRecord {
        layout,
        last_saved_ms: 0,
        navigation: None,
    }
}

fn snapshot(folders: Option<serde_json::Value>) -> NavigationSnapshot {
    NavigationSnapshot {
        left: SidebarState {
            open: true,
            active_tab: Some(CompactString::from("files")),
            width: Some(280),
        },
        right: SidebarState::default(),
        folders,
    }
}

fn seeded(names: &[&str]) -> Store {
    let mut store = new_store();
    for name in names {
        store
            .state
            .workspaces
            .upsert(&CompactString::from(*name), record(json!({"id": name})));
    }
    store
}

#[test]
fn save_requests_capture_and_enters_saving_phase() {
    let mut store = new_store();

    let result = store.dispatch(Action::SaveWorkspace {
        name: "Daily".into(),
        background: false,
    });

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::CaptureWorkspace {
            name,
            include_navigation: true,
            include_folders: true,
        }] if name == "Daily"
    ));
    assert!(result.state_changed);
    assert_eq!(store.state.phase, OpPhase::Saving("Daily".into()));
}

#[test]
fn save_with_blank_name_notifies() {
    let mut store = new_store();

    let result = store.dispatch(Action::SaveWorkspace {
        name: "   ".into(),
        background: false,
    });

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Notify(text)] if text == "Workspace name cannot be empty"
    ));
    assert!(!result.state_changed);
    assert_eq!(store.state.phase, OpPhase::Idle);
}

#[test]
fn save_honors_navigation_settings() {
    let mut store = new_store();
    store.state.settings.remember_folder_state = false;

    let result = store.dispatch(Action::SaveWorkspace {
        name: "Daily".into(),
        background: false,
    });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::CaptureWorkspace {
            include_navigation: true,
            include_folders: false,
            ..
        }]
    ));

    store.state.settings.remember_navigation = false;
    let result = store.dispatch(Action::SaveWorkspace {
        name: "Daily".into(),
        background: false,
    });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::CaptureWorkspace {
            include_navigation: false,
            include_folders: false,
            ..
        }]
    ));
}

#[test]
fn capture_completion_upserts_activates_and_notifies() {
    let mut store = new_store();
    store.dispatch(Action::SaveWorkspace {
        name: "Daily".into(),
        background: false,
    });

    let result = store.dispatch(Action::WorkspaceCaptured {
        name: "Daily".into(),
        layout: json!({"panes": [1, 2]}),
        navigation: Some(snapshot(None)),
        saved_at_ms: 1234,
    });

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::PersistData, Effect::Notify(text)] if text == "Saved workspace \"Daily\""
    ));
    let record = store.state.workspaces.get("Daily").expect("saved record");
    assert_eq!(record.layout, json!({"panes": [1, 2]}));
    assert_eq!(record.last_saved_ms, 1234);
    assert!(record.navigation.is_some());
    assert_eq!(store.state.workspaces.active_name(), Some("Daily"));
    assert_eq!(store.state.phase, OpPhase::Idle);
}

#[test]
fn background_save_completes_without_phase_or_notice() {
    let mut store = new_store();

    let result = store.dispatch(Action::SaveWorkspace {
        name: "Daily".into(),
        background: true,
    });
    assert!(!result.state_changed);
    assert_eq!(store.state.phase, OpPhase::Idle);

    let result = store.dispatch(Action::WorkspaceCaptured {
        name: "Daily".into(),
        layout: json!({}),
        navigation: None,
        saved_at_ms: 1,
    });
    assert!(matches!(result.effects.as_slice(), [Effect::PersistData]));
    assert!(result.state_changed);
}

#[test]
fn mismatched_capture_completion_keeps_phase_and_stays_quiet() {
    let mut store = new_store();
    store.dispatch(Action::SaveWorkspace {
        name: "A".into(),
        background: false,
    });

    // A switch-triggered capture of another workspace lands first.
    let result = store.dispatch(Action::WorkspaceCaptured {
        name: "B".into(),
        layout: json!({}),
        navigation: None,
        saved_at_ms: 1,
    });
    assert!(matches!(result.effects.as_slice(), [Effect::PersistData]));
    assert_eq!(store.state.phase, OpPhase::Saving("A".into()));

    let result = store.dispatch(Action::WorkspaceCaptured {
        name: "A".into(),
        layout: json!({}),
        navigation: None,
        saved_at_ms: 2,
    });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::PersistData, Effect::Notify(text)] if text == "Saved workspace \"A\""
    ));
    assert_eq!(store.state.phase, OpPhase::Idle);
}

#[test]
fn capture_without_navigation_keeps_remembered_snapshot() {
    let mut store = new_store();
    store.state.workspaces.upsert(
        &CompactString::from("Daily"),
        WorkspaceRecord {
            layout: json!({}),
            last_saved_ms: 0,
            navigation: Some(snapshot(Some(json!({"A": true})))),
        },
    );

    store.dispatch(Action::WorkspaceCaptured {
        name: "Daily".into(),
        layout: json!({"v": 2}),
        navigation: None,
        saved_at_ms: 9,
    });

    let record = store.state.workspaces.get("Daily").expect("record");
    assert_eq!(record.layout, json!({"v": 2}));
    let navigation = record.navigation.as_ref().expect("kept snapshot");
    assert_eq!(navigation.folders, Some(json!({"A": true})));
}

#[test]
fn load_unknown_workspace_notifies() {
    let mut store = new_store();

    let result = store.dispatch(Action::LoadWorkspace {
        name: "Ghost".into(),
    });

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Notify(text)] if text == "Workspace \"Ghost\" not found"
    ));
    assert!(!result.state_changed);
}

#[test]
fn load_requests_folder_and_panel_restore() {
    let mut store = seeded(&["Research"]);

    let result = store.dispatch(Action::LoadWorkspace {
        name: "Research".into(),
    });

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::RestoreWorkspace {
            name,
            restore_panels: true,
            restore_folders: true,
        }] if name == "Research"
    ));
    assert_eq!(store.state.phase, OpPhase::Loading("Research".into()));
}

#[test]
fn load_honors_navigation_settings() {
    let mut store = seeded(&["A"]);
    store.state.settings.remember_folder_state = false;

    let result = store.dispatch(Action::LoadWorkspace { name: "A".into() });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::RestoreWorkspace {
            restore_panels: true,
            restore_folders: false,
            ..
        }]
    ));

    store.state.settings.remember_navigation = false;
    let result = store.dispatch(Action::LoadWorkspace { name: "A".into() });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::RestoreWorkspace {
            restore_panels: false,
            restore_folders: false,
            ..
        }]
    ));
}

#[test]
fn load_captures_the_outgoing_workspace_first() {
    let mut store = seeded(&["A", "B"]);
    store.state.workspaces.set_active("A");

    let result = store.dispatch(Action::LoadWorkspace { name: "B".into() });

    assert!(matches!(
        result.effects.as_slice(),
        [
            Effect::CaptureWorkspace { name: outgoing, .. },
            Effect::RestoreWorkspace { name: target, .. },
        ] if outgoing == "A" && target == "B"
    ));
}

#[test]
fn reloading_the_active_workspace_skips_the_outgoing_capture() {
    let mut store = seeded(&["A"]);
    store.state.workspaces.set_active("A");

    let result = store.dispatch(Action::LoadWorkspace { name: "A".into() });

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::RestoreWorkspace { .. }]
    ));
}

#[test]
fn save_on_switch_off_skips_the_outgoing_capture() {
    let mut store = seeded(&["A", "B"]);
    store.state.workspaces.set_active("A");
    store.state.settings.save_on_switch = false;

    let result = store.dispatch(Action::LoadWorkspace { name: "B".into() });

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::RestoreWorkspace { .. }]
    ));
}

#[test]
fn maintain_across_workspaces_suppresses_navigation_restore() {
    let mut store = seeded(&["B"]);
    store.state.settings.maintain_across_workspaces = true;

    let result = store.dispatch(Action::LoadWorkspace { name: "B".into() });

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::RestoreWorkspace {
            restore_panels: false,
            restore_folders: false,
            ..
        }]
    ));
}

#[test]
fn applied_completion_activates_emits_and_notifies() {
    let mut store = seeded(&["A"]);
    store.dispatch(Action::LoadWorkspace { name: "A".into() });

    let result = store.dispatch(Action::WorkspaceApplied { name: "A".into() });

    assert!(matches!(
        result.effects.as_slice(),
        [
            Effect::PersistData,
            Effect::Emit(WorkspaceEvent::Opened { name }),
            Effect::Notify(text),
        ] if name == "A" && text == "Loaded workspace \"A\""
    ));
    assert_eq!(store.state.workspaces.active_name(), Some("A"));
    assert_eq!(store.state.phase, OpPhase::Idle);
}

#[test]
fn delete_of_active_clears_pointer_without_auto_select() {
    let mut store = seeded(&["A", "B"]);
    store.state.workspaces.set_active("A");

    let result = store.dispatch(Action::DeleteWorkspace { name: "A".into() });

    assert!(matches!(
        result.effects.as_slice(),
        [
            Effect::PersistData,
            Effect::Emit(WorkspaceEvent::Deleted { name }),
            Effect::Notify(text),
        ] if name == "A" && text == "Deleted workspace \"A\""
    ));
    assert!(!store.state.workspaces.has("A"));
    assert_eq!(store.state.workspaces.active_name(), None);
    assert!(store.state.workspaces.has("B"));
}

#[test]
fn delete_unknown_workspace_notifies() {
    let mut store = new_store();
    let result = store.dispatch(Action::DeleteWorkspace {
        name: "Ghost".into(),
    });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Notify(text)] if text == "Workspace \"Ghost\" not found"
    ));
}

#[test]
fn rename_validates_before_touching_state() {
    let mut store = seeded(&["A", "B"]);

    let result = store.dispatch(Action::RenameWorkspace {
        from: "A".into(),
        to: "  ".into(),
    });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Notify(text)] if text == "Workspace name cannot be empty"
    ));

    let result = store.dispatch(Action::RenameWorkspace {
        from: "A".into(),
        to: "A".into(),
    });
    assert!(result.effects.is_empty());
    assert!(!result.state_changed);

    let result = store.dispatch(Action::RenameWorkspace {
        from: "Ghost".into(),
        to: "New".into(),
    });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Notify(text)] if text == "Workspace \"Ghost\" not found"
    ));

    let result = store.dispatch(Action::RenameWorkspace {
        from: "A".into(),
        to: "B".into(),
    });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Notify(text)] if text == "A workspace named \"B\" already exists"
    ));
    assert!(store.state.workspaces.has("A"));
}

#[test]
fn rename_moves_the_record_and_emits() {
    let mut store = seeded(&["A"]);
    store.state.workspaces.set_active("A");

    let result = store.dispatch(Action::RenameWorkspace {
        from: "A".into(),
        to: "Alpha".into(),
    });

    assert!(matches!(
        result.effects.as_slice(),
        [
            Effect::PersistData,
            Effect::Emit(WorkspaceEvent::Renamed { from, to }),
            Effect::Notify(text),
        ] if from == "A" && to == "Alpha" && text == "Renamed workspace to \"Alpha\""
    ));
    assert!(!store.state.workspaces.has("A"));
    assert!(store.state.workspaces.has("Alpha"));
    assert_eq!(store.state.workspaces.active_name(), Some("Alpha"));
}

#[test]
fn duplicate_generates_successive_copy_names() {
    let mut store = seeded(&["Plan"]);
    store.state.workspaces.set_active("Plan");

    let result = store.dispatch(Action::DuplicateWorkspace {
        source: "Plan".into(),
        new_name: None,
    });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::PersistData, Effect::Notify(text)]
            if text == "Duplicated \"Plan\" as \"Plan (copy)\""
    ));
    assert!(store.state.workspaces.has("Plan (copy)"));
    // Duplication does not steal the active pointer.
    assert_eq!(store.state.workspaces.active_name(), Some("Plan"));

    store.dispatch(Action::DuplicateWorkspace {
        source: "Plan".into(),
        new_name: None,
    });
    assert!(store.state.workspaces.has("Plan (copy 2)"));
}

#[test]
fn duplicated_records_are_independent() {
    let mut store = seeded(&["Plan"]);
    store.dispatch(Action::DuplicateWorkspace {
        source: "Plan".into(),
        new_name: None,
    });

    store.state.workspaces.upsert(
        &CompactString::from("Plan (copy)"),
        record(json!({"id": "changed"})),
    );

    assert_eq!(
        store.state.workspaces.get("Plan").map(|r| &r.layout),
        Some(&json!({"id": "Plan"}))
    );
}

#[test]
fn duplicate_with_explicit_name_validates() {
    let mut store = seeded(&["Plan", "Other"]);

    let result = store.dispatch(Action::DuplicateWorkspace {
        source: "Plan".into(),
        new_name: Some("Other".into()),
    });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Notify(text)] if text == "A workspace named \"Other\" already exists"
    ));

    let result = store.dispatch(Action::DuplicateWorkspace {
        source: "Plan".into(),
        new_name: Some("  ".into()),
    });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Notify(text)] if text == "Workspace name cannot be empty"
    ));

    store.dispatch(Action::DuplicateWorkspace {
        source: "Plan".into(),
        new_name: Some("Plan B".into()),
    });
    assert!(store.state.workspaces.has("Plan B"));
}

#[test]
fn import_requests_a_native_read() {
    let mut store = new_store();
    let result = store.dispatch(Action::ImportNative { overwrite: true });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::ReadNative { overwrite: true }]
    ));
    assert!(!result.state_changed);
}

#[test]
fn native_import_skips_existing_without_overwrite() {
    let mut store = seeded(&["Main"]);

    let result = store.dispatch(Action::NativeImported {
        entries: vec![
            ("Main".into(), json!({"native": 1})),
            ("Side".into(), json!({"native": 2})),
        ],
        overwrite: false,
        saved_at_ms: 7,
    });

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::PersistData, Effect::Notify(text)]
            if text == "Imported 1 native workspace(s), skipped 1 existing"
    ));
    assert_eq!(
        store.state.workspaces.get("Main").map(|r| &r.layout),
        Some(&json!({"id": "Main"}))
    );
    assert_eq!(
        store.state.workspaces.get("Side").map(|r| &r.layout),
        Some(&json!({"native": 2}))
    );
}

#[test]
fn native_import_overwrite_keeps_plugin_navigation() {
    let mut store = new_store();
    store.state.workspaces.upsert(
        &CompactString::from("Main"),
        WorkspaceRecord {
            layout: json!({"old": true}),
            last_saved_ms: 0,
            navigation: Some(snapshot(None)),
        },
    );

    store.dispatch(Action::NativeImported {
        entries: vec![("Main".into(), json!({"native": 1}))],
        overwrite: true,
        saved_at_ms: 7,
    });

    let record = store.state.workspaces.get("Main").expect("record");
    assert_eq!(record.layout, json!({"native": 1}));
    assert!(record.navigation.is_some());
}

#[test]
fn native_import_with_no_entries_notifies() {
    let mut store = new_store();
    let result = store.dispatch(Action::NativeImported {
        entries: Vec::new(),
        overwrite: false,
        saved_at_ms: 0,
    });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Notify(text)] if text == "No native workspaces found"
    ));
    assert!(!result.state_changed);
}

#[test]
fn native_unavailable_notifies() {
    let mut store = new_store();
    let result = store.dispatch(Action::NativeUnavailable);
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Notify(text)] if text == "Native workspace data is not available"
    ));
}

#[test]
fn apply_settings_persists_only_on_change() {
    let mut store = new_store();

    let result = store.dispatch(Action::ApplySettings(Settings::default()));
    assert!(result.effects.is_empty());
    assert!(!result.state_changed);

    let changed = Settings {
        natural_sort: false,
        ..Settings::default()
    };
    let result = store.dispatch(Action::ApplySettings(changed));
    assert!(matches!(result.effects.as_slice(), [Effect::PersistData]));
    assert!(!store.state.settings.natural_sort);
}

#[test]
fn save_current_command_requires_an_active_workspace() {
    let mut store = new_store();
    let result = store.dispatch(Action::RunCommand(Command::SaveCurrent));
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Notify(text)] if text == "No active workspace to save"
    ));

    let mut store = seeded(&["A"]);
    store.state.workspaces.set_active("A");
    let result = store.dispatch(Action::RunCommand(Command::SaveCurrent));
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::CaptureWorkspace { name, .. }] if name == "A"
    ));
    assert_eq!(store.state.phase, OpPhase::Saving("A".into()));
}

#[test]
fn duplicate_current_command_requires_an_active_workspace() {
    let mut store = new_store();
    let result = store.dispatch(Action::RunCommand(Command::DuplicateCurrent));
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Notify(text)] if text == "No active workspace to duplicate"
    ));

    let mut store = seeded(&["A"]);
    store.state.workspaces.set_active("A");
    store.dispatch(Action::RunCommand(Command::DuplicateCurrent));
    assert!(store.state.workspaces.has("A (copy)"));
}

#[test]
fn switcher_commands_open_the_right_mode() {
    let mut store = new_store();

    store.dispatch(Action::RunCommand(Command::OpenSwitcher));
    assert!(store.state.switcher.visible);
    assert_eq!(store.state.switcher.mode, SwitcherMode::Switch);

    store.dispatch(Action::RunCommand(Command::OpenEditor));
    assert_eq!(store.state.switcher.mode, SwitcherMode::Manage);
}

#[test]
fn debug_commands_emit_their_effects() {
    let mut store = new_store();
    let result = store.dispatch(Action::RunCommand(Command::DebugDump));
    assert!(matches!(result.effects.as_slice(), [Effect::DumpDebug]));

    let result = store.dispatch(Action::RunCommand(Command::DebugExport));
    assert!(matches!(result.effects.as_slice(), [Effect::ExportDebug]));
}

#[test]
fn move_selection_clamps_to_matches() {
    let mut store = seeded(&["A", "B", "C"]);
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Switch,
    });

    store.dispatch(Action::SwitcherMoveSelection(5));
    assert_eq!(store.state.switcher.selected, 2);

    store.dispatch(Action::SwitcherMoveSelection(-9));
    assert_eq!(store.state.switcher.selected, 0);

    let result = store.dispatch(Action::SwitcherMoveSelection(1));
    assert!(result.state_changed);
    assert_eq!(store.state.switcher.selected, 1);
}

#[test]
fn switcher_input_is_ignored_while_hidden() {
    let mut store = seeded(&["A"]);

    assert!(!store.dispatch(Action::SwitcherAppend('a')).state_changed);
    assert!(!store.dispatch(Action::SwitcherMoveSelection(1)).state_changed);
    assert!(!store
        .dispatch(Action::SwitcherConfirm { save_first: false })
        .state_changed);
    assert!(!store.dispatch(Action::SwitcherDeleteSelected).state_changed);
}

#[test]
fn typing_filters_and_resets_selection() {
    let mut store = seeded(&["Daily Notes", "Research"]);
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Switch,
    });
    store.dispatch(Action::SwitcherMoveSelection(1));
    assert_eq!(store.state.switcher.selected, 1);

    store.dispatch(Action::SwitcherAppend('r'));
    assert_eq!(store.state.switcher.query, "r");
    assert_eq!(store.state.switcher.selected, 0);
}

#[test]
fn confirm_loads_the_selected_workspace() {
    let mut store = seeded(&["A", "B"]);
    store.state.workspaces.set_active("A");
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Switch,
    });
    store.dispatch(Action::SwitcherMoveSelection(1));

    let result = store.dispatch(Action::SwitcherConfirm { save_first: false });

    assert!(matches!(
        result.effects.as_slice(),
        [
            Effect::CaptureWorkspace { name: outgoing, .. },
            Effect::RestoreWorkspace { name: target, .. },
        ] if outgoing == "A" && target == "B"
    ));
    assert!(!store.state.switcher.visible);
}

#[test]
fn confirm_save_first_adds_a_capture_only_when_the_load_will_not() {
    // Same target as active: the load skips its own capture, so the
    // explicit save must run.
    let mut store = seeded(&["A", "B"]);
    store.state.workspaces.set_active("A");
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Switch,
    });
    let result = store.dispatch(Action::SwitcherConfirm { save_first: true });
    assert!(matches!(
        result.effects.as_slice(),
        [
            Effect::CaptureWorkspace { name: saved, .. },
            Effect::RestoreWorkspace { name: target, .. },
        ] if saved == "A" && target == "A"
    ));

    // Different target with save-on-switch: exactly one capture.
    let mut store = seeded(&["A", "B"]);
    store.state.workspaces.set_active("A");
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Switch,
    });
    store.dispatch(Action::SwitcherMoveSelection(1));
    let result = store.dispatch(Action::SwitcherConfirm { save_first: true });
    assert!(matches!(
        result.effects.as_slice(),
        [
            Effect::CaptureWorkspace { name: saved, .. },
            Effect::RestoreWorkspace { name: target, .. },
        ] if saved == "A" && target == "B"
    ));

    // Save-on-switch off: the explicit save fills in.
    let mut store = seeded(&["A", "B"]);
    store.state.settings.save_on_switch = false;
    store.state.workspaces.set_active("A");
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Switch,
    });
    store.dispatch(Action::SwitcherMoveSelection(1));
    let result = store.dispatch(Action::SwitcherConfirm { save_first: true });
    assert!(matches!(
        result.effects.as_slice(),
        [
            Effect::CaptureWorkspace { name: saved, .. },
            Effect::RestoreWorkspace { name: target, .. },
        ] if saved == "A" && target == "B"
    ));
}

#[test]
fn confirm_with_no_match_creates_a_workspace_from_the_query() {
    let mut store = new_store();
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Switch,
    });
    for ch in "Fresh".chars() {
        store.dispatch(Action::SwitcherAppend(ch));
    }

    let result = store.dispatch(Action::SwitcherConfirm { save_first: false });

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::CaptureWorkspace { name, .. }] if name == "Fresh"
    ));
    assert!(result.state_changed);
    assert!(!store.state.switcher.visible);
    assert_eq!(store.state.phase, OpPhase::Saving("Fresh".into()));
}

#[test]
fn confirm_with_blank_query_and_no_matches_does_nothing() {
    let mut store = new_store();
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Switch,
    });

    let result = store.dispatch(Action::SwitcherConfirm { save_first: false });

    assert!(result.effects.is_empty());
    assert!(!result.state_changed);
    assert!(store.state.switcher.visible);
}

#[test]
fn selection_beyond_matches_falls_back_to_the_last() {
    let mut store = seeded(&["A", "B", "C"]);
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Switch,
    });
    store.state.switcher.selected = 9;

    let result = store.dispatch(Action::SwitcherConfirm { save_first: false });

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::RestoreWorkspace { name, .. }] if name == "C"
    ));
}

#[test]
fn rename_begin_seeds_the_edit_with_the_selection() {
    let mut store = seeded(&["Alpha", "Beta"]);
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Manage,
    });

    store.dispatch(Action::SwitcherRenameBegin);

    let edit = store.state.switcher.rename.as_ref().expect("edit");
    assert_eq!(edit.original, "Alpha");
    assert_eq!(edit.value, "Alpha");
    assert_eq!(edit.cursor, 5);

    // A second begin while editing is ignored.
    let result = store.dispatch(Action::SwitcherRenameBegin);
    assert!(!result.state_changed);
}

#[test]
fn rename_collision_reprompts_with_the_typed_value() {
    let mut store = seeded(&["Alpha", "Beta"]);
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Manage,
    });
    store.dispatch(Action::SwitcherRenameBegin);
    for _ in 0.."Alpha".len() {
        store.dispatch(Action::SwitcherRenameBackspace);
    }
    for ch in "Beta".chars() {
        store.dispatch(Action::SwitcherRenameAppend(ch));
    }

    let result = store.dispatch(Action::SwitcherRenameAccept);

    assert!(result.effects.is_empty());
    let edit = store.state.switcher.rename.as_ref().expect("still editing");
    assert_eq!(edit.value, "Beta");
    assert_eq!(
        edit.error.as_deref(),
        Some("A workspace named \"Beta\" already exists")
    );
    assert!(store.state.workspaces.has("Alpha"));

    // Fixing the value goes through.
    store.dispatch(Action::SwitcherRenameAppend(' '));
    store.dispatch(Action::SwitcherRenameAppend('2'));
    let result = store.dispatch(Action::SwitcherRenameAccept);
    assert!(matches!(
        result.effects.as_slice(),
        [
            Effect::PersistData,
            Effect::Emit(WorkspaceEvent::Renamed { from, to }),
            Effect::Notify(_),
        ] if from == "Alpha" && to == "Beta 2"
    ));
    assert!(store.state.switcher.rename.is_none());
}

#[test]
fn rename_to_blank_reprompts() {
    let mut store = seeded(&["Alpha"]);
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Manage,
    });
    store.dispatch(Action::SwitcherRenameBegin);
    for _ in 0.."Alpha".len() {
        store.dispatch(Action::SwitcherRenameBackspace);
    }

    let result = store.dispatch(Action::SwitcherRenameAccept);

    assert!(result.effects.is_empty());
    let edit = store.state.switcher.rename.as_ref().expect("still editing");
    assert_eq!(edit.error.as_deref(), Some("Workspace name cannot be empty"));
}

#[test]
fn rename_accept_with_unchanged_name_just_closes_the_edit() {
    let mut store = seeded(&["Alpha"]);
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Manage,
    });
    store.dispatch(Action::SwitcherRenameBegin);

    let result = store.dispatch(Action::SwitcherRenameAccept);

    assert!(result.effects.is_empty());
    assert!(result.state_changed);
    assert!(store.state.switcher.rename.is_none());
    assert!(store.state.workspaces.has("Alpha"));
}

#[test]
fn rename_cancel_discards_the_edit() {
    let mut store = seeded(&["Alpha"]);
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Manage,
    });
    store.dispatch(Action::SwitcherRenameBegin);
    store.dispatch(Action::SwitcherRenameAppend('x'));

    store.dispatch(Action::SwitcherRenameCancel);
    assert!(store.state.switcher.rename.is_none());
    assert!(store.state.workspaces.has("Alpha"));
}

#[test]
fn delete_asks_for_confirmation_by_default() {
    let mut store = seeded(&["A", "B"]);
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Manage,
    });

    let result = store.dispatch(Action::SwitcherDeleteSelected);
    assert!(result.effects.is_empty());
    assert_eq!(
        store.state.switcher.confirm_delete,
        Some(CompactString::from("A"))
    );
    assert!(store.state.workspaces.has("A"));

    let result = store.dispatch(Action::SwitcherDeleteConfirm);
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::PersistData, Effect::Emit(_), Effect::Notify(_)]
    ));
    assert!(!store.state.workspaces.has("A"));
    assert!(store.state.switcher.confirm_delete.is_none());
}

#[test]
fn delete_cancel_keeps_the_workspace() {
    let mut store = seeded(&["A"]);
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Manage,
    });
    store.dispatch(Action::SwitcherDeleteSelected);

    let result = store.dispatch(Action::SwitcherDeleteCancel);
    assert!(result.state_changed);
    assert!(store.state.switcher.confirm_delete.is_none());
    assert!(store.state.workspaces.has("A"));

    // Nothing pending: cancel is a no-op.
    assert!(!store.dispatch(Action::SwitcherDeleteCancel).state_changed);
}

#[test]
fn delete_skips_confirmation_when_disabled_and_clamps_selection() {
    let mut store = seeded(&["A", "B"]);
    store.state.settings.confirm_delete = false;
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Manage,
    });
    store.dispatch(Action::SwitcherMoveSelection(1));

    let result = store.dispatch(Action::SwitcherDeleteSelected);

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::PersistData, Effect::Emit(_), Effect::Notify(_)]
    ));
    assert!(!store.state.workspaces.has("B"));
    assert_eq!(store.state.switcher.selected, 0);
}

#[test]
fn duplicate_selected_uses_the_copy_name() {
    let mut store = seeded(&["Plan"]);
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Manage,
    });

    let result = store.dispatch(Action::SwitcherDuplicateSelected);

    assert!(matches!(
        result.effects.as_slice(),
        [Effect::PersistData, Effect::Notify(text)]
            if text == "Duplicated \"Plan\" as \"Plan (copy)\""
    ));
    assert!(store.state.workspaces.has("Plan (copy)"));
    assert!(store.state.switcher.visible);
}

#[test]
fn close_resets_the_switcher() {
    let mut store = seeded(&["A"]);
    store.dispatch(Action::SwitcherOpen {
        mode: SwitcherMode::Switch,
    });
    store.dispatch(Action::SwitcherAppend('a'));

    let result = store.dispatch(Action::SwitcherClose);
    assert!(result.state_changed);
    assert!(!store.state.switcher.visible);
    assert!(store.state.switcher.query.is_empty());

    assert!(!store.dispatch(Action::SwitcherClose).state_changed);
}
