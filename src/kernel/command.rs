//! Command entry points registered with the host shell.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    OpenSwitcher,
    OpenEditor,
    SaveCurrent,
    DuplicateCurrent,
    ImportNative,
    ImportNativeOverwrite,
    DebugDump,
    DebugExport,
}

#[derive(Debug, Clone)]
pub struct CommandInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub command: Command,
}

pub static COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        id: "open-switcher",
        label: "Workspaces: Open switcher",
        command: Command::OpenSwitcher,
    },
    CommandInfo {
        id: "open-editor",
        label: "Workspaces: Manage workspaces",
        command: Command::OpenEditor,
    },
    CommandInfo {
        id: "save-current",
        label: "Workspaces: Save current workspace",
        command: Command::SaveCurrent,
    },
    CommandInfo {
        id: "duplicate-current",
        label: "Workspaces: Duplicate current workspace",
        command: Command::DuplicateCurrent,
    },
    CommandInfo {
        id: "import-native",
        label: "Workspaces: Import from host store",
        command: Command::ImportNative,
    },
    CommandInfo {
        id: "import-native-overwrite",
        label: "Workspaces: Import from host store (overwrite)",
        command: Command::ImportNativeOverwrite,
    },
    CommandInfo {
        id: "debug-dump",
        label: "Workspaces: Dump state to log",
        command: Command::DebugDump,
    },
    CommandInfo {
        id: "debug-export",
        label: "Workspaces: Export state to file",
        command: Command::DebugExport,
    },
];

impl Command {
    pub fn from_id(id: &str) -> Option<Command> {
        COMMANDS
            .iter()
            .find(|info| info.id == id)
            .map(|info| info.command)
    }

    pub fn id(self) -> &'static str {
        COMMANDS
            .iter()
            .find(|info| info.command == self)
            .map(|info| info.id)
            .unwrap_or("")
    }
}
