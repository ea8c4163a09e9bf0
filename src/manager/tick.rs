//! Periodic polling: deadline checks and runtime-message draining, driven
//! by the host's timer hook.

use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use compact_str::CompactString;

use crate::kernel::navigation;
use crate::kernel::services::adapters::RuntimeMessage;
use crate::kernel::Action;

use super::WorkspaceManager;

impl WorkspaceManager {
    /// One poll pass. Returns true when observable state changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        changed |= self.poll_settle_restore();
        changed |= self.poll_auto_save();
        changed |= self.drain_runtime_messages();
        changed
    }

    /// Applies the deferred panel restore once the layout engine's settle
    /// window has elapsed.
    fn poll_settle_restore(&mut self) -> bool {
        let due = self
            .pending_restore
            .as_ref()
            .is_some_and(|pending| Instant::now() >= pending.deadline);
        if !due {
            return false;
        }
        let Some(pending) = self.pending_restore.take() else {
            return false;
        };
        navigation::restore_panels(self.host.layout.as_mut(), &pending.snapshot);
        tracing::debug!(workspace = %pending.name, "navigation restored after settle");
        true
    }

    fn poll_auto_save(&mut self) -> bool {
        let Some(deadline) = self.pending_auto_save else {
            return false;
        };
        if Instant::now() < deadline {
            return false;
        }
        self.pending_auto_save = None;
        let Some(name) = self
            .store
            .state()
            .workspaces
            .active_name()
            .map(CompactString::from)
        else {
            return false;
        };
        self.dispatch(Action::SaveWorkspace {
            name,
            background: true,
        })
    }

    fn drain_runtime_messages(&mut self) -> bool {
        let mut changed = false;
        let mut drained = 0;
        while drained < super::MAX_RUNTIME_DRAIN_PER_TICK {
            match self.runtime_rx.try_recv() {
                Ok(message) => {
                    changed |= self.handle_runtime_message(message);
                    drained += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    fn handle_runtime_message(&mut self, message: RuntimeMessage) -> bool {
        match message {
            RuntimeMessage::DataPersisted { ok } => {
                if ok {
                    if self.persist_failures > 0 {
                        tracing::info!(
                            failures = self.persist_failures,
                            "plugin data persistence recovered"
                        );
                        self.persist_failures = 0;
                    }
                } else {
                    self.persist_failures += 1;
                }
                false
            }
            RuntimeMessage::DebugExported { path } => {
                match path {
                    Some(path) => {
                        let text = format!("Exported debug data to {}", path.display());
                        self.host.notices.notify(&text);
                    }
                    None => {
                        self.host.notices.notify("Debug export failed; see log");
                    }
                }
                false
            }
        }
    }
}
