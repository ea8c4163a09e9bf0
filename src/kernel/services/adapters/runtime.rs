//! Async runtime adapter: owns the tokio runtime, the serialized
//! persistence writer and debug-export file IO.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::kernel::services::ports::{PluginData, PluginDataStore};

/// Completion messages drained by the manager on its tick.
pub enum RuntimeMessage {
    DataPersisted { ok: bool },
    DebugExported { path: Option<PathBuf> },
}

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<RuntimeMessage>,
    persist_tx: Option<tokio::sync::mpsc::UnboundedSender<PluginData>>,
    writer: Option<tokio::task::JoinHandle<()>>,
}

impl AsyncRuntime {
    /// Builds the runtime and starts the writer task that owns `store`.
    /// Writes drain strictly in submission order; one failed write is
    /// logged and reported, never propagated into later writes.
    pub fn new(
        tx: Sender<RuntimeMessage>,
        store: Box<dyn PluginDataStore + Send>,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;

        let (persist_tx, mut persist_rx) = tokio::sync::mpsc::unbounded_channel::<PluginData>();
        let writer_tx = tx.clone();
        let writer = runtime.spawn(async move {
            let mut store = store;
            while let Some(data) = persist_rx.recv().await {
                let handoff = tokio::task::spawn_blocking(move || {
                    let result = store.save(&data);
                    (store, result)
                })
                .await;
                match handoff {
                    Ok((returned, result)) => {
                        store = returned;
                        let ok = match result {
                            Ok(()) => true,
                            Err(err) => {
                                tracing::error!(%err, "plugin data persist failed");
                                false
                            }
                        };
                        let _ = writer_tx.send(RuntimeMessage::DataPersisted { ok });
                    }
                    Err(err) => {
                        // The store went down with the panicked task; the
                        // queue cannot continue without it.
                        tracing::error!(%err, "plugin data persist task panicked");
                        let _ = writer_tx.send(RuntimeMessage::DataPersisted { ok: false });
                        return;
                    }
                }
            }
        });

        Ok(Self {
            runtime,
            tx,
            persist_tx: Some(persist_tx),
            writer: Some(writer),
        })
    }

    /// Queues one snapshot for persistence. Never blocks.
    pub fn persist_data(&self, data: PluginData) {
        if let Some(persist_tx) = &self.persist_tx {
            let _ = persist_tx.send(data);
        }
    }

    pub fn export_debug(&self, dir: PathBuf, payload: String) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let stamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_millis())
                .unwrap_or(0);
            let path = dir.join(format!("workdeck-export-{stamp}.json"));
            let result = async {
                tokio::fs::create_dir_all(&dir).await?;
                tokio::fs::write(&path, payload).await
            }
            .await;
            match result {
                Ok(()) => {
                    let _ = tx.send(RuntimeMessage::DebugExported { path: Some(path) });
                }
                Err(err) => {
                    tracing::error!(path = %path.display(), %err, "debug export failed");
                    let _ = tx.send(RuntimeMessage::DebugExported { path: None });
                }
            }
        });
    }

    /// Closes the persistence queue and waits for queued writes to land.
    pub fn flush(mut self) {
        self.persist_tx.take();
        if let Some(writer) = self.writer.take() {
            if let Err(err) = self.runtime.block_on(writer) {
                tracing::error!(%err, "persistence writer did not shut down cleanly");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/runtime.rs"]
mod tests;
