use compact_str::CompactString;

/// Events other plugin components observe (status display, theming hook).
/// Delivery is synchronous, in-process and best-effort: a failing listener
/// is logged and skipped, later listeners still run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceEvent {
    Opened { name: CompactString },
    Deleted { name: CompactString },
    Renamed { from: CompactString, to: CompactString },
}

pub type ListenerResult = Result<(), String>;

type Listener = Box<dyn FnMut(&WorkspaceEvent) -> ListenerResult>;

#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&WorkspaceEvent) -> ListenerResult + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: &WorkspaceEvent) {
        for listener in &mut self.listeners {
            if let Err(err) = listener(event) {
                tracing::warn!(?event, %err, "workspace event listener failed");
            }
        }
    }
}
