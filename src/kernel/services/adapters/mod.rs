//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod data;
pub mod memory;
pub mod paths;
pub mod runtime;

pub use data::FileDataStore;
pub use memory::{HostOp, HostState, MemoryHost};
pub use paths::{
    ensure_export_dir, ensure_log_dir, get_data_file_path, get_export_dir, get_log_dir,
};
pub use runtime::{AsyncRuntime, RuntimeMessage};
