//! workdeck - workspace persistence and layout-restoration plugin core
//!
//! Module structure:
//! - kernel: headless core (state/action/effect, reducers, service ports)
//! - manager: lifecycle glue (command dispatch, effect runner, deadlines)
//! - logging: file logging bootstrap

pub mod kernel;
pub mod logging;
pub mod manager;
