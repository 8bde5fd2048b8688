pub mod actions_context;
pub mod cli;
pub mod commands;
pub mod logging;
