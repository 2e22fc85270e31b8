mod args;
mod commands;
pub mod context;
mod handlers;

pub use args::{
    AppCommand, Cli, Commands, PlanCommand, PluginCommand, RouterCommand, TargetCommand,
};
pub use commands::run;
