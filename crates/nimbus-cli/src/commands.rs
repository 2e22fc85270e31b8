use crate::args::{
    AppCommand, Cli, Commands, PlanCommand, PluginCommand, RouterCommand, TargetCommand,
};
use crate::context::{ExecutionContext, RenderSettings};
use crate::handlers;
use anyhow::Result;
use std::path::PathBuf;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = expand_tilde(&cli.data_dir);
    let render = RenderSettings::from_flags(
        &cli.format,
        cli.fields.as_deref(),
        cli.hide_fields.as_deref(),
    );
    let ctx = ExecutionContext::new(data_dir, cli.target);

    match cli.command {
        Commands::Target { command } => match command {
            TargetCommand::Add {
                label,
                url,
                set_current,
            } => handlers::target::add(&ctx, &label, &url, set_current),
            TargetCommand::List => handlers::target::list(&ctx, &render),
            TargetCommand::Set { label } => handlers::target::set(&ctx, &label),
            TargetCommand::Remove { label } => handlers::target::remove(&ctx, &label),
        },

        Commands::Login { email } => handlers::auth::login(&ctx, &email),
        Commands::Logout => handlers::auth::logout(&ctx),

        Commands::App { command } => match command {
            AppCommand::List => handlers::app::list(&ctx, &render),
            AppCommand::Info { name } => handlers::app::info(&ctx, &render, &name),
            AppCommand::Create {
                name,
                platform,
                plan,
            } => handlers::app::create(&ctx, &render, &name, &platform, plan.as_deref()),
            AppCommand::Remove { name } => handlers::app::remove(&ctx, &name),
            AppCommand::Log { name } => handlers::app::log(&ctx, &render, &name),
        },

        Commands::Plan { command } => match command {
            PlanCommand::List => handlers::plan::list(&ctx, &render),
        },

        Commands::Router { command } => match command {
            RouterCommand::List => handlers::router::list(&ctx, &render),
        },

        Commands::Plugin { command } => match command {
            PluginCommand::List => handlers::plugin::list(&ctx, &render),
        },

        Commands::External(args) => handlers::plugin::delegate(&ctx, &args),
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_to_home() {
        let expanded = expand_tilde("~/.nimbus");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with(".nimbus"));
    }

    #[test]
    fn absolute_paths_pass_through() {
        assert_eq!(expand_tilde("/tmp/nimbus"), PathBuf::from("/tmp/nimbus"));
    }
}
