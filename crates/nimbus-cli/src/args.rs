use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nimbus")]
#[command(about = "Manage applications on a nimbus platform", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "~/.nimbus", global = true)]
    pub data_dir: String,

    #[arg(long, global = true, help = "Target label to use for this invocation")]
    pub target: Option<String>,

    #[arg(
        long,
        default_value = "table",
        global = true,
        help = "Output format: table, json, pretty-json or yaml (anything else means table)"
    )]
    pub format: String,

    #[arg(
        long,
        value_name = "F1,F2",
        global = true,
        help = "Show only these fields in table output"
    )]
    pub fields: Option<String>,

    #[arg(
        long,
        value_name = "F1,F2",
        global = true,
        help = "Hide these fields in table output (ignored when --fields is set)"
    )]
    pub hide_fields: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage API targets
    Target {
        #[command(subcommand)]
        command: TargetCommand,
    },

    /// Authenticate against the current target
    Login {
        email: String,
    },

    /// Discard the stored credentials for the current target
    Logout,

    /// Manage applications
    App {
        #[command(subcommand)]
        command: AppCommand,
    },

    /// Inspect available plans
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },

    /// Inspect available routers
    Router {
        #[command(subcommand)]
        command: RouterCommand,
    },

    /// Manage locally installed plugins
    Plugin {
        #[command(subcommand)]
        command: PluginCommand,
    },

    /// Anything else is delegated to an executable plugin
    #[command(external_subcommand)]
    External(Vec<String>),
}

#[derive(Subcommand)]
pub enum TargetCommand {
    /// Register a new target
    Add {
        label: String,
        url: String,

        #[arg(long)]
        set_current: bool,
    },

    /// List registered targets
    List,

    /// Make a registered target the current one
    Set { label: String },

    /// Remove a registered target
    Remove { label: String },
}

#[derive(Subcommand)]
pub enum AppCommand {
    /// List applications visible to the authenticated user
    List,

    /// Show one application in detail
    Info { name: String },

    /// Create a new application
    Create {
        name: String,
        platform: String,

        #[arg(long)]
        plan: Option<String>,
    },

    /// Remove an application
    Remove { name: String },

    /// Stream application logs to stdout
    Log { name: String },
}

#[derive(Subcommand)]
pub enum PlanCommand {
    /// List available plans
    List,
}

#[derive(Subcommand)]
pub enum RouterCommand {
    /// List available routers
    List,
}

#[derive(Subcommand)]
pub enum PluginCommand {
    /// List executables in the plugin directory
    List,
}
