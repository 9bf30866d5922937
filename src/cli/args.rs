use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cardboard",
    about = "Manage project packages across multiple manager backends",
    long_about = "Install, remove, update and search packages/dependencies through pluggable manager backends such as npm and bower",
    version,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Path to a cardboard.kdl config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Per-manager timeout in seconds (0 disables)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show registered managers and whether their tool is available
    Managers {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Install a package through a manager
    Install {
        /// Manager id (e.g. "npm")
        manager: String,
        /// Package name within that manager's namespace
        package: String,
    },

    /// Uninstall a package through a manager
    Uninstall {
        manager: String,
        package: String,
    },

    /// Update a package through a manager
    Update {
        manager: String,
        package: String,
    },

    /// Search one or all managers for a package
    Search {
        query: String,

        /// Search a single manager instead of all of them
        #[arg(short, long, value_name = "ID")]
        manager: Option<String>,

        /// Maximum results shown per manager (0 shows everything)
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// List installed packages
    List {
        /// List a single manager instead of all of them
        #[arg(short, long, value_name = "ID")]
        manager: Option<String>,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the project page URL for a package
    Url {
        manager: String,
        package: String,
    },

    /// Open a package's project page in the default browser
    Open {
        manager: String,
        package: String,

        /// Open the readme instead of the project page
        #[arg(long)]
        readme: bool,
    },
}
