use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Manga catalog admin console", long_about = None)]
pub struct Cli {
    /// Configuration file; defaults apply when it does not exist
    #[arg(long, short, env = "MANGA_ADMIN_CONFIG", default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in as an administrator and show the first catalog page
    Login {
        username: String,
        #[arg(long, env = "MANGA_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Drop the stored session
    Logout,

    /// Show who the stored session belongs to
    Whoami,

    /// Show one page of the catalog
    List {
        /// only entries carrying this tag
        #[arg(long)]
        tag: Option<String>,
        /// 1-based page number
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// print the page as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List every tag known to the backend
    Tags,

    /// Delete entries by id, one request per id
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Import entries from a JSON file (one object or an array of objects)
    Import { file: PathBuf },
}
