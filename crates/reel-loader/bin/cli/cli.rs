use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const MONGODB_URI_ENV: &str = "MONGODB_URI";
pub const MONGODB_DB_ENV: &str = "MONGODB_DB";
pub const LOG_FORMAT_ENV: &str = "REEL_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Pretty => write!(f, "pretty"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "reel", about = "Load movie records into MongoDB and look them up")]
pub struct CLI {
    #[arg(
        long,
        global = true,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Pretty
    )]
    pub log_format: LogFormatArg,

    #[command(flatten)]
    pub mongo: MongoArgs,

    // `None` runs `import` from stdin.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args)]
pub struct MongoArgs {
    #[arg(long, global = true, env = MONGODB_URI_ENV, hide_env_values = true)]
    pub mongodb_uri: Option<String>,

    #[arg(long, global = true, env = MONGODB_DB_ENV)]
    pub mongodb_db: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Insert a JSON array of movies as one batch.
    Import {
        /// Read the batch from this file instead of stdin.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Decode and check the batch in memory without connecting.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the movie stored under ID as JSON.
    Get { id: String },
}

impl Default for Command {
    fn default() -> Self {
        Command::Import {
            input: None,
            dry_run: false,
        }
    }
}
