use crate::core::calculator::summary::MAX_WINDOW_DAYS;
use crate::db::store::SortOrder;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rAttendance
/// CLI application to stamp attendance events and summarize shifts with SQLite
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance stamping CLI: sign in/out, breaks and leave, with shift and rolling summaries on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// User whose log is read or written (default: `default_user` from config)
    #[arg(global = true, long = "user")]
    pub user: Option<i64>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Record an attendance stamp
    Stamp {
        /// sign-in | sign-out | start-break | end-break | register-leave
        stamp_type: String,

        #[arg(
            long = "at",
            default_value = "now",
            help = "Stamp time: now, RFC3339, 'YYYY-MM-DD HH:MM' or 'HH:MM' (local)"
        )]
        at: String,

        #[arg(long = "source", help = "Client tag stored with the stamp (default from config)")]
        source: Option<String>,
    },

    /// Show the current attendance state and the actions allowed now
    Status,

    /// List shifts derived from the stamps
    Shifts {
        #[arg(long = "json", help = "Print shifts as JSON")]
        json: bool,
    },

    /// Summarize worked time over a trailing window
    Summary {
        #[arg(
            long = "days",
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_DAYS)),
            help = "Window length in days (default from config)"
        )]
        days: Option<u32>,

        #[arg(long = "daily", help = "Also show per-day totals")]
        daily: bool,

        #[arg(long = "json", help = "Print the summary as JSON")]
        json: bool,
    },

    /// List raw stamps (paginated)
    Events {
        #[arg(long = "limit", default_value_t = 20)]
        limit: u32,

        #[arg(long = "offset", default_value_t = 0)]
        offset: u32,

        #[arg(long = "sort", value_enum, default_value = "desc")]
        sort: SortOrder,
    },

    /// Export shifts
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
