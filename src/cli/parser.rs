use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rCycleTimer
/// CLI application to time work/wait cycles at a workstation
#[derive(Parser)]
#[command(
    name = "rcycletimer",
    version = env!("CARGO_PKG_VERSION"),
    about = "A workstation cycle timer: log work and wait time per task and report value-added share",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

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
            long = "check",
            help = "Check the configuration file for missing fields and add them"
        )]
        check: bool,

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

    /// Manage the database (integrity checks, info, vacuum)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start, end or inspect the work session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Start timing a task
    Start {
        /// Task name (free text)
        task: String,
    },

    /// Pause work on the running task and start counting wait time
    Wait,

    /// Resume work on the running task
    Resume,

    /// Close the running task into a completed cycle
    Complete,

    /// Work/wait totals and percentages for the current session
    Stats {
        #[arg(long = "json", help = "Print the statistics as JSON")]
        json: bool,
    },

    /// List archived cycles
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, help = "Only cycles of this task")]
        task: Option<String>,

        #[arg(long, help = "Only cycles of this operator")]
        operator: Option<String>,
    },

    /// Export archived cycles
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Classify a recorded pose landmark sequence into VA / NVA time
    Classify {
        #[arg(
            long,
            value_name = "FILE",
            help = "JSON file with one array of [x, y, z] landmarks per frame"
        )]
        input: String,

        #[arg(long, help = "Frames per second of the recording (default from config)")]
        fps: Option<f64>,

        #[arg(long, help = "Moving average window in frames (default from config)")]
        window: Option<usize>,

        #[arg(long = "frames", help = "Print the label of every frame")]
        frames: bool,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start a new session
    Start {
        #[arg(long, help = "Operator name attached to completed cycles")]
        operator: Option<String>,
    },

    /// End the session, closing the running task if any
    End,

    /// Show session, running task and wait state
    Status,
}
