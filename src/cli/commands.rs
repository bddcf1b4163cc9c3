use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "daybook", about = concat!("daybook v", env!("CARGO_PKG_VERSION"), " - a year of plain-text days"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags shared by the TUI and every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: $XDG_CONFIG_HOME/daybook/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory holding the y<YYYY>/ entry folders
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// strftime pattern for entry file names
    #[arg(long, global = true)]
    pub filename_format: Option<String>,

    /// Treat a header on an entry's first line as a section
    #[arg(long, global = true)]
    pub first_line_section: bool,

    /// Start calendar weeks on Sunday
    #[arg(long, global = true)]
    pub sunday_start: bool,

    /// Year to open (default: this year)
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log to stderr instead of the log file
    #[arg(long, global = true)]
    pub log_stderr: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List sections with the number of days each occurs on
    Sections,
    /// List tags, optionally only those under one section
    Tags(TagsArgs),
    /// List the dates matching a section and/or tag filter
    Dates(DatesArgs),
    /// Print the entry for a date
    Show(ShowArgs),
    /// Search the year's entries by regex
    Search(SearchArgs),
    /// Show recent and upcoming calendar events
    Events,
    /// List scratchpads (free-form notes outside the calendar)
    Scratchpads,
    /// Print one scratchpad
    Scratchpad(ScratchpadArgs),
}

#[derive(Args)]
pub struct TagsArgs {
    /// Section title ("<no section>" for tags before any header)
    #[arg(long)]
    pub section: Option<String>,
}

#[derive(Args)]
pub struct DatesArgs {
    /// Section title ("<no section>" for tags before any header)
    #[arg(long)]
    pub section: Option<String>,
    /// Tag title
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Args)]
pub struct ScratchpadArgs {
    /// Scratchpad name (".md" may be left off)
    pub name: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern
    pub pattern: String,
    /// Case-insensitive
    #[arg(short = 'i', long)]
    pub ignore_case: bool,
}
