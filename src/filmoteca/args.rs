use clap::{Parser, Subcommand, ValueEnum};
use filmoteca::model::Schema;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "filmoteca")]
#[command(about = "Manage a personal movie catalog stored as a flat CSV file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the catalog file
    #[arg(short, long, global = true, default_value = "data.csv")]
    pub file: PathBuf,

    /// Column layout of the catalog (overrides catalog.json)
    #[arg(long, global = true, value_enum)]
    pub schema: Option<SchemaArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemaArg {
    /// 12 columns, gapless numeric id in column 0
    Legacy,
    /// 11 columns, IMDb const in column 0
    Current,
}

impl From<SchemaArg> for Schema {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Legacy => Schema::Legacy,
            SchemaArg::Current => Schema::Current,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a movie to the catalog
    #[command(alias = "a")]
    Add {
        /// Title (prompted for when omitted)
        title: Option<String>,

        /// IMDb const, e.g. tt0133093
        #[arg(long)]
        key: Option<String>,

        /// Inclusion date, YYYY-MM-DD
        #[arg(long)]
        created: Option<String>,

        /// Original title
        #[arg(long)]
        original_title: Option<String>,

        /// Película or Serie (default: Película)
        #[arg(long = "type")]
        kind: Option<String>,

        /// Comma-separated genres
        #[arg(long)]
        genres: Option<String>,

        /// Personal rating, 0-10
        #[arg(long)]
        rating: Option<String>,

        /// Additional notes
        #[arg(long)]
        notes: Option<String>,

        /// IMDb rating (legacy layout only)
        #[arg(long)]
        imdb_rating: Option<String>,

        /// Physical format, br or dvd (current layout only)
        #[arg(long)]
        format: Option<String>,

        /// Leave unset fields empty instead of prompting
        #[arg(long)]
        no_prompt: bool,

        /// Show the row that would be appended, write nothing
        #[arg(long)]
        dry_run: bool,

        /// Skip the automatic pre-write backup
        #[arg(long)]
        no_backup: bool,
    },

    /// Delete records matching an id (legacy) or IMDb const (current)
    #[command(alias = "rm")]
    Delete {
        /// Identifier to delete (prompted for when omitted)
        id: Option<String>,

        /// Show the resulting catalog without writing it
        #[arg(long)]
        dry_run: bool,

        /// Skip the automatic pre-write backup
        #[arg(long)]
        no_backup: bool,
    },

    /// Set or clear the personal rating of matching records
    Rate {
        /// Identifier to update (prompted for when omitted)
        id: Option<String>,

        /// New rating, 0-10 (blank or omitted prompts; empty input clears)
        rating: Option<String>,

        /// Date rated, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Blank the rating and its date
        #[arg(long)]
        clear: bool,

        /// Show before/after rows without writing them
        #[arg(long)]
        dry_run: bool,

        /// Skip the automatic pre-write backup
        #[arg(long)]
        no_backup: bool,
    },

    /// Inspect and manage catalog backups
    #[command(subcommand)]
    Backup(BackupCommands),
}

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// List backups, oldest first
    #[command(alias = "ls")]
    List,

    /// Print a backup's contents (by index or filename)
    Show {
        /// Backup index (1-based) or filename
        which: String,
    },

    /// Unified diff between two backups, or a backup and the live catalog
    Diff {
        /// Backup index or filename
        a: String,

        /// Second backup; the live catalog when omitted
        b: Option<String>,
    },

    /// Copy a backup over the live catalog
    Restore {
        /// Backup index or filename
        which: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Snapshot the live catalog first
        #[arg(long)]
        backup: bool,
    },

    /// Permanently remove a backup
    Delete {
        /// Backup index or filename
        which: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
