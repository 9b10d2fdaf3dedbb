use clap::Subcommand;
use hashslot_format::constants::DEFAULT_SLOT_COUNT;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new hash file with a fixed number of slots
    Create {
        /// Total slots in the table (a prime is recommended)
        #[arg(
            short = 's',
            long = "slots",
            default_value_t = DEFAULT_SLOT_COUNT,
            value_parser = clap::value_parser!(u32).range(1..=i32::MAX as i64)
        )]
        slots: u32,

        /// Initial rows to load, as ID=CONTENT (repeatable)
        #[arg(short = 'r', long = "row", value_name = "ID=CONTENT", value_parser = parse_row)]
        rows: Vec<(i32, String)>,

        /// Overwrite the file if it already exists
        #[arg(short = 'f', long)]
        force: bool,
    },

    /// Insert a new record (fails if the id already exists)
    Insert {
        /// The record id (positive)
        #[arg(allow_hyphen_values = true, value_parser = clap::value_parser!(i32).range(1..))]
        id: i32,

        /// The content to store (optional; reads from stdin if not provided)
        value: Option<String>,
    },

    /// Read the content stored under an id
    Read {
        /// The record id (positive)
        #[arg(allow_hyphen_values = true, value_parser = clap::value_parser!(i32).range(1..))]
        id: i32,
    },

    /// Replace the content of an existing record
    Update {
        /// The record id (positive)
        #[arg(allow_hyphen_values = true, value_parser = clap::value_parser!(i32).range(1..))]
        id: i32,

        /// The new content (optional; reads from stdin if not provided)
        value: Option<String>,
    },

    /// Insert a record, or update it if the id already exists
    Save {
        /// The record id (positive)
        #[arg(allow_hyphen_values = true, value_parser = clap::value_parser!(i32).range(1..))]
        id: i32,

        /// The content to store (optional; reads from stdin if not provided)
        value: Option<String>,
    },

    /// Delete a record (marks its slot as a tombstone)
    Delete {
        /// The record id (positive)
        #[arg(allow_hyphen_values = true, value_parser = clap::value_parser!(i32).range(1..))]
        id: i32,
    },

    /// List every record, sorted by id
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show file properties and slot occupancy
    Info {
        /// Print properties as JSON
        #[arg(long)]
        json: bool,
    },

    /// Copy the hash file to another path
    Copy {
        /// Destination path (overwritten if present)
        #[arg(value_name = "target")]
        target: PathBuf,
    },

    /// Move the hash file to another path
    Move {
        /// Destination path (overwritten if present)
        #[arg(value_name = "target")]
        target: PathBuf,
    },

    /// Delete the hash file from disk
    Remove,
}

/// Parses an `ID=CONTENT` row argument.
pub fn parse_row(raw: &str) -> Result<(i32, String), String> {
    let (id, content) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=CONTENT, got '{raw}'"))?;

    let id = id
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("invalid id '{}'", id.trim()))?;

    Ok((id, content.trim().to_string()))
}
