use crate::catalog::{Catalog, CatalogError, SaveOutcome};
use crate::cli::{Cli, Commands};
use crate::storage_engine::HashFile;
use crate::utils::{format_bytes, is_prime, next_prime};
use hashslot_format::constants::SUGGESTED_SLOT_COUNTS;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process::ExitCode;
use tracing::warn;

/// Executes commands from the CLI against a hash file.
///
/// Keyed commands go through [`Catalog`], so ids must be positive. Each
/// command opens the file, performs its operation and reports the outcome
/// on stdout; failures are printed to stderr and produce a non-zero exit
/// code.
///
/// # References
/// - [`Commands`](crate::cli::Commands): Defines the available CLI commands.
/// - [`HashFile`](crate::storage_engine::HashFile): The underlying storage engine.
pub fn execute_command(cli: &Cli) -> ExitCode {
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let storage = cli.storage.as_path();

    match &cli.command {
        Commands::Create { slots, rows, force } => {
            if storage.exists() && !force {
                return Err(format!(
                    "{:?} already exists (pass --force to overwrite)",
                    storage
                ));
            }

            if !is_prime(*slots) {
                warn!(
                    slots,
                    next_prime = next_prime(*slots),
                    suggested = ?SUGGESTED_SLOT_COUNTS,
                    "slot count is not prime; keys may cluster"
                );
            }

            let (_, summary) =
                Catalog::create(storage, *slots, rows.iter().cloned()).map_err(describe)?;

            println!("Created {:?} with {} slots", storage, slots);
            if !rows.is_empty() {
                println!(
                    "Rows inserted: {}, rejected: {}",
                    summary.inserted, summary.rejected
                );
            }
        }

        Commands::Insert { id, value } => {
            let mut catalog = open_catalog(storage)?;
            let content = resolve_value(value.as_deref())?;
            let slot = catalog.add(*id, &content).map_err(describe)?;
            println!("Inserted id {} at slot {}", id, slot);
        }

        Commands::Read { id } => {
            let catalog = open_catalog(storage)?;
            let record = catalog.get(*id).map_err(describe)?;
            println!("{}", record.content);
        }

        Commands::Update { id, value } => {
            let mut catalog = open_catalog(storage)?;
            let content = resolve_value(value.as_deref())?;
            let slot = catalog.edit(*id, &content).map_err(describe)?;
            println!("Updated id {} at slot {}", id, slot);
        }

        Commands::Save { id, value } => {
            let mut catalog = open_catalog(storage)?;
            let content = resolve_value(value.as_deref())?;
            match catalog.save(*id, &content).map_err(describe)? {
                SaveOutcome::Inserted { slot } => println!("Inserted id {} at slot {}", id, slot),
                SaveOutcome::Updated { slot } => println!("Updated id {} at slot {}", id, slot),
            }
        }

        Commands::Delete { id } => {
            let mut catalog = open_catalog(storage)?;
            let slot = catalog.remove(*id).map_err(describe)?;
            println!("Deleted id {} (slot {} is now a tombstone)", id, slot);
        }

        Commands::List { json } => {
            let catalog = open_catalog(storage)?;
            let records = catalog.records().map_err(describe)?;

            if *json {
                let out = serde_json::to_string_pretty(&records).map_err(|e| e.to_string())?;
                println!("{out}");
            } else {
                println!("{:<12} {:<8} CONTENT", "ID", "SLOT");
                println!("{:-<50}", "");
                for record in &records {
                    println!("{:<12} {:<8} {}", record.id, record.slot, record.content);
                }
                println!("{:-<50}", "");
                println!("{} record(s)", records.len());
            }
        }

        Commands::Info { json } => {
            let catalog = open_catalog(storage)?;
            let props = catalog.properties().map_err(describe)?;

            if *json {
                let out = serde_json::to_string_pretty(&props).map_err(|e| e.to_string())?;
                println!("{out}");
                return Ok(());
            }

            println!("\n{:=^50}", " HASH FILE INFO ");
            println!("{:<25} {:?}", "STORAGE FILE:", storage);
            println!("{:-<50}", ""); // Separator

            println!("{:<25} {}", "TOTAL SIZE:", format_bytes(props.file_size));
            println!("{:<25} {}", "TOTAL SLOTS:", props.total_slots);
            println!("{:<25} {} bytes (fixed)", "SLOT SIZE:", props.slot_size);
            println!("{:<25} {}", "OCCUPIED:", props.occupied);
            println!("{:<25} {}", "DELETED:", props.deleted);
            println!("{:<25} {}", "EMPTY:", props.empty);
            println!("{:<25} {:.1}%", "LOAD FACTOR:", props.load_factor * 100.0);

            println!("{:-<50}", ""); // Separator
            println!("{:<25} {}", "HASH FUNCTION:", props.hash_function);
            println!("{:<25} {}", "COLLISIONS:", props.collision_policy);
            println!("{:=<50}", ""); // Footer
        }

        Commands::Copy { target } => {
            require_hash_file(storage)?;
            std::fs::copy(storage, target).map_err(|e| format!("copy failed: {e}"))?;
            println!("Copied {:?} to {:?}", storage, target);
        }

        Commands::Move { target } => {
            require_hash_file(storage)?;
            std::fs::rename(storage, target).map_err(|e| format!("move failed: {e}"))?;
            println!("Moved {:?} to {:?}", storage, target);
        }

        Commands::Remove => {
            require_hash_file(storage)?;
            std::fs::remove_file(storage).map_err(|e| format!("remove failed: {e}"))?;
            println!("Removed {:?}", storage);
        }
    }

    Ok(())
}

fn open_catalog(storage: &Path) -> Result<Catalog, String> {
    Catalog::open(storage).map_err(|err| format!("failed to open storage: {err}"))
}

fn require_hash_file(storage: &Path) -> Result<(), String> {
    HashFile::read_header(storage)
        .map(|_| ())
        .ok_or_else(|| format!("{:?} is not a valid hash file", storage))
}

fn describe(err: CatalogError) -> String {
    err.to_string()
}

/// Uses the explicit value if given, otherwise reads piped stdin.
fn resolve_value(value: Option<&str>) -> Result<String, String> {
    if let Some(value) = value {
        return Ok(value.to_string());
    }

    if io::stdin().is_terminal() || std::env::var("FORCE_NO_TTY").is_ok() {
        return Err("No value provided and stdin is empty.".to_string());
    }

    let mut buffer = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut buffer)
        .map_err(|e| format!("failed to read stdin: {e}"))?;

    let content = buffer.trim_end_matches(['\r', '\n']).to_string();
    if content.is_empty() {
        return Err("No value provided and stdin is empty.".to_string());
    }
    Ok(content)
}
