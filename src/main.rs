use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use worldtimez::data::{Storage, TimezoneStore};
use worldtimez::entries::{Directory, TimezoneEntry, TzdbDirectory};
use worldtimez::time::{
    format_utc_offset, format_zone_id, generate_slots, is_canonical_zone_id,
    labels_from_zone_name, localize, offset_minutes_at, resolve_zone,
};
use worldtimez::ui::terminal_guard::install_panic_hook;
use worldtimez::{util, App, Config};

#[derive(Parser)]
#[command(name = "worldtimez")]
#[command(about = "Compare wall clock times across timezones", long_about = None)]
struct Cli {
    /// Directory for state, config and logs (default ~/.worldtimez)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep the location list and theme in memory only. No database or
    /// config file is created; the log file is still written
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tracked locations at an instant
    List {
        /// RFC 3339 instant (default: now)
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },
    /// Track a location
    Add {
        /// Zone identifier, e.g. Europe/London or america_new_york
        zone: String,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
        /// Display name (default: the zone identifier)
        #[arg(long)]
        name: Option<String>,
    },
    /// Stop tracking a location
    Remove {
        zone: String,
        /// Only the entry with this city label
        #[arg(long)]
        city: Option<String>,
    },
    /// Move the entry at position FROM to position TO (as numbered by `list`)
    Move { from: usize, to: usize },
    /// Print the slot window for a zone
    Slots {
        zone: String,
        /// RFC 3339 instant (default: now)
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },
    /// Search the timezone directory
    Search {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Forget the stored list; the local zone is tracked again on next start
    Reset,
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}

/// Canonical identifier for user input: as typed if valid, else repaired.
fn canonical_zone(input: &str) -> Result<String> {
    [input.trim().to_string(), format_zone_id(input)]
        .into_iter()
        .find(|id| is_canonical_zone_id(id) && resolve_zone(id).is_ok())
        .with_context(|| format!("Unknown timezone: {input}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir);

    // Initialize logging to file (<data dir>/logs/worldtimez.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // Disable ANSI colors in log file
        .init();

    let config = if cli.ephemeral {
        Config::load_read_only()
    } else {
        Config::load()
    };
    let storage = Storage::open(cli.ephemeral)?;

    let Some(command) = cli.command else {
        install_panic_hook();
        let directory: Arc<dyn Directory> = Arc::new(TzdbDirectory::new());
        let mut app = App::new(config, storage, directory);
        return app.run().await;
    };

    let store = TimezoneStore::new(&storage);
    match command {
        Command::List { at } => {
            let at = at.unwrap_or_else(Utc::now);
            let list = store.load_or_seed();
            for (position, entry) in list.iter().enumerate() {
                let Ok(info) = localize(at, &entry.zone_id) else {
                    continue;
                };
                println!(
                    "{:>2}  {:<28} {:>8}  {}  ({})  {}",
                    position + 1,
                    entry.location_label(),
                    info.time_label(config.clock),
                    info.date_label,
                    info.offset_label(),
                    entry.zone_id,
                );
            }
        }
        Command::Add {
            zone,
            city,
            country,
            name,
        } => {
            let zone_id = canonical_zone(&zone)?;
            let (default_city, default_country) = labels_from_zone_name(&zone_id);
            let offset = offset_minutes_at(resolve_zone(&zone_id)?, Utc::now());
            let mut entry = TimezoneEntry::new(
                zone_id,
                city.unwrap_or(default_city),
                country.unwrap_or(default_country),
            )
            .with_offset(offset);
            if let Some(name) = name {
                entry = entry.with_display_name(name);
            }

            let list = store.load_or_seed();
            if list.contains(&entry) {
                println!("Already tracking {}", entry.location_label());
            } else {
                println!("Tracking {}", entry.location_label());
                store.save(&list.add(entry));
            }
        }
        Command::Remove { zone, city } => {
            let zone_id = canonical_zone(&zone)?;
            let list = store.load_or_seed();
            let doomed: Vec<TimezoneEntry> = list
                .iter()
                .filter(|e| {
                    e.zone_id == zone_id && city.as_deref().map_or(true, |c| e.city == c)
                })
                .cloned()
                .collect();
            if doomed.is_empty() {
                println!("Not tracking {zone_id}");
                return Ok(());
            }
            let list = doomed.iter().fold(list, |list, entry| {
                println!("Removed {}", entry.location_label());
                list.remove(entry)
            });
            // An emptied list falls back to the local zone right away
            store.save(&list.ensure_seeded());
        }
        Command::Move { from, to } => {
            let list = store.load_or_seed();
            let len = list.len();
            if !(1..=len).contains(&from) || !(1..=len).contains(&to) {
                bail!("Positions must be between 1 and {len}");
            }
            store.save(&list.move_entry(from - 1, to - 1));
        }
        Command::Slots { zone, at } => {
            let zone_id = canonical_zone(&zone)?;
            let at = at.unwrap_or_else(Utc::now);
            let info = localize(at, &zone_id)?;
            println!("{zone_id}  {}  ({})", info.date_label, info.offset_label());
            for slot in generate_slots(at, &zone_id, config.slot_window) {
                let marker = if slot.is_selected { ">" } else { " " };
                println!("{marker} {:>8}  {:+}", slot.label(config.clock), slot.step);
            }
        }
        Command::Search { query, limit } => {
            let directory = TzdbDirectory::new();
            for entry in directory.search(&query, limit.unwrap_or(config.search_limit)) {
                println!(
                    "{:<40} {:<32} {}",
                    entry.location_label(),
                    entry.zone_id,
                    format_utc_offset(entry.utc_offset_minutes)
                );
            }
        }
        Command::Reset => {
            store.wipe();
            println!("Cleared stored locations");
        }
    }

    Ok(())
}
