//! Command-line shell for the rawmat record store.
//!
//! Loads registration dumps into SQLite and runs the search, ranking,
//! suggestion, and CSV export workflows against them.

use std::env;
use std::fs;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rawmat_core::aggregate::{aggregate_by_manufacturer, aggregate_by_product};
use rawmat_core::db::RecordStore;
use rawmat_core::export::{csv_filename, csv_payload};
use rawmat_core::format::{format_compact_won, format_number};
use rawmat_core::models::DrugRecord;
use rawmat_core::session::{SearchField, SearchFilter, Session, DEFAULT_SEARCH_LIMIT};
use rawmat_core::suggest::{rank_suggestions, MAX_SUGGESTIONS};
use rawmat_core::usage::estimate_usage;

const USAGE: &str = "\
Usage: rawmat <command> [options]

Commands:
  import <records.json>            Load a JSON dump into the store
  search  --ingredient <term>      List matching records with usage
          --manufacturer <term>
  top     --ingredient <term>      Ranked series (manufacturers for an
          --manufacturer <term>    ingredient search, products otherwise)
  export  --ingredient <term>      Write the usage report CSV
          --manufacturer <term>
  suggest --ingredient <prefix>    Autocomplete candidates
          --manufacturer <prefix>

Options:
  --db <path>      Store path (default rawmat.db, or RAWMAT_DB)
  --limit <n>      Result cap (default 1000 for search, 10 for top)
  --out <file>     Export target (default dated filename)";

const DEFAULT_DB: &str = "rawmat.db";
const DEFAULT_TOP_LIMIT: usize = 10;

struct CliArgs {
    command: String,
    positional: Vec<String>,
    ingredient: Option<String>,
    manufacturer: Option<String>,
    limit: Option<usize>,
    db: Option<String>,
    out: Option<String>,
}

fn parse_args(raw: &[String]) -> Result<CliArgs> {
    let mut args = CliArgs {
        command: raw[0].clone(),
        positional: Vec::new(),
        ingredient: None,
        manufacturer: None,
        limit: None,
        db: None,
        out: None,
    };

    let mut iter = raw[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ingredient" => args.ingredient = Some(flag_value(&mut iter, "--ingredient")?),
            "--manufacturer" => args.manufacturer = Some(flag_value(&mut iter, "--manufacturer")?),
            "--limit" => {
                let value = flag_value(&mut iter, "--limit")?;
                let parsed = value
                    .parse()
                    .with_context(|| format!("invalid --limit value '{}'", value))?;
                args.limit = Some(parsed);
            }
            "--db" => args.db = Some(flag_value(&mut iter, "--db")?),
            "--out" => args.out = Some(flag_value(&mut iter, "--out")?),
            other if other.starts_with("--") => bail!("unknown option '{}'", other),
            other => args.positional.push(other.to_string()),
        }
    }

    Ok(args)
}

fn flag_value(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> Result<String> {
    match iter.next() {
        Some(value) => Ok(value.clone()),
        None => bail!("{} requires a value", flag),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let raw: Vec<String> = env::args().skip(1).collect();
    if raw.is_empty() {
        println!("{}", USAGE);
        return Ok(());
    }

    let args = parse_args(&raw)?;
    match args.command.as_str() {
        "import" => cmd_import(&args),
        "search" => cmd_search(&args),
        "top" => cmd_top(&args),
        "export" => cmd_export(&args),
        "suggest" => cmd_suggest(&args),
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        other => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }
}

fn db_path(args: &CliArgs) -> String {
    args.db
        .clone()
        .or_else(|| env::var("RAWMAT_DB").ok())
        .unwrap_or_else(|| DEFAULT_DB.to_string())
}

fn open_store(args: &CliArgs) -> Result<RecordStore> {
    let path = db_path(args);
    RecordStore::open(&path).with_context(|| format!("failed to open store at {}", path))
}

/// Build a session filter from the flags; exactly one dimension must
/// be given.
fn filter_from(args: &CliArgs, limit: usize) -> Result<SearchFilter> {
    match (&args.ingredient, &args.manufacturer) {
        (Some(term), None) => {
            let mut filter = SearchFilter::new(SearchField::Ingredient, term.clone());
            filter.limit = limit;
            Ok(filter)
        }
        (None, Some(term)) => {
            let mut filter = SearchFilter::new(SearchField::Manufacturer, term.clone());
            filter.limit = limit;
            Ok(filter)
        }
        (Some(_), Some(_)) => bail!("give either --ingredient or --manufacturer, not both"),
        (None, None) => bail!("a search term is required (--ingredient or --manufacturer)"),
    }
}

fn search_snapshot(store: &RecordStore, filter: &SearchFilter) -> Result<Vec<DrugRecord>> {
    let records = match filter.field {
        SearchField::Ingredient => store.search(Some(&filter.term), None, filter.limit)?,
        SearchField::Manufacturer => store.search(None, Some(&filter.term), filter.limit)?,
    };
    Ok(records)
}

fn cmd_import(args: &CliArgs) -> Result<()> {
    let path = match args.positional.first() {
        Some(path) => path,
        None => bail!("import requires a JSON file argument"),
    };
    let json = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;

    let mut store = open_store(args)?;
    let count = store
        .import_json(&json)
        .with_context(|| format!("failed to import {}", path))?;

    info!(count, path = path.as_str(), "import finished");
    println!("{} records loaded into {}", count, db_path(args));
    Ok(())
}

fn cmd_search(args: &CliArgs) -> Result<()> {
    let store = open_store(args)?;
    let filter = filter_from(args, args.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))?;
    let snapshot = search_snapshot(&store, &filter)?;

    let mut session = Session::new();
    session.set_filter(filter);
    session.toggle_select_all(&snapshot);

    for record in &snapshot {
        let estimate = estimate_usage(record);
        let usage = if estimate.is_computable() {
            format!("{} kg", format_number(estimate.kilograms(), 3))
        } else {
            "-".to_string()
        };
        println!(
            "{:>8}  {}  [{}]  {} {}  {}  {}",
            record.id,
            record.product_name,
            record.manufacturer_name,
            record.amount,
            record.unit,
            format_compact_won(record.production_won()),
            usage,
        );
    }

    println!(
        "\n{} records, estimated usage {} kg",
        snapshot.len(),
        format_number(session.total_selected_usage(&snapshot), 3),
    );
    Ok(())
}

fn cmd_top(args: &CliArgs) -> Result<()> {
    let store = open_store(args)?;
    let limit = args.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    // Rank over the full result set; --limit caps the ranking, not
    // the scan.
    let filter = filter_from(args, DEFAULT_SEARCH_LIMIT)?;
    let snapshot = search_snapshot(&store, &filter)?;

    match filter.field {
        SearchField::Ingredient => {
            let series = aggregate_by_manufacturer(&snapshot, limit);

            println!("Tablet/capsule manufacturers by estimated usage:");
            for (rank, entry) in series.tablet.iter().enumerate() {
                println!(
                    "{:>3}. {}  {} kg",
                    rank + 1,
                    entry.name,
                    format_number(entry.value, 3)
                );
            }
            println!(
                "     total {} kg",
                format_number(series.tablet_total(), 3)
            );

            if !series.other.is_empty() {
                println!("\nOther-form manufacturers by production value:");
                for (rank, entry) in series.other.iter().enumerate() {
                    println!(
                        "{:>3}. {}  {}",
                        rank + 1,
                        entry.name,
                        format_compact_won(entry.value)
                    );
                }
                println!("     total {}", format_compact_won(series.other_total()));
            }
        }
        SearchField::Manufacturer => {
            let entries = aggregate_by_product(&snapshot, limit);

            println!("Products by production value:");
            for (rank, entry) in entries.iter().enumerate() {
                println!(
                    "{:>3}. {} ({})  {}",
                    rank + 1,
                    entry.product_name,
                    entry.ingredient_name,
                    format_compact_won(entry.production_won)
                );
            }
        }
    }
    Ok(())
}

fn cmd_export(args: &CliArgs) -> Result<()> {
    let store = open_store(args)?;
    let filter = filter_from(args, args.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))?;
    let snapshot = search_snapshot(&store, &filter)?;
    if snapshot.is_empty() {
        bail!("nothing to export for '{}'", filter.term);
    }

    let mut session = Session::new();
    session.set_filter(filter);
    session.toggle_select_all(&snapshot);
    let selected = session.selected_records(&snapshot);

    let payload = csv_payload(&selected);
    let path = match &args.out {
        Some(path) => path.clone(),
        None => csv_filename(chrono::Local::now().date_naive()),
    };
    fs::write(&path, payload).with_context(|| format!("failed to write {}", path))?;

    info!(rows = selected.len(), path = path.as_str(), "export written");
    println!("{} rows written to {}", selected.len(), path);
    Ok(())
}

fn cmd_suggest(args: &CliArgs) -> Result<()> {
    let store = open_store(args)?;
    let limit = args.limit.unwrap_or(MAX_SUGGESTIONS);

    let (names, term) = match (&args.ingredient, &args.manufacturer) {
        (Some(term), None) => (store.ingredient_names()?, term),
        (None, Some(term)) => (store.manufacturer_names()?, term),
        _ => bail!("give either --ingredient or --manufacturer"),
    };

    for name in rank_suggestions(&names, term, limit) {
        println!("{}", name);
    }
    Ok(())
}
