use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tally_map::{MappingRepository, MappingStore, mapping_to_json, parse_mapping_text};
use tally_model::{LayoutMode, MappingTable, ReportMode, ReportOptions, SheetErrorPolicy};
use tracing::info;

use tally_cli::process::{OutputFormat, ProcessOutcome, ProcessRequest, process_file};

use crate::cli::{FormatArg, LayoutArg, MappingCommand, ModeArg, ProcessArgs, StoreArgs};
use crate::summary::print_mapping;

/// Directory name of the mapping store under the home directory.
const STORE_DIR_NAME: &str = ".toolkit-tally";

pub fn run_process(args: &ProcessArgs) -> Result<ProcessOutcome> {
    let mapping = load_run_mapping(args)?;
    let request = ProcessRequest {
        input: args.input.clone(),
        output_dir: args.output_dir.clone(),
        format: match args.format {
            FormatArg::Xlsx => OutputFormat::Xlsx,
            FormatArg::Csv => OutputFormat::Csv,
        },
        dry_run: args.dry_run,
        options: report_options(args),
    };
    process_file(&request, &mapping)
}

pub fn run_mapping(command: &MappingCommand) -> Result<()> {
    match command {
        MappingCommand::Show { store, json } => {
            let store = open_store(store)?;
            if *json {
                println!("{}", mapping_to_json(store.active())?);
            } else {
                print_mapping(store.active(), store.source());
            }
        }
        MappingCommand::Set { file, store } => {
            let text = fs::read_to_string(file)
                .with_context(|| format!("read mapping {}", file.display()))?;
            let mut store = open_store(store)?;
            store
                .replace_from_text(&text)
                .with_context(|| format!("mapping {} rejected", file.display()))?;
            println!(
                "Saved {} divisions to {}",
                store.active().len(),
                mapping_path(&store).display()
            );
        }
        MappingCommand::Reset { store } => {
            let mut store = open_store(store)?;
            store.reset().context("reset mapping")?;
            println!(
                "Restored default mapping ({} divisions)",
                store.active().len()
            );
        }
        MappingCommand::Path { store } => {
            let store = open_store(store)?;
            println!("{}", mapping_path(&store).display());
        }
    }
    Ok(())
}

fn report_options(args: &ProcessArgs) -> ReportOptions {
    ReportOptions::default()
        .with_report_mode(match args.mode {
            ModeArg::Mapping => ReportMode::MappingDriven,
            ModeArg::Observed => ReportMode::ClassifyObserved,
        })
        .with_layout_mode(match args.layout {
            LayoutArg::Totals => LayoutMode::TotalsGrid,
            LayoutArg::Grouped => LayoutMode::GroupedHeader,
        })
        .with_station_field(args.station_field.clone())
        .with_sheet_policy(if args.skip_invalid_sheets {
            SheetErrorPolicy::SkipSheet
        } else {
            SheetErrorPolicy::Abort
        })
}

/// The `--mapping` file when given, otherwise a snapshot of the store.
fn load_run_mapping(args: &ProcessArgs) -> Result<Arc<MappingTable>> {
    if let Some(path) = &args.mapping {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read mapping {}", path.display()))?;
        let table = parse_mapping_text(&text)
            .with_context(|| format!("mapping {} rejected", path.display()))?;
        info!(divisions = table.len(), "using one-shot mapping");
        return Ok(Arc::new(table));
    }
    Ok(open_store(&args.store)?.snapshot())
}

fn open_store(args: &StoreArgs) -> Result<MappingStore> {
    let dir = args.store_dir.clone().unwrap_or_else(default_store_dir);
    let repository = MappingRepository::new(&dir)
        .with_context(|| format!("open mapping store {}", dir.display()))?;
    Ok(MappingStore::open(repository))
}

fn default_store_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(STORE_DIR_NAME)
}

fn mapping_path(store: &MappingStore) -> PathBuf {
    store
        .repository()
        .map(MappingRepository::mapping_path)
        .unwrap_or_default()
}
