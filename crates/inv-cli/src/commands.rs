//! Command implementations.
//!
//! Each command runs against an open [`Inventory`] and writes its output to
//! the given writer. Lookup misses and invalid input become errors here even
//! though the inventory itself treats some of them as ignorable.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use inv_core::Inventory;
use inv_export::{
    DocumentSharer, ExportError, HtmlFileRenderer, NoShare, SystemOpener, export_report,
};
use inv_model::{CatalogKind, ItemInput, ReportId, require_non_empty};
use inv_persistence::KeyValueStore;

use crate::cli::{AddArgs, Command, EditArgs, ExportArgs, RemoveArgs};
use crate::settings::Settings;
use crate::summary::{catalog_table, report_table, reports_table};

/// Everything a command needs besides its arguments.
pub struct Session<S> {
    pub inventory: Inventory<S>,
    pub settings: Settings,
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(
        inventory: Inventory<S>,
        settings: Settings,
        data_dir: PathBuf,
        config_path: PathBuf,
    ) -> Self {
        Self {
            inventory,
            settings,
            data_dir,
            config_path,
        }
    }
}

pub fn run<S, W>(command: &Command, session: &mut Session<S>, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    W: Write,
{
    match command {
        Command::Reports => run_reports(session, out),
        Command::Create { boat } => run_create(session, boat, out),
        Command::Show { id } => run_show(session, id, out),
        Command::Delete { id } => run_delete(session, id, out),
        Command::Add(args) => run_add(session, args, out),
        Command::Edit(args) => run_edit(session, args, out),
        Command::Remove(args) => run_remove(session, args, out),
        Command::Catalog { kind, prefix } => {
            run_catalog(session, (*kind).into(), prefix.as_deref(), out)
        }
        Command::Forget { kind, value } => run_forget(session, (*kind).into(), value, out),
        Command::Export(args) => run_export(session, args, out),
        Command::Config { init } => run_config(session, *init, out),
    }
}

fn run_reports<S: KeyValueStore, W: Write>(session: &Session<S>, out: &mut W) -> Result<()> {
    let reports = session.inventory.reports();
    if reports.is_empty() {
        writeln!(out, "No reports yet. Start one with `boat-inventory create <BOAT>`.")?;
        return Ok(());
    }
    writeln!(out, "{}", reports_table(reports))?;
    Ok(())
}

fn run_create<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    boat: &str,
    out: &mut W,
) -> Result<()> {
    let boat = require_non_empty("boat name", boat)?;
    let id = session.inventory.create_report(boat);
    writeln!(out, "{id}")?;
    Ok(())
}

fn run_show<S: KeyValueStore, W: Write>(session: &Session<S>, id: &str, out: &mut W) -> Result<()> {
    let id = resolve_id(&session.inventory, id)?;
    let report = session
        .inventory
        .report(&id)
        .with_context(|| format!("report {id} not found"))?;
    writeln!(out, "Boat: {}", report.boat_name)?;
    writeln!(out, "Report: {}", report.id)?;
    writeln!(
        out,
        "Created: {}",
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    if report.sections.is_empty() {
        writeln!(out, "No items yet.")?;
    } else {
        writeln!(out, "{}", report_table(report))?;
        writeln!(
            out,
            "{} items, total quantity {}",
            report.item_count(),
            report.total_quantity()
        )?;
    }
    Ok(())
}

fn run_delete<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    id: &str,
    out: &mut W,
) -> Result<()> {
    let id = resolve_id(&session.inventory, id)?;
    let removed = session.inventory.delete_report(&id)?;
    writeln!(out, "Deleted report for {}", removed.boat_name)?;
    Ok(())
}

fn run_add<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    args: &AddArgs,
    out: &mut W,
) -> Result<()> {
    let section = require_non_empty("section", &args.section)?;
    let item = require_non_empty("item name", &args.item)?;
    let quantity = require_non_empty("quantity", &args.quantity)?;
    let id = resolve_id(&session.inventory, &args.id)?;
    session.inventory.add_item(&id, section, item, quantity)?;
    writeln!(out, "Added {item} to {section}")?;
    Ok(())
}

fn run_edit<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    args: &EditArgs,
    out: &mut W,
) -> Result<()> {
    let section = require_non_empty("section", &args.section)?;
    let item = require_non_empty("item name", &args.item)?;
    let quantity = require_non_empty("quantity", &args.quantity)?;
    let index = index_from_position(args.position)?;
    let id = resolve_id(&session.inventory, &args.id)?;
    let previous = session
        .inventory
        .edit_item(&id, section, index, &ItemInput::new(item, quantity))?;
    writeln!(
        out,
        "Replaced {} ({}) in {section}",
        previous.name, previous.quantity
    )?;
    Ok(())
}

fn run_remove<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    args: &RemoveArgs,
    out: &mut W,
) -> Result<()> {
    let index = index_from_position(args.position)?;
    let id = resolve_id(&session.inventory, &args.id)?;
    let removed = session.inventory.delete_item(&id, &args.section, index)?;
    writeln!(out, "Removed {} from {}", removed.name, args.section)?;
    Ok(())
}

fn run_catalog<S: KeyValueStore, W: Write>(
    session: &Session<S>,
    kind: CatalogKind,
    prefix: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let catalog = session.inventory.catalog(kind);
    let entries: Vec<&str> = catalog.matching(prefix.unwrap_or_default()).collect();
    if entries.is_empty() {
        writeln!(out, "No {kind} suggestions.")?;
        return Ok(());
    }
    writeln!(out, "{}", catalog_table(kind, entries))?;
    Ok(())
}

fn run_forget<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    kind: CatalogKind,
    value: &str,
    out: &mut W,
) -> Result<()> {
    if !session.inventory.remove_suggestion(kind, value) {
        bail!("'{value}' is not a remembered {kind} suggestion");
    }
    writeln!(out, "Forgot {kind} suggestion '{value}'")?;
    Ok(())
}

fn run_export<S: KeyValueStore, W: Write>(
    session: &Session<S>,
    args: &ExportArgs,
    out: &mut W,
) -> Result<()> {
    let id = resolve_id(&session.inventory, &args.id)?;
    let report = session
        .inventory
        .report(&id)
        .with_context(|| format!("report {id} not found"))?;
    let mut options = session.settings.export.to_options();
    if args.raw_markup {
        options.escape_markup = false;
    }
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| session.settings.export.resolved_output_dir(&session.data_dir));
    let renderer = HtmlFileRenderer::new(output_dir);
    let sharer: &dyn DocumentSharer = if args.open { &SystemOpener } else { &NoShare };

    let path = export_report(report, &options, &renderer, sharer).map_err(with_user_message)?;
    writeln!(out, "Exported {}", path.display())?;
    Ok(())
}

fn run_config<S: KeyValueStore, W: Write>(
    session: &Session<S>,
    init: bool,
    out: &mut W,
) -> Result<()> {
    if init {
        session.settings.save_to(&session.config_path)?;
        writeln!(out, "Wrote {}", session.config_path.display())?;
        return Ok(());
    }
    writeln!(out, "# settings file: {}", session.config_path.display())?;
    writeln!(out, "# data directory: {}", session.data_dir.display())?;
    let content = toml::to_string_pretty(&session.settings).context("serialize settings")?;
    write!(out, "{content}")?;
    Ok(())
}

/// Find a report by full id, or by a prefix that matches exactly one report.
pub fn resolve_id<S: KeyValueStore>(inventory: &Inventory<S>, text: &str) -> Result<ReportId> {
    let text = require_non_empty("report id", text)?;
    let exact = ReportId::new(text);
    if inventory.report(&exact).is_some() {
        return Ok(exact);
    }
    let mut matches = inventory
        .reports()
        .iter()
        .filter(|report| report.id.as_str().starts_with(text));
    match (matches.next(), matches.next()) {
        (Some(report), None) => Ok(report.id.clone()),
        (Some(_), Some(_)) => bail!("'{text}' matches more than one report; use a longer id"),
        (None, _) => bail!("no report matches '{text}'"),
    }
}

fn index_from_position(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .context("positions start at 1")
}

fn with_user_message(err: ExportError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

