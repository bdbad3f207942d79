//! End-to-end tests for the CLI commands against an in-memory store.

use std::fs;

use anyhow::Result;
use clap::Parser;
use tempfile::{TempDir, tempdir};

use inv_cli::cli::Cli;
use inv_cli::commands::{Session, resolve_id, run};
use inv_cli::settings::Settings;
use inv_core::Inventory;
use inv_model::CatalogKind;
use inv_persistence::MemoryStore;

struct Harness {
    dir: TempDir,
    session: Session<MemoryStore>,
}

impl Harness {
    fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    fn with_store(store: MemoryStore) -> Self {
        let dir = tempdir().unwrap();
        let session = Session::new(
            Inventory::open(store),
            Settings::default(),
            dir.path().join("data"),
            dir.path().join("config").join("settings.toml"),
        );
        Self { dir, session }
    }

    fn exec(&mut self, args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("boat-inventory").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(&cli.command, &mut self.session, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn create(&mut self, boat: &str) -> String {
        self.exec(&["create", boat]).unwrap().trim().to_string()
    }
}

#[test]
fn create_prints_id_and_lists_report() {
    let mut h = Harness::new();
    let id = h.create("La Poderosa II");

    assert!(!id.is_empty());
    let listing = h.exec(&["reports"]).unwrap();
    assert!(listing.contains("La Poderosa II"));
    assert!(listing.contains(&id));
    assert_eq!(
        h.session.inventory.catalog(CatalogKind::Boat).entries(),
        ["La Poderosa II"]
    );
}

#[test]
fn empty_listing_has_hint() {
    let mut h = Harness::new();
    assert!(h.exec(&["reports"]).unwrap().contains("No reports yet"));
}

#[test]
fn blank_boat_name_is_rejected() {
    let mut h = Harness::new();
    let err = h.exec(&["create", "   "]).unwrap_err();

    assert_eq!(err.to_string(), "boat name must not be empty");
    assert!(h.session.inventory.reports().is_empty());
}

#[test]
fn add_and_show_with_positions() {
    let mut h = Harness::new();
    let id = h.create("Marlin");
    h.exec(&["add", &id, "Bow", "Flare", "3"]).unwrap();
    h.exec(&["add", &id, "Bow", "Rope", "2 coils"]).unwrap();
    h.exec(&["add", &id, "Cabin", "Life vest", "-3"]).unwrap();

    let shown = h.exec(&["show", &id]).unwrap();
    assert!(shown.starts_with("Boat: Marlin\n"));
    assert!(shown.contains("Flare"));
    assert!(shown.contains("Life vest"));
    assert!(shown.contains("3 items, total quantity 2"));

    let report = h.session.inventory.reports()[0].clone();
    assert_eq!(report.sections.labels().collect::<Vec<_>>(), ["Bow", "Cabin"]);
    assert_eq!(report.sections.get("Bow").unwrap()[1].quantity, 2);
}

#[test]
fn add_rejects_blank_fields_before_touching_catalogs() {
    let mut h = Harness::new();
    let id = h.create("Marlin");

    let err = h.exec(&["add", &id, "Bow", "Flare", " "]).unwrap_err();

    assert_eq!(err.to_string(), "quantity must not be empty");
    assert!(h.session.inventory.catalog(CatalogKind::Section).is_empty());
}

#[test]
fn unknown_report_is_an_error() {
    let mut h = Harness::new();
    h.create("Marlin");

    let err = h.exec(&["show", "does-not-exist"]).unwrap_err();
    assert_eq!(err.to_string(), "no report matches 'does-not-exist'");
}

#[test]
fn report_ids_resolve_by_unique_prefix() {
    let store = MemoryStore::new().with_value(
        "reports",
        r#"{"schemaVersion":1,"data":[
            {"id":"abc-1","boatName":"Marlin","createdAt":"2024-05-01T10:30:00Z","sections":{}},
            {"id":"abc-2","boatName":"Dorado","createdAt":"2024-05-02T10:30:00Z","sections":{}},
            {"id":"xyz","boatName":"Tarpon","createdAt":"2024-05-03T10:30:00Z","sections":{}}
        ]}"#,
    );
    let mut h = Harness::with_store(store);

    assert_eq!(resolve_id(&h.session.inventory, "xy").unwrap().as_str(), "xyz");
    assert_eq!(resolve_id(&h.session.inventory, "abc-2").unwrap().as_str(), "abc-2");
    let err = resolve_id(&h.session.inventory, "abc").unwrap_err();
    assert!(err.to_string().contains("more than one report"));

    assert!(h.exec(&["show", "xy"]).unwrap().contains("Boat: Tarpon"));
}

#[test]
fn edit_uses_one_based_positions() {
    let mut h = Harness::new();
    let id = h.create("Marlin");
    h.exec(&["add", &id, "Bow", "Flare", "3"]).unwrap();
    h.exec(&["add", &id, "Bow", "Rope", "2"]).unwrap();

    let out = h.exec(&["edit", &id, "Bow", "2", "Anchor rope", "7.9"]).unwrap();
    assert_eq!(out, "Replaced Rope (2) in Bow\n");

    let report = &h.session.inventory.reports()[0];
    let bow = report.sections.get("Bow").unwrap();
    assert_eq!(bow[0].name, "Flare");
    assert_eq!(bow[1].name, "Anchor rope");
    assert_eq!(bow[1].quantity, 7);

    let err = h.exec(&["edit", &id, "Bow", "0", "Flare", "1"]).unwrap_err();
    assert_eq!(err.to_string(), "positions start at 1");
    let err = h.exec(&["edit", &id, "Bow", "5", "Flare", "1"]).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn removing_last_item_drops_section() {
    let mut h = Harness::new();
    let id = h.create("Marlin");
    h.exec(&["add", &id, "Bow", "Flare", "3"]).unwrap();

    let out = h.exec(&["remove", &id, "Bow", "1"]).unwrap();
    assert_eq!(out, "Removed Flare from Bow\n");
    assert!(h.exec(&["show", &id]).unwrap().contains("No items yet."));

    let err = h.exec(&["remove", &id, "Bow", "1"]).unwrap_err();
    assert_eq!(err.to_string(), "section 'Bow' not found");
}

#[test]
fn delete_report_keeps_suggestions() {
    let mut h = Harness::new();
    let id = h.create("Marlin");
    h.exec(&["add", &id, "Bow", "Flare", "3"]).unwrap();

    assert_eq!(h.exec(&["delete", &id]).unwrap(), "Deleted report for Marlin\n");
    assert!(h.session.inventory.reports().is_empty());
    assert!(h.exec(&["catalog", "items"]).unwrap().contains("Flare"));
}

#[test]
fn catalog_filters_by_prefix_and_forget_removes() {
    let mut h = Harness::new();
    let id = h.create("Marlin");
    h.exec(&["add", &id, "Bow", "Flare", "3"]).unwrap();
    h.exec(&["add", &id, "Bow", "Fire extinguisher", "1"]).unwrap();
    h.exec(&["add", &id, "Bow", "Rope", "1"]).unwrap();

    let listing = h.exec(&["catalog", "items", "--prefix", "f"]).unwrap();
    assert!(listing.contains("Flare"));
    assert!(listing.contains("Fire extinguisher"));
    assert!(!listing.contains("Rope"));

    h.exec(&["forget", "items", "Flare"]).unwrap();
    assert!(!h.exec(&["catalog", "items"]).unwrap().contains("Flare"));
    assert_eq!(
        h.session.inventory.reports()[0].sections.get("Bow").unwrap()[0].name,
        "Flare"
    );

    let err = h.exec(&["forget", "items", "Flare"]).unwrap_err();
    assert!(err.to_string().contains("not a remembered item suggestion"));
    assert!(h.exec(&["catalog", "sections", "--prefix", "z"]).unwrap().contains("No section suggestions."));
}

#[test]
fn export_writes_document() {
    let mut h = Harness::new();
    let id = h.create("Marlin <II>");
    h.exec(&["add", &id, "Bow", "Flare", "3"]).unwrap();
    let out_dir = h.dir.path().join("out");

    let out = h
        .exec(&["export", &id, "--output-dir", out_dir.to_str().unwrap()])
        .unwrap();
    assert!(out.starts_with("Exported "));

    let files: Vec<_> = fs::read_dir(&out_dir).unwrap().collect();
    assert_eq!(files.len(), 1);
    let path = files[0].as_ref().unwrap().path();
    assert!(path.file_name().unwrap().to_str().unwrap().starts_with("inventory-marlin-ii-"));
    let html = fs::read_to_string(path).unwrap();
    assert!(html.contains("Boat: Marlin &lt;II&gt;"));
    assert!(html.contains("<span class=\"qty\">3 un.</span>"));
}

#[test]
fn export_defaults_to_data_dir() {
    let mut h = Harness::new();
    let id = h.create("Marlin");
    h.exec(&["export", &id, "--raw-markup"]).unwrap();

    let exports = h.dir.path().join("data").join("exports");
    assert_eq!(fs::read_dir(exports).unwrap().count(), 1);
}

#[test]
fn config_init_writes_settings() {
    let mut h = Harness::new();
    h.session.settings.export.title = "Safety check".to_string();

    let shown = h.exec(&["config"]).unwrap();
    assert!(shown.contains("title = \"Safety check\""));

    h.exec(&["config", "--init"]).unwrap();
    let loaded = Settings::load_from(&h.session.config_path);
    assert_eq!(loaded, h.session.settings);
}

#[test]
fn failed_saves_are_visible_to_the_caller() {
    let mut h = Harness::new();
    h.session.inventory.store_mut().set_fail_writes(true);

    h.create("Marlin");

    assert!(h.session.inventory.has_unsaved_changes());
    h.session.inventory.store_mut().set_fail_writes(false);
    h.session.inventory.flush().unwrap();
    assert!(!h.session.inventory.has_unsaved_changes());
}
