//! Tests for the export flow.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use inv_export::{
    DocumentSharer, ExportError, ExportOptions, HtmlFileRenderer, NoShare,
    export_report, file_stem, render_report_html,
};
use inv_model::{Item, Report, ReportId};

fn sample_report() -> Report {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
    let mut report = Report::with_id(ReportId::new("r-1"), "La Poderosa II", created_at);
    report.sections.push_item("Bow", Item::new("Flare", 3));
    report.sections.push_item("Bow", Item::new("Rope", 2));
    report.sections.push_item("Cabin", Item::new("Life vest", 6));
    report
}

fn utc_options() -> ExportOptions {
    ExportOptions {
        utc_offset_minutes: Some(0),
        ..ExportOptions::default()
    }
}

#[derive(Default)]
struct RecordingSharer {
    shared: RefCell<Vec<PathBuf>>,
}

impl DocumentSharer for RecordingSharer {
    fn share(&self, path: &Path) -> inv_export::Result<()> {
        self.shared.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

struct FailingSharer;

impl DocumentSharer for FailingSharer {
    fn share(&self, path: &Path) -> inv_export::Result<()> {
        Err(ExportError::Share {
            path: path.to_path_buf(),
            source: std::io::Error::other("no viewer"),
        })
    }
}

#[test]
fn document_lists_sections_in_order() {
    let html = render_report_html(&sample_report(), &utc_options());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h2>Boat: La Poderosa II</h2>"));
    assert!(html.contains("<p>Date: 01/05/2024 - 10:30:00</p>"));

    let bow = html.find(">Bow</div>").unwrap();
    let flare = html.find("<span>Flare</span>").unwrap();
    let rope = html.find("<span>Rope</span>").unwrap();
    let cabin = html.find(">Cabin</div>").unwrap();
    let vest = html.find("<span>Life vest</span>").unwrap();
    assert!(bow < flare && flare < rope && rope < cabin && cabin < vest);
    assert!(html.contains("<span class=\"qty\">6 un.</span>"));
}

#[test]
fn empty_report_has_header_only() {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
    let report = Report::with_id(ReportId::new("r-2"), "Marlin", created_at);
    let html = render_report_html(&report, &utc_options());

    assert!(html.contains("<h1>Inventory Report</h1>"));
    assert!(!html.contains("section-title\">"));
}

#[test]
fn user_text_is_escaped_by_default() {
    let mut report = sample_report();
    report.boat_name = "<script>alert(1)</script>".to_string();
    let html = render_report_html(&report, &utc_options());

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));

    let raw = ExportOptions {
        escape_markup: false,
        ..utc_options()
    };
    assert!(render_report_html(&report, &raw).contains("<h2>Boat: <script>"));
}

#[test]
fn file_stem_uses_boat_and_timestamp() {
    assert_eq!(
        file_stem(&sample_report()),
        "inventory-la-poderosa-ii-20240501-103000"
    );

    let mut report = sample_report();
    report.boat_name = "  ??  ".to_string();
    assert_eq!(file_stem(&report), "inventory-report-20240501-103000");
}

#[test]
fn export_writes_file_and_shares_it() {
    let dir = tempdir().unwrap();
    let renderer = HtmlFileRenderer::new(dir.path());
    let sharer = RecordingSharer::default();

    let path = export_report(&sample_report(), &utc_options(), &renderer, &sharer).unwrap();

    assert_eq!(
        path,
        dir.path().join("inventory-la-poderosa-ii-20240501-103000.html")
    );
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("<span>Life vest</span>"));
    assert_eq!(sharer.shared.borrow().as_slice(), &[path]);
}

#[test]
fn export_without_sharing() {
    let dir = tempdir().unwrap();
    let renderer = HtmlFileRenderer::new(dir.path().join("nested"));

    let path = export_report(&sample_report(), &utc_options(), &renderer, &NoShare).unwrap();
    assert!(path.exists());
}

#[test]
fn share_failure_is_reported_after_render() {
    let dir = tempdir().unwrap();
    let renderer = HtmlFileRenderer::new(dir.path());

    let err = export_report(&sample_report(), &utc_options(), &renderer, &FailingSharer)
        .unwrap_err();

    assert!(matches!(err, ExportError::Share { .. }));
    assert!(err.user_message().contains("could not be shared"));
    assert!(
        dir.path()
            .join("inventory-la-poderosa-ii-20240501-103000.html")
            .exists()
    );
}
