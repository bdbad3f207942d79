//! Report export.
//!
//! This crate turns an inspection report into a printable document and
//! hands it to render/share collaborators:
//!
//! - **HTML document** with inline styles, sections in report order
//! - **Renderers** that store the document as a file
//! - **Sharers** that pass the file on (system viewer, or nothing)

mod error;
mod html;
mod share;

use std::path::PathBuf;

use inv_model::Report;
use tracing::{error, info, info_span};

pub use error::{ExportError, Result};
pub use html::{
    DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT, ExportOptions, creation_date_time, escape_markup,
    render_report_html,
};
pub use share::{DocumentRenderer, DocumentSharer, HtmlFileRenderer, NoShare, SystemOpener};

/// Render `report`, store it through `renderer` and pass it to `sharer`.
///
/// Failures are logged before being returned; callers show
/// [`ExportError::user_message`] to the user.
pub fn export_report<R, S>(
    report: &Report,
    options: &ExportOptions,
    renderer: &R,
    sharer: &S,
) -> Result<PathBuf>
where
    R: DocumentRenderer + ?Sized,
    S: DocumentSharer + ?Sized,
{
    let span = info_span!("export", report_id = %report.id);
    let _guard = span.enter();

    let document = render_report_html(report, options);
    let stem = file_stem(report);
    let path = renderer.render(&document, &stem).inspect_err(|err| {
        error!(error = %err, "failed to render report document");
    })?;
    info!(
        path = %path.display(),
        sections = report.sections.len(),
        items = report.item_count(),
        "report document written"
    );

    sharer.share(&path).inspect_err(|err| {
        error!(error = %err, path = %path.display(), "failed to share report document");
    })?;
    Ok(path)
}

/// File name (without extension) for an exported report:
/// `inventory-<boat>-<YYYYMMDD-HHMMSS>`.
pub fn file_stem(report: &Report) -> String {
    let mut slug = String::with_capacity(report.boat_name.len());
    for ch in report.boat_name.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug = if slug.is_empty() { "report" } else { slug };
    format!(
        "inventory-{}-{}",
        slug,
        report.created_at.format("%Y%m%d-%H%M%S")
    )
}
