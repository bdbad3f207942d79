//! HTML rendering of a report.

use std::borrow::Cow;
use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Local, Utc};

use inv_model::{Item, Report};

/// Default date pattern (day/month/year).
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Default time pattern.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

const STYLE: &str = "\
body { font-family: Helvetica, sans-serif; padding: 20px; }
h1 { color: #007AFF; }
.header { margin-bottom: 20px; border-bottom: 2px solid #ccc; padding-bottom: 10px; }
.section-title { background-color: #f0f0f0; padding: 8px; font-weight: bold; margin-top: 15px; border-left: 5px solid #007AFF; }
.item-row { display: flex; justify-content: space-between; border-bottom: 1px solid #eee; padding: 8px 0; }
.qty { font-weight: bold; color: #333; }
";

/// Options for the exported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Heading shown above the boat name.
    pub title: String,
    /// chrono strftime pattern for the creation date.
    pub date_format: String,
    /// chrono strftime pattern for the creation time.
    pub time_format: String,
    /// Offset applied to the creation timestamp; `None` uses the local zone.
    /// Defaults to UTC.
    pub utc_offset_minutes: Option<i32>,
    /// Escape `& < > " '` in user-entered text. When disabled, names are
    /// inserted verbatim and may inject markup.
    pub escape_markup: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: "Inventory Report".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            utc_offset_minutes: Some(0),
            escape_markup: true,
        }
    }
}

/// Render `report` as a self-contained HTML document.
///
/// Sections appear in the report's order and items in stored order.
pub fn render_report_html(report: &Report, options: &ExportOptions) -> String {
    let text = |value: &str| -> String { escape_if(value, options.escape_markup).into_owned() };
    let (date, time) = creation_date_time(report.created_at, options);

    let mut out = String::with_capacity(2048);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(
        out,
        "<title>{} - {}</title>",
        text(&options.title),
        text(&report.boat_name)
    );
    out.push_str("<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str("<div class=\"header\">\n");
    let _ = writeln!(out, "<h1>{}</h1>", text(&options.title));
    let _ = writeln!(out, "<h2>Boat: {}</h2>", text(&report.boat_name));
    let _ = writeln!(out, "<p>Date: {date} - {time}</p>");
    out.push_str("</div>\n");

    for section in &report.sections {
        out.push_str(&render_section(&section.label, &section.items, options.escape_markup));
    }

    out.push_str("</body>\n</html>\n");
    out
}

/// One section block: a title row followed by one row per item.
pub(crate) fn render_section(label: &str, items: &[Item], escape: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<div class=\"section-title\">{}</div>",
        escape_if(label, escape)
    );
    for item in items {
        let _ = writeln!(
            out,
            "<div class=\"item-row\"><span>{}</span><span class=\"qty\">{} un.</span></div>",
            escape_if(&item.name, escape),
            item.quantity
        );
    }
    out
}

/// Formatted creation date and time of a report.
pub fn creation_date_time(created_at: DateTime<Utc>, options: &ExportOptions) -> (String, String) {
    let offset = options
        .utc_offset_minutes
        .and_then(|minutes| minutes.checked_mul(60))
        .and_then(FixedOffset::east_opt);
    match offset {
        Some(offset) => {
            let at = created_at.with_timezone(&offset);
            (
                format_or_default(&at, &options.date_format, DEFAULT_DATE_FORMAT),
                format_or_default(&at, &options.time_format, DEFAULT_TIME_FORMAT),
            )
        }
        None => {
            let at = created_at.with_timezone(&Local);
            (
                format_or_default(&at, &options.date_format, DEFAULT_DATE_FORMAT),
                format_or_default(&at, &options.time_format, DEFAULT_TIME_FORMAT),
            )
        }
    }
}

/// Format with `pattern`, falling back to `fallback` when the pattern is
/// not a valid strftime string.
fn format_or_default<Tz>(at: &DateTime<Tz>, pattern: &str, fallback: &str) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    if write!(out, "{}", at.format(pattern)).is_ok() {
        return out;
    }
    tracing::warn!(pattern, "invalid date/time pattern, using default");
    at.format(fallback).to_string()
}

fn escape_if(value: &str, escape: bool) -> Cow<'_, str> {
    if escape {
        escape_markup(value)
    } else {
        Cow::Borrowed(value)
    }
}

/// Escape the characters that carry meaning in HTML text and attributes.
pub fn escape_markup(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 16);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
