use std::fmt::Write;

use super::LANGUAGES;
use crate::types::{AnalysisReport, BatchEntry, BatchOutcome};

const STYLE: &str = "body{font-family:sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem}\
table{border-collapse:collapse;margin-bottom:1.5rem}\
td,th{border:1px solid #ccc;padding:.3rem .6rem;text-align:left;vertical-align:top}\
.swatch{display:inline-block;width:1rem;height:1rem;border:1px solid #333;vertical-align:middle}\
.fail{color:#b00020}.pass{color:#1b5e20}";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

fn form_markup(selected: &str) -> String {
    let mut buf = String::new();
    writeln!(
        buf,
        "<form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">"
    )
    .ok();
    writeln!(
        buf,
        "<p><label>Select multiple images <input type=\"file\" name=\"images\" accept=\"image/*\" multiple required></label><br><small>Images only (e.g., JPEG, PNG)</small></p>"
    )
    .ok();
    writeln!(buf, "<p><label>Target language <select name=\"target_language\">").ok();
    for (code, label) in LANGUAGES {
        let sel = if *code == selected { " selected" } else { "" };
        writeln!(buf, "<option value=\"{code}\"{sel}>{label}</option>").ok();
    }
    writeln!(buf, "</select></label></p>").ok();
    writeln!(buf, "<p><button type=\"submit\">Analyze</button></p>\n</form>").ok();
    buf
}

pub(super) fn render_form(default_language: &str) -> String {
    let body = format!("<h1>Logo check</h1>\n{}", form_markup(default_language));
    page("Logo check", &body)
}

fn report_rows(buf: &mut String, report: &AnalysisReport) {
    let level_class = if report.contrast_level.passes() {
        "pass"
    } else {
        "fail"
    };
    let font_size = report
        .font_size
        .map(|s| format!("{s:.1}px"))
        .unwrap_or_else(|| "n/a".to_string());
    let rows = [
        (
            "Average color",
            format!(
                "<span class=\"swatch\" style=\"background:{0}\"></span> {0}",
                escape(&report.average_color)
            ),
        ),
        (
            "Color name",
            escape(report.color_name.as_deref().unwrap_or("unknown")),
        ),
        ("Contrast ratio", format!("{:.2}", report.contrast_ratio)),
        (
            "Contrast level",
            format!(
                "<span class=\"{level_class}\">{}</span>",
                escape(report.contrast_level.label())
            ),
        ),
        (
            "Detected text",
            format!("<pre>{}</pre>", escape(&report.detected_text)),
        ),
        (
            "Translated text",
            format!("<pre>{}</pre>", escape(&report.translated_text)),
        ),
        ("Font size", font_size),
        ("Color ratio", format!("{:.2}", report.color_ratio)),
        ("Overall score", format!("{:.1} / 10", report.overall_score)),
    ];
    for (label, value) in rows {
        writeln!(buf, "<tr><th>{label}</th><td>{value}</td></tr>").ok();
    }
}

pub(super) fn render_results(target_language: &str, results: &[BatchEntry]) -> String {
    let mut body = String::new();
    writeln!(body, "<h1>Logo check results</h1>").ok();
    writeln!(
        body,
        "<p>Target language: <code>{}</code></p>",
        escape(target_language)
    )
    .ok();

    for entry in results {
        writeln!(body, "<h2>{}</h2>", escape(&entry.file_name)).ok();
        writeln!(body, "<table>").ok();
        match &entry.outcome {
            BatchOutcome::Analyzed { report } => report_rows(&mut body, report),
            BatchOutcome::Failed { error } => {
                writeln!(
                    body,
                    "<tr><th>Error</th><td class=\"fail\">{}</td></tr>",
                    escape(&error.message)
                )
                .ok();
            }
        }
        writeln!(body, "</table>").ok();
    }

    writeln!(body, "<h2>Analyze more</h2>\n{}", form_markup(target_language)).ok();
    page("Logo check results", &body)
}
