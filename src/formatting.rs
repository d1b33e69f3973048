use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;

use logocheck_lib::{BatchOutcome, ErrorOutput, LogoCheckError, LogoCheckOutput};

use crate::cli::OutputFormat;

/// Write a successful run's document in the requested format.
pub fn write_output(
    body: &LogoCheckOutput,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string(body)?,
        OutputFormat::Pretty if human_readable(output) => format_pretty(body, true),
        OutputFormat::Pretty => serde_json::to_string_pretty(body)?,
    };
    emit(&content, output)?;
    Ok(())
}

/// Report a run-level failure (bad config, unreadable input list) and map it
/// to exit code 2. Per-image failures never come through here.
pub fn render_error(err: LogoCheckError, format: OutputFormat, output: Option<&Path>) -> ExitCode {
    let message = err.to_string();
    let body = LogoCheckOutput::Error(ErrorOutput::new(err.to_payload()));

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(&body),
        OutputFormat::Pretty if human_readable(output) => Ok(format_pretty(&body, true)),
        OutputFormat::Pretty => serde_json::to_string_pretty(&body),
    };
    match rendered {
        Ok(content) => {
            if let Err(write_err) = emit(&content, output) {
                eprintln!("logocheck: could not write error report: {write_err}");
                eprintln!("{content}");
            }
        }
        Err(encode_err) => {
            eprintln!("logocheck: {message} (error report not encodable: {encode_err})");
        }
    }

    ExitCode::from(2)
}

/// Human output only goes to an interactive stdout; files and pipes get JSON.
fn human_readable(output: Option<&Path>) -> bool {
    output.is_none() && io::stdout().is_terminal()
}

fn emit(content: &str, output: Option<&Path>) -> io::Result<()> {
    match output {
        Some(path) => std::fs::write(path, content),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

pub fn format_pretty(body: &LogoCheckOutput, colorize: bool) -> String {
    match body {
        LogoCheckOutput::Analyze(out) => {
            let mut buf = String::new();
            writeln!(
                buf,
                "Logo check: {} image(s), target language {}",
                out.results.len(),
                out.target_language
            )
            .ok();

            for entry in &out.results {
                match &entry.outcome {
                    BatchOutcome::Analyzed { report } => {
                        let score = format!("{:.1}/10", report.overall_score);
                        let level_code = if report.contrast_level.passes() {
                            "32"
                        } else {
                            "31"
                        };
                        writeln!(
                            buf,
                            "- {}  score {}",
                            entry.file_name,
                            color(&score, score_color_code(report.overall_score), colorize)
                        )
                        .ok();
                        writeln!(
                            buf,
                            "    color {} ({})",
                            report.average_color,
                            report.color_name.as_deref().unwrap_or("unknown")
                        )
                        .ok();
                        writeln!(
                            buf,
                            "    contrast {:.2}:1 {}",
                            report.contrast_ratio,
                            color(report.contrast_level.label(), level_code, colorize)
                        )
                        .ok();
                        let font = report
                            .font_size
                            .map(|s| format!("{s:.1}px"))
                            .unwrap_or_else(|| "n/a".to_string());
                        writeln!(buf, "    font size {font}").ok();
                        let text = report.detected_text.trim();
                        if !text.is_empty() {
                            writeln!(buf, "    text {:?}", text).ok();
                        }
                        writeln!(buf, "    translated {:?}", report.translated_text.trim()).ok();
                    }
                    BatchOutcome::Failed { error } => {
                        writeln!(
                            buf,
                            "- {}  {} {}",
                            entry.file_name,
                            color("ERROR", "31", colorize),
                            error.message
                        )
                        .ok();
                    }
                }
            }
            buf.trim_end().to_string()
        }
        LogoCheckOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("Error:", "31", colorize);
            writeln!(buf, "{} {}", header, out.error.message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf.trim_end().to_string()
        }
    }
}

fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

fn score_color_code(score: f64) -> &'static str {
    if score >= 7.0 {
        "32" // green
    } else if score >= 4.5 {
        "33" // yellow
    } else {
        "31" // red
    }
}
