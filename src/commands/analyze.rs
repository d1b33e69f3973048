use std::path::PathBuf;
use std::process::ExitCode;

use logocheck_lib::{AnalyzeOutput, LogoAnalyzer, LogoCheckError, LogoCheckOutput};
use tracing::{debug, info};

use crate::cli::{BackendFlags, OutputFormat};
use crate::formatting::{render_error, write_output};
use crate::settings::{apply_backend_flags, load_config};

/// Run the analyze command.
pub async fn run_analyze(
    config_path: Option<PathBuf>,
    images: Vec<PathBuf>,
    target_language: Option<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
    backends: BackendFlags,
) -> ExitCode {
    let output = output.as_deref();
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => apply_backend_flags(cfg, backends),
        Err(err) => return render_error(err, format, output),
    };
    let target_language =
        target_language.unwrap_or_else(|| config.server.default_target_language.clone());
    debug!(
        ocr = config.ocr.enabled,
        translation = config.translation.enabled,
        target = %target_language,
        "effective config"
    );

    let files: Vec<(String, PathBuf)> = images
        .into_iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            (name, path)
        })
        .collect();

    info!(count = files.len(), "analyzing images");
    let analyzer = LogoAnalyzer::from_config(&config);
    let target = target_language.clone();
    let results =
        match tokio::task::spawn_blocking(move || analyzer.analyze_batch(&files, &target)).await {
            Ok(results) => results,
            Err(err) => {
                return render_error(
                    LogoCheckError::Unknown(format!("analysis task failed: {err}")),
                    format,
                    output,
                )
            }
        };

    let body = AnalyzeOutput::new(target_language, results);
    let failed = body.failed_count();
    let body = LogoCheckOutput::Analyze(body);
    if let Err(err) = write_output(&body, format, output) {
        let err = LogoCheckError::Io(std::io::Error::other(err.to_string()));
        return render_error(err, format, None);
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
