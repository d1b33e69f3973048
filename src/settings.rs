use std::path::Path;

use logocheck_lib::{Config, LogoCheckError};

use crate::cli::BackendFlags;

pub fn load_config(path: Option<&Path>) -> Result<Config, LogoCheckError> {
    let cfg = if let Some(p) = path {
        Config::from_toml_file(p).map_err(|e| {
            LogoCheckError::Config(format!("Failed to read config {}: {}", p.display(), e))
        })?
    } else {
        Config::default()
    };

    cfg.validate()
        .map_err(|e| LogoCheckError::Config(format!("Invalid config: {}", e)))?;
    Ok(cfg)
}

/// Flags only ever switch a backend off; they never re-enable one the config disabled.
pub fn apply_backend_flags(mut config: Config, flags: BackendFlags) -> Config {
    if flags.no_ocr {
        config.ocr.enabled = false;
    }
    if flags.no_translate {
        config.translation.enabled = false;
    }
    config
}
