use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "logocheck",
    version,
    about = "Score logos for contrast, legibility and text content"
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log pipeline progress to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze one or more logo images
    Analyze {
        /// Image files, analyzed in the order given
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Target language code for translating detected text
        #[arg(long = "lang")]
        target_language: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        backends: BackendFlags,
    },
    /// Serve the upload form and JSON API over HTTP
    Serve {
        /// Address to listen on (overrides [server].bind)
        #[arg(long)]
        bind: Option<SocketAddr>,

        #[command(flatten)]
        backends: BackendFlags,
    },
}

#[derive(Debug, Clone, Copy, clap::Args)]
pub struct BackendFlags {
    /// Skip OCR; every image reads as textless
    #[arg(long)]
    pub no_ocr: bool,

    /// Skip translation; reports carry the translation-failed placeholder
    #[arg(long)]
    pub no_translate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_with_flags() {
        let cli = Cli::try_parse_from([
            "logocheck",
            "--verbose",
            "analyze",
            "a.png",
            "b.png",
            "--lang",
            "fr",
            "--format",
            "json",
            "--no-translate",
        ])
        .expect("parse args");

        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze {
                images,
                target_language,
                format,
                backends,
                ..
            } => {
                assert_eq!(images, vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
                assert_eq!(target_language.as_deref(), Some("fr"));
                assert_eq!(format, OutputFormat::Json);
                assert!(backends.no_translate);
                assert!(!backends.no_ocr);
            }
            other => panic!("expected analyze, got {other:?}"),
        }
    }

    #[test]
    fn analyze_requires_an_image() {
        assert!(Cli::try_parse_from(["logocheck", "analyze"]).is_err());
    }

    #[test]
    fn serve_accepts_bind_address() {
        let cli = Cli::try_parse_from(["logocheck", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        match cli.command {
            Commands::Serve { bind, .. } => {
                assert_eq!(bind, Some("0.0.0.0:9000".parse().unwrap()));
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }
}
