use clap::Parser;
use std::path::PathBuf;

use crate::config::{Overrides, API_URL_ENV};

/// Chat with any public GitHub repository from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "repochat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL, e.g. http://localhost:8000
    #[arg(long, env = API_URL_ENV)]
    pub api_url: Option<String>,

    /// Seconds to wait after the repository is accepted before opening the chat
    #[arg(long)]
    pub delay_secs: Option<u64>,

    /// Start chat views in light mode
    #[arg(long)]
    pub light: bool,

    /// Pre-fill the repository URL field
    #[arg(long)]
    pub repo: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Settings given on the command line. The environment value for the API
    /// URL is already folded in by clap.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_url: self.api_url.clone(),
            navigation_delay_secs: self.delay_secs,
            light: self.light,
            log_file: self.log_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "repochat",
            "--api-url",
            "http://example.com",
            "--delay-secs",
            "2",
            "--light",
            "--repo",
            "https://github.com/a/b",
            "--log-file",
            "/tmp/repochat.log",
        ])
        .unwrap();

        assert_eq!(cli.repo.as_deref(), Some("https://github.com/a/b"));
        let overrides = cli.overrides();
        assert_eq!(overrides.api_url.as_deref(), Some("http://example.com"));
        assert_eq!(overrides.navigation_delay_secs, Some(2));
        assert!(overrides.light);
        assert_eq!(overrides.log_file, Some(PathBuf::from("/tmp/repochat.log")));
    }

    #[test]
    fn rejects_non_numeric_delay() {
        assert!(Cli::try_parse_from(["repochat", "--delay-secs", "soon"]).is_err());
    }
}
