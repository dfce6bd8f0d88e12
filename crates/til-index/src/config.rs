//! Configuration for the til-index command
//!
//! This module provides the command-line/environment configuration: where the
//! repository comes from, where it is cloned, which README gets rewritten, and
//! how entry URLs are built.

use std::path::PathBuf;

use clap::Parser;

use crate::scan::UrlTemplate;

/// Repository cloned when none is given
pub const DEFAULT_REMOTE: &str = "https://github.com/santiagoballadares/til.git";

/// Clone directory used when none is given
pub const DEFAULT_CLONE_DIR: &str = "tmp";

/// README rewritten when none is given
pub const DEFAULT_README: &str = "README.md";

/// Branch name used in entry URLs when none is given
pub const DEFAULT_BRANCH: &str = "master";

/// til-index - regenerate a TIL README from git history
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "til-index")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Remote repository URL to clone
    #[arg(short, long, env = "TIL_INDEX_REMOTE", default_value = DEFAULT_REMOTE)]
    pub remote: Option<String>,

    /// Open the clone directory as an existing repository without cloning
    #[arg(long, default_value = "false")]
    pub offline: bool,

    /// Local clone target, also the root scanned for markdown entries
    ///
    /// Reused on later runs. Defaults to ./tmp.
    #[arg(short, long, env = "TIL_INDEX_CLONE_DIR")]
    pub clone_dir: Option<PathBuf>,

    /// README file whose marker regions are rewritten
    ///
    /// Defaults to ./README.md.
    #[arg(long, env = "TIL_INDEX_README")]
    pub readme: Option<PathBuf>,

    /// Web address entry links are built from
    ///
    /// Defaults to the remote URL without a trailing `.git`.
    #[arg(long, env = "TIL_INDEX_BASE_URL")]
    pub base_url: Option<String>,

    /// Branch name used in entry links
    #[arg(short, long, env = "TIL_INDEX_BRANCH")]
    pub branch: Option<String>,

    /// Print the regenerated README to stdout instead of writing it
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Print run statistics as JSON to stdout
    #[arg(long, default_value = "false")]
    pub stats_json: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with --dry-run output.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the clone directory, using `./tmp` if not specified
    #[must_use]
    pub fn clone_dir_path(&self) -> PathBuf {
        self.clone_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CLONE_DIR))
    }

    /// Get the README path, using `./README.md` if not specified
    #[must_use]
    pub fn readme_path(&self) -> PathBuf {
        self.readme
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_README))
    }

    /// Get the branch used in entry links
    #[must_use]
    pub fn branch_name(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }

    /// Remote to clone from, or `None` in offline mode
    #[must_use]
    pub fn remote_url(&self) -> Option<&str> {
        if self.offline {
            None
        } else {
            self.remote.as_deref()
        }
    }

    /// Build the entry URL template
    ///
    /// The base address is `--base-url` if given, else the remote's web
    /// address, else the default repository's.
    #[must_use]
    pub fn url_template(&self) -> UrlTemplate {
        let base = match (&self.base_url, &self.remote) {
            (Some(base), _) => base.trim_end_matches('/').to_string(),
            (None, Some(remote)) => web_address(remote),
            (None, None) => web_address(DEFAULT_REMOTE),
        };
        UrlTemplate::new(base, self.branch_name())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The README does not exist
    /// - The clone directory exists but is not a directory
    /// - `--dry-run` and `--stats-json` would both write to stdout
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dry_run && self.stats_json {
            return Err(ConfigError::ConflictingOutput);
        }

        let readme = self.readme_path();
        if !readme.is_file() {
            return Err(ConfigError::ReadmeNotFound(readme));
        }

        let clone_dir = self.clone_dir_path();
        if clone_dir.exists() && !clone_dir.is_dir() {
            return Err(ConfigError::CloneDirNotDirectory(clone_dir));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Strip the trailing slash and `.git` suffix from a clone URL
fn web_address(remote: &str) -> String {
    let trimmed = remote.trim_end_matches('/');
    trimmed.strip_suffix(".git").unwrap_or(trimmed).to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// README path not found
    #[error("README not found: {0}")]
    ReadmeNotFound(PathBuf),

    /// Clone directory path is not a directory
    #[error("Clone directory is not a directory: {0}")]
    CloneDirNotDirectory(PathBuf),

    /// Two outputs requested on stdout
    #[error("--dry-run and --stats-json both print to stdout; pick one")]
    ConflictingOutput,
}
