//! The check operation.
//!
//! Locates a configuration file, decodes it strictly, walks it for deprecated
//! options and renders the result together with remediation instructions.

use crate::config;
use crate::error::CheckError;
use crate::instructions::Instructions;
use crate::metrics::CheckMetrics;
use crate::walker::{collect_deprecations, DeprecationReport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// File names tried, in order, when no configuration path is given.
pub const DEFAULT_CONFIG_NAMES: [&str; 6] = [
    ".config/goreleaser.yml",
    ".config/goreleaser.yaml",
    ".goreleaser.yml",
    ".goreleaser.yaml",
    "goreleaser.yml",
    "goreleaser.yaml",
];

pub const VALID_MESSAGE: &str = "Configuration is valid!";
pub const DEPRECATED_MESSAGE: &str = "Configuration is valid, but uses deprecated options";

/// Arguments of a check invocation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckArgs {
    /// Path to the configuration file; the default names are tried when absent
    #[serde(default)]
    pub configuration: Option<PathBuf>,
}

/// A deprecated option found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeprecationEntry {
    pub path: String,
    pub instructions: String,
}

/// Result of a successful check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutput {
    pub message: String,
    pub filepath: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deprecations: Vec<DeprecationEntry>,
    /// Markdown rendering of the deprecations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl CheckOutput {
    /// Whether the configuration uses deprecated options.
    pub fn is_deprecated(&self) -> bool {
        !self.deprecations.is_empty()
    }
}

/// Read the named configuration file, or the first default one that exists.
///
/// Relative paths are resolved against `base`. The returned path is the one
/// the file was found under, relative names kept as given.
pub fn open_config(base: &Path, name: Option<&Path>) -> Result<(PathBuf, Vec<u8>), CheckError> {
    if let Some(name) = name {
        let bytes = std::fs::read(base.join(name)).map_err(|source| CheckError::Read {
            path: name.to_path_buf(),
            source,
        })?;
        return Ok((name.to_path_buf(), bytes));
    }

    for candidate in DEFAULT_CONFIG_NAMES {
        match std::fs::read(base.join(candidate)) {
            Ok(bytes) => return Ok((PathBuf::from(candidate), bytes)),
            Err(e) => debug!(candidate, error = %e, "Configuration candidate not usable"),
        }
    }

    Err(CheckError::NotFound)
}

/// Runs checks against an injected instructions table.
pub struct Checker {
    instructions: Instructions,
    base_dir: PathBuf,
    metrics: Option<Arc<CheckMetrics>>,
}

impl Checker {
    /// Create a checker resolving files against the current directory.
    pub fn new(instructions: Instructions) -> Self {
        Self {
            instructions,
            base_dir: PathBuf::from("."),
            metrics: None,
        }
    }

    /// Resolve configuration files against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Record check outcomes in `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<CheckMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Check a configuration file for deprecated options.
    pub fn check(&self, args: &CheckArgs) -> Result<CheckOutput, CheckError> {
        let result = self.run(args);

        if let Some(metrics) = &self.metrics {
            match &result {
                Ok(output) if output.is_deprecated() => metrics.record_check("deprecated"),
                Ok(_) => metrics.record_check("valid"),
                Err(e) => metrics.record_check(e.label()),
            }
        }

        result
    }

    fn run(&self, args: &CheckArgs) -> Result<CheckOutput, CheckError> {
        let (path, bytes) = open_config(&self.base_dir, args.configuration.as_deref())?;
        info!(path = %path.display(), "Using configuration file");

        let project = config::decode(&bytes).map_err(|source| CheckError::Invalid {
            path: path.clone(),
            source,
        })?;
        let report = collect_deprecations(&project)?;

        if let Some(metrics) = &self.metrics {
            for deprecated in report.paths() {
                metrics.record_deprecated(deprecated);
            }
            for unsupported in report.unsupported() {
                metrics.record_unsupported(unsupported);
            }
        }

        Ok(self.render(&path, &report))
    }

    /// Turn a report into the check output for `path`.
    pub fn render(&self, path: &Path, report: &DeprecationReport) -> CheckOutput {
        let filepath = path.display().to_string();

        if report.is_empty() {
            return CheckOutput {
                message: VALID_MESSAGE.to_string(),
                filepath,
                deprecations: Vec::new(),
                instructions: None,
            };
        }

        let deprecations: Vec<DeprecationEntry> = report
            .paths()
            .map(|p| DeprecationEntry {
                path: p.to_string(),
                instructions: self.instructions.lookup(p).to_string(),
            })
            .collect();

        info!(
            path = %filepath,
            deprecations = deprecations.len(),
            "Configuration uses deprecated options"
        );

        CheckOutput {
            message: DEPRECATED_MESSAGE.to_string(),
            filepath,
            instructions: Some(render_instructions(&deprecations)),
            deprecations,
        }
    }
}

/// Render deprecations as a Markdown document.
pub fn render_instructions(deprecations: &[DeprecationEntry]) -> String {
    let mut out = String::from("# Deprecated Options\n\n");
    out.push_str("Here's the instructions to fix each of deprecation:\n\n");
    for entry in deprecations {
        out.push_str(&format!(
            "## {}\n\nInstructions: {}\n\n",
            entry.path, entry.instructions
        ));
    }
    out
}
