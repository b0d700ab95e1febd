//! GoReleaser Deprecation Check
//!
//! Inspects a GoReleaser configuration against its schema and reports the
//! deprecated options the user has actually set, together with instructions
//! for migrating away from them.
//!
//! # Features
//!
//! - **Strict Decoding**: unknown keys fail the check instead of being ignored
//! - **Schema Walker**: finds populated deprecated fields at any depth
//! - **Collapsed Paths**: repeated list entries report a field once (`kos.repository`)
//! - **Instructions**: injectable remediation table, builtin or loaded from YAML
//! - **Metrics**: Prometheus counters for check outcomes and deprecated usage
//!
//! # Example
//!
//! ```
//! use goreleaser_deprecation_check::{collect_deprecations, config};
//!
//! let project = config::decode(b"kos:\n  - repository: ghcr.io/owner/repo\n").unwrap();
//! let report = collect_deprecations(&project).unwrap();
//! assert_eq!(report.paths().collect::<Vec<_>>(), vec!["kos.repository"]);
//! ```

pub mod check;
pub mod config;
pub mod error;
pub mod inspect;
pub mod instructions;
pub mod metrics;
pub mod schema;
pub mod walker;

pub use check::{CheckArgs, CheckOutput, Checker};
pub use config::Project;
pub use error::{CheckError, ConfigError, SchemaError};
pub use instructions::Instructions;
pub use walker::{collect_deprecations, DeprecationReport};
