//! Stancemap - survey stances to linear additive utility profiles
//!
//! Each party answers a list of statements with a stance ("Mee eens",
//! "Neutraal", ...) and an importance weight. Stancemap turns those answers
//! into a `LinearAdditiveUtilitySpace` profile: a utility vector over every
//! stance for each statement, plus statement weights that sum to exactly 1.0.
//! A shared domain document lists the statements and their allowed stances.
//!
//! # Example
//!
//! ```rust
//! use stancemap::{Config, ProfileBuilder, StanceLabel, Statement};
//!
//! # fn main() -> stancemap::Result<()> {
//! let builder = ProfileBuilder::from_config(&Config::default());
//! let profile = builder.build(
//!     "party",
//!     &[
//!         Statement::new("s1", StanceLabel::Agree, 2.0),
//!         Statement::new("s2", StanceLabel::Neutral, 1.0),
//!         Statement::new("s3", StanceLabel::Disagree, 1.0),
//!     ],
//! )?;
//!
//! assert_eq!(profile.weights().get("s2"), Some(0.25));
//! let json = serde_json::to_value(&profile)?;
//! assert_eq!(json["LinearAdditiveUtilitySpace"]["issueWeights"]["s1"], 0.5);
//! # Ok(())
//! # }
//! ```
//!
//! # Batch Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use stancemap::{BatchRunner, Config};
//!
//! # fn main() -> stancemap::Result<()> {
//! let runner = BatchRunner::new(Config::load(None)?);
//! let report = runner.run(Path::new("parties"), Path::new("profiles"))?;
//! for failure in &report.failed {
//!     eprintln!("{}: {}", failure.party, failure.error);
//! }
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod profile;
pub mod telemetry;
pub mod types;
pub mod utility;
mod version;
pub mod weights;

// Re-export main types at crate root
pub use batch::{BatchReport, BatchRunner, PartyFailure, PartyOutput};
pub use config::{Config, Preset};
pub use domain::build_domain;
pub use error::{Result, StancemapError};
pub use profile::ProfileBuilder;
pub use utility::UtilityTable;
pub use version::{PKG_VERSION, version_string};
pub use weights::{Correction, WeightNormalizer};

pub use types::{Domain, LabelSet, Profile, StanceLabel, Statement, UtilityVector, WeightDistribution};
