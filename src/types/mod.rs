//! Public types for the Stancemap API.

mod domain;
mod profile;
mod stance;
mod statement;

pub use domain::Domain;
pub use profile::{Profile, UtilityVector, WeightDistribution};
pub use stance::{LabelSet, StanceLabel};
pub use statement::Statement;
