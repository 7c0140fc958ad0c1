pub mod assets;
pub mod capacity;
pub mod demand;
pub mod evaluate;
pub mod results;

pub use assets::{Area, Asset};
pub use capacity::{CapacityLookupTable, Generation, LookupKey};
pub use evaluate::AreaEvaluation;
pub use results::EvaluationSummary;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MobileError {
    #[error("combination {0} not found in capacity lookup table")]
    MissingCombination(LookupKey),

    #[error("{0} MHz not specified in channel bandwidths")]
    MissingBandwidth(u32),

    #[error("area must be positive, found {0} km²")]
    InvalidArea(f64),

    #[error("unknown technology generation '{0}'")]
    UnknownGeneration(String),
}
