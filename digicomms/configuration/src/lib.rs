pub mod config;
pub mod groups;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DigicommsConfigError {
    #[error("'{0}' must be a percentage between 0 and 100, found {1}")]
    InvalidPercentage(&'static str, f64),

    #[error("monthly data consumption must be positive, found {0}")]
    InvalidConsumption(f64),

    #[error("'{0}' must be at least 1")]
    ZeroCount(&'static str),

    #[error("no frequencies configured for capacity estimation")]
    NoFrequencies,

    #[error("no channel bandwidth configured for frequency {0} MHz")]
    MissingBandwidth(u32),
}
