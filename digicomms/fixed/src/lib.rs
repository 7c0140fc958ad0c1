pub mod connect;
pub mod edge;
pub mod exchange;
pub mod islands;
pub mod mst;
pub mod network;
pub mod spatial;
pub mod summary;

pub use edge::{Edge, Edges, Level};
pub use exchange::{CoreLookup, Exchange, Tier};
pub use islands::IslandRecord;
pub use network::FixedNetwork;
pub use summary::NetworkSummary;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FixedError {
    #[error("invalid membership flag '{0}', expecting 0 or 1")]
    InvalidFlag(String),

    #[error("duplicate exchange '{0}'")]
    DuplicateExchange(String),

    #[error("no exchanges to build a network from")]
    NoExchanges,
}
