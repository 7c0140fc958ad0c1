use serde::{Deserialize, Serialize};

use crate::DigicommsConfigError;

/// Parameters for building the hierarchical fixed network.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(default)]
pub struct CoreGroup {
    /// Number of most populous lower exchanges promoted to tier 1, the rest become MSANs
    pub tier_1_count: usize,
    /// Links from each core exchange to its nearest core exchanges
    pub core_neighbours: usize,
    /// Links from each metro exchange to its nearest core exchanges
    pub metro_neighbours: usize,
    /// Links from each tier 1 exchange to its nearest metro exchanges
    pub tier_1_neighbours: usize,
    /// Links from each MSAN to its nearest tier 1 exchanges
    pub msan_neighbours: usize,
    /// Core lookup rows from these areas are ignored
    pub excluded_areas: Vec<String>,
}

impl Default for CoreGroup {
    fn default() -> Self {
        CoreGroup {
            tier_1_count: 1000,
            core_neighbours: 4,
            metro_neighbours: 3,
            tier_1_neighbours: 3,
            msan_neighbours: 3,
            excluded_areas: vec!["Belfast".to_string()],
        }
    }
}

impl CoreGroup {
    pub fn valid(&self) -> Result<(), DigicommsConfigError> {
        for (name, count) in [
            ("tier_1_count", self.tier_1_count),
            ("core_neighbours", self.core_neighbours),
            ("metro_neighbours", self.metro_neighbours),
            ("tier_1_neighbours", self.tier_1_neighbours),
            ("msan_neighbours", self.msan_neighbours),
        ] {
            if count == 0 {
                return Err(DigicommsConfigError::ZeroCount(name));
            }
        }
        Ok(())
    }

    pub fn is_excluded(&self, area: &str) -> bool {
        self.excluded_areas.iter().any(|a| a == area)
    }
}
