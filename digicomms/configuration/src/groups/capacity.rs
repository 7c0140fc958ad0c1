use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::DigicommsConfigError;

/// Radio access network parameters, frequencies and bandwidths in MHz.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(default)]
pub struct CapacityGroup {
    /// Antenna type used to key the capacity lookup table
    pub cell_type: String,
    /// Frequency bands summed into an area's capacity
    pub frequencies: Vec<u32>,
    pub channel_bandwidths: BTreeMap<u32, u32>,
}

impl Default for CapacityGroup {
    fn default() -> Self {
        CapacityGroup {
            cell_type: "macro".to_string(),
            frequencies: vec![700, 800, 1800, 2600, 3500, 26000],
            channel_bandwidths: BTreeMap::from([
                (700, 10),
                (800, 10),
                (1800, 10),
                (2600, 10),
                (3500, 40),
                (3700, 40),
                (26000, 200),
            ]),
        }
    }
}

impl CapacityGroup {
    pub fn bandwidth(&self, frequency: u32) -> Option<u32> {
        self.channel_bandwidths.get(&frequency).copied()
    }

    pub fn valid(&self) -> Result<(), DigicommsConfigError> {
        if self.frequencies.is_empty() {
            return Err(DigicommsConfigError::NoFrequencies);
        }
        match self
            .frequencies
            .iter()
            .find(|frequency| self.bandwidth(**frequency).is_none())
        {
            Some(frequency) => Err(DigicommsConfigError::MissingBandwidth(*frequency)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CapacityGroup::default().valid().is_ok());
    }

    #[test]
    fn test_bandwidth() {
        let group = CapacityGroup::default();
        assert_eq!(group.bandwidth(3500), Some(40));
        assert_eq!(group.bandwidth(900), None);
    }

    #[test]
    fn test_frequency_without_bandwidth_invalid() {
        let group = CapacityGroup {
            frequencies: vec![800, 900],
            ..CapacityGroup::default()
        };
        assert_eq!(
            group.valid(),
            Err(DigicommsConfigError::MissingBandwidth(900))
        );
    }

    #[test]
    fn test_no_frequencies_invalid() {
        let group = CapacityGroup {
            frequencies: vec![],
            ..CapacityGroup::default()
        };
        assert_eq!(group.valid(), Err(DigicommsConfigError::NoFrequencies));
    }
}
