use serde::{Deserialize, Serialize};

use crate::DigicommsConfigError;

/// Mobile traffic scenario used to estimate busy hour demand.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(default)]
pub struct DemandGroup {
    pub monthly_data_consumption_gb: f64,
    pub busy_hour_traffic_percentage: f64,
    pub penetration_percentage: f64,
    pub market_share_percentage: f64,
}

impl Default for DemandGroup {
    fn default() -> Self {
        DemandGroup {
            monthly_data_consumption_gb: 3.0,
            busy_hour_traffic_percentage: 20.0,
            penetration_percentage: 80.0,
            market_share_percentage: 25.0,
        }
    }
}

impl DemandGroup {
    pub fn valid(&self) -> Result<(), DigicommsConfigError> {
        let consumption = self.monthly_data_consumption_gb;
        if !(consumption.is_finite() && consumption > 0.0) {
            return Err(DigicommsConfigError::InvalidConsumption(consumption));
        }
        for (name, value) in [
            (
                "busy_hour_traffic_percentage",
                self.busy_hour_traffic_percentage,
            ),
            ("penetration_percentage", self.penetration_percentage),
            ("market_share_percentage", self.market_share_percentage),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(DigicommsConfigError::InvalidPercentage(name, value));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DemandGroup::default().valid().is_ok());
    }

    #[test]
    fn test_invalid_percentage() {
        let group = DemandGroup {
            market_share_percentage: 125.0,
            ..DemandGroup::default()
        };
        assert_eq!(
            group.valid(),
            Err(DigicommsConfigError::InvalidPercentage(
                "market_share_percentage",
                125.0
            ))
        );
    }

    #[test]
    fn test_invalid_consumption() {
        let group = DemandGroup {
            monthly_data_consumption_gb: 0.0,
            ..DemandGroup::default()
        };
        assert_eq!(
            group.valid(),
            Err(DigicommsConfigError::InvalidConsumption(0.0))
        );
    }

    #[test]
    fn test_non_finite_consumption() {
        for consumption in [f64::NAN, f64::INFINITY] {
            let group = DemandGroup {
                monthly_data_consumption_gb: consumption,
                ..DemandGroup::default()
            };
            assert!(matches!(
                group.valid(),
                Err(DigicommsConfigError::InvalidConsumption(_))
            ));
        }
    }

    #[test]
    fn test_nan_percentage() {
        let group = DemandGroup {
            penetration_percentage: f64::NAN,
            ..DemandGroup::default()
        };
        assert!(matches!(
            group.valid(),
            Err(DigicommsConfigError::InvalidPercentage("penetration_percentage", _))
        ));
    }
}
