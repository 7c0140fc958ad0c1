//! Busy hour data demand, per user and per km².

use anyhow::{bail, Result};

use crate::MobileError;
use configuration::groups::DemandGroup;

const MB_PER_GB: f64 = 1024.0;
const BITS_PER_BYTE: f64 = 8.0;
const DAYS_PER_MONTH: f64 = 30.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Mbps required per user during the busy hour from a monthly consumption in GB.
///
/// e.g. 2 GB/month * 1024 * 8 * 20% busy hour share / 30 days / 3600 s ≈ 0.03 Mbps
pub fn calculate_user_demand(config: &DemandGroup) -> f64 {
    let busy_hour_traffic = config.busy_hour_traffic_percentage / 100.0;
    config.monthly_data_consumption_gb * MB_PER_GB * BITS_PER_BYTE * busy_hour_traffic
        / DAYS_PER_MONTH
        / SECONDS_PER_HOUR
}

/// Demand in Mbps/km² from the population served over an area (km²).
///
/// Users are the population scaled by smartphone penetration and operator market share.
pub fn total_demand(
    user_demand: f64,
    population: f64,
    area: f64,
    config: &DemandGroup,
) -> Result<f64> {
    if !(area.is_finite() && area > 0.0) {
        bail!(MobileError::InvalidArea(area))
    }
    let users = population
        * (config.penetration_percentage / 100.0)
        * (config.market_share_percentage / 100.0);
    Ok(users * user_demand / area)
}
