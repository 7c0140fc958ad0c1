use core::fmt;
use indicatif::HumanCount;

use crate::evaluate::AreaEvaluation;

/// Running totals over evaluated areas. Throughputs are area weighted, in Mbps.
#[derive(Debug, Default)]
pub struct EvaluationSummary {
    areas: u64,
    population: f64,
    area_km2: f64,
    sites: u64,
    demand: Option<f64>,
    capacity: Option<f64>,
    deficit_areas: u64,
}

impl EvaluationSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: &AreaEvaluation) {
        self.areas += 1;
        self.population += record.population;
        self.area_km2 += record.area_km2;
        self.sites += record.sites as u64;
        if let Some(demand) = record.demand {
            *self.demand.get_or_insert(0.0) += demand * record.area_km2;
        }
        if let Some(capacity) = record.capacity {
            *self.capacity.get_or_insert(0.0) += capacity * record.area_km2;
        }
        if matches!(record.margin, Some(margin) if margin < 0.0) {
            self.deficit_areas += 1;
        }
    }

    pub fn areas(&self) -> u64 {
        self.areas
    }

    pub fn deficit_areas(&self) -> u64 {
        self.deficit_areas
    }
}

impl fmt::Display for EvaluationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\nTotal Areas: {}", HumanCount(self.areas))?;
        write!(
            f,
            "\nTotal Population: {}",
            HumanCount(self.population.round() as u64)
        )?;
        write!(f, "\nTotal Area: {:.1} km²", self.area_km2)?;
        write!(f, "\nTotal Sites: {}", HumanCount(self.sites))?;
        if let Some(demand) = self.demand {
            write!(f, "\n\n[Demand]")?;
            write!(f, "\nBusy Hour Demand: {}", HumanThroughput(demand))?;
        }
        if let Some(capacity) = self.capacity {
            write!(f, "\n\n[Capacity]")?;
            write!(f, "\nNetwork Capacity: {}", HumanThroughput(capacity))?;
        }
        if let (Some(demand), Some(capacity)) = (self.demand, self.capacity) {
            write!(f, "\n\n[Margin]")?;
            write!(
                f,
                "\nSpare Capacity: {}",
                HumanThroughput(capacity - demand)
            )?;
            write!(
                f,
                "\nAreas Over Capacity: {}",
                HumanCount(self.deficit_areas)
            )?;
        }
        Ok(())
    }
}

//base unit of throughput is the Mbps
const THROUGHPUT_UNITS: &[(f64, &str)] = &[(1_000_000.0, "Tbps"), (1_000.0, "Gbps"), (1.0, "Mbps")];

/// Formats Megabits per second for human readability
#[derive(Debug)]
pub struct HumanThroughput(pub f64);

impl fmt::Display for HumanThroughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.abs();
        let mut idx = 0;
        for (i, &(cur, _)) in THROUGHPUT_UNITS.iter().enumerate() {
            idx = i;
            match THROUGHPUT_UNITS.get(i + 1) {
                Some(&next) if magnitude + next.0 / 2. >= cur + cur / 2. => break,
                _ => continue,
            }
        }

        let (unit, name) = THROUGHPUT_UNITS[idx];
        write!(f, "{:.2} {}", self.0 / unit, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<'a>(demand: Option<f64>, capacity: Option<f64>) -> AreaEvaluation<'a> {
        AreaEvaluation {
            id: "A",
            environment: "urban",
            population: 100.0,
            area_km2: 2.0,
            sites: 3,
            demand,
            capacity,
            margin: demand.zip(capacity).map(|(d, c)| c - d),
        }
    }

    #[test]
    fn test_human_throughput_fmt() {
        assert_eq!("0.50 Mbps", format!("{}", HumanThroughput(0.5)));
        assert_eq!("1000.00 Mbps", format!("{}", HumanThroughput(1000.0)));
        assert_eq!("7.20 Gbps", format!("{}", HumanThroughput(7200.0)));
        assert_eq!("3.00 Tbps", format!("{}", HumanThroughput(3_000_000.0)));
        assert_eq!("-7.20 Gbps", format!("{}", HumanThroughput(-7200.0)));
    }

    #[test]
    fn test_summary_totals() {
        let mut summary = EvaluationSummary::new();
        summary.add(&record(Some(10.0), Some(50.0)));
        summary.add(&record(Some(60.0), Some(50.0)));
        assert_eq!(summary.areas(), 2);
        assert_eq!(summary.deficit_areas(), 1);
        assert_eq!(summary.demand, Some(140.0));
        assert_eq!(summary.capacity, Some(200.0));
        assert_eq!(summary.sites, 6);
        let report = format!("{}", summary);
        assert!(report.contains("Total Areas: 2"));
        assert!(report.contains("Busy Hour Demand: 140.00 Mbps"));
        assert!(report.contains("Areas Over Capacity: 1"));
    }

    #[test]
    fn test_summary_demand_only() {
        let mut summary = EvaluationSummary::new();
        summary.add(&record(Some(10.0), None));
        let report = format!("{}", summary);
        assert!(report.contains("[Demand]"));
        assert!(!report.contains("[Capacity]"));
        assert!(!report.contains("[Margin]"));
    }
}
