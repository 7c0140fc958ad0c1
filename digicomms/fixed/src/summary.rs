use core::fmt;
use indicatif::HumanCount;
use std::collections::BTreeMap;

use crate::{
    edge::{Edge, Level},
    exchange::Exchange,
};

#[derive(Debug, Default, PartialEq)]
pub struct NetworkSummary {
    exchanges: u64,
    inner: u64,
    outer: u64,
    metro: u64,
    tier_1: u64,
    msan: u64,
    island: u64,
    // count and total length (m) per level
    levels: BTreeMap<Level, (u64, f64)>,
}

impl NetworkSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_exchange(&mut self, exchange: &Exchange) {
        self.exchanges += 1;
        let tier = &exchange.tier;
        self.inner += tier.inner as u64;
        self.outer += tier.outer as u64;
        self.metro += tier.metro as u64;
        self.tier_1 += tier.tier_1 as u64;
        self.msan += tier.msan as u64;
        self.island += exchange.island.is_some() as u64;
    }

    pub fn add_edge(&mut self, edge: &Edge) {
        let (count, length) = self.levels.entry(edge.level).or_insert((0, 0.0));
        *count += 1;
        *length += edge.length;
    }

    pub fn edges(&self, level: Level) -> u64 {
        self.levels.get(&level).map(|(count, _)| *count).unwrap_or(0)
    }

    pub fn total_edges(&self) -> u64 {
        self.levels.values().map(|(count, _)| count).sum()
    }

    pub fn total_length(&self) -> f64 {
        self.levels.values().map(|(_, length)| length).sum()
    }
}

impl fmt::Display for NetworkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\nTotal Exchanges: {}", HumanCount(self.exchanges))?;
        write!(f, "\nTotal Links: {}", HumanCount(self.total_edges()))?;
        write!(f, "\nTotal Route Length: {}", HumanLength(self.total_length()))?;
        write!(f, "\n\n[Exchanges by tier]")?;
        write!(f, "\nInner core: {}", HumanCount(self.inner))?;
        write!(f, "\nOuter core: {}", HumanCount(self.outer))?;
        write!(f, "\nMetro: {}", HumanCount(self.metro))?;
        write!(f, "\nTier 1: {}", HumanCount(self.tier_1))?;
        write!(f, "\nMSAN: {}", HumanCount(self.msan))?;
        write!(f, "\nIsland: {}", HumanCount(self.island))?;
        write!(f, "\n\n[Links by level]")?;
        for (level, (count, length)) in self.levels.iter() {
            write!(
                f,
                "\n{}: {} links over {}",
                level,
                HumanCount(*count),
                HumanLength(*length)
            )?;
        }
        Ok(())
    }
}

//base unit of length is the metre
const LENGTH_UNITS: &[(f64, &str)] = &[(1_000.0, "km"), (1.0, "m")];

/// Formats metres for human readability
#[derive(Debug)]
pub struct HumanLength(pub f64);

impl fmt::Display for HumanLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut idx = 0;
        for (i, &(cur, _)) in LENGTH_UNITS.iter().enumerate() {
            idx = i;
            match LENGTH_UNITS.get(i + 1) {
                Some(&next) if self.0 + next.0 / 2. >= cur + cur / 2. => break,
                _ => continue,
            }
        }

        let (unit, name) = LENGTH_UNITS[idx];
        let t = (self.0 / unit).round() as u64;

        write!(f, "{} {}", HumanCount(t), name)
    }
}
