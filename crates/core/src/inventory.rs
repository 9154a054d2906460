//! Inventory of one-shot power-ups

use serde::Serialize;

use crate::types::{PowerUpKind, STARTING_POWER_UP_COUNT};

/// Non-negative count per power-up kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    dynamite: u32,
    shovel: u32,
    trade: u32,
    slow: u32,
}

impl Inventory {
    /// Empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// The allotment handed out when the first stage starts
    pub fn starting() -> Self {
        Self {
            dynamite: STARTING_POWER_UP_COUNT,
            shovel: STARTING_POWER_UP_COUNT,
            trade: STARTING_POWER_UP_COUNT,
            slow: STARTING_POWER_UP_COUNT,
        }
    }

    fn slot(&mut self, kind: PowerUpKind) -> &mut u32 {
        match kind {
            PowerUpKind::Dynamite => &mut self.dynamite,
            PowerUpKind::Shovel => &mut self.shovel,
            PowerUpKind::Trade => &mut self.trade,
            PowerUpKind::Slow => &mut self.slow,
        }
    }

    pub fn count(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Dynamite => self.dynamite,
            PowerUpKind::Shovel => self.shovel,
            PowerUpKind::Trade => self.trade,
            PowerUpKind::Slow => self.slow,
        }
    }

    /// Take one unit. Returns false (and changes nothing) when none are left.
    pub fn try_consume(&mut self, kind: PowerUpKind) -> bool {
        let slot = self.slot(kind);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    pub fn add(&mut self, kind: PowerUpKind, n: u32) {
        let slot = self.slot(kind);
        *slot = slot.saturating_add(n);
    }

    pub fn total(&self) -> u32 {
        PowerUpKind::ALL.iter().map(|&k| self.count(k)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_inventory_has_five_of_each() {
        let inv = Inventory::starting();
        for kind in PowerUpKind::ALL {
            assert_eq!(inv.count(kind), 5);
        }
        assert_eq!(inv.total(), 20);
    }

    #[test]
    fn consume_stops_at_zero() {
        let mut inv = Inventory::new();
        assert!(!inv.try_consume(PowerUpKind::Shovel));
        inv.add(PowerUpKind::Shovel, 1);
        assert!(inv.try_consume(PowerUpKind::Shovel));
        assert!(!inv.try_consume(PowerUpKind::Shovel));
        assert_eq!(inv.count(PowerUpKind::Shovel), 0);
    }
}
