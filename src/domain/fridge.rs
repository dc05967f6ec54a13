use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Can flavors sold by the fridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Red,
    Green,
    Blue,
}

impl Flavor {
    pub const ALL: [Flavor; 3] = [Flavor::Red, Flavor::Green, Flavor::Blue];

    fn index(self) -> usize {
        match self {
            Flavor::Red => 0,
            Flavor::Green => 1,
            Flavor::Blue => 2,
        }
    }

    /// Name used by the web pages, e.g. `red_can`.
    pub fn can_name(self) -> &'static str {
        match self {
            Flavor::Red => "red_can",
            Flavor::Green => "green_can",
            Flavor::Blue => "blue_can",
        }
    }
}

impl FromStr for Flavor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red_can" | "red" => Ok(Flavor::Red),
            "green_can" | "green" => Ok(Flavor::Green),
            "blue_can" | "blue" => Ok(Flavor::Blue),
            other => Err(Error::InvalidFlavor(other.to_string())),
        }
    }
}

impl core::fmt::Display for Flavor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.can_name())
    }
}

/// A count for every flavor. Used for stock levels and restock targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanCounts {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl CanCounts {
    pub fn new(red: u32, green: u32, blue: u32) -> Self {
        Self { red, green, blue }
    }

    pub fn get(&self, flavor: Flavor) -> u32 {
        match flavor {
            Flavor::Red => self.red,
            Flavor::Green => self.green,
            Flavor::Blue => self.blue,
        }
    }
}

/// When the fridge asks for a restock and what a restock fills it up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestockPolicy {
    pub targets: CanCounts,
    /// A flavor at or below this count flags the fridge for restocking.
    pub low_stock_threshold: u32,
}

impl Default for RestockPolicy {
    fn default() -> Self {
        Self {
            targets: CanCounts::new(4, 2, 2),
            low_stock_threshold: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Fridge {
    contents: [u32; 3],
    needs_restock: bool,
    policy: RestockPolicy,
}

impl Default for Fridge {
    fn default() -> Self {
        Self::with_policy(CanCounts::default(), RestockPolicy::default())
    }
}

impl Fridge {
    pub fn new(initial: CanCounts) -> Self {
        Self::with_policy(initial, RestockPolicy::default())
    }

    pub fn with_policy(initial: CanCounts, policy: RestockPolicy) -> Self {
        let mut fridge = Self {
            contents: [initial.red, initial.green, initial.blue],
            needs_restock: false,
            policy,
        };
        fridge.recompute_restock_flag();
        fridge
    }

    pub fn get(&self, flavor: Flavor) -> u32 {
        self.contents[flavor.index()]
    }

    pub fn contents(&self) -> CanCounts {
        CanCounts::new(
            self.get(Flavor::Red),
            self.get(Flavor::Green),
            self.get(Flavor::Blue),
        )
    }

    pub fn set(&mut self, flavor: Flavor, n: u32) {
        self.contents[flavor.index()] = n;
        self.recompute_restock_flag();
    }

    pub fn increment(&mut self, flavor: Flavor) -> u32 {
        let slot = &mut self.contents[flavor.index()];
        *slot = slot.saturating_add(1);
        self.recompute_restock_flag();
        self.get(flavor)
    }

    /// Removes one can. Taking from an empty slot leaves it at zero.
    pub fn decrement(&mut self, flavor: Flavor) -> u32 {
        let slot = &mut self.contents[flavor.index()];
        if *slot > 0 {
            *slot -= 1;
        }
        self.recompute_restock_flag();
        self.get(flavor)
    }

    /// Last computed restock flag. Does not re-evaluate the counts.
    pub fn check_stock(&self) -> bool {
        self.needs_restock
    }

    /// Tops every flavor up to its target and returns the number of cans added,
    /// capped at `u32::MAX`. Surplus above a target is left alone.
    pub fn restock(&mut self) -> u32 {
        let mut cans_added: u32 = 0;
        for flavor in Flavor::ALL {
            let target = self.policy.targets.get(flavor);
            let slot = &mut self.contents[flavor.index()];
            if *slot < target {
                cans_added = cans_added.saturating_add(target - *slot);
                *slot = target;
            }
        }
        // cleared unconditionally, even if a target sits at or below the threshold
        self.needs_restock = false;
        tracing::debug!(cans_added, "fridge restocked");
        cans_added
    }

    pub fn status(&self) -> BTreeMap<Flavor, u32> {
        Flavor::ALL.iter().map(|f| (*f, self.get(*f))).collect()
    }

    fn recompute_restock_flag(&mut self) {
        self.needs_restock = self
            .contents
            .iter()
            .any(|count| *count <= self.policy.low_stock_threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flavor() -> impl Strategy<Value = Flavor> {
        prop_oneof![Just(Flavor::Red), Just(Flavor::Green), Just(Flavor::Blue)]
    }

    #[test]
    fn the_basics() {
        let mut f = Fridge::default();
        assert_eq!(f.contents(), CanCounts::new(0, 0, 0));

        f.increment(Flavor::Red);
        f.increment(Flavor::Green);
        f.increment(Flavor::Blue);
        assert_eq!(f.contents(), CanCounts::new(1, 1, 1));

        assert_eq!(f.decrement(Flavor::Red), 0);
        assert_eq!(f.decrement(Flavor::Red), 0);
    }

    #[test]
    fn restock_flag_follows_every_mutation() {
        let mut f = Fridge::new(CanCounts::new(4, 2, 2));
        assert!(!f.check_stock());

        f.decrement(Flavor::Green);
        assert!(f.check_stock());

        f.increment(Flavor::Green);
        assert!(!f.check_stock());

        f.set(Flavor::Blue, 0);
        assert!(f.check_stock());
    }

    #[test]
    fn restock_from_empty_fills_to_targets() {
        let mut f = Fridge::default();
        assert!(f.check_stock());

        assert_eq!(f.restock(), 8);
        assert_eq!(f.contents(), CanCounts::new(4, 2, 2));
        assert!(!f.check_stock());
    }

    #[test]
    fn restock_keeps_surplus_and_is_idempotent() {
        let mut f = Fridge::new(CanCounts::new(6, 1, 2));

        assert_eq!(f.restock(), 1);
        assert_eq!(f.contents(), CanCounts::new(6, 2, 2));

        assert_eq!(f.restock(), 0);
        assert_eq!(f.contents(), CanCounts::new(6, 2, 2));
    }

    #[test]
    fn restock_clears_flag_even_when_targets_are_low() {
        let policy = RestockPolicy {
            targets: CanCounts::new(1, 1, 1),
            low_stock_threshold: 1,
        };
        let mut f = Fridge::with_policy(CanCounts::default(), policy);

        assert_eq!(f.restock(), 3);
        assert!(!f.check_stock());

        // the next mutation recomputes it
        f.set(Flavor::Red, 1);
        assert!(f.check_stock());
    }

    #[test]
    fn increment_saturates_at_max() {
        let mut f = Fridge::default();
        f.set(Flavor::Red, u32::MAX);

        assert_eq!(f.increment(Flavor::Red), u32::MAX);
        assert_eq!(f.decrement(Flavor::Red), u32::MAX - 1);
    }

    #[test]
    fn restock_total_saturates_with_huge_targets() {
        let policy = RestockPolicy {
            targets: CanCounts::new(u32::MAX, u32::MAX, 0),
            low_stock_threshold: 1,
        };
        let mut f = Fridge::with_policy(CanCounts::default(), policy);

        assert_eq!(f.restock(), u32::MAX);
        assert_eq!(f.contents(), CanCounts::new(u32::MAX, u32::MAX, 0));
    }

    #[test]
    fn parses_flavor_names() {
        assert_eq!("red_can".parse::<Flavor>().unwrap(), Flavor::Red);
        assert_eq!(" Green ".parse::<Flavor>().unwrap(), Flavor::Green);
        assert_eq!("blue_can".parse::<Flavor>().unwrap(), Flavor::Blue);
        assert!(matches!(
            "purple_can".parse::<Flavor>(),
            Err(Error::InvalidFlavor(name)) if name == "purple_can"
        ));
    }

    proptest! {
        #[test]
        fn set_then_get(f in flavor(), n in 0u32..10_000) {
            let mut fridge = Fridge::default();
            fridge.set(f, n);
            prop_assert_eq!(fridge.get(f), n);
        }

        #[test]
        fn decrement_floors_at_zero(f in flavor(), times in 1usize..5) {
            let mut fridge = Fridge::default();
            for _ in 0..times {
                prop_assert_eq!(fridge.decrement(f), 0);
            }
        }

        #[test]
        fn increment_then_decrement_round_trips(f in flavor(), n in 0u32..10_000) {
            let mut fridge = Fridge::default();
            fridge.set(f, n);
            fridge.increment(f);
            fridge.decrement(f);
            prop_assert_eq!(fridge.get(f), n);
        }
    }
}
