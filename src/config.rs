//! Tunable prices, restock economics and starting state.
//!
//! Every field has a default, so a config file only needs the keys it changes.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{CanCounts, Error, Flavor, RestockPolicy};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What the fridge account earns per can taken.
    pub prices: Prices,
    /// Flat refund paid out per returned can, whatever the flavor.
    pub return_refund: Decimal,
    /// Amount the subscriber stakes in escrow before a restock mission.
    pub restock_bond: Decimal,
    /// Paid to the subscriber per can added on a completed restock.
    pub bounty_rate: Decimal,
    pub restock_targets: CanCounts,
    pub low_stock_threshold: u32,
    pub initial_stock: CanCounts,
    pub initial_balances: Balances,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Prices {
    pub red: Decimal,
    pub green: Decimal,
    pub blue: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Balances {
    pub fridge: Decimal,
    pub subscriber: Decimal,
    pub escrow: Decimal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prices: Prices::default(),
            return_refund: Decimal::new(1, 1), // 0.10
            restock_bond: Decimal::new(4, 0),
            bounty_rate: Decimal::new(1, 1), // 0.10 per can
            restock_targets: CanCounts::new(4, 2, 2),
            low_stock_threshold: 1,
            initial_stock: CanCounts::new(4, 2, 2),
            initial_balances: Balances::default(),
        }
    }
}

impl Default for Prices {
    fn default() -> Self {
        Self {
            red: Decimal::new(3, 1),
            green: Decimal::new(4, 1),
            blue: Decimal::new(5, 1),
        }
    }
}

impl Default for Balances {
    fn default() -> Self {
        Self {
            fridge: Decimal::new(25, 0),
            subscriber: Decimal::new(10, 0),
            escrow: Decimal::ZERO,
        }
    }
}

impl Prices {
    pub fn get(&self, flavor: Flavor) -> Decimal {
        match flavor {
            Flavor::Red => self.red,
            Flavor::Green => self.green,
            Flavor::Blue => self.blue,
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, Error> {
        serde_json::from_str(raw).map_err(|e| Error::Config(format!("invalid config: {}", e)))
    }

    pub fn restock_policy(&self) -> RestockPolicy {
        RestockPolicy {
            targets: self.restock_targets,
            low_stock_threshold: self.low_stock_threshold,
        }
    }
}
