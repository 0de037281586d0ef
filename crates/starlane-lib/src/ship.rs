//! Ship fuel model.
//!
//! The ship carries a fuel tank that is drained by every jump and by pirate
//! attacks at dangerous stars, and topped up by colonising stars. Its limits
//! feed the route budget checks.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::routing::RouteBudget;

/// Ship configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub max_fuel: f64,
    /// Fuel burned per jump.
    pub fuel_per_jump: f64,
    /// Maximum stars in one route, start and goal included.
    pub max_path_stars: usize,
    /// Chance in `[0, 1]` of a pirate attack when passing an uncolonised
    /// dangerous star.
    pub pirate_attack_chance: f64,
    /// Share of `max_fuel` lost to a pirate attack.
    pub pirate_fuel_loss: f64,
    /// Chance in `[0, 1]` that colonising a star yields fuel.
    pub colonise_refill_chance: f64,
    /// Share of `max_fuel` gained when colonising yields fuel.
    pub colonise_refill: f64,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            max_fuel: 100.0,
            fuel_per_jump: 4.0,
            max_path_stars: 8,
            pirate_attack_chance: 0.35,
            pirate_fuel_loss: 0.10,
            colonise_refill_chance: 0.5,
            colonise_refill: 0.05,
        }
    }
}

impl ShipConfig {
    /// Validate the ship configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.max_fuel.is_finite() || self.max_fuel <= 0.0 {
            return Err(Error::InvalidConfig {
                message: format!("max_fuel must be positive, got {}", self.max_fuel),
            });
        }
        if !self.fuel_per_jump.is_finite() || self.fuel_per_jump < 0.0 {
            return Err(Error::InvalidConfig {
                message: format!(
                    "fuel_per_jump must not be negative, got {}",
                    self.fuel_per_jump
                ),
            });
        }
        for (name, value) in [
            ("pirate_attack_chance", self.pirate_attack_chance),
            ("pirate_fuel_loss", self.pirate_fuel_loss),
            ("colonise_refill_chance", self.colonise_refill_chance),
            ("colonise_refill", self.colonise_refill),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig {
                    message: format!("{} must be between 0 and 1, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

/// The player's ship.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ship {
    config: ShipConfig,
    fuel: f64,
}

impl Ship {
    /// A ship with a full tank.
    pub fn new(config: ShipConfig) -> Self {
        Self {
            fuel: config.max_fuel,
            config,
        }
    }

    pub fn config(&self) -> &ShipConfig {
        &self.config
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    /// Budget a route must fit before travel can start.
    pub fn budget(&self) -> RouteBudget {
        RouteBudget {
            fuel: self.fuel,
            fuel_per_jump: self.config.fuel_per_jump,
            max_path_stars: self.config.max_path_stars,
        }
    }

    /// Burn fuel for one jump.
    pub fn burn_jump(&mut self) {
        self.fuel -= self.config.fuel_per_jump;
    }

    /// Roll for a pirate attack; on a hit the ship loses a share of its
    /// maximum fuel. Returns whether the attack happened.
    pub fn pirate_attack<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !rng.gen_bool(self.config.pirate_attack_chance) {
            return false;
        }
        let loss = self.config.max_fuel * self.config.pirate_fuel_loss;
        self.fuel -= loss;
        info!(loss, fuel = self.fuel, "pirates attacked the ship");
        true
    }

    /// Roll for the colonisation bonus. Returns the fuel gained.
    pub fn colonise_bonus<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        if !rng.gen_bool(self.config.colonise_refill_chance) {
            return 0.0;
        }
        self.refill(self.config.max_fuel * self.config.colonise_refill)
    }

    /// Add fuel, clamped to the tank size. Returns the amount actually added.
    pub fn refill(&mut self, amount: f64) -> f64 {
        let before = self.fuel;
        self.fuel = (self.fuel + amount.max(0.0)).min(self.config.max_fuel);
        debug!(added = self.fuel - before, fuel = self.fuel, "refilled fuel");
        self.fuel - before
    }

    /// The ship has run dry.
    pub fn is_stranded(&self) -> bool {
        self.fuel <= 0.0
    }
}
