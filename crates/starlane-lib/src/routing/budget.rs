//! Post-search budget checks.
//!
//! Budgets never stop a search. They are applied to a found route and turn it
//! into an advisory outcome the player can react to by picking another
//! destination.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Limits a found route is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteBudget {
    /// Fuel currently available.
    pub fuel: f64,
    /// Fuel spent per hop.
    pub fuel_per_jump: f64,
    /// Maximum number of stars a route may contain, start and goal included.
    pub max_path_stars: usize,
}

/// Which budget a route broke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BudgetViolation {
    InsufficientFuel { required: f64, available: f64 },
    TooManyStars { stars: usize, max: usize },
}

impl RouteBudget {
    /// Validate the budget.
    pub fn validate(&self) -> Result<()> {
        if !self.fuel.is_finite() || !self.fuel_per_jump.is_finite() {
            return Err(Error::InvalidConfig {
                message: "fuel and fuel_per_jump must be finite".to_string(),
            });
        }
        if self.fuel_per_jump < 0.0 {
            return Err(Error::InvalidConfig {
                message: format!(
                    "fuel_per_jump must not be negative, got {}",
                    self.fuel_per_jump
                ),
            });
        }
        Ok(())
    }

    /// Fuel needed to fly `hops` jumps.
    pub fn fuel_required(&self, hops: usize) -> f64 {
        hops as f64 * self.fuel_per_jump
    }

    /// Check a route of `stars` stars. The star limit is checked last and
    /// takes precedence when both budgets are broken.
    pub fn check(&self, stars: usize) -> Option<BudgetViolation> {
        let hops = stars.saturating_sub(1);
        let mut violation = None;

        let required = self.fuel_required(hops);
        if hops > 0 && required >= self.fuel {
            violation = Some(BudgetViolation::InsufficientFuel {
                required,
                available: self.fuel,
            });
        }

        if stars > self.max_path_stars {
            violation = Some(BudgetViolation::TooManyStars {
                stars,
                max: self.max_path_stars,
            });
        }

        violation
    }
}
