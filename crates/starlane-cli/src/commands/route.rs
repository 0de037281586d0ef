//! Route command handler for computing paths between stars.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use starlane_lib::{plan_route, CostModel, RouteBudget, RouteRequest, ShipConfig};

use crate::commands::MapArgs;
use crate::output::{print_json, render_route_report, OutputFormat, RouteReport};
use crate::terminal::ColorPalette;

/// Cost model selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CostModelArg {
    #[default]
    Legacy,
    Consistent,
}

impl From<CostModelArg> for CostModel {
    fn from(value: CostModelArg) -> Self {
        match value {
            CostModelArg::Legacy => CostModel::Legacy,
            CostModelArg::Consistent => CostModel::Consistent,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone, Args)]
pub struct RouteCommandArgs {
    /// Starting star name.
    #[arg(long = "from")]
    pub from: String,
    /// Destination star name.
    #[arg(long = "to")]
    pub to: String,
    /// How danger multipliers enter the search cost.
    #[arg(long, value_enum, default_value_t = CostModelArg::Legacy)]
    pub cost_model: CostModelArg,
    /// Fuel available for the trip; enables the fuel check.
    #[arg(long)]
    pub fuel: Option<f64>,
    /// Fuel burned per jump when checking fuel.
    #[arg(long, default_value_t = ShipConfig::default().fuel_per_jump)]
    pub fuel_per_jump: f64,
    /// Maximum stars in the route, start and goal included.
    #[arg(long)]
    pub max_path_stars: Option<usize>,
}

impl RouteCommandArgs {
    /// Budget to check the route against, if any limit was given.
    pub fn budget(&self) -> Option<RouteBudget> {
        if self.fuel.is_none() && self.max_path_stars.is_none() {
            return None;
        }
        Some(RouteBudget {
            fuel: self.fuel.unwrap_or(f64::MAX),
            fuel_per_jump: self.fuel_per_jump,
            max_path_stars: self.max_path_stars.unwrap_or(usize::MAX),
        })
    }
}

/// Handle the route subcommand.
///
/// Budget outcomes and missing routes are reported, not treated as errors.
pub fn handle_route_command(
    map_args: &MapArgs,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let (_, map) = map_args.generate()?;

    let mut request = RouteRequest::by_name(&map.starmap, &args.from, &args.to)?
        .with_cost_model(args.cost_model.into());
    if let Some(budget) = args.budget() {
        request = request.with_budget(budget);
    }

    let outcome = plan_route(&map.graph, &map.starmap, &request)
        .with_context(|| format!("failed to plan route from {} to {}", args.from, args.to))?;
    let report = RouteReport::new(&map.starmap, request.start, request.goal, outcome);

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print!("{}", render_route_report(&report, &ColorPalette::detect()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RouteCommandArgs {
        RouteCommandArgs {
            from: "Star 0".to_string(),
            to: "Star 1".to_string(),
            cost_model: CostModelArg::Legacy,
            fuel: None,
            fuel_per_jump: 4.0,
            max_path_stars: None,
        }
    }

    #[test]
    fn no_limits_means_no_budget() {
        assert_eq!(args().budget(), None);
    }

    #[test]
    fn star_limit_alone_leaves_fuel_unbounded() {
        let budget = RouteCommandArgs {
            max_path_stars: Some(5),
            ..args()
        }
        .budget()
        .expect("budget");
        assert_eq!(budget.max_path_stars, 5);
        assert_eq!(budget.check(5), None);
        assert!(budget.check(6).is_some());
    }

    #[test]
    fn cost_model_arg_converts() {
        assert_eq!(CostModel::from(CostModelArg::Consistent), CostModel::Consistent);
    }
}
