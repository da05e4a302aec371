//! Wiring a result set for one search.
//!
//! The comparator and the mapper are chosen here, once, from the search
//! configuration: the comparator from the request flags, the mapper from
//! the search direction.

use tracing::debug;

use super::comparator::{DominanceOptions, PathComparator};
use super::cost::{CostCalculator, CostModel};
use super::destination::DestinationPaths;
use super::error::ConfigError;
use super::mapper::{ForwardPathMapper, MapperContext, PathMapper, ReversePathMapper};
use crate::config::{SearchConfig, SearchDirection};
use crate::transit::{
    NoTransferConstraints, SlackProvider, StopIndexNames, StopNameResolver,
    TransferConstraintSearch, TransitData,
};

/// The collaborators one search runs against.
#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    pub config: &'a SearchConfig,
    pub transit: &'a dyn TransitData,
    pub slack: &'a dyn SlackProvider,
    pub constraints: &'a dyn TransferConstraintSearch,
    pub cost_calculator: Option<&'a dyn CostCalculator>,
    pub stop_names: &'a dyn StopNameResolver,
}

impl<'a> SearchContext<'a> {
    /// A context without transfer constraints, cost calculator or stop
    /// names.
    pub fn new(
        config: &'a SearchConfig,
        transit: &'a dyn TransitData,
        slack: &'a dyn SlackProvider,
    ) -> Self {
        Self {
            config,
            transit,
            slack,
            constraints: &NoTransferConstraints,
            cost_calculator: None,
            stop_names: &StopIndexNames,
        }
    }

    pub fn with_constraints(mut self, constraints: &'a dyn TransferConstraintSearch) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_cost_calculator(mut self, calculator: &'a dyn CostCalculator) -> Self {
        self.cost_calculator = Some(calculator);
        self
    }

    pub fn with_stop_names(mut self, names: &'a dyn StopNameResolver) -> Self {
        self.stop_names = names;
        self
    }
}

/// Builds destination result sets for a search.
#[derive(Clone, Copy)]
pub struct PathConfig<'a> {
    ctx: SearchContext<'a>,
}

impl<'a> PathConfig<'a> {
    pub fn new(ctx: SearchContext<'a>) -> Self {
        Self { ctx }
    }

    /// Result set for the configured criteria: with generalized cost if
    /// the configuration asks for it.
    pub fn create_dest_arrival_paths(&self) -> Result<DestinationPaths<'a>, ConfigError> {
        self.ctx.config.validate()?;
        if self.ctx.config.include_cost {
            self.create_paths_with_generalized_cost()
        } else {
            self.create_paths_without_generalized_cost()
        }
    }

    /// Result set that attaches and compares generalized cost.
    ///
    /// # Errors
    ///
    /// Returns `Err(ConfigError::MissingCostCalculator)` if the context has
    /// no cost calculator, or any error from comparator selection.
    pub fn create_paths_with_generalized_cost(&self) -> Result<DestinationPaths<'a>, ConfigError> {
        let calculator = self
            .ctx
            .cost_calculator
            .ok_or(ConfigError::MissingCostCalculator)?;
        let options = DominanceOptions {
            include_cost: true,
            ..self.ctx.config.dominance_options()
        };
        self.create(options, Some(CostModel::new(calculator)))
    }

    /// Result set on time and transits only. Paths carry no cost.
    pub fn create_paths_without_generalized_cost(
        &self,
    ) -> Result<DestinationPaths<'a>, ConfigError> {
        let options = DominanceOptions {
            include_cost: false,
            relax_cost_at_destination: None,
            ..self.ctx.config.dominance_options()
        };
        self.create(options, None)
    }

    fn create(
        &self,
        options: DominanceOptions,
        cost: Option<CostModel<'a>>,
    ) -> Result<DestinationPaths<'a>, ConfigError> {
        let comparator = PathComparator::select(&options)?;
        debug!(
            ?comparator,
            direction = ?self.ctx.config.direction,
            approximate = self.ctx.config.approximate_trip_search,
            "creating destination paths"
        );

        let mut paths = DestinationPaths::new(comparator, self.mapper(cost))
            .with_stop_names(self.ctx.stop_names);
        if let Some(limit) = self.ctx.config.time_limit() {
            paths = paths.with_time_limit(limit);
        }
        Ok(paths)
    }

    fn mapper(&self, cost: Option<CostModel<'a>>) -> Box<dyn PathMapper + 'a> {
        let mut ctx = MapperContext::new(self.ctx.transit, self.ctx.slack, self.ctx.constraints)
            .with_approximate_trip_search(self.ctx.config.approximate_trip_search);
        if let Some(model) = cost {
            ctx = ctx.with_cost(model);
        }
        match self.ctx.config.direction {
            SearchDirection::Forward => Box::new(ForwardPathMapper::new(ctx)),
            SearchDirection::Reverse => Box::new(ReversePathMapper::new(ctx)),
        }
    }
}
