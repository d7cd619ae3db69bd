//! Random balanced transportation problems.

use rand::Rng;
use tracing::{debug, instrument};

use crate::{
    error::{Result, SolverError},
    matrix::Matrix,
    transport::TransportProblem,
};

use super::TransportConfig;

/// Draws costs, supplies and demands, then adds the shortfall to the last
/// demand (when supply exceeds demand) or the last supply (otherwise) so the
/// totals match.
///
/// # Errors
/// Returns [`SolverError::EmptyInstance`] when either side is empty and
/// [`SolverError::InvalidRange`] for an inverted or negative range.
///
/// # Examples
/// ```
/// use opsuite_core::generate::{TransportConfig, transport_problem};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(11);
/// let problem = transport_problem(&TransportConfig::default(), &mut rng)?;
/// assert_eq!(problem.supply().iter().sum::<i64>(), problem.demand().iter().sum::<i64>());
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
#[instrument(name = "generate.transport_problem", err, skip(rng))]
pub fn transport_problem<R: Rng + ?Sized>(
    config: &TransportConfig,
    rng: &mut R,
) -> Result<TransportProblem> {
    if config.sources == 0 {
        return Err(SolverError::EmptyInstance { what: "sources" });
    }
    if config.destinations == 0 {
        return Err(SolverError::EmptyInstance {
            what: "destinations",
        });
    }
    let costs_range = config.costs.validate_non_negative("costs")?;
    let quantities = config.quantities.validate_non_negative("quantities")?;

    let mut costs = Matrix::filled(config.sources, config.destinations, 0_i64);
    for row in 0..config.sources {
        for col in 0..config.destinations {
            if let Some(cell) = costs.get_mut(row, col) {
                *cell = costs_range.sample(rng);
            }
        }
    }
    let mut supply: Vec<i64> = (0..config.sources).map(|_| quantities.sample(rng)).collect();
    let mut demand: Vec<i64> = (0..config.destinations)
        .map(|_| quantities.sample(rng))
        .collect();

    let shortfall = supply.iter().sum::<i64>() - demand.iter().sum::<i64>();
    let balanced = if shortfall > 0 {
        demand.last_mut()
    } else {
        supply.last_mut()
    };
    if let Some(last) = balanced {
        *last += shortfall.abs();
    }
    debug!(shortfall, "balanced supply and demand");
    TransportProblem::new(costs, supply, demand)
}
