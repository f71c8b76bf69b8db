use super::branch_and_bound::{self, SearchBudget};
use super::normalize::normalize;
use super::params::Params;
use super::{dp, greedy};
use anyhow::Result;
use knap_challenges::knapsack::*;
use tracing::{debug, info, info_span};

pub struct Solver;

impl Solver {
    /// Picks a strategy by problem size.
    ///
    /// Problems whose normalized table stays under `params.cell_budget` are
    /// solved exactly by dynamic programming. Larger ones get a greedy
    /// baseline and an independent budget-limited branch-and-bound search, and
    /// the better of the two is returned with its own optimality flag.
    pub fn solve(problem: &Problem, params: &Params) -> Result<Solution> {
        let span = info_span!(
            "solve",
            num_items = problem.num_items(),
            capacity = problem.capacity()
        );
        let _enter = span.enter();

        // no items means no weights to normalize by, and a table sized by the
        // capacity alone
        if problem.num_items() == 0 {
            debug!("no items, nothing to take");
            return Ok(Solution::from_taken(problem, Vec::new(), true));
        }

        let normalized = normalize(problem)?;
        let cells = (problem.num_items() as u64).checked_mul(normalized.problem.capacity());
        debug!(
            factor = normalized.factor,
            normalized_capacity = normalized.problem.capacity(),
            ?cells,
            "normalized capacity"
        );

        let solution = match cells {
            Some(cells) if cells < params.cell_budget => {
                let exact = dp::solve(&normalized.problem)?;
                // values are untouched by normalization, only the weights shrank
                Solution::from_taken(problem, exact.taken, true)
            }
            _ => {
                debug!(
                    cell_budget = params.cell_budget,
                    "table over budget, falling back to greedy and branch-and-bound"
                );
                let baseline = greedy::solve(problem);
                let mut budget = SearchBudget::new(params.node_budget);
                let searched = branch_and_bound::solve(problem, &mut budget);
                if searched.total_value >= baseline.total_value {
                    searched
                } else {
                    baseline
                }
            }
        };

        info!(
            total_value = solution.total_value,
            is_optimal = solution.is_optimal,
            "solved"
        );
        Ok(solution)
    }
}
