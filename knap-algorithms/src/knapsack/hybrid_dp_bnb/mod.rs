use anyhow::Result;
use knap_challenges::knapsack::*;
use serde_json::{Map, Value};
pub mod branch_and_bound;
pub mod dp;
pub mod greedy;
pub mod normalize;
mod params;
mod solver;
pub use params::Params;
pub use solver::Solver;

pub fn solve_challenge(
    problem: &Problem,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<Solution> {
    let params = Params::initialize(hyperparameters);
    Solver::solve(problem, &params)
}

pub fn help() {
    println!("Hyperparameters (all optional, json object):");
    println!(
        "  cell_budget  largest item_count x capacity solved exactly by dynamic programming (default {})",
        params::DEFAULT_CELL_BUDGET
    );
    println!(
        "  node_budget  branch-and-bound nodes visited before the search is truncated (default {})",
        params::DEFAULT_NODE_BUDGET
    );
}
