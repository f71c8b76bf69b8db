use anyhow::{anyhow, Result};
use knap_challenges::knapsack::*;
use std::cmp::Ordering;
use tracing::debug;

/// Orders items by decreasing density. Compared exactly by
/// cross-multiplication; weightless items rank above everything else.
fn by_density_desc(a: &Item, b: &Item) -> Ordering {
    match (a.weight(), b.weight()) {
        (0, 0) => Ordering::Equal,
        (0, _) => Ordering::Less,
        (_, 0) => Ordering::Greater,
        (wa, wb) => {
            let lhs = a.value() as u128 * wb as u128;
            let rhs = b.value() as u128 * wa as u128;
            rhs.cmp(&lhs)
        }
    }
}

pub fn solve(problem: &Problem) -> Solution {
    fill(problem, vec![false; problem.num_items()], problem.capacity())
}

/// Greedily adds untaken items, densest first (ties go to the lower index),
/// to an existing selection. Never claims optimality.
///
/// The seed selection must cover every item and already fit in the knapsack.
pub fn extend(problem: &Problem, taken: Vec<bool>) -> Result<Solution> {
    if taken.len() != problem.num_items() {
        return Err(anyhow!(
            "Selection covers {} items, problem has {}",
            taken.len(),
            problem.num_items()
        ));
    }
    let used: u64 = problem
        .items()
        .iter()
        .zip(&taken)
        .filter(|&(_, &t)| t)
        .map(|(item, _)| item.weight())
        .sum();
    if used > problem.capacity() {
        return Err(anyhow!(
            "Selection weighs {} but capacity is {}",
            used,
            problem.capacity()
        ));
    }
    Ok(fill(problem, taken, problem.capacity() - used))
}

/// Picking the densest item that still fits, over and over, is the same as a
/// single pass in density order: remaining capacity only shrinks, so an item
/// skipped once can never fit later.
fn fill(problem: &Problem, mut taken: Vec<bool>, mut remaining: u64) -> Solution {
    let mut by_density: Vec<&Item> = problem
        .items()
        .iter()
        .filter(|item| !taken[item.index()])
        .collect();
    // stable, so equal densities keep index order
    by_density.sort_by(|a, b| by_density_desc(a, b));

    let mut num_added = 0;
    for item in by_density {
        if item.weight() <= remaining {
            taken[item.index()] = true;
            remaining -= item.weight();
            num_added += 1;
        }
    }

    let solution = Solution::from_taken(problem, taken, false);
    debug!(
        num_added,
        remaining,
        total_value = solution.total_value,
        "greedy finished"
    );
    solution
}
