use anyhow::{anyhow, Result};
use knap_challenges::knapsack::*;
use tracing::debug;

/// Dense `(capacity + 1) × (num_items + 1)` table of best values, stored row
/// by row: `cell(w, i)` is the best value of the first `i` items under
/// capacity `w`.
struct Table {
    cells: Vec<u64>,
    cols: usize,
}

impl Table {
    fn new(capacity: usize, num_items: usize) -> Result<Self> {
        let cols = num_items + 1;
        let len = capacity
            .checked_add(1)
            .and_then(|rows| rows.checked_mul(cols))
            .ok_or_else(|| {
                anyhow!(
                    "DP table of {} x {} cells does not fit in memory",
                    capacity as u128 + 1,
                    cols
                )
            })?;
        Ok(Self {
            cells: vec![0; len],
            cols,
        })
    }

    #[inline(always)]
    fn cell(&self, w: usize, i: usize) -> u64 {
        self.cells[w * self.cols + i]
    }

    #[inline(always)]
    fn set(&mut self, w: usize, i: usize, value: u64) {
        self.cells[w * self.cols + i] = value;
    }
}

/// Exact solver. The caller is responsible for keeping
/// `num_items × capacity` within a sane cell budget; the table is
/// materialized in full.
pub fn solve(problem: &Problem) -> Result<Solution> {
    let items = problem.items();
    let n = items.len();
    let capacity = usize::try_from(problem.capacity())
        .map_err(|_| anyhow!("Capacity {} exceeds address space", problem.capacity()))?;
    let mut table = Table::new(capacity, n)?;

    // dp[w][i] only reads dp[w][i-1] and dp[w - weight][i-1], both filled
    // before it when walking rows in increasing w
    for w in 0..=capacity {
        for (i, item) in items.iter().enumerate() {
            let without = table.cell(w, i);
            let best = if item.weight() > w as u64 {
                without
            } else {
                let with = table.cell(w - item.weight() as usize, i) + item.value();
                without.max(with)
            };
            table.set(w, i + 1, best);
        }
    }

    let mut taken = vec![false; n];
    let mut w = capacity;
    for i in (1..=n).rev() {
        if table.cell(w, i) != table.cell(w, i - 1) {
            taken[i - 1] = true;
            w -= items[i - 1].weight() as usize;
        }
    }

    let solution = Solution::from_taken(problem, taken, true);
    debug_assert_eq!(solution.total_value, table.cell(capacity, n));
    debug!(
        cells = table.cells.len(),
        total_value = solution.total_value,
        "dynamic programming finished"
    );
    Ok(solution)
}
