use knap_challenges::knapsack::*;
use tracing::debug;

/// Node allowance for one search. Owned by the caller and threaded through
/// the search explicitly, so a solver can be run any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBudget {
    remaining: u64,
    visited: u64,
}

impl SearchBudget {
    pub fn new(max_nodes: u64) -> Self {
        Self {
            remaining: max_nodes,
            visited: 0,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(u64::MAX)
    }

    /// Spends one node. Returns false, without spending, once nothing is left.
    pub fn try_visit(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.visited += 1;
        true
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn visited(&self) -> u64 {
        self.visited
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Value of a finished subtree, and whether that subtree was fully explored.
#[derive(Debug, Clone, Copy)]
struct Outcome {
    value: u64,
    exact: bool,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    /// Exclude child is running.
    Exclude,
    /// Include child is running; the exclude child finished with `without`.
    Include { without: u64 },
}

#[derive(Debug)]
struct Frame {
    index: usize,
    capacity: u64,
    value: u64,
    step: Step,
}

struct Search<'a> {
    items: &'a [Item],
    stack: Vec<Frame>,
    path: Vec<bool>,
    incumbent: Vec<bool>,
    incumbent_value: u64,
}

impl<'a> Search<'a> {
    /// Visits the node deciding `items[index]`. Leaves and truncated nodes
    /// resolve immediately; inner nodes are pushed and resolve later.
    fn enter(
        &mut self,
        budget: &mut SearchBudget,
        index: usize,
        capacity: u64,
        value: u64,
    ) -> Option<Outcome> {
        if !budget.try_visit() {
            return Some(Outcome {
                value: self.incumbent_value,
                exact: false,
            });
        }
        if index + 1 == self.items.len() {
            return Some(self.leaf(index, capacity, value));
        }
        self.stack.push(Frame {
            index,
            capacity,
            value,
            step: Step::Exclude,
        });
        None
    }

    fn leaf(&mut self, index: usize, capacity: u64, value: u64) -> Outcome {
        let item = self.items[index];
        let fits = item.weight() <= capacity;
        let value = if fits { value + item.value() } else { value };
        if value > self.incumbent_value {
            self.incumbent.copy_from_slice(&self.path);
            self.incumbent[index] = fits;
            self.incumbent_value = value;
        }
        Outcome { value, exact: true }
    }

    fn run(&mut self, budget: &mut SearchBudget, capacity: u64) -> Outcome {
        let mut pending = self.enter(budget, 0, capacity, 0);
        loop {
            let Some(outcome) = pending.take() else {
                // a node was just pushed: its exclude branch goes first
                let Some(frame) = self.stack.last() else {
                    unreachable!("enter only defers after pushing a frame");
                };
                let (index, capacity, value) = (frame.index + 1, frame.capacity, frame.value);
                pending = self.enter(budget, index, capacity, value);
                continue;
            };
            let Some(frame) = self.stack.last_mut() else {
                return outcome;
            };
            match frame.step {
                Step::Exclude => {
                    let item = self.items[frame.index];
                    // the include branch is only worth budget once the
                    // exclude branch is known to be exact
                    if outcome.exact && item.weight() <= frame.capacity {
                        frame.step = Step::Include {
                            without: outcome.value,
                        };
                        let index = frame.index;
                        let capacity = frame.capacity - item.weight();
                        let value = frame.value + item.value();
                        self.path[index] = true;
                        pending = self.enter(budget, index + 1, capacity, value);
                    } else {
                        self.stack.pop();
                        pending = Some(outcome);
                    }
                }
                Step::Include { without } => {
                    let index = frame.index;
                    self.path[index] = false;
                    self.stack.pop();
                    pending = Some(if outcome.value > without {
                        outcome
                    } else {
                        Outcome {
                            value: without,
                            exact: outcome.exact,
                        }
                    });
                }
            }
        }
    }
}

pub fn solve(problem: &Problem, budget: &mut SearchBudget) -> Solution {
    solve_with_incumbent(problem, Solution::empty(problem.num_items()), budget)
}

/// Depth-first include/exclude search in item order, bounded by `budget`.
///
/// `incumbent` seeds the best known selection and must be feasible. The
/// result is the best selection found, flagged optimal only if the whole tree
/// was explored before the budget ran out.
pub fn solve_with_incumbent(
    problem: &Problem,
    incumbent: Solution,
    budget: &mut SearchBudget,
) -> Solution {
    let n = problem.num_items();
    if n == 0 {
        return Solution {
            is_optimal: true,
            ..incumbent
        };
    }

    let mut search = Search {
        items: problem.items(),
        stack: Vec::with_capacity(n),
        path: vec![false; n],
        incumbent: incumbent.taken,
        incumbent_value: incumbent.total_value,
    };
    let outcome = search.run(budget, problem.capacity());

    debug!(
        visited = budget.visited(),
        exhausted = !outcome.exact,
        total_value = search.incumbent_value,
        "branch-and-bound finished"
    );
    Solution {
        taken: search.incumbent,
        total_value: search.incumbent_value,
        is_optimal: outcome.exact,
    }
}
