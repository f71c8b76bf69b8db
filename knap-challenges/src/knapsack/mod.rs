mod text;
use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{from_value, Map, Value};

/// A single candidate item. Immutable once built; `index` is the position of
/// the item in the original input.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    index: usize,
    value: u64,
    weight: u64,
}

impl Item {
    pub fn new(index: usize, value: u64, weight: u64) -> Self {
        Self {
            index,
            value,
            weight,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Value per unit of weight. Weightless items are infinitely dense.
    pub fn density(&self) -> f64 {
        if self.weight == 0 {
            f64::INFINITY
        } else {
            self.value as f64 / self.weight as f64
        }
    }

    /// Same item with its weight replaced, used when rescaling a problem.
    pub fn with_weight(&self, weight: u64) -> Self {
        Self { weight, ..*self }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub num_items: usize,
    pub max_value: u64,
    pub max_weight: u64,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            num_items: 50,
            max_value: 100,
            max_weight: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    items: Vec<Item>,
    capacity: u64,
}

impl Problem {
    pub fn new(values: &[u64], weights: &[u64], capacity: u64) -> Result<Self> {
        if values.len() != weights.len() {
            return Err(anyhow!(
                "Got {} values but {} weights",
                values.len(),
                weights.len()
            ));
        }
        values
            .iter()
            .try_fold(0u64, |acc, &v| acc.checked_add(v))
            .ok_or_else(|| anyhow!("Total item value overflows u64"))?;
        weights
            .iter()
            .try_fold(0u64, |acc, &w| acc.checked_add(w))
            .ok_or_else(|| anyhow!("Total item weight overflows u64"))?;

        let items = values
            .iter()
            .zip(weights)
            .enumerate()
            .map(|(index, (&value, &weight))| Item::new(index, value, weight))
            .collect();
        Ok(Self { items, capacity })
    }

    /// Builds a problem from items that already carry their final weights.
    /// Indices must be `0..items.len()` in order.
    pub fn from_items(items: Vec<Item>, capacity: u64) -> Result<Self> {
        if let Some((position, item)) = items
            .iter()
            .enumerate()
            .find(|(position, item)| item.index != *position)
        {
            return Err(anyhow!(
                "Item at position {} carries index {}",
                position,
                item.index
            ));
        }
        Ok(Self { items, capacity })
    }

    pub fn generate_instance(seed: u64, track: &Track) -> Result<Self> {
        if track.max_weight == 0 {
            return Err(anyhow!("max_weight must be at least 1"));
        }
        let mut rng = SmallRng::seed_from_u64(seed);

        let weights: Vec<u64> = (0..track.num_items)
            .map(|_| rng.gen_range(1..=track.max_weight))
            .collect();
        let values: Vec<u64> = (0..track.num_items)
            .map(|_| rng.gen_range(0..=track.max_value))
            .collect();

        let capacity = weights
            .iter()
            .try_fold(0u64, |acc, &w| acc.checked_add(w))
            .ok_or_else(|| anyhow!("Total item weight overflows u64"))?
            / 2;

        Self::new(&values, &weights, capacity)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn verify_solution(&self, solution: &Solution) -> Result<()> {
        if solution.taken.len() != self.num_items() {
            return Err(anyhow!(
                "Selection has {} entries but problem has {} items",
                solution.taken.len(),
                self.num_items()
            ));
        }
        let total_weight = solution.total_weight(self);
        if total_weight > self.capacity {
            return Err(anyhow!(
                "Total weight ({}) exceeded capacity ({})",
                total_weight,
                self.capacity
            ));
        }
        let total_value = solution.selected_value(self);
        if total_value != solution.total_value {
            return Err(anyhow!(
                "Reported total value ({}) does not match selected items ({})",
                solution.total_value,
                total_value
            ));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub taken: Vec<bool>,
    pub total_value: u64,
    pub is_optimal: bool,
}

impl TryFrom<Map<String, Value>> for Solution {
    type Error = serde_json::Error;

    fn try_from(v: Map<String, Value>) -> Result<Self, Self::Error> {
        from_value(Value::Object(v))
    }
}

impl Solution {
    /// Nothing taken. Trivially feasible, but not claimed optimal.
    pub fn empty(num_items: usize) -> Self {
        Self {
            taken: vec![false; num_items],
            total_value: 0,
            is_optimal: false,
        }
    }

    pub fn from_taken(problem: &Problem, taken: Vec<bool>, is_optimal: bool) -> Self {
        let mut solution = Self {
            taken,
            total_value: 0,
            is_optimal,
        };
        solution.total_value = solution.selected_value(problem);
        solution
    }

    pub fn selected_items(&self) -> Vec<usize> {
        (0..self.taken.len()).filter(|&i| self.taken[i]).collect()
    }

    pub fn total_weight(&self, problem: &Problem) -> u64 {
        problem
            .items()
            .iter()
            .zip(&self.taken)
            .filter(|&(_, &taken)| taken)
            .map(|(item, _)| item.weight())
            .sum()
    }

    fn selected_value(&self, problem: &Problem) -> u64 {
        problem
            .items()
            .iter()
            .zip(&self.taken)
            .filter(|&(_, &taken)| taken)
            .map(|(item, _)| item.value())
            .sum()
    }
}
