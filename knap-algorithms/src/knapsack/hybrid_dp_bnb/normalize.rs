use anyhow::Result;
use knap_challenges::knapsack::*;

/// A problem whose weights and capacity were divided by `factor`.
/// Values and item order are unchanged, so a selection of the normalized
/// problem is a selection of the original with the same value.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub problem: Problem,
    pub factor: u64,
}

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

pub fn normalize(problem: &Problem) -> Result<Normalized> {
    let factor = match problem
        .items()
        .iter()
        .fold(0, |acc, item| gcd(acc, item.weight()))
    {
        // every weight is zero (or there are no items)
        0 => 1,
        f => f,
    };

    let items = problem
        .items()
        .iter()
        .map(|item| item.with_weight(item.weight() / factor))
        .collect();
    // capacity rounds down: taken weights are multiples of factor
    let problem = Problem::from_items(items, problem.capacity() / factor)?;

    Ok(Normalized { problem, factor })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_handles_zero() {
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(0, 6), 6);
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 13), 1);
    }

    #[test]
    fn weights_and_capacity_shrink_by_common_factor() {
        let problem = Problem::new(&[3, 4, 5], &[6, 0, 9], 20).unwrap();
        let normalized = normalize(&problem).unwrap();
        assert_eq!(normalized.factor, 3);
        assert_eq!(normalized.problem.capacity(), 6);
        let weights: Vec<u64> = normalized.problem.items().iter().map(|i| i.weight()).collect();
        assert_eq!(weights, vec![2, 0, 3]);
        let values: Vec<u64> = normalized.problem.items().iter().map(|i| i.value()).collect();
        assert_eq!(values, vec![3, 4, 5]);
    }

    #[test]
    fn all_zero_weights_use_unit_factor() {
        let problem = Problem::new(&[1, 2], &[0, 0], 7).unwrap();
        let normalized = normalize(&problem).unwrap();
        assert_eq!(normalized.factor, 1);
        assert_eq!(normalized.problem, problem);
    }
}
