use knap_challenges::knapsack::*;
use proptest::prelude::*;

const EXAMPLE: &str = "4 11\n8 4\n10 5\n15 8\n4 3\n";

#[test]
fn test_parse_problem() {
    let problem: Problem = EXAMPLE.parse().unwrap();
    assert_eq!(problem.num_items(), 4);
    assert_eq!(problem.capacity(), 11);

    let items = problem.items();
    assert_eq!(items[2].index(), 2);
    assert_eq!(items[2].value(), 15);
    assert_eq!(items[2].weight(), 8);
    assert_eq!(items[0].density(), 2.0);
}

#[test]
fn test_parse_problem_tolerates_layout() {
    let problem: Problem = "  2   7\r\n\n3 4\n  5 6  \n\n".parse().unwrap();
    assert_eq!(problem.num_items(), 2);
    assert_eq!(problem.items()[1].weight(), 6);
}

#[test]
fn test_parse_problem_rejects_malformed_input() {
    assert!("".parse::<Problem>().is_err());
    assert!("3".parse::<Problem>().is_err());
    assert!("2 10\n1 2\n".parse::<Problem>().is_err());
    assert!("1 10\n1\n".parse::<Problem>().is_err());
    assert!("1 10\n1 2\n3 4\n".parse::<Problem>().is_err());
    assert!("1 10\nx 2\n".parse::<Problem>().is_err());
    assert!("1 10\n-1 2\n".parse::<Problem>().is_err());
    assert!("1 -10\n1 2\n".parse::<Problem>().is_err());
}

#[test]
fn test_parse_error_names_line() {
    let err = "2 10\n1 2\n3 oops\n".parse::<Problem>().unwrap_err();
    assert!(format!("{:#}", err).contains("line 3"));
}

#[test]
fn test_huge_item_count_does_not_allocate() {
    let err = "18446744073709551615 10\n1 2\n".parse::<Problem>().unwrap_err();
    assert!(err.to_string().contains("Expected"));
}

#[test]
fn test_zero_weight_density_is_infinite() {
    let item = Item::new(0, 5, 0);
    assert!(item.density().is_infinite());
    assert_eq!(Item::new(1, 0, 0).density(), f64::INFINITY);
}

#[test]
fn test_new_rejects_mismatched_lengths() {
    assert!(Problem::new(&[1, 2], &[1], 5).is_err());
}

#[test]
fn test_new_rejects_value_overflow() {
    assert!(Problem::new(&[u64::MAX, 1], &[1, 1], 5).is_err());
}

#[test]
fn test_from_items_checks_indices() {
    let items = vec![Item::new(0, 1, 1), Item::new(2, 1, 1)];
    assert!(Problem::from_items(items, 3).is_err());
    let items = vec![Item::new(0, 1, 1), Item::new(1, 1, 1)];
    assert!(Problem::from_items(items, 3).is_ok());
}

#[test]
fn test_format_problem() {
    let problem: Problem = EXAMPLE.parse().unwrap();
    assert_eq!(problem.to_string(), EXAMPLE.trim_end());
    assert_eq!(Problem::new(&[], &[], 3).unwrap().to_string(), "0 3");
}

#[test]
fn test_format_solution() {
    let solution = Solution {
        taken: vec![false, false, true, true],
        total_value: 19,
        is_optimal: true,
    };
    assert_eq!(solution.to_string(), "19 1\n0 0 1 1");
    assert_eq!(Solution::empty(3).to_string(), "0 0\n0 0 0");
}

#[test]
fn test_parse_solution() {
    let solution: Solution = "19 1\n0 0 1 1\n".parse().unwrap();
    assert_eq!(solution.taken, vec![false, false, true, true]);
    assert_eq!(solution.total_value, 19);
    assert!(solution.is_optimal);
    assert_eq!(solution.selected_items(), vec![2, 3]);

    assert!("19\n0 1".parse::<Solution>().is_err());
    assert!("19 2\n0 1".parse::<Solution>().is_err());
    assert!("19 1\n0 3".parse::<Solution>().is_err());
    assert!("19 1\n0 1\n1".parse::<Solution>().is_err());
}

#[test]
fn test_parse_empty_selection() {
    let solution: Solution = Solution::from_taken(&Problem::new(&[], &[], 0).unwrap(), vec![], true)
        .to_string()
        .parse()
        .unwrap();
    assert!(solution.taken.is_empty());
    assert_eq!(solution.total_value, 0);
}

#[test]
fn test_verify_solution() {
    let problem: Problem = EXAMPLE.parse().unwrap();

    let valid = Solution::from_taken(&problem, vec![false, false, true, true], true);
    assert_eq!(valid.total_value, 19);
    assert!(problem.verify_solution(&valid).is_ok());

    let overweight = Solution::from_taken(&problem, vec![true, true, true, false], false);
    assert_eq!(overweight.total_weight(&problem), 17);
    assert!(problem.verify_solution(&overweight).is_err());

    let mut wrong_value = valid.clone();
    wrong_value.total_value = 20;
    assert!(problem.verify_solution(&wrong_value).is_err());

    let wrong_length = Solution::empty(3);
    assert!(problem.verify_solution(&wrong_length).is_err());
}

#[test]
fn test_solution_json() {
    let solution = Solution {
        taken: vec![true, false],
        total_value: 3,
        is_optimal: false,
    };
    let json = serde_json::to_string(&solution).unwrap();
    assert_eq!(
        json,
        r#"{"taken":[true,false],"total_value":3,"is_optimal":false}"#
    );
    assert_eq!(serde_json::from_str::<Solution>(&json).unwrap(), solution);
}

#[test]
fn test_generate_instance_is_deterministic() {
    let track = Track {
        num_items: 40,
        max_value: 100,
        max_weight: 30,
    };
    let a = Problem::generate_instance(42, &track).unwrap();
    let b = Problem::generate_instance(42, &track).unwrap();
    let c = Problem::generate_instance(43, &track).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);

    assert_eq!(a.num_items(), 40);
    let total_weight: u64 = a.items().iter().map(|item| item.weight()).sum();
    assert_eq!(a.capacity(), total_weight / 2);
    assert!(a
        .items()
        .iter()
        .all(|item| (1..=30).contains(&item.weight()) && item.value() <= 100));
}

#[test]
fn test_generate_instance_rejects_zero_weight_range() {
    let track = Track {
        max_weight: 0,
        ..Track::default()
    };
    assert!(Problem::generate_instance(0, &track).is_err());
}

proptest! {
    #[test]
    fn formatted_selection_resums_to_total_value(
        seed in any::<u64>(),
        num_items in 0usize..30,
        mask in any::<u32>(),
    ) {
        let track = Track { num_items, ..Track::default() };
        let problem = Problem::generate_instance(seed, &track).unwrap();
        let taken: Vec<bool> = (0..num_items).map(|i| mask >> i & 1 == 1).collect();
        let solution = Solution::from_taken(&problem, taken, false);

        let reparsed: Solution = solution.to_string().parse().unwrap();
        let resummed: u64 = reparsed
            .selected_items()
            .into_iter()
            .map(|i| problem.items()[i].value())
            .sum();
        prop_assert_eq!(resummed, solution.total_value);
        prop_assert_eq!(reparsed, solution);
    }

    #[test]
    fn problem_text_round_trips(
        values in proptest::collection::vec(0u64..1000, 0..20),
        capacity in 0u64..10_000,
    ) {
        let weights: Vec<u64> = values.iter().map(|v| v % 17).collect();
        let text = format!(
            "{} {}\n{}",
            values.len(),
            capacity,
            values
                .iter()
                .zip(&weights)
                .map(|(v, w)| format!("{} {}", v, w))
                .collect::<Vec<_>>()
                .join("\n")
        );
        let parsed: Problem = text.parse().unwrap();
        prop_assert_eq!(parsed, Problem::new(&values, &weights, capacity).unwrap());
    }
}

#[test]
fn test_solution_from_json_map() {
    let map = serde_json::json!({"taken": [false, true], "total_value": 7, "is_optimal": true});
    let map = map.as_object().unwrap().clone();
    let solution = Solution::try_from(map).unwrap();
    assert_eq!(solution.selected_items(), vec![1]);

    let bad = serde_json::json!({"taken": "nope"}).as_object().unwrap().clone();
    assert!(Solution::try_from(bad).is_err());
}
