use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_CELL_BUDGET: u64 = 1_000_000_000;
pub const DEFAULT_NODE_BUDGET: u64 = 1_000_000;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    /// Exact DP runs only while `item_count × normalized_capacity` stays below this
    pub cell_budget: u64,

    /// Branch-and-bound nodes visited before the search is truncated
    pub node_budget: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            cell_budget: DEFAULT_CELL_BUDGET,
            node_budget: DEFAULT_NODE_BUDGET,
        }
    }
}

impl Params {
    pub fn initialize(h: &Option<Map<String, Value>>) -> Self {
        let mut p = Self::default();
        if let Some(m) = h {
            if let Some(v) = m.get("cell_budget").and_then(|v| v.as_u64()) { p.cell_budget = v; }
            if let Some(v) = m.get("node_budget").and_then(|v| v.as_u64()) { p.node_budget = v; }
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn initialize_overlays_known_keys() {
        let h = json!({"node_budget": 10, "unknown": 1, "cell_budget": "nope"});
        let p = Params::initialize(&h.as_object().cloned());
        assert_eq!(p.node_budget, 10);
        assert_eq!(p.cell_budget, DEFAULT_CELL_BUDGET);
        assert_eq!(Params::initialize(&None), Params::default());
    }
}
