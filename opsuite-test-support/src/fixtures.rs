//! Canonical small instances with known answers.
//!
//! Values are plain tuples and arrays so every crate can build its own
//! typed instance from them.

/// Complete graph on `A..D` whose minimum spanning tree is `AB, AC, AD`.
pub const K4_EDGES: [(&str, &str, i64); 6] = [
    ("A", "B", 1),
    ("A", "C", 2),
    ("A", "D", 3),
    ("B", "C", 4),
    ("B", "D", 5),
    ("C", "D", 6),
];

/// Total weight of the minimum spanning tree of [`K4_EDGES`].
pub const K4_MST_WEIGHT: i64 = 6;

/// Diamond network `0 → {1, 2} → 3` as `(from, to, capacity)`.
pub const DIAMOND_ARCS: [(usize, usize, i64); 4] = [(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)];

/// Maximum `0 → 3` flow through [`DIAMOND_ARCS`].
pub const DIAMOND_MAX_FLOW: i64 = 4;

/// Three plants by four markets.
pub mod transport {
    /// Unit shipping costs.
    pub const COSTS: [[i64; 4]; 3] = [[19, 30, 50, 10], [70, 30, 40, 60], [40, 8, 70, 20]];
    /// Plant capacities.
    pub const SUPPLY: [i64; 3] = [7, 9, 18];
    /// Market requirements.
    pub const DEMAND: [i64; 4] = [5, 8, 7, 14];
    /// Cost of the North-West corner allocation.
    pub const NORTH_WEST_COST: i64 = 1015;
    /// Cost of the least-cost allocation.
    pub const LEAST_COST_COST: i64 = 814;
    /// Optimal total cost.
    pub const OPTIMAL_COST: i64 = 743;

    /// [`COSTS`] as nested vectors.
    #[must_use]
    pub fn cost_rows() -> Vec<Vec<i64>> {
        COSTS.iter().map(|row| row.to_vec()).collect()
    }
}

/// Tasks as `(label, duration, predecessors)`: `T1(2)` then `T2(3)` after it.
pub const TWO_TASK_CHAIN: [(&str, u64, &[&str]); 2] = [("T1", 2, &[]), ("T2", 3, &["T1"])];
