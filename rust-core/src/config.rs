// Constants

// Exact solvers
pub const PADIC_PRIME: i64 = 9_999_991; // Modulus for p-adic lifting, products of residues fit into i64
pub const PADIC_SOLVER_MIN_ROWS: usize = 16; // Smaller placement systems go straight to elimination

// Search budgets
pub const STATIONARY_STEP_BUDGET: usize = 100_000; // Branches tried before a stationary search gives up

// Topological density
pub const DENSITY_SHELLS: usize = 10; // Shells summed for TD10
pub const DENSITY_COUNT_CAP: usize = 100_000; // Cumulative count at which the density is abandoned

// Keys
pub const KEY_VERSION: &str = "1.0";
