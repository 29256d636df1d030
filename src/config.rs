//! Configuration of the solver and of the algorithms built on top of it.
//!
//! All settings have defaults; the command line interface overrides individual fields.

/// Strategy used to select the entering column.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PivotRuleKind {
    /// Lowest index with an improving reduced cost (Bland's rule). Never cycles.
    #[default]
    FirstProfitable,
    /// Largest improving reduced cost (Dantzig's rule). Usually fewer pivots, may cycle on
    /// degenerate problems, in which case the iteration limit applies.
    SteepestDescent,
}

/// Tolerances and limits of the simplex solver.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplexConfig {
    /// Tableau entries with a smaller absolute value are not used as pivots.
    pub pivot_tolerance: f64,
    /// Reduced costs with a smaller absolute value count as zero.
    pub optimality_tolerance: f64,
    /// Largest artificial infeasibility, relative to the largest right-hand side, that still
    /// counts as feasible.
    pub feasibility_tolerance: f64,
    /// Maximum number of iterations over both phases.
    pub max_iterations: usize,
    /// Entering column selection.
    pub pivot_rule: PivotRuleKind,
}

impl Default for SimplexConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1e-9,
            optimality_tolerance: 1e-9,
            feasibility_tolerance: 1e-7,
            max_iterations: 100_000,
            pivot_rule: PivotRuleKind::default(),
        }
    }
}

/// Interpretation of shortest path solver output.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPathConfig {
    /// An arc is on the path if its dual value (node-potential formulation) or flow (arc-flow
    /// formulation) exceeds this value. Both are 0 or 1 at a vertex solution.
    pub on_path_threshold: f64,
}

impl Default for ShortestPathConfig {
    fn default() -> Self {
        Self { on_path_threshold: 0.5 }
    }
}

/// Settings of the parametric shortage penalty loop.
#[derive(Clone, Debug, PartialEq)]
pub struct ParametricConfig {
    /// Shortage below this value counts as zero. The penalty is raised to `(1 + epsilon)` times
    /// the sensitivity bound in every iteration.
    pub epsilon: f64,
    /// Number of solves after which the loop gives up.
    pub max_iterations: usize,
}

impl Default for ParametricConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-4,
            max_iterations: 100,
        }
    }
}
