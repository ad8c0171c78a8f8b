//! Per-query search configuration.

use serde::{Deserialize, Serialize};

use crate::costs::CostPolicy;

/// Frontier discipline for the search loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontierStrategy {
    /// Uniform-cost: cheapest node first. Paths are found cheapest-first.
    #[default]
    Ucs,
    /// First-in-first-out: breadth-first by edit count, costs recorded but
    /// not used for ordering.
    Fifo,
}

/// Knobs for one search invocation.
///
/// All fields have serviceable defaults; builders compose:
///
/// ```
/// use natlog_search::{SearchOptions, CostPolicy};
///
/// let opts = SearchOptions::default()
///     .with_max_ticks(100_000)
///     .with_cost_threshold(2.0)
///     .with_policy(CostPolicy::Strict);
/// assert_eq!(opts.max_ticks, 100_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Hard budget on frontier pops; the search stops once spent.
    pub max_ticks: u64,
    /// Children at or above this path cost are never enqueued.
    pub cost_threshold: f32,
    /// Cost policy selecting the transition tables.
    pub policy: CostPolicy,
    /// Frontier discipline.
    pub strategy: FrontierStrategy,
    /// Stop at the first knowledge-base match instead of exhausting the
    /// budget looking for cheaper or additional matches.
    pub stop_on_first: bool,
    /// On budget exhaustion, drain the remaining frontier through the
    /// knowledge-base check (no expansion) before responding.
    pub check_fringe: bool,
    /// Suppress per-tick trace logging.
    pub silent: bool,
    /// Number of recent fact hashes remembered per path to cut short cycles;
    /// 0 disables the check.
    pub cycle_memory: u8,
    /// Truth state the query starts in.
    pub initial_truth: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_ticks: 1_000_000,
            cost_threshold: 4.0,
            policy: CostPolicy::default(),
            strategy: FrontierStrategy::default(),
            stop_on_first: false,
            check_fringe: false,
            silent: false,
            cycle_memory: 0,
            initial_truth: true,
        }
    }
}

impl SearchOptions {
    /// Set the frontier-pop budget.
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Set the path-cost cutoff for enqueueing children.
    #[must_use]
    pub fn with_cost_threshold(mut self, cost_threshold: f32) -> Self {
        self.cost_threshold = cost_threshold;
        self
    }

    /// Select the cost policy.
    #[must_use]
    pub fn with_policy(mut self, policy: CostPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Select the frontier discipline.
    #[must_use]
    pub fn with_strategy(mut self, strategy: FrontierStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Return after the first knowledge-base match.
    #[must_use]
    pub fn with_stop_on_first(mut self, stop_on_first: bool) -> Self {
        self.stop_on_first = stop_on_first;
        self
    }

    /// Check undequeued frontier nodes against the knowledge base on
    /// budget exhaustion.
    #[must_use]
    pub fn with_check_fringe(mut self, check_fringe: bool) -> Self {
        self.check_fringe = check_fringe;
        self
    }

    /// Suppress per-tick trace logging.
    #[must_use]
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Set per-path cycle memory depth (0 disables).
    #[must_use]
    pub fn with_cycle_memory(mut self, cycle_memory: u8) -> Self {
        self.cycle_memory = cycle_memory;
        self
    }

    /// Set the starting truth state.
    #[must_use]
    pub fn with_initial_truth(mut self, initial_truth: bool) -> Self {
        self.initial_truth = initial_truth;
        self
    }

    /// History arena capacity implied by the tick budget.
    ///
    /// One slot per tick plus the start node, saturating at what a `u32`
    /// backpointer can address.
    #[must_use]
    pub fn history_capacity(&self) -> usize {
        let wanted = self.max_ticks.saturating_add(1);
        usize::try_from(wanted.min(u64::from(u32::MAX))).unwrap_or(usize::MAX)
    }
}
