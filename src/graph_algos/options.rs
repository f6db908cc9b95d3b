use std::time::Duration;


/// Budget for a single search
/// Both limits are checked at the top of every loop iteration
/// The default is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchOptions {
    /// Stop once this many nodes have been finalized without reaching the target
    pub max_expansions: Option<usize>,
    /// Stop once the search has run for this long
    pub timeout: Option<Duration>,
}

impl SearchOptions {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}


/// Snapshot handed to a search checkpoint before each frontier extraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchProgress {
    /// Nodes finalized so far
    pub expanded: usize,
    /// Frontier entries, stale duplicates included
    pub frontier_len: usize,
    /// Cost of the entry about to be extracted
    pub next_cost: f64,
}
