use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;
use serde::Deserialize;

/// Picks which pool position serves a single-shot call (reduction or
/// fallback). Returned positions are always `< pool_len`.
pub trait BackendSelector: Send + Sync {
    fn select(&self, pool_len: usize) -> usize;
}

/// Always the same position, clamped into the pool.
pub struct FixedSelector {
    position: usize,
}

impl FixedSelector {
    pub fn new(position: usize) -> Self {
        Self { position }
    }
}

impl BackendSelector for FixedSelector {
    fn select(&self, pool_len: usize) -> usize {
        self.position % pool_len.max(1)
    }
}

/// Cycles through the pool across calls, starting at position 0.
#[derive(Default)]
pub struct RoundRobinSelector {
    next: AtomicUsize,
}

impl RoundRobinSelector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BackendSelector for RoundRobinSelector {
    fn select(&self, pool_len: usize) -> usize {
        self.next.fetch_add(1, Ordering::Relaxed) % pool_len.max(1)
    }
}

/// Uniformly random position per call.
pub struct RandomSelector;

impl BackendSelector for RandomSelector {
    fn select(&self, pool_len: usize) -> usize {
        rand::thread_rng().gen_range(0..pool_len.max(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    Fixed,
    #[default]
    RoundRobin,
    Random,
}

impl SelectionPolicy {
    pub fn build(self) -> Box<dyn BackendSelector> {
        match self {
            SelectionPolicy::Fixed => Box::new(FixedSelector::new(0)),
            SelectionPolicy::RoundRobin => Box::new(RoundRobinSelector::new()),
            SelectionPolicy::Random => Box::new(RandomSelector),
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionPolicy::Fixed => "fixed",
            SelectionPolicy::RoundRobin => "round_robin",
            SelectionPolicy::Random => "random",
        };
        f.write_str(name)
    }
}
