//! Explicit generation context carrying the random source and an optional time budget.

use std::time::{Duration, Instant};

use crate::{
    chooser::{Chooser, RandomChooser},
    error::{MazeError, Result},
};

/// Number of carving steps between two clock reads.
const BUDGET_CHECK_INTERVAL: u32 = 256;

/// State threaded through one or more generation calls.
///
/// This structure replaces any process-wide random generator: every random decision made while
/// building a maze is drawn from the chooser stored here, so two contexts built from the same seed
/// produce the same maze.
pub struct GenerationContext {
    /// Selector used for every random decision.
    chooser: Box<dyn Chooser>,
    /// Longest a single carving pass may run before it is abandoned.
    budget: Option<Duration>,
}

impl GenerationContext {
    /// Builds a context around any chooser, typically a scripted one in tests.
    pub fn with_chooser<C: Chooser + 'static>(chooser: C) -> Self {
        Self {
            chooser: Box::new(chooser),
            budget: None,
        }
    }

    /// Builds a deterministic context from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_chooser(RandomChooser::seeded(seed))
    }

    /// Builds a context drawing from process entropy.
    pub fn from_entropy() -> Self {
        Self::with_chooser(RandomChooser::from_entropy())
    }

    /// Caps the wall-clock time each carving pass may take.
    #[must_use]
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Returns the configured budget, if any.
    pub const fn budget(&self) -> Option<Duration> {
        self.budget
    }

    /// Borrows the chooser for one random decision.
    pub(crate) fn chooser(&mut self) -> &mut dyn Chooser {
        &mut *self.chooser
    }

    /// Starts timing a carving pass against the configured budget.
    pub(crate) fn stopwatch(&self) -> Stopwatch {
        Stopwatch {
            started: Instant::now(),
            budget: self.budget,
            steps: 0,
        }
    }
}

/// Tracks how long a carving pass has been running.
pub(crate) struct Stopwatch {
    /// Moment the pass started.
    started: Instant,
    /// Budget copied from the context.
    budget: Option<Duration>,
    /// Steps taken so far.
    steps: u32,
}

impl Stopwatch {
    /// Records one carving step and fails once the budget is spent.
    ///
    /// The clock is read on the first step and then every [`BUDGET_CHECK_INTERVAL`] steps.
    pub(crate) fn tick(&mut self) -> Result<()> {
        let due = self.steps % BUDGET_CHECK_INTERVAL == 0;
        self.steps = self.steps.wrapping_add(1);

        match self.budget {
            Some(budget) if due && self.started.elapsed() >= budget => {
                log::warn!(
                    "maze generation abandoned after {} steps, budget of {budget:?} spent",
                    self.steps
                );
                Err(MazeError::BudgetExceeded(budget))
            }
            _ => Ok(()),
        }
    }
}
