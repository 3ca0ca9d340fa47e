//! Thread-local run context for crash reports.
//!
//! Records which recompute phase is active and which lawmaker or party is
//! being processed. Context lives in thread-local storage so rayon workers
//! keep their own; progress counters are global atomics.

use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

static ROWS_PROCESSED: AtomicUsize = AtomicUsize::new(0);
static ROWS_TOTAL: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static CURRENT_CONTEXT: RefCell<RunContext> = const { RefCell::new(RunContext::new()) };
}

/// What the recompute was doing at a given moment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    pub phase: Option<RunPhase>,
    /// Lawmaker id or party name being processed
    pub current_entity: Option<String>,
}

impl RunContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_entity: None,
        }
    }
}

/// Major stages of a recompute run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Validating weights and reading upstream facts
    Loading,
    Extraction,
    LawmakerScoring,
    Normalization,
    /// Writing rows to the store
    Persistence,
    PartyAggregation,
    /// Rendering query results
    Reporting,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Extraction => write!(f, "extraction"),
            Self::LawmakerScoring => write!(f, "lawmaker_scoring"),
            Self::Normalization => write!(f, "normalization"),
            Self::Persistence => write!(f, "persistence"),
            Self::PartyAggregation => write!(f, "party_aggregation"),
            Self::Reporting => write!(f, "reporting"),
        }
    }
}

/// Restores the previous context when dropped.
pub struct ContextGuard {
    previous: RunContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Enter `phase` until the returned guard drops.
#[must_use]
pub fn set_phase(phase: RunPhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

/// Mark `entity` as the row being processed until the guard drops.
#[must_use]
pub fn set_current_entity(entity: impl Into<String>) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().current_entity = Some(entity.into());
        ContextGuard { previous }
    })
}

pub fn set_progress(processed: usize, total: usize) {
    ROWS_PROCESSED.store(processed, Ordering::Relaxed);
    ROWS_TOTAL.store(total, Ordering::Relaxed);
}

pub fn increment_processed() {
    ROWS_PROCESSED.fetch_add(1, Ordering::Relaxed);
}

#[must_use]
pub fn get_current_context() -> RunContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// (processed, total) rows for the current run
#[must_use]
pub fn get_progress() -> (usize, usize) {
    (
        ROWS_PROCESSED.load(Ordering::Relaxed),
        ROWS_TOTAL.load(Ordering::Relaxed),
    )
}

pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = RunContext::new();
    });
}
