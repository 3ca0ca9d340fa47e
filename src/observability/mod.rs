//! Crash reports and logging setup.
//!
//! Install the panic hook at startup, then mark phases as a recompute moves
//! through them:
//!
//! ```ignore
//! use assemblyscore::observability::{set_current_entity, set_phase, RunPhase};
//!
//! let _phase = set_phase(RunPhase::Persistence);
//! for record in &records {
//!     let _row = set_current_entity(record.lawmaker_id.as_str());
//!     store.upsert_lawmaker(record)?;
//! }
//! ```

pub mod context;
pub mod panic_hook;
pub mod tracing;

pub use context::{
    get_current_context, get_progress, increment_processed, reset_context, set_current_entity,
    set_phase, set_progress, ContextGuard, RunContext, RunPhase,
};
pub use panic_hook::install_panic_hook;
pub use self::tracing::{init_tracing, verbosity_directive};
