//! The message visibility rules: who may read an ornament's message, and when.
//!
//! Two gates compose, with ownership strictly dominant: a guest never sees
//! content or sender regardless of the date, and the tree owner is held off
//! until Christmas morning during the build-up season. Evaluation is pure:
//! the answer depends only on the message, the viewer, and the instant passed
//! in, so it is recomputed on every read rather than cached.

mod evaluator;
mod season;

pub use evaluator::evaluate;
pub use season::season_locked;
