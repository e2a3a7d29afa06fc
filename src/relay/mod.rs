//! The `relay` module hosts the consume/republish cycle: take one delivery
//! from the work queue, decode it, derive a priority from the payload,
//! republish onto the prioritized queue, and only then acknowledge the
//! source delivery.
//!
//! Acknowledging after the republish is what makes the hop at-least-once: a
//! crash between the two produces a duplicate downstream, never a loss.

pub mod engine;
pub mod priority;

pub use engine::{Disposition, PriorityRelay};
pub use priority::message_priority;
