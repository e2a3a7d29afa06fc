//! The `producer` module fabricates synthetic work-item messages and feeds
//! them to the work queue in batches, alternating the two wire forms so both
//! decode paths stay exercised downstream.

pub mod generator;

pub use generator::{LoadGenerator, fabricate};

#[cfg(test)]
mod tests;
