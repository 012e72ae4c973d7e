//! # VWFO Core Library
//!
//! Computes the Value Weighted Filtered Outdegree (VWFO) of designs across a
//! sequence of scenarios.
//!
//! For design `i` at scenario `k`, VWFO sums the sign of the surplus value
//! change towards every design `j` the transition graph lets `i` reach in
//! scenario `k + 1`, and divides by the number of other designs:
//!
//! ```text
//! VWFO(i, k) = 1 / (N - 1) * sum_j sign(SV(j, k + 1) - SV(i, k)) * Arc(i, j, k)
//! ```
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`DesignValueTable`,
//!   `TransitionGraph`) with eager validation, plus CSV I/O.
//!
//! - **[`engine`]: The Logic Core.** The stateless `VwfoEngine`, per-design
//!   results, configuration, progress reporting and error kinds.
//!
//! - **[`workflows`]: The Public API.** Runs the engine over every requested
//!   scenario pair and collects the results in a deterministic order.

pub mod core;
pub mod engine;
pub mod workflows;
