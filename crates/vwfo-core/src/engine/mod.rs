//! # Engine Module
//!
//! This module implements the VWFO computation itself on top of the data
//! model in [`crate::core`].
//!
//! ## Overview
//!
//! The engine reads one [`DesignValueTable`](crate::core::models::table::DesignValueTable)
//! and one [`TransitionGraph`](crate::core::models::transition::TransitionGraph)
//! and produces a VWFO value for every design of the chosen scenario pair.
//! It holds no state between calls; every result is a pure function of the
//! immutable inputs.
//!
//! ## Architecture
//!
//! - **Computation** ([`vwfo`]) - The per-design sign sum and the batch over all designs
//! - **Results** ([`batch`]) - Ordered per-design outcomes with collected failures
//! - **Configuration** ([`config`]) - Scenario pair and design selection for analyses
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Validation and computation error kinds
//!
//! ## Key Capabilities
//!
//! - **Filtered outdegree** restricted to the designs a transition graph allows
//! - **Population normalization** by N - 1 regardless of the filtered set size
//! - **Parallel batches** with the `parallel` feature, reported in canonical order
//! - **Collect-and-report failures** so one bad design does not hide the others

pub mod batch;
pub mod config;
pub mod error;
pub mod progress;
pub mod vwfo;
