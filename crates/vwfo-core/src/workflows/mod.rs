//! # Workflows Module
//!
//! High-level entry points that run the engine over one or more scenario pairs.
//!
//! ## Overview
//!
//! A workflow takes a validated design table, a keyed set of transition
//! graphs and an [`AnalysisConfig`](crate::engine::config::AnalysisConfig),
//! resolves which scenario pairs and designs to report, and runs one
//! independent engine batch per pair. Progress is reported through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter).
//!
//! - **Analysis Workflow** ([`analyze`]) - VWFO over adjacent or explicitly chosen pairs

pub mod analyze;
