//! # Core Module
//!
//! This module provides the data model and the table I/O that the VWFO engine
//! works on.
//!
//! ## Overview
//!
//! An analysis is described by a set of designs, an ordered sequence of
//! scenarios, a surplus value for every (design, scenario) pair, and for each
//! pair of scenarios a directed graph of allowed design transitions. The core
//! module holds these inputs in validated, immutable form.
//!
//! ## Architecture
//!
//! - **Data Model** ([`models`]) - Identifiers, the design value table and transition graphs
//! - **File I/O** ([`io`]) - CSV readers for inputs and a CSV writer for results
//!
//! ## Key Capabilities
//!
//! - **Eager validation** of missing, duplicate and non-finite surplus values
//! - **Exact design-set matching** between transition matrices and the design table
//! - **Stable ordering** of designs and scenarios by first appearance in the input

pub mod io;
pub mod models;
