//! # Data Model
//!
//! Identifiers, the design value table and the transition graph. All of them
//! are built once from validated input and never change afterwards.
//!
//! - [`ids`] - `DesignId`, `ScenarioId` and `ScenarioPair`
//! - [`table`] - Surplus values per (design, scenario), in first-seen order
//! - [`transition`] - Adjacency matrices, transition graphs and keyed graph sets

pub mod ids;
pub mod table;
pub mod transition;
