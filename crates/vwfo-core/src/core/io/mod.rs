//! Provides CSV input/output for the VWFO data model.
//!
//! The design table and the transition matrices are read through the
//! [`traits::TableFile`] interface, and computed batches are written back as
//! a single flat CSV table. Separators are explicit [`traits::CsvFormat`]
//! settings; encodings and separators are never guessed.

pub mod designs;
pub mod error;
pub mod report;
pub mod traits;
pub mod transitions;
