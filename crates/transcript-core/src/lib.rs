//! transcript-core — Grade scale, semester aggregation, and results compilation.
//!
//! This crate defines the enrollment data model, the collaborator traits, and
//! the pure aggregation logic that turns graded enrollments into semester
//! summaries and an overall academic standing.

pub mod aggregate;
pub mod compiler;
pub mod error;
pub mod grouping;
pub mod model;
pub mod normalize;
pub mod results;
pub mod scale;
pub mod traits;

pub use compiler::compile;
pub use error::{ErrorKind, ResultsError};
pub use results::StudentResults;
