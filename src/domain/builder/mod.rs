//! Builder module - drafting proposal sections and summary from an assessment.
//!
//! # Components
//!
//! - `AutoBuilder` - selection, shape decision, section synthesis
//! - `summary` - executive summary prose and worst-function detection
//!
//! Everything here is pure. Output depends only on the set of input
//! processes, never on their order.

mod auto_builder;
mod summary;

pub use auto_builder::{AutoBuildInput, AutoBuildOutput, AutoBuilder, GroupingMode, PER_PROCESS_THRESHOLD};
pub use summary::{worst_function, FunctionHealth};
