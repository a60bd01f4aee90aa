//! Projection module - expanding proposal sections against phase templates.
//!
//! # Components
//!
//! - `TemplateCatalog` - static phase/task templates keyed by engagement kind
//! - `build_preview` - deterministic expansion into milestones, task lists and tasks

mod preview;
mod templates;

pub use preview::{
    build_preview, Preview, PreviewMilestone, PreviewProject, PreviewTask, PreviewTaskList,
    TaskListSource,
};
pub use templates::{PhaseTemplate, ProjectTemplate, TemplateCatalog, TemplateKey};
