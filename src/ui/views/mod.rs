//! Application views (screens).

mod report;

pub use report::{FormFocus, ReportAction, ReportView};
