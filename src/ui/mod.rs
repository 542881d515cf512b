//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the report form view and
//! the reusable widgets it is built from.

pub mod components;
pub mod views;

pub use components::{MessageDialog, ProgressDialog, TextEditor, TextInput};
pub use views::{FormFocus, ReportAction, ReportView};
