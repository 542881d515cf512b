//! Reusable UI components.

mod dialog;
mod input;
mod loading;
mod text_editor;

pub use dialog::{centered_rect, MessageDialog, ProgressDialog};
pub use input::TextInput;
pub use loading::LoadingIndicator;
pub use text_editor::TextEditor;
