//! Resume builder core: the editable resume document, its typed mutators,
//! linear undo/redo history, section/list reordering, the template renderer
//! and the PDF export pipeline.
//!
//! All editing operations are synchronous and pure: they take a document by
//! reference and return a new one. [`Session`] owns the live document and its
//! history for the lifetime of one editing session.

pub mod config;
pub mod document;
pub mod editing;
pub mod errors;
pub mod export;
pub mod render;
pub mod session;
pub mod storage;

pub use config::BuilderConfig;
pub use document::{ResumeDocument, SectionKey, TemplateId};
pub use editing::{Edit, ListItem, ListPath};
pub use errors::{EditError, ExportError, HistoryError, ReorderError, StorageError};
pub use export::{export_filename, ExportedPdf, EXPORT_SCALE};
pub use render::{render, RenderedView};
pub use session::{PendingExport, Session};
pub use storage::{FileStore, LocalStore, MemoryStore};
