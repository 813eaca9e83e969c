//! One editing session: the live document, its history, local storage and
//! the export busy flag.
//!
//! Every editing method runs synchronously: it applies a pure operation to
//! the current snapshot and records the result. Export takes a point-in-time
//! render and hands it off, so later edits never reach an in-flight export.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::BuilderConfig;
use crate::document::{seed_document, ResumeDocument, TemplateId};
use crate::editing::{self, Edit, History, LayoutEdit, ListItem, ListPath};
use crate::errors::{EditError, ExportError, HistoryError, ReorderError, StorageError};
use crate::export::{self, ExportedPdf};
use crate::render::{render, RenderedView};
use crate::storage::{FileStore, LocalStore};

pub struct Session {
    history: History,
    store: Arc<dyn LocalStore>,
    export_scale: f32,
    exporting: Arc<AtomicBool>,
}

impl Session {
    /// Starts from the seed document with file storage under
    /// `config.storage_dir`.
    pub fn start(config: &BuilderConfig) -> Self {
        Self::with_store(Arc::new(FileStore::new(&config.storage_dir)), config)
    }

    pub fn with_store(store: Arc<dyn LocalStore>, config: &BuilderConfig) -> Self {
        info!(history_limit = config.history_limit, "resume session started");
        Self {
            history: History::with_limit(seed_document(), config.history_limit),
            store,
            export_scale: config.export_scale,
            exporting: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The live document.
    pub fn document(&self) -> &ResumeDocument {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn commit(&mut self, next: ResumeDocument) -> &ResumeDocument {
        self.history.record(next);
        self.history.current()
    }

    // ── editing ─────────────────────────────────────────────────────────────

    pub fn set(&mut self, edit: &Edit) -> Result<&ResumeDocument, EditError> {
        let next = editing::set(self.document(), edit)?;
        debug!(path = %edit, "field updated");
        Ok(self.commit(next))
    }

    /// [`Session::set`] addressed by a dotted path such as
    /// `experience.0.company`.
    pub fn set_path(&mut self, path: &str, value: Value) -> Result<&ResumeDocument, EditError> {
        let edit = Edit::from_path(path, value)?;
        self.set(&edit)
    }

    pub fn add_item(
        &mut self,
        list: ListPath,
        item: ListItem,
    ) -> Result<&ResumeDocument, EditError> {
        let next = editing::add_list_item(self.document(), list, item)?;
        debug!(%list, "list item added");
        Ok(self.commit(next))
    }

    pub fn remove_item(
        &mut self,
        list: ListPath,
        index: usize,
    ) -> Result<&ResumeDocument, EditError> {
        match editing::remove_list_item(self.document(), list, index) {
            Ok(next) => {
                debug!(%list, index, "list item removed");
                Ok(self.commit(next))
            }
            Err(e) => {
                warn!(%list, index, error = %e, "list item not removed");
                Err(e)
            }
        }
    }

    /// Moves a section in the display order. Moving onto the same index
    /// records nothing.
    pub fn move_section(
        &mut self,
        from: usize,
        to: usize,
    ) -> Result<&ResumeDocument, ReorderError> {
        let next = editing::move_section(self.document(), from, to)?;
        if from == to {
            return Ok(self.document());
        }
        Ok(self.commit(next))
    }

    pub fn move_item(
        &mut self,
        list: ListPath,
        from: usize,
        to: usize,
    ) -> Result<&ResumeDocument, ReorderError> {
        let next = editing::move_list_item(self.document(), list, from, to)?;
        if from == to {
            return Ok(self.document());
        }
        Ok(self.commit(next))
    }

    pub fn select_template(&mut self, template: TemplateId) -> &ResumeDocument {
        if self.document().layout.template == template {
            return self.document();
        }
        let mut next = self.document().clone();
        next.layout.template = template;
        debug!(path = %Edit::Layout(LayoutEdit::Template(template)), "template selected");
        self.commit(next)
    }

    pub fn undo(&mut self) -> Result<&ResumeDocument, HistoryError> {
        self.history.undo()
    }

    pub fn redo(&mut self) -> Result<&ResumeDocument, HistoryError> {
        self.history.redo()
    }

    // ── rendering & export ──────────────────────────────────────────────────

    /// Renders the live document with its selected template.
    pub fn render(&self) -> RenderedView {
        let doc = self.document();
        render(doc, doc.layout.template)
    }

    /// Captures the current render for export. Fails with
    /// [`ExportError::Busy`] while another export from this session is
    /// still running.
    pub fn begin_export(&self) -> Result<PendingExport, ExportError> {
        if self
            .exporting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("export requested while another is in progress");
            return Err(ExportError::Busy);
        }
        let guard = BusyGuard(Arc::clone(&self.exporting));

        Ok(PendingExport {
            view: self.render(),
            full_name: self.document().full_name().to_string(),
            scale: self.export_scale,
            _guard: guard,
        })
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::Acquire)
    }

    // ── persistence ─────────────────────────────────────────────────────────

    pub fn save(&self) -> Result<(), StorageError> {
        self.store.save(self.document())
    }

    /// Replaces the live document with the stored one. History collapses to
    /// that single snapshot.
    pub fn load(&mut self) -> Result<&ResumeDocument, StorageError> {
        let doc = self.store.load()?;
        self.history.reset(doc);
        info!("resume loaded from local storage");
        Ok(self.history.current())
    }

    /// Ends the session, returning the final document.
    pub fn end(self) -> ResumeDocument {
        info!(snapshots = self.history.len(), "resume session ended");
        self.history.current().clone()
    }
}

/// Clears the session's busy flag when the export finishes or is dropped.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A captured render waiting to be exported.
pub struct PendingExport {
    view: RenderedView,
    full_name: String,
    scale: f32,
    _guard: BusyGuard,
}

impl PendingExport {
    pub fn view(&self) -> &RenderedView {
        &self.view
    }

    pub async fn run(self) -> Result<ExportedPdf, ExportError> {
        let PendingExport {
            view,
            full_name,
            scale,
            _guard,
        } = self;
        export::export(view, full_name, scale).await
    }
}
