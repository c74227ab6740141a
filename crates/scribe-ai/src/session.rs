//! The editor-facing command surface.
//!
//! A session owns the document, the preview controller, the engine, and the
//! in-flight request token. The host's key bindings map 1:1 onto
//! [`trigger_completion`](EditorSession::trigger_completion),
//! [`accept_completion`](EditorSession::accept_completion), and
//! [`discard_completion`](EditorSession::discard_completion).
//!
//! Propagation policy: every failure below this layer becomes "no visible
//! effect" plus a `tracing` diagnostic. Nothing here returns an error to the
//! host.

use crate::preview::{Anchor, PreviewController, PreviewRenderer};
use crate::{CompletionEngine, CompletionError};
use scribe_core::{Document, TextSize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub struct EditorSession<R> {
    document: Document,
    controller: PreviewController<R>,
    engine: CompletionEngine,
    inflight: Option<CancellationToken>,
}

impl<R: PreviewRenderer> EditorSession<R> {
    pub fn new(document: Document, renderer: R, engine: CompletionEngine) -> Self {
        Self {
            document,
            controller: PreviewController::new(renderer),
            engine,
            inflight: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn preview_text(&self) -> Option<&str> {
        self.controller.active().map(|p| p.text.as_str())
    }

    /// Token of the request currently in flight, if any.
    ///
    /// Only populated while a `trigger_completion` future is pending (or was
    /// dropped mid-flight by the host). Hosts can cancel it explicitly; the
    /// next trigger cancels it as well.
    pub fn inflight(&self) -> Option<&CancellationToken> {
        self.inflight.as_ref()
    }

    /// Request a completion at `cursor` and show it as a preview.
    ///
    /// Single-flight policy is cancel-and-replace: a new trigger cancels the
    /// previous request's token before issuing its own, so only the freshest
    /// context can produce a preview.
    pub async fn trigger_completion(&mut self, cursor: TextSize, mode_id: &str) {
        if let Some(previous) = self.inflight.take() {
            previous.cancel();
        }
        let cancel = CancellationToken::new();
        self.inflight = Some(cancel.clone());

        let anchor = Anchor::at(&self.document, cursor.min(self.document.len()));
        let result = self
            .engine
            .complete(&self.document, anchor.offset, mode_id, cancel)
            .await;

        // The session is borrowed exclusively for the length of the await, so
        // the stored token still belongs to this request. It only outlives
        // this call when the host drops the future mid-flight, in which case
        // the next trigger cancels it above.
        self.inflight = None;

        match result {
            Ok(text) => self.controller.show(anchor, text),
            Err(CompletionError::EmptyResponse) => debug!("no completion produced"),
            Err(CompletionError::Cancelled) => debug!("completion request superseded"),
            Err(err) => warn!(error = %err, "completion request failed"),
        }
    }

    /// Insert the active preview at its anchor. No-op when idle.
    pub fn accept_completion(&mut self) {
        match self.controller.accept(&mut self.document) {
            Ok(true) => debug!("completion accepted"),
            Ok(false) => {}
            Err(err) => warn!(error = %err, "completion not inserted"),
        }
    }

    /// Tear down the active preview without touching the document.
    pub fn discard_completion(&mut self) {
        if self.controller.discard() {
            debug!("completion discarded");
        }
    }
}
