//! The single-slot inline preview and its accept/discard state machine.

use crate::CompletionError;
use scribe_core::{Document, TextSize};

/// Where a preview's text will be inserted if accepted.
///
/// `version` records the document version observed when the preview was
/// shown. The insertion point is only meaningful against that exact
/// snapshot; `accept` refuses to insert if the document has changed since.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub offset: TextSize,
    pub version: u64,
}

impl Anchor {
    pub fn at(doc: &Document, offset: TextSize) -> Self {
        Self {
            offset,
            version: doc.version(),
        }
    }
}

/// One suggested completion, pinned at an anchor. Immutable; the controller
/// replaces previews rather than mutating them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    pub anchor: Anchor,
    pub text: String,
}

/// Maps a preview value onto the host's decoration/annotation API.
///
/// The rendered text must be visually distinct from committed document
/// content (a muted/secondary style) so a preview is never mistaken for
/// inserted code. Implementations hold whatever handle the host needs to
/// place and remove that decoration.
pub trait PreviewRenderer {
    fn render(&mut self, preview: &Preview);
    fn clear(&mut self);
}

/// Owns the single active preview.
///
/// States: `Idle` (no preview) and `Showing` (exactly one). `show` replaces
/// any active preview; `accept` and `discard` return to `Idle` and are
/// no-ops when already idle. The document is mutated only inside `accept`.
#[derive(Debug)]
pub struct PreviewController<R> {
    renderer: R,
    active: Option<Preview>,
}

impl<R: PreviewRenderer> PreviewController<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&Preview> {
        self.active.as_ref()
    }

    pub fn is_showing(&self) -> bool {
        self.active.is_some()
    }

    /// Show a preview, tearing down any existing one first so at most one
    /// ever exists.
    pub fn show(&mut self, anchor: Anchor, text: impl Into<String>) {
        if self.active.is_some() {
            self.renderer.clear();
        }
        let preview = Preview {
            anchor,
            text: text.into(),
        };
        self.renderer.render(&preview);
        self.active = Some(preview);
    }

    /// Insert the active preview's text at its anchor.
    ///
    /// Returns `Ok(false)` when idle (a repeated accept is a no-op, not an
    /// error). If the document changed since `show`, the preview is torn
    /// down, the document is left untouched, and `StaleAnchor` is returned.
    pub fn accept(&mut self, doc: &mut Document) -> Result<bool, CompletionError> {
        let Some(preview) = self.active.take() else {
            return Ok(false);
        };
        self.renderer.clear();

        if preview.anchor.version != doc.version() {
            return Err(CompletionError::StaleAnchor);
        }

        doc.insert(preview.anchor.offset, preview.text)?;
        Ok(true)
    }

    /// Tear down the active preview without touching the document.
    pub fn discard(&mut self) -> bool {
        match self.active.take() {
            Some(_) => {
                self.renderer.clear();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records renderer calls so tests can assert on the visual side effect
    /// without a UI host.
    #[derive(Default)]
    struct RecordingRenderer {
        rendered: Vec<String>,
        clears: usize,
    }

    impl PreviewRenderer for RecordingRenderer {
        fn render(&mut self, preview: &Preview) {
            self.rendered.push(preview.text.clone());
        }

        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    fn controller() -> PreviewController<RecordingRenderer> {
        PreviewController::new(RecordingRenderer::default())
    }

    #[test]
    fn show_replaces_the_active_preview() {
        let doc = Document::new("fn main() {");
        let mut controller = controller();

        controller.show(Anchor::at(&doc, doc.len()), "first");
        controller.show(Anchor::at(&doc, doc.len()), "second");

        assert_eq!(controller.active().unwrap().text, "second");
        assert_eq!(controller.renderer.rendered, vec!["first", "second"]);
        assert_eq!(controller.renderer.clears, 1);
    }

    #[test]
    fn accept_inserts_exactly_once() {
        let mut doc = Document::new("def add(a, b):\n");
        let mut controller = controller();
        let anchor = Anchor::at(&doc, doc.len());

        controller.show(anchor, "    return a + b\n");
        assert!(controller.accept(&mut doc).unwrap());
        assert_eq!(doc.text(), "def add(a, b):\n    return a + b\n");
        assert!(!controller.is_showing());

        // Repeated accept is a no-op.
        let before = doc.clone();
        assert!(!controller.accept(&mut doc).unwrap());
        assert_eq!(doc, before);
    }

    #[test]
    fn discard_leaves_the_document_untouched() {
        let mut doc = Document::new("x = ");
        let before = doc.clone();
        let mut controller = controller();

        controller.show(Anchor::at(&doc, doc.len()), "1");
        assert!(controller.discard());
        assert_eq!(doc, before);
        assert!(!controller.is_showing());
        assert_eq!(controller.renderer.clears, 1);

        // Repeated discard is a no-op.
        assert!(!controller.discard());
        assert_eq!(controller.renderer.clears, 1);
    }

    #[test]
    fn accept_refuses_a_stale_anchor() {
        let mut doc = Document::new("abc");
        let mut controller = controller();
        controller.show(Anchor::at(&doc, TextSize::from(3)), "xyz");

        // The user keeps typing between show() and accept().
        doc.insert(TextSize::from(0), "zzz").unwrap();
        let after_edit = doc.clone();

        let err = controller.accept(&mut doc).unwrap_err();
        assert!(matches!(err, CompletionError::StaleAnchor));
        assert_eq!(doc, after_edit, "stale accept must not mutate the document");
        assert!(!controller.is_showing(), "stale preview is torn down");
        assert_eq!(controller.renderer.clears, 1);
    }

    #[test]
    fn accept_at_interior_anchor() {
        let mut doc = Document::new("()");
        let mut controller = controller();
        controller.show(Anchor::at(&doc, TextSize::from(1)), "x");
        assert!(controller.accept(&mut doc).unwrap());
        assert_eq!(doc.text(), "(x)");
    }
}
