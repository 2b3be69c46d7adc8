use crate::tree::{JsonTree, NodePath};
use h2save_types::NormalizedError;

/// Capability that turns JSON text into an interactive tree.
pub trait TreeWidget {
    type Handle;

    fn create(&mut self, json: &str) -> Result<Self::Handle, String>;
    fn destroy(&mut self, handle: Self::Handle);
    fn expand(&mut self, handle: &mut Self::Handle);
    fn collapse(&mut self, handle: &mut Self::Handle);
    /// Returns `false` when `path` does not name a foldable node.
    fn toggle_node(&mut self, handle: &mut Self::Handle, path: &NodePath) -> bool;
}

/// [`TreeWidget`] backed by [`JsonTree`]; counts the handles it has alive.
#[derive(Debug, Default)]
pub struct JsonTreeWidget {
    live: usize,
}

impl JsonTreeWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_handles(&self) -> usize {
        self.live
    }
}

impl TreeWidget for JsonTreeWidget {
    type Handle = JsonTree;

    fn create(&mut self, json: &str) -> Result<JsonTree, String> {
        let tree = JsonTree::parse(json).map_err(|e| e.to_string())?;
        self.live += 1;
        Ok(tree)
    }

    fn destroy(&mut self, handle: JsonTree) {
        drop(handle);
        self.live = self.live.saturating_sub(1);
    }

    fn expand(&mut self, handle: &mut JsonTree) {
        handle.expand_all();
    }

    fn collapse(&mut self, handle: &mut JsonTree) {
        handle.collapse_all();
    }

    fn toggle_node(&mut self, handle: &mut JsonTree, path: &NodePath) -> bool {
        handle.toggle(path)
    }
}

/// Owns at most one rendered tree.
pub struct TreePresenter<W: TreeWidget> {
    widget: W,
    current: Option<W::Handle>,
    expand_on_open: bool,
}

impl<W: TreeWidget> TreePresenter<W> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            current: None,
            expand_on_open: false,
        }
    }

    /// Expand every node of each newly presented tree.
    pub fn with_expand_on_open(mut self, expand_on_open: bool) -> Self {
        self.expand_on_open = expand_on_open;
        self
    }

    /// Replace the current tree with one built from `json`.
    ///
    /// The old tree is destroyed first, so a parse failure leaves no tree.
    pub fn present(&mut self, json: &str) -> Result<(), NormalizedError> {
        self.clear();

        let mut handle = self
            .widget
            .create(json)
            .map_err(NormalizedError::presentation)?;
        if self.expand_on_open {
            self.widget.expand(&mut handle);
        }
        self.current = Some(handle);
        Ok(())
    }

    /// Destroy the current tree, if any.
    pub fn clear(&mut self) {
        if let Some(old) = self.current.take() {
            self.widget.destroy(old);
        }
    }

    pub fn tree(&self) -> Option<&W::Handle> {
        self.current.as_ref()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn expand_all(&mut self) {
        if let Some(handle) = self.current.as_mut() {
            self.widget.expand(handle);
        }
    }

    pub fn collapse_all(&mut self) {
        if let Some(handle) = self.current.as_mut() {
            self.widget.collapse(handle);
        }
    }

    pub fn toggle(&mut self, path: &NodePath) -> bool {
        match self.current.as_mut() {
            Some(handle) => self.widget.toggle_node(handle, path),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use h2save_types::ErrorKind;

    #[test]
    fn test_second_present_leaves_one_live_handle() {
        let mut presenter = TreePresenter::new(JsonTreeWidget::new());
        presenter.present(r#"{"a":1}"#).unwrap();
        presenter.present(r#"{"b":[1,2]}"#).unwrap();

        assert_eq!(presenter.widget().live_handles(), 1);
        let root = presenter.tree().unwrap().root();
        assert_eq!(root.children[0].key.as_deref(), Some("b"));
    }

    #[test]
    fn test_malformed_json_destroys_old_tree() {
        let mut presenter = TreePresenter::new(JsonTreeWidget::new());
        presenter.present(r#"{"a":1}"#).unwrap();

        let err = presenter.present("{not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Presentation);
        assert!(err.message().starts_with("Could not display savefile tree: "));
        assert!(presenter.tree().is_none());
        assert_eq!(presenter.widget().live_handles(), 0);
    }

    #[test]
    fn test_expand_on_open() {
        let mut presenter = TreePresenter::new(JsonTreeWidget::new()).with_expand_on_open(true);
        presenter.present(r#"{"a":{"b":{"c":1}}}"#).unwrap();
        assert_eq!(presenter.tree().unwrap().visible_rows().len(), 4);
    }

    #[test]
    fn test_fold_operations_without_tree_are_noops() {
        let mut presenter = TreePresenter::new(JsonTreeWidget::new());
        presenter.expand_all();
        presenter.collapse_all();
        assert!(!presenter.toggle(&NodePath::root()));
        assert!(presenter.tree().is_none());
    }
}
