//! Optional row capabilities: editing, edit menus and prefetching.
//!
//! A row item opts into these by returning `Some(self)` from
//! [`RowItem::editing`](super::RowItem::editing) or
//! [`RowItem::prefetching`](super::RowItem::prefetching). Rows that don't are
//! treated as non-editable and never receive prefetch requests.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use lattice_table_core::{EditingStyle, IndexPath};

use crate::host::ListHost;

/// Visual treatment of a swipe action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowActionStyle {
    /// The widget's default look.
    #[default]
    Default,
    /// Highlighted as destructive.
    Destructive,
    /// Plain, non-destructive look.
    Normal,
}

/// Closure invoked when a swipe action is tapped.
pub type RowActionHandler = Arc<dyn Fn(&dyn ListHost, IndexPath) + Send + Sync>;

/// One button revealed by swiping a row.
#[derive(Clone)]
pub struct RowAction {
    /// Button title.
    pub title: String,
    /// Button style.
    pub style: RowActionStyle,
    /// Invoked with the row's index path when tapped.
    pub handler: RowActionHandler,
}

impl RowAction {
    /// Creates a swipe action.
    pub fn new<F>(style: RowActionStyle, title: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&dyn ListHost, IndexPath) + Send + Sync + 'static,
    {
        Self {
            title: title.into(),
            style,
            handler: Arc::new(handler),
        }
    }

    /// Runs the action's handler.
    pub fn trigger(&self, list: &dyn ListHost, path: IndexPath) {
        (self.handler)(list, path);
    }
}

impl fmt::Debug for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction")
            .field("title", &self.title)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// A command from a row's edit menu.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Copy,
    Cut,
    Paste,
    Select,
    SelectAll,
    Delete,
    /// A host-specific command, by name.
    Custom(String),
}

/// Editing behavior of a row.
///
/// Every method has a conservative default, so implementors only override
/// what they support. Note that [`can_edit`](RowEditing::can_edit) and
/// [`can_commit`](RowEditing::can_commit) default to `false`: implementing
/// the trait alone does not make a row deletable.
pub trait RowEditing: Send + Sync {
    /// Whether the row can enter editing mode.
    fn can_edit(&self, _list: &dyn ListHost) -> bool {
        false
    }

    /// Whether a confirmed edit of `style` should be applied.
    ///
    /// When this returns `true` for [`EditingStyle::Delete`], the manager
    /// removes the row through its regular removal path.
    fn can_commit(&self, _style: EditingStyle, _list: &dyn ListHost) -> bool {
        false
    }

    /// Swipe actions to reveal. `None` lets the widget use its default.
    fn edit_actions(&self, _list: &dyn ListHost, _path: IndexPath) -> Option<Vec<RowAction>> {
        None
    }

    /// The editing control shown for the row.
    fn editing_style(&self, _list: &dyn ListHost, _path: IndexPath) -> EditingStyle {
        EditingStyle::Delete
    }

    /// Custom title for the delete confirmation button.
    fn delete_confirmation_title(&self, _list: &dyn ListHost, _path: IndexPath) -> Option<String> {
        None
    }

    /// Whether the row's content indents while editing.
    fn should_indent_while_editing(&self, _list: &dyn ListHost, _path: IndexPath) -> bool {
        true
    }

    fn will_begin_editing(&self, _list: &dyn ListHost, _path: IndexPath) {}

    fn did_end_editing(&self, _list: &dyn ListHost, _path: Option<IndexPath>) {}

    /// The row was removed from the model after a committed delete.
    fn did_remove(&self, _list: &dyn ListHost, _path: IndexPath) {}

    /// The removal animation for a committed delete finished.
    fn did_finish_removing_animation(&self, _list: &dyn ListHost, _path: IndexPath) {}

    /// Whether a long press shows the edit menu.
    fn should_show_menu(&self, _list: &dyn ListHost, _path: IndexPath) -> bool {
        false
    }

    /// Whether `action` appears in the edit menu.
    fn can_perform_action(
        &self,
        _action: &MenuAction,
        _list: &dyn ListHost,
        _path: IndexPath,
        _sender: Option<&(dyn Any + Send + Sync)>,
    ) -> bool {
        false
    }

    fn perform_action(
        &self,
        _action: &MenuAction,
        _list: &dyn ListHost,
        _path: IndexPath,
        _sender: Option<&(dyn Any + Send + Sync)>,
    ) {
    }
}

/// Prefetching behavior of a row.
pub trait RowPrefetching: Send + Sync {
    /// Start preparing data for the row at `path`.
    fn prefetch(&self, list: &dyn ListHost, path: IndexPath);

    /// Stop preparing data for the row at `path`.
    fn cancel_prefetching(&self, _list: &dyn ListHost, _path: IndexPath) {}
}
