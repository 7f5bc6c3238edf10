//! Interfaces between the list manager and the host list widget.
//!
//! The host widget is the thing that actually lays out, draws and recycles
//! row views. Lattice Table never does any of that; it talks to the widget
//! through two sets of interfaces:
//!
//! - [`ListHost`]: commands the manager issues to the widget (register a
//!   template, open and close a batch, apply a delta, scroll, ...)
//! - [`ListDataSource`], [`ListDelegate`] and [`ListPrefetchDataSource`]:
//!   queries and notifications the widget issues back. [`ListManager`]
//!   implements all three and attaches itself to the host on construction.
//!
//! ```text
//! ┌─────────────┐  insert/delete/reload  ┌─────────────┐
//! │ ListManager │───────────────────────>│  ListHost   │
//! │             │<───────────────────────│  (widget)   │
//! └─────────────┘   data source queries  └─────────────┘
//!        │
//!        v
//!  SectionItem / RowItem
//! ```
//!
//! All calls happen on the thread that owns the widget. The `Send + Sync`
//! bounds only let managers and items live inside shared containers.
//!
//! [`ListManager`]: crate::ListManager

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use lattice_table_core::{EditingStyle, IndexPath, IndexSet, Rect, RowAnimation, ScrollPosition};

use crate::item::{MenuAction, RowAction};

/// A type-erased handle to a view owned by the host widget.
///
/// Cells, header views and footer views all travel through the manager as
/// `ViewHandle`s. Clones share the same underlying view.
#[derive(Clone)]
pub struct ViewHandle(Arc<dyn Any + Send + Sync>);

impl ViewHandle {
    /// Wraps a widget view.
    pub fn new<T: Any + Send + Sync>(view: T) -> Self {
        Self(Arc::new(view))
    }

    /// Returns the wrapped view if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns `true` if both handles refer to the same view.
    pub fn ptr_eq(&self, other: &ViewHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewHandle")
            .field(&Arc::as_ptr(&self.0))
            .finish()
    }
}

/// Creates fresh cells for one reuse identifier.
///
/// Registered with the host widget so it can materialize a cell whenever its
/// recycling pool for that identifier is empty.
pub trait CellTemplate: Send + Sync {
    /// Creates a new, unconfigured cell.
    fn make_cell(&self) -> ViewHandle;
}

impl<F> CellTemplate for F
where
    F: Fn() -> ViewHandle + Send + Sync,
{
    fn make_cell(&self) -> ViewHandle {
        self()
    }
}

/// A closure run by the host once a batch's visual transition has finished.
pub type UpdateCompletion = Box<dyn FnOnce() + Send>;

/// Commands the list manager issues to the host list widget.
///
/// Incremental updates are always bracketed by [`begin_updates`] and
/// [`end_updates`]; the host should coalesce every delta issued in between
/// into one visual pass, applying them in the order received.
///
/// [`begin_updates`]: ListHost::begin_updates
/// [`end_updates`]: ListHost::end_updates
pub trait ListHost: Send + Sync {
    /// Teaches the widget how to create cells for `identifier`.
    fn register_template(&self, identifier: &str, template: Arc<dyn CellTemplate>);

    /// Returns a reusable cell for `identifier`, creating one from its
    /// template when the pool is empty.
    fn dequeue_cell(&self, identifier: &str, path: IndexPath) -> Option<ViewHandle>;

    /// Discards all cached layout and re-queries the data source.
    fn reload_data(&self);

    /// Opens a batch of incremental updates.
    fn begin_updates(&self);

    /// Closes the current batch and starts its visual transition.
    fn end_updates(&self);

    /// Closes the current batch and runs `completion` once its visual
    /// transition has finished.
    ///
    /// The default implementation runs `completion` right after
    /// [`end_updates`](ListHost::end_updates), which suits hosts without
    /// animations.
    fn end_updates_with_completion(&self, completion: UpdateCompletion) {
        self.end_updates();
        completion();
    }

    /// Inserts rows at `paths`.
    fn insert_rows(&self, paths: &[IndexPath], animation: RowAnimation);

    /// Deletes rows at `paths`.
    fn delete_rows(&self, paths: &[IndexPath], animation: RowAnimation);

    /// Reloads rows at `paths`.
    fn reload_rows(&self, paths: &[IndexPath], animation: RowAnimation);

    /// Inserts whole sections.
    fn insert_sections(&self, sections: &IndexSet, animation: RowAnimation);

    /// Deletes whole sections.
    fn delete_sections(&self, sections: &IndexSet, animation: RowAnimation);

    /// Reloads whole sections.
    fn reload_sections(&self, sections: &IndexSet, animation: RowAnimation);

    /// Returns the frame of the row at `path`.
    fn rect_for_row(&self, path: IndexPath) -> Rect;

    /// Scrolls until the row at `path` sits at `position`.
    fn scroll_to_row(&self, path: IndexPath, position: ScrollPosition, animated: bool);

    /// Returns `true` if the widget can issue prefetch requests.
    fn supports_prefetching(&self) -> bool {
        true
    }

    /// Attaches the object answering data queries. The host must not keep
    /// it alive.
    fn set_data_source(&self, source: Option<Weak<dyn ListDataSource>>);

    /// Attaches the object receiving interaction callbacks. The host must not
    /// keep it alive.
    fn set_delegate(&self, delegate: Option<Weak<dyn ListDelegate>>);

    /// Attaches the object receiving prefetch requests. The host must not
    /// keep it alive.
    fn set_prefetch_data_source(&self, source: Option<Weak<dyn ListPrefetchDataSource>>);
}

/// Data queries the host widget issues.
pub trait ListDataSource: Send + Sync {
    /// Number of sections.
    fn number_of_sections(&self, list: &dyn ListHost) -> usize;

    /// Number of rows in `section`.
    fn number_of_rows(&self, list: &dyn ListHost, section: usize) -> usize;

    /// A configured cell for the row at `path`.
    fn cell_for_row(&self, list: &dyn ListHost, path: IndexPath) -> Option<ViewHandle>;

    /// Title of the header of `section`.
    fn title_for_header(&self, list: &dyn ListHost, section: usize) -> Option<String>;

    /// Title of the footer of `section`.
    fn title_for_footer(&self, list: &dyn ListHost, section: usize) -> Option<String>;

    /// Whether the row at `path` can enter editing mode.
    fn can_edit_row(&self, list: &dyn ListHost, path: IndexPath) -> bool;

    /// The user confirmed an edit (e.g. swipe-to-delete) on the row at `path`.
    fn commit_edit(&self, list: &dyn ListHost, style: EditingStyle, path: IndexPath);

    /// Whether the row at `path` shows a reordering control.
    fn can_move_row(&self, list: &dyn ListHost, path: IndexPath) -> bool;

    /// The user dropped the row at `from` onto `to`.
    fn move_row(&self, list: &dyn ListHost, from: IndexPath, to: IndexPath);

    /// Titles for the section index.
    fn section_index_titles(&self, list: &dyn ListHost) -> Option<Vec<String>>;

    /// The section to jump to when `title` (at `index` in the section index)
    /// is tapped.
    fn section_for_index_title(&self, list: &dyn ListHost, title: &str, index: usize) -> usize;
}

/// Interaction and presentation callbacks the host widget issues.
pub trait ListDelegate: Send + Sync {
    /// Height of the row at `path`.
    fn height_for_row(&self, list: &dyn ListHost, path: IndexPath) -> f64;

    /// Estimated height of the row at `path`.
    fn estimated_height_for_row(&self, list: &dyn ListHost, path: IndexPath) -> f64;

    /// `cell` is about to be drawn for the row at `path`.
    fn will_display_cell(&self, list: &dyn ListHost, cell: &ViewHandle, path: IndexPath);

    /// `cell` was removed from the row at `path`.
    fn did_end_displaying_cell(&self, list: &dyn ListHost, cell: &ViewHandle, path: IndexPath);

    /// Whether the row at `path` may highlight.
    fn should_highlight_row(&self, list: &dyn ListHost, path: IndexPath) -> bool;

    /// The row at `path` was highlighted.
    fn did_highlight_row(&self, list: &dyn ListHost, path: IndexPath);

    /// The row at `path` lost its highlight.
    fn did_unhighlight_row(&self, list: &dyn ListHost, path: IndexPath);

    /// The row at `path` is about to be selected. Returns the row to select
    /// instead, or `None` to veto.
    fn will_select_row(&self, list: &dyn ListHost, path: IndexPath) -> Option<IndexPath>;

    /// The row at `path` is about to be deselected. Returns the row to
    /// deselect instead, or `None` to veto.
    fn will_deselect_row(&self, list: &dyn ListHost, path: IndexPath) -> Option<IndexPath>;

    /// The row at `path` was selected.
    fn did_select_row(&self, list: &dyn ListHost, path: IndexPath);

    /// The row at `path` was deselected.
    fn did_deselect_row(&self, list: &dyn ListHost, path: IndexPath);

    /// Height of the header of `section`.
    fn height_for_header(&self, list: &dyn ListHost, section: usize) -> f64;

    /// Height of the footer of `section`.
    fn height_for_footer(&self, list: &dyn ListHost, section: usize) -> f64;

    /// Custom header view for `section`.
    fn view_for_header(&self, list: &dyn ListHost, section: usize) -> Option<ViewHandle>;

    /// Custom footer view for `section`.
    fn view_for_footer(&self, list: &dyn ListHost, section: usize) -> Option<ViewHandle>;

    /// A header view is about to be drawn for `section`.
    fn will_display_header_view(&self, list: &dyn ListHost, view: &ViewHandle, section: usize);

    /// A footer view is about to be drawn for `section`.
    fn will_display_footer_view(&self, list: &dyn ListHost, view: &ViewHandle, section: usize);

    /// A header view was removed from `section`.
    fn did_end_displaying_header_view(
        &self,
        list: &dyn ListHost,
        view: &ViewHandle,
        section: usize,
    );

    /// A footer view was removed from `section`.
    fn did_end_displaying_footer_view(
        &self,
        list: &dyn ListHost,
        view: &ViewHandle,
        section: usize,
    );

    /// Where a row dragged from `source` should land when hovering over
    /// `proposed`.
    fn target_index_path_for_move(
        &self,
        list: &dyn ListHost,
        source: IndexPath,
        proposed: IndexPath,
    ) -> IndexPath;

    /// Indentation depth of the row at `path`.
    fn indentation_level(&self, list: &dyn ListHost, path: IndexPath) -> usize;

    /// Swipe actions for the row at `path`.
    fn edit_actions(&self, list: &dyn ListHost, path: IndexPath) -> Option<Vec<RowAction>>;

    /// Editing control for the row at `path`.
    fn editing_style(&self, list: &dyn ListHost, path: IndexPath) -> EditingStyle;

    /// Title of the delete confirmation button for the row at `path`.
    fn delete_confirmation_title(&self, list: &dyn ListHost, path: IndexPath) -> Option<String>;

    /// Whether the row at `path` indents while editing.
    fn should_indent_while_editing(&self, list: &dyn ListHost, path: IndexPath) -> bool;

    /// The row at `path` is entering editing mode.
    fn will_begin_editing(&self, list: &dyn ListHost, path: IndexPath);

    /// Editing mode ended, for the row at `path` if it still exists.
    fn did_end_editing(&self, list: &dyn ListHost, path: Option<IndexPath>);

    /// Whether to show the edit menu for the row at `path`.
    fn should_show_menu(&self, list: &dyn ListHost, path: IndexPath) -> bool;

    /// Whether `action` appears in the edit menu for the row at `path`.
    fn can_perform_action(
        &self,
        list: &dyn ListHost,
        action: &MenuAction,
        path: IndexPath,
        sender: Option<&(dyn Any + Send + Sync)>,
    ) -> bool;

    /// Performs `action` on the row at `path`.
    fn perform_action(
        &self,
        list: &dyn ListHost,
        action: &MenuAction,
        path: IndexPath,
        sender: Option<&(dyn Any + Send + Sync)>,
    );

    /// The content offset changed.
    fn did_scroll(&self, list: &dyn ListHost);

    /// The user started dragging the content.
    fn will_begin_dragging(&self, list: &dyn ListHost);

    /// The user lifted their finger.
    fn did_end_dragging(&self, list: &dyn ListHost, will_decelerate: bool);

    /// Deceleration after a drag came to a halt.
    fn did_end_decelerating(&self, list: &dyn ListHost);
}

/// Prefetch requests the host widget issues ahead of displaying rows.
pub trait ListPrefetchDataSource: Send + Sync {
    /// Rows at `paths` will probably be displayed soon.
    fn prefetch_rows(&self, list: &dyn ListHost, paths: &[IndexPath]);

    /// Rows at `paths` are no longer expected to be displayed.
    fn cancel_prefetching(&self, list: &dyn ListHost, paths: &[IndexPath]);
}
