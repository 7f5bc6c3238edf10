//! The row item contract.

use std::fmt;
use std::sync::Arc;

use lattice_table_core::IndexPath;
use parking_lot::RwLock;

use super::editing::{RowEditing, RowPrefetching};
use crate::host::{ListHost, ViewHandle};
use crate::registry::ReuseKind;

/// Shared, reference-counted row item.
///
/// Rows are compared by identity: two `RowRef`s are "the same row" only if
/// they point at the same allocation.
pub type RowRef = Arc<dyn RowItem>;

/// Handles a highlight or selection notification.
pub type SelectionHandler = Arc<dyn Fn(&dyn ListHost, IndexPath) + Send + Sync>;

/// Confirms, redirects (`Some(other)`) or vetoes (`None`) a selection change.
pub type SelectionResolver = Arc<dyn Fn(&dyn ListHost, IndexPath) -> Option<IndexPath> + Send + Sync>;

/// Decides whether a row may highlight.
pub type HighlightResolver = Arc<dyn Fn(&dyn ListHost, IndexPath) -> bool + Send + Sync>;

#[derive(Default, Clone)]
struct HandlerSlots {
    should_highlight: Option<HighlightResolver>,
    did_highlight: Option<SelectionHandler>,
    did_unhighlight: Option<SelectionHandler>,
    will_select: Option<SelectionResolver>,
    will_deselect: Option<SelectionResolver>,
    did_select: Option<SelectionHandler>,
    did_deselect: Option<SelectionHandler>,
}

/// Optional closures attached to a row item.
///
/// Row items embed a `RowHandlers` and expose it through
/// [`RowItem::handlers`]. The default highlight and selection methods of
/// [`RowItem`] consult these closures before falling back to their
/// permissive defaults, so a row can react to taps without overriding any
/// trait method.
///
/// Handlers can be replaced at any time, including from inside a handler.
///
/// # Example
///
/// ```ignore
/// let row = Arc::new(TitleRow::new("Settings"));
/// row.handlers.on_did_select(|_list, path| {
///     println!("selected {path}");
/// });
/// ```
#[derive(Default)]
pub struct RowHandlers {
    slots: RwLock<HandlerSlots>,
}

impl RowHandlers {
    /// Creates an empty handler set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the closure deciding whether the row may highlight.
    pub fn on_should_highlight<F>(&self, handler: F)
    where
        F: Fn(&dyn ListHost, IndexPath) -> bool + Send + Sync + 'static,
    {
        self.slots.write().should_highlight = Some(Arc::new(handler));
    }

    /// Sets the closure run after the row highlights.
    pub fn on_did_highlight<F>(&self, handler: F)
    where
        F: Fn(&dyn ListHost, IndexPath) + Send + Sync + 'static,
    {
        self.slots.write().did_highlight = Some(Arc::new(handler));
    }

    /// Sets the closure run after the row loses its highlight.
    pub fn on_did_unhighlight<F>(&self, handler: F)
    where
        F: Fn(&dyn ListHost, IndexPath) + Send + Sync + 'static,
    {
        self.slots.write().did_unhighlight = Some(Arc::new(handler));
    }

    /// Sets the closure resolving an upcoming selection.
    pub fn on_will_select<F>(&self, handler: F)
    where
        F: Fn(&dyn ListHost, IndexPath) -> Option<IndexPath> + Send + Sync + 'static,
    {
        self.slots.write().will_select = Some(Arc::new(handler));
    }

    /// Sets the closure resolving an upcoming deselection.
    pub fn on_will_deselect<F>(&self, handler: F)
    where
        F: Fn(&dyn ListHost, IndexPath) -> Option<IndexPath> + Send + Sync + 'static,
    {
        self.slots.write().will_deselect = Some(Arc::new(handler));
    }

    /// Sets the closure run after the row is selected.
    pub fn on_did_select<F>(&self, handler: F)
    where
        F: Fn(&dyn ListHost, IndexPath) + Send + Sync + 'static,
    {
        self.slots.write().did_select = Some(Arc::new(handler));
    }

    /// Sets the closure run after the row is deselected.
    pub fn on_did_deselect<F>(&self, handler: F)
    where
        F: Fn(&dyn ListHost, IndexPath) + Send + Sync + 'static,
    {
        self.slots.write().did_deselect = Some(Arc::new(handler));
    }

    /// Removes every handler.
    pub fn clear(&self) {
        *self.slots.write() = HandlerSlots::default();
    }

    // Accessors clone the handler out so the lock is released before it runs.

    /// The should-highlight resolver, if set.
    pub fn should_highlight(&self) -> Option<HighlightResolver> {
        self.slots.read().should_highlight.clone()
    }

    /// The did-highlight handler, if set.
    pub fn did_highlight(&self) -> Option<SelectionHandler> {
        self.slots.read().did_highlight.clone()
    }

    /// The did-unhighlight handler, if set.
    pub fn did_unhighlight(&self) -> Option<SelectionHandler> {
        self.slots.read().did_unhighlight.clone()
    }

    /// The will-select resolver, if set.
    pub fn will_select(&self) -> Option<SelectionResolver> {
        self.slots.read().will_select.clone()
    }

    /// The will-deselect resolver, if set.
    pub fn will_deselect(&self) -> Option<SelectionResolver> {
        self.slots.read().will_deselect.clone()
    }

    /// The did-select handler, if set.
    pub fn did_select(&self) -> Option<SelectionHandler> {
        self.slots.read().did_select.clone()
    }

    /// The did-deselect handler, if set.
    pub fn did_deselect(&self) -> Option<SelectionHandler> {
        self.slots.read().did_deselect.clone()
    }
}

impl fmt::Debug for RowHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.read();
        f.debug_struct("RowHandlers")
            .field("should_highlight", &slots.should_highlight.is_some())
            .field("did_highlight", &slots.did_highlight.is_some())
            .field("did_unhighlight", &slots.did_unhighlight.is_some())
            .field("will_select", &slots.will_select.is_some())
            .field("will_deselect", &slots.will_deselect.is_some())
            .field("did_select", &slots.did_select.is_some())
            .field("did_deselect", &slots.did_deselect.is_some())
            .finish()
    }
}

/// The behavior of one row in a sectioned list.
///
/// A row item knows which cell template it uses, how tall it is, and how to
/// configure a cell for display. Everything else is optional:
///
/// - Highlight and selection callbacks default to consulting
///   [`handlers`](RowItem::handlers), then to the most permissive answer
///   (highlight allowed, selection confirmed unchanged).
/// - Editing and prefetching are separate capabilities, exposed through
///   [`editing`](RowItem::editing) and [`prefetching`](RowItem::prefetching).
///
/// # Ownership
///
/// A row belongs to at most one section at a time. The manager locates rows
/// by identity, so inserting the same `RowRef` into two sections leads to
/// confusing index paths.
///
/// # Example
///
/// ```ignore
/// use lattice_table::prelude::*;
///
/// struct TitleRow {
///     title: String,
///     handlers: RowHandlers,
/// }
///
/// impl RowItem for TitleRow {
///     fn reuse_kind(&self) -> ReuseKind {
///         ReuseKind::template("title", || ViewHandle::new(TitleCell::default()))
///     }
///
///     fn height(&self, _list: &dyn ListHost) -> f64 {
///         44.0
///     }
///
///     fn configure_cell(&self, cell: &ViewHandle, _path: IndexPath) {
///         if let Some(cell) = cell.downcast_ref::<TitleCell>() {
///             cell.set_text(&self.title);
///         }
///     }
///
///     fn handlers(&self) -> Option<&RowHandlers> {
///         Some(&self.handlers)
///     }
/// }
/// ```
pub trait RowItem: Send + Sync {
    /// The cell template this row displays with.
    ///
    /// Must be stable for the lifetime of the item.
    fn reuse_kind(&self) -> ReuseKind;

    /// Height of the row, in points.
    fn height(&self, list: &dyn ListHost) -> f64;

    /// Cheap height estimate used before the real height is needed.
    fn estimated_height(&self, _list: &dyn ListHost) -> f64 {
        2.0
    }

    /// Returns a configured cell for this row.
    ///
    /// The default dequeues a cell by the row's reuse identifier and passes
    /// it to [`configure_cell`](RowItem::configure_cell).
    fn cell(&self, list: &dyn ListHost, path: IndexPath) -> Option<ViewHandle> {
        let cell = list.dequeue_cell(self.reuse_kind().identifier(), path)?;
        self.configure_cell(&cell, path);
        Some(cell)
    }

    /// Fills a dequeued cell with this row's content.
    fn configure_cell(&self, _cell: &ViewHandle, _path: IndexPath) {}

    /// Stored highlight and selection closures, if the row carries any.
    fn handlers(&self) -> Option<&RowHandlers> {
        None
    }

    fn should_highlight(&self, list: &dyn ListHost, path: IndexPath) -> bool {
        match self.handlers().and_then(RowHandlers::should_highlight) {
            Some(handler) => handler(list, path),
            None => true,
        }
    }

    fn did_highlight(&self, list: &dyn ListHost, path: IndexPath) {
        if let Some(handler) = self.handlers().and_then(RowHandlers::did_highlight) {
            handler(list, path);
        }
    }

    fn did_unhighlight(&self, list: &dyn ListHost, path: IndexPath) {
        if let Some(handler) = self.handlers().and_then(RowHandlers::did_unhighlight) {
            handler(list, path);
        }
    }

    fn will_select(&self, list: &dyn ListHost, path: IndexPath) -> Option<IndexPath> {
        match self.handlers().and_then(RowHandlers::will_select) {
            Some(handler) => handler(list, path),
            None => Some(path),
        }
    }

    fn will_deselect(&self, list: &dyn ListHost, path: IndexPath) -> Option<IndexPath> {
        match self.handlers().and_then(RowHandlers::will_deselect) {
            Some(handler) => handler(list, path),
            None => Some(path),
        }
    }

    fn did_select(&self, list: &dyn ListHost, path: IndexPath) {
        if let Some(handler) = self.handlers().and_then(RowHandlers::did_select) {
            handler(list, path);
        }
    }

    fn did_deselect(&self, list: &dyn ListHost, path: IndexPath) {
        if let Some(handler) = self.handlers().and_then(RowHandlers::did_deselect) {
            handler(list, path);
        }
    }

    /// `cell` is about to be drawn for this row.
    fn will_display_cell(&self, _list: &dyn ListHost, _cell: &ViewHandle, _path: IndexPath) {}

    /// `cell` stopped displaying this row.
    fn did_end_displaying_cell(&self, _list: &dyn ListHost, _cell: &ViewHandle, _path: IndexPath) {
    }

    /// Indentation depth of the row.
    fn indentation_level(&self, _list: &dyn ListHost, _path: IndexPath) -> usize {
        0
    }

    /// Whether the row shows a reordering control.
    fn can_move(&self, _list: &dyn ListHost, _path: IndexPath) -> bool {
        false
    }

    /// The row's editing capability, if any.
    fn editing(&self) -> Option<&dyn RowEditing> {
        None
    }

    /// The row's prefetching capability, if any.
    fn prefetching(&self) -> Option<&dyn RowPrefetching> {
        None
    }
}

/// Returns `true` if both handles refer to the same row item.
pub fn same_row(a: &RowRef, b: &RowRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
