//! The section item contract and the stock section implementation.

use std::fmt;
use std::sync::Arc;

use lattice_table_core::{IndexSet, splice};
use parking_lot::RwLock;

use super::row::{RowRef, same_row};
use crate::host::{ListHost, ViewHandle};

/// Shared, reference-counted section item. Compared by identity.
pub type SectionRef = Arc<dyn SectionItem>;

/// Default header and footer height of [`TableSection`] when a title is set.
pub const DEFAULT_TITLE_HEIGHT: f64 = 22.0;

/// The ordered rows of one section.
///
/// Anyone can read a `RowList`; only the list manager splices it, and it
/// always does so inside an update batch so the host widget's idea of the
/// row count never drifts from the real one.
#[derive(Default)]
pub struct RowList {
    rows: RwLock<Vec<RowRef>>,
}

impl RowList {
    /// Creates a row list in display order.
    pub fn new(rows: Vec<RowRef>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Returns the row at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<RowRef> {
        self.rows.read().get(index).cloned()
    }

    /// Returns the first row.
    pub fn first(&self) -> Option<RowRef> {
        self.rows.read().first().cloned()
    }

    /// Returns the position of `row`, compared by identity.
    pub fn position_of(&self, row: &RowRef) -> Option<usize> {
        self.rows.read().iter().position(|r| same_row(r, row))
    }

    /// Returns `true` if `row` is in the list.
    pub fn contains(&self, row: &RowRef) -> bool {
        self.position_of(row).is_some()
    }

    /// Returns a snapshot of the rows.
    pub fn to_vec(&self) -> Vec<RowRef> {
        self.rows.read().clone()
    }

    pub(crate) fn insert_at(&self, rows: Vec<RowRef>, positions: &IndexSet) {
        splice::insert_at(&mut self.rows.write(), rows, positions);
    }

    pub(crate) fn remove_at(&self, positions: &IndexSet) {
        splice::remove_at(&mut self.rows.write(), positions);
    }

    pub(crate) fn replace_at(&self, rows: Vec<RowRef>, positions: &IndexSet) {
        splice::replace_at(&mut self.rows.write(), rows, positions);
    }
}

impl FromIterator<RowRef> for RowList {
    fn from_iter<I: IntoIterator<Item = RowRef>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for RowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowList").field("len", &self.len()).finish()
    }
}

/// The behavior of one section: header, footer and its rows.
///
/// Header and footer queries have neutral defaults (no title, zero height,
/// no custom view). Display notifications for header and footer views are a
/// separate capability, see [`SectionHeaderFooterDisplay`].
pub trait SectionItem: Send + Sync {
    /// The rows of this section.
    fn rows(&self) -> &RowList;

    fn title_for_header(&self, _list: &dyn ListHost) -> Option<String> {
        None
    }

    fn height_for_header(&self, _list: &dyn ListHost) -> f64 {
        0.0
    }

    fn view_for_header(&self, _list: &dyn ListHost) -> Option<ViewHandle> {
        None
    }

    fn title_for_footer(&self, _list: &dyn ListHost) -> Option<String> {
        None
    }

    fn height_for_footer(&self, _list: &dyn ListHost) -> f64 {
        0.0
    }

    fn view_for_footer(&self, _list: &dyn ListHost) -> Option<ViewHandle> {
        None
    }

    /// The section's header/footer display capability, if any.
    fn header_footer_display(&self) -> Option<&dyn SectionHeaderFooterDisplay> {
        None
    }
}

/// Display notifications for a section's header and footer views.
pub trait SectionHeaderFooterDisplay: Send + Sync {
    fn will_display_header_view(&self, _view: &ViewHandle, _section: usize) {}

    fn will_display_footer_view(&self, _view: &ViewHandle, _section: usize) {}

    fn did_end_displaying_header_view(&self, _view: &ViewHandle, _section: usize) {}

    fn did_end_displaying_footer_view(&self, _view: &ViewHandle, _section: usize) {}
}

/// Returns `true` if both handles refer to the same section item.
pub fn same_section(a: &SectionRef, b: &SectionRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// A ready-made section with optional header and footer titles.
///
/// Header and footer are [`DEFAULT_TITLE_HEIGHT`] tall when their title is
/// set, and collapsed otherwise.
///
/// # Example
///
/// ```ignore
/// let section: SectionRef = Arc::new(
///     TableSection::new(vec![row_a, row_b])
///         .with_header_title("Recent")
///         .with_footer_title("2 items"),
/// );
/// ```
#[derive(Debug, Default)]
pub struct TableSection {
    rows: RowList,
    header_title: Option<String>,
    footer_title: Option<String>,
}

impl TableSection {
    /// Creates a section holding `rows`.
    pub fn new(rows: Vec<RowRef>) -> Self {
        Self {
            rows: RowList::new(rows),
            header_title: None,
            footer_title: None,
        }
    }

    /// Creates a section without rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets the header title.
    pub fn with_header_title(mut self, title: impl Into<String>) -> Self {
        self.header_title = Some(title.into());
        self
    }

    /// Sets the footer title.
    pub fn with_footer_title(mut self, title: impl Into<String>) -> Self {
        self.footer_title = Some(title.into());
        self
    }

    /// The header title, if set.
    pub fn header_title(&self) -> Option<&str> {
        self.header_title.as_deref()
    }

    /// The footer title, if set.
    pub fn footer_title(&self) -> Option<&str> {
        self.footer_title.as_deref()
    }
}

impl SectionItem for TableSection {
    fn rows(&self) -> &RowList {
        &self.rows
    }

    fn title_for_header(&self, _list: &dyn ListHost) -> Option<String> {
        self.header_title.clone()
    }

    fn height_for_header(&self, _list: &dyn ListHost) -> f64 {
        if self.header_title.is_some() {
            DEFAULT_TITLE_HEIGHT
        } else {
            0.0
        }
    }

    fn title_for_footer(&self, _list: &dyn ListHost) -> Option<String> {
        self.footer_title.clone()
    }

    fn height_for_footer(&self, _list: &dyn ListHost) -> f64 {
        if self.footer_title.is_some() {
            DEFAULT_TITLE_HEIGHT
        } else {
            0.0
        }
    }
}
