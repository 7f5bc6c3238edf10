//! External delegates consulted by the list manager.

use lattice_table_core::IndexPath;

use crate::host::ListHost;

/// Owns reordering and the section index on behalf of a [`ListManager`].
///
/// The manager never reorders its own rows. When the user drags a row, the
/// proposed destination and the final move are relayed here, and the
/// delegate is responsible for updating the model (typically by calling
/// back into the manager's mutation methods).
///
/// Every method has a neutral default, matching what the manager answers
/// when no delegate is attached.
///
/// [`ListManager`]: crate::ListManager
pub trait ListManagerDelegate: Send + Sync {
    /// Where a row dragged from `source` should land when hovering over
    /// `proposed`. Defaults to `proposed`.
    fn target_index_path_for_move(
        &self,
        _list: &dyn ListHost,
        _source: IndexPath,
        proposed: IndexPath,
    ) -> IndexPath {
        proposed
    }

    /// The user dropped the row at `from` onto `to`.
    fn move_row(&self, _list: &dyn ListHost, _from: IndexPath, _to: IndexPath) {}

    /// Titles for the section index. Defaults to none.
    fn section_index_titles(&self, _list: &dyn ListHost) -> Option<Vec<String>> {
        None
    }

    /// The section for a section-index title. Defaults to the first.
    fn section_for_index_title(&self, _list: &dyn ListHost, _title: &str, _index: usize) -> usize {
        0
    }
}

/// Receives scroll events, forwarded verbatim by the list manager.
pub trait ScrollDelegate: Send + Sync {
    fn did_scroll(&self, _list: &dyn ListHost) {}

    fn will_begin_dragging(&self, _list: &dyn ListHost) {}

    fn did_end_dragging(&self, _list: &dyn ListHost, _will_decelerate: bool) {}

    fn did_end_decelerating(&self, _list: &dyn ListHost) {}
}
