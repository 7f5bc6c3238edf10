//! Row and section items.
//!
//! Callers describe what a list shows as a tree of items: a sequence of
//! [`SectionItem`]s, each holding a [`RowList`] of [`RowItem`]s. Items own
//! the behavior of their part of the list; the manager only routes widget
//! callbacks to them.
//!
//! # Capabilities
//!
//! Optional behavior is split into capability traits that an item exposes
//! through an accessor returning `Option<&dyn Trait>`:
//!
//! | Item    | Accessor                 | Capability                      |
//! |---------|--------------------------|---------------------------------|
//! | Row     | `editing()`              | [`RowEditing`]                  |
//! | Row     | `prefetching()`          | [`RowPrefetching`]              |
//! | Section | `header_footer_display()`| [`SectionHeaderFooterDisplay`]  |

mod editing;
mod row;
mod section;

pub use editing::{MenuAction, RowAction, RowActionHandler, RowActionStyle, RowEditing, RowPrefetching};
pub use row::{
    HighlightResolver, RowHandlers, RowItem, RowRef, SelectionHandler, SelectionResolver, same_row,
};
pub use section::{
    DEFAULT_TITLE_HEIGHT, RowList, SectionHeaderFooterDisplay, SectionItem, SectionRef,
    TableSection, same_section,
};
