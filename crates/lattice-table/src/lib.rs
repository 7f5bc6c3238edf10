//! Lattice Table - keeps a tree of section and row items in sync with a
//! list widget.
//!
//! Callers describe what a sectioned list shows as items, and a
//! [`ListManager`] does the rest:
//!
//! - **Items**: [`RowItem`](item::RowItem) and [`SectionItem`](item::SectionItem)
//!   own sizing, cell configuration and interaction behavior
//! - **Registry**: cell templates are registered with the widget before
//!   the first row that needs them is shown
//! - **Mutations**: insert/remove/replace/reload of rows and sections, each
//!   applied to the model and announced to the widget in one update batch
//! - **Dispatch**: the widget's data source and delegate callbacks are
//!   routed to the item at the requested index path
//!
//! The widget itself sits behind the [`ListHost`](host::ListHost) trait, so
//! the same manager drives any toolkit's list.
//!
//! # Example
//!
//! ```ignore
//! use lattice_table::prelude::*;
//!
//! let manager = ListManager::new(&host);
//!
//! let section: SectionRef = Arc::new(
//!     TableSection::new(vec![title_row, subtitle_row]).with_header_title("Profile"),
//! );
//! manager.set_sections(vec![section.clone()]);
//!
//! manager.append_rows(vec![footer_row], &section, RowAnimation::Fade);
//! ```

pub mod host;
pub mod item;
mod manager;
pub mod prelude;
pub mod registry;

#[cfg(test)]
mod test_util;

pub use lattice_table_core::*;
pub use manager::{ListManager, ListManagerBuilder, ListManagerDelegate, ManagerConfig, ScrollDelegate};
