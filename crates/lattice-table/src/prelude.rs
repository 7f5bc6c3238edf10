//! Prelude module for Lattice Table.
//!
//! ```ignore
//! use lattice_table::prelude::*;
//! ```
//!
//! This provides access to:
//! - The manager (`ListManager`, `ManagerConfig`, delegates)
//! - Item contracts (`RowItem`, `SectionItem`, `TableSection`, capabilities)
//! - Host interfaces (`ListHost`, `ViewHandle`, `CellTemplate`)
//! - Index and update vocabulary (`IndexPath`, `IndexSet`, `RowAnimation`)

pub use std::sync::Arc;

// ============================================================================
// Manager
// ============================================================================

pub use crate::{ListManager, ListManagerBuilder, ListManagerDelegate, ManagerConfig, ScrollDelegate};

// ============================================================================
// Items
// ============================================================================

pub use crate::item::{
    MenuAction, RowAction, RowActionStyle, RowEditing, RowHandlers, RowItem, RowList,
    RowPrefetching, RowRef, SectionHeaderFooterDisplay, SectionItem, SectionRef, TableSection,
};
pub use crate::registry::ReuseKind;

// ============================================================================
// Host
// ============================================================================

pub use crate::host::{CellTemplate, ListHost, ViewHandle};

// ============================================================================
// Core Vocabulary
// ============================================================================

pub use lattice_table_core::{
    EditingStyle, IndexPath, IndexSet, Rect, RowAnimation, ScrollPosition, TableError,
};
