//! Core vocabulary for Lattice Table.
//!
//! This crate provides the pieces of the sectioned-list system that know
//! nothing about items or widgets:
//!
//! - **Index Paths**: `(section, row)` coordinates into a two-level list
//! - **Index Sets**: Ordered sets of unique positions
//! - **Splices**: Multi-index insert/remove/replace over a `Vec`
//! - **Update Hints**: Row animations, scroll positions, editing styles
//! - **Errors**: The contract-violation taxonomy shared by the workspace
//! - **Logging**: `tracing` targets and span names
//!
//! # Splice Example
//!
//! ```
//! use lattice_table_core::{IndexSet, splice};
//!
//! let mut letters = vec!['a', 'b', 'c', 'd'];
//!
//! // Positions always refer to the original sequence.
//! splice::remove_at(&mut letters, &IndexSet::from_iter([0, 2]));
//! assert_eq!(letters, ['b', 'd']);
//!
//! // Positions are the final slots the new elements occupy.
//! splice::insert_at(&mut letters, vec!['x', 'y'], &IndexSet::from_iter([0, 3]));
//! assert_eq!(letters, ['x', 'b', 'd', 'y']);
//! ```

mod error;
mod index;
pub mod logging;
pub mod splice;
mod types;

pub use error::{Result, SpliceError, TableError};
pub use index::{IndexPath, IndexSet};
pub use types::{EditingStyle, Rect, RowAnimation, ScrollPosition};
