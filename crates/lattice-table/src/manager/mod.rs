//! The list manager: owner of the section tree and mediator between items
//! and the host widget.
//!
//! [`ListManager`] holds the ordered sections shown by one host list widget.
//! It is responsible for two things:
//!
//! - **Mutation**: every structural change goes through a manager method
//!   that splices the model and emits the matching delta inside one update
//!   batch, so the widget never sees a row count that disagrees with the
//!   delta it is applying.
//! - **Dispatch**: the manager answers the widget's data source and delegate
//!   callbacks by resolving index paths to items and forwarding to them.
//!
//! # Example
//!
//! ```ignore
//! use lattice_table::prelude::*;
//!
//! let manager = ListManager::new(&host);
//! let section: SectionRef = Arc::new(TableSection::new(vec![row_a, row_b]));
//! manager.set_sections(vec![section.clone()]);
//!
//! // Later: animate a new row in at the end.
//! manager.append_rows(vec![row_c], &section, RowAnimation::Fade);
//! ```
//!
//! # Failure policy
//!
//! Queries with index paths the manager doesn't know resolve to neutral
//! answers (`None`, `0`, `false`). Mutations called with items or positions
//! that contradict the model are programming errors: they are logged and
//! panic before anything is changed.

mod config;
mod delegate;
mod dispatch;
mod mutation;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use lattice_table_core::logging::targets;
use lattice_table_core::{IndexPath, Rect, Result, ScrollPosition, TableError};
use parking_lot::RwLock;

pub use config::{ListManagerBuilder, ManagerConfig};
pub use delegate::{ListManagerDelegate, ScrollDelegate};

use crate::host::{ListDataSource, ListDelegate, ListHost, ListPrefetchDataSource};
use crate::item::{RowRef, SectionRef, same_section};
use crate::registry::Registry;

/// Mediates between a tree of section/row items and a host list widget.
///
/// The manager holds the host through a non-owning handle. Once the host is
/// dropped, [`is_host_alive`](ListManager::is_host_alive) turns `false`,
/// mutations keep updating the model without emitting deltas, and commands
/// like [`scroll_to_row`](ListManager::scroll_to_row) do nothing.
///
/// All methods take `&self` and release internal locks before calling into
/// the host or an item, so items and hosts may call back into the manager.
/// Mutations must not be issued while another mutation's batch is open.
pub struct ListManager {
    this: Weak<ListManager>,
    host: Weak<dyn ListHost>,
    sections: RwLock<Vec<SectionRef>>,
    registry: Registry,
    delegate: RwLock<Option<Weak<dyn ListManagerDelegate>>>,
    scroll_delegate: RwLock<Option<Weak<dyn ScrollDelegate>>>,
    prefetching_enabled: AtomicBool,
    batch_open: AtomicBool,
    config: ManagerConfig,
}

static_assertions::assert_impl_all!(ListManager: Send, Sync);

impl ListManager {
    /// Creates a manager with the default configuration and attaches it to
    /// `host` as data source and delegate.
    pub fn new<H: ListHost + 'static>(host: &Arc<H>) -> Arc<Self> {
        Self::builder(host).build()
    }

    /// Starts building a manager for `host`.
    pub fn builder<H: ListHost + 'static>(host: &Arc<H>) -> ListManagerBuilder {
        let host = Arc::downgrade(host) as Weak<dyn ListHost>;
        ListManagerBuilder::new(host)
    }

    fn attach(host: Weak<dyn ListHost>, config: ManagerConfig) -> Arc<Self> {
        let manager = Arc::new_cyclic(|this| Self {
            this: this.clone(),
            host,
            sections: RwLock::new(Vec::new()),
            registry: Registry::new(),
            delegate: RwLock::new(None),
            scroll_delegate: RwLock::new(None),
            prefetching_enabled: AtomicBool::new(false),
            batch_open: AtomicBool::new(false),
            config,
        });
        if let Some(host) = manager.host() {
            let data_source: Weak<dyn ListDataSource> = manager.this.clone();
            let delegate: Weak<dyn ListDelegate> = manager.this.clone();
            host.set_data_source(Some(data_source));
            host.set_delegate(Some(delegate));
        }
        manager
    }

    // -------------------------------------------------------------------------
    // Host and delegates
    // -------------------------------------------------------------------------

    /// The host widget, if it is still alive.
    pub fn host(&self) -> Option<Arc<dyn ListHost>> {
        self.host.upgrade()
    }

    /// Returns `false` once the host widget has been dropped.
    pub fn is_host_alive(&self) -> bool {
        self.host.strong_count() > 0
    }

    /// The manager's configuration.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// The template registry used for this manager's host.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Attaches or detaches the reordering/section-index delegate.
    pub fn set_delegate(&self, delegate: Option<Weak<dyn ListManagerDelegate>>) {
        *self.delegate.write() = delegate;
    }

    /// The reordering/section-index delegate, if attached and alive.
    pub fn delegate(&self) -> Option<Arc<dyn ListManagerDelegate>> {
        self.delegate.read().as_ref().and_then(Weak::upgrade)
    }

    /// Attaches or detaches the scroll delegate.
    pub fn set_scroll_delegate(&self, delegate: Option<Weak<dyn ScrollDelegate>>) {
        *self.scroll_delegate.write() = delegate;
    }

    /// The scroll delegate, if attached and alive.
    pub fn scroll_delegate(&self) -> Option<Arc<dyn ScrollDelegate>> {
        self.scroll_delegate.read().as_ref().and_then(Weak::upgrade)
    }

    // -------------------------------------------------------------------------
    // Prefetching
    // -------------------------------------------------------------------------

    /// Returns `true` once prefetching has been enabled.
    pub fn is_prefetching_enabled(&self) -> bool {
        self.prefetching_enabled.load(Ordering::Acquire)
    }

    /// Attaches the manager as the host's prefetch data source.
    ///
    /// Enabling is one-way; calling this again is a no-op. Once the host is
    /// gone there is nothing to attach to, so the call does nothing and
    /// prefetching stays disabled.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::PrefetchingUnsupported`] if the host cannot
    /// prefetch.
    pub fn try_enable_prefetching(&self) -> Result<()> {
        if self.is_prefetching_enabled() {
            return Ok(());
        }
        let Some(host) = self.host() else {
            tracing::debug!(target: targets::MANAGER, "host list is gone; prefetching not enabled");
            return Ok(());
        };
        if !host.supports_prefetching() {
            return Err(TableError::PrefetchingUnsupported);
        }
        let source: Weak<dyn ListPrefetchDataSource> = self.this.clone();
        host.set_prefetch_data_source(Some(source));
        self.prefetching_enabled.store(true, Ordering::Release);
        tracing::debug!(target: targets::MANAGER, "prefetching enabled");
        Ok(())
    }

    /// Attaches the manager as the host's prefetch data source.
    ///
    /// # Panics
    ///
    /// Panics if the host cannot prefetch.
    pub fn enable_prefetching(&self) {
        if let Err(err) = self.try_enable_prefetching() {
            fatal(err);
        }
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Snapshot of the sections, in display order.
    pub fn sections(&self) -> Vec<SectionRef> {
        self.sections.read().clone()
    }

    /// Number of sections.
    pub fn number_of_sections(&self) -> usize {
        self.sections.read().len()
    }

    /// Number of rows in `section`, or 0 if there is no such section.
    pub fn number_of_rows(&self, section: usize) -> usize {
        self.section(section).map_or(0, |s| s.rows().len())
    }

    /// The section at `index`.
    pub fn section(&self, index: usize) -> Option<SectionRef> {
        self.sections.read().get(index).cloned()
    }

    /// The section containing `path`.
    pub fn section_for(&self, path: IndexPath) -> Option<SectionRef> {
        self.section(path.section())
    }

    /// The row at `path`, or `None` if `path` is out of range.
    pub fn row(&self, path: IndexPath) -> Option<RowRef> {
        self.section_for(path)?.rows().get(path.row())
    }

    /// Position of `section`, compared by identity.
    pub fn section_index_of(&self, section: &SectionRef) -> Option<usize> {
        self.sections
            .read()
            .iter()
            .position(|s| same_section(s, section))
    }

    /// Index path of `row` inside `section`, compared by identity.
    pub fn index_path_of(&self, row: &RowRef, section: &SectionRef) -> Option<IndexPath> {
        let section_index = self.section_index_of(section)?;
        let row_index = section.rows().position_of(row)?;
        Some(IndexPath::new(section_index, row_index))
    }

    /// Index path of `row`, searching every section.
    pub fn find_row(&self, row: &RowRef) -> Option<IndexPath> {
        self.sections().iter().enumerate().find_map(|(index, section)| {
            section
                .rows()
                .position_of(row)
                .map(|row_index| IndexPath::new(index, row_index))
        })
    }

    // -------------------------------------------------------------------------
    // Geometry and scrolling
    // -------------------------------------------------------------------------

    /// Frame of the row showing `row` in `section`.
    ///
    /// Returns `None` if the row isn't in the list or the host is gone.
    pub fn rect_for_row(&self, row: &RowRef, section: &SectionRef) -> Option<Rect> {
        let path = self.index_path_of(row, section)?;
        Some(self.host()?.rect_for_row(path))
    }

    /// Scrolls until the row showing `row` sits at `position`.
    ///
    /// Does nothing if the row isn't in the list or the host is gone.
    pub fn scroll_to_row(
        &self,
        row: &RowRef,
        section: &SectionRef,
        position: ScrollPosition,
        animated: bool,
    ) {
        let (Some(path), Some(host)) = (self.index_path_of(row, section), self.host()) else {
            return;
        };
        host.scroll_to_row(path, position, animated);
    }

    /// Scrolls to the first row of the first section.
    pub fn scroll_to_top(&self, animated: bool) {
        let Some(section) = self.section(0) else {
            return;
        };
        let Some(row) = section.rows().first() else {
            return;
        };
        self.scroll_to_row(&row, &section, ScrollPosition::Top, animated);
    }
}

impl std::fmt::Debug for ListManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sections = self.sections.read();
        let rows: Vec<usize> = sections.iter().map(|s| s.rows().len()).collect();
        f.debug_struct("ListManager")
            .field("host_alive", &self.is_host_alive())
            .field("rows_per_section", &rows)
            .field("prefetching", &self.is_prefetching_enabled())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Logs a contract violation and stops.
#[track_caller]
pub(crate) fn fatal(err: TableError) -> ! {
    tracing::error!(target: targets::MANAGER, error = %err, "list manager contract violation");
    panic!("{err}");
}
