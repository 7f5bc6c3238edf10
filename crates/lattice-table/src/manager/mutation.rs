//! Structural mutations of the section tree.
//!
//! Every mutation runs the same protocol: validate, register templates for
//! new rows, open an update batch, splice the model, emit the matching
//! delta, close the batch. Validation happens before anything is touched,
//! so a contract violation leaves both the model and the widget unchanged.

use std::sync::atomic::Ordering;

use lattice_table_core::logging::{span_names, targets};
use lattice_table_core::{IndexPath, IndexSet, RowAnimation, TableError, splice};

use super::{ListManager, fatal};
use crate::host::{ListHost, UpdateCompletion};
use crate::item::{RowRef, SectionRef};

/// Clears the open-batch flag when the batch ends, even on unwind.
struct BatchGuard<'a> {
    manager: &'a ListManager,
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        self.manager.batch_open.store(false, Ordering::Release);
    }
}

impl ListManager {
    // -------------------------------------------------------------------------
    // Protocol
    // -------------------------------------------------------------------------

    fn open_batch(&self) -> BatchGuard<'_> {
        if self.batch_open.swap(true, Ordering::AcqRel) {
            fatal(TableError::NestedBatch);
        }
        BatchGuard { manager: self }
    }

    /// Runs `splice` and `emit` inside one update batch.
    ///
    /// Without a host only the model is spliced.
    fn apply_update<S, E>(
        &self,
        host: Option<&dyn ListHost>,
        splice: S,
        emit: E,
        completion: Option<UpdateCompletion>,
    ) where
        S: FnOnce(),
        E: FnOnce(&dyn ListHost),
    {
        let Some(host) = host else {
            tracing::debug!(
                target: targets::MANAGER,
                "host list is gone; applying change to the model only"
            );
            splice();
            if let Some(completion) = completion {
                completion();
            }
            return;
        };

        let batch = self.open_batch();
        let _span = tracing::trace_span!(target: targets::MANAGER, span_names::BATCH).entered();
        host.begin_updates();
        splice();
        emit(host);
        // The host may run the completion before returning, and the
        // completion may mutate again.
        drop(batch);
        match completion {
            Some(completion) => host.end_updates_with_completion(completion),
            None => host.end_updates(),
        }
    }

    fn register_rows<'a>(&self, host: &dyn ListHost, rows: impl IntoIterator<Item = &'a RowRef>) {
        for row in rows {
            if let Err(err) = self.registry.ensure_registered(host, &**row) {
                fatal(err);
            }
        }
    }

    fn register_sections(&self, host: &dyn ListHost, sections: &[SectionRef]) {
        for section in sections {
            self.register_rows(host, &section.rows().to_vec());
        }
    }

    fn section_index_or_fatal(&self, section: &SectionRef) -> usize {
        self.section_index_of(section)
            .unwrap_or_else(|| fatal(TableError::SectionNotFound))
    }

    fn row_positions_or_fatal(
        &self,
        rows: &[RowRef],
        section: &SectionRef,
        section_index: usize,
    ) -> IndexSet {
        rows.iter()
            .map(|row| {
                section.rows().position_of(row).unwrap_or_else(|| {
                    fatal(TableError::RowNotFound {
                        section: section_index,
                    })
                })
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Whole list
    // -------------------------------------------------------------------------

    /// Replaces every section and reloads the whole list.
    ///
    /// No incremental delta is emitted; use this for initial population or
    /// wholesale resets.
    ///
    /// # Panics
    ///
    /// Panics if a row declares an empty reuse identifier, or if called
    /// while another mutation's batch is open.
    #[tracing::instrument(
        skip_all,
        target = "lattice_table::manager",
        level = "trace",
        fields(sections = sections.len())
    )]
    pub fn set_sections(&self, sections: Vec<SectionRef>) {
        let batch = self.open_batch();
        let host = self.host();
        if let Some(host) = host.as_deref() {
            self.register_sections(host, &sections);
        }
        *self.sections.write() = sections;
        drop(batch);
        if let Some(host) = host {
            host.reload_data();
        }
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Inserts `rows` into `section` so that they end up at `positions`.
    ///
    /// Positions pair with rows in ascending order. Does nothing if
    /// `section` is not one of the manager's sections.
    ///
    /// # Panics
    ///
    /// Panics if the number of positions differs from the number of rows,
    /// or if a position lies past the end of the section.
    #[tracing::instrument(
        skip_all,
        target = "lattice_table::manager",
        level = "trace",
        fields(count = rows.len())
    )]
    pub fn insert_rows(
        &self,
        rows: Vec<RowRef>,
        section: &SectionRef,
        positions: &IndexSet,
        animation: RowAnimation,
    ) {
        if let Err(err) = splice::check_insert(section.rows().len(), rows.len(), positions) {
            fatal(err.into());
        }
        if rows.is_empty() {
            return;
        }
        let Some(section_index) = self.section_index_of(section) else {
            tracing::debug!(target: targets::MANAGER, "insert target section not found; ignoring");
            return;
        };

        let host = self.host();
        if let Some(host) = host.as_deref() {
            self.register_rows(host, &rows);
        }
        let paths = positions.to_index_paths(section_index);
        self.apply_update(
            host.as_deref(),
            || section.rows().insert_at(rows, positions),
            |host| host.insert_rows(&paths, animation),
            None,
        );
    }

    /// Appends `rows` to the end of `section`.
    ///
    /// Does nothing if `rows` is empty or `section` is not one of the
    /// manager's sections.
    pub fn append_rows(&self, rows: Vec<RowRef>, section: &SectionRef, animation: RowAnimation) {
        let start = section.rows().len();
        let positions = IndexSet::range(start..start + rows.len());
        self.insert_rows(rows, section, &positions, animation);
    }

    /// Appends `rows` to the end of the section at `section_index`.
    ///
    /// Does nothing if there is no such section.
    pub fn append_rows_at(&self, rows: Vec<RowRef>, section_index: usize, animation: RowAnimation) {
        if let Some(section) = self.section(section_index) {
            self.append_rows(rows, &section, animation);
        }
    }

    /// Removes `rows` from `section`, comparing by identity.
    ///
    /// # Panics
    ///
    /// Panics if `section` is not one of the manager's sections, or if any
    /// of `rows` is not in `section`.
    #[tracing::instrument(
        skip_all,
        target = "lattice_table::manager",
        level = "trace",
        fields(count = rows.len())
    )]
    pub fn remove_rows(&self, rows: &[RowRef], section: &SectionRef, animation: RowAnimation) {
        self.remove_rows_with_completion(rows, section, animation, None);
    }

    /// Removes rows by identity and hands `completion` to the host, to run
    /// once the removal animation has finished.
    pub(crate) fn remove_rows_with_completion(
        &self,
        rows: &[RowRef],
        section: &SectionRef,
        animation: RowAnimation,
        completion: Option<UpdateCompletion>,
    ) {
        let section_index = self.section_index_or_fatal(section);
        let positions = self.row_positions_or_fatal(rows, section, section_index);
        if positions.is_empty() {
            return;
        }
        self.splice_out_rows(section, section_index, &positions, animation, completion);
    }

    /// Removes the rows at `positions` from the section at `section_index`.
    ///
    /// # Panics
    ///
    /// Panics if there is no such section or a position is out of bounds.
    #[tracing::instrument(
        skip_all,
        target = "lattice_table::manager",
        level = "trace",
        fields(section = section_index, count = positions.len())
    )]
    pub fn remove_rows_at(&self, positions: &IndexSet, section_index: usize, animation: RowAnimation) {
        let Some(section) = self.section(section_index) else {
            fatal(TableError::SectionIndexOutOfBounds {
                index: section_index,
                len: self.number_of_sections(),
            });
        };
        if let Err(err) = splice::check_remove(section.rows().len(), positions) {
            fatal(err.into());
        }
        if positions.is_empty() {
            return;
        }
        self.splice_out_rows(&section, section_index, positions, animation, None);
    }

    fn splice_out_rows(
        &self,
        section: &SectionRef,
        section_index: usize,
        positions: &IndexSet,
        animation: RowAnimation,
        completion: Option<UpdateCompletion>,
    ) {
        let paths = positions.to_index_paths(section_index);
        self.apply_update(
            self.host().as_deref(),
            || section.rows().remove_at(positions),
            |host| host.delete_rows(&paths, animation),
            completion,
        );
    }

    /// Replaces the rows of `section` at `positions` with `rows`, and
    /// reloads those rows.
    ///
    /// Does nothing if `section` is not one of the manager's sections.
    ///
    /// # Panics
    ///
    /// Panics if the number of positions differs from the number of rows,
    /// or if a position is out of bounds.
    #[tracing::instrument(
        skip_all,
        target = "lattice_table::manager",
        level = "trace",
        fields(count = rows.len())
    )]
    pub fn replace_rows(
        &self,
        positions: &IndexSet,
        rows: Vec<RowRef>,
        section: &SectionRef,
        animation: RowAnimation,
    ) {
        if let Err(err) = splice::check_replace(section.rows().len(), rows.len(), positions) {
            fatal(err.into());
        }
        if rows.is_empty() {
            return;
        }
        let Some(section_index) = self.section_index_of(section) else {
            tracing::debug!(target: targets::MANAGER, "replace target section not found; ignoring");
            return;
        };

        let host = self.host();
        if let Some(host) = host.as_deref() {
            self.register_rows(host, &rows);
        }
        let paths = positions.to_index_paths(section_index);
        self.apply_update(
            host.as_deref(),
            || section.rows().replace_at(rows, positions),
            |host| host.reload_rows(&paths, animation),
            None,
        );
    }

    /// Reloads the cells showing `rows` without changing the model.
    ///
    /// # Panics
    ///
    /// Panics if `section` is not one of the manager's sections, or if any
    /// of `rows` is not in `section`.
    #[tracing::instrument(
        skip_all,
        target = "lattice_table::manager",
        level = "trace",
        fields(count = rows.len())
    )]
    pub fn reload_rows(&self, rows: &[RowRef], section: &SectionRef, animation: RowAnimation) {
        let section_index = self.section_index_or_fatal(section);
        let positions = self.row_positions_or_fatal(rows, section, section_index);
        if positions.is_empty() {
            return;
        }
        let paths: Vec<IndexPath> = positions.to_index_paths(section_index);
        self.apply_update(
            self.host().as_deref(),
            || {},
            |host| host.reload_rows(&paths, animation),
            None,
        );
    }

    // -------------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------------

    /// Inserts `sections` so that they end up at `positions`.
    ///
    /// # Panics
    ///
    /// Panics if the number of positions differs from the number of
    /// sections, or if a position lies past the end of the list.
    #[tracing::instrument(
        skip_all,
        target = "lattice_table::manager",
        level = "trace",
        fields(count = sections.len())
    )]
    pub fn insert_sections(
        &self,
        sections: Vec<SectionRef>,
        positions: &IndexSet,
        animation: RowAnimation,
    ) {
        if let Err(err) = splice::check_insert(self.number_of_sections(), sections.len(), positions) {
            fatal(err.into());
        }
        if sections.is_empty() {
            return;
        }

        let host = self.host();
        if let Some(host) = host.as_deref() {
            self.register_sections(host, &sections);
        }
        self.apply_update(
            host.as_deref(),
            || splice::insert_at(&mut self.sections.write(), sections, positions),
            |host| host.insert_sections(positions, animation),
            None,
        );
    }

    /// Appends `sections` after the last section.
    pub fn append_sections(&self, sections: Vec<SectionRef>, animation: RowAnimation) {
        let start = self.number_of_sections();
        let positions = IndexSet::range(start..start + sections.len());
        self.insert_sections(sections, &positions, animation);
    }

    /// Removes `sections`, comparing by identity.
    ///
    /// # Panics
    ///
    /// Panics if any of `sections` is not one of the manager's sections.
    #[tracing::instrument(
        skip_all,
        target = "lattice_table::manager",
        level = "trace",
        fields(count = sections.len())
    )]
    pub fn remove_sections(&self, sections: &[SectionRef], animation: RowAnimation) {
        let positions: IndexSet = sections
            .iter()
            .map(|section| self.section_index_or_fatal(section))
            .collect();
        if positions.is_empty() {
            return;
        }
        self.splice_out_sections(&positions, animation);
    }

    /// Removes the sections at `positions`.
    ///
    /// # Panics
    ///
    /// Panics if a position is out of bounds.
    #[tracing::instrument(
        skip_all,
        target = "lattice_table::manager",
        level = "trace",
        fields(count = positions.len())
    )]
    pub fn remove_sections_at(&self, positions: &IndexSet, animation: RowAnimation) {
        if let Err(err) = splice::check_remove(self.number_of_sections(), positions) {
            fatal(err.into());
        }
        if positions.is_empty() {
            return;
        }
        self.splice_out_sections(positions, animation);
    }

    fn splice_out_sections(&self, positions: &IndexSet, animation: RowAnimation) {
        self.apply_update(
            self.host().as_deref(),
            || splice::remove_at(&mut self.sections.write(), positions),
            |host| host.delete_sections(positions, animation),
            None,
        );
    }

    /// Replaces the sections at `positions` with `sections`, and reloads
    /// them.
    ///
    /// # Panics
    ///
    /// Panics if the number of positions differs from the number of
    /// sections, or if a position is out of bounds.
    #[tracing::instrument(
        skip_all,
        target = "lattice_table::manager",
        level = "trace",
        fields(count = sections.len())
    )]
    pub fn replace_sections(
        &self,
        positions: &IndexSet,
        sections: Vec<SectionRef>,
        animation: RowAnimation,
    ) {
        if let Err(err) = splice::check_replace(self.number_of_sections(), sections.len(), positions)
        {
            fatal(err.into());
        }
        if sections.is_empty() {
            return;
        }

        let host = self.host();
        if let Some(host) = host.as_deref() {
            self.register_sections(host, &sections);
        }
        self.apply_update(
            host.as_deref(),
            || splice::replace_at(&mut self.sections.write(), sections, positions),
            |host| host.reload_sections(positions, animation),
            None,
        );
    }

    /// Reloads `sections` without changing the model.
    ///
    /// # Panics
    ///
    /// Panics if any of `sections` is not one of the manager's sections.
    #[tracing::instrument(
        skip_all,
        target = "lattice_table::manager",
        level = "trace",
        fields(count = sections.len())
    )]
    pub fn reload_sections(&self, sections: &[SectionRef], animation: RowAnimation) {
        let positions: IndexSet = sections
            .iter()
            .map(|section| self.section_index_or_fatal(section))
            .collect();
        if positions.is_empty() {
            return;
        }
        self.apply_update(
            self.host().as_deref(),
            || {},
            |host| host.reload_sections(&positions, animation),
            None,
        );
    }
}
