//! Widget callbacks answered by the list manager.
//!
//! Each callback resolves its index path against the current model and
//! forwards to the row or section found there. Paths the model doesn't know
//! about are routine while the widget animates, so they get neutral answers
//! rather than errors.

use std::any::Any;

use lattice_table_core::logging::{span_names, targets};
use lattice_table_core::{EditingStyle, IndexPath};

use super::ListManager;
use crate::host::{
    ListDataSource, ListDelegate, ListHost, ListPrefetchDataSource, UpdateCompletion, ViewHandle,
};
use crate::item::{MenuAction, RowAction, RowEditing, RowRef};

impl ListManager {
    /// Runs `f` with the editing capability of the row at `path`.
    fn with_editing<R>(
        &self,
        path: IndexPath,
        fallback: R,
        f: impl FnOnce(&dyn RowEditing) -> R,
    ) -> R {
        match self.row(path) {
            Some(row) => row.editing().map_or(fallback, f),
            None => fallback,
        }
    }

    /// Removes the row at `path` after the user confirmed a swipe-to-delete.
    fn commit_delete(&self, list: &dyn ListHost, path: IndexPath) {
        let (Some(section), Some(row)) = (self.section_for(path), self.row(path)) else {
            return;
        };
        let Some(editing) = row.editing() else {
            return;
        };
        if !editing.can_commit(EditingStyle::Delete, list) {
            tracing::trace!(target: targets::DISPATCH, %path, "delete commit refused by row");
            return;
        }

        let host = self.host.clone();
        let removed: RowRef = row.clone();
        let completion: UpdateCompletion = Box::new(move || {
            let Some(host) = host.upgrade() else {
                return;
            };
            if let Some(editing) = removed.editing() {
                editing.did_finish_removing_animation(&*host, path);
            }
        });
        self.remove_rows_with_completion(
            &[row.clone()],
            &section,
            self.config.delete_animation,
            Some(completion),
        );
        editing.did_remove(list, path);
    }
}

impl ListDataSource for ListManager {
    fn number_of_sections(&self, _list: &dyn ListHost) -> usize {
        ListManager::number_of_sections(self)
    }

    fn number_of_rows(&self, _list: &dyn ListHost, section: usize) -> usize {
        ListManager::number_of_rows(self, section)
    }

    fn cell_for_row(&self, list: &dyn ListHost, path: IndexPath) -> Option<ViewHandle> {
        self.row(path)?.cell(list, path)
    }

    fn title_for_header(&self, list: &dyn ListHost, section: usize) -> Option<String> {
        self.section(section)?.title_for_header(list)
    }

    fn title_for_footer(&self, list: &dyn ListHost, section: usize) -> Option<String> {
        self.section(section)?.title_for_footer(list)
    }

    fn can_edit_row(&self, list: &dyn ListHost, path: IndexPath) -> bool {
        self.with_editing(path, false, |editing| editing.can_edit(list))
    }

    fn commit_edit(&self, list: &dyn ListHost, style: EditingStyle, path: IndexPath) {
        let _span = tracing::trace_span!(target: targets::DISPATCH, span_names::DISPATCH).entered();
        match style {
            EditingStyle::Delete => self.commit_delete(list, path),
            other => {
                tracing::trace!(target: targets::DISPATCH, %path, ?other, "ignoring edit commit");
            }
        }
    }

    fn can_move_row(&self, list: &dyn ListHost, path: IndexPath) -> bool {
        self.row(path).is_some_and(|row| row.can_move(list, path))
    }

    fn move_row(&self, list: &dyn ListHost, from: IndexPath, to: IndexPath) {
        if let Some(delegate) = self.delegate() {
            delegate.move_row(list, from, to);
        }
    }

    fn section_index_titles(&self, list: &dyn ListHost) -> Option<Vec<String>> {
        self.delegate()?.section_index_titles(list)
    }

    fn section_for_index_title(&self, list: &dyn ListHost, title: &str, index: usize) -> usize {
        self.delegate()
            .map_or(0, |delegate| delegate.section_for_index_title(list, title, index))
    }
}

impl ListDelegate for ListManager {
    fn height_for_row(&self, list: &dyn ListHost, path: IndexPath) -> f64 {
        self.row(path).map_or(0.0, |row| row.height(list))
    }

    fn estimated_height_for_row(&self, list: &dyn ListHost, path: IndexPath) -> f64 {
        self.row(path).map_or(0.0, |row| row.estimated_height(list))
    }

    fn will_display_cell(&self, list: &dyn ListHost, cell: &ViewHandle, path: IndexPath) {
        if let Some(row) = self.row(path) {
            row.will_display_cell(list, cell, path);
        }
    }

    fn did_end_displaying_cell(&self, list: &dyn ListHost, cell: &ViewHandle, path: IndexPath) {
        if let Some(row) = self.row(path) {
            row.did_end_displaying_cell(list, cell, path);
        }
    }

    fn should_highlight_row(&self, list: &dyn ListHost, path: IndexPath) -> bool {
        self.row(path)
            .is_none_or(|row| row.should_highlight(list, path))
    }

    fn did_highlight_row(&self, list: &dyn ListHost, path: IndexPath) {
        if let Some(row) = self.row(path) {
            row.did_highlight(list, path);
        }
    }

    fn did_unhighlight_row(&self, list: &dyn ListHost, path: IndexPath) {
        if let Some(row) = self.row(path) {
            row.did_unhighlight(list, path);
        }
    }

    fn will_select_row(&self, list: &dyn ListHost, path: IndexPath) -> Option<IndexPath> {
        match self.row(path) {
            Some(row) => row.will_select(list, path),
            None => Some(path),
        }
    }

    fn will_deselect_row(&self, list: &dyn ListHost, path: IndexPath) -> Option<IndexPath> {
        match self.row(path) {
            Some(row) => row.will_deselect(list, path),
            None => Some(path),
        }
    }

    fn did_select_row(&self, list: &dyn ListHost, path: IndexPath) {
        if let Some(row) = self.row(path) {
            row.did_select(list, path);
        }
    }

    fn did_deselect_row(&self, list: &dyn ListHost, path: IndexPath) {
        if let Some(row) = self.row(path) {
            row.did_deselect(list, path);
        }
    }

    fn height_for_header(&self, list: &dyn ListHost, section: usize) -> f64 {
        self.section(section)
            .map_or(0.0, |section| section.height_for_header(list))
    }

    fn height_for_footer(&self, list: &dyn ListHost, section: usize) -> f64 {
        self.section(section)
            .map_or(0.0, |section| section.height_for_footer(list))
    }

    fn view_for_header(&self, list: &dyn ListHost, section: usize) -> Option<ViewHandle> {
        self.section(section)?.view_for_header(list)
    }

    fn view_for_footer(&self, list: &dyn ListHost, section: usize) -> Option<ViewHandle> {
        self.section(section)?.view_for_footer(list)
    }

    fn will_display_header_view(&self, _list: &dyn ListHost, view: &ViewHandle, section: usize) {
        if let Some(item) = self.section(section)
            && let Some(display) = item.header_footer_display()
        {
            display.will_display_header_view(view, section);
        }
    }

    fn will_display_footer_view(&self, _list: &dyn ListHost, view: &ViewHandle, section: usize) {
        if let Some(item) = self.section(section)
            && let Some(display) = item.header_footer_display()
        {
            display.will_display_footer_view(view, section);
        }
    }

    fn did_end_displaying_header_view(
        &self,
        _list: &dyn ListHost,
        view: &ViewHandle,
        section: usize,
    ) {
        if let Some(item) = self.section(section)
            && let Some(display) = item.header_footer_display()
        {
            display.did_end_displaying_header_view(view, section);
        }
    }

    fn did_end_displaying_footer_view(
        &self,
        _list: &dyn ListHost,
        view: &ViewHandle,
        section: usize,
    ) {
        if let Some(item) = self.section(section)
            && let Some(display) = item.header_footer_display()
        {
            display.did_end_displaying_footer_view(view, section);
        }
    }

    fn target_index_path_for_move(
        &self,
        list: &dyn ListHost,
        source: IndexPath,
        proposed: IndexPath,
    ) -> IndexPath {
        match self.delegate() {
            Some(delegate) => delegate.target_index_path_for_move(list, source, proposed),
            None => proposed,
        }
    }

    fn indentation_level(&self, list: &dyn ListHost, path: IndexPath) -> usize {
        self.row(path)
            .map_or(0, |row| row.indentation_level(list, path))
    }

    fn edit_actions(&self, list: &dyn ListHost, path: IndexPath) -> Option<Vec<RowAction>> {
        self.with_editing(path, None, |editing| editing.edit_actions(list, path))
    }

    fn editing_style(&self, list: &dyn ListHost, path: IndexPath) -> EditingStyle {
        self.with_editing(path, EditingStyle::Delete, |editing| {
            editing.editing_style(list, path)
        })
    }

    fn delete_confirmation_title(&self, list: &dyn ListHost, path: IndexPath) -> Option<String> {
        self.with_editing(path, None, |editing| {
            editing.delete_confirmation_title(list, path)
        })
    }

    fn should_indent_while_editing(&self, list: &dyn ListHost, path: IndexPath) -> bool {
        self.with_editing(path, true, |editing| {
            editing.should_indent_while_editing(list, path)
        })
    }

    fn will_begin_editing(&self, list: &dyn ListHost, path: IndexPath) {
        self.with_editing(path, (), |editing| editing.will_begin_editing(list, path));
    }

    fn did_end_editing(&self, list: &dyn ListHost, path: Option<IndexPath>) {
        if let Some(path) = path {
            self.with_editing(path, (), |editing| editing.did_end_editing(list, Some(path)));
        }
    }

    fn should_show_menu(&self, list: &dyn ListHost, path: IndexPath) -> bool {
        self.with_editing(path, false, |editing| editing.should_show_menu(list, path))
    }

    fn can_perform_action(
        &self,
        list: &dyn ListHost,
        action: &MenuAction,
        path: IndexPath,
        sender: Option<&(dyn Any + Send + Sync)>,
    ) -> bool {
        self.with_editing(path, false, |editing| {
            editing.can_perform_action(action, list, path, sender)
        })
    }

    fn perform_action(
        &self,
        list: &dyn ListHost,
        action: &MenuAction,
        path: IndexPath,
        sender: Option<&(dyn Any + Send + Sync)>,
    ) {
        self.with_editing(path, (), |editing| {
            editing.perform_action(action, list, path, sender);
        });
    }

    fn did_scroll(&self, list: &dyn ListHost) {
        if let Some(delegate) = self.scroll_delegate() {
            delegate.did_scroll(list);
        }
    }

    fn will_begin_dragging(&self, list: &dyn ListHost) {
        if let Some(delegate) = self.scroll_delegate() {
            delegate.will_begin_dragging(list);
        }
    }

    fn did_end_dragging(&self, list: &dyn ListHost, will_decelerate: bool) {
        if let Some(delegate) = self.scroll_delegate() {
            delegate.did_end_dragging(list, will_decelerate);
        }
    }

    fn did_end_decelerating(&self, list: &dyn ListHost) {
        if let Some(delegate) = self.scroll_delegate() {
            delegate.did_end_decelerating(list);
        }
    }
}

impl ListPrefetchDataSource for ListManager {
    fn prefetch_rows(&self, list: &dyn ListHost, paths: &[IndexPath]) {
        for &path in paths {
            match self.row(path) {
                Some(row) => {
                    if let Some(prefetching) = row.prefetching() {
                        prefetching.prefetch(list, path);
                    }
                }
                None => tracing::trace!(target: targets::DISPATCH, %path, "skipping prefetch"),
            }
        }
    }

    fn cancel_prefetching(&self, list: &dyn ListHost, paths: &[IndexPath]) {
        for &path in paths {
            if let Some(row) = self.row(path)
                && let Some(prefetching) = row.prefetching()
            {
                prefetching.cancel_prefetching(list, path);
            }
        }
    }
}
