//! A minimal host widget for unit tests.

use std::sync::{Arc, Weak};

use lattice_table_core::{IndexPath, IndexSet, Rect, RowAnimation, ScrollPosition};
use parking_lot::Mutex;

use crate::host::{
    CellTemplate, ListDataSource, ListDelegate, ListHost, ListPrefetchDataSource, ViewHandle,
};

/// Remembers registered templates and ignores everything else.
#[derive(Default)]
pub(crate) struct NullHost {
    templates: Mutex<Vec<(String, Arc<dyn CellTemplate>)>>,
}

impl NullHost {
    pub(crate) fn registered(&self) -> Vec<String> {
        self.templates
            .lock()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl ListHost for NullHost {
    fn register_template(&self, identifier: &str, template: Arc<dyn CellTemplate>) {
        self.templates
            .lock()
            .push((identifier.to_string(), template));
    }

    fn dequeue_cell(&self, identifier: &str, _path: IndexPath) -> Option<ViewHandle> {
        self.templates
            .lock()
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, template)| template.make_cell())
    }

    fn reload_data(&self) {}
    fn begin_updates(&self) {}
    fn end_updates(&self) {}
    fn insert_rows(&self, _paths: &[IndexPath], _animation: RowAnimation) {}
    fn delete_rows(&self, _paths: &[IndexPath], _animation: RowAnimation) {}
    fn reload_rows(&self, _paths: &[IndexPath], _animation: RowAnimation) {}
    fn insert_sections(&self, _sections: &IndexSet, _animation: RowAnimation) {}
    fn delete_sections(&self, _sections: &IndexSet, _animation: RowAnimation) {}
    fn reload_sections(&self, _sections: &IndexSet, _animation: RowAnimation) {}

    fn rect_for_row(&self, _path: IndexPath) -> Rect {
        Rect::ZERO
    }

    fn scroll_to_row(&self, _path: IndexPath, _position: ScrollPosition, _animated: bool) {}
    fn set_data_source(&self, _source: Option<Weak<dyn ListDataSource>>) {}
    fn set_delegate(&self, _delegate: Option<Weak<dyn ListDelegate>>) {}
    fn set_prefetch_data_source(&self, _source: Option<Weak<dyn ListPrefetchDataSource>>) {}
}
