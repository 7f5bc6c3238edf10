//! Shared fixtures for the list manager integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Weak};

use lattice_table::host::{
    CellTemplate, ListDataSource, ListDelegate, ListHost, ListPrefetchDataSource, UpdateCompletion,
    ViewHandle,
};
use lattice_table::item::{
    RowAction, RowActionStyle, RowEditing, RowHandlers, RowItem, RowPrefetching, RowRef,
    SectionRef, TableSection, same_row,
};
use lattice_table::registry::ReuseKind;
use lattice_table::{EditingStyle, IndexPath, IndexSet, Rect, RowAnimation, ScrollPosition};
use parking_lot::Mutex;

/// A shared, ordered record of calls made to test items.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Routes manager logs to the test output. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// A command the manager issued to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Register(String),
    ReloadData,
    BeginUpdates,
    EndUpdates,
    InsertRows(Vec<IndexPath>, RowAnimation),
    DeleteRows(Vec<IndexPath>, RowAnimation),
    ReloadRows(Vec<IndexPath>, RowAnimation),
    InsertSections(Vec<usize>, RowAnimation),
    DeleteSections(Vec<usize>, RowAnimation),
    ReloadSections(Vec<usize>, RowAnimation),
    ScrollToRow(IndexPath, ScrollPosition, bool),
}

/// A host widget that records every command and, like a real widget,
/// re-reads the row counts from its data source when a batch ends.
pub struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
    templates: Mutex<Vec<(String, Arc<dyn CellTemplate>)>>,
    counts_after_batch: Mutex<Vec<Vec<usize>>>,
    pending_completions: Mutex<Vec<UpdateCompletion>>,
    data_source: Mutex<Option<Weak<dyn ListDataSource>>>,
    delegate: Mutex<Option<Weak<dyn ListDelegate>>>,
    prefetch_source: Mutex<Option<Weak<dyn ListPrefetchDataSource>>>,
    prefetching_supported: bool,
    synchronous_completions: bool,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::with_prefetching(true))
    }

    pub fn without_prefetching() -> Arc<Self> {
        Arc::new(Self::with_prefetching(false))
    }

    /// A host that runs batch completions as soon as the batch ends, the
    /// way `ListHost::end_updates_with_completion` does by default.
    pub fn with_synchronous_completions() -> Arc<Self> {
        Arc::new(Self {
            synchronous_completions: true,
            ..Self::with_prefetching(true)
        })
    }

    fn with_prefetching(prefetching_supported: bool) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            templates: Mutex::new(Vec::new()),
            counts_after_batch: Mutex::new(Vec::new()),
            pending_completions: Mutex::new(Vec::new()),
            data_source: Mutex::new(None),
            delegate: Mutex::new(None),
            prefetch_source: Mutex::new(None),
            prefetching_supported,
            synchronous_completions: false,
        }
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().clone()
    }

    /// Returns and forgets the recorded events.
    pub fn take_events(&self) -> Vec<HostEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Events other than template registration.
    pub fn updates(&self) -> Vec<HostEvent> {
        self.events()
            .into_iter()
            .filter(|event| !matches!(event, HostEvent::Register(_)))
            .collect()
    }

    pub fn registrations(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Register(identifier) => Some(identifier),
                _ => None,
            })
            .collect()
    }

    /// Row counts per section as read through the data source at the end
    /// of each batch.
    pub fn counts_after_batch(&self) -> Vec<Vec<usize>> {
        self.counts_after_batch.lock().clone()
    }

    /// Runs the completions of finished batches, as if their animations
    /// ended.
    pub fn finish_animations(&self) {
        let completions = std::mem::take(&mut *self.pending_completions.lock());
        for completion in completions {
            completion();
        }
    }

    pub fn pending_animations(&self) -> usize {
        self.pending_completions.lock().len()
    }

    pub fn data_source(&self) -> Arc<dyn ListDataSource> {
        self.try_data_source().expect("data source attached")
    }

    fn try_data_source(&self) -> Option<Arc<dyn ListDataSource>> {
        self.data_source.lock().as_ref().and_then(Weak::upgrade)
    }

    pub fn delegate(&self) -> Arc<dyn ListDelegate> {
        self.delegate
            .lock()
            .as_ref()
            .and_then(Weak::upgrade)
            .expect("delegate attached")
    }

    pub fn prefetch_source(&self) -> Option<Arc<dyn ListPrefetchDataSource>> {
        self.prefetch_source.lock().as_ref().and_then(Weak::upgrade)
    }

    /// Row counts per section as the widget would see them.
    pub fn visible_counts(&self) -> Vec<usize> {
        let Some(source) = self.try_data_source() else {
            return Vec::new();
        };
        let sections = source.number_of_sections(self);
        (0..sections)
            .map(|section| source.number_of_rows(self, section))
            .collect()
    }

    fn record(&self, event: HostEvent) {
        self.events.lock().push(event);
    }
}

impl ListHost for RecordingHost {
    fn register_template(&self, identifier: &str, template: Arc<dyn CellTemplate>) {
        self.templates
            .lock()
            .push((identifier.to_string(), template));
        self.record(HostEvent::Register(identifier.to_string()));
    }

    fn dequeue_cell(&self, identifier: &str, _path: IndexPath) -> Option<ViewHandle> {
        let template = self
            .templates
            .lock()
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, template)| template.clone())?;
        Some(template.make_cell())
    }

    fn reload_data(&self) {
        self.record(HostEvent::ReloadData);
    }

    fn begin_updates(&self) {
        self.record(HostEvent::BeginUpdates);
    }

    fn end_updates(&self) {
        self.record(HostEvent::EndUpdates);
        let counts = self.visible_counts();
        self.counts_after_batch.lock().push(counts);
    }

    fn end_updates_with_completion(&self, completion: UpdateCompletion) {
        self.end_updates();
        if self.synchronous_completions {
            completion();
        } else {
            self.pending_completions.lock().push(completion);
        }
    }

    fn insert_rows(&self, paths: &[IndexPath], animation: RowAnimation) {
        self.record(HostEvent::InsertRows(paths.to_vec(), animation));
    }

    fn delete_rows(&self, paths: &[IndexPath], animation: RowAnimation) {
        self.record(HostEvent::DeleteRows(paths.to_vec(), animation));
    }

    fn reload_rows(&self, paths: &[IndexPath], animation: RowAnimation) {
        self.record(HostEvent::ReloadRows(paths.to_vec(), animation));
    }

    fn insert_sections(&self, sections: &IndexSet, animation: RowAnimation) {
        self.record(HostEvent::InsertSections(sections.iter().collect(), animation));
    }

    fn delete_sections(&self, sections: &IndexSet, animation: RowAnimation) {
        self.record(HostEvent::DeleteSections(sections.iter().collect(), animation));
    }

    fn reload_sections(&self, sections: &IndexSet, animation: RowAnimation) {
        self.record(HostEvent::ReloadSections(sections.iter().collect(), animation));
    }

    fn rect_for_row(&self, path: IndexPath) -> Rect {
        Rect::new(0.0, 44.0 * path.row() as f64, 320.0, 44.0)
    }

    fn scroll_to_row(&self, path: IndexPath, position: ScrollPosition, animated: bool) {
        self.record(HostEvent::ScrollToRow(path, position, animated));
    }

    fn supports_prefetching(&self) -> bool {
        self.prefetching_supported
    }

    fn set_data_source(&self, source: Option<Weak<dyn ListDataSource>>) {
        *self.data_source.lock() = source;
    }

    fn set_delegate(&self, delegate: Option<Weak<dyn ListDelegate>>) {
        *self.delegate.lock() = delegate;
    }

    fn set_prefetch_data_source(&self, source: Option<Weak<dyn ListPrefetchDataSource>>) {
        *self.prefetch_source.lock() = source;
    }
}

/// A row with a name, optional capabilities and a call log.
pub struct TestRow {
    pub name: &'static str,
    pub handlers: RowHandlers,
    kind: ReuseKind,
    editing: Option<TestEditing>,
    prefetching: Option<TestPrefetching>,
    log: CallLog,
}

impl TestRow {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: RowHandlers::new(),
            kind: ReuseKind::template("text", || ViewHandle::new("text cell")),
            editing: None,
            prefetching: None,
            log: call_log(),
        }
    }

    pub fn kind(mut self, kind: ReuseKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn log(mut self, log: &CallLog) -> Self {
        self.log = log.clone();
        self
    }

    /// Makes the row editable; `can_commit` decides whether a swipe-delete
    /// is authorized.
    pub fn editable(mut self, can_commit: bool) -> Self {
        self.editing = Some(TestEditing {
            name: self.name,
            can_commit,
            log: self.log.clone(),
        });
        self
    }

    pub fn prefetchable(mut self) -> Self {
        self.prefetching = Some(TestPrefetching {
            name: self.name,
            log: self.log.clone(),
        });
        self
    }

    pub fn shared(self) -> RowRef {
        Arc::new(self)
    }
}

impl RowItem for TestRow {
    fn reuse_kind(&self) -> ReuseKind {
        self.kind.clone()
    }

    fn height(&self, _list: &dyn ListHost) -> f64 {
        44.0
    }

    fn configure_cell(&self, _cell: &ViewHandle, path: IndexPath) {
        self.log.lock().push(format!("configure {} {path}", self.name));
    }

    fn handlers(&self) -> Option<&RowHandlers> {
        Some(&self.handlers)
    }

    fn will_display_cell(&self, _list: &dyn ListHost, _cell: &ViewHandle, path: IndexPath) {
        self.log.lock().push(format!("will_display {} {path}", self.name));
    }

    fn editing(&self) -> Option<&dyn RowEditing> {
        self.editing.as_ref().map(|editing| editing as &dyn RowEditing)
    }

    fn prefetching(&self) -> Option<&dyn RowPrefetching> {
        self.prefetching
            .as_ref()
            .map(|prefetching| prefetching as &dyn RowPrefetching)
    }
}

struct TestEditing {
    name: &'static str,
    can_commit: bool,
    log: CallLog,
}

impl RowEditing for TestEditing {
    fn can_edit(&self, _list: &dyn ListHost) -> bool {
        true
    }

    fn can_commit(&self, style: EditingStyle, _list: &dyn ListHost) -> bool {
        self.can_commit && style == EditingStyle::Delete
    }

    fn edit_actions(&self, _list: &dyn ListHost, _path: IndexPath) -> Option<Vec<RowAction>> {
        Some(vec![RowAction::new(
            RowActionStyle::Destructive,
            "Delete",
            |_, _| {},
        )])
    }

    fn did_remove(&self, _list: &dyn ListHost, path: IndexPath) {
        self.log.lock().push(format!("did_remove {} {path}", self.name));
    }

    fn did_finish_removing_animation(&self, _list: &dyn ListHost, path: IndexPath) {
        self.log
            .lock()
            .push(format!("did_finish_removing {} {path}", self.name));
    }
}

struct TestPrefetching {
    name: &'static str,
    log: CallLog,
}

impl RowPrefetching for TestPrefetching {
    fn prefetch(&self, _list: &dyn ListHost, path: IndexPath) {
        self.log.lock().push(format!("prefetch {} {path}", self.name));
    }

    fn cancel_prefetching(&self, _list: &dyn ListHost, path: IndexPath) {
        self.log.lock().push(format!("cancel {} {path}", self.name));
    }
}

pub fn rows(names: &[&'static str]) -> Vec<RowRef> {
    names.iter().map(|&name| TestRow::new(name).shared()).collect()
}

pub fn section(rows: Vec<RowRef>) -> SectionRef {
    Arc::new(TableSection::new(rows))
}

/// Asserts that `section` holds exactly `expected`, by identity and in order.
#[track_caller]
pub fn assert_rows(section: &SectionRef, expected: &[&RowRef]) {
    let actual = section.rows().to_vec();
    assert_eq!(actual.len(), expected.len(), "row count of section");
    for (index, (actual, expected)) in actual.iter().zip(expected).enumerate() {
        assert!(same_row(actual, expected), "unexpected row at position {index}");
    }
}
