//! Tests for widget callbacks routed through the list manager.

mod common;

use std::sync::{Arc, Weak};

use common::{HostEvent, RecordingHost, TestRow, assert_rows, call_log, rows, section};
use lattice_table::host::{ListHost, ViewHandle};
use lattice_table::item::{
    RowEditing, RowItem, RowList, RowRef, SectionHeaderFooterDisplay, SectionItem, SectionRef,
    TableSection,
};
use lattice_table::registry::ReuseKind;
use lattice_table::{
    EditingStyle, IndexPath, ListManager, ListManagerDelegate, ManagerConfig, Rect, RowAnimation,
    ScrollDelegate, ScrollPosition, TableError,
};
use parking_lot::Mutex;

fn populated(host: &Arc<RecordingHost>, rows: Vec<RowRef>) -> (Arc<ListManager>, SectionRef) {
    let manager = ListManager::new(host);
    let first = section(rows);
    manager.set_sections(vec![first.clone()]);
    host.take_events();
    (manager, first)
}

// =========================================================================
// Data Source
// =========================================================================

#[test]
fn test_manager_attaches_as_data_source_and_delegate() {
    let host = RecordingHost::new();
    let (_manager, _first) = populated(&host, rows(&["a", "b"]));

    assert_eq!(host.data_source().number_of_sections(&*host), 1);
    assert_eq!(host.data_source().number_of_rows(&*host, 0), 2);
    assert_eq!(host.data_source().number_of_rows(&*host, 9), 0);
    assert!(host.prefetch_source().is_none());
}

#[test]
fn test_cell_for_row_dequeues_and_configures() {
    let host = RecordingHost::new();
    let log = call_log();
    let row = TestRow::new("a").log(&log).shared();
    let (_manager, _first) = populated(&host, vec![row]);

    let cell = host
        .data_source()
        .cell_for_row(&*host, IndexPath::new(0, 0));

    assert_eq!(
        cell.as_ref().and_then(|c| c.downcast_ref::<&str>()),
        Some(&"text cell")
    );
    assert_eq!(log.lock().clone(), vec!["configure a [0, 0]".to_string()]);
}

#[test]
fn test_out_of_range_path_is_benign() {
    let host = RecordingHost::new();
    let (manager, _first) = populated(&host, rows(&["a", "b"]));
    let source = host.data_source();
    let delegate = host.delegate();
    let far = IndexPath::new(0, 5);

    assert!(manager.row(far).is_none());
    assert!(source.cell_for_row(&*host, far).is_none());
    assert!(!source.can_edit_row(&*host, far));
    assert!(!source.can_move_row(&*host, far));
    assert_eq!(delegate.height_for_row(&*host, far), 0.0);
    assert_eq!(delegate.estimated_height_for_row(&*host, far), 0.0);
    assert_eq!(delegate.indentation_level(&*host, far), 0);
    assert!(delegate.should_highlight_row(&*host, far));
    assert_eq!(delegate.will_select_row(&*host, far), Some(far));
    assert_eq!(delegate.editing_style(&*host, far), EditingStyle::Delete);
    assert!(delegate.edit_actions(&*host, far).is_none());
    assert!(delegate.should_indent_while_editing(&*host, far));
    assert_eq!(delegate.height_for_header(&*host, 3), 0.0);
    assert!(source.title_for_header(&*host, 3).is_none());

    // Notifications for unknown paths are dropped.
    delegate.did_select_row(&*host, far);
    source.commit_edit(&*host, EditingStyle::Delete, far);
    assert!(host.events().is_empty());
}

#[test]
fn test_section_titles_and_heights() {
    let host = RecordingHost::new();
    let manager = ListManager::new(&host);
    let titled: SectionRef = Arc::new(
        TableSection::new(rows(&["a"]))
            .with_header_title("Header")
            .with_footer_title("Footer"),
    );
    manager.set_sections(vec![titled, section(Vec::new())]);
    let source = host.data_source();
    let delegate = host.delegate();

    assert_eq!(source.title_for_header(&*host, 0).as_deref(), Some("Header"));
    assert_eq!(source.title_for_footer(&*host, 0).as_deref(), Some("Footer"));
    assert_eq!(delegate.height_for_header(&*host, 0), 22.0);
    assert_eq!(delegate.height_for_footer(&*host, 1), 0.0);
    assert!(delegate.view_for_header(&*host, 0).is_none());
}

// =========================================================================
// Highlight and Selection
// =========================================================================

#[test]
fn test_highlight_defaults_are_permissive() {
    let host = RecordingHost::new();
    let (_manager, _first) = populated(&host, rows(&["a"]));
    let delegate = host.delegate();
    let path = IndexPath::new(0, 0);

    assert!(delegate.should_highlight_row(&*host, path));
    assert_eq!(delegate.will_select_row(&*host, path), Some(path));
    assert_eq!(delegate.will_deselect_row(&*host, path), Some(path));
    assert_eq!(delegate.height_for_row(&*host, path), 44.0);
    assert_eq!(delegate.estimated_height_for_row(&*host, path), 2.0);
}

#[test]
fn test_selection_handlers_are_consulted() {
    let host = RecordingHost::new();
    let row = Arc::new(TestRow::new("a"));
    let selected = Arc::new(Mutex::new(Vec::new()));
    row.handlers.on_should_highlight(|_, _| false);
    row.handlers.on_will_select(|_, _| None);
    let sink = selected.clone();
    row.handlers.on_did_select(move |_, path| sink.lock().push(path));
    let (_manager, _first) = populated(&host, vec![row.clone() as RowRef]);
    let delegate = host.delegate();
    let path = IndexPath::new(0, 0);

    assert!(!delegate.should_highlight_row(&*host, path));
    assert_eq!(delegate.will_select_row(&*host, path), None);
    delegate.did_select_row(&*host, path);
    assert_eq!(selected.lock().clone(), vec![path]);
}

#[test]
fn test_display_notifications_forwarded() {
    let host = RecordingHost::new();
    let log = call_log();
    let (_manager, _first) = populated(&host, vec![TestRow::new("a").log(&log).shared()]);
    let cell = ViewHandle::new("cell");

    host.delegate()
        .will_display_cell(&*host, &cell, IndexPath::new(0, 0));

    assert_eq!(log.lock().clone(), vec!["will_display a [0, 0]".to_string()]);
}

struct DisplaySection {
    rows: RowList,
    seen: Mutex<Vec<String>>,
}

impl SectionItem for DisplaySection {
    fn rows(&self) -> &RowList {
        &self.rows
    }

    fn header_footer_display(&self) -> Option<&dyn SectionHeaderFooterDisplay> {
        Some(self)
    }
}

impl SectionHeaderFooterDisplay for DisplaySection {
    fn will_display_header_view(&self, _view: &ViewHandle, section: usize) {
        self.seen.lock().push(format!("header {section}"));
    }

    fn did_end_displaying_footer_view(&self, _view: &ViewHandle, section: usize) {
        self.seen.lock().push(format!("footer gone {section}"));
    }
}

#[test]
fn test_header_footer_display_capability() {
    let host = RecordingHost::new();
    let manager = ListManager::new(&host);
    let display = Arc::new(DisplaySection {
        rows: RowList::default(),
        seen: Mutex::new(Vec::new()),
    });
    manager.set_sections(vec![section(Vec::new()), display.clone() as SectionRef]);
    let delegate = host.delegate();
    let view = ViewHandle::new("header");

    delegate.will_display_header_view(&*host, &view, 0);
    delegate.will_display_header_view(&*host, &view, 1);
    delegate.did_end_displaying_footer_view(&*host, &view, 1);

    assert_eq!(
        display.seen.lock().clone(),
        vec!["header 1".to_string(), "footer gone 1".to_string()]
    );
}

// =========================================================================
// Editing
// =========================================================================

#[test]
fn test_commit_delete_removes_row_and_notifies_in_order() {
    let host = RecordingHost::new();
    let log = call_log();
    let keep = TestRow::new("keep").shared();
    let doomed = TestRow::new("doomed").log(&log).editable(true).shared();
    let manager = ListManager::builder(&host)
        .delete_animation(RowAnimation::Left)
        .build();
    let first = section(vec![keep.clone(), doomed]);
    manager.set_sections(vec![first.clone()]);
    host.take_events();
    let path = IndexPath::new(0, 1);

    assert!(host.data_source().can_edit_row(&*host, path));
    host.data_source()
        .commit_edit(&*host, EditingStyle::Delete, path);

    assert_rows(&first, &[&keep]);
    assert_eq!(
        host.updates(),
        vec![
            HostEvent::BeginUpdates,
            HostEvent::DeleteRows(vec![path], RowAnimation::Left),
            HostEvent::EndUpdates,
        ]
    );
    assert_eq!(log.lock().clone(), vec!["did_remove doomed [0, 1]".to_string()]);
    assert_eq!(host.pending_animations(), 1);

    host.finish_animations();
    assert_eq!(
        log.lock().clone(),
        vec![
            "did_remove doomed [0, 1]".to_string(),
            "did_finish_removing doomed [0, 1]".to_string(),
        ]
    );
}

#[test]
fn test_commit_delete_refused_by_row() {
    let host = RecordingHost::new();
    let log = call_log();
    let row = TestRow::new("stubborn").log(&log).editable(false).shared();
    let (_manager, first) = populated(&host, vec![row.clone()]);

    host.data_source()
        .commit_edit(&*host, EditingStyle::Delete, IndexPath::new(0, 0));

    assert_rows(&first, &[&row]);
    assert!(host.events().is_empty());
    assert!(log.lock().is_empty());
}

#[test]
fn test_commit_insert_and_plain_rows_ignored() {
    let host = RecordingHost::new();
    let plain = TestRow::new("plain").shared();
    let editable = TestRow::new("editable").editable(true).shared();
    let (_manager, first) = populated(&host, vec![plain.clone(), editable.clone()]);
    let source = host.data_source();

    source.commit_edit(&*host, EditingStyle::Delete, IndexPath::new(0, 0));
    source.commit_edit(&*host, EditingStyle::Insert, IndexPath::new(0, 1));

    assert_rows(&first, &[&plain, &editable]);
    assert!(host.events().is_empty());
}

#[test]
fn test_edit_actions_from_capability() {
    let host = RecordingHost::new();
    let (_manager, _first) = populated(&host, vec![TestRow::new("a").editable(true).shared()]);

    let actions = host
        .delegate()
        .edit_actions(&*host, IndexPath::new(0, 0))
        .unwrap_or_default();

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].title, "Delete");
}

/// A deletable row that refills its section with a placeholder once its
/// removal animation ends.
#[derive(Default)]
struct LastRow {
    refill: Mutex<Option<(Weak<ListManager>, SectionRef)>>,
}

impl RowItem for LastRow {
    fn reuse_kind(&self) -> ReuseKind {
        ReuseKind::template("last", || ViewHandle::new("last cell"))
    }

    fn height(&self, _list: &dyn ListHost) -> f64 {
        44.0
    }

    fn editing(&self) -> Option<&dyn RowEditing> {
        Some(self)
    }
}

impl RowEditing for LastRow {
    fn can_edit(&self, _list: &dyn ListHost) -> bool {
        true
    }

    fn can_commit(&self, style: EditingStyle, _list: &dyn ListHost) -> bool {
        style == EditingStyle::Delete
    }

    fn did_finish_removing_animation(&self, _list: &dyn ListHost, _path: IndexPath) {
        let refill = self.refill.lock().take();
        if let Some((manager, section)) = refill
            && let Some(manager) = manager.upgrade()
        {
            manager.append_rows(rows(&["placeholder"]), &section, RowAnimation::Fade);
        }
    }
}

#[test]
fn test_commit_delete_completion_may_mutate() {
    common::init_tracing();
    let host = RecordingHost::with_synchronous_completions();
    let last = Arc::new(LastRow::default());
    let row: RowRef = last.clone();
    let (manager, first) = populated(&host, vec![row]);
    *last.refill.lock() = Some((Arc::downgrade(&manager), first.clone()));

    host.data_source()
        .commit_edit(&*host, EditingStyle::Delete, IndexPath::new(0, 0));

    assert_eq!(first.rows().len(), 1);
    assert!(first.rows().position_of(&(last.clone() as RowRef)).is_none());
    assert_eq!(
        host.updates(),
        vec![
            HostEvent::BeginUpdates,
            HostEvent::DeleteRows(vec![IndexPath::new(0, 0)], RowAnimation::Automatic),
            HostEvent::EndUpdates,
            HostEvent::BeginUpdates,
            HostEvent::InsertRows(vec![IndexPath::new(0, 0)], RowAnimation::Fade),
            HostEvent::EndUpdates,
        ]
    );
    assert_eq!(host.counts_after_batch(), vec![vec![0], vec![1]]);
    assert_eq!(host.pending_animations(), 0);
}

// =========================================================================
// Reordering and Section Index
// =========================================================================

#[derive(Default)]
struct Reorderer {
    moves: Mutex<Vec<(IndexPath, IndexPath)>>,
}

impl ListManagerDelegate for Reorderer {
    fn target_index_path_for_move(
        &self,
        _list: &dyn ListHost,
        source: IndexPath,
        _proposed: IndexPath,
    ) -> IndexPath {
        source
    }

    fn move_row(&self, _list: &dyn ListHost, from: IndexPath, to: IndexPath) {
        self.moves.lock().push((from, to));
    }

    fn section_index_titles(&self, _list: &dyn ListHost) -> Option<Vec<String>> {
        Some(vec!["A".into(), "B".into()])
    }

    fn section_for_index_title(&self, _list: &dyn ListHost, _title: &str, index: usize) -> usize {
        index * 2
    }
}

#[test]
fn test_reordering_defaults_without_delegate() {
    let host = RecordingHost::new();
    let original = rows(&["a", "b"]);
    let (_manager, first) = populated(&host, original.clone());
    let from = IndexPath::new(0, 0);
    let proposed = IndexPath::new(0, 1);

    assert_eq!(
        host.delegate()
            .target_index_path_for_move(&*host, from, proposed),
        proposed
    );
    host.data_source().move_row(&*host, from, proposed);
    assert!(host.data_source().section_index_titles(&*host).is_none());
    assert_eq!(
        host.data_source()
            .section_for_index_title(&*host, "A", 1),
        0
    );
    assert_rows(&first, &[&original[0], &original[1]]);
}

#[test]
fn test_reordering_relayed_to_delegate() {
    let host = RecordingHost::new();
    let reorderer = Arc::new(Reorderer::default());
    let manager = ListManager::builder(&host).delegate(&reorderer).build();
    let original = rows(&["a", "b"]);
    let first = section(original.clone());
    manager.set_sections(vec![first.clone()]);
    let from = IndexPath::new(0, 0);
    let to = IndexPath::new(0, 1);

    assert_eq!(
        host.delegate().target_index_path_for_move(&*host, from, to),
        from
    );
    host.data_source().move_row(&*host, from, to);

    assert_eq!(reorderer.moves.lock().clone(), vec![(from, to)]);
    assert_rows(&first, &[&original[0], &original[1]]);
    assert_eq!(
        host.data_source().section_index_titles(&*host),
        Some(vec!["A".to_string(), "B".to_string()])
    );
    assert_eq!(
        host.data_source().section_for_index_title(&*host, "B", 1),
        2
    );
}

#[test]
fn test_delegate_not_kept_alive() {
    let host = RecordingHost::new();
    let reorderer = Arc::new(Reorderer::default());
    let manager = ListManager::builder(&host).delegate(&reorderer).build();
    assert!(manager.delegate().is_some());

    drop(reorderer);

    assert!(manager.delegate().is_none());
    assert!(host.data_source().section_index_titles(&*host).is_none());
}

// =========================================================================
// Scrolling
// =========================================================================

#[derive(Default)]
struct ScrollRecorder {
    events: Mutex<Vec<String>>,
}

impl ScrollDelegate for ScrollRecorder {
    fn did_scroll(&self, _list: &dyn ListHost) {
        self.events.lock().push("scroll".into());
    }

    fn did_end_dragging(&self, _list: &dyn ListHost, will_decelerate: bool) {
        self.events.lock().push(format!("end drag {will_decelerate}"));
    }
}

#[test]
fn test_scroll_events_forwarded() {
    let host = RecordingHost::new();
    let recorder = Arc::new(ScrollRecorder::default());
    let _manager = ListManager::builder(&host).scroll_delegate(&recorder).build();
    let delegate = host.delegate();

    delegate.did_scroll(&*host);
    delegate.will_begin_dragging(&*host);
    delegate.did_end_dragging(&*host, true);

    assert_eq!(
        recorder.events.lock().clone(),
        vec!["scroll".to_string(), "end drag true".to_string()]
    );
}

#[test]
fn test_scroll_to_row_and_rect() {
    let host = RecordingHost::new();
    let original = rows(&["a", "b", "c"]);
    let (manager, first) = populated(&host, original.clone());

    assert_eq!(
        manager.rect_for_row(&original[2], &first),
        Some(Rect::new(0.0, 88.0, 320.0, 44.0))
    );
    assert!(manager.rect_for_row(&TestRow::new("x").shared(), &first).is_none());

    manager.scroll_to_row(&original[1], &first, ScrollPosition::Middle, true);
    manager.scroll_to_top(false);

    assert_eq!(
        host.events(),
        vec![
            HostEvent::ScrollToRow(IndexPath::new(0, 1), ScrollPosition::Middle, true),
            HostEvent::ScrollToRow(IndexPath::new(0, 0), ScrollPosition::Top, false),
        ]
    );
}

// =========================================================================
// Prefetching
// =========================================================================

#[test]
fn test_prefetch_resolves_each_path() {
    let host = RecordingHost::new();
    let log = call_log();
    let manager = ListManager::builder(&host)
        .config(ManagerConfig::new().with_prefetching(true))
        .build();
    manager.set_sections(vec![section(vec![
        TestRow::new("a").log(&log).prefetchable().shared(),
        TestRow::new("plain").log(&log).shared(),
        TestRow::new("c").log(&log).prefetchable().shared(),
    ])]);
    let source = host.prefetch_source().expect("prefetching attached");

    source.prefetch_rows(
        &*host,
        &[
            IndexPath::new(0, 2),
            IndexPath::new(0, 9),
            IndexPath::new(0, 1),
            IndexPath::new(0, 0),
        ],
    );
    source.cancel_prefetching(&*host, &[IndexPath::new(3, 0), IndexPath::new(0, 2)]);

    assert!(manager.is_prefetching_enabled());
    assert_eq!(
        log.lock().clone(),
        vec![
            "prefetch c [0, 2]".to_string(),
            "prefetch a [0, 0]".to_string(),
            "cancel c [0, 2]".to_string(),
        ]
    );
}

#[test]
fn test_enable_prefetching_is_one_way() {
    let host = RecordingHost::new();
    let manager = ListManager::new(&host);
    assert!(!manager.is_prefetching_enabled());

    manager.enable_prefetching();
    manager.enable_prefetching();

    assert!(manager.is_prefetching_enabled());
    assert!(host.prefetch_source().is_some());
}

#[test]
fn test_enable_prefetching_without_host_stays_disabled() {
    let host = RecordingHost::without_prefetching();
    let manager = ListManager::new(&host);
    drop(host);

    assert!(manager.try_enable_prefetching().is_ok());
    assert!(!manager.is_prefetching_enabled());
}

#[test]
fn test_prefetching_unsupported_is_an_error() {
    let host = RecordingHost::without_prefetching();
    let manager = ListManager::new(&host);

    assert_eq!(
        manager.try_enable_prefetching(),
        Err(TableError::PrefetchingUnsupported)
    );
    assert!(!manager.is_prefetching_enabled());
    assert!(
        ListManager::builder(&host)
            .prefetching(true)
            .try_build()
            .is_err()
    );
}

#[test]
#[should_panic(expected = "does not support prefetching")]
fn test_enable_prefetching_unsupported_panics() {
    let host = RecordingHost::without_prefetching();
    let manager = ListManager::new(&host);

    manager.enable_prefetching();
}
