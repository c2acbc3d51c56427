use std::sync::Arc;

use dashpad::managers::reading_list_manager::ReadingListManager;
use dashpad::storage::{MemoryBackend, Storage};
use dashpad::types::reading_list::{NewReadingItem, ReadingItemPatch};

fn manager() -> ReadingListManager {
    manager_with_backend(MemoryBackend::new())
}

fn manager_with_backend(backend: MemoryBackend) -> ReadingListManager {
    ReadingListManager::new(Arc::new(Storage::new(backend)))
}

fn item(url: &str) -> NewReadingItem {
    NewReadingItem {
        title: format!("Article at {}", url),
        url: url.to_string(),
        description: None,
        favicon: None,
    }
}

#[test]
fn test_add_item_prepends_unread() {
    let mut mgr = manager();
    mgr.add_item(item("https://a.example.com"));
    let id_b = mgr.add_item(item("https://b.example.com")).unwrap();

    assert_eq!(mgr.items().len(), 2);
    // Most recently saved sits first.
    assert_eq!(mgr.items()[0].id, id_b);
    assert!(!mgr.items()[0].is_read);
    assert!(mgr.items()[0].read_at.is_none());
    assert!(mgr.items()[0].saved_at > 0);
}

#[test]
fn test_duplicate_url_is_idempotent_no_op() {
    let mut mgr = manager();
    let first = mgr.add_item(item("https://same.example.com"));
    assert!(first.is_some());

    let before = mgr.items().to_vec();
    let second = mgr.add_item(item("https://same.example.com"));

    assert!(second.is_none());
    assert_eq!(mgr.items(), before.as_slice());
}

#[test]
fn test_toggle_read_stamps_and_clears_read_at() {
    let mut mgr = manager();
    let id = mgr.add_item(item("https://a.example.com")).unwrap();

    mgr.toggle_read(&id);
    let read = mgr.items().iter().find(|i| i.id == id).unwrap().clone();
    assert!(read.is_read);
    assert!(read.read_at.is_some());

    mgr.toggle_read(&id);
    let unread = mgr.items().iter().find(|i| i.id == id).unwrap().clone();
    assert!(!unread.is_read);
    assert!(unread.read_at.is_none());
}

#[test]
fn test_mark_as_read_and_unread_are_idempotent() {
    let mut mgr = manager();
    let id = mgr.add_item(item("https://a.example.com")).unwrap();

    mgr.mark_as_read(&id);
    mgr.mark_as_read(&id);
    let read = mgr.items().iter().find(|i| i.id == id).unwrap().clone();
    assert!(read.is_read);
    assert!(read.read_at.is_some());

    mgr.mark_as_unread(&id);
    mgr.mark_as_unread(&id);
    let unread = mgr.items().iter().find(|i| i.id == id).unwrap().clone();
    assert!(!unread.is_read);
    assert!(unread.read_at.is_none());
}

#[test]
fn test_operations_on_unknown_id_are_silent_no_ops() {
    let mut mgr = manager();
    mgr.add_item(item("https://a.example.com"));
    let before = mgr.items().to_vec();

    mgr.toggle_read("missing");
    mgr.mark_as_read("missing");
    mgr.mark_as_unread("missing");
    mgr.remove_item("missing");
    mgr.update_item("missing", ReadingItemPatch::default());

    assert_eq!(mgr.items(), before.as_slice());
}

#[test]
fn test_update_item_merges_fields() {
    let mut mgr = manager();
    let id = mgr.add_item(item("https://a.example.com")).unwrap();
    mgr.update_item(
        &id,
        ReadingItemPatch {
            description: Some("worth reading".to_string()),
            ..Default::default()
        },
    );
    let updated = mgr.items().iter().find(|i| i.id == id).unwrap();
    assert_eq!(updated.description.as_deref(), Some("worth reading"));
    assert_eq!(updated.url, "https://a.example.com");
}

#[test]
fn test_clear_read_removes_only_read_items() {
    let mut mgr = manager();
    let a = mgr.add_item(item("https://a.example.com")).unwrap();
    let b = mgr.add_item(item("https://b.example.com")).unwrap();
    mgr.add_item(item("https://c.example.com"));

    mgr.mark_as_read(&a);
    mgr.mark_as_read(&b);
    mgr.clear_read();

    assert_eq!(mgr.items().len(), 1);
    assert_eq!(mgr.items()[0].url, "https://c.example.com");
}

#[test]
fn test_clear_all_empties_collection() {
    let mut mgr = manager();
    mgr.add_item(item("https://a.example.com"));
    mgr.add_item(item("https://b.example.com"));
    mgr.clear_all();
    assert!(mgr.items().is_empty());
}

#[test]
fn test_unread_view_is_newest_saved_first() {
    let mut mgr = manager();
    let a = mgr.add_item(item("https://a.example.com")).unwrap();
    let b = mgr.add_item(item("https://b.example.com")).unwrap();
    let c = mgr.add_item(item("https://c.example.com")).unwrap();

    let unread: Vec<String> = mgr.unread_items().iter().map(|i| i.id.clone()).collect();
    assert_eq!(unread, vec![c, b, a]);
    assert_eq!(mgr.unread_count(), 3);
}

#[test]
fn test_read_view_is_newest_read_first() {
    let mut mgr = manager();
    let a = mgr.add_item(item("https://a.example.com")).unwrap();
    let b = mgr.add_item(item("https://b.example.com")).unwrap();
    let c = mgr.add_item(item("https://c.example.com")).unwrap();

    mgr.mark_as_read(&a);
    mgr.mark_as_read(&b);

    let read: Vec<String> = mgr.read_items().iter().map(|i| i.id.clone()).collect();
    assert_eq!(read, vec![b.clone(), a.clone()]);

    let unread: Vec<String> = mgr.unread_items().iter().map(|i| i.id.clone()).collect();
    assert_eq!(unread, vec![c]);
    assert_eq!(mgr.unread_count(), 1);
}

#[test]
fn test_views_recompute_after_mutation() {
    let mut mgr = manager();
    let a = mgr.add_item(item("https://a.example.com")).unwrap();
    assert_eq!(mgr.unread_count(), 1);
    assert!(mgr.read_items().is_empty());

    mgr.mark_as_read(&a);
    assert_eq!(mgr.unread_count(), 0);
    assert_eq!(mgr.read_items().len(), 1);
    assert!(mgr.unread_items().is_empty());
}

#[test]
fn test_mutations_persist_and_reload() {
    let backend = MemoryBackend::new();
    let mut mgr = manager_with_backend(backend.clone());
    let a = mgr.add_item(item("https://a.example.com")).unwrap();
    mgr.mark_as_read(&a);

    let reloaded = manager_with_backend(backend);
    assert_eq!(reloaded.items().len(), 1);
    assert!(reloaded.items()[0].is_read);
    assert!(reloaded.items()[0].read_at.is_some());
}
