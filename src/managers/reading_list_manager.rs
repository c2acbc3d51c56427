//! Reading list store — a URL-deduplicated collection partitioned by
//! read state.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::storage::{Storage, StorageKey};
use crate::store::{Memo, Store};
use crate::types::reading_list::{NewReadingItem, ReadingItemPatch, ReadingListItem};

pub struct ReadingListManager {
    items: Store<Vec<ReadingListItem>>,
    unread_memo: Memo<u64, Vec<ReadingListItem>>,
    read_memo: Memo<u64, Vec<ReadingListItem>>,
}

impl ReadingListManager {
    pub fn new(storage: Arc<Storage>) -> Self {
        let initial = storage.get(StorageKey::ReadingList, Vec::new());
        let mut items = Store::new(initial);
        items.subscribe(move |value: &Vec<ReadingListItem>| {
            storage.set(StorageKey::ReadingList, value)
        });
        Self {
            items,
            unread_memo: Memo::new(),
            read_memo: Memo::new(),
        }
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn items(&self) -> &[ReadingListItem] {
        self.items.get()
    }

    /// Saves an item unless its URL is already in the collection, in which
    /// case the call is an idempotent no-op. Returns the new item's id, or
    /// `None` for a duplicate.
    pub fn add_item(&mut self, fields: NewReadingItem) -> Option<String> {
        if self.items.get().iter().any(|i| i.url == fields.url) {
            return None;
        }
        let id = Uuid::new_v4().to_string();
        let item = ReadingListItem {
            id: id.clone(),
            title: fields.title,
            url: fields.url,
            description: fields.description,
            favicon: fields.favicon,
            is_read: false,
            saved_at: Self::now_ms(),
            read_at: None,
        };
        // Most-recently-saved first.
        self.items.update(|list| list.insert(0, item));
        Some(id)
    }

    /// Merges `patch` into the item with `id`. Unknown ids are a silent no-op.
    pub fn update_item(&mut self, id: &str, patch: ReadingItemPatch) {
        if !self.items.get().iter().any(|i| i.id == id) {
            return;
        }
        self.items.update(|list| {
            if let Some(item) = list.iter_mut().find(|i| i.id == id) {
                if let Some(title) = patch.title {
                    item.title = title;
                }
                if let Some(url) = patch.url {
                    item.url = url;
                }
                if let Some(description) = patch.description {
                    item.description = Some(description);
                }
                if let Some(favicon) = patch.favicon {
                    item.favicon = Some(favicon);
                }
            }
        });
    }

    /// Removes an item by id; no-op if absent.
    pub fn remove_item(&mut self, id: &str) {
        if !self.items.get().iter().any(|i| i.id == id) {
            return;
        }
        self.items.update(|list| list.retain(|i| i.id != id));
    }

    /// Flips the read flag, stamping `read_at` on the way to read and
    /// clearing it on the way back.
    pub fn toggle_read(&mut self, id: &str) {
        if !self.items.get().iter().any(|i| i.id == id) {
            return;
        }
        let now = Self::now_ms();
        self.items.update(|list| {
            if let Some(item) = list.iter_mut().find(|i| i.id == id) {
                item.is_read = !item.is_read;
                item.read_at = item.is_read.then_some(now);
            }
        });
    }

    /// Marks an item read. Idempotent: re-marking refreshes `read_at`.
    pub fn mark_as_read(&mut self, id: &str) {
        if !self.items.get().iter().any(|i| i.id == id) {
            return;
        }
        let now = Self::now_ms();
        self.items.update(|list| {
            if let Some(item) = list.iter_mut().find(|i| i.id == id) {
                item.is_read = true;
                item.read_at = Some(now);
            }
        });
    }

    /// Marks an item unread. Idempotent.
    pub fn mark_as_unread(&mut self, id: &str) {
        if !self.items.get().iter().any(|i| i.id == id) {
            return;
        }
        self.items.update(|list| {
            if let Some(item) = list.iter_mut().find(|i| i.id == id) {
                item.is_read = false;
                item.read_at = None;
            }
        });
    }

    /// Drops every read item.
    pub fn clear_read(&mut self) {
        self.items.update(|list| list.retain(|i| !i.is_read));
    }

    /// Empties the collection.
    pub fn clear_all(&mut self) {
        self.items.set(Vec::new());
    }

    // === Derived views ===

    /// Unread items, newest-saved first.
    pub fn unread_items(&self) -> Vec<ReadingListItem> {
        self.unread_memo.get_or(self.items.version(), || {
            let mut items: Vec<ReadingListItem> = self
                .items
                .get()
                .iter()
                .filter(|i| !i.is_read)
                .cloned()
                .collect();
            items.sort_by_key(|i| std::cmp::Reverse(i.saved_at));
            items
        })
    }

    /// Read items, newest-read first. Items missing `read_at` sort oldest.
    pub fn read_items(&self) -> Vec<ReadingListItem> {
        self.read_memo.get_or(self.items.version(), || {
            let mut items: Vec<ReadingListItem> = self
                .items
                .get()
                .iter()
                .filter(|i| i.is_read)
                .cloned()
                .collect();
            items.sort_by_key(|i| std::cmp::Reverse(i.read_at.unwrap_or(0)));
            items
        })
    }

    pub fn unread_count(&self) -> usize {
        self.items.get().iter().filter(|i| !i.is_read).count()
    }
}
