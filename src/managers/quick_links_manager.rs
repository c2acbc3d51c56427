//! Quick links store — an ordered collection with manual reordering.
//!
//! `order` values form the dense range [0, n) at all times: every add,
//! remove and reorder re-indexes so exactly one link exists per rank.

use std::sync::Arc;

use uuid::Uuid;

use crate::storage::{Storage, StorageKey};
use crate::store::{Memo, Store};
use crate::types::quick_link::{default_quick_links, NewQuickLink, QuickLink, QuickLinkPatch};

pub struct QuickLinksManager {
    links: Store<Vec<QuickLink>>,
    ordered_memo: Memo<u64, Vec<QuickLink>>,
}

impl QuickLinksManager {
    /// Loads persisted links, seeding the defaults when nothing is stored.
    pub fn new(storage: Arc<Storage>) -> Self {
        let initial = storage.get(StorageKey::QuickLinks, default_quick_links());
        let mut links = Store::new(initial);
        links.subscribe(move |value: &Vec<QuickLink>| storage.set(StorageKey::QuickLinks, value));
        Self {
            links,
            ordered_memo: Memo::new(),
        }
    }

    pub fn links(&self) -> &[QuickLink] {
        self.links.get()
    }

    /// Links sorted by rank, the sequence the dashboard renders.
    pub fn ordered_links(&self) -> Vec<QuickLink> {
        self.ordered_memo.get_or(self.links.version(), || {
            let mut links = self.links.get().clone();
            links.sort_by_key(|l| l.order);
            links
        })
    }

    /// Appends a link at the end of the ranking and returns its id.
    pub fn add_link(&mut self, fields: NewQuickLink) -> String {
        let id = Uuid::new_v4().to_string();
        let order = self.links.get().len() as i32;
        let link = QuickLink {
            id: id.clone(),
            title: fields.title,
            url: fields.url,
            favicon: fields.favicon,
            order,
        };
        self.links.update(|list| list.push(link));
        id
    }

    /// Merges `patch` into the link with `id`. Unknown ids are a silent no-op.
    pub fn update_link(&mut self, id: &str, patch: QuickLinkPatch) {
        if !self.links.get().iter().any(|l| l.id == id) {
            return;
        }
        self.links.update(|list| {
            if let Some(link) = list.iter_mut().find(|l| l.id == id) {
                if let Some(title) = patch.title {
                    link.title = title;
                }
                if let Some(url) = patch.url {
                    link.url = url;
                }
                if let Some(favicon) = patch.favicon {
                    link.favicon = Some(favicon);
                }
            }
        });
    }

    /// Removes a link and closes the rank gap it leaves behind.
    pub fn remove_link(&mut self, id: &str) {
        if !self.links.get().iter().any(|l| l.id == id) {
            return;
        }
        self.links.update(|list| {
            list.retain(|l| l.id != id);
            Self::reindex(list);
        });
    }

    /// Moves the link at `from` to position `to` on the rank-sorted
    /// sequence, then re-indexes. Out-of-range indices are a silent no-op;
    /// the drag-reorder host clamps before calling.
    pub fn reorder_links(&mut self, from: usize, to: usize) {
        let len = self.links.get().len();
        if from >= len || to >= len {
            return;
        }
        self.links.update(|list| {
            list.sort_by_key(|l| l.order);
            let moved = list.remove(from);
            list.insert(to, moved);
            Self::reindex(list);
        });
    }

    /// Replaces the collection with the built-in defaults.
    pub fn reset_to_defaults(&mut self) {
        self.links.set(default_quick_links());
    }

    fn reindex(links: &mut [QuickLink]) {
        for (index, link) in links.iter_mut().enumerate() {
            link.order = index as i32;
        }
    }
}
