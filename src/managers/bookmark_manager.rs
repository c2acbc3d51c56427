//! Bookmark and folder hierarchy store.
//!
//! Two collections with one defining invariant: removing a folder reparents
//! every bookmark directly inside it to the root before the folder goes
//! away, so this store never leaves a bookmark pointing at a folder it
//! removed itself. Sibling folder `order` stays dense and zero-based after
//! every structural change. Nested sub-folders of a removed folder keep
//! their stale `parent_id`; dangling references are tolerated everywhere
//! and treated as root.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::storage::{Storage, StorageKey};
use crate::store::{Memo, Store};
use crate::types::bookmark::{
    Bookmark, BookmarkExport, BookmarkFolder, BookmarkPatch, FolderPatch, NewBookmark,
};

pub struct BookmarkManager {
    bookmarks: Store<Vec<Bookmark>>,
    folders: Store<Vec<BookmarkFolder>>,
    // Transient navigation state, never persisted.
    selected_folder_id: Store<Option<String>>,
    filtered_memo: Memo<(u64, u64, u64), Vec<Bookmark>>,
    root_folders_memo: Memo<u64, Vec<BookmarkFolder>>,
}

impl BookmarkManager {
    pub fn new(storage: Arc<Storage>) -> Self {
        let bookmarks_initial = storage.get(StorageKey::Bookmarks, Vec::new());
        let folders_initial = storage.get(StorageKey::BookmarkFolders, Vec::new());

        let mut bookmarks = Store::new(bookmarks_initial);
        let sink = Arc::clone(&storage);
        bookmarks.subscribe(move |value: &Vec<Bookmark>| sink.set(StorageKey::Bookmarks, value));

        let mut folders = Store::new(folders_initial);
        folders.subscribe(move |value: &Vec<BookmarkFolder>| {
            storage.set(StorageKey::BookmarkFolders, value)
        });

        Self {
            bookmarks,
            folders,
            selected_folder_id: Store::new(None),
            filtered_memo: Memo::new(),
            root_folders_memo: Memo::new(),
        }
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    // === Bookmark operations ===

    /// Adds a bookmark under the caller-supplied folder context and returns
    /// its generated id.
    pub fn add_bookmark(&mut self, fields: NewBookmark) -> String {
        let id = Uuid::new_v4().to_string();
        let bookmark = Bookmark {
            id: id.clone(),
            title: fields.title,
            url: fields.url,
            favicon: fields.favicon,
            folder_id: fields.folder_id,
            created_at: Self::now_ms(),
        };
        self.bookmarks.update(|list| list.push(bookmark));
        id
    }

    /// Merges `patch` into the bookmark with `id`. Unknown ids are a
    /// silent no-op.
    pub fn update_bookmark(&mut self, id: &str, patch: BookmarkPatch) {
        if !self.bookmarks.get().iter().any(|b| b.id == id) {
            return;
        }
        self.bookmarks.update(|list| {
            if let Some(bookmark) = list.iter_mut().find(|b| b.id == id) {
                if let Some(title) = patch.title {
                    bookmark.title = title;
                }
                if let Some(url) = patch.url {
                    bookmark.url = url;
                }
                if let Some(favicon) = patch.favicon {
                    bookmark.favicon = Some(favicon);
                }
                if let Some(folder_id) = patch.folder_id {
                    bookmark.folder_id = folder_id;
                }
            }
        });
    }

    /// Removes a bookmark by id; no-op if absent.
    pub fn remove_bookmark(&mut self, id: &str) {
        if !self.bookmarks.get().iter().any(|b| b.id == id) {
            return;
        }
        self.bookmarks.update(|list| list.retain(|b| b.id != id));
    }

    /// Reassigns a bookmark's folder. The target folder is not validated;
    /// a dangling id is rendered as root.
    pub fn move_bookmark(&mut self, id: &str, folder_id: Option<String>) {
        if !self.bookmarks.get().iter().any(|b| b.id == id) {
            return;
        }
        self.bookmarks.update(|list| {
            if let Some(bookmark) = list.iter_mut().find(|b| b.id == id) {
                bookmark.folder_id = folder_id;
            }
        });
    }

    // === Folder operations ===

    /// Creates a folder appended at the end of its sibling set and returns
    /// its generated id.
    pub fn add_folder(&mut self, name: &str, parent_id: Option<String>) -> String {
        let id = Uuid::new_v4().to_string();
        let order = self
            .folders
            .get()
            .iter()
            .filter(|f| f.parent_id == parent_id)
            .count() as i32;
        let folder = BookmarkFolder {
            id: id.clone(),
            name: name.to_string(),
            parent_id,
            order,
        };
        self.folders.update(|list| list.push(folder));
        id
    }

    /// Merges `patch` into the folder with `id`. Reparenting re-indexes
    /// both the old and the new sibling sets. Unknown ids are a silent no-op.
    pub fn update_folder(&mut self, id: &str, patch: FolderPatch) {
        let Some(old_parent) = self
            .folders
            .get()
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.parent_id.clone())
        else {
            return;
        };

        self.folders.update(|list| {
            let reparent = patch.parent_id.clone();
            if let Some(folder) = list.iter_mut().find(|f| f.id == id) {
                if let Some(name) = patch.name {
                    folder.name = name;
                }
                if let Some(parent_id) = patch.parent_id {
                    folder.parent_id = parent_id;
                }
            }
            if let Some(new_parent) = reparent {
                if new_parent != old_parent {
                    Self::reindex_siblings(list, &old_parent);
                    Self::reindex_siblings(list, &new_parent);
                }
            }
        });
    }

    /// Removes a folder, reparenting every bookmark directly inside it to
    /// the root first, then re-indexing the remaining siblings. Nested
    /// sub-folders are not cascaded.
    pub fn remove_folder(&mut self, id: &str) {
        let Some(parent_id) = self
            .folders
            .get()
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.parent_id.clone())
        else {
            return;
        };

        self.bookmarks.update(|list| {
            for bookmark in list.iter_mut() {
                if bookmark.folder_id.as_deref() == Some(id) {
                    bookmark.folder_id = None;
                }
            }
        });

        self.folders.update(|list| {
            list.retain(|f| f.id != id);
            Self::reindex_siblings(list, &parent_id);
        });
    }

    fn reindex_siblings(folders: &mut [BookmarkFolder], parent_id: &Option<String>) {
        let mut rank = 0;
        // Stable: relative order among the surviving siblings is preserved.
        let mut siblings: Vec<&mut BookmarkFolder> = folders
            .iter_mut()
            .filter(|f| f.parent_id == *parent_id)
            .collect();
        siblings.sort_by_key(|f| f.order);
        for folder in siblings {
            folder.order = rank;
            rank += 1;
        }
    }

    // === Selection & derived views ===

    /// Sets the transient folder navigation context.
    pub fn select_folder(&mut self, folder_id: Option<String>) {
        self.selected_folder_id.set(folder_id);
    }

    pub fn selected_folder_id(&self) -> Option<&str> {
        self.selected_folder_id.get().as_deref()
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        self.bookmarks.get()
    }

    pub fn folders(&self) -> &[BookmarkFolder] {
        self.folders.get()
    }

    /// Whether a bookmark renders at the root: no folder, or a dangling
    /// reference to a folder that no longer exists.
    fn renders_at_root(&self, bookmark: &Bookmark) -> bool {
        match &bookmark.folder_id {
            None => true,
            Some(folder_id) => !self.folders.get().iter().any(|f| &f.id == folder_id),
        }
    }

    /// Bookmarks in the currently selected folder (root when none selected).
    pub fn filtered_bookmarks(&self) -> Vec<Bookmark> {
        let key = (
            self.bookmarks.version(),
            self.folders.version(),
            self.selected_folder_id.version(),
        );
        self.filtered_memo.get_or(key, || {
            let selected = self.selected_folder_id.get();
            self.bookmarks
                .get()
                .iter()
                .filter(|b| match selected {
                    Some(folder_id) => b.folder_id.as_deref() == Some(folder_id.as_str()),
                    None => self.renders_at_root(b),
                })
                .cloned()
                .collect()
        })
    }

    /// Bookmarks at the root level, dangling references included.
    pub fn root_bookmarks(&self) -> Vec<Bookmark> {
        self.bookmarks
            .get()
            .iter()
            .filter(|b| self.renders_at_root(b))
            .cloned()
            .collect()
    }

    /// Root-level folders sorted by order ascending.
    pub fn root_folders(&self) -> Vec<BookmarkFolder> {
        self.root_folders_memo.get_or(self.folders.version(), || {
            let mut folders: Vec<BookmarkFolder> = self
                .folders
                .get()
                .iter()
                .filter(|f| f.parent_id.is_none())
                .cloned()
                .collect();
            folders.sort_by_key(|f| f.order);
            folders
        })
    }

    /// Children of `parent_id` sorted by order ascending (stable on ties).
    pub fn subfolders(&self, parent_id: Option<&str>) -> Vec<BookmarkFolder> {
        let mut folders: Vec<BookmarkFolder> = self
            .folders
            .get()
            .iter()
            .filter(|f| f.parent_id.as_deref() == parent_id)
            .cloned()
            .collect();
        folders.sort_by_key(|f| f.order);
        folders
    }

    /// Bookmarks whose folder matches `folder_id` exactly.
    pub fn bookmarks_in_folder(&self, folder_id: Option<&str>) -> Vec<Bookmark> {
        self.bookmarks
            .get()
            .iter()
            .filter(|b| b.folder_id.as_deref() == folder_id)
            .cloned()
            .collect()
    }

    // === Import / export ===

    /// Serializes both collections as pretty JSON.
    pub fn export_bookmarks(&self) -> String {
        let export = BookmarkExport {
            bookmarks: self.bookmarks.get().clone(),
            folders: self.folders.get().clone(),
        };
        serde_json::to_string_pretty(&export).unwrap_or_else(|_| "{}".to_string())
    }

    /// Replaces both collections wholesale when `json` has the expected
    /// shape (array-typed `bookmarks` and `folders`). Returns `false` and
    /// leaves state untouched otherwise.
    pub fn import_bookmarks(&mut self, json: &str) -> bool {
        match serde_json::from_str::<BookmarkExport>(json) {
            Ok(export) => {
                self.bookmarks.set(export.bookmarks);
                self.folders.set(export.folders);
                true
            }
            Err(err) => {
                log::warn!("rejecting bookmark import: {}", err);
                false
            }
        }
    }

    /// Empties both collections and clears the selection.
    pub fn clear_all(&mut self) {
        self.bookmarks.set(Vec::new());
        self.folders.set(Vec::new());
        self.selected_folder_id.set(None);
    }
}
