use serde::{Deserialize, Serialize};

/// A saved bookmark. `folder_id` of `None` means the root level; a dangling
/// folder id is tolerated and rendered as root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    pub folder_id: Option<String>,
    pub created_at: i64,
}

/// A folder for organizing bookmarks. `order` is dense and zero-based among
/// siblings sharing the same `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookmarkFolder {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub order: i32,
}

/// Fields supplied by the caller when creating a bookmark.
#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub favicon: Option<String>,
    pub folder_id: Option<String>,
}

/// Partial update for a bookmark. `None` fields are left untouched;
/// `folder_id` is doubly optional so a patch can also clear it.
#[derive(Debug, Clone, Default)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub favicon: Option<String>,
    pub folder_id: Option<Option<String>>,
}

/// Partial update for a folder.
#[derive(Debug, Clone, Default)]
pub struct FolderPatch {
    pub name: Option<String>,
    pub parent_id: Option<Option<String>>,
}

/// Serialized shape of a bookmark export. Import only succeeds when both
/// fields deserialize as arrays; anything else is rejected wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkExport {
    pub bookmarks: Vec<Bookmark>,
    pub folders: Vec<BookmarkFolder>,
}
