//! Owned albums: totals, list, and removal.

mod render;
mod update;

pub use render::render_collection;
pub use update::{enter, handle_event, handle_key};

use vitrola_core::models::CollectionAlbum;
use vitrola_core::purchase::CollectionSummary;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionState {
    pub albums: Vec<CollectionAlbum>,
    pub loading: bool,
    pub cursor: usize,
    /// Waiting for `y` to confirm removing the highlighted album.
    pub confirm_remove: bool,
}

impl CollectionState {
    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary::of(&self.albums)
    }

    pub fn highlighted(&self) -> Option<&CollectionAlbum> {
        self.albums.get(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let max = self.albums.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    /// Replaces the list, keeping the cursor in range.
    pub fn set_albums(&mut self, albums: Vec<CollectionAlbum>) {
        self.albums = albums;
        self.move_cursor(0);
    }
}
