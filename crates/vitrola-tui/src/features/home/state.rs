//! Home screen view state.

use vitrola_core::models::Album;

use crate::common::TextField;

/// Carousel and search results are mutually exclusive.
///
/// `Browsing → Searching` happens on the first non-empty search and is never
/// undone while the screen lives; re-entering the screen starts over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeMode {
    Browsing,
    Searching { term: String },
}

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    Albums,
    Search,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub mode: HomeMode,
    pub modal_visible: bool,
    /// Meaningful only while the modal is visible; left stale after closing.
    pub selected_album: Option<Album>,
    pub search_input: TextField,
    pub focus: HomeFocus,
    /// Albums for the current mode (carousel or search results).
    pub albums: Vec<Album>,
    pub loading: bool,
    /// Index of the highlighted card.
    pub cursor: usize,
    pub purchase_pending: bool,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            mode: HomeMode::Browsing,
            modal_visible: false,
            selected_album: None,
            search_input: TextField::new("Search"),
            focus: HomeFocus::Albums,
            albums: Vec::new(),
            loading: false,
            cursor: 0,
            purchase_pending: false,
        }
    }
}

impl HomeState {
    pub fn carousel_visible(&self) -> bool {
        matches!(self.mode, HomeMode::Browsing)
    }

    pub fn search_visible(&self) -> bool {
        matches!(self.mode, HomeMode::Searching { .. })
    }

    pub fn search_term(&self) -> Option<&str> {
        match &self.mode {
            HomeMode::Browsing => None,
            HomeMode::Searching { term } => Some(term),
        }
    }

    pub fn highlighted(&self) -> Option<&Album> {
        self.albums.get(self.cursor)
    }

    /// Shows the modal for `album`.
    pub fn open_modal(&mut self, album: Album) {
        self.selected_album = Some(album);
        self.modal_visible = true;
    }

    /// Hides the modal. The selected album is kept but inert.
    pub fn close_modal(&mut self) {
        self.modal_visible = false;
        self.purchase_pending = false;
    }

    /// Enters search mode for a non-empty term.
    pub fn begin_search(&mut self, term: String) {
        self.mode = HomeMode::Searching { term };
        self.albums.clear();
        self.cursor = 0;
        self.loading = true;
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.albums.is_empty() {
            self.cursor = 0;
            return;
        }
        let max = self.albums.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album(id: &str) -> Album {
        Album {
            id: id.into(),
            name: format!("Album {id}"),
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_browsing() {
        let state = HomeState::default();
        assert!(state.carousel_visible());
        assert!(!state.search_visible());
        assert!(!state.modal_visible);
        assert_eq!(state.selected_album, None);
    }

    #[test]
    fn test_close_keeps_selected_album() {
        let mut state = HomeState::default();
        state.open_modal(album("a"));
        assert!(state.modal_visible);

        state.close_modal();
        assert!(!state.modal_visible);
        assert_eq!(state.selected_album.as_ref().map(|a| a.id.as_str()), Some("a"));
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut state = HomeState {
            albums: vec![album("a"), album("b")],
            ..Default::default()
        };
        state.move_cursor(-1);
        assert_eq!(state.cursor, 0);
        state.move_cursor(5);
        assert_eq!(state.cursor, 1);
    }
}
