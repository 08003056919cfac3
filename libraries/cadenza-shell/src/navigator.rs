//! Page navigation with a back/forward journal.

use serde::{Deserialize, Serialize};

/// The pages of the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Page {
    /// Popular tracks/albums/artists landing page
    Home,
    /// Search results for a query
    Search {
        /// The query text
        query: String,
    },
    /// An opened catalog album
    Album {
        /// Catalog album id
        id: String,
    },
    /// An artist profile
    Artist {
        /// Catalog artist id or creator name
        id: String,
    },
    /// An opened local playlist
    Collection {
        /// Playlist id
        playlist_id: i64,
    },
    /// The signed-in listener's playlists
    Library,
    /// The listening-history pane
    ListeningHistory,
    /// Profile editing
    Profile,
    /// Listener login
    Login,
    /// Listener registration
    Registration,
    /// Admin: listener ban list
    AdminBanList,
    /// Admin: catalog/local statistics
    AdminStatistics,
    /// Admin: registrations report
    AdminReport,
}

/// Back/forward page journal.
///
/// Navigating while back-tracked truncates the forward entries, the same
/// linear-journal shape the listening history uses.
#[derive(Debug, Clone)]
pub struct Navigator {
    journal: Vec<Page>,
    index: usize,
}

impl Navigator {
    /// Create a navigator sitting on the home page.
    pub fn new() -> Self {
        Self {
            journal: vec![Page::Home],
            index: 0,
        }
    }

    /// The current page.
    pub fn current(&self) -> &Page {
        &self.journal[self.index]
    }

    /// Navigate to a page, discarding any forward journal.
    pub fn navigate(&mut self, page: Page) {
        if *self.current() == page {
            return;
        }
        self.journal.truncate(self.index + 1);
        self.journal.push(page);
        self.index = self.journal.len() - 1;
    }

    /// Whether a back entry exists.
    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    /// Whether a forward entry exists.
    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.journal.len()
    }

    /// Step back, returning the new current page.
    pub fn back(&mut self) -> Option<&Page> {
        if self.can_go_back() {
            self.index -= 1;
            Some(self.current())
        } else {
            None
        }
    }

    /// Step forward, returning the new current page.
    pub fn forward(&mut self) -> Option<&Page> {
        if self.can_go_forward() {
            self.index += 1;
            Some(self.current())
        } else {
            None
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_journal_truncates_forward_entries() {
        let mut nav = Navigator::new();
        nav.navigate(Page::Library);
        nav.navigate(Page::Album {
            id: "a1".to_string(),
        });

        assert!(nav.can_go_back());
        nav.back();
        nav.back();
        assert_eq!(*nav.current(), Page::Home);
        assert!(nav.can_go_forward());

        nav.navigate(Page::ListeningHistory);
        assert!(!nav.can_go_forward());
        assert_eq!(*nav.current(), Page::ListeningHistory);

        nav.back();
        assert_eq!(*nav.current(), Page::Home);
    }

    #[test]
    fn renavigating_to_the_current_page_is_a_noop() {
        let mut nav = Navigator::new();
        nav.navigate(Page::Library);
        nav.navigate(Page::Library);

        nav.back();
        assert_eq!(*nav.current(), Page::Home);
        assert!(!nav.can_go_back());
    }
}
