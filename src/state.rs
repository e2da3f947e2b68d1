//! Per-view state for the search and detail pages. Each fetch carries a ticket
//! and only the latest ticket may write results.

use crate::models::{DisplayBook, SearchResultItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub books: Vec<SearchResultItem>,
    pub loading: bool,
    pub has_searched: bool,
    seq: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    // Blank queries leave the state untouched.
    pub fn begin(&mut self, query: &str) -> Option<SearchTicket> {
        if query.trim().is_empty() {
            return None;
        }
        self.seq += 1;
        self.query = query.to_string();
        self.loading = true;
        self.has_searched = true;
        Some(SearchTicket(self.seq))
    }

    pub fn complete(&mut self, ticket: SearchTicket, books: Vec<SearchResultItem>) -> bool {
        if ticket.0 != self.seq {
            return false;
        }
        self.books = books;
        self.loading = false;
        true
    }

    pub fn fail(&mut self, ticket: SearchTicket) -> bool {
        self.complete(ticket, Vec::new())
    }

    pub fn shows_no_results(&self) -> bool {
        self.has_searched && !self.loading && self.books.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket(u64);

#[derive(Debug, Default)]
pub struct DetailState {
    pub book_id: String,
    pub book: Option<DisplayBook>,
    pub loading: bool,
    seq: u64,
}

impl DetailState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, book_id: &str) -> DetailTicket {
        self.seq += 1;
        self.book_id = book_id.to_string();
        self.book = None;
        self.loading = true;
        DetailTicket(self.seq)
    }

    pub fn complete(&mut self, ticket: DetailTicket, book: Option<DisplayBook>) -> bool {
        if ticket.0 != self.seq {
            return false;
        }
        self.book = book;
        self.loading = false;
        true
    }

    pub fn not_found(&self) -> bool {
        !self.loading && self.book.is_none()
    }

    // Nothing to show while still loading or once the fetch came back empty.
    pub fn into_book(self) -> Option<DisplayBook> {
        if self.loading || self.not_found() {
            return None;
        }
        self.book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str) -> SearchResultItem {
        SearchResultItem {
            id: title.to_lowercase(),
            title: title.to_string(),
            authors: vec!["Someone".to_string()],
            thumbnail: None,
            isbn: None,
        }
    }

    #[test]
    fn blank_query_does_not_start_a_search() {
        let mut state = SearchState::new();
        assert!(state.begin("   ").is_none());
        assert!(!state.has_searched);
        assert!(!state.loading);
        assert!(!state.shows_no_results());
    }

    #[test]
    fn latest_search_wins_over_stale_response() {
        let mut state = SearchState::new();
        let first = state.begin("dune").unwrap();
        let second = state.begin("emma").unwrap();

        assert!(state.complete(second, vec![result("Emma")]));
        assert!(!state.complete(first, vec![result("Dune")]));
        assert_eq!(state.query, "emma");
        assert_eq!(state.books.len(), 1);
        assert_eq!(state.books[0].title, "Emma");
        assert!(!state.loading);
    }

    #[test]
    fn stale_failure_does_not_clear_newer_results() {
        let mut state = SearchState::new();
        let first = state.begin("a").unwrap();
        let second = state.begin("b").unwrap();
        assert!(state.complete(second, vec![result("B")]));
        assert!(!state.fail(first));
        assert_eq!(state.books.len(), 1);
    }

    #[test]
    fn failed_search_shows_no_results() {
        let mut state = SearchState::new();
        let ticket = state.begin("nothing").unwrap();
        assert!(!state.shows_no_results());
        assert!(state.fail(ticket));
        assert!(state.shows_no_results());
    }

    fn book(title: &str) -> DisplayBook {
        DisplayBook {
            title: title.to_string(),
            subtitle: None,
            authors: vec!["Someone".to_string()],
            publish_date: None,
            categories: Vec::new(),
            cover_url: None,
            description: None,
            page_count: None,
            isbn: None,
        }
    }

    #[test]
    fn detail_yields_book_only_after_completion() {
        let mut state = DetailState::new();
        let ticket = state.begin("emma");
        assert!(!state.not_found());

        assert!(state.complete(ticket, Some(book("Emma"))));
        assert!(!state.not_found());
        assert_eq!(state.into_book().map(|b| b.title).as_deref(), Some("Emma"));

        let mut pending = DetailState::new();
        pending.begin("dune");
        assert_eq!(pending.into_book(), None);
    }

    #[test]
    fn detail_without_book_is_not_found() {
        let mut state = DetailState::new();
        let ticket = state.begin("missing");
        assert!(state.complete(ticket, None));
        assert!(state.not_found());
        assert_eq!(state.into_book(), None);
    }

    #[test]
    fn detail_ignores_stale_ticket() {
        let mut state = DetailState::new();
        let first = state.begin("one");
        let second = state.begin("two");
        assert!(!state.complete(first, None));
        assert!(state.loading);
        assert!(state.complete(second, None));
        assert_eq!(state.book_id, "two");
        assert!(state.not_found());
    }
}
