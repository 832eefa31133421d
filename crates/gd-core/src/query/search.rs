//! Search box controller for paginated admin tables
//!
//! Combines the debouncer with the request sequencer: keystrokes are
//! debounced, page and status changes go out immediately, and every
//! outgoing query carries a ticket used to drop stale responses.

use super::debounce::{Debouncer, Revision};
use super::list::ListQuery;
use super::sequence::{RequestSequencer, RequestTicket};
use std::time::{Duration, Instant};

/// A query that should be sent to the backend now
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub ticket: RequestTicket,
    pub query: ListQuery,
}

pub struct SearchController {
    query: ListQuery,
    debouncer: Debouncer<String>,
    sequencer: RequestSequencer,
}

impl SearchController {
    pub fn new(limit: u32, debounce: Duration) -> Self {
        Self {
            query: ListQuery::new(1, limit),
            debouncer: Debouncer::new(debounce),
            sequencer: RequestSequencer::new(),
        }
    }

    /// Query currently applied to the table
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// A keystroke in the search box
    pub fn on_input(&mut self, text: impl Into<String>, now: Instant) -> Revision {
        self.debouncer.push(text.into(), now)
    }

    /// Issue the debounced search once the input has settled
    ///
    /// A new search always starts again from page 1.
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        let (_, text) = self.debouncer.poll(now)?;
        let text = text.trim().to_string();
        self.query.search = if text.is_empty() { None } else { Some(text) };
        self.query.page = 1;
        Some(self.request())
    }

    /// Status dropdown change; applied immediately
    pub fn set_status(&mut self, status: Option<String>) -> SearchRequest {
        self.query.status = status;
        self.query.page = 1;
        self.request()
    }

    /// Pagination click; applied immediately
    pub fn go_to_page(&mut self, page: u32) -> SearchRequest {
        self.query = self.query.with_page(page);
        self.request()
    }

    /// Whether the response to a request should be rendered
    pub fn accept(&self, request: &SearchRequest) -> bool {
        self.sequencer.accept(&request.ticket)
    }

    /// Drop pending input and cancel in-flight requests
    pub fn close(&mut self) {
        self.debouncer.cancel();
        self.sequencer.cancel_all();
    }

    fn request(&mut self) -> SearchRequest {
        SearchRequest {
            ticket: self.sequencer.issue(),
            query: self.query.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_typing_then_settling_issues_one_request() {
        let mut controller = SearchController::new(10, DELAY);
        let t0 = Instant::now();

        controller.on_input("b", t0);
        controller.on_input("bi", t0 + Duration::from_millis(100));
        controller.on_input("bim", t0 + Duration::from_millis(200));

        assert!(controller.poll(t0 + Duration::from_millis(600)).is_none());
        let request = controller.poll(t0 + Duration::from_millis(700)).unwrap();
        assert_eq!(request.query.search.as_deref(), Some("bim"));
        assert_eq!(request.query.page, 1);
        assert!(controller.accept(&request));
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut controller = SearchController::new(10, DELAY);
        let page_two = controller.go_to_page(2);
        let filtered = controller.set_status(Some("active".to_string()));

        assert!(!controller.accept(&page_two));
        assert!(controller.accept(&filtered));
        assert_eq!(filtered.query.page, 1);
        assert_eq!(
            filtered.query.to_query_string(),
            "page=1&limit=10&status=active"
        );
    }

    #[test]
    fn test_clearing_search() {
        let mut controller = SearchController::new(10, DELAY);
        let t0 = Instant::now();
        controller.on_input("sari", t0);
        controller.poll(t0 + DELAY).unwrap();
        controller.on_input("  ", t0 + DELAY);
        let request = controller.poll(t0 + DELAY * 2).unwrap();
        assert_eq!(request.query.search, None);
    }

    #[test]
    fn test_close_cancels_everything() {
        let mut controller = SearchController::new(10, DELAY);
        let t0 = Instant::now();
        let in_flight = controller.go_to_page(3);
        controller.on_input("x", t0);

        controller.close();

        assert!(in_flight.ticket.is_cancelled());
        assert!(controller.poll(t0 + DELAY).is_none());
    }
}
