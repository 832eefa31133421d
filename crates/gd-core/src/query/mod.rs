//! List queries, endpoints and search input handling
//!
//! The admin tables filter and paginate on the backend; this module builds
//! the query strings and URLs for those requests and keeps typed-ahead
//! searches from racing each other.

mod debounce;
mod endpoint;
mod list;
mod search;
mod sequence;

pub use debounce::{Debouncer, Revision, DEFAULT_DEBOUNCE};
pub use endpoint::{Endpoint, Method};
pub use list::{ListQuery, DEFAULT_PAGE_SIZE};
pub use search::{SearchController, SearchRequest};
pub use sequence::{CancelToken, RequestSequencer, RequestTicket};
