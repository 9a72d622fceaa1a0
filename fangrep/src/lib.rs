pub mod config;
pub mod errors;
pub mod filters;
pub mod scanner;
pub mod search;
pub mod tasks;

pub use config::SearchConfig;
pub use errors::{SearchError, SearchResult};
pub use search::{search, SearchRequest};
pub use tasks::TaskGroup;
