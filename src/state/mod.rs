//! Per-page state carried through a run
//!
//! - `PageResult`: the outcome of scraping one URL, plus its final summary
//! - `PageMetadata`: title and description reported by the scraper

mod page_result;

pub use page_result::{excerpt, PageMetadata, PageResult};
