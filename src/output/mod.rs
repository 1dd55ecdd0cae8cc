//! Output module for the generated index files
//!
//! This module handles:
//! - Rendering `llms.txt` and `llms-full.txt` in either layout
//! - Writing them into the output directory
//! - Recording run statistics

mod index;
pub mod stats;
mod types;
mod writer;

pub use index::{render_compact_index, render_full_dump};
pub use stats::{print_statistics, RunStatistics};
pub use types::{IndexHeader, OutputError, OutputResult, WrittenFiles};
pub use writer::{write_index_files, FULL_FILE_NAME, INDEX_FILE_NAME};
