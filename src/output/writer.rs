//! Writes the rendered index files to disk

use crate::config::OutputConfig;
use crate::output::index::{render_compact_index, render_full_dump};
use crate::output::types::{IndexHeader, OutputError, OutputResult, WrittenFiles};
use crate::state::PageResult;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the compact index
pub const INDEX_FILE_NAME: &str = "llms.txt";

/// File name of the full-content dump
pub const FULL_FILE_NAME: &str = "llms-full.txt";

/// Renders and writes `llms.txt` (and `llms-full.txt` when enabled)
///
/// The output directory is created if missing. Existing files are
/// overwritten.
///
/// # Arguments
///
/// * `pages` - Crawl results in crawl order
/// * `header` - Site information for the file headers
/// * `config` - Output settings
pub fn write_index_files(
    pages: &[PageResult],
    header: &IndexHeader,
    config: &OutputConfig,
) -> OutputResult<WrittenFiles> {
    fs::create_dir_all(&config.output_dir).map_err(|source| OutputError::CreateDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let compact = render_compact_index(pages, config.format, header);
    let index_path = config.output_dir.join(INDEX_FILE_NAME);
    write_file(&index_path, &compact)?;

    let (full_path, full_bytes) = if config.full_text {
        let full = render_full_dump(pages, config.format, header, config.max_content_chars);
        let path = config.output_dir.join(FULL_FILE_NAME);
        write_file(&path, &full)?;
        (Some(path), full.len())
    } else {
        (None, 0)
    };

    Ok(WrittenFiles {
        index_path,
        index_bytes: compact.len(),
        full_path,
        full_bytes,
        pages_written: pages.iter().filter(|p| p.is_publishable()).count(),
    })
}

fn write_file(path: &Path, contents: &str) -> OutputResult<()> {
    fs::write(path, contents).map_err(|source| OutputError::Write {
        path: PathBuf::from(path),
        source,
    })
}
