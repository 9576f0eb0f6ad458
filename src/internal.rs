use log::info;
use tempfile::TempDir;

use crate::arxiv::{extract_arxiv_id, SourceFetcher};
use crate::config::Config;
use crate::error::Result;
use crate::latex::{clean_latex, find_main_tex_file, Expander, Latexpand};

/// Turn an arXiv ID or URL into one flattened LaTeX document.
///
/// Runs normalization, the expander pre-flight check, download, main file
/// discovery and expansion, then cleans the text when `clean` is set. All
/// scratch files live in a temporary directory that is removed on return.
pub fn process_arxiv_paper<E: Expander>(
    input: &str,
    clean: bool,
    fetcher: &SourceFetcher,
    expander: &E,
) -> Result<String> {
    let arxiv_id = extract_arxiv_id(input)?;
    info!("Processing arXiv paper with ID: {}", arxiv_id);

    // Must succeed before any network access
    expander.check_available()?;

    let scratch = TempDir::new()?;
    let source_dir = fetcher.download_arxiv_source(&arxiv_id, scratch.path())?;
    let main_file = find_main_tex_file(&source_dir)?;

    let content = expander.expand(&main_file, !clean)?;
    if clean {
        return Ok(clean_latex(&content));
    }
    Ok(content)
}

/// [`process_arxiv_paper`] with arXiv and latexpand set up from `config`
pub fn arxiv_to_prompt(input: &str, clean: bool, config: &Config) -> Result<String> {
    let fetcher = SourceFetcher::new(config)?;
    let expander = Latexpand::from_config(config);
    process_arxiv_paper(input, clean, &fetcher, &expander)
}
