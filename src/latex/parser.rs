use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ArxivToPromptError, Result};

/// File names checked at the root of the source tree, in order of preference
pub const COMMON_MAIN_NAMES: [&str; 4] = ["main.tex", "paper.tex", "article.tex", "ms.tex"];

/// Whether the content looks like a compilable document rather than an included fragment
pub fn is_main_document(content: &str) -> bool {
    content.contains("\\documentclass") && content.contains("\\begin{document}")
}

/// Find all .tex files below `dir`, at any depth, sorted by name within each directory
pub fn find_tex_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.path().is_file()
                && entry.path().extension().map_or(false, |ext| ext == "tex")
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Find the main LaTeX file in a directory
pub fn find_main_tex_file(dir: &Path) -> Result<PathBuf> {
    // Look for common main file names
    for name in &COMMON_MAIN_NAMES {
        let path = dir.join(name);
        if path.is_file() {
            info!("Found main file by name: {:?}", path);
            return Ok(path);
        }
    }

    let tex_files = find_tex_files(dir);
    debug!("Found {} .tex files in {:?}", tex_files.len(), dir);

    // Check for files with both \documentclass and \begin{document}
    for file in &tex_files {
        if let Ok(bytes) = fs::read(file) {
            if is_main_document(&String::from_utf8_lossy(&bytes)) {
                info!("Found main file by content: {:?}", file);
                return Ok(file.clone());
            }
        }
    }

    // If we still haven't found anything, just return the first .tex file
    if let Some(first) = tex_files.into_iter().next() {
        info!("Falling back to first .tex file: {:?}", first);
        return Ok(first);
    }

    Err(ArxivToPromptError::MainFileNotFound(dir.to_path_buf()))
}
