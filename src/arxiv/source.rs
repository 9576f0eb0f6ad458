use flate2::read::GzDecoder;
use log::{debug, info};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tar::Archive;

use crate::arxiv::ArxivId;
use crate::config::Config;
use crate::error::{ArxivToPromptError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Name of the extraction directory created inside the scratch directory
pub const SOURCE_DIR_NAME: &str = "source";

/// Downloads and unpacks arXiv source bundles
pub struct SourceFetcher {
    client: Client,
    base_url: String,
}

impl SourceFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.http_timeout)
            .build()
            .map_err(|source| ArxivToPromptError::Download {
                id: "(client setup)".to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: config.arxiv_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetcher against a custom endpoint, with every other setting at its default
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(&Config {
            arxiv_base_url: base_url.to_string(),
            ..Config::default()
        })
    }

    pub fn e_print_url(&self, id: &ArxivId) -> String {
        format!("{}/e-print/{}", self.base_url, id.base_id())
    }

    /// Download the source bundle for `id` into `scratch` and extract it.
    ///
    /// Returns the extraction directory (`<scratch>/source`).
    pub fn download_arxiv_source(&self, id: &ArxivId, scratch: &Path) -> Result<PathBuf> {
        let url = self.e_print_url(id);
        info!("Downloading source for arXiv:{}...", id);
        if let Some(version) = id.version() {
            debug!("Requested v{}, fetching the latest source of {}", version, id.base_id());
        }
        debug!("GET {}", url);

        let download_error = |source| ArxivToPromptError::Download {
            id: id.to_string(),
            source,
        };
        let mut response = self.client.get(&url).send().map_err(download_error)?;

        if !response.status().is_success() {
            return Err(ArxivToPromptError::HttpStatus {
                id: id.to_string(),
                status: response.status(),
            });
        }

        // Save the downloaded source into the scratch directory
        let archive_path = scratch.join(format!("{}.tar.gz", id.base_id()));
        let mut archive_file = File::create(&archive_path)?;
        let size = response.copy_to(&mut archive_file).map_err(download_error)?;
        debug!("Saved {} bytes to {:?}", size, archive_path);
        drop(archive_file);

        if size == 0 {
            return Err(ArxivToPromptError::InvalidArchive {
                id: id.to_string(),
                reason: "received empty content from arXiv".to_string(),
            });
        }

        verify_tar_archive(&archive_path).map_err(|reason| ArxivToPromptError::InvalidArchive {
            id: id.to_string(),
            reason,
        })?;

        let extract_dir = scratch.join(SOURCE_DIR_NAME);
        fs::create_dir_all(&extract_dir)?;
        extract_archive(&archive_path, &extract_dir).map_err(|source| {
            ArxivToPromptError::Extraction {
                id: id.to_string(),
                source,
            }
        })?;

        Ok(extract_dir)
    }
}

/// Open a tar stream, transparently decompressing gzip
fn open_tar_stream(path: &Path) -> io::Result<(Box<dyn Read>, bool)> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 2];
    let read = file.read(&mut magic)?;
    file.seek(SeekFrom::Start(0))?;

    let gzipped = read == 2 && magic == GZIP_MAGIC;
    let reader = BufReader::new(file);
    if gzipped {
        Ok((Box::new(GzDecoder::new(reader)), true))
    } else {
        Ok((Box::new(reader), false))
    }
}

/// Check that `path` holds a tar container, gzipped or plain.
///
/// Only the first header is read. Damage further into the stream is left for
/// [`extract_archive`] to report.
pub fn verify_tar_archive(path: &Path) -> std::result::Result<(), String> {
    let (reader, gzipped) = open_tar_stream(path).map_err(|e| e.to_string())?;
    let mut archive = Archive::new(reader);
    let mut entries = archive.entries().map_err(|e| e.to_string())?;

    let first = match entries.next() {
        Some(entry) => entry.map_err(|e| {
            if gzipped {
                // arXiv serves single-file submissions as a bare gzipped .tex
                format!(
                    "{} (the source may be a single compressed file without a tar wrapper)",
                    e
                )
            } else {
                e.to_string()
            }
        })?,
        None => return Err("archive contains no entries".to_string()),
    };

    let first_path = first.path().map_err(|e| e.to_string())?;
    debug!("Archive {:?} starts with {:?}", path, first_path);
    Ok(())
}

/// Extract a (possibly gzip-compressed) tar archive into `output_dir`
pub fn extract_archive(path: &Path, output_dir: &Path) -> io::Result<()> {
    let (reader, gzipped) = open_tar_stream(path)?;
    if gzipped {
        info!("Extracting TAR.GZ archive");
    } else {
        info!("Extracting TAR archive");
    }
    let mut archive = Archive::new(reader);
    archive.unpack(output_dir)?;
    Ok(())
}
