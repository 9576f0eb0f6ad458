use log::{debug, info, warn};
use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

use crate::config::Config;
use crate::error::{ArxivToPromptError, Result};

/// Something that can inline every `\input`/`\include` of a main file
pub trait Expander {
    /// Verify the expansion backend can be run at all
    fn check_available(&self) -> Result<()>;

    /// Return the flattened source of `main_file`
    fn expand(&self, main_file: &Path, keep_comments: bool) -> Result<String>;
}

/// Runs the external `latexpand` script
#[derive(Debug, Clone)]
pub struct Latexpand {
    program: String,
    timeout: Duration,
}

impl Latexpand {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.latexpand_program.clone(), config.latexpand_timeout)
    }

    fn spawn_error(&self, err: io::Error) -> ArxivToPromptError {
        if err.kind() == io::ErrorKind::NotFound {
            ArxivToPromptError::DependencyMissing {
                program: self.program.clone(),
            }
        } else {
            ArxivToPromptError::Io(err)
        }
    }

    /// Wait for `child`, killing it once the timeout elapses
    fn wait_or_kill(&self, child: &mut Child) -> Result<Option<std::process::ExitStatus>> {
        match child.wait_timeout(self.timeout)? {
            Some(status) => Ok(Some(status)),
            None => {
                let _ = child.kill();
                let _ = child.wait();
                Ok(None)
            }
        }
    }
}

impl Expander for Latexpand {
    fn check_available(&self) -> Result<()> {
        // Only a missing program counts; the exit status of --help is irrelevant
        let mut child = Command::new(&self.program)
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        self.wait_or_kill(&mut child)?;
        debug!("Found {}", self.program);
        Ok(())
    }

    fn expand(&self, main_file: &Path, keep_comments: bool) -> Result<String> {
        let file_name = main_file.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{:?} does not name a file", main_file),
            )
        })?;
        let working_dir = match main_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let args = latexpand_args(file_name, keep_comments);
        info!(
            "Running: {} {} in directory {:?}",
            self.program,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" "),
            working_dir
        );

        // Output goes to anonymous files so a large document never fills a pipe
        let mut stdout_file = tempfile::tempfile()?;
        let mut stderr_file = tempfile::tempfile()?;

        let mut child = Command::new(&self.program)
            .args(&args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_file.try_clone()?))
            .stderr(Stdio::from(stderr_file.try_clone()?))
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let status = match self.wait_or_kill(&mut child)? {
            Some(status) => status,
            None => {
                return Err(ArxivToPromptError::ExpansionTimeout {
                    timeout: self.timeout,
                })
            }
        };

        let stderr = String::from_utf8_lossy(&read_captured(&mut stderr_file)?).into_owned();
        if !status.success() {
            return Err(ArxivToPromptError::expansion_failed(status, &stderr));
        }
        for line in stderr.lines() {
            debug!("latexpand: {}", line);
        }

        let stdout = read_captured(&mut stdout_file)?;
        let content = String::from_utf8(stdout).unwrap_or_else(|e| {
            warn!("latexpand output is not valid UTF-8, replacing invalid sequences");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        });

        if has_unexpanded_includes(&content) {
            warn!("Output still contains \\input or \\include commands");
        }

        Ok(content)
    }
}

/// Command-line arguments for one latexpand run on `file_name`
pub fn latexpand_args(file_name: &OsStr, keep_comments: bool) -> Vec<OsString> {
    let mut args = vec![OsString::from("--verbose")];
    if keep_comments {
        args.push(OsString::from("--keep-comments"));
    }
    args.push(file_name.to_os_string());
    args
}

pub fn has_unexpanded_includes(content: &str) -> bool {
    content.contains("\\input{") || content.contains("\\include{")
}

fn read_captured(file: &mut File) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut buf)?;
    Ok(buf)
}
