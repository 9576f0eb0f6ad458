//! Fetch the LaTeX source of an arXiv paper and flatten it into a single
//! document suitable for a language model prompt.

pub mod arxiv;
pub mod config;
pub mod error;
pub mod internal;
pub mod latex;

pub use error::{ArxivToPromptError, Result};
pub use internal::{arxiv_to_prompt, process_arxiv_paper};
