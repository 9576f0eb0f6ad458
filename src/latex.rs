//! LaTeX source handling: main-file discovery, flattening through latexpand,
//! and comment cleanup.

pub mod clean;
pub mod expand;
pub mod parser;

pub use clean::clean_latex;
pub use expand::{Expander, Latexpand};
pub use parser::find_main_tex_file;
