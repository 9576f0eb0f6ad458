use once_cell::sync::Lazy;
use regex::Regex;

// Two or more blank (or whitespace-only) lines in a row
static BLANK_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n\s*\n+").expect("Invalid blank line regex pattern")
});

/// Return `line` up to its first unescaped `%`.
///
/// A `%` preceded by an odd number of backslashes is a literal percent sign.
pub fn strip_comment(line: &str) -> &str {
    let mut backslashes = 0usize;
    for (idx, c) in line.char_indices() {
        match c {
            '\\' => backslashes += 1,
            '%' if backslashes % 2 == 0 => return &line[..idx],
            _ => backslashes = 0,
        }
    }
    line
}

/// Remove comments and runs of blank lines from LaTeX source.
///
/// This is purely textual: `verbatim`-like environments are not protected, so a
/// `%` inside them is stripped like any other comment.
pub fn clean_latex(content: &str) -> String {
    let stripped = content
        .split('\n')
        .map(strip_comment)
        .collect::<Vec<_>>()
        .join("\n");

    BLANK_RUN_REGEX.replace_all(&stripped, "\n\n").into_owned()
}
