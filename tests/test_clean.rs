use arxiv_to_prompt::latex::clean_latex;

#[test]
fn test_comments_and_blank_runs() {
    assert_eq!(clean_latex("A%comment\nB\n\n\n\nC"), "A\nB\n\nC");
}

#[test]
fn test_escaped_percent_is_kept() {
    assert_eq!(clean_latex(r"100\% done"), r"100\% done");
    assert_eq!(clean_latex("100\\% done % but this goes"), "100\\% done ");
}

#[test]
fn test_clean_input_is_unchanged() {
    let clean = "\\documentclass{article}\n\\begin{document}\nText.\n\nMore text.\n\\end{document}\n";
    assert_eq!(clean_latex(clean), clean);
    assert_eq!(clean_latex(&clean_latex(clean)), clean);
}

#[test]
fn test_whole_comment_lines() {
    let input = "\\section{Intro}\n% TODO rewrite\n%% another\nBody text\n";
    assert_eq!(clean_latex(input), "\\section{Intro}\n\nBody text\n");
}

#[test]
fn test_comment_block_collapses() {
    let input = "Para one.\n%\n%\n%\n\nPara two.";
    assert_eq!(clean_latex(input), "Para one.\n\nPara two.");
}

#[test]
fn test_verbatim_is_not_protected() {
    let input = "\\begin{verbatim}\nprintf(\"%d\", x);\n\\end{verbatim}";
    assert_eq!(
        clean_latex(input),
        "\\begin{verbatim}\nprintf(\"\n\\end{verbatim}"
    );
}
