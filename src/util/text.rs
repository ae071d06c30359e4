// src/util/text.rs

/// Extract the first non-empty line of a multiline comment, trimmed.
///
/// # Examples
///
/// ```
/// use notelog::util::text::first_line;
///
/// let comment = "\n  Crash on save  \nSteps: open the dialog";
/// assert_eq!(first_line(comment), "Crash on save");
/// ```
pub fn first_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}
