//! Output file naming.

use std::collections::HashSet;
use std::path::Path;

/// Prefix added to every output file name.
pub const OUTPUT_PREFIX: &str = "processed_";

/// `processed_<input stem>.<extension>`.
///
/// ```
/// use std::path::Path;
/// use tally_output::processed_file_name;
///
/// assert_eq!(
///     processed_file_name(Path::new("in/March Toolkits.xls"), "xlsx"),
///     "processed_March Toolkits.xlsx"
/// );
/// ```
pub fn processed_file_name(input: &Path, extension: &str) -> String {
    format!("{}.{extension}", processed_stem(input))
}

/// `processed_<input stem>`, the base for per-sheet CSV names.
pub fn processed_stem(input: &Path) -> String {
    format!("{OUTPUT_PREFIX}{}", output_stem(input))
}

/// Input file stem, or `output` when the path has none.
fn output_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "output".to_string())
}

/// Replaces characters that are awkward in file names with `_`.
pub(crate) fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | ' ' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "sheet".to_string()
    } else {
        cleaned
    }
}

/// Makes every name unique ignoring case by appending `_2`, `_3`, ...
/// Suffixed names are cut so they stay within `max_chars` characters.
pub(crate) fn dedupe_names<I>(names: I, max_chars: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut taken = HashSet::new();
    let mut unique = Vec::new();
    for name in names {
        let mut candidate = name.clone();
        let mut counter = 2usize;
        while !taken.insert(candidate.to_lowercase()) {
            let suffix = format!("_{counter}");
            let keep = max_chars.saturating_sub(suffix.chars().count());
            candidate = format!("{}{suffix}", name.chars().take(keep).collect::<String>());
            counter += 1;
        }
        unique.push(candidate);
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_replaced() {
        assert_eq!(
            processed_file_name(Path::new("/data/toolkits.csv"), "csv"),
            "processed_toolkits.csv"
        );
        assert_eq!(
            processed_file_name(Path::new("toolkits.xlsx"), "xlsx"),
            "processed_toolkits.xlsx"
        );
        assert_eq!(processed_stem(Path::new("")), "processed_output");
    }

    #[test]
    fn test_dedupe_names() {
        let names = dedupe_names(
            ["Q1_East_", "q1_east_", "Q1_East_", "North"].map(String::from),
            usize::MAX,
        );
        assert_eq!(names, vec!["Q1_East_", "q1_east__2", "Q1_East__3", "North"]);

        let names = dedupe_names(["abcdef", "ABCDEF"].map(String::from), 6);
        assert_eq!(names, vec!["abcdef", "ABCD_2"]);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_component("Q1/Q2: East"), "Q1_Q2_ East");
        assert_eq!(sanitize_component("  "), "sheet");
    }
}
