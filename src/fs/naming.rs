//! FAT-safe filename generation.

/// Longest filename produced, in characters.
///
/// Below the 255 limit so callers can append up to 15 characters
/// (counters, extensions) and still fit on ext4 behind a FUSE layer.
pub const MAX_FILENAME_LEN: usize = 240;

/// Returned when nothing usable is left of the input.
pub const INVALID_FILENAME: &str = "(invalid)";

/// Turn an arbitrary string into a filename valid on FAT filesystems.
///
/// Leading and trailing dots and spaces are dropped, so hidden names lose
/// their dot. Every character FAT rejects becomes `_`, and the result is
/// capped at [`MAX_FILENAME_LEN`] characters.
pub fn build_valid_filename(name: &str) -> String {
    let name = name.trim_matches(is_trimmed);
    if name.is_empty() {
        return INVALID_FILENAME.to_string();
    }

    let sanitized: String = name
        .chars()
        .map(|c| if is_valid_fat_filename_char(c) { c } else { '_' })
        .take(MAX_FILENAME_LEN)
        .collect();

    // Truncation may leave a dot or space at the end.
    sanitized.trim_end_matches(is_trimmed).to_string()
}

/// Whether `c` may appear in a FAT filename.
pub fn is_valid_fat_filename_char(c: char) -> bool {
    !matches!(
        c,
        '\u{00}'..='\u{1f}' | '"' | '*' | '/' | ':' | '<' | '>' | '?' | '\\' | '|' | '\u{7f}'
    )
}

fn is_trimmed(c: char) -> bool {
    c == '.' || c == ' '
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(output: &str) {
        assert!(!output.is_empty());
        assert!(output.chars().count() <= MAX_FILENAME_LEN);
        assert!(output.chars().all(is_valid_fat_filename_char));
        assert!(!output.starts_with(is_trimmed));
        assert!(!output.ends_with(is_trimmed));
    }

    #[test]
    fn test_build_valid_filename_passthrough() {
        assert_eq!(build_valid_filename("Chapter 12.cbz"), "Chapter 12.cbz");
        assert_eq!(build_valid_filename("日本語 タイトル"), "日本語 タイトル");
        assert_eq!(build_valid_filename("a..b"), "a..b");
    }

    #[test]
    fn test_build_valid_filename_reserved() {
        assert_eq!(build_valid_filename("a:b*c"), "a_b_c");
        assert_eq!(
            build_valid_filename(r#"what? "this" <is> a|b\c/d"#),
            "what_ _this_ _is_ a_b_c_d"
        );
    }

    #[test]
    fn test_build_valid_filename_control_chars() {
        assert_eq!(build_valid_filename("tab\there"), "tab_here");
        assert_eq!(build_valid_filename("nul\0del\u{7f}"), "nul_del_");
        // Not trimmed, replaced
        assert_eq!(build_valid_filename("\nname\n"), "_name_");
    }

    #[test]
    fn test_build_valid_filename_trims() {
        assert_eq!(build_valid_filename(".hidden"), "hidden");
        assert_eq!(build_valid_filename(" . name . "), "name");
        assert_eq!(build_valid_filename("..."), INVALID_FILENAME);
    }

    #[test]
    fn test_build_valid_filename_empty() {
        assert_eq!(build_valid_filename(""), "(invalid)");
        assert_eq!(build_valid_filename("."), "(invalid)");
        assert_eq!(build_valid_filename("   "), "(invalid)");
    }

    #[test]
    fn test_build_valid_filename_truncates() {
        let long = "a".repeat(300);
        assert_eq!(build_valid_filename(&long), "a".repeat(MAX_FILENAME_LEN));

        // Counted in characters, not bytes
        let wide = "é".repeat(250);
        assert_eq!(build_valid_filename(&wide).chars().count(), MAX_FILENAME_LEN);
    }

    #[test]
    fn test_build_valid_filename_truncation_exposes_dot() {
        let name = format!("{}. tail", "a".repeat(MAX_FILENAME_LEN - 2));
        let result = build_valid_filename(&name);
        assert_eq!(result, "a".repeat(MAX_FILENAME_LEN - 2));
        assert_valid(&result);
    }

    #[test]
    fn test_build_valid_filename_invariants() {
        let inputs = [
            "",
            ".",
            "..",
            " ",
            "\0",
            "\u{1f}",
            ". .x. .",
            "con:aux",
            "/etc/passwd",
            "..\\windows\\system32",
            "trailing dot.",
            "a/b:c*d?e\"f<g>h|i\\j",
        ];
        for input in inputs {
            assert_valid(&build_valid_filename(input));
        }
        assert_valid(&build_valid_filename(&"x:".repeat(200)));
    }

    #[test]
    fn test_is_valid_fat_filename_char() {
        for c in ['a', 'Z', '0', ' ', '.', '-', '_', 'é', '€', '\u{80}'] {
            assert!(is_valid_fat_filename_char(c), "{:?}", c);
        }
        for c in ['"', '*', '/', ':', '<', '>', '?', '\\', '|', '\0', '\n', '\u{1f}', '\u{7f}'] {
            assert!(!is_valid_fat_filename_char(c), "{:?}", c);
        }
    }
}
