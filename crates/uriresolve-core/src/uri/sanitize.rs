//! Local-filesystem-safe file names for copied content.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Sanitizes a URI-derived file name so it stays inside the target directory.
///
/// - Replaces NUL, `/`, `\` and control characters with `_`
/// - Collapses runs of replaced characters into a single `_`
/// - Trims leading/trailing whitespace and dots
/// - Truncates to 255 bytes on a char boundary
///
/// Returns an empty string when nothing usable is left; callers treat that as
/// a missing name.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_replaced = false;

    for c in name.chars() {
        if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            if !prev_replaced {
                out.push('_');
            }
            prev_replaced = true;
        } else {
            out.push(c);
            prev_replaced = false;
        }
    }

    let trimmed = out.trim_matches(|c: char| c.is_whitespace() || c == '.');

    let mut take = trimmed.len().min(NAME_MAX);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}

/// True if `s` is usable as a single path component as-is: non-empty, not
/// `.` or `..`, and free of separators and NUL.
pub fn is_plain_component(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(&['/', '\\', '\0'][..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_unchanged() {
        assert_eq!(sanitize_filename("photo.png"), "photo.png");
        assert_eq!(sanitize_filename("IMG 0001.jpg"), "IMG 0001.jpg");
    }

    #[test]
    fn separators_replaced() {
        assert_eq!(sanitize_filename("a/b\\c.txt"), "a_b_c.txt");
        assert_eq!(sanitize_filename("x//y"), "x_y");
    }

    #[test]
    fn traversal_names_become_empty() {
        assert_eq!(sanitize_filename(".."), "");
        assert_eq!(sanitize_filename("."), "");
        assert_eq!(sanitize_filename("  "), "");
    }

    #[test]
    fn plain_components() {
        assert!(is_plain_component("a.jpg"));
        assert!(!is_plain_component(""));
        assert!(!is_plain_component(".."));
        assert!(!is_plain_component("a/b"));
    }

    #[test]
    fn control_chars_replaced() {
        assert_eq!(sanitize_filename("file\x00name.txt"), "file_name.txt");
    }

    #[test]
    fn long_names_truncated_on_char_boundary() {
        let long = "é".repeat(200);
        let out = sanitize_filename(&long);
        assert!(out.len() <= 255);
        assert!(out.chars().all(|c| c == 'é'));
    }
}
