//! Path utilities for the artifact cache

/// Characters that are unsafe in a single path segment on some platform
const PATH_UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Make one coordinate part safe to use as a single path segment.
///
/// Unsafe characters become `_`. Segments that would navigate (`.`, `..`)
/// or are empty are replaced wholesale, so a coordinate can never point
/// outside its cache directory.
///
/// ```ignore
/// assert_eq!(safe_segment("org.acme"), "org.acme");
/// assert_eq!(safe_segment("1.0:beta"), "1.0_beta");
/// assert_eq!(safe_segment(".."), "_");
/// ```
pub fn safe_segment(name: &str) -> String {
    let segment: String = name
        .trim()
        .chars()
        .map(|c| if PATH_UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect();

    if segment.is_empty() || segment.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        segment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_segment_keeps_coordinates() {
        assert_eq!(safe_segment("org.acme"), "org.acme");
        assert_eq!(safe_segment("core-1.0-sources.jar"), "core-1.0-sources.jar");
    }

    #[test]
    fn test_safe_segment_replaces_separators() {
        assert_eq!(safe_segment("a/b"), "a_b");
        assert_eq!(safe_segment("c:\\x"), "c__x");
        assert_eq!(safe_segment("1.0:beta"), "1.0_beta");
    }

    #[test]
    fn test_safe_segment_rejects_navigation() {
        assert_eq!(safe_segment(".."), "_");
        assert_eq!(safe_segment("."), "_");
        assert_eq!(safe_segment(""), "_");
        assert_eq!(safe_segment("  "), "_");
    }
}
