//! Revision ordering and dynamic revision matching
//!
//! Revisions are free-form strings such as `1.10`, `2.0-rc1` or
//! `3.1.0-SNAPSHOT`. They are compared part by part:
//!
//! ```text
//! "2.0-rc1"  ->  [2] [0] [rc] [1]
//! "2.0"      ->  [2] [0]
//! ```
//!
//! Numeric parts compare numerically, words by their pre-release rank
//! (`dev` < `alpha` < `beta` < `milestone` < `rc` < `snapshot` < release),
//! and a number always outranks a word. When one revision runs out of parts,
//! the longer one wins unless its next part is a pre-release word, so
//! `2.0-rc1` < `2.0` < `2.0.1`.
//!
//! Dynamic revisions (`latest.integration`, `latest.release`, `1.+`) are
//! requests that must be expanded against a repository listing before a
//! module can be fetched.

use std::cmp::Ordering;

/// Rank given to words without a pre-release meaning
const PLAIN_WORD_RANK: u8 = 6;

/// Rank of release markers (`final`, `ga`, `release`)
const RELEASE_RANK: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Number(u64),
    Word(String),
}

fn word_rank(word: &str) -> u8 {
    match word {
        "dev" => 0,
        "alpha" | "a" => 1,
        "beta" | "b" => 2,
        "milestone" | "m" => 3,
        "rc" | "cr" | "pre" => 4,
        "snapshot" => 5,
        "final" | "ga" | "release" => RELEASE_RANK,
        _ => PLAIN_WORD_RANK,
    }
}

fn split_parts(revision: &str) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = false;

    let flush = |current: &mut String, is_digit: bool, parts: &mut Vec<Part>| {
        if current.is_empty() {
            return;
        }
        let part = if is_digit {
            current
                .parse::<u64>()
                .map_or_else(|_| Part::Word(current.clone()), Part::Number)
        } else {
            Part::Word(current.to_ascii_lowercase())
        };
        parts.push(part);
        current.clear();
    };

    for c in revision.chars() {
        if matches!(c, '.' | '-' | '_' | '+') {
            flush(&mut current, current_is_digit, &mut parts);
            continue;
        }
        let is_digit = c.is_ascii_digit();
        if !current.is_empty() && is_digit != current_is_digit {
            flush(&mut current, current_is_digit, &mut parts);
        }
        current_is_digit = is_digit;
        current.push(c);
    }
    flush(&mut current, current_is_digit, &mut parts);
    parts
}

fn compare_parts(a: &Part, b: &Part) -> Ordering {
    match (a, b) {
        (Part::Number(x), Part::Number(y)) => x.cmp(y),
        (Part::Number(_), Part::Word(_)) => Ordering::Greater,
        (Part::Word(_), Part::Number(_)) => Ordering::Less,
        (Part::Word(x), Part::Word(y)) => word_rank(x).cmp(&word_rank(y)).then_with(|| x.cmp(y)),
    }
}

fn is_pre_release(part: &Part) -> bool {
    matches!(part, Part::Word(w) if word_rank(w) < PLAIN_WORD_RANK)
}

/// Compare two revisions, returning the ordering of `a` relative to `b`
pub fn compare_revisions(a: &str, b: &str) -> Ordering {
    let left = split_parts(a);
    let right = split_parts(b);

    for (x, y) in left.iter().zip(right.iter()) {
        let ordering = compare_parts(x, y);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    let ordering = match left.len().cmp(&right.len()) {
        Ordering::Equal => Ordering::Equal,
        Ordering::Greater => {
            if is_pre_release(&left[right.len()]) {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        Ordering::Less => {
            if is_pre_release(&right[left.len()]) {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
    };

    // Keep the order total for revisions that only differ in separators
    ordering.then_with(|| a.cmp(b))
}

/// Pick the greatest revision of a set
pub fn latest<'a>(revisions: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    revisions
        .into_iter()
        .max_by(|a, b| compare_revisions(a, b))
}

/// Whether a revision is a request that needs expanding against a listing
pub fn is_dynamic(revision: &str) -> bool {
    revision.starts_with("latest") || revision.ends_with('+')
}

/// Whether a concrete revision satisfies a dynamic request
pub fn matches_dynamic(request: &str, candidate: &str) -> bool {
    match request {
        "latest" | "latest.integration" => true,
        "latest.release" => !split_parts(candidate).iter().any(is_pre_release),
        _ => match request.strip_suffix('+') {
            Some(prefix) => candidate.starts_with(prefix) && candidate.len() > prefix.len(),
            None => request == candidate,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_order {
        ($test_name:ident, $lower:expr, $higher:expr) => {
            #[test]
            fn $test_name() {
                assert_eq!(compare_revisions($lower, $higher), Ordering::Less);
                assert_eq!(compare_revisions($higher, $lower), Ordering::Greater);
            }
        };
    }

    test_order!(test_numeric_parts, "1.9", "1.10");
    test_order!(test_major_dominates, "1.99", "2.0");
    test_order!(test_release_beats_rc, "2.0-rc1", "2.0");
    test_order!(test_patch_beats_release, "2.0", "2.0.1");
    test_order!(test_alpha_before_beta, "1.0-alpha", "1.0-beta");
    test_order!(test_snapshot_before_release, "3.1.0-SNAPSHOT", "3.1.0");
    test_order!(test_rc_numbers, "1.0-rc1", "1.0-rc2");
    test_order!(test_dev_first, "1.0-dev", "1.0-alpha");

    #[test]
    fn test_equal_revisions() {
        assert_eq!(compare_revisions("1.0", "1.0"), Ordering::Equal);
    }

    #[test]
    fn test_latest() {
        let revisions = ["1.0", "2.0-rc1", "1.10", "2.0"];
        assert_eq!(latest(revisions.iter().copied()), Some("2.0"));
        assert_eq!(latest(std::iter::empty()), None);
    }

    #[test]
    fn test_is_dynamic() {
        assert!(is_dynamic("latest.integration"));
        assert!(is_dynamic("latest.release"));
        assert!(is_dynamic("1.+"));
        assert!(!is_dynamic("1.0"));
    }

    #[test]
    fn test_matches_dynamic() {
        assert!(matches_dynamic("1.+", "1.4"));
        assert!(!matches_dynamic("1.+", "2.0"));
        assert!(!matches_dynamic("1.+", "1."));
        assert!(matches_dynamic("latest.integration", "2.0-SNAPSHOT"));
        assert!(!matches_dynamic("latest.release", "2.0-SNAPSHOT"));
        assert!(matches_dynamic("latest.release", "2.0"));
        assert!(matches_dynamic("+", "0.1"));
    }
}
