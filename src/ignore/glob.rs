//! Single path-segment wildcard matching.
//!
//! `*` matches any run of characters (including none) and `?` matches exactly
//! one character. Matching is a backtracking search over characters, never a
//! regex translation.

/// Returns true when `candidate` matches the wildcard `pattern` in full.
pub fn glob_match(pattern: &str, candidate: &str) -> bool {
    let pattern: Vec<char> = collapse_stars(pattern);
    let candidate: Vec<char> = candidate.chars().collect();
    match_from(&pattern, &candidate)
}

/// True when the segment contains a wildcard character.
pub fn has_wildcard(segment: &str) -> bool {
    segment.contains('*') || segment.contains('?')
}

// Runs of `*` are equivalent to a single `*`; collapsing them bounds the
// backtracking depth.
fn collapse_stars(pattern: &str) -> Vec<char> {
    let mut out: Vec<char> = Vec::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '*' && out.last() == Some(&'*') {
            continue;
        }
        out.push(c);
    }
    out
}

fn match_from(pattern: &[char], candidate: &[char]) -> bool {
    match pattern.split_first() {
        None => candidate.is_empty(),
        Some(('*', rest)) => {
            if rest.is_empty() {
                return true;
            }
            (0..=candidate.len()).any(|skip| match_from(rest, &candidate[skip..]))
        }
        Some(('?', rest)) => !candidate.is_empty() && match_from(rest, &candidate[1..]),
        Some((c, rest)) => candidate.first() == Some(c) && match_from(rest, &candidate[1..]),
    }
}
