//! "Did you mean" suggestions for mistyped values.
//!
//! Candidates are ranked by Levenshtein distance to the input. A candidate
//! whose distance is at least the input's length shares nothing useful with
//! it and is dropped.

/// Build the help text suggesting `candidates` for a mistyped `input`.
///
/// - Empty input lists every candidate, sorted, as `available values:`.
/// - Otherwise close candidates are listed by ascending distance, ties in
///   candidate order, as `did you mean any of these?`; a single close
///   candidate becomes `did you mean: 'x'?`.
/// - When nothing is close, every candidate is listed as for empty input.
///
/// Returns `None` when there are no candidates at all.
///
/// # Example
///
/// ```
/// use errata::suggest::suggest_help;
///
/// let help = suggest_help("fo", &["foo", "bar", "foobar"]);
/// assert_eq!(help.as_deref(), Some("did you mean: 'foo'?"));
/// ```
pub fn suggest_help<S: AsRef<str>>(input: &str, candidates: &[S]) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }

    let candidates = dedup(candidates);
    if input.is_empty() {
        return Some(available_values(candidates));
    }

    let threshold = input.chars().count();
    let mut close: Vec<(usize, &str)> = candidates
        .iter()
        .map(|candidate| (levenshtein_distance(input, candidate), *candidate))
        .filter(|(distance, _)| *distance < threshold)
        .collect();
    // Stable: equal distances keep candidate order
    close.sort_by_key(|(distance, _)| *distance);

    match close.as_slice() {
        [] => Some(available_values(candidates)),
        [(_, only)] => Some(format!("did you mean: '{}'?", only)),
        _ => {
            let names: Vec<&str> = close.iter().map(|(_, name)| *name).collect();
            Some(bulleted("did you mean any of these?", &names))
        }
    }
}

/// Candidates in their original order, keeping the first of any duplicates.
fn dedup<S: AsRef<str>>(candidates: &[S]) -> Vec<&str> {
    let mut seen = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let candidate = candidate.as_ref();
        if !seen.contains(&candidate) {
            seen.push(candidate);
        }
    }
    seen
}

fn available_values(mut candidates: Vec<&str>) -> String {
    candidates.sort_unstable();
    bulleted("available values:", &candidates)
}

fn bulleted(header: &str, items: &[&str]) -> String {
    let mut text = header.to_string();
    for item in items {
        text.push_str("\n- ");
        text.push_str(item);
    }
    text
}

/// Levenshtein distance over chars.
///
/// Keeps a single row of the edit matrix; `diagonal` carries the previous
/// row's value up and to the left of the cell being filled.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=target.len()).collect();

    for (i, source) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &ch) in target.iter().enumerate() {
            let substitution = diagonal + usize::from(source != ch);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[target.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("fo", "foo"), 1);
        assert_eq!(levenshtein_distance("fo", "foobar"), 4);
        assert_eq!(levenshtein_distance("héllo", "hello"), 1);
    }

    #[test]
    fn test_levenshtein_identical_and_symmetric() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("format", "format"), 0);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
        assert_eq!(levenshtein_distance("sunday", "saturday"), 3);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
        assert_eq!(levenshtein_distance("abc", "xyz"), 3);
    }

    #[test]
    fn test_exact_match_is_suggested() {
        // Distance 0 is always below the threshold
        assert_eq!(
            suggest_help("json", &["yaml", "json"]).as_deref(),
            Some("did you mean: 'json'?")
        );
    }

    #[test]
    fn test_single_close_candidate() {
        assert_eq!(
            suggest_help("fo", &["foo", "bar", "foobar"]).as_deref(),
            Some("did you mean: 'foo'?")
        );
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // "ab" -> "xy" is distance 2, equal to the input length
        assert_eq!(
            suggest_help("ab", &["xy", "ax"]).as_deref(),
            Some("did you mean: 'ax'?")
        );
    }

    #[test]
    fn test_several_close_candidates_sorted_by_distance() {
        let help = suggest_help("colour", &["colors", "color", "flavour"]).unwrap();
        assert_eq!(help, "did you mean any of these?\n- color\n- colors\n- flavour");
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let help = suggest_help("cat", &["cut", "bat", "cot"]).unwrap();
        assert_eq!(help, "did you mean any of these?\n- cut\n- bat\n- cot");

        let help = suggest_help("cat", &["cot", "bat", "cut"]).unwrap();
        assert_eq!(help, "did you mean any of these?\n- cot\n- bat\n- cut");
    }

    #[test]
    fn test_duplicates_collapse() {
        let help = suggest_help("cat", &["bat", "cut", "bat"]).unwrap();
        assert_eq!(help, "did you mean any of these?\n- bat\n- cut");
    }

    #[test]
    fn test_empty_input_lists_sorted_values() {
        assert_eq!(
            suggest_help("", &["b", "a"]).as_deref(),
            Some("available values:\n- a\n- b")
        );
        // Never collapses to a single "did you mean"
        assert_eq!(
            suggest_help("", &["only"]).as_deref(),
            Some("available values:\n- only")
        );
    }

    #[test]
    fn test_nothing_close_falls_back_to_available_values() {
        assert_eq!(
            suggest_help("zzz", &["red", "green", "blue"]).as_deref(),
            Some("available values:\n- blue\n- green\n- red")
        );
    }

    #[test]
    fn test_no_candidates() {
        let none: [&str; 0] = [];
        assert_eq!(suggest_help("x", &none), None);
        assert_eq!(suggest_help("", &none), None);
    }

    #[test]
    fn test_owned_candidates() {
        let candidates = vec!["json".to_string(), "yaml".to_string()];
        assert_eq!(
            suggest_help("jsn", &candidates).as_deref(),
            Some("did you mean: 'json'?")
        );
    }
}
