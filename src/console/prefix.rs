//! Command prefix resolution.

/// Strip the command prefix from the first token.
///
/// Prefixes are tried in order and the first one the leading token starts
/// with wins. Without a match the line is not a command when
/// `requires_prefix` is set (empty result); otherwise it passes through.
pub fn resolve(mut tokens: Vec<String>, prefixes: &[String], requires_prefix: bool) -> Vec<String> {
    let Some(first) = tokens.first_mut() else {
        return tokens;
    };

    let matched = prefixes
        .iter()
        .filter(|prefix| !prefix.is_empty())
        .find(|prefix| first.starts_with(prefix.as_str()));

    match matched {
        Some(prefix) => {
            *first = first.replacen(prefix.as_str(), "", 1);
            tokens
        }
        None if requires_prefix => Vec::new(),
        None => tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn defaults() -> Vec<String> {
        toks(&["!", ".", "$"])
    }

    #[test]
    fn test_strips_matching_prefix() {
        assert_eq!(resolve(toks(&[".help", "x"]), &defaults(), true), toks(&["help", "x"]));
        assert_eq!(resolve(toks(&["$roll"]), &defaults(), true), toks(&["roll"]));
    }

    #[test]
    fn test_first_configured_prefix_wins() {
        let prefixes = toks(&["!", "!!"]);
        assert_eq!(resolve(toks(&["!!cmd"]), &prefixes, true), toks(&["!cmd"]));
        let prefixes = toks(&["!!", "!"]);
        assert_eq!(resolve(toks(&["!!cmd"]), &prefixes, true), toks(&["cmd"]));
    }

    #[test]
    fn test_missing_prefix() {
        assert!(resolve(toks(&["help"]), &defaults(), true).is_empty());
        assert_eq!(resolve(toks(&["help"]), &defaults(), false), toks(&["help"]));
    }

    #[test]
    fn test_optional_prefix_still_stripped() {
        assert_eq!(resolve(toks(&["!help"]), &defaults(), false), toks(&["help"]));
    }

    #[test]
    fn test_empty_prefixes_ignored() {
        let prefixes = toks(&["", "!"]);
        assert_eq!(resolve(toks(&["!a"]), &prefixes, true), toks(&["a"]));
        assert!(resolve(toks(&["a"]), &prefixes, true).is_empty());
    }

    #[test]
    fn test_empty_tokens() {
        assert!(resolve(Vec::new(), &defaults(), true).is_empty());
    }
}
