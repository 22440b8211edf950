//! The runtime's naming grammar for directly invocable commands.
use regex::Regex;
use std::sync::LazyLock;

static COMMAND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9. _#:$-][A-Za-z0-9/. _#:$-]*$").expect("regex for command pattern")
});

/// Returns true when `command` can be embedded in the runtime manifest as-is.
///
/// An empty string never matches: the pattern requires a leading character.
pub fn is_grammar_valid(command: &str) -> bool {
    COMMAND_PATTERN.is_match(command)
}

/// Returns true when `command` cannot be expressed without a wrapper.
///
/// Absolute paths always need one, whatever characters they contain.
pub fn needs_wrapper(command: &str) -> bool {
    command.starts_with('/') || !is_grammar_valid(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_full_character_set() {
        assert!(is_grammar_valid("foo.bar_1:2$-3"));
        assert!(is_grammar_valid("bin/foo --flag value"));
        assert!(is_grammar_valid("#comment-ish"));
        assert!(is_grammar_valid("$SNAP/bin/foo"));
    }

    #[test]
    fn rejects_disallowed_characters() {
        assert!(!is_grammar_valid("foo && bar"));
        assert!(!is_grammar_valid("bin/*"));
        assert!(!is_grammar_valid("foo\"bar\""));
        assert!(!is_grammar_valid("foo\tbar"));
        assert!(!is_grammar_valid(""));
    }

    #[test]
    fn slash_is_only_allowed_after_the_first_character() {
        assert!(!is_grammar_valid("/usr/bin/foo"));
        assert!(is_grammar_valid("usr/bin/foo"));
    }

    #[test]
    fn absolute_paths_always_need_a_wrapper() {
        assert!(needs_wrapper("/bin/sh"));
        assert!(needs_wrapper("/opt/a&b"));
        assert!(needs_wrapper("bin/foo *"));
        assert!(!needs_wrapper("bin/foo"));
    }
}
