//! Platform-aware shell string escaping.
//!
//! Pure transforms over untrusted input. Two families: literal escaping
//! (every character of the result is literal to the shell) and argument
//! escaping for whole pipe expressions (the shell must still parse `|` as a
//! pipe operator, but nothing may break out of the surrounding quotes).

/// Single-quote a string for POSIX shells so every character is literal.
///
/// An embedded `'` cannot appear inside single quotes, so it is rendered as
/// `'\''` (close quote, escaped quote, reopen quote).
pub fn escape_unix_literal(input: &str) -> String {
    format!("'{}'", input.replace('\'', r"'\''"))
}

/// Single-quote a string for PowerShell so every character is literal.
///
/// PowerShell doubles embedded single quotes instead of backslash-escaping.
pub fn escape_powershell_literal(input: &str) -> String {
    format!("'{}'", input.replace('\'', "''"))
}

/// Double-quote a whole pipe expression for a POSIX shell.
///
/// Inside double quotes the shell still expands `$`, backticks, and
/// backslash sequences, so those are neutralized. The backslash pass must
/// run first: later passes introduce backslashes that would otherwise be
/// escaped a second time.
pub fn escape_unix_argument(input: &str) -> String {
    let escaped = input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('`', "\\`")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("\"{escaped}\"")
}

/// Double-quote a whole pipe expression for PowerShell.
///
/// The backtick is PowerShell's escape character and must be doubled first;
/// control characters become their backtick escape sequences.
pub fn escape_powershell_argument(input: &str) -> String {
    let escaped = input
        .replace('`', "``")
        .replace('"', "`\"")
        .replace('\r', "`r")
        .replace('\n', "`n")
        .replace('\t', "`t");
    format!("\"{escaped}\"")
}

/// Join raw command strings into one pipe expression.
///
/// Performs no escaping: escaping is applied to the joined whole by the
/// caller, because the shell must still see the pipe operators. A single
/// command is returned unchanged; an empty list yields an empty string.
pub fn build_pipeline_command(commands: &[String]) -> String {
    match commands {
        [] => String::new(),
        [only] => only.clone(),
        _ => commands.join(" | "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_literal_plain_string_only_gains_quotes() {
        assert_eq!(escape_unix_literal("hello"), "'hello'");
    }

    #[test]
    fn unix_literal_embedded_quote() {
        assert_eq!(escape_unix_literal("it's"), r"'it'\''s'");
    }

    #[test]
    fn powershell_literal_doubles_quotes() {
        assert_eq!(escape_powershell_literal("it's"), "'it''s'");
    }

    #[test]
    fn unix_argument_plain_string_only_gains_quotes() {
        assert_eq!(escape_unix_argument("cat | head -2"), "\"cat | head -2\"");
    }

    #[test]
    fn unix_argument_escapes_backslash_before_dollar() {
        // A backslash already in the input must not swallow the backslash
        // added for the dollar sign.
        assert_eq!(escape_unix_argument(r"a\$b"), "\"a\\\\\\$b\"");
    }

    #[test]
    fn unix_argument_neutralizes_expansion_characters() {
        assert_eq!(escape_unix_argument("echo `id`"), "\"echo \\`id\\`\"");
        assert_eq!(escape_unix_argument("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(escape_unix_argument("a\nb"), "\"a\\nb\"");
    }

    #[test]
    fn powershell_argument_backtick_runs_first() {
        // The backtick introduced for the quote must not be doubled.
        assert_eq!(escape_powershell_argument("a`\"b"), "\"a```\"b\"");
    }

    #[test]
    fn powershell_argument_control_characters() {
        assert_eq!(escape_powershell_argument("a\r\n\tb"), "\"a`r`n`tb\"");
    }

    #[test]
    fn pipeline_join_rules() {
        assert_eq!(build_pipeline_command(&[]), "");
        assert_eq!(build_pipeline_command(&["cat".into()]), "cat");
        assert_eq!(
            build_pipeline_command(&["sort".into(), "uniq".into(), "head -2".into()]),
            "sort | uniq | head -2"
        );
    }

    #[test]
    fn pipeline_join_does_not_escape_segments() {
        assert_eq!(
            build_pipeline_command(&["grep \"x\"".into(), "wc -l".into()]),
            "grep \"x\" | wc -l"
        );
    }
}
