// Copyright (C) 2019-2025 Provable Inc.
// This file is part of the Mimec library.

// The Mimec library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Mimec library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Mimec library. If not, see <https://www.gnu.org/licenses/>.

/// The five semantic fields of a rule line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RuleFields {
    /// The run of leading `>` markers.
    pub levels: String,
    /// The offset expression, or a `!:` directive keyword.
    pub offset: String,
    /// The test-code expression, or a directive's first argument.
    pub test: String,
    /// The comparison target, with backslash-quoted whitespace resolved.
    pub target: String,
    /// The message remainder, right-trimmed.
    pub message: String,
}

/// Is this a comment line? Inline comments do not exist in the magic
/// grammar; test targets may legitimately contain `#`.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Is this a blank line?
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Removes all comment lines from `source`. Idempotent.
pub fn strip_comment_lines(source: &str) -> String {
    source.lines().filter(|line| !is_comment(line)).collect::<Vec<_>>().join("\n")
}

/// Splits a non-blank, non-comment line into its five fields.
///
/// Returns `None` when the line has fewer than two whitespace-separated
/// fields after the level markers. The target field ends at the first
/// unquoted whitespace: a backslash carries the following character into
/// the target (keeping the backslash so later escape decoding sees it),
/// except `\ ` which becomes a bare space.
pub fn split_fields(line: &str) -> Option<RuleFields> {
    let rest = line.trim_start();
    let levels: String = rest.chars().take_while(|c| *c == '>').collect();
    let rest = &rest[levels.len()..];

    let (offset, rest) = take_word(rest);
    if offset.is_empty() {
        return None;
    }
    let (test, rest) = take_word(rest);
    if test.is_empty() {
        return None;
    }

    let rest = rest.trim_start();
    let mut target = String::new();
    let mut remainder = "";
    let mut iter = rest.char_indices();
    while let Some((index, c)) = iter.next() {
        if c == '\\' {
            match iter.next() {
                Some((_, ' ')) => target.push(' '),
                Some((_, quoted)) => {
                    target.push('\\');
                    target.push(quoted);
                }
                None => target.push('\\'),
            }
        } else if c.is_whitespace() {
            remainder = &rest[index..];
            break;
        } else {
            target.push(c);
        }
    }

    let message = remainder.trim_start().trim_end().to_string();
    Some(RuleFields { levels, offset: offset.to_string(), test: test.to_string(), target, message })
}

/// Takes the leading whitespace-delimited word of `s`.
fn take_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(index) => (&s[..index], &s[index..]),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_rule() {
        let fields = split_fields("0\tbeshort\t0xcafe\tJava class").unwrap();
        assert_eq!(fields.levels, "");
        assert_eq!(fields.offset, "0");
        assert_eq!(fields.test, "beshort");
        assert_eq!(fields.target, "0xcafe");
        assert_eq!(fields.message, "Java class");
    }

    #[test]
    fn test_split_nested_rule() {
        let fields = split_fields(">>(0x3c.l)  string  PE\\0\\0  PE executable  ").unwrap();
        assert_eq!(fields.levels, ">>");
        assert_eq!(fields.offset, "(0x3c.l)");
        assert_eq!(fields.test, "string");
        // Escapes survive for later byte decoding.
        assert_eq!(fields.target, "PE\\0\\0");
        assert_eq!(fields.message, "PE executable");
    }

    #[test]
    fn test_split_quoted_space_in_target() {
        let fields = split_fields("0 string Microsoft\\ Word document").unwrap();
        assert_eq!(fields.target, "Microsoft Word");
        assert_eq!(fields.message, "document");
    }

    #[test]
    fn test_split_directive_line() {
        let fields = split_fields("!:mime application/pdf").unwrap();
        assert_eq!(fields.offset, "!:mime");
        assert_eq!(fields.test, "application/pdf");
        assert_eq!(fields.target, "");
        assert_eq!(fields.message, "");
    }

    #[test]
    fn test_split_requires_two_fields() {
        assert_eq!(split_fields(">0"), None);
        assert_eq!(split_fields("   "), None);
    }

    #[test]
    fn test_message_keeps_inline_hash() {
        let fields = split_fields("0 string #!/bin/sh shell script").unwrap();
        assert_eq!(fields.target, "#!/bin/sh");
        assert_eq!(fields.message, "shell script");
    }

    #[test]
    fn test_strip_comment_lines_idempotent() {
        let source = "# header\n0 string abc\n\n  # indented comment\n>4 byte 1\n";
        let once = strip_comment_lines(source);
        assert_eq!(once, "0 string abc\n\n>4 byte 1");
        assert_eq!(strip_comment_lines(&once), once);
    }
}
