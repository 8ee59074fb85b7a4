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

use std::fmt;

/// The indent prefix for diagnostic messages.
pub const INDENT: &str = "    ";

/// A diagnostic anchored to a line of the rule database.
///
/// ```text
/// --> rule 42: `>(0x3c.m)  string  PE`
///  = offset type flag `m` is not implemented
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Formatted {
    /// 1-based line number in the rule database, if known.
    pub lnum: Option<usize>,
    /// Text of the offending rule line.
    pub text: Option<String>,
    /// Explanation of the problem.
    pub message: String,
}

impl Formatted {
    /// Returns a diagnostic with no line anchor.
    pub fn new(message: String) -> Self {
        Self { lnum: None, text: None, message }
    }

    /// Returns a diagnostic anchored to line `lnum` with rule text `text`.
    pub fn new_from_line(message: String, lnum: usize, text: impl Into<String>) -> Self {
        Self { lnum: Some(lnum), text: Some(text.into()), message }
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(lnum) = self.lnum {
            let text = self.text.as_deref().unwrap_or_default();
            writeln!(f, "{INDENT}--> rule {lnum}: `{}`", text.trim_end())?;
        }
        write!(f, "{INDENT} = {}", self.message)
    }
}

impl std::error::Error for Formatted {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_with_anchor() {
        let diag = Formatted::new_from_line(
            "offset type flag `m` is not implemented".to_string(),
            42,
            ">(0x3c.m)  string  PE",
        );

        assert_eq!(
            diag.to_string(),
            vec![
                "    --> rule 42: `>(0x3c.m)  string  PE`",
                "     = offset type flag `m` is not implemented",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_formatted_without_anchor() {
        let diag = Formatted::new("no rules survived pruning".to_string());
        assert_eq!(diag.to_string(), "     = no rules survived pruning");
    }
}
