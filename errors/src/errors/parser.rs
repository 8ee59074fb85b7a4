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

use crate::Formatted;

use thiserror::Error;

/// Fatal errors of the rule-database parser.
#[derive(Clone, Debug, Error)]
pub enum ParserError {
    #[error("{0}")]
    Formatted(#[from] Formatted),
}

impl ParserError {
    fn new_from_line(message: String, lnum: usize, text: &str) -> Self {
        Self::Formatted(Formatted::new_from_line(message, lnum, text))
    }

    /// A rule line with fewer than the offset and test fields cannot be split.
    pub fn incomplete_rule(lnum: usize, text: &str) -> Self {
        Self::new_from_line("rule line has fewer than two fields after the level markers".to_string(), lnum, text)
    }
}

/// Warnings of the rule-database parser. The offending rule is dropped and
/// parsing continues.
#[derive(Clone, Debug, Error)]
pub enum ParserWarning {
    #[error("{0}")]
    Formatted(#[from] Formatted),
}

impl ParserWarning {
    fn new_from_line(message: String, lnum: usize, text: &str) -> Self {
        Self::Formatted(Formatted::new_from_line(message, lnum, text))
    }

    pub fn unparseable_offset(offset: &str, lnum: usize, text: &str) -> Self {
        Self::new_from_line(format!("cannot parse offset `{offset}`"), lnum, text)
    }

    pub fn unimplemented_offset_type_flag(flag: char, lnum: usize, text: &str) -> Self {
        Self::new_from_line(format!("offset type flag `{flag}` is not implemented"), lnum, text)
    }

    pub fn parenthesized_offset_operand(operand: &str, lnum: usize, text: &str) -> Self {
        Self::new_from_line(format!("indirect offset operand `{operand}` contains a nested offset"), lnum, text)
    }

    pub fn unimplemented_test_code(code: &str, lnum: usize, text: &str) -> Self {
        Self::new_from_line(format!("test code `{code}` is not implemented"), lnum, text)
    }

    pub fn invalid_test_code(code: &str, lnum: usize, text: &str) -> Self {
        Self::new_from_line(format!("unknown test code `{code}`"), lnum, text)
    }

    pub fn directive_without_test(directive: &str, lnum: usize, text: &str) -> Self {
        Self::new_from_line(format!("`{directive}` directive has no preceding test"), lnum, text)
    }

    pub fn duplicate_mime(mime: &str, lnum: usize, text: &str) -> Self {
        Self::new_from_line(format!("test already produces a MIME type, ignoring `{mime}`"), lnum, text)
    }

    pub fn malformed_directive(directive: &str, lnum: usize, text: &str) -> Self {
        Self::new_from_line(format!("cannot parse `{directive}` directive"), lnum, text)
    }

    pub fn ignored_named_block(code: &str, lnum: usize, text: &str) -> Self {
        Self::new_from_line(format!("`{code}` blocks are recognized but ignored"), lnum, text)
    }
}
