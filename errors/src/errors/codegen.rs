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

/// Warnings of the code generator. The offending test is skipped or
/// partially emitted; generation continues.
#[derive(Clone, Debug, Error)]
pub enum CodeGenWarning {
    #[error("{0}")]
    Formatted(#[from] Formatted),
}

impl CodeGenWarning {
    fn new_from_line(message: String, lnum: usize, text: &str) -> Self {
        Self::Formatted(Formatted::new_from_line(message, lnum, text))
    }

    pub fn missing_search_limit(lnum: usize, text: &str) -> Self {
        Self::new_from_line("search test has no range limit, skipping".to_string(), lnum, text)
    }

    pub fn empty_compare_codes(oper: &str, lnum: usize, text: &str) -> Self {
        Self::new_from_line(format!("operator `{oper}` yields no compare codes"), lnum, text)
    }

    pub fn unrecognized_string_operator(oper: &str, lnum: usize, text: &str) -> Self {
        Self::new_from_line(format!("string test has unrecognized operator `{oper}`"), lnum, text)
    }

    pub fn unknown_string_flag(flag: char, lnum: usize, text: &str) -> Self {
        Self::new_from_line(format!("ignoring unknown string flag `{flag}`"), lnum, text)
    }

    pub fn outer_relative_at_top_level(lnum: usize, text: &str) -> Self {
        Self::new_from_line("relative offset at nesting level 0 has no outer offset".to_string(), lnum, text)
    }
}
