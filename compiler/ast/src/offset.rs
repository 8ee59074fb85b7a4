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

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an offset cannot be lowered.
///
/// Recorded during parsing; the validation pass reports issues after
/// pruning so that only surviving rules warn.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum OffsetIssue {
    /// The text does not match the offset mini-language at all.
    Unparseable,
    /// A fetch width this compiler cannot lower (`i`, `I`, or `m`).
    UnimplementedTypeFlag(char),
    /// The arithmetic operand nests another indirect offset.
    NestedOperand(String),
}

/// Where in the classified buffer a test reads its value.
///
/// The offset mini-language has two shapes: a direct integer literal,
/// optionally made relative to the enclosing test's offset by a leading
/// `&`, and an indirect `(expr)` form that fetches the real offset from
/// the buffer itself, e.g. `(0x3c.l+4)`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    /// The original offset text, kept for test ids and diagnostics.
    pub raw: String,
    /// The integer literal, or the base expression inside `(…)`.
    pub base: String,
    /// The `(…)` form: the offset is fetched from the buffer.
    pub indirect: bool,
    /// `&` inside the parens: the fetch address is relative to the outer offset.
    pub inner_relative: bool,
    /// `&` before the parens or literal: the result is relative to the outer offset.
    pub outer_relative: bool,
    /// Neither indirect nor outer-relative.
    pub simple: bool,
    /// The fetch width and byte order, one of `b i s l B I S L`. Meaningful
    /// only when `indirect`.
    pub type_flag: char,
    /// Arithmetic applied after the fetch, e.g. the `+` of `(0x3c.l+4)`.
    pub op: Option<char>,
    /// The right-hand side of `op`.
    pub operand: Option<String>,
    /// Why this offset cannot be lowered, if it cannot.
    pub issue: Option<OffsetIssue>,
}

impl Offset {
    /// Is this a direct zero offset?
    pub fn no_offset(&self) -> bool {
        self.simple && self.base == "0"
    }

    /// Does this offset parse but defeat the code generator?
    pub fn unimplemented(&self) -> bool {
        self.issue.is_some()
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
