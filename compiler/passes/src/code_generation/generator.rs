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

use crate::CompilerState;

use std::fmt::Write as _;

/// Builds the emitted program out of three append-only streams: static
/// data tables, declarations at the top of `runTests`, and the body of
/// `runTests`. Tables take their names from a single monotonic counter.
pub struct CodeGeneratingVisitor<'a> {
    /// Shared compiler state; the handler side-channels warnings.
    pub state: &'a CompilerState,
    /// Emitted static tables.
    pub(crate) tables: String,
    /// Declarations at the top of `runTests`.
    pub(crate) decls: String,
    /// The statements of `runTests`.
    pub(crate) body: String,
    /// A counter to track the next available table name.
    pub(crate) next_table: u64,
    /// Current indentation depth of the body stream, in 4-space units.
    pub(crate) indent: usize,
}

impl<'a> CodeGeneratingVisitor<'a> {
    pub fn new(state: &'a CompilerState) -> Self {
        Self { state, tables: String::new(), decls: String::new(), body: String::new(), next_table: 0, indent: 1 }
    }

    /// Returns the next table index and increments the internal state.
    pub(crate) fn fresh_table(&mut self) -> u64 {
        let next = self.next_table;
        self.next_table += 1;
        next
    }

    /// The offset variable owned by nesting level `level`.
    pub(crate) fn offset_var(level: usize) -> String {
        format!("off{level}")
    }

    /// Appends one indented line to the body stream.
    pub(crate) fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.body.push_str("    ");
        }
        self.body.push_str(text);
        self.body.push('\n');
    }

    /// Appends an opening line (ending in `{`) and indents.
    pub(crate) fn open(&mut self, text: &str) {
        self.line(text);
        self.indent += 1;
    }

    /// Dedents and closes the innermost block.
    pub(crate) fn close(&mut self) {
        self.indent -= 1;
        self.line("}");
    }

    /// Appends a declaration to the declaration stream.
    pub(crate) fn declare(&mut self, text: &str) {
        writeln!(self.decls, "    {text}").expect("failed to write declaration");
    }

    /// Appends a blank separator line to the body, collapsing repeats.
    pub(crate) fn separator(&mut self) {
        if !self.body.is_empty() && !self.body.ends_with("\n\n") {
            self.body.push('\n');
        }
    }
}
