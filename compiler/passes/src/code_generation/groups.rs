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

//! The table-driven fast shapes.
//!
//! Two sibling patterns are cheap to dispatch through a static table and
//! a single runtime call: big-endian shorts compared for equality at
//! offset 0, and plain string equalities at offset 0, both yielding a
//! MIME directly. Everything else lowers test by test.

use crate::CodeGeneratingVisitor;
use crate::code_generation::literals::{bytes_to_c, split_string_bytes};

use mimec_ast::{Endianness, IntWidth, Test, TestId, TestKind};

use std::fmt::Write as _;

impl CodeGeneratingVisitor<'_> {
    /// Emits one priority class: peel off the fast shapes, then lower the
    /// remainder one test at a time in source order.
    pub(crate) fn put_tests_class(&mut self, tests: &[TestId], level: usize) {
        let (short_map, rest) = self.select_beshort_map(tests);
        if !short_map.is_empty() {
            self.emit_short_map(&short_map);
        }

        let (string_map, rest) = self.select_string_map(&rest);
        if !string_map.is_empty() {
            self.emit_string_map(&string_map);
        }

        for id in rest {
            self.put_test(id, level);
        }
    }

    /// Splits off signed big-endian short equalities at offset 0 that
    /// yield a MIME; they collapse into one `beShortGroup` call.
    fn select_beshort_map(&self, tests: &[TestId]) -> (Vec<TestId>, Vec<TestId>) {
        let mut selected = Vec::new();
        let mut rest = Vec::new();

        for id in tests {
            let test = self.state.tree.get(*id);
            if is_beshort_map_candidate(test) {
                selected.push(*id);
            } else {
                if self.state.debug && is_beshort(test) {
                    tracing::debug!(lnum = test.lnum, id = %test.test_id, "beshort test not eligible for short map");
                }
                rest.push(*id);
            }
        }
        (selected, rest)
    }

    /// Splits off plain string equalities at offset 0 that yield a MIME;
    /// they collapse into one `stringEqualMap` call.
    fn select_string_map(&self, tests: &[TestId]) -> (Vec<TestId>, Vec<TestId>) {
        let mut selected = Vec::new();
        let mut rest = Vec::new();

        for id in tests {
            let test = self.state.tree.get(*id);
            if is_string_map_candidate(test) {
                selected.push(*id);
            } else {
                rest.push(*id);
            }
        }
        (selected, rest)
    }

    /// Emits a `ShortMapEntry` table, sorted by value for the runtime's
    /// binary search, and the single dispatch call.
    fn emit_short_map(&mut self, tests: &[TestId]) {
        let name = format!("shortMap{}", self.fresh_table());

        let mut entries: Vec<(&Test, u64)> = tests
            .iter()
            .map(|id| {
                let test = self.state.tree.get(*id);
                (test, parse_c_int(&test.target).expect("candidates have numeric targets"))
            })
            .collect();
        entries.sort_by_key(|(_, value)| *value);

        writeln!(self.tables, "static const ShortMapEntry {name}[] = {{").expect("failed to write table");
        for (test, _) in &entries {
            let mask = test.mask.as_deref().unwrap_or("0xffff");
            let mime = test.set_mime.as_deref().expect("candidates carry a MIME");
            writeln!(self.tables, "    {{ {}, {mask}, \"{mime}\" }},", test.target).expect("failed to write table");
        }
        writeln!(self.tables, "}};").expect("failed to write table");

        self.separator();
        self.line(&format!("rslt = beShortGroup(buf, len, {name}, {}, mime);", entries.len()));
        self.open("if (rslt < 0) {");
        self.line("haveError = 1;");
        self.close();
        self.open("if (rslt > 0) {");
        self.line("return MagicMatch;");
        self.close();
    }

    /// Emits a `StringMapEntry` table, sorted by the raw bytes of the
    /// target, and the single dispatch call.
    fn emit_string_map(&mut self, tests: &[TestId]) {
        let name = format!("stringMap{}", self.fresh_table());

        let mut entries: Vec<(&Test, Vec<u8>)> = tests
            .iter()
            .map(|id| {
                let test = self.state.tree.get(*id);
                (test, split_string_bytes(&test.target))
            })
            .collect();
        entries.sort_by(|(_, a), (_, b)| a.cmp(b));

        writeln!(self.tables, "static const StringMapEntry {name}[] = {{").expect("failed to write table");
        for (test, bytes) in &entries {
            let mime = test.set_mime.as_deref().expect("candidates carry a MIME");
            writeln!(self.tables, "    {{ {}, {}, \"{mime}\" }},", bytes_to_c(bytes), bytes.len())
                .expect("failed to write table");
        }
        writeln!(self.tables, "}};").expect("failed to write table");

        self.separator();
        self.line(&format!("rslt = stringEqualMap(buf, len, {name}, {}, mime);", entries.len()));
        self.open("if (rslt < 0) {");
        self.line("haveError = 1;");
        self.close();
        self.open("if (rslt > 0) {");
        self.line("return MagicMatch;");
        self.close();
    }
}

/// Is this any big-endian short test?
fn is_beshort(test: &Test) -> bool {
    test.kind == TestKind::Integer { width: IntWidth::Short, endian: Some(Endianness::Big) }
}

fn is_beshort_map_candidate(test: &Test) -> bool {
    is_beshort(test)
        && !test.unsigned
        && test.target_oper == "="
        && test.set_mime.is_some()
        && test.offset.as_ref().is_some_and(|o| o.no_offset())
        && parse_c_int(&test.target).is_some()
}

fn is_string_map_candidate(test: &Test) -> bool {
    test.kind == TestKind::String
        && test.flags.is_empty()
        && test.target_oper == "="
        && test.set_mime.is_some()
        && test.offset.as_ref().is_some_and(|o| o.no_offset())
}

/// Parses a C-style integer literal: hex, octal, or decimal.
pub(crate) fn parse_c_int(text: &str) -> Option<u64> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else if text.len() > 1 && text.starts_with('0') {
        u64::from_str_radix(&text[1..], 8).ok()
    } else {
        text.parse().ok()
    }
}
