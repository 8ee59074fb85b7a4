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

use crate::CodeGeneratingVisitor;

use mimec_ast::TestId;

impl CodeGeneratingVisitor<'_> {
    /// Emits the whole tree as the body of `runTests`, then assembles
    /// tables, declarations, and code into one program string.
    ///
    /// The prologue and epilogue around this output are the caller's
    /// concern.
    pub fn visit_tree(&mut self) -> String {
        let tree = &self.state.tree;

        // One offset variable per nesting level, declared once.
        if let Some(max_level) = tree.max_level() {
            for level in 0..=max_level {
                self.declare(&format!("size_t off{level};"));
            }
        }
        self.declare("int rslt;");
        self.declare("int haveError = 0;");

        self.put_tests(&tree.root().subtests, 0);

        let mut program = String::new();
        if !self.tables.is_empty() {
            program.push_str(&self.tables);
            program.push('\n');
        }
        program.push_str("MagicResult\nrunTests(const unsigned char *buf, size_t len, const char **mime)\n{\n");
        program.push_str(&self.decls);
        program.push('\n');
        program.push_str(&self.body);
        program.push('\n');
        program.push_str("    return haveError ? MagicError : MagicFail;\n}\n");
        program
    }

    /// Emits one sibling group: partition by priority, ascending, keeping
    /// source order within each class.
    pub(crate) fn put_tests(&mut self, tests: &[TestId], level: usize) {
        let mut priorities: Vec<u32> = tests.iter().map(|id| self.state.tree.get(*id).priority).collect();
        priorities.sort_unstable();
        priorities.dedup();

        for priority in priorities {
            let class: Vec<TestId> =
                tests.iter().copied().filter(|id| self.state.tree.get(*id).priority == priority).collect();
            self.put_tests_class(&class, level);
        }
    }
}
