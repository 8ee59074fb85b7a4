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

use crate::{RuleFields, is_blank, is_comment, parse_offset, parse_test_code, split_fields};

use mimec_ast::{Endianness, RuleTree, Strength, TestId};
use mimec_errors::{ParserError, ParserWarning, emitter::Handler};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// The argument of a `!:strength` directive, e.g. `+ 20`.
    static ref STRENGTH_RE: Regex = Regex::new(r"^([+*/-])\s*(\w+)").unwrap();
}

/// Tracks the rightmost path of the tree under construction.
///
/// The stack is never empty and is strictly increasing in level from
/// bottom to top; the root sits at level `-1` and is never popped.
pub struct NestingStack {
    stack: Vec<(TestId, i32)>,
}

impl NestingStack {
    /// Returns a stack holding only the root.
    pub fn new(root: TestId) -> Self {
        Self { stack: vec![(root, -1)] }
    }

    /// Pops until the top sits strictly below `level`, then returns it.
    pub fn parent_for(&mut self, level: i32) -> TestId {
        while self.stack.last().map(|(_, l)| *l >= level).unwrap_or(false) && self.stack.len() > 1 {
            self.stack.pop();
        }
        self.stack.last().expect("the nesting stack always holds the root").0
    }

    /// Notes a freshly built test as the new rightmost node.
    pub fn note(&mut self, id: TestId, level: i32) {
        if level > self.stack.last().map(|(_, l)| *l).unwrap_or(i32::MIN) {
            self.stack.push((id, level));
        }
    }
}

/// Stores the rule tree under construction plus parsing context.
///
/// The handler side-channels warnings and errors; `last` is the most
/// recently built test, which `!:` directive lines modify.
pub struct ParserContext<'a> {
    /// Handler used to side-channel emit diagnostics from the parser.
    pub(crate) handler: &'a Handler,
    /// The tree being built.
    tree: RuleTree,
    /// The rightmost path of the tree.
    stack: NestingStack,
    /// The most recently constructed test.
    last: Option<TestId>,
    /// Byte order for normalizing bare multi-byte test codes.
    target_endian: Endianness,
}

impl<'a> ParserContext<'a> {
    /// Returns a new [`ParserContext`] around an empty tree.
    pub fn new(handler: &'a Handler, target_endian: Endianness) -> Self {
        let tree = RuleTree::new();
        let stack = NestingStack::new(tree.root);
        Self { handler, tree, stack, last: None, target_endian }
    }

    /// Parses one line of the rule database.
    pub fn parse_line(&mut self, lnum: usize, line: &str) {
        if is_blank(line) || is_comment(line) {
            return;
        }
        let Some(fields) = split_fields(line) else {
            self.handler.emit_err(ParserError::incomplete_rule(lnum, line));
            return;
        };

        if fields.offset.starts_with("!:") {
            self.parse_directive(&fields, lnum, line);
        } else if fields.test == "name" || fields.test == "use" {
            // Named blocks are recognized but have no semantics here; both
            // spellings fall into the same clause deliberately.
            self.handler.emit_warning(ParserWarning::ignored_named_block(&fields.test, lnum, line));
        } else {
            self.parse_rule(&fields, lnum, line);
        }
    }

    /// Consumes the context, returning the finished tree.
    pub fn finish(self) -> RuleTree {
        self.tree
    }

    /// Applies a `!:` directive line to the most recent test.
    fn parse_directive(&mut self, fields: &RuleFields, lnum: usize, line: &str) {
        match fields.offset.as_str() {
            "!:mime" => {
                if fields.test.is_empty() {
                    self.handler.emit_warning(ParserWarning::malformed_directive("!:mime", lnum, line));
                    return;
                }
                let Some(last) = self.last else {
                    self.handler.emit_warning(ParserWarning::directive_without_test("!:mime", lnum, line));
                    return;
                };
                let test = self.tree.get_mut(last);
                if test.set_mime.is_some() {
                    self.handler.emit_warning(ParserWarning::duplicate_mime(&fields.test, lnum, line));
                } else {
                    test.set_action(fields.test.clone());
                }
            }
            "!:strength" => {
                let argument = format!("{} {}", fields.test, fields.target);
                let Some(caps) = STRENGTH_RE.captures(argument.trim()) else {
                    self.handler.emit_warning(ParserWarning::malformed_directive("!:strength", lnum, line));
                    return;
                };
                let Some(last) = self.last else {
                    self.handler.emit_warning(ParserWarning::directive_without_test("!:strength", lnum, line));
                    return;
                };
                let strength = Strength { op: caps[1].chars().next().unwrap(), value: caps[2].to_string() };
                self.tree.get_mut(last).strength = Some(strength);
            }
            "!:apple" => {
                tracing::debug!(lnum, "ignoring `!:apple` directive");
            }
            directive => {
                self.handler.emit_warning(ParserWarning::malformed_directive(directive, lnum, line));
            }
        }
    }

    /// Builds a test node and attaches it at its nesting level.
    fn parse_rule(&mut self, fields: &RuleFields, lnum: usize, line: &str) {
        let level = fields.levels.len() as i32;
        let offset = parse_offset(&fields.offset);
        let test = parse_test_code(
            &fields.test,
            &fields.target,
            level,
            lnum,
            line,
            offset,
            self.target_endian,
            self.handler,
        );

        let parent = self.stack.parent_for(level);
        let id = self.tree.add(parent, test);
        self.stack.note(id, level);
        self.last = Some(id);
    }
}
