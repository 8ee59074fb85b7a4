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

use crate::{Test, TestId};

use mimec_errors::{CompilerError, Result};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The rule tree: an arena of [`Test`] nodes.
///
/// Nodes own their children through `subtests`; the `parent` field is a
/// back-reference only, so the ownership graph stays acyclic. The root is
/// synthesized at level `-1` and never corresponds to a rule line.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuleTree {
    tests: Vec<Test>,
    /// The arena index of the synthesized root.
    pub root: TestId,
}

impl Default for RuleTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTree {
    /// Returns a tree containing only the synthesized root.
    pub fn new() -> Self {
        let mut root = Test::root();
        root.id = 0;
        Self { tests: vec![root], root: 0 }
    }

    /// Adds `test` under `parent`, in source order. Returns the new node's id.
    pub fn add(&mut self, parent: TestId, mut test: Test) -> TestId {
        let id = self.tests.len();
        test.id = id;
        test.parent = Some(parent);
        self.tests.push(test);
        self.tests[parent].subtests.push(id);
        id
    }

    /// Shared access to the node `id`.
    pub fn get(&self, id: TestId) -> &Test {
        &self.tests[id]
    }

    /// Mutable access to the node `id`.
    pub fn get_mut(&mut self, id: TestId) -> &mut Test {
        &mut self.tests[id]
    }

    /// Shared access to the root node.
    pub fn root(&self) -> &Test {
        &self.tests[self.root]
    }

    /// The number of rule nodes, excluding the synthesized root.
    pub fn len(&self) -> usize {
        self.tests.len() - 1
    }

    /// Does the tree hold no rules at all?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All arena nodes, including ones detached by pruning.
    pub fn iter(&self) -> impl Iterator<Item = &Test> {
        self.tests.iter()
    }

    /// The maximum nesting level reachable from the root, or `None` for an
    /// empty tree. Codegen declares one offset variable per level `0..=max`.
    pub fn max_level(&self) -> Option<i32> {
        let mut max = None;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let test = &self.tests[id];
            if !test.is_root() {
                max = Some(max.map_or(test.level, |m: i32| m.max(test.level)));
            }
            stack.extend(&test.subtests);
        }
        max
    }

    /// Serializes the tree as a JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CompilerError::file_write_error("<json>", e).into())
    }

    /// Writes the tree as JSON to `directory/file_name`.
    pub fn to_json_file(&self, directory: &Path, file_name: &str) -> Result<()> {
        let path = directory.join(file_name);
        fs::write(&path, self.to_json_string()?).map_err(|e| CompilerError::file_write_error(&path, e))?;
        Ok(())
    }
}
