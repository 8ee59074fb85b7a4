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

use mimec_ast::Endianness;

use std::path::PathBuf;

/// Configuration of a compiler run.
#[derive(Clone)]
pub struct CompilerOptions {
    /// Chatty diagnostics, e.g. which tests fell out of a fast shape.
    pub debug: bool,
    /// Byte order of the machine the generated program will run on.
    /// Bare `short`/`long`/`quad` test codes resolve against this.
    pub target_endian: Endianness,
    /// If enabled writes the rule tree after parsing.
    pub initial_tree: bool,
    /// If enabled writes the rule tree after pruning.
    pub pruned_tree: bool,
    /// Replaces the embedded runtime prologue.
    pub prologue: Option<PathBuf>,
    /// Replaces the embedded epilogue.
    pub epilogue: Option<PathBuf>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            debug: false,
            target_endian: Endianness::host(),
            initial_tree: false,
            pruned_tree: false,
            prologue: None,
            epilogue: None,
        }
    }
}
