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

use mimec_ast::RuleTree;
use mimec_errors::{Result, emitter::Handler};

use indexmap::IndexSet;

/// State threaded through every compiler pass.
#[derive(Default)]
pub struct CompilerState {
    /// The rule tree under compilation.
    pub tree: RuleTree,
    /// The handler is used for error and warning emissions.
    pub handler: Handler,
    /// MIME types whose rules must not be compiled.
    pub exceptions: IndexSet<String>,
    /// Chatty diagnostics, e.g. which tests fell out of a fast shape.
    pub debug: bool,
}

/// A compiler pass.
///
/// Every pass has access to `CompilerState`, and may also specify
/// an `Input` and `Output`.
pub trait Pass {
    type Input;
    type Output;

    const NAME: &str;

    /// Runs the compiler pass.
    fn do_pass(input: Self::Input, state: &mut CompilerState) -> Result<Self::Output>;
}
