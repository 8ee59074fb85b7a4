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

use thiserror::Error;

pub mod compiler;
pub use compiler::*;

pub mod parser;
pub use parser::*;

pub mod codegen;
pub use codegen::*;

/// The top-level error type of the mimec compiler.
#[derive(Clone, Debug, Error)]
pub enum MimecError {
    #[error(transparent)]
    CompilerError(#[from] CompilerError),

    #[error(transparent)]
    ParserError(#[from] ParserError),
}

/// The top-level warning type of the mimec compiler.
///
/// Warnings never abort compilation; the offending rule is dropped or
/// partially emitted.
#[derive(Clone, Debug, Error)]
pub enum MimecWarning {
    #[error(transparent)]
    ParserWarning(#[from] ParserWarning),

    #[error(transparent)]
    CodeGenWarning(#[from] CodeGenWarning),
}
