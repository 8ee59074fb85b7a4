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

use std::path::Path;

use thiserror::Error;

/// Fatal errors of the compiler driver.
///
/// I/O failures are captured as rendered strings so that errors stay
/// cloneable across the `Handler`.
#[derive(Clone, Debug, Error)]
pub enum CompilerError {
    #[error("failed to read `{path}`: {error}")]
    FileReadError { path: String, error: String },

    #[error("failed to write `{path}`: {error}")]
    FileWriteError { path: String, error: String },

    #[error("the rule database `{path}` contains no rules")]
    EmptyRuleDatabase { path: String },
}

impl CompilerError {
    pub fn file_read_error(path: impl AsRef<Path>, error: impl std::fmt::Display) -> Self {
        Self::FileReadError { path: path.as_ref().display().to_string(), error: error.to_string() }
    }

    pub fn file_write_error(path: impl AsRef<Path>, error: impl std::fmt::Display) -> Self {
        Self::FileWriteError { path: path.as_ref().display().to_string(), error: error.to_string() }
    }

    pub fn empty_rule_database(path: impl AsRef<Path>) -> Self {
        Self::EmptyRuleDatabase { path: path.as_ref().display().to_string() }
    }
}
