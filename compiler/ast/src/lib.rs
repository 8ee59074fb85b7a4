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

//! The rule tree for a magic database.
//!
//! This module contains the [`RuleTree`] type: an arena of [`Test`] nodes
//! assembled by the parser and consumed by the pruning, validation, and
//! code-generation passes of the mimec compiler.

#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod offset;
pub use self::offset::*;

pub use self::test::*;

pub mod test_kind;
pub use self::test_kind::*;

pub mod tree;
pub use self::tree::*;
