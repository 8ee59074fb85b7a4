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

//! The parser to convert magic rule text into a [`RuleTree`].
//!
//! This module contains the [`parse_rules()`] method which drives the
//! line-oriented parse, and [`parse_exceptions()`] for the MIME exception
//! list.

#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod context;
pub use context::*;

pub mod exceptions;
pub use exceptions::*;

pub mod fields;
pub use fields::*;

pub mod offset;
pub use offset::*;

pub mod test_code;
pub use test_code::*;

use mimec_ast::{Endianness, RuleTree};
use mimec_errors::{Result, emitter::Handler};

/// Creates a new rule tree from the given rule database text.
///
/// Multi-byte test codes without an explicit byte order are resolved
/// against `target_endian`. Malformed rules emit warnings through the
/// `handler` and are dropped; only a line that cannot be split at all
/// raises an error.
pub fn parse_rules(handler: &Handler, source: &str, target_endian: Endianness) -> Result<RuleTree> {
    let mut context = ParserContext::new(handler, target_endian);

    for (index, line) in source.lines().enumerate() {
        context.parse_line(index + 1, line);
    }

    handler.last_err()?;
    Ok(context.finish())
}
