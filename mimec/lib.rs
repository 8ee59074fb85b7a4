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

//! The mimec compiler: from a libmagic rule database to a self-contained
//! C decision tree that classifies byte buffers into MIME types.

#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use mimec_ast as ast;
pub use mimec_compiler as compiler;
pub use mimec_errors as errors;
pub use mimec_parser as parser;
pub use mimec_passes as passes;
