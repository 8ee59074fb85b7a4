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

use serde::{Deserialize, Serialize};
use std::fmt;

/// The width of an integer test.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum IntWidth {
    Byte,
    Short,
    Long,
    Quad,
}

impl IntWidth {
    /// The capitalized stem used in runtime helper names, e.g. the `Short`
    /// of `beShortMatch`.
    pub fn stem(self) -> &'static str {
        match self {
            IntWidth::Byte => "Byte",
            IntWidth::Short => "Short",
            IntWidth::Long => "Long",
            IntWidth::Quad => "Quad",
        }
    }

    /// The lowercase code text, e.g. the `short` of `beshort`.
    pub fn code(self) -> &'static str {
        match self {
            IntWidth::Byte => "byte",
            IntWidth::Short => "short",
            IntWidth::Long => "long",
            IntWidth::Quad => "quad",
        }
    }

    /// The all-ones mask emitted when a test carries no explicit mask.
    pub fn default_mask(self) -> &'static str {
        match self {
            IntWidth::Byte => "0xff",
            IntWidth::Short => "0xffff",
            IntWidth::Long => "0xffffffff",
            IntWidth::Quad => "0xffffffffffffffffULL",
        }
    }
}

/// The width of a float test. Parsed but never lowered.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum FloatWidth {
    Float,
    Double,
}

impl FloatWidth {
    pub fn code(self) -> &'static str {
        match self {
            FloatWidth::Float => "float",
            FloatWidth::Double => "double",
        }
    }
}

/// Byte order of a multi-byte test.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// The byte order of the machine the compiler runs on.
    pub fn host() -> Self {
        if cfg!(target_endian = "big") { Endianness::Big } else { Endianness::Little }
    }

    /// The lowercase code prefix, `le` or `be`.
    pub fn prefix(self) -> &'static str {
        match self {
            Endianness::Little => "le",
            Endianness::Big => "be",
        }
    }
}

/// The kind of comparison a rule makes against the buffer.
///
/// Bare `short`/`long`/`quad` codes carry `endian: None` until byte-order
/// normalization resolves them against the target endianness; `byte` tests
/// keep `None` forever.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TestKind {
    Integer { width: IntWidth, endian: Option<Endianness> },
    /// Recognized, never lowered.
    Float { width: FloatWidth, endian: Option<Endianness> },
    String,
    Search,
    Regex,
    /// Matches unconditionally.
    Default,
    /// Recognized, never lowered.
    Clear,
    /// A named block definition. Recognized but ignored.
    Name,
    /// A named block invocation. Recognized but ignored.
    Use,
    /// A code this compiler knows of but cannot lower (dates, pascal
    /// strings, …).
    Unimplemented(String),
    /// A code this compiler does not recognize at all.
    Unknown(String),
}

impl TestKind {
    /// Classifies a test code, after the `u` prefix and any `&mask` or
    /// `/flags` suffixes have been stripped.
    pub fn from_code(code: &str) -> Self {
        let (endian, stem) = match code {
            _ if code.starts_with("le") => (Some(Endianness::Little), &code[2..]),
            _ if code.starts_with("be") => (Some(Endianness::Big), &code[2..]),
            _ => (None, code),
        };
        match stem {
            "byte" if endian.is_none() => TestKind::Integer { width: IntWidth::Byte, endian: None },
            "short" => TestKind::Integer { width: IntWidth::Short, endian },
            "long" => TestKind::Integer { width: IntWidth::Long, endian },
            "quad" => TestKind::Integer { width: IntWidth::Quad, endian },
            "float" => TestKind::Float { width: FloatWidth::Float, endian },
            "double" => TestKind::Float { width: FloatWidth::Double, endian },
            _ => match code {
                "string" => TestKind::String,
                "search" => TestKind::Search,
                "regex" => TestKind::Regex,
                "default" => TestKind::Default,
                "clear" => TestKind::Clear,
                "name" => TestKind::Name,
                "use" => TestKind::Use,
                // Codes in the magic superset that this compiler accepts
                // but does not lower.
                "date" | "ldate" | "qdate" | "qldate" | "qwdate" | "medate" | "meldate" | "melong" | "pstring"
                | "lestring16" | "bestring16" | "indirect" | "der" | "guid" | "offset" => {
                    TestKind::Unimplemented(code.to_string())
                }
                _ => TestKind::Unknown(code.to_string()),
            },
        }
    }

    /// The canonical code text, e.g. `beshort` for a normalized big-endian
    /// short.
    pub fn code(&self) -> String {
        fn ordered(stem: &str, endian: &Option<Endianness>) -> String {
            match endian {
                Some(e) => format!("{}{stem}", e.prefix()),
                None => stem.to_string(),
            }
        }
        match self {
            TestKind::Integer { width, endian } => ordered(width.code(), endian),
            TestKind::Float { width, endian } => ordered(width.code(), endian),
            TestKind::String => "string".to_string(),
            TestKind::Search => "search".to_string(),
            TestKind::Regex => "regex".to_string(),
            TestKind::Default => "default".to_string(),
            TestKind::Clear => "clear".to_string(),
            TestKind::Name => "name".to_string(),
            TestKind::Use => "use".to_string(),
            TestKind::Unimplemented(code) | TestKind::Unknown(code) => code.clone(),
        }
    }

    /// Rewrites a bare `short`/`long`/`quad` (or float) to the given byte
    /// order. `byte` tests are order-free and stay untouched.
    pub fn normalize(&mut self, target: Endianness) {
        match self {
            TestKind::Integer { width, endian } if *width != IntWidth::Byte && endian.is_none() => {
                *endian = Some(target);
            }
            TestKind::Float { endian, .. } if endian.is_none() => *endian = Some(target),
            _ => {}
        }
    }

    /// The runtime helper invoked for an integer test, e.g. `beShortMatch`
    /// or `ubyteMatch`.
    pub fn match_function(&self, unsigned: bool) -> Option<String> {
        let TestKind::Integer { width, endian } = self else {
            return None;
        };
        let base = match (width, endian) {
            (IntWidth::Byte, _) => "byteMatch".to_string(),
            (width, Some(e)) => format!("{}{}Match", e.prefix(), width.stem()),
            // Unnormalized multi-byte tests have no runtime function.
            (_, None) => return None,
        };
        Some(if unsigned { format!("u{base}") } else { base })
    }

    /// Does this kind have a lowering at all?
    pub fn is_lowered(&self) -> bool {
        matches!(
            self,
            TestKind::Integer { .. } | TestKind::String | TestKind::Search | TestKind::Regex | TestKind::Default
        )
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_classification() {
        assert_eq!(TestKind::from_code("byte"), TestKind::Integer { width: IntWidth::Byte, endian: None });
        assert_eq!(TestKind::from_code("short"), TestKind::Integer { width: IntWidth::Short, endian: None });
        assert_eq!(
            TestKind::from_code("beshort"),
            TestKind::Integer { width: IntWidth::Short, endian: Some(Endianness::Big) }
        );
        assert_eq!(
            TestKind::from_code("lequad"),
            TestKind::Integer { width: IntWidth::Quad, endian: Some(Endianness::Little) }
        );
        assert_eq!(TestKind::from_code("string"), TestKind::String);
        assert_eq!(TestKind::from_code("ldate"), TestKind::Unimplemented("ldate".to_string()));
        assert_eq!(TestKind::from_code("frobnicate"), TestKind::Unknown("frobnicate".to_string()));
    }

    #[test]
    fn test_normalize_and_code() {
        let mut kind = TestKind::from_code("short");
        kind.normalize(Endianness::Big);
        assert_eq!(kind.code(), "beshort");

        // Already-ordered codes are left alone.
        let mut kind = TestKind::from_code("lelong");
        kind.normalize(Endianness::Big);
        assert_eq!(kind.code(), "lelong");

        // Bytes have no order to resolve.
        let mut kind = TestKind::from_code("byte");
        kind.normalize(Endianness::Big);
        assert_eq!(kind.code(), "byte");
    }

    #[test]
    fn test_match_function() {
        let mut kind = TestKind::from_code("quad");
        kind.normalize(Endianness::Little);
        assert_eq!(kind.match_function(false).as_deref(), Some("leQuadMatch"));
        assert_eq!(kind.match_function(true).as_deref(), Some("uleQuadMatch"));
        assert_eq!(TestKind::from_code("byte").match_function(false).as_deref(), Some("byteMatch"));
        assert_eq!(TestKind::String.match_function(false), None);
    }
}
