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

use mimec_ast::{Endianness, Offset, Test, TestKind};
use mimec_errors::{ParserWarning, emitter::Handler};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A test code with an embedded numeric mask, e.g. `beshort&0xfff0`.
    static ref MASK_RE: Regex = Regex::new(r"^(\w+)&([0-9a-fxA-FX]+)$").unwrap();
    /// The flag suffix of a regex test, e.g. `512l` or `c`.
    static ref REGEX_FLAGS_RE: Regex = Regex::new(r"^(\d+)?([csl]*)$").unwrap();
}

/// A search whose range limit is at most this many bytes dispatches early;
/// longer sweeps run after everything but nothing.
const SHORT_SEARCH_LIMIT: u64 = 1024;

/// Parses the test-code and target fields into a [`Test`] node.
///
/// The offset has already been parsed; byte-order normalization resolves
/// bare `short`/`long`/`quad` codes against `target_endian`.
pub fn parse_test_code(
    test_field: &str,
    target_field: &str,
    level: i32,
    lnum: usize,
    line: &str,
    offset: Offset,
    target_endian: Endianness,
    handler: &Handler,
) -> Test {
    // The `u` prefix asks for an unsigned comparison.
    let unsigned = test_field.starts_with('u');
    let mut code = if unsigned { test_field[1..].to_string() } else { test_field.to_string() };

    // An embedded `&mask` applies to the fetched value before comparing.
    let mut mask = None;
    if let Some((base, m)) = MASK_RE.captures(&code).map(|caps| (caps[1].to_string(), caps[2].to_string())) {
        code = base;
        mask = Some(m);
    }

    // Flags and the search/regex range limit ride behind `/` separators.
    let mut flags: Vec<char> = Vec::new();
    let mut limit = None;
    if let Some((base, flag_str)) = code.split_once('/').map(|(b, f)| (b.to_string(), f.to_string())) {
        if base == "regex" {
            if let Some(caps) = REGEX_FLAGS_RE.captures(&flag_str) {
                limit = caps.get(1).map(|m| m.as_str().to_string());
                flags = caps[2].chars().collect();
            }
        } else {
            for token in flag_str.split('/') {
                if token.starts_with(|c: char| c.is_ascii_digit()) {
                    limit = Some(token.to_string());
                } else {
                    flags.extend(token.chars());
                }
            }
        }
        code = base;
    }
    // `b` (force binary) and `t` (force text) do not change what we emit.
    flags.retain(|c| *c != 'b' && *c != 't');
    flags.sort_unstable();
    flags.dedup();

    let mut kind = TestKind::from_code(&code);

    let mut test = Test::new(level, lnum, line.to_string(), kind.clone());
    test.unsigned = unsigned;
    test.mask = mask;
    test.limit = limit;
    test.flags = flags;

    // Strip the comparison operators off the front of the target.
    let (oper, target) = match &kind {
        _ if target_field == "x" => ("x".to_string(), target_field.to_string()),
        TestKind::String | TestKind::Search => split_oper(target_field, &['=', '<', '>']),
        TestKind::Integer { .. } => split_oper(target_field, &['=', '<', '>', '&', '^', '~']),
        TestKind::Float { .. } => {
            test.unimplemented = true;
            handler.emit_warning(ParserWarning::unimplemented_test_code(&code, lnum, line));
            split_oper(target_field, &['=', '<', '>'])
        }
        TestKind::Default | TestKind::Clear | TestKind::Regex => {
            // No operator extraction for these; the flag is advisory for
            // `regex` and `default`, which both lower fully.
            test.unimplemented = true;
            if matches!(kind, TestKind::Clear) {
                handler.emit_warning(ParserWarning::unimplemented_test_code(&code, lnum, line));
            }
            (String::new(), target_field.to_string())
        }
        TestKind::Unimplemented(_) => {
            test.unimplemented = true;
            handler.emit_warning(ParserWarning::unimplemented_test_code(&code, lnum, line));
            (String::new(), target_field.to_string())
        }
        _ => {
            test.invalid = true;
            handler.emit_warning(ParserWarning::invalid_test_code(&code, lnum, line));
            (String::new(), target_field.to_string())
        }
    };
    test.target_oper = if oper.is_empty() { "=".to_string() } else { oper };
    test.target = target;

    kind.normalize(target_endian);
    test.kind = kind;

    test.test_id = compose_test_id(&test, &offset);
    test.priority = priority(&test);
    test.offset = Some(offset);

    test
}

/// Consumes one operator character from `allowed`, then an optional `!`.
fn split_oper(target: &str, allowed: &[char]) -> (String, String) {
    let mut chars = target.chars();
    let mut oper = String::new();
    match chars.next() {
        Some(c) if allowed.contains(&c) => {
            oper.push(c);
            if let Some('!') = chars.clone().next() {
                chars.next();
                oper.push('!');
            }
        }
        _ => return (String::new(), target.to_string()),
    }
    (oper, chars.as_str().to_string())
}

/// Composes the canonical descriptor used as a sibling-partition key.
fn compose_test_id(test: &Test, offset: &Offset) -> String {
    let mut id = String::new();
    if test.unsigned {
        id.push('u');
    }
    id.push_str(&test.kind.code());
    for flag in &test.flags {
        id.push('/');
        id.push(*flag);
    }
    if let Some(mask) = &test.mask {
        id.push('&');
        id.push_str(mask);
    }
    id.push(' ');
    id.push_str(&test.target_oper);
    id.push(' ');
    id.push_str(&offset.raw);
    id
}

/// Assigns the dispatch priority among siblings; lower runs first.
fn priority(test: &Test) -> u32 {
    match &test.kind {
        TestKind::Integer { .. } => 0,
        TestKind::String if test.target_oper == "=" => 5,
        TestKind::Search => match test.limit.as_deref().and_then(|l| l.parse::<u64>().ok()) {
            Some(limit) if limit <= SHORT_SEARCH_LIMIT => 20,
            _ => 90,
        },
        TestKind::Regex => 80,
        _ => 10,
    }
}
