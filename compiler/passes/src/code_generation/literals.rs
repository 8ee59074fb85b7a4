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

//! Byte-exact emission of rule targets as C string literals.
//!
//! Targets come out of the rule database with C-like escapes, including
//! malformed ones: `\xabcd` means the byte `0xab` followed by the literal
//! characters `cd`. Decoding to bytes and re-encoding must preserve that,
//! so the encoder closes a quoted fragment after every `\xNN` escape;
//! otherwise a following printable hex digit would be absorbed into the
//! escape by the C scanner.

/// Decodes a rule target into its byte sequence.
///
/// `\x` consumes at most two hex digits (a bare `\x` yields `x`); octal
/// escapes consume up to three digits; unknown escapes copy the escaped
/// character literally.
pub fn split_string_bytes(target: &str) -> Vec<u8> {
    let bytes = target.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 == bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        i += 1;
        match bytes[i] {
            b'x' => {
                let hex_len = bytes[i + 1..].iter().take(2).take_while(|b| b.is_ascii_hexdigit()).count();
                if hex_len == 0 {
                    out.push(b'x');
                } else {
                    let hex = std::str::from_utf8(&bytes[i + 1..i + 1 + hex_len]).expect("hex digits are ascii");
                    out.push(u8::from_str_radix(hex, 16).expect("at most two hex digits"));
                }
                i += 1 + hex_len;
            }
            b'0'..=b'7' => {
                let oct_len = bytes[i..].iter().take(3).take_while(|b| (b'0'..=b'7').contains(b)).count();
                let oct = std::str::from_utf8(&bytes[i..i + oct_len]).expect("octal digits are ascii");
                // Three octal digits can exceed a byte; truncate like C does.
                out.push(u16::from_str_radix(oct, 8).expect("at most three octal digits") as u8);
                i += oct_len;
            }
            b'n' => {
                out.push(b'\n');
                i += 1;
            }
            b'r' => {
                out.push(b'\r');
                i += 1;
            }
            b't' => {
                out.push(b'\t');
                i += 1;
            }
            b'a' => {
                out.push(0x07);
                i += 1;
            }
            b'b' => {
                out.push(0x08);
                i += 1;
            }
            b'f' => {
                out.push(0x0c);
                i += 1;
            }
            b'v' => {
                out.push(0x0b);
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    out
}

/// Re-encodes a byte sequence as space-separated C string fragments.
///
/// Printable bytes accumulate into the current fragment; a byte that
/// needs a `\xNN` escape ends its fragment so the following characters
/// start a fresh one.
pub fn bytes_to_c(bytes: &[u8]) -> String {
    let mut fragments: Vec<String> = Vec::new();
    let mut current = String::from("\"");

    for byte in bytes {
        match byte {
            b'"' => current.push_str("\\\""),
            b'\\' => current.push_str("\\\\"),
            0x20..=0x7e => current.push(*byte as char),
            _ => {
                current.push_str(&format!("\\x{byte:02x}\""));
                fragments.push(std::mem::replace(&mut current, String::from("\"")));
            }
        }
    }

    if current.len() > 1 || fragments.is_empty() {
        current.push('"');
        fragments.push(current);
    }
    fragments.join(" ")
}
