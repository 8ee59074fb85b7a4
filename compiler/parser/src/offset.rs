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

use mimec_ast::{Offset, OffsetIssue};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// The indirect offset expression: `[&]base[.typeFlag][op operand]`.
    ///
    /// The base is greedy, so the arithmetic tail is only recognized after
    /// an explicit type flag; `(0x3c+4)` keeps `0x3c+4` as its base, which
    /// lowers to the same C expression. `m` is admitted so middle-endian
    /// fetches parse and can be reported as unimplemented rather than
    /// unparseable.
    static ref OFFSET_RE: Regex = Regex::new(r"^(&)?([^.]+)(\.([bislBISLm]))?([+*/%&|^-].+)?$").unwrap();
}

/// Type flags the code generator cannot lower.
const UNIMPLEMENTED_TYPE_FLAGS: [char; 3] = ['i', 'I', 'm'];

/// Parses the offset field of a rule line.
///
/// Parsing never fails outright: an offense against the mini-language is
/// recorded on the offset and reported by the validation pass, so that
/// only rules surviving the prune warn.
pub fn parse_offset(field: &str) -> Offset {
    let mut offset = Offset { raw: field.to_string(), type_flag: 'l', ..Default::default() };

    let mut rest = field;
    if let Some(stripped) = rest.strip_prefix('&') {
        offset.outer_relative = true;
        rest = stripped;
    }

    if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        offset.indirect = true;
        match OFFSET_RE.captures(inner) {
            Some(caps) => {
                offset.inner_relative = caps.get(1).is_some();
                offset.base = caps[2].to_string();
                if let Some(flag) = caps.get(4) {
                    offset.type_flag = flag.as_str().chars().next().unwrap();
                }
                if let Some(tail) = caps.get(5) {
                    let tail = tail.as_str();
                    offset.op = tail.chars().next();
                    offset.operand = Some(tail[1..].to_string());
                }
            }
            None => {
                offset.issue = Some(OffsetIssue::Unparseable);
                return offset;
            }
        }

        if UNIMPLEMENTED_TYPE_FLAGS.contains(&offset.type_flag) {
            offset.issue = Some(OffsetIssue::UnimplementedTypeFlag(offset.type_flag));
        } else if let Some(operand) = &offset.operand {
            if operand.contains('(') {
                offset.issue = Some(OffsetIssue::NestedOperand(operand.clone()));
            }
        }
    } else {
        offset.simple = !offset.outer_relative;
        offset.base = rest.to_string();
        if parse_c_int(rest).is_none() {
            offset.issue = Some(OffsetIssue::Unparseable);
        }
    }

    offset
}

/// Parses a direct offset literal: hex, octal, or decimal.
fn parse_c_int(text: &str) -> Option<u64> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else if text.len() > 1 && text.starts_with('0') {
        u64::from_str_radix(&text[1..], 8).ok()
    } else {
        text.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_offsets() {
        let zero = parse_offset("0");
        assert!(zero.simple && zero.no_offset() && !zero.indirect);
        assert_eq!(zero.issue, None);

        let hex = parse_offset("0x3c");
        assert!(hex.simple && !hex.no_offset());
        assert_eq!(hex.base, "0x3c");
    }

    #[test]
    fn test_outer_relative_offset() {
        let offset = parse_offset("&4");
        assert!(offset.outer_relative && !offset.simple && !offset.indirect);
        assert_eq!(offset.base, "4");
        assert_eq!(offset.issue, None);
    }

    #[test]
    fn test_indirect_offset() {
        let offset = parse_offset("(0x3c.l)");
        assert!(offset.indirect && !offset.simple);
        assert_eq!(offset.base, "0x3c");
        assert_eq!(offset.type_flag, 'l');
        assert_eq!(offset.op, None);
        assert_eq!(offset.issue, None);
    }

    #[test]
    fn test_indirect_offset_with_arithmetic() {
        let offset = parse_offset("(&0x10.s+4)");
        assert!(offset.indirect && offset.inner_relative);
        assert_eq!(offset.base, "0x10");
        assert_eq!(offset.type_flag, 's');
        assert_eq!(offset.op, Some('+'));
        assert_eq!(offset.operand.as_deref(), Some("4"));
    }

    #[test]
    fn test_greedy_base_absorbs_untyped_arithmetic() {
        // Without a type flag the arithmetic tail stays in the base.
        let offset = parse_offset("(0x3c+4)");
        assert_eq!(offset.base, "0x3c+4");
        assert_eq!(offset.op, None);
        assert_eq!(offset.issue, None);
    }

    #[test]
    fn test_unimplemented_type_flag_is_recorded() {
        let offset = parse_offset("(0.I)");
        assert!(offset.unimplemented());
        assert_eq!(offset.issue, Some(OffsetIssue::UnimplementedTypeFlag('I')));
    }

    #[test]
    fn test_nested_operand_is_recorded() {
        let offset = parse_offset("(0x10.l+(4))");
        assert_eq!(offset.issue, Some(OffsetIssue::NestedOperand("(4)".to_string())));
    }

    #[test]
    fn test_unparseable_offset_is_recorded() {
        let offset = parse_offset("(.l)");
        assert_eq!(offset.issue, Some(OffsetIssue::Unparseable));

        let offset = parse_offset("twelve");
        assert_eq!(offset.issue, Some(OffsetIssue::Unparseable));
    }
}
