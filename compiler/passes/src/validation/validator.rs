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

use crate::{CompilerState, Pass};

use mimec_ast::OffsetIssue;
use mimec_errors::{ParserWarning, Result};

pub struct ValidationOutput {
    /// Offsets the code generator will refuse to lower.
    pub flagged: usize,
}

/// Pass that re-checks the offset forms of the pruned tree.
///
/// Issues are recorded during parsing but reported here, so that rules
/// already removed by the pruner stay silent.
pub struct Validation;

impl Pass for Validation {
    type Input = ();
    type Output = ValidationOutput;

    const NAME: &str = "Validation";

    fn do_pass(_input: Self::Input, state: &mut CompilerState) -> Result<Self::Output> {
        let mut flagged = 0;

        let mut stack = vec![state.tree.root];
        while let Some(id) = stack.pop() {
            let test = state.tree.get(id);
            stack.extend(&test.subtests);

            let Some(offset) = &test.offset else {
                continue;
            };
            let Some(issue) = &offset.issue else {
                continue;
            };

            flagged += 1;
            let warning = match issue {
                OffsetIssue::Unparseable => ParserWarning::unparseable_offset(&offset.raw, test.lnum, &test.line),
                OffsetIssue::UnimplementedTypeFlag(flag) => {
                    ParserWarning::unimplemented_offset_type_flag(*flag, test.lnum, &test.line)
                }
                OffsetIssue::NestedOperand(operand) => {
                    ParserWarning::parenthesized_offset_operand(operand, test.lnum, &test.line)
                }
            };
            state.handler.emit_warning(warning);
        }

        Ok(ValidationOutput { flagged })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pruning;

    use mimec_ast::Endianness;
    use mimec_errors::emitter::{BufferEmitter, Handler};

    fn validate(source: &str) -> (ValidationOutput, BufferEmitter) {
        let (handler, buf) = Handler::new_with_buf();
        let tree = mimec_parser::parse_rules(&handler, source, Endianness::Little).unwrap();
        let mut state = CompilerState { tree, handler, ..Default::default() };
        Pruning::do_pass((), &mut state).unwrap();
        let output = Validation::do_pass((), &mut state).unwrap();
        (output, buf)
    }

    #[test]
    fn test_surviving_bad_offset_warns() {
        let source = "\
0 string MZ DOS
>(0x3c.m) string PE middle-endian fetch
!:mime application/x-msdownload
";
        let (output, buf) = validate(source);
        assert_eq!(output.flagged, 1);
        assert!(buf.extract_warnings().contains("offset type flag `m` is not implemented"));
    }

    #[test]
    fn test_pruned_bad_offset_stays_silent() {
        let source = "\
0 string MZ DOS
>(0x3c.m) string PE no mime below, gets pruned
0 string %PDF PDF
!:mime application/pdf
";
        let (output, buf) = validate(source);
        assert_eq!(output.flagged, 0);
        assert!(buf.extract_warnings().is_empty());
    }
}
