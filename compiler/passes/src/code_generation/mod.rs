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

pub mod generator;
pub use generator::*;

pub mod literals;
pub use literals::*;

mod groups;


mod visit_tree;

use crate::{CompilerState, Pass};

use mimec_errors::Result;

/// Pass that lowers the pruned rule tree into the C decision tree.
///
/// The output contains the static tables and the `runTests` function;
/// wrapping it with the runtime prologue and epilogue is the driver's
/// concern.
pub struct CodeGenerating;

impl Pass for CodeGenerating {
    type Input = ();
    type Output = String;

    const NAME: &str = "CodeGenerating";

    fn do_pass(_input: Self::Input, state: &mut CompilerState) -> Result<Self::Output> {
        let mut visitor = CodeGeneratingVisitor::new(state);
        let program = visitor.visit_tree();
        state.handler.last_err()?;

        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pruning, Validation};

    use mimec_ast::Endianness;
    use mimec_errors::emitter::{BufferEmitter, Handler};

    fn compile_with(source: &str, exceptions: &[&str]) -> (String, BufferEmitter) {
        let (handler, buf) = Handler::new_with_buf();
        let tree = mimec_parser::parse_rules(&handler, source, Endianness::Little).unwrap();
        let mut state = CompilerState {
            tree,
            handler,
            exceptions: exceptions.iter().map(|e| e.to_string()).collect(),
            debug: false,
        };
        Pruning::do_pass((), &mut state).unwrap();
        Validation::do_pass((), &mut state).unwrap();
        (CodeGenerating::do_pass((), &mut state).unwrap(), buf)
    }

    fn compile(source: &str) -> String {
        compile_with(source, &[]).0
    }

    const MAPS: &str = "\
0 beshort 0xcafe Java class
!:mime application/java-vm
0 string %PDF PDF document
!:mime application/pdf
4 string ABCD generic container
!:mime application/x-container
";

    #[test]
    fn test_fast_shape_tables() {
        let program = compile(MAPS);

        assert!(program.contains("static const ShortMapEntry shortMap0[] = {"));
        assert!(program.contains("    { 0xcafe, 0xffff, \"application/java-vm\" },"));
        assert!(program.contains("static const StringMapEntry stringMap1[] = {"));
        assert!(program.contains("    { \"%PDF\", 4, \"application/pdf\" },"));
        assert!(program.contains("rslt = beShortGroup(buf, len, shortMap0, 1, mime);"));
        assert!(program.contains("rslt = stringEqualMap(buf, len, stringMap1, 1, mime);"));
    }

    #[test]
    fn test_groups_precede_general_tests() {
        let program = compile(MAPS);

        let short_group = program.find("beShortGroup").unwrap();
        let string_map = program.find("stringEqualMap").unwrap();
        // The offset-4 string falls out of the map and lowers individually.
        let general = program.find("rslt = stringEqual(buf, len, \"ABCD\", 4, &off0);").unwrap();
        assert!(short_group < string_map);
        assert!(string_map < general);
    }

    #[test]
    fn test_indirect_offset_preamble() {
        let source = "\
0 string MZ DOS
>(0x3c.l) string PE\\0\\0 PE
!:mime application/x-msdownload
";
        let program = compile(source);

        assert!(program.contains("off1 = 0x3c;"));
        assert!(program.contains("rslt = getOffset(buf, len, off1, 'l', &off1);"));
        assert!(program.contains("rslt = stringEqual(buf, len, \"PE\\x00\" \"\\x00\", 4, &off1);"));
        // The dependent test only runs when the fetch succeeded.
        let fetch = program.find("getOffset").unwrap();
        let guard = program.find("} else {").unwrap();
        assert!(fetch < guard);
    }

    #[test]
    fn test_exceptions_remove_the_branch() {
        let (program, _) = compile_with(MAPS, &["application/pdf"]);

        assert!(!program.contains("application/pdf"));
        assert!(program.contains("application/java-vm"));
        // The string map degenerated to nothing; no empty table remains.
        assert!(!program.contains("StringMapEntry stringMap"));
    }

    #[test]
    fn test_priority_orders_siblings() {
        let source = "\
0 regex/20 ^#!.*python python script
!:mime text/x-python
0 beshort 0xcafe Java class
!:mime application/java-vm
";
        let program = compile(source);

        let short = program.find("beShortGroup").unwrap();
        let regex = program.find("regexMatch").unwrap();
        assert!(short < regex, "integer tests run before regex sweeps");
    }

    #[test]
    fn test_mime_shadows_subtests() {
        let source = "\
1 string MZ DOS
!:mime application/x-dosexec
>0x18 leshort >0x3f PE era
!:mime application/vnd.microsoft.portable-executable
";
        let program = compile(source);

        assert!(program.contains("*mime = \"application/x-dosexec\";"));
        assert!(!program.contains("leShortMatch"));
        assert!(!program.contains("vnd.microsoft"));
    }

    #[test]
    fn test_outer_relative_offset_reads_parent_variable() {
        let source = "\
0 string MZ DOS
>&0x12 byte 0x40 relocated stub
!:mime application/x-dosexec
";
        let program = compile(source);

        assert!(program.contains("off1 = 0x12;"));
        assert!(program.contains("off1 += off0;"));
        assert!(program.contains("rslt = byteMatch(buf, len, 0x40, CompareEq, 0xff, &off1);"));
    }

    #[test]
    fn test_integer_compare_codes_and_masks() {
        let source = "\
0 ulelong&0xffff0000 >!0x10000 versioned header
!:mime application/x-versioned
";
        let program = compile(source);

        assert!(
            program
                .contains("rslt = uleLongMatch(buf, len, 0x10000, CompareGt|CompareNot, 0xffff0000, &off0);")
        );
    }

    #[test]
    fn test_search_without_limit_is_skipped_with_warning() {
        let source = "\
0 search __main__ python bytecode
!:mime text/x-python
";
        let (program, buf) = compile_with(source, &[]);

        assert!(!program.contains("stringSearch"));
        assert!(buf.extract_warnings().contains("no range limit"));
    }

    #[test]
    fn test_search_and_regex_calls() {
        // A leading `<` would read as an operator, so the search target
        // escapes it, as the magic sources do.
        let source = "\
0 search/256 \\<html HTML
!:mime text/html
0 regex/16l ^From: mailbox
!:mime text/x-mail
";
        let program = compile(source);

        assert!(program.contains("rslt = stringSearch(buf, len, \"<html\", 5, &off0, 256, 0);"));
        // The `l` flag scales 16 lines at 80 columns.
        assert!(program.contains("rslt = regexMatch(buf, len, \"^From:\", &off0, 1280, 0);"));
    }

    #[test]
    fn test_string_match_flags() {
        let source = "\
0 string/c/W doctype relaxed doctype
!:mime text/html
";
        let program = compile(source);

        assert!(
            program
                .contains("rslt = stringMatch(buf, len, \"doctype\", 7, &off0, CompareEq, CompactWS|MatchLower);")
        );
    }

    #[test]
    fn test_default_matches_unconditionally() {
        let source = "\
0 string OggS ogg container
>28 default x vanilla ogg
!:mime application/ogg
";
        let program = compile(source);

        // No runtime call for the default; the MIME assignment is emitted
        // directly under the parent's success block.
        assert!(program.contains("*mime = \"application/ogg\";"));
        assert!(!program.contains("defaultMatch"));
    }

    #[test]
    fn test_per_level_offset_declarations() {
        let source = "\
0 string MZ DOS
>0x18 leshort >0x3f PE era
>>100 string PE\\0\\0 portable executable
!:mime application/x-msdownload
";
        let program = compile(source);

        assert!(program.contains("    size_t off0;\n"));
        assert!(program.contains("    size_t off1;\n"));
        assert!(program.contains("    size_t off2;\n"));
        assert!(!program.contains("off3"));
        assert!(program.contains("return haveError ? MagicError : MagicFail;"));
    }
}
