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

use mimec_compiler::{Compiler, CompilerOptions};
use mimec_errors::MimecError;
use mimec_errors::emitter::{BufferEmitter, Handler};

use std::fs;
use std::path::PathBuf;

const RULES: &str = "\
# A miniature magic database.
0 beshort 0xcafe compiled Java class data
!:mime application/java-vm
0 string %PDF PDF document
!:mime application/pdf
0 string MZ DOS executable
>(0x3c.l) string PE\\0\\0 PE executable
!:mime application/x-msdownload
";

/// Writes the inputs into a fresh directory and runs the full pipeline.
fn compile(rules: &str, exceptions: &str, options: Option<CompilerOptions>) -> (Result<(), MimecError>, PathBuf, BufferEmitter) {
    let directory = tempfile::tempdir().expect("failed to create a temp dir").keep();
    let rules_path = directory.join("magic");
    let exceptions_path = directory.join("exceptions");
    let output_path = directory.join("magic_tree.c");
    fs::write(&rules_path, rules).expect("failed to write rules");
    fs::write(&exceptions_path, exceptions).expect("failed to write exceptions");

    let (handler, buf) = Handler::new_with_buf();
    let mut compiler = Compiler::new(handler, rules_path, exceptions_path, output_path.clone(), options);
    (compiler.compile(), output_path, buf)
}

#[test]
fn test_compile_assembles_all_parts() {
    let (result, output_path, _) = compile(RULES, "", None);
    result.expect("compilation failed");

    let output = fs::read_to_string(output_path).expect("no output written");

    // Prologue, tables, generated function, epilogue, in that order.
    let prologue = output.find("Runtime surface for the generated MIME decision tree").unwrap();
    let short_map = output.find("static const ShortMapEntry shortMap0[]").unwrap();
    let string_map = output.find("static const StringMapEntry stringMap1[]").unwrap();
    let run_tests = output.find("runTests(const unsigned char *buf, size_t len, const char **mime)").unwrap();
    let epilogue = output.find("magicMime(const unsigned char *buf, size_t len)").unwrap();
    assert!(prologue < short_map && short_map < string_map && string_map < run_tests && run_tests < epilogue);

    // The indirect PE probe survives with its guarded fetch.
    assert!(output.contains("rslt = getOffset(buf, len, off1, 'l', &off1);"));
    assert!(output.contains("*mime = \"application/x-msdownload\";"));
}

#[test]
fn test_exception_list_suppresses_rules() {
    let (result, output_path, _) = compile(RULES, "application/pdf # broken on this platform\n", None);
    result.expect("compilation failed");

    let output = fs::read_to_string(output_path).unwrap();
    assert!(!output.contains("application/pdf"));
    assert!(output.contains("application/java-vm"));
}

#[test]
fn test_missing_rule_database_is_fatal() {
    let directory = tempfile::tempdir().unwrap().keep();
    let exceptions_path = directory.join("exceptions");
    fs::write(&exceptions_path, "").unwrap();

    let (handler, _) = Handler::new_with_buf();
    let mut compiler = Compiler::new(
        handler,
        directory.join("no-such-magic"),
        exceptions_path,
        directory.join("out.c"),
        None,
    );
    let error = compiler.compile().unwrap_err();
    assert!(error.to_string().contains("failed to read"));
}

#[test]
fn test_rule_database_without_rules_is_fatal() {
    let (result, _, _) = compile("# only comments\n\n", "", None);
    let error = result.unwrap_err();
    assert!(error.to_string().contains("contains no rules"));
}

#[test]
fn test_tree_snapshots_are_written() {
    let options = CompilerOptions { initial_tree: true, pruned_tree: true, ..Default::default() };
    let (result, output_path, _) = compile(RULES, "", Some(options));
    result.expect("compilation failed");

    let directory = output_path.parent().unwrap();
    let initial = fs::read_to_string(directory.join("initial_tree.json")).expect("no initial snapshot");
    let pruned = fs::read_to_string(directory.join("pruned_tree.json")).expect("no pruned snapshot");

    // The DOS stub itself has no MIME action; pruning keeps it only as a
    // path to the PE probe, and both snapshots stay valid JSON.
    assert!(initial.contains("\"application/pdf\""));
    assert!(pruned.contains("\"application/x-msdownload\""));
}

#[test]
fn test_warnings_do_not_abort_compilation() {
    let rules = "\
0 string MZ DOS executable
>(0x3c.m) string PE middle-endian fetch
!:mime application/x-msdownload
0 string %PDF PDF document
!:mime application/pdf
";
    let (result, output_path, buf) = compile(rules, "", None);
    result.expect("compilation failed");

    assert!(buf.extract_warnings().contains("offset type flag `m` is not implemented"));
    let output = fs::read_to_string(output_path).unwrap();
    // The unlowerable probe is dropped; the rest of the database compiles.
    assert!(!output.contains("rslt = getOffset"));
    assert!(output.contains("application/pdf"));
}
