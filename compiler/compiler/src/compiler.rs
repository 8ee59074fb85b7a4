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

//! The driver of the mimec compiler.
//!
//! The [`Compiler`] type chains the pipeline: load the exception list,
//! parse the rule database, prune, validate, generate, and write out
//! prologue + tables + `runTests` + epilogue.

use crate::CompilerOptions;

use mimec_errors::emitter::Handler;
use mimec_errors::{CompilerError, Result};
use mimec_passes::{CodeGenerating, CompilerState, Pass, Pruning, PruningOutput, Validation, ValidationOutput};

use std::fs;
use std::path::{Path, PathBuf};

/// The embedded runtime surface emitted ahead of the generated code.
pub const PROLOGUE: &str = include_str!("prologue.c");
/// The embedded wrapper emitted after the generated code.
pub const EPILOGUE: &str = include_str!("epilogue.c");

/// The primary entry point of the mimec compiler.
pub struct Compiler {
    /// Path to the magic rule database.
    rules_path: PathBuf,
    /// Path to the MIME exception list.
    exceptions_path: PathBuf,
    /// Path the generated program is written to.
    output_path: PathBuf,
    /// Compiler options for this run.
    options: CompilerOptions,
    /// State shared by all passes.
    pub state: CompilerState,
}

impl Compiler {
    /// Returns a new compiler over the given inputs.
    pub fn new(
        handler: Handler,
        rules_path: PathBuf,
        exceptions_path: PathBuf,
        output_path: PathBuf,
        options: Option<CompilerOptions>,
    ) -> Self {
        let options = options.unwrap_or_default();
        let state = CompilerState { handler, debug: options.debug, ..Default::default() };
        Self { rules_path, exceptions_path, output_path, options, state }
    }

    /// Loads and parses the exception list.
    pub fn parse_exceptions(&mut self) -> Result<()> {
        let source = fs::read_to_string(&self.exceptions_path)
            .map_err(|e| CompilerError::file_read_error(&self.exceptions_path, e))?;
        self.state.exceptions = mimec_parser::parse_exceptions(&source);
        tracing::debug!(count = self.state.exceptions.len(), "loaded exception list");
        Ok(())
    }

    /// Loads and parses the rule database into the rule tree.
    pub fn parse_rules(&mut self) -> Result<()> {
        let source =
            fs::read_to_string(&self.rules_path).map_err(|e| CompilerError::file_read_error(&self.rules_path, e))?;

        self.state.tree = mimec_parser::parse_rules(&self.state.handler, &source, self.options.target_endian)?;
        if self.state.tree.is_empty() {
            return Err(CompilerError::empty_rule_database(&self.rules_path).into());
        }

        if self.options.initial_tree {
            self.state.tree.to_json_file(&self.snapshot_directory(), "initial_tree.json")?;
        }
        Ok(())
    }

    /// Runs the pruning pass.
    pub fn pruning_pass(&mut self) -> Result<PruningOutput> {
        let output = Pruning::do_pass((), &mut self.state)?;
        tracing::debug!(retained = output.retained, pruned = output.pruned, "pruned the rule tree");

        if self.options.pruned_tree {
            self.state.tree.to_json_file(&self.snapshot_directory(), "pruned_tree.json")?;
        }
        Ok(output)
    }

    /// Runs the offset validation pass.
    pub fn validation_pass(&mut self) -> Result<ValidationOutput> {
        Validation::do_pass((), &mut self.state)
    }

    /// Runs the code generation pass, returning tables + `runTests`.
    pub fn code_generation_pass(&mut self) -> Result<String> {
        CodeGenerating::do_pass((), &mut self.state)
    }

    /// Runs the whole pipeline and writes the generated program.
    pub fn compile(&mut self) -> Result<()> {
        self.parse_exceptions()?;
        self.parse_rules()?;
        self.pruning_pass()?;
        self.validation_pass()?;
        let program = self.code_generation_pass()?;

        let prologue = self.verbatim_part(self.options.prologue.clone(), PROLOGUE)?;
        let epilogue = self.verbatim_part(self.options.epilogue.clone(), EPILOGUE)?;

        let output = format!("{prologue}\n{program}\n{epilogue}");
        fs::write(&self.output_path, output).map_err(|e| CompilerError::file_write_error(&self.output_path, e))?;
        Ok(())
    }

    /// Shared access to the handler driving this compilation.
    pub fn handler(&self) -> &Handler {
        &self.state.handler
    }

    /// Reads an override file, or falls back to the embedded text.
    fn verbatim_part(&self, path: Option<PathBuf>, embedded: &str) -> Result<String> {
        match path {
            Some(path) => {
                fs::read_to_string(&path).map_err(|e| CompilerError::file_read_error(&path, e).into())
            }
            None => Ok(embedded.to_string()),
        }
    }

    /// Tree snapshots land next to the generated program.
    fn snapshot_directory(&self) -> PathBuf {
        self.output_path.parent().map_or_else(|| Path::new(".").to_path_buf(), Path::to_path_buf)
    }
}
