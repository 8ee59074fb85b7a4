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

use mimec_ast::Endianness;
use mimec_compiler::{Compiler, CompilerOptions};
use mimec_errors::emitter::Handler;

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Compiles a libmagic rule database into a C MIME decision tree.
#[derive(Debug, Parser)]
#[command(name = "mimec", author = "The Mimec Team", version)]
struct Cli {
    /// The magic rule database to compile.
    rules: PathBuf,
    /// The list of MIME types to exclude, one per line.
    exceptions: PathBuf,
    /// Where to write the generated program.
    output: PathBuf,
    /// Print debug diagnostics while compiling.
    #[arg(short, long)]
    debug: bool,
    /// Byte order of the machine the generated program will run on
    /// (defaults to this machine's).
    #[arg(long, value_enum)]
    target_endian: Option<TargetEndian>,
    /// Write rule-tree snapshots next to the output.
    #[arg(long)]
    snapshots: bool,
    /// Replace the embedded runtime prologue.
    #[arg(long)]
    prologue: Option<PathBuf>,
    /// Replace the embedded epilogue.
    #[arg(long)]
    epilogue: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum TargetEndian {
    Little,
    Big,
}

impl From<TargetEndian> for Endianness {
    fn from(endian: TargetEndian) -> Self {
        match endian {
            TargetEndian::Little => Endianness::Little,
            TargetEndian::Big => Endianness::Big,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "mimec=debug" } else { "mimec=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();

    let options = CompilerOptions {
        debug: cli.debug,
        target_endian: cli.target_endian.map_or_else(Endianness::host, Endianness::from),
        initial_tree: cli.snapshots,
        pruned_tree: cli.snapshots,
        prologue: cli.prologue,
        epilogue: cli.epilogue,
    };

    let mut compiler = Compiler::new(Handler::default(), cli.rules, cli.exceptions, cli.output, Some(options));
    match compiler.compile() {
        Ok(()) => {
            let warnings = compiler.handler().warning_count();
            if warnings > 0 {
                eprintln!("{}: finished with {warnings} warning(s)", "Warning".bold().yellow());
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            // Errors routed through the handler already reached stderr.
            if compiler.handler().err_count() == 0 {
                eprintln!("{}: {error}", "Error".bold().red());
            }
            ExitCode::FAILURE
        }
    }
}
