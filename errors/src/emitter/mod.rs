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

use crate::{MimecError, MimecWarning};

use colored::Colorize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Types that are sinks for compiler errors and warnings.
pub trait Emitter {
    /// Emit the error `err`.
    fn emit_err(&mut self, err: &MimecError);

    /// Emit the warning `warning`.
    fn emit_warning(&mut self, warning: &MimecWarning);
}

/// A sink that renders to standard error.
pub struct StderrEmitter;

impl Emitter for StderrEmitter {
    fn emit_err(&mut self, err: &MimecError) {
        eprintln!("{}: {err}", "Error".bold().red());
    }

    fn emit_warning(&mut self, warning: &MimecWarning) {
        eprintln!("{}: {warning}", "Warning".bold().yellow());
    }
}

/// A sink that buffers diagnostics in memory, for testing.
#[derive(Clone, Default)]
pub struct BufferEmitter(Rc<RefCell<String>>, Rc<RefCell<String>>);

impl BufferEmitter {
    /// Returns a new buffered emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts all the errors collected in this emitter.
    pub fn extract_errs(&self) -> String {
        self.0.borrow().clone()
    }

    /// Extracts all the warnings collected in this emitter.
    pub fn extract_warnings(&self) -> String {
        self.1.borrow().clone()
    }
}

impl Emitter for BufferEmitter {
    fn emit_err(&mut self, err: &MimecError) {
        let mut buf = self.0.borrow_mut();
        if !buf.is_empty() {
            buf.push('\n');
        }
        buf.push_str(&err.to_string());
    }

    fn emit_warning(&mut self, warning: &MimecWarning) {
        let mut buf = self.1.borrow_mut();
        if !buf.is_empty() {
            buf.push('\n');
        }
        buf.push_str(&warning.to_string());
    }
}

/// Contains the actual data for `Handler`.
/// Modeled this way to afford an API using interior mutability.
struct HandlerInner {
    /// Number of errors emitted thus far.
    err_count: usize,
    /// Number of warnings emitted thus far.
    warn_count: usize,
    /// The last error emitted, if any.
    last_err: Option<MimecError>,
    /// The sink through which diagnostics leave the compiler.
    emitter: Box<dyn Emitter>,
}

impl HandlerInner {
    fn emit_err(&mut self, err: MimecError) {
        self.err_count = self.err_count.saturating_add(1);
        self.emitter.emit_err(&err);
        self.last_err = Some(err);
    }

    fn emit_warning(&mut self, warning: MimecWarning) {
        self.warn_count = self.warn_count.saturating_add(1);
        self.emitter.emit_warning(&warning);
    }
}

/// A handler deals with the errors and warnings encountered during a run
/// of the compiler.
///
/// Parsing and code generation side-channel their diagnostics through a
/// shared `&Handler` rather than threading them through return values.
pub struct Handler {
    inner: RefCell<HandlerInner>,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new(Box::new(StderrEmitter))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Handler")
            .field("err_count", &inner.err_count)
            .field("warn_count", &inner.warn_count)
            .finish_non_exhaustive()
    }
}

impl Handler {
    /// Returns a new handler using the given `emitter`.
    pub fn new(emitter: Box<dyn Emitter>) -> Self {
        let inner = RefCell::new(HandlerInner { err_count: 0, warn_count: 0, last_err: None, emitter });
        Self { inner }
    }

    /// Returns a new handler connected to a [`BufferEmitter`], together with
    /// the emitter, so tests can inspect what was collected.
    pub fn new_with_buf() -> (Self, BufferEmitter) {
        let buf = BufferEmitter::new();
        let handler = Self::new(Box::new(buf.clone()));
        (handler, buf)
    }

    /// Emit the error `err`.
    pub fn emit_err<E: Into<MimecError>>(&self, err: E) {
        self.inner.borrow_mut().emit_err(err.into());
    }

    /// Emit the warning `warning`.
    pub fn emit_warning<W: Into<MimecWarning>>(&self, warning: W) {
        self.inner.borrow_mut().emit_warning(warning.into());
    }

    /// The number of errors emitted thus far.
    pub fn err_count(&self) -> usize {
        self.inner.borrow().err_count
    }

    /// The number of warnings emitted thus far.
    pub fn warning_count(&self) -> usize {
        self.inner.borrow().warn_count
    }

    /// Did we have any errors thus far?
    pub fn had_errors(&self) -> bool {
        self.err_count() > 0
    }

    /// Gets the last emitted error, if any, as a `Result`.
    pub fn last_err(&self) -> crate::Result<()> {
        match &self.inner.borrow().last_err {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
