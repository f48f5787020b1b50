//! # Session
//!
//! Owns one engine for the life of the process and wires it to the view.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  input line ──► Command ──► BundleEngine ──notify──► render observer   │
//! │                   │              │                        │             │
//! │                   │              └── Err ──► error sink   ▼             │
//! │                   │                                     output          │
//! │                   └── show / checkout / help ──────────► output         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Screen updates for mutations come only from the observer; the session
//! never re-renders after a mutation itself.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use bundle_core::{BundleEngine, BundleSnapshot};
use tracing::{debug, info, warn};

use crate::command::{Command, HELP};
use crate::error::{AppError, AppResult};
use crate::view::{OutputFormat, View};

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Counters reported when a script finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub executed: usize,
    pub failed: usize,
}

pub struct Session<W: Write + 'static, E: Write> {
    engine: BundleEngine,
    view: View,
    output: Rc<RefCell<W>>,
    errors: E,
}

impl<W: Write + 'static, E: Write> Session<W, E> {
    /// Subscribes the renderer to `engine`.
    ///
    /// Nothing is drawn until [`Session::start`].
    pub fn new(mut engine: BundleEngine, view: View, output: W, errors: E) -> Self {
        let output = Rc::new(RefCell::new(output));

        let renderer = view.clone();
        let sink = Rc::clone(&output);
        engine.subscribe(move |snapshot: &BundleSnapshot| {
            if let Err(err) = write_render(&renderer, snapshot, &mut *sink.borrow_mut()) {
                warn!(error = %err, "failed to render bundle");
            }
        });

        Session {
            engine,
            view,
            output,
            errors,
        }
    }

    /// Applies preselected products, which draws the first screen.
    pub fn start(&mut self) {
        self.engine.initialize();
    }

    pub fn engine(&self) -> &BundleEngine {
        &self.engine
    }

    /// Runs `f` against the output writer.
    pub fn with_output<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        let output = self.output.borrow();
        f(&*output)
    }

    pub fn errors(&self) -> &E {
        &self.errors
    }

    // =========================================================================
    // Commands
    // =========================================================================

    pub fn execute(&mut self, command: Command) -> AppResult<Flow> {
        debug!(?command, "executing");

        match command {
            Command::Toggle(id) => {
                self.engine.toggle(id)?;
            }
            Command::Add(id, quantity) => {
                self.engine.add(id, quantity)?;
            }
            Command::Remove(id) => {
                self.engine.remove(id)?;
            }
            Command::ChangeQuantity(id, delta) => {
                self.engine.change_quantity(id, delta)?;
            }
            Command::Show => {
                let snapshot = self.engine.snapshot();
                write_render(&self.view, &snapshot, &mut *self.output.borrow_mut())?;
            }
            Command::Checkout => {
                let snapshot = self.engine.snapshot();
                let summary = self.engine.checkout();
                let text = self.view.render_checkout(summary.as_ref(), &snapshot)?;
                writeln!(self.output.borrow_mut(), "{}", text)?;
            }
            Command::Help => {
                writeln!(self.output.borrow_mut(), "{}", HELP)?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Parses and runs one input line. Blank lines and `#` comments are no-ops.
    pub fn execute_line(&mut self, line: &str) -> AppResult<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        let command: Command = line.parse()?;
        self.execute(command)
    }

    /// Runs every line of `input`, reporting failures and carrying on.
    ///
    /// Only a failure to read input or write a report ends the run early.
    pub fn run_script<R: BufRead>(&mut self, input: R) -> AppResult<RunStats> {
        let mut stats = RunStats::default();

        for line in input.lines() {
            let line = line?;
            stats.executed += 1;

            match self.execute_line(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(err) => {
                    stats.failed += 1;
                    self.report(&err)?;
                }
            }
        }

        info!(executed = stats.executed, failed = stats.failed, "input finished");
        Ok(stats)
    }

    fn report(&mut self, err: &AppError) -> AppResult<()> {
        match self.view.format() {
            OutputFormat::Json => {
                let line = serde_json::to_string(&err.report())?;
                writeln!(self.errors, "{}", line)?;
            }
            OutputFormat::Text => writeln!(self.errors, "error: {}", err)?,
        }
        Ok(())
    }
}

fn write_render<W: Write>(view: &View, snapshot: &BundleSnapshot, out: &mut W) -> AppResult<()> {
    let text = view.render(snapshot)?;
    match view.format() {
        OutputFormat::Json => writeln!(out, "{}", text)?,
        OutputFormat::Text => writeln!(out, "{}\n", text)?,
    }
    out.flush()?;
    Ok(())
}
