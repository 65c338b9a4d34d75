//! ZhiDai (纸带) Tape Language Interpreter
//!
//! A minimal eight-instruction tape language: a fixed-size circular byte
//! tape, one data pointer, and byte-oriented input/output. Every byte that
//! is not one of `+ - > < . , [ ]` is a comment.
//!
//! # Example
//!
//! ```no_run
//! use zhidai::{run, Result};
//!
//! fn main() -> Result<()> {
//!     // Prints "HI"
//!     run("++++++++[>+++++++++<-]>.+.")?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/zhidai")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod repl;
pub mod vm;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::vm::{InputMode, VMConfig, VM};

/// Language version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "ZhiDai (纸带)";

/// Run the interpreter on source code
///
/// The input stream stays available to the program: `,` reads bytes from
/// stdin on demand.
pub fn run(source: &str) -> Result<()> {
    run_program(source.as_bytes(), InputMode::Interactive, VMConfig::default())
}

/// Run the interpreter on a file
///
/// The file is read as raw bytes: program text needs no particular
/// encoding, unrecognized bytes are comments.
pub fn run_file(path: &Path) -> Result<()> {
    debug!("run_file: {}", path.display());
    let source = fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    run_program(&source, InputMode::Interactive, VMConfig::default())
}

/// Run a program whose text was drained from piped stdin
///
/// In this mode the input stream is already consumed, so any `,` in the
/// program fails with [`vm::VMError::InputExhausted`].
pub fn run_piped(source: &[u8]) -> Result<()> {
    run_program(source, InputMode::Piped, VMConfig::default())
}

/// Run a program with explicit input mode and VM configuration
pub fn run_program(source: &[u8], mode: InputMode, config: VMConfig) -> Result<()> {
    let mut vm = VM::new_with_config(config, mode);
    vm.interpret(source)?;
    Ok(())
}
