//! A minimal tape-based Brainfuck interpreter.
//!
//! Programs run against a fixed tape of 30,000 byte cells with a single data
//! pointer.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0; cells wrap modulo 256.
//! - Strict pointer bounds: moving left from cell 0 or right past the end
//!   stops the program with an error.
//! - Input `,` reads a single byte; on EOF the current cell is left unchanged.
//! - Output `.` writes the current cell as one raw byte.
//! - Loops `[]` are matched by scanning the program when a jump is taken; an
//!   unmatched bracket is an error only when execution reaches for it.
//! - Any byte outside `><+-.,[]` is ignored.
//!
//! Quick start:
//!
//! ```no_run
//! use bf_tape::{Engine, Program};
//!
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let mut bf = Engine::new(Program::from(code), std::io::stdin(), std::io::stdout());
//! let elapsed = bf.run().expect("program should run");
//! eprintln!("took {}ms", elapsed.as_millis());
//! ```

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod instruction;
pub mod program;
pub mod tape;

pub use engine::{Engine, Step};
pub use error::{BracketKind, LoadError, RuntimeError};
pub use instruction::Instruction;
pub use program::Program;
pub use tape::{TAPE_SIZE, Tape};
