//! The fetch-execute loop.
//!
//! An [`Engine`] owns everything a running program can touch: the tape, the
//! program and its cursor, and the input/output channels. Each call to
//! [`Engine::step`] fetches one byte, advances the program cursor past it,
//! and only then executes it, so jumps are resolved relative to the
//! already-advanced cursor.
//!
//! Loop brackets are matched by rescanning the program whenever a jump is
//! taken. There is no jump table; an unmatched bracket is only reported when
//! execution actually needs its counterpart.

use std::io::{self, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{BracketKind, RuntimeError};
use crate::instruction::Instruction;
use crate::program::Program;
use crate::tape::Tape;

/// Result of a single [`Engine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An instruction (or inert byte) was consumed.
    Continue,
    /// The program cursor is past the last byte; nothing left to do.
    Halted,
}

/// A single-threaded interpreter.
///
/// The engine maintains:
/// - the loaded [`Program`] and the program cursor (next byte to fetch),
/// - the [`Tape`] and its data cursor,
/// - a byte input channel `R` and output channel `W`.
///
/// Nothing else carries state between steps, so the two cursors plus the
/// tape fully determine what happens next, apart from input.
pub struct Engine<R, W> {
    program: Program,
    pc: usize,
    tape: Tape,
    input: R,
    output: W,
    cancel_flag: Option<Arc<AtomicBool>>,
    trace: Option<Box<dyn Write + Send>>,
    steps: usize,
}

impl<R: Read, W: Write> Engine<R, W> {
    /// An engine over a default-sized, zeroed tape.
    pub fn new(program: Program, input: R, output: W) -> Self {
        Self::with_tape(program, Tape::new(), input, output)
    }

    pub fn with_tape(program: Program, tape: Tape, input: R, output: W) -> Self {
        Self {
            program,
            pc: 0,
            tape,
            input,
            output,
            cancel_flag: None,
            trace: None,
            steps: 0,
        }
    }

    /// Checked before every step; once set, [`Engine::run`] stops with
    /// [`RuntimeError::Aborted`].
    pub fn set_cancel_flag(&mut self, flag: Arc<AtomicBool>) {
        self.cancel_flag = Some(flag);
    }

    /// Write one table row per executed instruction to `sink`.
    pub fn set_trace<T>(&mut self, sink: T)
    where
        T: Write + Send + 'static,
    {
        self.trace = Some(Box::new(sink));
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn program_cursor(&self) -> usize {
        self.pc
    }

    pub fn data_cursor(&self) -> usize {
        self.tape.cursor()
    }

    pub fn is_halted(&self) -> bool {
        self.pc >= self.program.len()
    }

    /// Number of opcodes executed so far. Inert bytes are not counted.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the program cursor runs off the end, returning the wall-clock
    /// time spent in the loop.
    pub fn run(&mut self) -> Result<Duration, RuntimeError> {
        let started = Instant::now();
        loop {
            if let Some(flag) = self.cancel_flag.as_ref() {
                if flag.load(Ordering::Relaxed) {
                    return Err(RuntimeError::Aborted);
                }
            }
            if self.step()? == Step::Halted {
                break;
            }
        }
        let elapsed = started.elapsed();
        self.output
            .flush()
            .map_err(|source| RuntimeError::Io { ip: self.pc, source })?;
        Ok(elapsed)
    }

    /// Fetch, advance, execute.
    pub fn step(&mut self) -> Result<Step, RuntimeError> {
        if self.is_halted() {
            return Ok(Step::Halted);
        }

        let ip = self.pc;
        let byte = self.program.at(ip);
        self.pc += 1;

        let Some(instr) = Instruction::decode(byte) else {
            return Ok(Step::Continue);
        };

        let (ptr_before, cell_before) = (self.tape.cursor(), self.tape.read_current());
        self.execute(ip, instr)?;
        self.record(ip, ptr_before, cell_before, instr);
        self.steps += 1;

        Ok(Step::Continue)
    }

    fn execute(&mut self, ip: usize, instr: Instruction) -> Result<(), RuntimeError> {
        match instr {
            Instruction::Right => self.tape.advance().map_err(|_| RuntimeError::OutOfBounds {
                ip,
                ptr: self.tape.cursor(),
            })?,
            Instruction::Left => self.tape.retreat().map_err(|_| RuntimeError::OutOfBounds {
                ip,
                ptr: self.tape.cursor(),
            })?,
            Instruction::Increment => self.tape.increment_current(),
            Instruction::Decrement => self.tape.decrement_current(),
            Instruction::Output => {
                let byte = [self.tape.read_current()];
                self.output
                    .write_all(&byte)
                    .map_err(|source| RuntimeError::Io { ip, source })?;
            }
            Instruction::Input => {
                // Anything already printed (a prompt, say) should be visible
                // before we block on input.
                self.output
                    .flush()
                    .map_err(|source| RuntimeError::Io { ip, source })?;
                // EOF leaves the cell untouched.
                if let Some(byte) = self.read_byte().map_err(|source| RuntimeError::Io { ip, source })? {
                    self.tape.write_current(byte);
                }
            }
            Instruction::LoopStart => {
                if self.tape.read_current() == 0 {
                    self.pc = self.matching_close(ip)? + 1;
                }
            }
            Instruction::LoopEnd => {
                if self.tape.read_current() != 0 {
                    self.pc = self.matching_open(ip)? + 1;
                }
            }
        }
        Ok(())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Index of the `]` balancing the `[` at `open`.
    fn matching_close(&self, open: usize) -> Result<usize, RuntimeError> {
        let mut depth = 1usize;
        let mut i = open;
        while depth > 0 {
            i += 1;
            if i >= self.program.len() {
                return Err(RuntimeError::UnmatchedBracket { ip: open, kind: BracketKind::Open });
            }
            match self.program.at(i) {
                b'[' => depth += 1,
                b']' => depth -= 1,
                _ => {}
            }
        }
        Ok(i)
    }

    /// Index of the `[` balancing the `]` at `close`.
    fn matching_open(&self, close: usize) -> Result<usize, RuntimeError> {
        let mut depth = 1usize;
        let mut i = close;
        while depth > 0 {
            if i == 0 {
                return Err(RuntimeError::UnmatchedBracket { ip: close, kind: BracketKind::Close });
            }
            i -= 1;
            match self.program.at(i) {
                b']' => depth += 1,
                b'[' => depth -= 1,
                _ => {}
            }
        }
        Ok(i)
    }

    fn record(&mut self, ip: usize, ptr_before: usize, cell_before: u8, instr: Instruction) {
        let Some(sink) = self.trace.as_mut() else {
            return;
        };
        // Trace write failures are ignored.
        if self.steps == 0 {
            let _ = writeln!(sink, "STEP  | IP    | PTR   | CELL | INSTR");
            let _ = writeln!(sink, "------+-------+-------+------+------");
        }
        let _ = writeln!(
            sink,
            "{:<5} | {:<5} | {:<5} | {:<4} | {}",
            self.steps, ip, ptr_before, cell_before, instr
        );
    }
}
