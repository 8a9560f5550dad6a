use std::fmt;

/// The eight opcodes. Every other byte is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `>`
    Right,
    /// `<`
    Left,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
}

impl Instruction {
    /// Decode a program byte, or `None` for a byte that does nothing.
    pub fn decode(byte: u8) -> Option<Self> {
        Some(match byte {
            b'>' => Instruction::Right,
            b'<' => Instruction::Left,
            b'+' => Instruction::Increment,
            b'-' => Instruction::Decrement,
            b'.' => Instruction::Output,
            b',' => Instruction::Input,
            b'[' => Instruction::LoopStart,
            b']' => Instruction::LoopEnd,
            _ => return None,
        })
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Instruction::Right => b'>',
            Instruction::Left => b'<',
            Instruction::Increment => b'+',
            Instruction::Decrement => b'-',
            Instruction::Output => b'.',
            Instruction::Input => b',',
            Instruction::LoopStart => b'[',
            Instruction::LoopEnd => b']',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}
