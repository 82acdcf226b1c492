//! The two-tape addition/subtraction program.
//!
//! One shared pass moves both heads strictly rightward over operand A and
//! operand B, writing the result digits over B. The carry (or borrow) is the
//! only working storage and it lives in the control state, so the whole
//! machine is three states: no-carry, carry, halt.

use crate::encoder::encode;
use crate::machine::Program;
use crate::programs::bits::{add_digit, sub_digit};
use crate::tape::{Tape, TapeSet};
use crate::types::Direction::Right;
use crate::types::{MachineError, Rule, StateInfo, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Add,
    Sub,
}

/// The addition/subtraction transition program.
///
/// Tape 1 holds operand A, tape 2 holds operand B and receives the result.
/// Subtraction of a larger operand wraps: the run yields
/// `(A - B) mod 2^len(encode(B))`, the natural output of a borrow chain that
/// simply stops at the end of the tape.
pub struct Sum {
    mode: Mode,
}

impl Sum {
    /// A program computing `a + b`.
    pub fn adder() -> Self {
        Self { mode: Mode::Add }
    }

    /// A program computing `a - b` with wraparound truncation for `a < b`.
    pub fn subtractor() -> Self {
        Self { mode: Mode::Sub }
    }
}

/// Control states for [`Sum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumState {
    /// Adding the current digits with no pending carry/borrow.
    NoCarry,
    /// A carry (addition) or borrow (subtraction) is pending.
    Carry,
    Halt,
}

impl Program for Sum {
    type State = SumState;

    fn arity(&self) -> usize {
        2
    }

    fn initial_state(&self) -> SumState {
        SumState::NoCarry
    }

    fn halting_state(&self) -> SumState {
        SumState::Halt
    }

    fn output_tape(&self) -> usize {
        1
    }

    /// Both operands sit at cell 0 with one extra blank cell past the longer
    /// one, leaving room for the overflow digit.
    fn tapes(&self, a: u64, b: u64) -> TapeSet {
        let da = encode(a);
        let db = encode(b);
        let len = da.len().max(db.len()) + 1;

        TapeSet::new(vec![Tape::padded(&da, 0, len), Tape::padded(&db, 0, len)])
    }

    fn transition(
        &self,
        state: SumState,
        reads: &[Symbol],
    ) -> Result<Rule<SumState>, MachineError> {
        let (a, b) = (reads[0], reads[1]);

        match state {
            SumState::NoCarry | SumState::Carry => {
                let pending = state == SumState::Carry;

                if a == Symbol::Blank && b == Symbol::Blank {
                    // End of both operands. Addition writes the carry-out
                    // digit; subtraction stops dead, truncating any
                    // outstanding borrow.
                    let out = match self.mode {
                        Mode::Add if pending => Symbol::One,
                        _ => Symbol::Blank,
                    };
                    Ok(Rule::new(SumState::Halt, vec![a, out], vec![Right, Right]))
                } else {
                    let (digit, next) = match self.mode {
                        Mode::Add => add_digit(a, b, pending),
                        Mode::Sub => sub_digit(a, b, pending),
                    };
                    let next_state = if next { SumState::Carry } else { SumState::NoCarry };
                    Ok(Rule::new(next_state, vec![a, digit], vec![Right, Right]))
                }
            }
            SumState::Halt => Err(MachineError::undefined(self.describe(state), reads)),
        }
    }

    fn describe(&self, state: SumState) -> StateInfo {
        match state {
            SumState::NoCarry => StateInfo { id: 0, name: "no-carry" },
            SumState::Carry => StateInfo { id: 1, name: "carry" },
            SumState::Halt => StateInfo { id: 2, name: "halt" },
        }
    }
}
