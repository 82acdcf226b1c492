//! This module defines the core data structures shared across the simulator:
//! tape symbols, head directions, transition rules, trace events, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The maximum number of tapes a machine may drive.
pub const MAX_TAPES: usize = 4;

/// A single tape cell value.
///
/// `Blank` is both the padding value beyond a tape's materialized cells and a
/// legal cell content in its own right; arithmetic reads it as bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    /// The binary digit 0.
    Zero,
    /// The binary digit 1.
    One,
    /// The blank cell.
    Blank,
}

impl Symbol {
    /// Returns the bit value of this symbol. `Blank` reads as 0.
    pub fn bit(self) -> u8 {
        match self {
            Symbol::One => 1,
            Symbol::Zero | Symbol::Blank => 0,
        }
    }

    /// Returns the digit symbol for the low bit of `bit`.
    pub fn from_bit(bit: u8) -> Self {
        if bit & 1 == 1 {
            Symbol::One
        } else {
            Symbol::Zero
        }
    }

    /// Returns the character used to render this symbol on a trace line.
    pub fn as_char(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::Blank => ' ',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Represents the possible directions a tape head can move after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Returns the head position delta for this direction.
    pub fn delta(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Stay => 0,
        }
    }

    /// Returns the character used to render this direction on a trace line.
    pub fn as_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Stay => 'S',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Identifies one control state of a transition program for tracing.
///
/// The numeric id is what the trace prints ("State 3"); the name is a stable
/// label for diagnostics. Ids start at 0 for the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateInfo {
    pub id: u8,
    pub name: &'static str,
}

impl fmt::Display for StateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// One transition rule produced by a program for a (state, read-tuple) pair.
///
/// `writes` and `moves` carry exactly one entry per tape; cells that a
/// transition leaves untouched write back the symbol that was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule<S> {
    /// The state the machine enters after this transition.
    pub next: S,
    /// The symbol written to each tape, in tape order.
    pub writes: Vec<Symbol>,
    /// The head move applied to each tape, in tape order.
    pub moves: Vec<Direction>,
}

impl<S> Rule<S> {
    pub fn new(next: S, writes: Vec<Symbol>, moves: Vec<Direction>) -> Self {
        Self { next, writes, moves }
    }
}

/// Represents the outcome of a single machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a transition and continues execution.
    Continue,
    /// The machine is in its halting state.
    Halted,
}

/// The contents and head position of one tape at a point in time.
///
/// The head may sit left of cell 0 or past the last cell; both model the
/// infinite blank extension and render as an out-of-bounds marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TapeSnapshot {
    pub cells: Vec<Symbol>,
    pub head: isize,
}

impl TapeSnapshot {
    /// Returns the raw cell contents as a string, blanks included.
    pub fn contents(&self) -> String {
        self.cells.iter().map(|s| s.as_char()).collect()
    }
}

/// A trace event emitted by the executor.
///
/// One `Initial` before the first step, one `Step` per transition, one
/// `Result` at halt. Consumed immediately by the sink; the core retains
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TraceEvent {
    /// The configuration before the first step.
    Initial {
        state: StateInfo,
        tapes: Vec<TapeSnapshot>,
    },
    /// One applied transition: the rule and the configuration it produced.
    Step {
        from: StateInfo,
        read: Vec<Symbol>,
        to: StateInfo,
        written: Vec<Symbol>,
        moves: Vec<Direction>,
        tapes: Vec<TapeSnapshot>,
    },
    /// The output tape at halt and its decoded value.
    Result { tape: TapeSnapshot, value: u64 },
}

/// Represents fatal faults raised during machine execution.
///
/// Both variants mark an authoring bug in a transition program, never bad
/// user input; there is no recovery path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// No rule is defined for the current state and read symbols.
    #[error("no transition defined for state {state} reading {symbols:?}")]
    UndefinedTransition { state: String, symbols: Vec<char> },
    /// A rule's write or move tuple does not match the machine's tape count.
    #[error("transition in state {state} drives {found} tapes, machine has {expected}")]
    ArityMismatch {
        state: String,
        expected: usize,
        found: usize,
    },
}

impl MachineError {
    /// Builds the fault for a (state, read-tuple) pair with no rule.
    pub fn undefined(state: StateInfo, reads: &[Symbol]) -> Self {
        MachineError::UndefinedTransition {
            state: state.name.to_string(),
            symbols: reads.iter().map(|s| s.as_char()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_bits() {
        assert_eq!(Symbol::Zero.bit(), 0);
        assert_eq!(Symbol::One.bit(), 1);
        assert_eq!(Symbol::Blank.bit(), 0);

        assert_eq!(Symbol::from_bit(0), Symbol::Zero);
        assert_eq!(Symbol::from_bit(1), Symbol::One);
        assert_eq!(Symbol::from_bit(3), Symbol::One);
    }

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let right_deserialized: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(right, right_deserialized);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Left.delta(), -1);
        assert_eq!(Direction::Right.delta(), 1);
        assert_eq!(Direction::Stay.delta(), 0);
    }

    #[test]
    fn test_snapshot_contents() {
        let snapshot = TapeSnapshot {
            cells: vec![Symbol::Zero, Symbol::One, Symbol::Blank],
            head: 1,
        };
        assert_eq!(snapshot.contents(), "01 ");
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::undefined(
            StateInfo { id: 2, name: "halt" },
            &[Symbol::One, Symbol::Blank],
        );

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("no transition defined"));
        assert!(error_msg.contains("halt"));
    }
}
