//! This module defines `Tape`, a growable bidirectional sequence of symbols
//! with a read/write head, and `TapeSet`, the fixed-arity collection of tapes
//! a machine drives in lockstep.

use crate::types::{Direction, Symbol, TapeSnapshot, MAX_TAPES};

/// A single machine tape.
///
/// Cells are materialized on demand: the head may sit anywhere on the infinite
/// tape, reads outside the materialized range return `Blank` without mutating
/// anything, and writes extend the cell vector so the target position exists.
/// All operations are total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Symbol>,
    head: isize,
}

impl Tape {
    /// Creates a tape from raw cells with the head at `head`.
    pub fn new(cells: Vec<Symbol>, head: isize) -> Self {
        Self { cells, head }
    }

    /// Lays out `digits` starting at cell `origin`, blank-padded to `len`
    /// cells, with the head parked on the first digit.
    ///
    /// `origin` of 1 leaves a blank sentinel cell at index 0, which the
    /// backtracking programs rely on to find their way home.
    pub fn padded(digits: &[Symbol], origin: usize, len: usize) -> Self {
        let mut cells = vec![Symbol::Blank; len.max(origin + digits.len())];
        cells[origin..origin + digits.len()].copy_from_slice(digits);
        Self {
            cells,
            head: origin as isize,
        }
    }

    /// Creates an all-blank tape of `len` cells with the head at `head`.
    pub fn blank(len: usize, head: isize) -> Self {
        Self {
            cells: vec![Symbol::Blank; len],
            head,
        }
    }

    /// Returns the symbol under the head. Positions outside the materialized
    /// cells read as `Blank`.
    pub fn read(&self) -> Symbol {
        usize::try_from(self.head)
            .ok()
            .and_then(|i| self.cells.get(i))
            .copied()
            .unwrap_or(Symbol::Blank)
    }

    /// Writes `symbol` at the head, materializing the cell first if the head
    /// sits outside the current range.
    ///
    /// A write left of cell 0 prepends blank cells, after which the head is
    /// at the new cell 0.
    pub fn write(&mut self, symbol: Symbol) {
        if self.head < 0 {
            let missing = self.head.unsigned_abs();
            self.cells.splice(0..0, std::iter::repeat(Symbol::Blank).take(missing));
            self.head = 0;
        }
        let index = self.head as usize;
        if index >= self.cells.len() {
            self.cells.resize(index + 1, Symbol::Blank);
        }
        self.cells[index] = symbol;
    }

    /// Shifts the head by one cell in `direction`. No bound is enforced.
    pub fn shift(&mut self, direction: Direction) {
        self.head += direction.delta();
    }

    /// Returns the head position.
    pub fn head(&self) -> isize {
        self.head
    }

    /// Returns the materialized cells.
    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    /// Returns a snapshot of this tape for tracing.
    pub fn snapshot(&self) -> TapeSnapshot {
        TapeSnapshot {
            cells: self.cells.clone(),
            head: self.head,
        }
    }
}

/// An ordered, fixed-arity collection of tapes.
///
/// The tape count is fixed at construction and must equal the arity declared
/// by the transition program the set runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapeSet {
    tapes: Vec<Tape>,
}

impl TapeSet {
    /// Creates a tape set.
    ///
    /// # Panics
    ///
    /// Panics if the tape count is outside `1..=MAX_TAPES`; tape sets are
    /// built by program constructors, so a violation is an authoring bug.
    pub fn new(tapes: Vec<Tape>) -> Self {
        assert!(
            (1..=MAX_TAPES).contains(&tapes.len()),
            "tape count {} outside 1..={}",
            tapes.len(),
            MAX_TAPES
        );
        Self { tapes }
    }

    /// Returns the number of tapes.
    pub fn count(&self) -> usize {
        self.tapes.len()
    }

    /// Returns the symbol under each tape's head, in tape order.
    pub fn reads(&self) -> Vec<Symbol> {
        self.tapes.iter().map(Tape::read).collect()
    }

    /// Writes `symbol` at tape `index`'s head.
    pub fn write(&mut self, index: usize, symbol: Symbol) {
        self.tapes[index].write(symbol);
    }

    /// Shifts tape `index`'s head in `direction`.
    pub fn shift(&mut self, index: usize, direction: Direction) {
        self.tapes[index].shift(direction);
    }

    /// Returns the tapes.
    pub fn tapes(&self) -> &[Tape] {
        &self.tapes
    }

    /// Returns a snapshot of every tape for tracing.
    pub fn snapshot(&self) -> Vec<TapeSnapshot> {
        self.tapes.iter().map(Tape::snapshot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Symbol::{Blank, One, Zero};

    #[test]
    fn test_padded_layout() {
        let tape = Tape::padded(&[One, Zero], 1, 5);

        assert_eq!(tape.cells(), &[Blank, One, Zero, Blank, Blank]);
        assert_eq!(tape.head(), 1);
        assert_eq!(tape.read(), One);
    }

    #[test]
    fn test_padded_never_truncates() {
        // requested length shorter than the digits still materializes them all
        let tape = Tape::padded(&[One, One, One], 1, 2);
        assert_eq!(tape.cells(), &[Blank, One, One, One]);
    }

    #[test]
    fn test_read_outside_bounds_is_blank() {
        let mut tape = Tape::new(vec![One], 0);

        tape.shift(Direction::Left);
        assert_eq!(tape.head(), -1);
        assert_eq!(tape.read(), Blank);

        tape.shift(Direction::Right);
        tape.shift(Direction::Right);
        assert_eq!(tape.head(), 1);
        assert_eq!(tape.read(), Blank);

        // reads never materialize cells
        assert_eq!(tape.cells(), &[One]);
    }

    #[test]
    fn test_write_extends_right() {
        let mut tape = Tape::new(vec![One], 3);
        tape.write(Zero);

        assert_eq!(tape.cells(), &[One, Blank, Blank, Zero]);
        assert_eq!(tape.head(), 3);
    }

    #[test]
    fn test_write_extends_left() {
        let mut tape = Tape::new(vec![One], -2);
        tape.write(Zero);

        assert_eq!(tape.cells(), &[Zero, Blank, One]);
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn test_shift_directions() {
        let mut tape = Tape::new(vec![Zero, One], 1);

        tape.shift(Direction::Stay);
        assert_eq!(tape.head(), 1);
        tape.shift(Direction::Left);
        assert_eq!(tape.head(), 0);
        tape.shift(Direction::Right);
        tape.shift(Direction::Right);
        assert_eq!(tape.head(), 2);
    }

    #[test]
    fn test_tape_set_reads() {
        let set = TapeSet::new(vec![Tape::new(vec![One], 0), Tape::new(vec![Zero], 1)]);

        assert_eq!(set.count(), 2);
        assert_eq!(set.reads(), vec![One, Blank]);
    }

    #[test]
    #[should_panic(expected = "tape count")]
    fn test_tape_set_rejects_excess_tapes() {
        TapeSet::new(vec![Tape::blank(1, 0); 5]);
    }
}
