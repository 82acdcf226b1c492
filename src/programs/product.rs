//! The three-tape multiplication program.
//!
//! The outer loop ripple-decrements operand A; each pass accumulates operand
//! B onto the product tape with the shared add fragment, B-head and
//! product-head walking in lockstep, then backtracks both to the sentinel
//! before the next decrement. When the decrement finds A exhausted the
//! product tape holds `A * B`.

use crate::encoder::encode;
use crate::machine::Program;
use crate::programs::bits::{add_digit, dec_digit, DecDigit};
use crate::tape::{Tape, TapeSet};
use crate::types::Direction::{Left, Right, Stay};
use crate::types::{MachineError, Rule, StateInfo, Symbol};

/// The multiplication transition program.
///
/// Tape 1 holds operand A (consumed as a countdown), tape 2 holds operand B,
/// tape 3 accumulates the product. Every tape carries a blank sentinel at
/// cell 0; the backtracking states stop on it.
pub struct Product;

/// Control states for [`Product`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductState {
    /// Ripple-decrement A, or halt if A is exhausted.
    DecA,
    /// Rewind the A head to the sentinel after a decrement.
    DecABack,
    /// Add loop over B and the product, no pending carry.
    AddNoCarry,
    /// Add loop with a pending carry.
    AddCarry,
    /// Rewind the B and product heads after an addition.
    AddBack,
    Halt,
}

impl Program for Product {
    type State = ProductState;

    fn arity(&self) -> usize {
        3
    }

    fn initial_state(&self) -> ProductState {
        ProductState::DecA
    }

    fn halting_state(&self) -> ProductState {
        ProductState::Halt
    }

    fn output_tape(&self) -> usize {
        2
    }

    /// All tapes are `len(A) * len(B) + 2` cells: room for the full product
    /// plus the sentinel and one carry cell. Heads start on cell 1, just past
    /// the sentinel.
    fn tapes(&self, a: u64, b: u64) -> TapeSet {
        let da = encode(a);
        let db = encode(b);
        let len = da.len() * db.len() + 2;

        TapeSet::new(vec![
            Tape::padded(&da, 1, len),
            Tape::padded(&db, 1, len),
            Tape::blank(len, 1),
        ])
    }

    fn transition(
        &self,
        state: ProductState,
        reads: &[Symbol],
    ) -> Result<Rule<ProductState>, MachineError> {
        let (a, b, p) = (reads[0], reads[1], reads[2]);

        match state {
            ProductState::DecA => {
                if p == Symbol::Blank {
                    // Seed the product cell so a zero A still leaves a digit
                    // to decode.
                    Ok(Rule::new(
                        ProductState::DecA,
                        vec![a, b, Symbol::Zero],
                        vec![Stay, Stay, Stay],
                    ))
                } else {
                    match dec_digit(a) {
                        DecDigit::Borrow => Ok(Rule::new(
                            ProductState::DecA,
                            vec![Symbol::One, b, p],
                            vec![Right, Stay, Stay],
                        )),
                        DecDigit::Done => Ok(Rule::new(
                            ProductState::DecABack,
                            vec![Symbol::Zero, b, p],
                            vec![Left, Stay, Stay],
                        )),
                        DecDigit::Exhausted => Ok(Rule::new(
                            ProductState::Halt,
                            vec![a, b, p],
                            vec![Stay, Stay, Stay],
                        )),
                    }
                }
            }
            ProductState::DecABack => {
                if a == Symbol::Blank {
                    Ok(Rule::new(
                        ProductState::AddNoCarry,
                        vec![a, b, p],
                        vec![Right, Stay, Stay],
                    ))
                } else {
                    Ok(Rule::new(
                        ProductState::DecABack,
                        vec![a, b, p],
                        vec![Left, Stay, Stay],
                    ))
                }
            }
            ProductState::AddNoCarry | ProductState::AddCarry => {
                let carry = state == ProductState::AddCarry;

                if b == Symbol::Blank && p == Symbol::Blank {
                    let out = if carry { Symbol::One } else { Symbol::Blank };
                    Ok(Rule::new(
                        ProductState::AddBack,
                        vec![a, b, out],
                        vec![Stay, Left, Left],
                    ))
                } else {
                    let (digit, next) = add_digit(b, p, carry);
                    let next_state = if next {
                        ProductState::AddCarry
                    } else {
                        ProductState::AddNoCarry
                    };
                    Ok(Rule::new(
                        next_state,
                        vec![a, b, digit],
                        vec![Stay, Right, Right],
                    ))
                }
            }
            ProductState::AddBack => {
                if b == Symbol::Blank && p == Symbol::Blank {
                    Ok(Rule::new(
                        ProductState::DecA,
                        vec![a, b, p],
                        vec![Stay, Right, Right],
                    ))
                } else {
                    Ok(Rule::new(
                        ProductState::AddBack,
                        vec![a, b, p],
                        vec![Stay, Left, Left],
                    ))
                }
            }
            ProductState::Halt => Err(MachineError::undefined(self.describe(state), reads)),
        }
    }

    fn describe(&self, state: ProductState) -> StateInfo {
        match state {
            ProductState::DecA => StateInfo { id: 0, name: "dec-a" },
            ProductState::DecABack => StateInfo { id: 1, name: "dec-a-back" },
            ProductState::AddNoCarry => StateInfo { id: 2, name: "add-no-carry" },
            ProductState::AddCarry => StateInfo { id: 3, name: "add-carry" },
            ProductState::AddBack => StateInfo { id: 4, name: "add-back" },
            ProductState::Halt => StateInfo { id: 5, name: "halt" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{Machine, NullTrace};

    fn mult(a: u64, b: u64) -> u64 {
        Machine::new(Product, a, b).run(&mut NullTrace).unwrap().value
    }

    #[test]
    fn test_multiplication() {
        assert_eq!(mult(3, 4), 12);
        assert_eq!(mult(4, 3), 12);
        assert_eq!(mult(1, 1), 1);
        assert_eq!(mult(6, 7), 42);
        assert_eq!(mult(13, 11), 143);
    }

    #[test]
    fn test_multiplication_by_zero() {
        assert_eq!(mult(0, 5), 0);
        assert_eq!(mult(5, 0), 0);
        assert_eq!(mult(0, 0), 0);
    }

    #[test]
    fn test_multiplication_by_one_keeps_the_operand() {
        assert_eq!(mult(1, 9), 9);
        assert_eq!(mult(9, 1), 9);
    }

    #[test]
    fn test_heads_return_to_the_sentinel_between_passes() {
        // After a full run every head sits where a backtrack left it; the
        // sentinel cell itself must still be blank on all tapes.
        let mut machine = Machine::new(Product, 3, 3);
        machine.run(&mut NullTrace).unwrap();

        for tape in machine.tapes().tapes() {
            assert_eq!(tape.cells()[0], Symbol::Blank);
        }
    }
}
