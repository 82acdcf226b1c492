//! The four-tape exponentiation program.
//!
//! Exponentiation is built from the addition fragment alone: the outer loop
//! ripple-decrements the exponent; each pass copies the running result onto a
//! scratch tape (clearing the result), then ripple-decrements the scratch
//! copy, adding base A onto the result once per decrement. That inner pair is
//! "result *= A by repeated addition", so after the exponent is exhausted the
//! result tape holds `A^B`.
//!
//! A zero base short-circuits up front: the base scan either seeds the result
//! with 1 and enters the main loop, or hands over to an exponent scan that
//! fixes the result to 0 (positive exponent) or 1 (zero exponent, making
//! `0^0 = 1`).

use crate::encoder::encode;
use crate::machine::Program;
use crate::programs::bits::{add_digit, dec_digit, DecDigit};
use crate::tape::{Tape, TapeSet};
use crate::types::Direction::{Left, Right, Stay};
use crate::types::{MachineError, Rule, StateInfo, Symbol};

/// The exponentiation transition program.
///
/// Tape 1 holds base A, tape 2 the exponent B (consumed as a countdown),
/// tape 3 the scratch copy of the running result, tape 4 the running result
/// itself. Every tape carries a blank sentinel at cell 0.
pub struct Power;

/// Control states for [`Power`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// Scan the base for a set bit; all zeros means the base is 0.
    CheckZero,
    /// Rewind the base head, seed the result with 1, enter the main loop.
    CheckZeroBack,
    /// Base is 0: scan the exponent to pick the fixed result (0 or 1).
    CheckExpZero,
    /// Ripple-decrement the exponent, or halt if it is exhausted.
    DecExp,
    /// Rewind the exponent head after a decrement.
    DecExpBack,
    /// Move the running result onto the scratch tape, clearing the result.
    CopyResult,
    /// Rewind the scratch and result heads after the copy.
    CopyResultBack,
    /// Ripple-decrement the scratch copy, once per pending addition.
    DecCopy,
    /// Rewind the scratch head after a decrement.
    DecCopyBack,
    /// Scratch exhausted: rewind it and return to the exponent loop.
    EndCopyBack,
    /// Add loop over the base and the result, no pending carry.
    AddNoCarry,
    /// Add loop with a pending carry.
    AddCarry,
    /// Rewind the base and result heads after an addition.
    AddBack,
    Halt,
}

impl Program for Power {
    type State = PowerState;

    fn arity(&self) -> usize {
        4
    }

    fn initial_state(&self) -> PowerState {
        PowerState::CheckZero
    }

    fn halting_state(&self) -> PowerState {
        PowerState::Halt
    }

    fn output_tape(&self) -> usize {
        3
    }

    /// Pre-sizes every tape to `(A + 1) * (len(B) + 1)` cells, the original
    /// worst-case bound for `A^B`. The bound is generous for small operands
    /// and only shapes the rendered padding; tapes grow on demand, so an
    /// undersized pre-allocation can never corrupt a result.
    fn tapes(&self, a: u64, b: u64) -> TapeSet {
        let da = encode(a);
        let db = encode(b);
        let len = ((a as usize) + 1) * (db.len() + 1);

        TapeSet::new(vec![
            Tape::padded(&da, 1, len),
            Tape::padded(&db, 1, len),
            Tape::blank(len, 1),
            Tape::blank(len, 1),
        ])
    }

    fn transition(
        &self,
        state: PowerState,
        reads: &[Symbol],
    ) -> Result<Rule<PowerState>, MachineError> {
        let (a, e, c, r) = (reads[0], reads[1], reads[2], reads[3]);

        match state {
            PowerState::CheckZero => match a {
                Symbol::Zero => Ok(Rule::new(
                    PowerState::CheckZero,
                    vec![a, e, c, r],
                    vec![Right, Stay, Stay, Stay],
                )),
                Symbol::One => Ok(Rule::new(
                    PowerState::CheckZeroBack,
                    vec![a, e, c, r],
                    vec![Left, Stay, Stay, Stay],
                )),
                Symbol::Blank => Ok(Rule::new(
                    PowerState::CheckExpZero,
                    vec![a, e, c, r],
                    vec![Stay, Stay, Stay, Stay],
                )),
            },
            PowerState::CheckZeroBack => {
                if a == Symbol::Blank {
                    // Back on the sentinel: seed the result with 1 and start
                    // consuming the exponent.
                    Ok(Rule::new(
                        PowerState::DecExp,
                        vec![a, e, c, Symbol::One],
                        vec![Right, Stay, Stay, Stay],
                    ))
                } else {
                    Ok(Rule::new(
                        PowerState::CheckZeroBack,
                        vec![a, e, c, r],
                        vec![Left, Stay, Stay, Stay],
                    ))
                }
            }
            PowerState::CheckExpZero => match e {
                Symbol::Zero => Ok(Rule::new(
                    PowerState::CheckExpZero,
                    vec![a, e, c, r],
                    vec![Stay, Right, Stay, Stay],
                )),
                Symbol::One => Ok(Rule::new(
                    PowerState::Halt,
                    vec![a, e, c, Symbol::Zero],
                    vec![Stay, Stay, Stay, Stay],
                )),
                Symbol::Blank => Ok(Rule::new(
                    PowerState::Halt,
                    vec![a, e, c, Symbol::One],
                    vec![Stay, Stay, Stay, Stay],
                )),
            },
            PowerState::DecExp => match dec_digit(e) {
                DecDigit::Borrow => Ok(Rule::new(
                    PowerState::DecExp,
                    vec![a, Symbol::One, c, r],
                    vec![Stay, Right, Stay, Stay],
                )),
                DecDigit::Done => Ok(Rule::new(
                    PowerState::DecExpBack,
                    vec![a, Symbol::Zero, c, r],
                    vec![Stay, Left, Stay, Stay],
                )),
                DecDigit::Exhausted => Ok(Rule::new(
                    PowerState::Halt,
                    vec![a, e, c, r],
                    vec![Stay, Stay, Stay, Stay],
                )),
            },
            PowerState::DecExpBack => {
                if e == Symbol::Blank {
                    Ok(Rule::new(
                        PowerState::CopyResult,
                        vec![a, e, c, r],
                        vec![Stay, Right, Stay, Stay],
                    ))
                } else {
                    Ok(Rule::new(
                        PowerState::DecExpBack,
                        vec![a, e, c, r],
                        vec![Stay, Left, Stay, Stay],
                    ))
                }
            }
            PowerState::CopyResult => {
                if c == Symbol::Blank && r == Symbol::Blank {
                    Ok(Rule::new(
                        PowerState::CopyResultBack,
                        vec![a, e, c, r],
                        vec![Stay, Stay, Left, Left],
                    ))
                } else if r == Symbol::Blank {
                    // Stale scratch digit past the result's end: zero it so
                    // the copy's value is exactly the old result.
                    Ok(Rule::new(
                        PowerState::CopyResult,
                        vec![a, e, Symbol::Zero, r],
                        vec![Stay, Stay, Right, Right],
                    ))
                } else {
                    Ok(Rule::new(
                        PowerState::CopyResult,
                        vec![a, e, r, Symbol::Blank],
                        vec![Stay, Stay, Right, Right],
                    ))
                }
            }
            PowerState::CopyResultBack => {
                if c == Symbol::Blank {
                    Ok(Rule::new(
                        PowerState::DecCopy,
                        vec![a, e, c, r],
                        vec![Stay, Stay, Right, Right],
                    ))
                } else {
                    Ok(Rule::new(
                        PowerState::CopyResultBack,
                        vec![a, e, c, r],
                        vec![Stay, Stay, Left, Left],
                    ))
                }
            }
            PowerState::DecCopy => match dec_digit(c) {
                DecDigit::Borrow => Ok(Rule::new(
                    PowerState::DecCopy,
                    vec![a, e, Symbol::One, r],
                    vec![Stay, Stay, Right, Stay],
                )),
                DecDigit::Done => Ok(Rule::new(
                    PowerState::DecCopyBack,
                    vec![a, e, Symbol::Zero, r],
                    vec![Stay, Stay, Left, Stay],
                )),
                DecDigit::Exhausted => Ok(Rule::new(
                    PowerState::EndCopyBack,
                    vec![a, e, c, r],
                    vec![Stay, Stay, Left, Stay],
                )),
            },
            PowerState::DecCopyBack => {
                if c == Symbol::Blank {
                    Ok(Rule::new(
                        PowerState::AddNoCarry,
                        vec![a, e, c, r],
                        vec![Stay, Stay, Right, Stay],
                    ))
                } else {
                    Ok(Rule::new(
                        PowerState::DecCopyBack,
                        vec![a, e, c, r],
                        vec![Stay, Stay, Left, Stay],
                    ))
                }
            }
            PowerState::EndCopyBack => {
                if c == Symbol::Blank {
                    Ok(Rule::new(
                        PowerState::DecExp,
                        vec![a, e, c, r],
                        vec![Stay, Stay, Right, Stay],
                    ))
                } else {
                    Ok(Rule::new(
                        PowerState::EndCopyBack,
                        vec![a, e, c, r],
                        vec![Stay, Stay, Left, Stay],
                    ))
                }
            }
            PowerState::AddNoCarry | PowerState::AddCarry => {
                let carry = state == PowerState::AddCarry;

                if a == Symbol::Blank && r == Symbol::Blank {
                    let out = if carry { Symbol::One } else { Symbol::Blank };
                    Ok(Rule::new(
                        PowerState::AddBack,
                        vec![a, e, c, out],
                        vec![Left, Stay, Stay, Left],
                    ))
                } else {
                    let (digit, next) = add_digit(a, r, carry);
                    let next_state = if next {
                        PowerState::AddCarry
                    } else {
                        PowerState::AddNoCarry
                    };
                    Ok(Rule::new(
                        next_state,
                        vec![a, e, c, digit],
                        vec![Right, Stay, Stay, Right],
                    ))
                }
            }
            PowerState::AddBack => {
                if a == Symbol::Blank && r == Symbol::Blank {
                    Ok(Rule::new(
                        PowerState::DecCopy,
                        vec![a, e, c, r],
                        vec![Right, Stay, Stay, Right],
                    ))
                } else {
                    Ok(Rule::new(
                        PowerState::AddBack,
                        vec![a, e, c, r],
                        vec![Left, Stay, Stay, Left],
                    ))
                }
            }
            PowerState::Halt => Err(MachineError::undefined(self.describe(state), reads)),
        }
    }

    fn describe(&self, state: PowerState) -> StateInfo {
        match state {
            PowerState::CheckZero => StateInfo { id: 0, name: "check-zero" },
            PowerState::CheckZeroBack => StateInfo { id: 1, name: "check-zero-back" },
            PowerState::CheckExpZero => StateInfo { id: 2, name: "check-exp-zero" },
            PowerState::DecExp => StateInfo { id: 3, name: "dec-exp" },
            PowerState::DecExpBack => StateInfo { id: 4, name: "dec-exp-back" },
            PowerState::CopyResult => StateInfo { id: 5, name: "copy-result" },
            PowerState::CopyResultBack => StateInfo { id: 6, name: "copy-result-back" },
            PowerState::DecCopy => StateInfo { id: 7, name: "dec-copy" },
            PowerState::DecCopyBack => StateInfo { id: 8, name: "dec-copy-back" },
            PowerState::EndCopyBack => StateInfo { id: 9, name: "end-copy-back" },
            PowerState::AddNoCarry => StateInfo { id: 10, name: "add-no-carry" },
            PowerState::AddCarry => StateInfo { id: 11, name: "add-carry" },
            PowerState::AddBack => StateInfo { id: 12, name: "add-back" },
            PowerState::Halt => StateInfo { id: 13, name: "halt" },
        }
    }
}
