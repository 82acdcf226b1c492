//! This module defines the `Machine` executor, which drives a transition
//! program over a tape set from its initial state to its halting state,
//! emitting one trace event per configuration.

use crate::encoder;
use crate::tape::TapeSet;
use crate::types::{MachineError, Rule, StateInfo, Step, Symbol, TapeSnapshot, TraceEvent};

/// A hand-built transition program: a pure mapping from (state, read-tuple)
/// to (next state, write tuple, move tuple), plus the machine geometry it
/// expects.
///
/// Programs are stateless and reusable across runs; all per-run state lives
/// in the `Machine`. Each program declares a closed state enum, so the set of
/// control states is checked exhaustively at compile time, and a reachable
/// (state, read-tuple) pair without a rule can only mean an authoring bug.
pub trait Program {
    /// The closed set of control states for this program.
    type State: Copy + Eq + std::fmt::Debug;

    /// The number of tapes this program drives.
    fn arity(&self) -> usize;

    /// The state a run starts in.
    fn initial_state(&self) -> Self::State;

    /// The single state that stops the run.
    fn halting_state(&self) -> Self::State;

    /// The index of the tape holding the result at halt.
    fn output_tape(&self) -> usize;

    /// Lays out the initial tapes for operands `a` and `b`, pre-sized to the
    /// operation's worst-case working length.
    fn tapes(&self, a: u64, b: u64) -> TapeSet;

    /// The transition function. Returns an error only for a (state,
    /// read-tuple) pair with no rule, which marks a defect in the program
    /// itself, never bad input.
    fn transition(&self, state: Self::State, reads: &[Symbol])
        -> Result<Rule<Self::State>, MachineError>;

    /// The numeric id and name of `state` for tracing.
    fn describe(&self, state: Self::State) -> StateInfo;
}

/// Consumes trace events as the executor emits them.
///
/// Sinks render or record configurations; the executor never buffers events
/// and a sink write is the only callback inside a run.
pub trait TraceSink {
    fn emit(&mut self, event: &TraceEvent);
}

/// A sink that discards every event.
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn emit(&mut self, _event: &TraceEvent) {}
}

/// The summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// The decoded value of the output tape.
    pub value: u64,
    /// The number of transitions applied.
    pub steps: usize,
    /// The output tape at halt.
    pub tape: TapeSnapshot,
}

/// Drives one transition program over one tape set.
///
/// A machine owns its tapes exclusively for the lifetime of a run; nothing is
/// shared between runs, and every step applies all writes and all head moves
/// before the next read.
pub struct Machine<P: Program> {
    program: P,
    state: P::State,
    tapes: TapeSet,
    steps: usize,
}

impl<P: Program> Machine<P> {
    /// Creates a machine for `program` with tapes laid out for the operands.
    ///
    /// # Panics
    ///
    /// Panics if the program's tape layout disagrees with its declared arity;
    /// both come from the same author, so a mismatch is a defect.
    pub fn new(program: P, a: u64, b: u64) -> Self {
        let tapes = program.tapes(a, b);
        assert_eq!(
            tapes.count(),
            program.arity(),
            "program declares {} tapes but laid out {}",
            program.arity(),
            tapes.count()
        );

        Self {
            state: program.initial_state(),
            tapes,
            program,
            steps: 0,
        }
    }

    /// Returns true once the machine has reached its halting state.
    pub fn is_halted(&self) -> bool {
        self.state == self.program.halting_state()
    }

    /// Returns the number of transitions applied so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the current tapes.
    pub fn tapes(&self) -> &TapeSet {
        &self.tapes
    }

    /// Executes a single transition: read every head, look up the rule,
    /// apply all writes, then all head moves, then the state change, and
    /// emit the resulting configuration to `sink`.
    pub fn step(&mut self, sink: &mut dyn TraceSink) -> Result<Step, MachineError> {
        if self.is_halted() {
            return Ok(Step::Halted);
        }

        let reads = self.tapes.reads();
        let rule = self.program.transition(self.state, &reads)?;

        let arity = self.tapes.count();
        if rule.writes.len() != arity || rule.moves.len() != arity {
            return Err(MachineError::ArityMismatch {
                state: self.program.describe(self.state).name.to_string(),
                expected: arity,
                found: rule.writes.len().max(rule.moves.len()),
            });
        }

        // Writes land before any head moves, for every tape.
        for (i, &symbol) in rule.writes.iter().enumerate() {
            self.tapes.write(i, symbol);
        }
        for (i, &direction) in rule.moves.iter().enumerate() {
            self.tapes.shift(i, direction);
        }

        let from = self.program.describe(self.state);
        self.state = rule.next;
        self.steps += 1;

        sink.emit(&TraceEvent::Step {
            from,
            read: reads,
            to: self.program.describe(self.state),
            written: rule.writes,
            moves: rule.moves,
            tapes: self.tapes.snapshot(),
        });

        Ok(Step::Continue)
    }

    /// Runs the machine to its halting state, emitting the initial
    /// configuration first and the decoded result last.
    ///
    /// There is no step cap: every program terminates by construction (each
    /// of its loops strictly shrinks a finite binary counter), and a cap
    /// would reject valid long-running computations.
    pub fn run(&mut self, sink: &mut dyn TraceSink) -> Result<Run, MachineError> {
        sink.emit(&TraceEvent::Initial {
            state: self.program.describe(self.state),
            tapes: self.tapes.snapshot(),
        });

        while !self.is_halted() {
            self.step(sink)?;
        }

        let tape = self.tapes.tapes()[self.program.output_tape()].snapshot();
        let value = encoder::decode(&tape.cells);
        sink.emit(&TraceEvent::Result {
            tape: tape.clone(),
            value,
        });

        Ok(Run {
            value,
            steps: self.steps,
            tape,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::Tape;
    use crate::types::Direction;
    use crate::types::Symbol::{Blank, One, Zero};

    /// Counts events by kind.
    #[derive(Default)]
    struct RecordingTrace {
        initial: usize,
        steps: usize,
        results: usize,
    }

    impl TraceSink for RecordingTrace {
        fn emit(&mut self, event: &TraceEvent) {
            match event {
                TraceEvent::Initial { .. } => self.initial += 1,
                TraceEvent::Step { .. } => self.steps += 1,
                TraceEvent::Result { .. } => self.results += 1,
            }
        }
    }

    /// A two-tape program that copies tape 1 onto tape 2 until the first
    /// blank, then halts. Small enough to check every configuration.
    struct Copier;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum CopierState {
        Scan,
        Halt,
    }

    impl Program for Copier {
        type State = CopierState;

        fn arity(&self) -> usize {
            2
        }

        fn initial_state(&self) -> CopierState {
            CopierState::Scan
        }

        fn halting_state(&self) -> CopierState {
            CopierState::Halt
        }

        fn output_tape(&self) -> usize {
            1
        }

        fn tapes(&self, a: u64, _b: u64) -> TapeSet {
            let digits = crate::encoder::encode(a);
            let len = digits.len() + 1;
            TapeSet::new(vec![Tape::padded(&digits, 0, len), Tape::blank(len, 0)])
        }

        fn transition(
            &self,
            state: CopierState,
            reads: &[Symbol],
        ) -> Result<Rule<CopierState>, MachineError> {
            match state {
                CopierState::Scan => {
                    let source = reads[0];
                    if source == Blank {
                        Ok(Rule::new(
                            CopierState::Halt,
                            vec![Blank, Blank],
                            vec![Direction::Stay, Direction::Stay],
                        ))
                    } else {
                        Ok(Rule::new(
                            CopierState::Scan,
                            vec![source, source],
                            vec![Direction::Right, Direction::Right],
                        ))
                    }
                }
                CopierState::Halt => Err(MachineError::undefined(self.describe(state), reads)),
            }
        }

        fn describe(&self, state: CopierState) -> StateInfo {
            match state {
                CopierState::Scan => StateInfo { id: 0, name: "scan" },
                CopierState::Halt => StateInfo { id: 1, name: "halt" },
            }
        }
    }

    #[test]
    fn test_machine_runs_to_halt() {
        let mut sink = RecordingTrace::default();
        let run = Machine::new(Copier, 5, 0).run(&mut sink).unwrap();

        assert_eq!(run.value, 5);
        // three digit copies plus the halting transition
        assert_eq!(run.steps, 4);
        assert_eq!(run.tape.cells, vec![One, Zero, One, Blank]);
    }

    #[test]
    fn test_trace_event_counts() {
        let mut sink = RecordingTrace::default();
        let run = Machine::new(Copier, 6, 0).run(&mut sink).unwrap();

        assert_eq!(sink.initial, 1);
        assert_eq!(sink.results, 1);
        assert_eq!(sink.steps, run.steps);
    }

    #[test]
    fn test_step_applies_write_before_move() {
        let mut machine = Machine::new(Copier, 1, 0);
        let result = machine.step(&mut NullTrace).unwrap();

        assert_eq!(result, Step::Continue);
        // the digit landed at cell 0, the heads moved on afterwards
        assert_eq!(machine.tapes().tapes()[1].cells()[0], One);
        assert_eq!(machine.tapes().tapes()[1].head(), 1);
    }

    #[test]
    fn test_step_on_halted_machine_is_noop() {
        let mut machine = Machine::new(Copier, 1, 0);
        machine.run(&mut NullTrace).unwrap();

        assert_eq!(machine.step(&mut NullTrace), Ok(Step::Halted));
    }

    /// A program whose rule drives fewer tapes than it declares.
    struct Lopsided;

    impl Program for Lopsided {
        type State = CopierState;

        fn arity(&self) -> usize {
            2
        }

        fn initial_state(&self) -> CopierState {
            CopierState::Scan
        }

        fn halting_state(&self) -> CopierState {
            CopierState::Halt
        }

        fn output_tape(&self) -> usize {
            0
        }

        fn tapes(&self, _a: u64, _b: u64) -> TapeSet {
            TapeSet::new(vec![Tape::blank(1, 0), Tape::blank(1, 0)])
        }

        fn transition(
            &self,
            _state: CopierState,
            _reads: &[Symbol],
        ) -> Result<Rule<CopierState>, MachineError> {
            Ok(Rule::new(CopierState::Halt, vec![Zero], vec![Direction::Stay]))
        }

        fn describe(&self, state: CopierState) -> StateInfo {
            match state {
                CopierState::Scan => StateInfo { id: 0, name: "scan" },
                CopierState::Halt => StateInfo { id: 1, name: "halt" },
            }
        }
    }

    #[test]
    fn test_arity_mismatch_is_fatal() {
        let mut machine = Machine::new(Lopsided, 0, 0);

        match machine.step(&mut NullTrace) {
            Err(MachineError::ArityMismatch {
                expected, found, ..
            }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected an arity fault, got {:?}", other),
        }
    }
}
