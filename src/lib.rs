//! This crate simulates binary arithmetic as executions of explicit
//! multi-tape Turing machines. Each operation (addition, subtraction,
//! multiplication, exponentiation) is a hand-built transition program; the
//! `Machine` executor drives a program over its tapes step by step, emitting
//! a trace event per configuration and decoding the output tape at halt.

pub mod encoder;
pub mod machine;
pub mod programs;
pub mod tape;
pub mod types;

/// Re-exports the encoding functions from the encoder module.
pub use encoder::{decode, encode};
/// Re-exports the executor, the transition-program seam, and the trace sink.
pub use machine::{Machine, NullTrace, Program, Run, TraceSink};
/// Re-exports the four arithmetic transition programs.
pub use programs::{Power, Product, Sum};
/// Re-exports the tape containers.
pub use tape::{Tape, TapeSet};
/// Re-exports the shared data model for machine definition and tracing.
pub use types::{
    Direction, MachineError, Rule, StateInfo, Step, Symbol, TapeSnapshot, TraceEvent, MAX_TAPES,
};
