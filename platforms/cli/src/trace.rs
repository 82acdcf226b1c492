//! Console rendering of trace events: one block per configuration, the head
//! cell bracketed in place, and a `[ ]` marker when a head sits at a virtual
//! boundary of its tape.

use tapearith::{Direction, Symbol, TapeSnapshot, TraceEvent, TraceSink};

/// A sink that prints every event to standard output as it arrives.
pub struct ConsoleTrace;

impl TraceSink for ConsoleTrace {
    fn emit(&mut self, event: &TraceEvent) {
        print!("{}", render(event));
    }
}

/// Renders one event as its trace block.
pub fn render(event: &TraceEvent) -> String {
    match event {
        TraceEvent::Initial { state, tapes } => {
            format!("INITIAL CONFIGURATION\nState {}\n{}", state, tape_lines(tapes))
        }
        TraceEvent::Step {
            from,
            read,
            to,
            written,
            moves,
            tapes,
        } => {
            format!(
                "TRANSITION\nState {}, ({}) ==> State {}, ({}), ({})\n{}\n",
                from,
                symbol_tuple(read),
                to,
                symbol_tuple(written),
                move_tuple(moves),
                tape_lines(tapes),
            )
        }
        TraceEvent::Result { tape, value } => {
            format!("RESULT\nTape: {}\nResult: {}\n", tape.contents(), value)
        }
    }
}

/// Renders a tape with its head position marked: `01[1]0` inside the
/// materialized cells, `[ ]010` / `010[ ]` at a virtual boundary.
fn mark_head(tape: &TapeSnapshot) -> String {
    let contents = tape.contents();

    if tape.head < 0 {
        format!("[ ]{}", contents)
    } else if tape.head >= tape.cells.len() as isize {
        format!("{}[ ]", contents)
    } else {
        let mut out = String::with_capacity(contents.len() + 2);
        for (i, c) in contents.chars().enumerate() {
            if i as isize == tape.head {
                out.push('[');
                out.push(c);
                out.push(']');
            } else {
                out.push(c);
            }
        }
        out
    }
}

fn tape_lines(tapes: &[TapeSnapshot]) -> String {
    tapes
        .iter()
        .enumerate()
        .map(|(i, tape)| format!("Tape {}: {}\n", i + 1, mark_head(tape)))
        .collect()
}

fn symbol_tuple(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(|s| s.as_char().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn move_tuple(moves: &[Direction]) -> String {
    moves
        .iter()
        .map(|m| m.as_char().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
