use clap::error::ErrorKind;
use clap::Parser;
use std::process;
use tapearith::{Machine, MachineError, Power, Product, Program, Sum};

mod trace;

use trace::ConsoleTrace;

const USAGE: &str = "Usage: tapearith-cli (-add|-sub|-mult|-exp) <x> <y>";

/// Simulates one arithmetic operation as a multi-tape Turing machine run,
/// printing every configuration and the decoded result.
#[derive(Parser)]
#[clap(name = "tapearith-cli", version, about, long_about = None)]
struct Cli {
    /// The operation to simulate: -add, -sub, -mult or -exp
    #[clap(allow_hyphen_values = true)]
    operation: String,

    /// First operand, a non-negative decimal integer
    x: u64,

    /// Second operand, a non-negative decimal integer
    y: u64,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return;
        }
        Err(_) => {
            println!("{USAGE}");
            process::exit(1);
        }
    };

    let outcome = match cli.operation.as_str() {
        "-add" => execute(Sum::adder(), cli.x, cli.y),
        "-sub" => execute(Sum::subtractor(), cli.x, cli.y),
        "-mult" => execute(Product, cli.x, cli.y),
        "-exp" => execute(Power, cli.x, cli.y),
        _ => {
            println!("{USAGE}");
            process::exit(1);
        }
    };

    // A fault here marks a defect in a transition program, never bad input.
    if let Err(err) = outcome {
        eprintln!("machine fault: {err}");
        process::exit(1);
    }
}

fn execute<P: Program>(program: P, x: u64, y: u64) -> Result<(), MachineError> {
    Machine::new(program, x, y).run(&mut ConsoleTrace)?;
    Ok(())
}
