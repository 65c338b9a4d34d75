//! ZhiDai Tape Language - CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use zhidai::repl::REPL;
use zhidai::util::logger;
use zhidai::vm::{InputMode, VMConfig, DEFAULT_TAPE_SIZE};
use zhidai::{run_program, NAME, VERSION};

/// A minimal eight-instruction tape language interpreter
#[derive(Parser, Debug)]
#[command(name = "zhidai")]
#[command(author = "YaoXiang Team")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of cells on the tape
    #[arg(long, default_value_t = DEFAULT_TAPE_SIZE)]
    tape_size: usize,

    /// Log every executed instruction (implies --verbose)
    #[arg(long)]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a ZhiDai source file
    Run {
        /// Source file to run
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Evaluate ZhiDai code from command line
    Eval {
        /// Code to evaluate
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose || args.trace {
        logger::init_debug();
    } else {
        logger::init_cli();
    }

    if args.verbose {
        eprintln!("{} version: {}", NAME, VERSION);
        eprintln!("Host: {}", std::env::consts::OS);
    }

    let config = VMConfig {
        tape_size: args.tape_size,
        trace_execution: args.trace,
    };

    match args.command {
        Some(Commands::Run { file }) => {
            let source = std::fs::read(&file)
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            run_program(&source, InputMode::Interactive, config)
                .with_context(|| format!("Failed to run: {}", file.display()))?;
        }
        Some(Commands::Eval { code }) => {
            run_program(code.as_bytes(), InputMode::Interactive, config)
                .context("Failed to evaluate code")?;
        }
        Some(Commands::Version) => {
            println!("{} {}", NAME, VERSION);
        }
        None => {
            if io::stdin().is_terminal() {
                // Interactive session
                REPL::new(config)?.run()?;
            } else {
                // Program text arrives through the pipe; once drained, the
                // stream can serve no further `,` reads
                let mut source = Vec::new();
                io::stdin()
                    .read_to_end(&mut source)
                    .context("Failed to read program from stdin")?;
                run_program(&source, InputMode::Piped, config)
                    .context("Failed to run piped program")?;
            }
        }
    }

    Ok(())
}
