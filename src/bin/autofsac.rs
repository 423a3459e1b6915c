//! Non-interactive entry point for the compilation pipeline: takes a regex
//! and an output directory, runs it through the whole pipeline, and writes
//! the rendered snapshots to disk.
//!
//! Usage: `autofsac <regex> <output-directory>`

use autofsa::draw;
use autofsa::regex::{regex_to_nfa, regex_to_postfix};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Compiles a regex to an NFA, DFA and minimal DFA, and renders BFS-wave
/// snapshots of each into an output directory.
#[derive(Debug, Parser)]
#[command(name = "autofsac", version, about)]
struct Args {
    /// The regex to compile, e.g. `(a|b)*c`.
    regex: String,

    /// Directory the rendered `.dot` snapshots are written into.
    output_directory: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = run(&args.regex, &args.output_directory) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(regex: &str, out_dir: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let nfa_dir = out_dir.join("nfa");
    let dfa_dir = out_dir.join("dfa");
    let min_dir = out_dir.join("dfa_min");
    fs::create_dir_all(&nfa_dir)?;
    fs::create_dir_all(&dfa_dir)?;
    fs::create_dir_all(&min_dir)?;

    let postfix = regex_to_postfix(regex)?;
    println!("postfix: {postfix}");

    let mut nfa = regex_to_nfa(regex)?;
    nfa.normalize();
    let nfa_images = draw::draw_nfa(&nfa, &nfa_dir)?;
    println!("nfa: {} state(s)", nfa.states().len());
    for path in &nfa_images {
        println!("  wrote {}", path.display());
    }

    let mut dfa = nfa.to_dfa();
    let dfa_images = draw::draw_dfa(&dfa, &dfa_dir)?;
    println!("dfa: {} state(s)", dfa.states().len());
    for path in &dfa_images {
        println!("  wrote {}", path.display());
    }

    dfa.minimize();
    let min_images = draw::draw_dfa(&dfa, &min_dir)?;
    println!("minimal dfa: {} state(s)", dfa.states().len());
    for path in &min_images {
        println!("  wrote {}", path.display());
    }

    Ok(())
}
