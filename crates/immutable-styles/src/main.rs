//! Immutable Styles - compile style trees into an override-free stylesheet
//!
//! Usage: immutable-styles build <input.json>... [-o <output.css>]

mod diagnostics;
mod loader;

use std::env;
use std::fs;
use std::process::ExitCode;

use log::info;

use immutable_styles_style::{Compiler, DiagnosticSink, StyleNode};

use diagnostics::LogSink;
use loader::{parse_document, read_document, LoadError};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Version,
    Build { inputs: Vec<String>, output: Option<String> },
    Check { inputs: Vec<String> },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("immutable-styles");

    let command = match parse_args(&args[1.min(args.len())..]) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(program);
            return ExitCode::FAILURE;
        }
    };

    let result = match command {
        Command::Help => {
            print_usage(program);
            Ok(())
        }
        Command::Version => {
            println!("Immutable Styles {}", VERSION);
            Ok(())
        }
        Command::Build { inputs, output } => run_build(&inputs, output.as_deref()),
        Command::Check { inputs } => run_check(&inputs),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some((command, rest)) = args.split_first() else {
        return Err("missing command".to_string());
    };

    match command.as_str() {
        "--help" | "-h" | "help" => Ok(Command::Help),
        "--version" | "-V" => Ok(Command::Version),
        "build" => {
            let mut inputs = Vec::new();
            let mut output = None;
            let mut rest = rest.iter();

            while let Some(arg) = rest.next() {
                match arg.as_str() {
                    "-o" | "--output" => match rest.next() {
                        Some(path) => output = Some(path.clone()),
                        None => return Err(format!("{} expects a file path", arg)),
                    },
                    flag if flag.starts_with('-') => return Err(format!("unknown option {}", flag)),
                    path => inputs.push(path.to_string()),
                }
            }

            if inputs.is_empty() {
                return Err("build expects at least one input file".to_string());
            }
            Ok(Command::Build { inputs, output })
        }
        "check" => {
            if let Some(flag) = rest.iter().find(|a| a.starts_with('-')) {
                return Err(format!("unknown option {}", flag));
            }
            if rest.is_empty() {
                return Err("check expects at least one input file".to_string());
            }
            Ok(Command::Check { inputs: rest.to_vec() })
        }
        other => Err(format!("unknown command {}", other)),
    }
}

fn print_usage(program: &str) {
    println!(
        r#"Immutable Styles {} - A CSS compiler that forbids overrides

USAGE:
    {} <COMMAND> [OPTIONS]

COMMANDS:
    build <FILE>...        Compile style documents into a stylesheet
    check <FILE>...        Validate style documents without writing CSS

OPTIONS:
    -o, --output <FILE>    Write the stylesheet to FILE instead of stdout
    -h, --help             Print this help message
    -V, --version          Print version information

EXAMPLES:
    {} build styles/layout.json styles/buttons.json -o site.css
    {} check styles/*.json
    RUST_LOG=debug {} build styles/layout.json
"#,
        VERSION, program, program, program, program
    );
}

/// Compile every input into one stylesheet
fn compile_inputs(inputs: &[String]) -> Result<String, String> {
    let mut compiler = Compiler::with_sink(LogSink::new());
    let mut forest: Vec<StyleNode> = Vec::new();

    for path in inputs {
        let text = read_document(path).map_err(|e| e.to_string())?;
        compiler.sink_mut().source_maps.insert(path.as_str(), text.as_str());

        match parse_document(&text, path) {
            Ok(trees) => {
                info!("Loaded {} trees from {}", trees.len(), path);
                forest.extend(trees);
            }
            Err(LoadError::Style(e)) => {
                compiler.sink_mut().report(&e);
                return Err(format!("{} failed to load", path));
            }
            Err(e) => return Err(e.to_string()),
        }
    }

    compiler
        .compile(&forest)
        .map_err(|e| format!("compilation failed ({:?})", e.kind()))
}

fn run_build(inputs: &[String], output: Option<&str>) -> Result<(), String> {
    let css = compile_inputs(inputs)?;

    match output {
        Some(path) => {
            fs::write(path, &css).map_err(|e| format!("Failed to write {}: {}", path, e))?;
            info!("Wrote {} bytes to {}", css.len(), path);
        }
        None => print!("{}", css),
    }

    Ok(())
}

fn run_check(inputs: &[String]) -> Result<(), String> {
    compile_inputs(inputs)?;
    info!("{} files checked, no overrides found", inputs.len());
    Ok(())
}
