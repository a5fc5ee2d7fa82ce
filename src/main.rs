use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use rox::ast::Stmt;
use rox::ast_printer::AstPrinter;
use rox::error::ErrorSink;
use rox::runner::{parse_source, repl, Lox, Status};
use rox::scanner::Scanner;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    /// Script to run; starts an interactive prompt when omitted
    scripts: Vec<PathBuf>,

    /// Enable logging to rox.log
    #[arg(long)]
    log: bool,

    /// Print the token stream of the script instead of running it
    #[arg(long, requires = "scripts")]
    tokens: bool,

    /// Print tokens as JSON objects, one per line
    #[arg(long, requires = "tokens")]
    json: bool,

    /// Print every expression statement in prefix form instead of running
    #[arg(long, requires = "scripts", conflicts_with = "tokens")]
    print_ast: bool,
}

/// Map the script into memory and validate it as UTF‑8.
fn read_source(path: &Path) -> Result<String> {
    info!("Reading file: {:?}", path);

    let file = File::open(path).with_context(|| format!("Failed to open file {:?}", path))?;

    // SAFETY: the map is read once, copied out, and dropped before anything
    // else could observe a concurrent modification of the file.
    let map = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to read file {:?}", path))?;

    let source = std::str::from_utf8(&map)
        .with_context(|| format!("Could not decode file {:?}", path))?
        .to_owned();

    info!("Read {} bytes from {:?}", source.len(), path);

    Ok(source)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("rox.log").context("Failed to create rox.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("rox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized, writing to rox.log");
    Ok(())
}

fn report(sink: &mut ErrorSink) {
    for error in sink.drain() {
        eprintln!("{}", error);
    }
}

fn tokenize(source: &str, json: bool) -> Result<i32> {
    let mut sink = ErrorSink::new();
    let tokens = Scanner::new(source).scan_tokens(&mut sink);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for token in &tokens {
        if json {
            writeln!(out, "{}", serde_json::to_string(token)?)?;
        } else {
            writeln!(out, "{}", token)?;
        }
    }

    let failed = sink.had_error();
    report(&mut sink);

    Ok(if failed { Status::StaticError.exit_code() } else { 0 })
}

fn print_ast(source: &str) -> i32 {
    let mut sink = ErrorSink::new();
    let statements = parse_source(source, &mut sink);

    if sink.had_error() {
        report(&mut sink);
        return Status::StaticError.exit_code();
    }

    for stmt in &statements {
        match stmt {
            Stmt::Expression(expr) | Stmt::Print(expr) => println!("{}", AstPrinter::print(expr)),
            other => debug!("Skipping non-expression statement: {:?}", other),
        }
    }

    0
}

fn run_file(source: &str) -> i32 {
    let mut lox = Lox::new();
    let status = lox.run(source);

    report(lox.sink_mut());

    info!("Script finished with {:?}", status);

    status.exit_code()
}

fn run_prompt() -> Result<()> {
    let mut lox = Lox::new();

    repl(&mut lox, io::stdin().lock(), io::stdout(), io::stderr())
        .context("Failed to read input")
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        Builder::new().filter_level(log::LevelFilter::Off).init();
    }

    info!("CLI arguments: {:?}", args);

    if args.scripts.len() > 1 {
        eprintln!("Usage: rox [script]");
        process::exit(64);
    }

    match args.scripts.first() {
        Some(path) => {
            let source = match read_source(path) {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    process::exit(66);
                }
            };

            let code = if args.tokens {
                tokenize(&source, args.json)?
            } else if args.print_ast {
                print_ast(&source)
            } else {
                run_file(&source)
            };

            if code != 0 {
                process::exit(code);
            }
        }

        None => run_prompt()?,
    }

    Ok(())
}
