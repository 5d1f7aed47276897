use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use rox::ast_printer::AstPrinter;
use rox::interpreter::Interpreter;
use rox::parser::Parser;
use rox::scanner::Scanner;
use rox::{Lox, EXIT_RUNTIME_ERROR, EXIT_STATIC_ERROR};

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print tokens as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file as a single expression and prints its AST
    Parse {
        filename: PathBuf,

        /// Print the AST as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluates input from a file as a single expression and prints the result
    Evaluate { filename: PathBuf },

    /// Runs a Lox program from a file, or starts a prompt if no file is given
    Run { filename: Option<PathBuf> },
}

/// Reads the contents of a file into a String
fn read_file(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let bytes = reader
        .read_to_string(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

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
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn tokenize(filename: &Path, json: bool) -> Result<()> {
    let source = read_file(filename)?;
    let mut tokenized = true;

    for token in Scanner::new(&source) {
        match token {
            Ok(token) if json => println!("{}", serde_json::to_string(&token)?),
            Ok(token) => println!("{}", token),
            Err(e) => {
                tokenized = false;
                eprintln!("{}", e);
            }
        }
    }

    if !tokenized {
        debug!("Tokenization failed, exiting with code {}", EXIT_STATIC_ERROR);
        std::process::exit(EXIT_STATIC_ERROR);
    }

    Ok(())
}

fn parse(filename: &Path, json: bool) -> Result<()> {
    let source = read_file(filename)?;
    let (tokens, lex_errors) = Scanner::new(&source).scan_tokens();

    for e in &lex_errors {
        eprintln!("{}", e);
    }

    match Parser::new(tokens).parse_expression() {
        Ok(expr) if lex_errors.is_empty() => {
            if json {
                println!("{}", serde_json::to_string_pretty(&expr)?);
            } else {
                println!("{}", AstPrinter.print(&expr));
            }
            Ok(())
        }
        Ok(_) => std::process::exit(EXIT_STATIC_ERROR),
        Err(errors) => {
            for e in errors {
                eprintln!("{}", e);
            }
            std::process::exit(EXIT_STATIC_ERROR);
        }
    }
}

fn evaluate(filename: &Path) -> Result<()> {
    let source = read_file(filename)?;
    let (tokens, lex_errors) = Scanner::new(&source).scan_tokens();

    let expr = match Parser::new(tokens).parse_expression() {
        Ok(expr) if lex_errors.is_empty() => expr,
        result => {
            for e in lex_errors.iter().chain(result.err().iter().flatten()) {
                eprintln!("{}", e);
            }
            std::process::exit(EXIT_STATIC_ERROR);
        }
    };

    let mut interpreter = Interpreter::new();

    match interpreter.evaluate(&expr) {
        Ok(value) => {
            println!("{}", value);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_RUNTIME_ERROR);
        }
    }
}

fn run_file(filename: &Path) -> Result<()> {
    let source = read_file(filename)?;
    let mut lox = Lox::new();

    let report = lox.run(&source);

    for e in report.errors() {
        eprintln!("{}", e);
    }

    if let Some(code) = report.exit_code() {
        debug!("Run failed, exiting with code {}", code);
        std::process::exit(code);
    }

    Ok(())
}

fn run_prompt() -> Result<()> {
    info!("Starting prompt");

    let mut lox = Lox::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };

        // Errors are shown but never end the session.
        for e in lox.run(&line?).errors() {
            eprintln!("{}", e);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match &args.commands {
        Commands::Tokenize { filename, json } => tokenize(filename, *json),
        Commands::Parse { filename, json } => parse(filename, *json),
        Commands::Evaluate { filename } => evaluate(filename),
        Commands::Run { filename: Some(filename) } => run_file(filename),
        Commands::Run { filename: None } => run_prompt(),
    }
}
