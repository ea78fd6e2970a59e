use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use spartie::ast::Ast;
use spartie::interpreter::Interpreter;
use spartie::parser::Parser;
use spartie::scanner::Scanner;
use spartie::token::Token;

#[derive(ClapParser, Debug)]
#[command(version, about = "Spartie language interpreter", long_about = None)]
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
        filename: Option<PathBuf>,

        /// Emit the token stream as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file as a single expression and prints its AST
    Parse { filename: Option<PathBuf> },

    /// Evaluates input from a file as a single expression and prints the result
    Evaluate { filename: Option<PathBuf> },

    /// Runs input from a file as a Spartie program
    Run { filename: Option<PathBuf> },
}

/// Reads the contents of a file into a Vec<u8>
fn read_file(filename: PathBuf) -> Result<Vec<u8>> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    // The scanner slices lexemes without re-checking encoding, so reject
    // non-UTF-8 input here, once.
    std::str::from_utf8(&buf).context(format!("File {:?} is not valid UTF-8", filename))?;

    Ok(buf)
}

/// Scans the whole buffer up front, printing lex errors to stderr.  Returns
/// `None` when any error occurred so callers can exit with the lex status.
fn scan_all(buf: &[u8]) -> Option<Vec<Token<'_>>> {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut scanned = true;

    for result in Scanner::new(buf) {
        match result {
            Ok(token) => {
                debug!("Scanned token: {}", token);

                tokens.push(token);
            }

            Err(e) => {
                scanned = false;

                debug!("Tokenization debug: {}", e);

                eprintln!("{}", e);
            }
        }
    }

    scanned.then_some(tokens)
}

fn init_logger() -> Result<()> {
    // Create or open the log file
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    // Configure env_logger to write to file with a timestamp and source line
    Builder::new()
        .format(|buf, record| {
            // Strip 'spartie::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("spartie::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{} {}:{}] - {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename, json } => match filename {
            Some(filename) => {
                info!("Running Tokenize subcommand");
                let buf = read_file(filename)?;

                let Some(tokens) = scan_all(&buf) else {
                    debug!("Tokenization failed, exiting with code 65");

                    std::process::exit(65);
                };

                if json {
                    let dump =
                        serde_json::to_string_pretty(&tokens).context("Failed to encode tokens")?;

                    println!("{}", dump);
                } else {
                    for token in &tokens {
                        println!("{}", token);
                    }
                }

                info!("Tokenization completed successfully");
            }
            None => {
                info!("No filepath provided for Tokenize");

                println!("No input filepath was provided. Exiting...");

                std::process::exit(0);
            }
        },

        Commands::Parse { filename } => match filename {
            Some(filename) => {
                info!("Running Parse subcommand");
                let buf = read_file(filename)?;

                let Some(tokens) = scan_all(&buf) else {
                    std::process::exit(65);
                };

                let mut parser = Parser::new(&tokens);

                match parser.parse_expression() {
                    Ok(expr) => {
                        info!("Expression parsed successfully");
                        let printer = Ast;
                        let ast_str = printer.print(&expr);

                        debug!("AST: {}", ast_str);
                        println!("{}", ast_str);
                    }

                    Err(e) => {
                        debug!("Parse debug: {}", e);
                        eprintln!("{}", e);
                        std::process::exit(65);
                    }
                }

                info!("Parse subcommand completed");
            }
            None => {
                info!("No filepath provided for Parse");
                println!("No input filepath was provided. Exiting...");
                std::process::exit(0);
            }
        },

        Commands::Evaluate { filename } => match filename {
            Some(filename) => {
                info!("Running Evaluate subcommand");

                let buf = read_file(filename)?;

                let Some(tokens) = scan_all(&buf) else {
                    std::process::exit(65);
                };

                let mut parser = Parser::new(&tokens);
                let mut interpreter = Interpreter::new();

                match parser.parse_expression() {
                    Ok(expr) => {
                        info!("Expression parsed successfully");

                        match interpreter.evaluate(&expr) {
                            Ok(value) => {
                                debug!("Evaluated to: {}", value);
                                println!("{}", value);
                            }

                            Err(e) => {
                                debug!("Evaluation debug: {}", e);
                                eprintln!("{}", e);
                                std::process::exit(70);
                            }
                        }
                    }

                    Err(e) => {
                        debug!("Parse debug: {}", e);
                        eprintln!("{}", e);
                        std::process::exit(65);
                    }
                }

                info!("Evaluate subcommand completed");
            }

            None => {
                info!("No filepath provided for Evaluate");
                println!("No input filepath was provided. Exiting...");
                std::process::exit(0);
            }
        },

        Commands::Run { filename } => match filename {
            Some(filename) => {
                info!("Running Run subcommand");
                let buf = read_file(filename)?;

                let Some(tokens) = scan_all(&buf) else {
                    std::process::exit(65);
                };

                let mut parser = Parser::new(&tokens);

                let statements = match parser.parse() {
                    Ok(statements) => statements,

                    Err(e) => {
                        debug!("Parse debug: {}", e);
                        eprintln!("{}", e);
                        std::process::exit(65);
                    }
                };

                info!("Parsed {} statements", statements.len());

                let mut interpreter = Interpreter::new();

                match interpreter.run(&statements) {
                    Ok(()) => {
                        info!("Program executed successfully");
                    }

                    Err(e) => {
                        debug!("Runtime debug: {}", e);
                        eprintln!("{}", e);
                        std::process::exit(70);
                    }
                }
            }

            None => {
                info!("No filepath provided for Run");
                println!("No input filepath was provided. Exiting...");
                std::process::exit(0);
            }
        },
    }

    Ok(())
}
