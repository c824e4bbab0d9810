use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use typedjs_check::{CheckOptions, Diagnostic, DiagnosticKind, Severity, ValuePolicy};
use typedjs_lexer::{Lexer, Token, TokenKind};

use typedjs_driver::check_files;

#[derive(Parser)]
#[command(
    name = "typedjs",
    version = "0.1.0",
    about = "Structural type checker for TypedJS",
    long_about = "Validates annotated bindings in TypedJS documents against their\ndeclared interfaces, aliases, enums and literal types."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more TypedJS files
    Check {
        /// Input files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Treat values of unknown type as mismatches
        #[arg(long)]
        strict: bool,

        /// Severity of type findings
        #[arg(long, default_value = "error")]
        severity: SeverityArg,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Lex a file and show tokens (debug)
    Lex {
        /// Input file
        input: PathBuf,

        /// Show token positions
        #[arg(short, long)]
        positions: bool,
    },

    /// Parse a file and show the syntax tree (debug)
    Parse {
        /// Input file
        input: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SeverityArg {
    Error,
    Warning,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Error => Severity::Error,
            SeverityArg::Warning => Severity::Warning,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            files,
            strict,
            severity,
            verbose,
        } => check_command(files, strict, severity, verbose),
        Commands::Lex { input, positions } => lex_command(input, positions),
        Commands::Parse { input } => parse_command(input),
    }
}

/// Installs a subscriber only when `RUST_LOG` is set
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn check_command(files: Vec<PathBuf>, strict: bool, severity: SeverityArg, verbose: bool) -> ExitCode {
    let options = CheckOptions {
        severity: severity.into(),
        policy: if strict {
            ValuePolicy::Strict
        } else {
            ValuePolicy::Lenient
        },
    };

    if verbose {
        println!("Checking {} file(s)", files.len());
        println!("Options: {:?}", options);
    }

    let mut failed = false;

    for result in check_files(&files, &options) {
        let report = match result {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
                continue;
            }
        };

        let filename = report.path.to_string_lossy().to_string();
        if verbose {
            println!("{}: {} diagnostic(s)", filename, report.diagnostics.len());
        }

        for diagnostic in &report.diagnostics {
            report_diagnostic(diagnostic, &filename, &report.source);
        }
        failed |= report.has_errors();
    }

    if failed {
        return ExitCode::FAILURE;
    }

    println!("Type check passed!");
    ExitCode::SUCCESS
}

fn lex_command(input: PathBuf, positions: bool) -> ExitCode {
    let source = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let filename = input.to_string_lossy().to_string();
    let tokens = Lexer::new(&source).tokenize();

    println!("Tokens for {}:\n", filename);
    println!("{}", "=".repeat(80));

    for (i, token) in tokens.iter().enumerate() {
        if token.kind == TokenKind::Eof {
            println!("\n{:4} | {:?}", i, token.kind);
            break;
        }

        if positions {
            println!(
                "{:4} | {:20?} | {:?} | {}..{}",
                i, token.kind, token.value, token.span.start, token.span.end
            );
        } else {
            println!("{:4} | {:20?} | {:?}", i, token.kind, token.value);
        }
    }

    println!("{}", "=".repeat(80));
    println!("\nTotal tokens: {}", tokens.len());

    let error_count = tokens.iter().filter(|t| t.kind == TokenKind::Error).count();
    if error_count > 0 {
        println!("\nLexer errors found: {}", error_count);
        report_lexer_errors(&tokens, &filename, &source);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn parse_command(input: PathBuf) -> ExitCode {
    let source = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let filename = input.to_string_lossy().to_string();

    match typedjs_parser::parse(&source) {
        Ok(program) => {
            println!("{:#?}", program);
            ExitCode::SUCCESS
        }
        Err(errors) => {
            for err in &errors {
                report_error(
                    ReportKind::Error,
                    "E1000",
                    "Parse error",
                    &err.message,
                    err.span.start..err.span.end,
                    &filename,
                    &source,
                );
            }
            ExitCode::FAILURE
        }
    }
}

// Helper functions

fn report_lexer_errors(tokens: &[Token], filename: &str, source: &str) {
    for token in tokens.iter().filter(|t| t.kind == TokenKind::Error) {
        report_error(
            ReportKind::Error,
            "E0001",
            "Lexical error",
            &token.value,
            token.span.start..token.span.end,
            filename,
            source,
        );
    }
}

fn report_diagnostic(diagnostic: &Diagnostic, filename: &str, source: &str) {
    let kind = match diagnostic.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
    };
    let label = match diagnostic.kind {
        DiagnosticKind::ParseFailure => "document could not be parsed",
        DiagnosticKind::MissingProperty => "object is incomplete",
        DiagnosticKind::ExtraProperty => "not declared",
        _ => "does not satisfy the declared type",
    };

    report_error(
        kind,
        diagnostic.message_id(),
        &diagnostic.message,
        label,
        diagnostic.span.start..diagnostic.span.end,
        filename,
        source,
    );
}

fn report_error(
    kind: ReportKind<'_>,
    code: &str,
    title: &str,
    message: &str,
    range: std::ops::Range<usize>,
    filename: &str,
    source: &str,
) {
    let color = match kind {
        ReportKind::Warning => Color::Yellow,
        _ => Color::Red,
    };
    let config = Config::default()
        .with_color(io::stdout().is_terminal())
        .with_index_type(IndexType::Byte);
    let span = (filename, range);

    let printed = Report::build(kind, span.clone())
        .with_config(config)
        .with_code(code)
        .with_message(title)
        .with_label(Label::new(span).with_message(message).with_color(color))
        .finish()
        .print((filename, Source::from(source)));

    if let Err(e) = printed {
        eprintln!("Error writing report: {}", e);
    }
}
