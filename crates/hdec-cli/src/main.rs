use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use glob::glob;
use hdec_core::decode::{DecodeError, DecodeSummary, RunError, decode_files, decode_with};
use hdec_core::render::{TextOutput, render_fatal};
use hdec_core::report::ReportCollector;
use hdec_core::source::{load_input, load_schema_files};
use hdec_core::{InputEncoding, SourceError, make_stub_report};
use log::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "hdec")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("HDEC_BUILD_COMMIT"),
    ", ",
    env!("HDEC_BUILD_DATE"),
    ")"
))]
#[command(
    about = "Decode binary header dumps against field definition files.",
    long_about = None,
    after_help = "Examples:\n  hdec dump.hex hex ip.def udp.def\n  hdec capture.bin raw 'defs/*.def' --format json --pretty\n  RUST_LOG=debug hdec dump.txt bin header.def"
)]
struct Cli {
    /// Path to the header dump
    input: PathBuf,

    /// How the input file is encoded
    #[arg(value_enum)]
    encoding: EncodingArg,

    /// Definition files, decoded in order (glob patterns are expanded)
    #[arg(required = true, value_name = "SCHEMA")]
    schemas: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Suppress the File/Definition/Type preamble
    #[arg(short, long)]
    quiet: bool,

    /// Raise log verbosity (repeatable); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum EncodingArg {
    /// Hexadecimal text, whitespace ignored
    Hex,
    /// Text of 0/1 digits, whitespace ignored
    Bin,
    /// Raw bytes
    Raw,
}

impl From<EncodingArg> for InputEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Hex => InputEncoding::Hex,
            EncodingArg::Bin => InputEncoding::Bin,
            EncodingArg::Raw => InputEncoding::Raw,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<DecodeError> for CliError {
    fn from(err: DecodeError) -> Self {
        let reason = match &err {
            DecodeError::InvalidLengthExpression { source, .. }
            | DecodeError::InvalidConditionExpression { source, .. } => source.to_string(),
        };
        CliError::new(
            render_fatal(&err),
            Some(format!("field '{}': {}", err.field(), reason)),
        )
    }
}

impl From<SourceError> for CliError {
    fn from(err: SourceError) -> Self {
        let hint = match &err {
            SourceError::Io { .. } => "check that the file exists and is readable",
            SourceError::InvalidHex(_) => {
                "hex input may only contain 0-9, a-f, A-F, whitespace and a leading 0x"
            }
            SourceError::InvalidBinDigit { .. } => {
                "bin input may only contain 0, 1 and whitespace"
            }
        };
        CliError::new(err.to_string(), Some(hint.to_string()))
    }
}

impl From<RunError> for CliError {
    fn from(err: RunError) -> Self {
        match err {
            RunError::Source(err) => err.into(),
            RunError::Decode(err) => err.into(),
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    validate_input_file(&cli.input)?;
    let schemas = resolve_schema_args(&cli.schemas)?;
    let encoding = InputEncoding::from(cli.encoding);
    debug!(
        "input {} ({}), {} definition file(s)",
        cli.input.display(),
        encoding,
        schemas.len()
    );

    let summary = match cli.format {
        OutputFormat::Text => run_text(&cli.input, encoding, &schemas, cli.quiet)?,
        OutputFormat::Json => run_json(&cli.input, encoding, &schemas, cli.pretty)?,
    };

    info!(
        "decoded {} field(s), {} skipped, {} unreadable; {} of {} bits consumed",
        summary.decoded,
        summary.skipped,
        summary.read_failures,
        summary.bits_consumed,
        summary.bits_total
    );
    Ok(())
}

fn run_text(
    input: &Path,
    encoding: InputEncoding,
    schemas: &[PathBuf],
    quiet: bool,
) -> Result<DecodeSummary, CliError> {
    let fields = load_schema_files(schemas)?;
    let buffer = load_input(input, encoding)?;

    if !quiet {
        let definitions = schemas
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        print_preamble(input, &definitions, encoding).context("Failed to write output")?;
    }

    let mut out = TextOutput::new(io::stdout().lock());
    let result = decode_with(&fields, &buffer, &mut out);
    out.finish().context("Failed to write output")?;
    Ok(result?)
}

fn print_preamble(input: &Path, definitions: &str, encoding: InputEncoding) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "File: {}", input.display())?;
    writeln!(stdout, "Definition: {}", definitions)?;
    writeln!(stdout, "Type: {}", encoding)?;
    stdout.flush()
}

fn run_json(
    input: &Path,
    encoding: InputEncoding,
    schemas: &[PathBuf],
    pretty: bool,
) -> Result<DecodeSummary, CliError> {
    let stub = make_stub_report(
        &input.display().to_string(),
        encoding,
        schemas.iter().map(|p| p.display().to_string()).collect(),
    );
    let mut collector = ReportCollector::new(stub);
    let summary = decode_files(input, encoding, schemas, &mut collector)?;
    let report = collector.finish(&summary);

    let json = if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("JSON serialization failed")?;
    println!("{}", json);
    Ok(summary)
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass the path of a header dump".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass the path of a header dump".to_string()),
        ));
    }
    Ok(())
}

fn resolve_schema_args(args: &[String]) -> Result<Vec<PathBuf>, CliError> {
    let mut resolved = Vec::new();
    for arg in args {
        if !is_glob_pattern(arg) {
            let path = PathBuf::from(arg);
            if !path.is_file() {
                return Err(CliError::new(
                    format!("definition file not found: {}", path.display()),
                    Some("check the path or quote a glob pattern".to_string()),
                ));
            }
            resolved.push(path);
            continue;
        }

        let paths = glob(arg).map_err(|err| {
            CliError::new(
                format!("invalid definition pattern '{}'", arg),
                Some(format!("pattern error: {}", err.msg)),
            )
        })?;
        let mut matches = Vec::new();
        for entry in paths {
            let path = entry.map_err(|err| {
                CliError::new(
                    format!("invalid definition pattern '{}'", arg),
                    Some(format!("pattern error: {}", err)),
                )
            })?;
            if path.is_file() {
                matches.push(path);
            }
        }
        if matches.is_empty() {
            return Err(CliError::new(
                format!("no files match pattern '{}'", arg),
                Some("check the path or quote the pattern".to_string()),
            ));
        }
        matches.sort();
        debug!("pattern '{}' matched {} file(s)", arg, matches.len());
        resolved.extend(matches);
    }
    Ok(resolved)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
