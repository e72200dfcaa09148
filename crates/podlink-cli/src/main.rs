use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use podlink_core::{Decoded, Diagnostic, Entity, MessageKind, ParseError, Pod, Status};

#[derive(Parser, Debug)]
#[command(name = "podlink")]
#[command(version)]
#[command(
    about = "Offline replay tool for POD HD control-message logs.",
    long_about = None,
    after_help = "Examples:\n  podlink log replay session.hex -o report.json\n  podlink log replay session.hex --stdout --pretty"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on captured message logs (offline-first).
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },
}

#[derive(Subcommand, Debug)]
enum LogCommands {
    /// Replay a hex-dump message log against a fresh device model and
    /// generate a versioned JSON report.
    #[command(
        after_help = "Examples:\n  podlink log replay session.hex -o report.json\n  podlink log replay session.hex --stdout --pretty"
    )]
    Replay {
        /// Path to a .hex or .log message dump (one frame per line)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if replay warnings are present
        #[arg(long)]
        strict: bool,

        /// List replay warnings after the run
        #[arg(long)]
        list_warnings: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Log { command } => match command {
            LogCommands::Replay {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_warnings,
            } => cmd_log_replay(
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_warnings,
            ),
        },
    };

    match result {
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
        CliError::new(err.to_string(), None)
    }
}

const REPORT_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct ReplayReport {
    report_version: u32,
    tool: ToolInfo,
    generated_at: String,
    input: InputInfo,
    records: Vec<Record>,
    summary: Summary,
}

#[derive(Debug, Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
    commit: &'static str,
}

#[derive(Debug, Serialize)]
struct InputInfo {
    path: String,
    bytes: usize,
    messages: usize,
}

/// One replayed frame.
#[derive(Debug, Serialize)]
struct Record {
    index: usize,
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<MessageKind>,
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity: Option<Entity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<Warning>,
}

#[derive(Debug, Clone, Serialize)]
struct Warning {
    id: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct Summary {
    messages: usize,
    applied: usize,
    warnings: BTreeMap<String, usize>,
}

fn warning_id(err: &ParseError) -> &'static str {
    match err {
        ParseError::Truncated { .. } => "PL-TRUNCATED",
        ParseError::EntityNotFound { .. } => "PL-ENTITY-NOT-FOUND",
        ParseError::ValueRejected { .. } => "PL-VALUE-REJECTED",
        ParseError::UnknownMessage { .. } => "PL-UNKNOWN-MESSAGE",
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_log_replay(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_warnings: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    let text = fs::read_to_string(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    let frames = parse_hex_dump(&text)?;

    let rep = replay(&resolved_input, &frames);
    let json = serialize_report(&rep, pretty, compact)?;

    if stdout {
        print!("{}", json);
        if list_warnings && !quiet {
            print_warnings(&rep);
        }
        return strict_check(strict, &rep);
    }

    let report = report.expect("report required when not using stdout");
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if list_warnings && !quiet {
        print_warnings(&rep);
    }
    if !quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    strict_check(strict, &rep)
}

fn strict_check(strict: bool, rep: &ReplayReport) -> Result<(), CliError> {
    if strict && !rep.summary.warnings.is_empty() {
        return Err(CliError::new(
            "replay warnings detected",
            Some("use --list-warnings to inspect".to_string()),
        ));
    }
    Ok(())
}

/// One frame per line: whitespace-separated hex byte pairs, `#` starts a
/// comment, blank lines are skipped.
fn parse_hex_dump(text: &str) -> Result<Vec<(usize, Vec<u8>)>, CliError> {
    let mut frames = Vec::new();
    for (line_index, raw_line) in text.lines().enumerate() {
        let line_number = line_index + 1;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut frame = Vec::new();
        for token in line.split_whitespace() {
            let byte = u8::from_str_radix(token, 16).map_err(|_| {
                CliError::new(
                    format!("invalid hex byte '{}' on line {}", token, line_number),
                    Some("expected two-digit hex pairs separated by spaces".to_string()),
                )
            })?;
            frame.push(byte);
        }
        frames.push((line_number, frame));
    }
    Ok(frames)
}

fn replay(input: &PathBuf, frames: &[(usize, Vec<u8>)]) -> ReplayReport {
    let mut pod = Pod::new();
    let mut records = Vec::with_capacity(frames.len());
    let mut warnings: BTreeMap<String, usize> = BTreeMap::new();
    let mut applied = 0usize;
    let mut total_bytes = 0usize;

    for (index, (line, frame)) in frames.iter().enumerate() {
        total_bytes += frame.len();
        let kind = podlink_core::peek_kind(frame);
        let record = match podlink_core::dispatch(frame, &mut pod) {
            Ok(Decoded {
                status,
                entity,
                diagnostics,
            }) => {
                if status != Status::None {
                    applied += 1;
                }
                for diagnostic in &diagnostics {
                    *warnings.entry(diagnostic.id.clone()).or_default() += 1;
                }
                Record {
                    index,
                    line: *line,
                    kind,
                    status,
                    entity,
                    diagnostics,
                    warning: None,
                }
            }
            Err(err) => {
                let id = warning_id(&err);
                *warnings.entry(id.to_string()).or_default() += 1;
                Record {
                    index,
                    line: *line,
                    kind,
                    status: err.status(),
                    entity: None,
                    diagnostics: Vec::new(),
                    warning: Some(Warning {
                        id,
                        message: err.to_string(),
                    }),
                }
            }
        };
        records.push(record);
    }

    let generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    ReplayReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "podlink",
            version: env!("CARGO_PKG_VERSION"),
            commit: env!("PODLINK_BUILD_COMMIT"),
        },
        generated_at,
        input: InputInfo {
            path: input.display().to_string(),
            bytes: total_bytes,
            messages: frames.len(),
        },
        records,
        summary: Summary {
            messages: frames.len(),
            applied,
            warnings,
        },
    }
}

fn serialize_report(rep: &ReplayReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_warnings(rep: &ReplayReport) {
    eprintln!("Replay warnings:");
    for (id, count) in &rep.summary.warnings {
        eprintln!("  {} ({})", id, count);
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .hex or .log message dump".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .hex or .log message dump".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "hex" && ext != "log" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .hex or .log file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .hex or .log".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single dump file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches.iter().take(3).collect::<Vec<_>>();
        if !listed.is_empty() {
            let mut details = String::new();
            details.push_str("; matches: ");
            details.push_str(
                &listed
                    .into_iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            if matches.len() > 3 {
                details.push_str(", ...");
            }
            message.push_str(&details);
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use super::parse_hex_dump;

    #[test]
    fn hex_dump_skips_comments_and_blank_lines() {
        let text = "# session start\n\n1D 02 00 00 00 00 00 00 01  # set change\n";
        let frames = parse_hex_dump(text).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].0, 3);
        assert_eq!(frames[0].1[0], 0x1D);
        assert_eq!(frames[0].1.len(), 9);
    }

    #[test]
    fn invalid_hex_names_the_line() {
        let err = parse_hex_dump("1D 02\nZZ 00\n").unwrap_err();
        assert!(err.message.contains("line 2"));
    }
}
