//! Rendering of pm command results.
//!
//! Human mode prints a header line followed by indented fields and entity
//! lines. With `--json` the command's records, or its error, are wrapped in a
//! `pm.v1` envelope on stdout.

use std::fmt::Display;
use std::io::{self, Write};

use serde::Serialize;

use crate::error::{Error, JsonError, Result};

pub const SCHEMA_VERSION: &str = "pm.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Human-readable result of one command
#[derive(Debug, Clone, Default)]
pub struct HumanOutput {
    header: String,
    fields: Vec<(&'static str, String)>,
    entries: Vec<String>,
    warnings: Vec<String>,
    next_step: Option<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    /// `"{title} ({count})"` followed by one line per entity.
    pub fn listing<I>(title: &str, entities: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let entries: Vec<String> = entities.into_iter().map(|e| e.to_string()).collect();
        Self {
            header: format!("{title} ({})", entries.len()),
            entries,
            ..Self::default()
        }
    }

    /// Use `header` instead when the listing turned out empty.
    pub fn or_when_empty(mut self, header: &str) -> Self {
        if self.entries.is_empty() {
            self.header = header.to_string();
        }
        self
    }

    pub fn field(&mut self, key: &'static str, value: impl Into<String>) {
        self.fields.push((key, value.into()));
    }

    pub fn entry(&mut self, line: impl Display) {
        self.entries.push(line.to_string());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn next_step(&mut self, command: impl Into<String>) {
        self.next_step = Some(command.into());
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Outcome<'a, T> {
    Success { data: &'a T },
    Error { error: JsonError },
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    schema_version: &'static str,
    command: &'a str,
    #[serde(flatten)]
    outcome: Outcome<'a, T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_step: Option<&'a str>,
}

fn write_envelope<W: Write, T: Serialize>(out: &mut W, envelope: &Envelope<'_, T>) -> Result<()> {
    let body = serde_json::to_string_pretty(envelope)?;
    writeln!(out, "{body}")?;
    out.flush()?;
    Ok(())
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: &HumanOutput,
) -> Result<()> {
    if options.json {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            outcome: Outcome::Success { data },
            warnings: human.warnings.clone(),
            next_step: human.next_step.as_deref(),
        };
        return write_envelope(&mut io::stdout().lock(), &envelope);
    }

    if options.quiet {
        return Ok(());
    }

    let mut out = io::stdout().lock();
    writeln!(out, "{}", format_human(human))?;
    Ok(())
}

/// Report a failed command: a JSON envelope on stdout, or `error:`/`hint:`
/// lines on stderr.
pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    if json {
        let envelope: Envelope<'_, ()> = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            outcome: Outcome::Error {
                error: JsonError::from(err),
            },
            warnings: Vec::new(),
            next_step: hint(err),
        };
        return write_envelope(&mut io::stdout().lock(), &envelope);
    }

    let mut out = io::stderr().lock();
    writeln!(out, "error: {err}")?;
    if let Some(hint) = hint(err) {
        writeln!(out, "hint: {hint}")?;
    }
    Ok(())
}

pub fn format_human(output: &HumanOutput) -> String {
    let mut lines = vec![output.header.clone()];
    lines.extend(
        output
            .fields
            .iter()
            .map(|(key, value)| format!("  {key}: {value}")),
    );
    lines.extend(output.entries.iter().map(|entry| format!("  - {entry}")));
    lines.extend(output.warnings.iter().map(|w| format!("warning: {w}")));
    if let Some(step) = &output.next_step {
        lines.push(format!("next: {step}"));
    }
    lines.join("\n")
}

/// First non-flag argument, used to label error output before clap has run
pub fn infer_command_name_from_args() -> String {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--data-dir" {
            args.next();
        } else if !arg.starts_with('-') {
            return arg;
        }
    }
    "pm".to_string()
}

/// The command most likely to help after `err`
fn hint(err: &Error) -> Option<&'static str> {
    match err {
        Error::UserNotFound(_) => Some("pm list-users"),
        Error::ProjectNotFound(_) => Some("pm list-projects"),
        Error::TaskNotFound(_) => Some("pm list-tasks"),
        Error::InvalidDate(_) => Some("use --due-date YYYY-MM-DD"),
        Error::InvalidStatus(_) => Some("use --status Incomplete or --status Complete"),
        Error::InvalidConfig(_) | Error::TomlParse(_) => Some("fix .pm.toml then retry"),
        _ => None,
    }
}
