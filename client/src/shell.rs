use std::io::{self, BufRead, Write};

use serde_json::json;
use tracing::{error, warn};

use gtp::{GtpError, LineStream, Session, Value};

use crate::args::ShellConfig;
use crate::engine::EngineProcess;
use crate::game::{configure, to_json};

pub fn run_shell(config: ShellConfig) -> bool {
    let engine = match EngineProcess::spawn(&config.engine.engine) {
        Ok(engine) => engine,
        Err(err) => {
            error!(error = %err, "Could not start the engine.");
            return false;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();
    let (_, result) = Session::run(engine, |go| shell(go, &config, stdin.lock(), &mut output));

    if let Err(err) = result {
        error!(error = %err, "Engine session failed.");
        return false;
    }

    true
}

fn shell<S: LineStream>(
    go: &mut Session<S>,
    config: &ShellConfig,
    input: impl BufRead,
    output: &mut impl Write,
) -> Result<(), GtpError> {
    if !configure(go, &config.engine.game)? {
        return Ok(());
    }

    for line in input.lines() {
        let line = line?;

        let mut parts = line.split_whitespace();
        let operation = match parts.next() {
            Some(operation) => operation,
            None => continue,
        };
        // Session::run sends the quit for us.
        if operation == "quit" {
            break;
        }

        let args: Vec<&str> = parts.collect();
        let value = match go.execute(operation, &args) {
            Ok(value) => value,
            Err(err @ (GtpError::UnknownOperation(_) | GtpError::InvalidArguments { .. })) => {
                warn!(input = %line, "Ignoring input.");
                writeln!(output, "? {err}")?;
                continue;
            }
            Err(err) => return Err(err),
        };

        print_result(go, operation, &value, config.engine.json, output)?;
    }

    Ok(())
}

fn print_result<S: LineStream>(
    go: &Session<S>,
    operation: &str,
    value: &Value,
    as_json: bool,
    output: &mut impl Write,
) -> io::Result<()> {
    if as_json {
        let report = json!({
            "operation": operation,
            "success": go.success(),
            "value": to_json(value),
            "error": go.last_error(),
        });
        writeln!(output, "{report}")
    } else if go.success() {
        writeln!(output, "= {value}")
    } else {
        writeln!(output, "? {}", go.last_error().unwrap_or_default())
    }
}
