use serde_json::{Map, Value, json};
use tracing::info;

use crate::{
    backlog::product_backlog,
    dispatcher::Dispatcher,
    errors::CalcError,
    history::HistoryEntry,
    self_check::run_self_check,
    variant::Methodology,
};

/// What a command printed and how the process should exit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub exit_code: i32,
}

impl CommandOutput {
    fn success(stdout: String) -> Self {
        Self {
            stdout,
            exit_code: 0,
        }
    }
}

pub struct Session {
    pub methodology: Methodology,
    pub dispatcher: Dispatcher,
    pub json: bool,
}

impl Session {
    pub fn new(methodology: Methodology, dispatcher: Dispatcher, json: bool) -> Self {
        Self {
            methodology,
            dispatcher,
            json,
        }
    }
}

pub fn handle_command(
    session: &Session,
    command: &str,
    args: &[String],
) -> Result<CommandOutput, CalcError> {
    info!(command, variant = %session.methodology, "handling command");
    match command {
        "run" => run_single(session, args),
        "batch" => run_batch(session, args),
        "list-backlog" | "backlog" => Ok(CommandOutput::success(list_backlog(session)?)),
        "list-features" | "features" => Ok(CommandOutput::success(list_features(session)?)),
        "self-test" => run_self_test(session),
        op if args.len() == 2 => {
            let mut full = Vec::with_capacity(3);
            full.push(op.to_string());
            full.extend(args.iter().cloned());
            run_single(session, &full)
        }
        other => Err(invalid(format!("unknown command {other}"))),
    }
}

fn run_single(session: &Session, args: &[String]) -> Result<CommandOutput, CalcError> {
    let [op, a, b] = args else {
        return Err(invalid("run expects <op> <a> <b>"));
    };
    let a = parse_operand(a)?;
    let b = parse_operand(b)?;
    match session.dispatcher.dispatch(op, a, b) {
        Ok(result) => {
            let stdout = if session.json {
                encode(object([
                    ("command", json!("run")),
                    ("op", json!(op)),
                    ("a", number(a)),
                    ("b", number(b)),
                    ("result", number(result)),
                ]))?
            } else {
                result.to_string()
            };
            Ok(CommandOutput::success(stdout))
        }
        Err(err) if err.is_unsupported() => unsupported_output(session, "run", &err),
        Err(err) => Err(err),
    }
}

fn run_batch(session: &Session, args: &[String]) -> Result<CommandOutput, CalcError> {
    if args.is_empty() || args.len() % 3 != 0 {
        return Err(invalid("batch expects one or more <op> <a> <b> triples"));
    }
    let calls = args
        .chunks(3)
        .map(parse_call)
        .collect::<Result<Vec<_>, CalcError>>()?;

    let mut lines = Vec::new();
    let mut results = Vec::new();
    let mut exit_code = 0;
    for (op, a, b) in calls {
        match session.dispatcher.dispatch(op, a, b) {
            Ok(result) => {
                lines.push(result.to_string());
                results.push(json!({
                    "op": op,
                    "a": number(a),
                    "b": number(b),
                    "result": number(result),
                }));
            }
            Err(err) if err.is_unsupported() => {
                let message = session.methodology.unsupported_message(&err);
                results.push(json!({"op": op, "error": message}));
                lines.push(message);
                exit_code = session.methodology.unsupported_exit_code();
                if session.methodology == Methodology::Waterfall {
                    break;
                }
            }
            Err(err) => return Err(err),
        }
    }

    let history = session.dispatcher.history();
    let stdout = if session.json {
        let history_value = match &history {
            Ok(entries) => Value::Array(entries.iter().map(history_value).collect()),
            Err(err) => json!({"error": err.to_string()}),
        };
        encode(object([
            ("command", json!("batch")),
            ("results", Value::Array(results)),
            ("history", history_value),
        ]))?
    } else {
        match &history {
            Ok(entries) => {
                lines.push("History:".to_string());
                lines.extend(entries.iter().map(|entry| format!(" - {}", describe(entry))));
            }
            Err(err) => lines.push(err.to_string()),
        }
        lines.join("\n")
    };
    Ok(CommandOutput { stdout, exit_code })
}

fn list_backlog(session: &Session) -> Result<String, CalcError> {
    let items = product_backlog();
    if session.json {
        let items = serde_json::to_value(items)
            .map_err(|e| invalid(format!("serialization failed: {e}")))?;
        return encode(object([("command", json!("list-backlog")), ("items", items)]));
    }
    let mut lines = vec!["Product Backlog:".to_string()];
    lines.extend(items.iter().map(|item| format!(" - {item}")));
    Ok(lines.join("\n"))
}

fn list_features(session: &Session) -> Result<String, CalcError> {
    let features = session.dispatcher.features();
    if session.json {
        return encode(object([
            ("command", json!("list-features")),
            ("variant", json!(session.methodology.name())),
            ("features", features.to_json()),
        ]));
    }
    let mut lines = vec!["Feature Toggles:".to_string()];
    lines.extend(
        features
            .entries()
            .map(|(feature, on)| format!(" - {feature}: {}", if on { "ON" } else { "OFF" })),
    );
    Ok(lines.join("\n"))
}

fn run_self_test(session: &Session) -> Result<CommandOutput, CalcError> {
    let report = run_self_check(&session.dispatcher);
    let exit_code = if report.has_failures() { 1 } else { 0 };
    let stdout = if session.json {
        let report = serde_json::to_value(&report)
            .map_err(|e| invalid(format!("serialization failed: {e}")))?;
        encode(object([("command", json!("self-test")), ("report", report)]))?
    } else {
        let mut lines = vec![format!(
            "Self check: passed={} failed={} skipped={}",
            report.passed, report.failed, report.skipped
        )];
        lines.extend(report.failures.iter().map(|failure| format!(" - {failure}")));
        lines.join("\n")
    };
    Ok(CommandOutput { stdout, exit_code })
}

fn unsupported_output(
    session: &Session,
    command: &str,
    err: &CalcError,
) -> Result<CommandOutput, CalcError> {
    let message = session.methodology.unsupported_message(err);
    let stdout = if session.json {
        encode(object([
            ("command", json!(command)),
            ("error", json!(message)),
        ]))?
    } else {
        message
    };
    Ok(CommandOutput {
        stdout,
        exit_code: session.methodology.unsupported_exit_code(),
    })
}

fn parse_call(chunk: &[String]) -> Result<(&str, f64, f64), CalcError> {
    Ok((
        chunk[0].as_str(),
        parse_operand(&chunk[1])?,
        parse_operand(&chunk[2])?,
    ))
}

fn parse_operand(raw: &str) -> Result<f64, CalcError> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| invalid(format!("operand {raw} is not a number")))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(format!("operand {raw} must be finite")))
    }
}

fn describe(entry: &HistoryEntry) -> String {
    format!("{}({}, {}) = {}", entry.op, entry.a, entry.b, entry.result)
}

fn history_value(entry: &HistoryEntry) -> Value {
    json!({
        "op": entry.op,
        "a": number(entry.a),
        "b": number(entry.b),
        "result": number(entry.result),
    })
}

// JSON has no infinity; non-finite values are rendered as their Display text.
fn number(value: f64) -> Value {
    if value.is_finite() {
        json!(value)
    } else {
        Value::String(value.to_string())
    }
}

fn object<const N: usize>(fields: [(&str, Value); N]) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn encode(object: Map<String, Value>) -> Result<String, CalcError> {
    serde_json::to_string(&Value::Object(object))
        .map_err(|e| invalid(format!("serialization failed: {e}")))
}

fn invalid<T: Into<String>>(message: T) -> CalcError {
    CalcError::invalid_input(message.into())
}
