//! Step output for `process` and `hide`.
//!
//! The result is printed as one line of compact JSON. When the runner provides
//! an output file (`GITHUB_OUTPUT`) the same line is appended as `json=<...>`
//! so later steps can read it with `fromJSON(steps.<id>.outputs.json)`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::AppError;

/// Print `output` on stdout and mirror it into `github_output` when given.
pub fn write_workflow_output<T: Serialize>(
    output: &T,
    github_output: Option<&Path>,
) -> Result<(), AppError> {
    let line = output_line(output)?;
    println!("{}", line);

    if let Some(path) = github_output {
        append_output(path, &line)?;
    }
    Ok(())
}

/// Compact JSON; string values keep their newlines escaped.
fn output_line<T: Serialize>(output: &T) -> Result<String, AppError> {
    let line = serde_json::to_string(output).map_err(|e| {
        AppError::InternalError(format!("Failed to serialize step output: {}", e))
    })?;
    debug_assert!(!line.contains('\n'));
    Ok(line)
}

fn append_output(path: &Path, line: &str) -> Result<(), AppError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path).map_err(|e| {
        AppError::Configuration(format!("Failed to open step output {}: {}", path.display(), e))
    })?;
    writeln!(file, "json={}", line)?;
    Ok(())
}
