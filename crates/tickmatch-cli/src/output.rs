use std::io::{self, Write};

use serde::Serialize;

use crate::error::CliError;

/// Writes `payload` to stdout as one JSON document.
pub fn render<T: Serialize>(payload: &T, pretty: bool) -> Result<(), CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(payload)?
    } else {
        serde_json::to_string(payload)?
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{text}")?;
    handle.flush()?;
    Ok(())
}
