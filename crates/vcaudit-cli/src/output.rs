use serde::Serialize;
use serde_json::json;

use crate::error::CliError;

pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(payload)
}

pub fn render<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<(), CliError> {
    println!("{}", to_json(value, pretty)?);
    Ok(())
}

/// Print a failure as `{"error": message}` on stdout.
pub fn render_error(error: &CliError, pretty: bool) {
    let body = json!({ "error": error.to_string() });
    match to_json(&body, pretty) {
        Ok(payload) => println!("{payload}"),
        Err(_) => eprintln!("error: {error}"),
    }
}
