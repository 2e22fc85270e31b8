use crate::error::{RenderError, Result};
use serde::Serialize;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

/// Compact json document plus a trailing newline.
pub fn to_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let text = serde_json::to_string(value).map_err(RenderError::Json)?;
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Two-space indented json document plus a trailing newline.
pub fn to_json_pretty<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(RenderError::Json)?;
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Yaml document; serde_yaml already terminates it with a newline.
///
/// Runs behind a recovery boundary: a Serialize implementation that panics
/// mid-document must surface as a returned error, never take the process
/// down. serde_yaml is not trusted to always fail gracefully here.
pub fn to_yaml<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| serde_yaml::to_string(value)));
    match outcome {
        Ok(Ok(text)) => {
            out.write_all(text.as_bytes())?;
            Ok(())
        }
        Ok(Err(err)) => Err(RenderError::Yaml(err)),
        Err(payload) => Err(RenderError::YamlPanic(panic_message(payload))),
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
