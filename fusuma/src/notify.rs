use serde::Serialize;
use std::process::Command;

/// Render a value for the log: pretty JSON on its own lines.
pub fn describe<T: Serialize + std::fmt::Debug>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => format!("\n{}", json),
        Err(_) => format!("{:?}", value),
    }
}

/// Render an error with its cause chain, one indented `at` line per cause.
pub fn describe_error(err: &anyhow::Error) -> String {
    let mut out = format!("\n{}", err);
    for cause in err.chain().skip(1) {
        out.push_str(&format!("\n\t at {}", cause));
    }
    out
}

/// Log `message` and surface it as a system notification.
pub fn notify(message: &str) {
    tracing::info!("{}", message);

    if !cfg!(target_os = "macos") {
        return;
    }

    match Command::new("osascript")
        .arg("-e")
        .arg(notification_script(message))
        .status()
    {
        Ok(status) if !status.success() => {
            tracing::warn!("osascript exited with status: {}", status);
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("Failed to show notification: {}", e),
    }
}

fn notification_script(message: &str) -> String {
    format!(
        "display notification {} with title \"fusuma\"",
        applescript_string(message)
    )
}

fn applescript_string(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}
