use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const LABEL: &str = "io.github.fusuma";

pub fn plist_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join("Library")
        .join("LaunchAgents")
        .join(format!("{}.plist", LABEL)))
}

fn plist_contents(exe: &Path, user: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{label}</string>
    <key>ProgramArguments</key>
    <array>
        <string>{exe}</string>
    </array>
    <key>EnvironmentVariables</key>
    <dict>
        <key>RUST_LOG</key>
        <string>info</string>
    </dict>
    <key>RunAtLoad</key>
    <true/>
    <key>StandardOutPath</key>
    <string>/tmp/fusuma_{user}.out.log</string>
    <key>StandardErrorPath</key>
    <string>/tmp/fusuma_{user}.err.log</string>
</dict>
</plist>
"#,
        label = LABEL,
        exe = exe.display(),
        user = user,
    )
}

/// Make the launch agent match `open_at_login`.
pub fn sync(open_at_login: bool) -> Result<()> {
    let path = plist_path()?;
    if open_at_login {
        let exe = env::current_exe().context("Unable to locate fusuma executable")?;
        let user = env::var("USER").unwrap_or_else(|_| "unknown".to_string());
        install(&path, &plist_contents(&exe, &user))
    } else {
        uninstall(&path)
    }
}

fn install(path: &Path, contents: &str) -> Result<()> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == contents) {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write launch agent: {}", path.display()))?;
    tracing::info!("Installed launch agent at {:?}", path);
    Ok(())
}

fn uninstall(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    fs::remove_file(path)
        .with_context(|| format!("Failed to remove launch agent: {}", path.display()))?;
    tracing::info!("Removed launch agent at {:?}", path);
    Ok(())
}
