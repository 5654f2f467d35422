use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

pub const PID_FILE: &str = "/tmp/fusuma.pid";

/// Holds the pid file for as long as this process runs.
#[derive(Debug)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Fails when another live process owns `path`. Stale or garbled files
    /// are replaced.
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(pid) = running_pid(path) {
            anyhow::bail!("fusuma is already running (pid {})", pid);
        }

        fs::write(path, process::id().to_string())
            .with_context(|| format!("Failed to write pid file: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn running_pid(path: &Path) -> Option<i32> {
    let contents = fs::read_to_string(path).ok()?;

    let pid = match contents.trim().parse::<i32>() {
        Ok(pid) if pid > 0 => pid,
        _ => {
            tracing::debug!("Removing invalid pid file {:?}", path);
            let _ = fs::remove_file(path);
            return None;
        }
    };

    if is_process_running(pid) {
        Some(pid)
    } else {
        tracing::debug!("Removing stale pid file for {}", pid);
        let _ = fs::remove_file(path);
        None
    }
}

fn is_process_running(pid: i32) -> bool {
    // Signal 0 only checks that the process exists.
    unsafe { libc::kill(pid, 0) == 0 }
}
