use crate::action::Action;
use crate::config::Config;
use crate::handler::{on_app_activated, run_action, Context};
use crate::macos::{self, ActivationWatcher, HotkeyManager, MacHost};
use crate::notify::{describe_error, notify};
use anyhow::{Context as _, Result};
use core_foundation::runloop::{kCFRunLoopDefaultMode, CFRunLoop};
use nix::sys::signal::{self, SigHandler, Signal};
use objc2_foundation::MainThreadMarker;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::Duration;

/// Longest wait on the run loop before the shutdown flag is checked again.
const SIGNAL_CHECK_INTERVAL: Duration = Duration::from_secs(1);

static RUNNING: AtomicBool = AtomicBool::new(true);

extern "C" fn handle_signal(_: libc::c_int) {
    RUNNING.store(false, Ordering::SeqCst);
}

pub struct App;

impl App {
    /// Install hotkeys and the activation observer, then service both on the
    /// main run loop until SIGINT or SIGTERM.
    pub fn run(config: &Config) -> Result<()> {
        if !macos::is_trusted() {
            macos::is_trusted_with_prompt();
            anyhow::bail!(
                "Accessibility permission is required. Grant it in System Settings and restart."
            );
        }

        let mtm = MainThreadMarker::new().context("fusuma must run on the main thread")?;
        install_signal_handlers()?;

        let (action_tx, action_rx) = mpsc::channel::<Action>();
        let mut hotkeys = HotkeyManager::new(action_tx);
        for binding in &config.bindings {
            hotkeys
                .bind(&binding.key, binding.action.clone())
                .with_context(|| format!("Failed to bind {}", binding.key))?;
        }
        hotkeys.start()?;

        let mut host = MacHost::new(mtm)?;
        let mut ctx = Context::new(config);
        let (activation_tx, activation_rx) = mpsc::channel();
        let _watcher = ActivationWatcher::new(activation_tx, mtm);

        notify("fusuma reloaded");

        tracing::info!("Entering run loop");
        while RUNNING.load(Ordering::SeqCst) {
            CFRunLoop::run_in_mode(unsafe { kCFRunLoopDefaultMode }, SIGNAL_CHECK_INTERVAL, true);

            while let Ok(action) = action_rx.try_recv() {
                if let Err(e) = run_action(&mut host, &mut ctx, &action) {
                    tracing::warn!("{:?} failed: {}", action, describe_error(&e));
                }
            }

            while let Ok(app) = activation_rx.try_recv() {
                on_app_activated(&mut host, &mut ctx, app);
            }
        }
        tracing::info!("Run loop exited");

        Ok(())
    }
}

fn install_signal_handlers() -> Result<()> {
    for sig in [Signal::SIGINT, Signal::SIGTERM] {
        unsafe { signal::signal(sig, SigHandler::Handler(handle_signal)) }
            .with_context(|| format!("Failed to install {} handler", sig))?;
    }
    Ok(())
}
