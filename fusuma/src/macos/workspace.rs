use objc2::rc::Retained;
use objc2::runtime::NSObjectProtocol;
use objc2::{define_class, msg_send, sel, DefinedClass, MainThreadOnly};
use objc2_app_kit::{
    NSRunningApplication, NSWorkspace, NSWorkspaceApplicationKey,
    NSWorkspaceDidActivateApplicationNotification,
};
use objc2_foundation::{MainThreadMarker, NSNotification, NSNotificationCenter, NSObject};
use std::sync::mpsc;

pub struct RunningApp {
    pub pid: i32,
    app: Retained<NSRunningApplication>,
}

impl RunningApp {
    fn new(app: Retained<NSRunningApplication>) -> Self {
        Self {
            pid: app.processIdentifier(),
            app,
        }
    }

    pub fn bundle_id(&self) -> Option<String> {
        self.app.bundleIdentifier().map(|id| id.to_string())
    }

    pub fn is_terminated(&self) -> bool {
        self.app.isTerminated()
    }

    pub fn terminate(&self) -> bool {
        self.app.terminate()
    }
}

fn activated_app(notification: &NSNotification) -> Option<RunningApp> {
    let info = notification.userInfo()?;
    let app = info.objectForKey(unsafe { NSWorkspaceApplicationKey })?;
    let app = app.downcast::<NSRunningApplication>().ok()?;
    Some(RunningApp::new(app))
}

define_class!(
    #[unsafe(super(NSObject))]
    #[thread_kind = MainThreadOnly]
    #[name = "FusumaActivationObserver"]
    #[ivars = mpsc::Sender<RunningApp>]
    struct ActivationObserver;

    unsafe impl NSObjectProtocol for ActivationObserver {}

    impl ActivationObserver {
        #[unsafe(method(applicationActivated:))]
        fn application_activated(&self, notification: &NSNotification) {
            let Some(app) = activated_app(notification) else {
                tracing::debug!("Activation notification without an application");
                return;
            };

            tracing::debug!("Application activated: pid {} ({:?})", app.pid, app.bundle_id());
            if self.ivars().send(app).is_err() {
                tracing::error!("Failed to send application activation");
            }
        }
    }
);

impl ActivationObserver {
    fn new(mtm: MainThreadMarker, tx: mpsc::Sender<RunningApp>) -> Retained<Self> {
        let this = Self::alloc(mtm).set_ivars(tx);
        unsafe { msg_send![super(this), init] }
    }
}

/// Sends every application that becomes active, as posted by the shared
/// workspace. Notifications are delivered while the main run loop runs.
pub struct ActivationWatcher {
    center: Retained<NSNotificationCenter>,
    observer: Retained<ActivationObserver>,
}

impl ActivationWatcher {
    pub fn new(tx: mpsc::Sender<RunningApp>, mtm: MainThreadMarker) -> Self {
        let observer = ActivationObserver::new(mtm, tx);
        let center = NSWorkspace::sharedWorkspace().notificationCenter();

        unsafe {
            center.addObserver_selector_name_object(
                &observer,
                sel!(applicationActivated:),
                Some(NSWorkspaceDidActivateApplicationNotification),
                None,
            );
        }
        tracing::info!("Watching application activations");

        Self { center, observer }
    }
}

impl Drop for ActivationWatcher {
    fn drop(&mut self) {
        unsafe { self.center.removeObserver(&self.observer) };
    }
}
