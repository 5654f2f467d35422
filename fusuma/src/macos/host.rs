use super::accessibility::AxElement;
use super::screen::visible_frames;
use super::workspace::RunningApp;
use crate::host::{Host, WindowId};
use anyhow::{Context, Result};
use fusuma_layout::Rect;
use objc2_foundation::MainThreadMarker;

pub struct MacHost {
    mtm: MainThreadMarker,
    system: AxElement,
}

impl MacHost {
    pub fn new(mtm: MainThreadMarker) -> Result<Self> {
        let system = AxElement::system_wide().context("Failed to create system-wide AX element")?;
        Ok(Self { mtm, system })
    }
}

impl Host for MacHost {
    type Window = AxElement;
    type App = RunningApp;

    fn focused_window(&self) -> Option<AxElement> {
        match self
            .system
            .focused_application()
            .and_then(|app| app.focused_window())
        {
            Ok(window) => Some(window),
            Err(e) => {
                tracing::debug!("No focused window: {}", e);
                None
            }
        }
    }

    fn window_id(&self, window: &AxElement) -> Option<WindowId> {
        window.window_id()
    }

    fn window_frame(&self, window: &AxElement) -> Result<Rect> {
        Ok(window.frame()?)
    }

    fn set_window_frame(&mut self, window: &AxElement, frame: Rect) -> Result<()> {
        window
            .set_frame(&frame)
            .with_context(|| format!("Failed to set window frame to {:?}", frame))
    }

    fn screens(&self) -> Vec<Rect> {
        visible_frames(self.mtm)
    }

    fn app_bundle_id(&self, app: &RunningApp) -> Option<String> {
        app.bundle_id()
    }

    fn app_is_terminated(&self, app: &RunningApp) -> bool {
        app.is_terminated()
    }

    fn app_window_count(&self, app: &RunningApp) -> Option<usize> {
        let element = AxElement::application(app.pid)?;
        match element.window_count() {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::debug!("Could not read windows of pid {}: {}", app.pid, e);
                None
            }
        }
    }

    fn terminate_app(&mut self, app: &RunningApp) -> bool {
        app.terminate()
    }
}
