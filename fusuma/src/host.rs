use anyhow::Result;
use fusuma_layout::Rect;

pub type WindowId = u32;

/// What fusuma needs from the system: the focused window, the screens, and
/// a little about running applications.
///
/// All frames use a top-left origin, and `screens` returns visible frames
/// (menu bar and dock excluded) in a stable order.
pub trait Host {
    type Window;
    type App;

    fn focused_window(&self) -> Option<Self::Window>;

    /// `None` when the system can't identify the window.
    fn window_id(&self, window: &Self::Window) -> Option<WindowId>;

    fn window_frame(&self, window: &Self::Window) -> Result<Rect>;

    fn set_window_frame(&mut self, window: &Self::Window, frame: Rect) -> Result<()>;

    fn screens(&self) -> Vec<Rect>;

    fn app_bundle_id(&self, app: &Self::App) -> Option<String>;

    fn app_is_terminated(&self, app: &Self::App) -> bool;

    /// `None` when the windows can't be read.
    fn app_window_count(&self, app: &Self::App) -> Option<usize>;

    fn terminate_app(&mut self, app: &Self::App) -> bool;
}
