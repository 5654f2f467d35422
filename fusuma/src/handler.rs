use crate::action::{Action, ScreenMode};
use crate::auto_close::AutoClose;
use crate::config::Config;
use crate::host::Host;
use crate::maximize::Maximize;
use anyhow::Result;
use fusuma_layout::{
    center_in, next_screen, screen_for, FrameMove, FrameRatio, FrameTable, Rect, ScreenTranslate,
};

/// State that lives across hotkey presses and app activations.
pub struct Context<A> {
    pub frames: FrameTable,
    pub auto_close: AutoClose<A>,
    pub maximize: Maximize,
}

impl<A> Context<A> {
    pub fn new(config: &Config) -> Self {
        Self {
            frames: config.frame_table(),
            auto_close: AutoClose::new(config.close_on_blur.clone()),
            maximize: Maximize::new(),
        }
    }
}

struct Target<W> {
    window: W,
    frame: Rect,
    screens: Vec<Rect>,
    screen: usize,
}

/// The focused window with its frame and screen, or `None` when there is
/// nothing to act on.
fn focused_target<H: Host>(host: &H) -> Result<Option<Target<H::Window>>> {
    let Some(window) = host.focused_window() else {
        tracing::debug!("No focused window");
        return Ok(None);
    };

    let frame = host.window_frame(&window)?;
    let screens = host.screens();
    let Some(screen) = screen_for(&frame, &screens) else {
        tracing::debug!("No screens available");
        return Ok(None);
    };

    Ok(Some(Target {
        window,
        frame,
        screens,
        screen,
    }))
}

pub fn run_action<H: Host>(host: &mut H, ctx: &mut Context<H::App>, action: &Action) -> Result<()> {
    let Some(target) = focused_target(host)? else {
        return Ok(());
    };
    let visible = target.screens[target.screen];

    match action {
        Action::CycleLayout { layouts } => {
            let frame = ctx.frames.next_frame(&visible, layouts.as_slice(), &target.frame)?;
            tracing::debug!("Cycle {:?}: {:?} -> {:?}", layouts, target.frame, frame);
            host.set_window_frame(&target.window, frame)?;
            if let Some(id) = host.window_id(&target.window) {
                ctx.maximize.clear(id);
            }
        }
        Action::MoveToNextScreen { mode } => {
            let Some(next) = next_screen(target.screen, target.screens.len()) else {
                return Ok(());
            };
            if next == target.screen {
                tracing::debug!("Only one screen, not moving");
                return Ok(());
            }

            let old = visible;
            let new = target.screens[next];
            let frame = match mode {
                ScreenMode::Scale => FrameRatio::new(old, new).apply(&target.frame),
                ScreenMode::Translate => FrameMove::new(old, new).apply(&target.frame),
            };
            tracing::debug!("Move to screen {} ({:?}): {:?}", next, mode, frame);
            host.set_window_frame(&target.window, frame)?;
        }
        Action::ToggleMaximize => {
            let id = host.window_id(&target.window);
            if let Some(frame) = ctx.maximize.toggle(id, target.frame, visible) {
                host.set_window_frame(&target.window, frame)?;
            }
        }
        Action::Center => {
            let frame = center_in(&visible, &target.frame);
            host.set_window_frame(&target.window, frame)?;
        }
    }

    Ok(())
}

/// Quit the previously activated watched app if it has no windows left.
pub fn on_app_activated<H: Host>(host: &mut H, ctx: &mut Context<H::App>, app: H::App) {
    let bundle_id = host.app_bundle_id(&app);
    let Some(previous) = ctx.auto_close.activated(app, bundle_id.as_deref()) else {
        return;
    };

    if host.app_is_terminated(&previous) {
        return;
    }

    if host.app_window_count(&previous) == Some(0) {
        let id = host.app_bundle_id(&previous);
        if host.terminate_app(&previous) {
            tracing::info!(
                "Closed {} after losing focus with no windows",
                id.as_deref().unwrap_or("app")
            );
        } else {
            tracing::warn!("Failed to close {:?}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::WindowId;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    const LEFT: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);
    const RIGHT: Rect = Rect::new(1000.0, 0.0, 2000.0, 1600.0);

    #[derive(Debug, Clone)]
    struct FakeApp {
        bundle_id: &'static str,
        windows: Option<usize>,
        terminated: bool,
    }

    #[derive(Default)]
    struct FakeHost {
        focused: Option<WindowId>,
        frames: HashMap<WindowId, Rect>,
        screens: Vec<Rect>,
        set_calls: usize,
        terminated: Vec<&'static str>,
    }

    impl FakeHost {
        fn with_window(frame: Rect, screens: Vec<Rect>) -> Self {
            Self {
                focused: Some(1),
                frames: HashMap::from([(1, frame)]),
                screens,
                ..Default::default()
            }
        }

        fn frame(&self) -> Rect {
            self.frames[&1]
        }
    }

    impl Host for FakeHost {
        type Window = WindowId;
        type App = FakeApp;

        fn focused_window(&self) -> Option<WindowId> {
            self.focused
        }

        fn window_id(&self, window: &WindowId) -> Option<WindowId> {
            Some(*window)
        }

        fn window_frame(&self, window: &WindowId) -> Result<Rect> {
            self.frames
                .get(window)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("no window {}", window))
        }

        fn set_window_frame(&mut self, window: &WindowId, frame: Rect) -> Result<()> {
            self.set_calls += 1;
            self.frames.insert(*window, frame);
            Ok(())
        }

        fn screens(&self) -> Vec<Rect> {
            self.screens.clone()
        }

        fn app_bundle_id(&self, app: &FakeApp) -> Option<String> {
            Some(app.bundle_id.to_string())
        }

        fn app_is_terminated(&self, app: &FakeApp) -> bool {
            app.terminated
        }

        fn app_window_count(&self, app: &FakeApp) -> Option<usize> {
            app.windows
        }

        fn terminate_app(&mut self, app: &FakeApp) -> bool {
            self.terminated.push(app.bundle_id);
            true
        }
    }

    fn context() -> Context<FakeApp> {
        Context::new(&Config::default())
    }

    fn app(bundle_id: &'static str, windows: usize) -> FakeApp {
        FakeApp {
            bundle_id,
            windows: Some(windows),
            terminated: false,
        }
    }

    #[test]
    fn cycle_walks_halves_then_thirds() {
        let mut host = FakeHost::with_window(Rect::new(40.0, 40.0, 300.0, 300.0), vec![LEFT]);
        let mut ctx = context();
        let action = Action::cycle(&["h1", "h2", "t1", "t2", "t3"]);

        let mut seen = Vec::new();
        for _ in 0..6 {
            run_action(&mut host, &mut ctx, &action).unwrap();
            seen.push(host.frame());
        }

        assert_eq!(
            seen,
            vec![
                Rect::new(0.0, 0.0, 500.0, 800.0),
                Rect::new(500.0, 0.0, 500.0, 800.0),
                Rect::new(0.0, 0.0, 333.0, 800.0),
                Rect::new(334.0, 0.0, 333.0, 800.0),
                Rect::new(667.0, 0.0, 333.0, 800.0),
                Rect::new(0.0, 0.0, 500.0, 800.0),
            ]
        );
    }

    #[test]
    fn cycle_uses_the_window_screen() {
        let mut host =
            FakeHost::with_window(Rect::new(1200.0, 100.0, 400.0, 300.0), vec![LEFT, RIGHT]);
        let mut ctx = context();

        run_action(&mut host, &mut ctx, &Action::cycle(&["h2"])).unwrap();
        assert_eq!(host.frame(), Rect::new(2000.0, 0.0, 1000.0, 1600.0));
    }

    #[test]
    fn no_focused_window_is_noop() {
        let mut host = FakeHost {
            screens: vec![LEFT],
            ..Default::default()
        };
        let mut ctx = context();

        run_action(&mut host, &mut ctx, &Action::Center).unwrap();
        assert_eq!(host.set_calls, 0);
    }

    #[test]
    fn unknown_layout_is_an_error() {
        let mut host = FakeHost::with_window(Rect::new(0.0, 0.0, 10.0, 10.0), vec![LEFT]);
        let mut ctx = context();

        let err = run_action(&mut host, &mut ctx, &Action::cycle(&["nope"])).unwrap_err();
        assert_eq!(err.to_string(), "unknown layout: nope");
        assert_eq!(host.set_calls, 0);
    }

    #[test]
    fn scale_move_keeps_relative_frame() {
        let mut host =
            FakeHost::with_window(Rect::new(0.0, 0.0, 500.0, 400.0), vec![LEFT, RIGHT]);
        let mut ctx = context();
        let action = Action::MoveToNextScreen {
            mode: ScreenMode::Scale,
        };

        run_action(&mut host, &mut ctx, &action).unwrap();
        assert_eq!(host.frame(), Rect::new(1000.0, 0.0, 1000.0, 800.0));

        run_action(&mut host, &mut ctx, &action).unwrap();
        assert_eq!(host.frame(), Rect::new(0.0, 0.0, 500.0, 400.0));
    }

    #[test]
    fn translate_move_keeps_size() {
        let mut host =
            FakeHost::with_window(Rect::new(100.0, 50.0, 500.0, 400.0), vec![LEFT, RIGHT]);
        let mut ctx = context();
        let action = Action::MoveToNextScreen {
            mode: ScreenMode::Translate,
        };

        run_action(&mut host, &mut ctx, &action).unwrap();
        assert_eq!(host.frame(), Rect::new(1100.0, 50.0, 500.0, 400.0));
    }

    #[test]
    fn single_screen_move_is_noop() {
        let mut host = FakeHost::with_window(Rect::new(100.0, 50.0, 500.0, 400.0), vec![LEFT]);
        let mut ctx = context();
        let action = Action::MoveToNextScreen {
            mode: ScreenMode::Scale,
        };

        run_action(&mut host, &mut ctx, &action).unwrap();
        assert_eq!(host.set_calls, 0);
    }

    #[test]
    fn toggle_maximize_restores() {
        let original = Rect::new(100.0, 50.0, 500.0, 400.0);
        let mut host = FakeHost::with_window(original, vec![LEFT]);
        let mut ctx = context();

        run_action(&mut host, &mut ctx, &Action::ToggleMaximize).unwrap();
        assert_eq!(host.frame(), LEFT);

        run_action(&mut host, &mut ctx, &Action::ToggleMaximize).unwrap();
        assert_eq!(host.frame(), original);
    }

    #[test]
    fn cycling_forgets_unmaximized_frame() {
        let mut host = FakeHost::with_window(Rect::new(100.0, 50.0, 500.0, 400.0), vec![LEFT]);
        let mut ctx = context();

        run_action(&mut host, &mut ctx, &Action::ToggleMaximize).unwrap();
        run_action(&mut host, &mut ctx, &Action::cycle(&["h1"])).unwrap();

        assert_eq!(ctx.maximize.saved(1), None);
    }

    #[test]
    fn center_keeps_size() {
        let mut host = FakeHost::with_window(Rect::new(0.0, 0.0, 400.0, 200.0), vec![LEFT]);
        let mut ctx = context();

        run_action(&mut host, &mut ctx, &Action::Center).unwrap();
        assert_eq!(host.frame(), Rect::new(300.0, 300.0, 400.0, 200.0));
    }

    #[test]
    fn closes_windowless_watched_app_on_blur() {
        let mut host = FakeHost::default();
        let mut ctx = context();

        on_app_activated(&mut host, &mut ctx, app("com.apple.Preview", 0));
        assert!(host.terminated.is_empty());

        on_app_activated(&mut host, &mut ctx, app("com.apple.Safari", 3));
        assert_eq!(host.terminated, vec!["com.apple.Preview"]);
    }

    #[test]
    fn keeps_watched_app_with_windows() {
        let mut host = FakeHost::default();
        let mut ctx = context();

        on_app_activated(&mut host, &mut ctx, app("com.apple.Console", 1));
        on_app_activated(&mut host, &mut ctx, app("com.apple.Safari", 3));
        assert!(host.terminated.is_empty());
    }

    #[test]
    fn skips_already_terminated_app() {
        let mut host = FakeHost::default();
        let mut ctx = context();
        let mut preview = app("com.apple.Preview", 0);
        preview.terminated = true;

        on_app_activated(&mut host, &mut ctx, preview);
        on_app_activated(&mut host, &mut ctx, app("com.apple.Safari", 3));
        assert!(host.terminated.is_empty());
    }

    #[test]
    fn quick_hop_through_other_app_closes_watched_app() {
        let mut host = FakeHost::default();
        let mut ctx = context();

        for activated in [
            app("com.apple.Preview", 0),
            app("com.apple.finder", 2),
            app("com.apple.Preview", 1),
        ] {
            on_app_activated(&mut host, &mut ctx, activated);
        }
        assert_eq!(host.terminated, vec!["com.apple.Preview"]);
        assert_eq!(
            ctx.auto_close.pending().map(|app| app.windows),
            Some(Some(1))
        );
    }

    #[test]
    fn keeps_watched_app_with_unknown_window_count() {
        let mut host = FakeHost::default();
        let mut ctx = context();
        let mut preview = app("com.apple.Preview", 0);
        preview.windows = None;

        on_app_activated(&mut host, &mut ctx, preview);
        on_app_activated(&mut host, &mut ctx, app("com.apple.Safari", 3));
        assert!(host.terminated.is_empty());
        assert!(ctx.auto_close.pending().is_none());
    }

    #[test]
    fn unwatched_apps_are_left_alone() {
        let mut host = FakeHost::default();
        let mut ctx = context();

        on_app_activated(&mut host, &mut ctx, app("com.apple.Safari", 0));
        on_app_activated(&mut host, &mut ctx, app("com.apple.Notes", 0));
        assert!(host.terminated.is_empty());
    }
}
