use fusuma_layout::Rect;
use objc2_app_kit::NSScreen;
use objc2_foundation::MainThreadMarker;

/// Visible frames of all screens in AppKit order, converted to the
/// top-left origin the Accessibility API uses.
pub fn visible_frames(mtm: MainThreadMarker) -> Vec<Rect> {
    let screens = NSScreen::screens(mtm);
    let Some(primary) = screens.iter().next() else {
        return Vec::new();
    };
    let primary_height = primary.frame().size.height;

    screens
        .iter()
        .map(|screen| {
            let vf = screen.visibleFrame();
            Rect::new(vf.origin.x, vf.origin.y, vf.size.width, vf.size.height)
                .flip_y(primary_height)
        })
        .collect()
}
