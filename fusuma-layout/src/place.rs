use crate::rect::Rect;

/// Keep the window's size and put its centre on the screen's centre.
pub fn center_in(screen: &Rect, window: &Rect) -> Rect {
    Rect {
        x: screen.x + screen.width / 2.0 - window.width / 2.0,
        y: screen.y + screen.height / 2.0 - window.height / 2.0,
        width: window.width,
        height: window.height,
    }
}

/// Index of the screen sharing the most area with `window`.
/// Falls back to the first screen when the window is off every screen.
pub fn screen_for(window: &Rect, screens: &[Rect]) -> Option<usize> {
    if screens.is_empty() {
        return None;
    }

    let best = screens
        .iter()
        .enumerate()
        .filter_map(|(index, screen)| {
            screen
                .intersection(window)
                .map(|overlap| (index, overlap.area()))
        })
        .fold(None, |best: Option<(usize, f64)>, (index, area)| match best {
            Some((_, best_area)) if best_area >= area => best,
            _ => Some((index, area)),
        });

    Some(best.map_or(0, |(index, _)| index))
}

/// Screens wrap around; with a single screen the next one is itself.
pub fn next_screen(index: usize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some((index + 1) % count)
}
