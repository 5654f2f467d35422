use crate::rect::Rect;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("unknown layout: {0}")]
    UnknownLayout(String),
    #[error("layout sequence is empty")]
    EmptySequence,
}

/// Turn a proportional frame into an absolute one inside `frame`.
///
/// On a portrait container the proportion's axes are swapped, so a
/// left/right half becomes a top/bottom half. Extents are floored and
/// offsets ceiled so adjacent tiles never overlap.
pub fn compose_frame(frame: &Rect, proportion: &Rect) -> Rect {
    debug_assert!(frame.height != 0.0, "container has zero height: {:?}", frame);

    let portrait = frame.is_portrait();
    let (width_mod, height_mod, x_mod, y_mod) = if portrait {
        (
            proportion.height,
            proportion.width,
            proportion.y,
            proportion.x,
        )
    } else {
        (
            proportion.width,
            proportion.height,
            proportion.x,
            proportion.y,
        )
    };

    Rect {
        x: frame.x + (frame.width * x_mod).ceil(),
        y: frame.y + (frame.height * y_mod).ceil(),
        width: (frame.width * width_mod).floor(),
        height: (frame.height * height_mod).floor(),
    }
}

/// Pick the frame following the one `current` occupies.
///
/// A window sitting exactly on frame `i` advances to `i + 1`. Anything
/// else, including a window on the last frame, restarts at the first.
/// Returns `None` only for an empty sequence.
pub fn next_frame(container: &Rect, proportions: &[Rect], current: &Rect) -> Option<Rect> {
    let frames: Vec<Rect> = proportions
        .iter()
        .map(|p| compose_frame(container, p))
        .collect();

    let mut next = *frames.first()?;
    for (index, frame) in frames.iter().enumerate() {
        let last = index == frames.len() - 1;
        if !last && frame == current {
            next = frames[index + 1];
        }
    }

    Some(next)
}

/// Named proportional frames. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTable {
    frames: BTreeMap<String, Rect>,
}

impl FrameTable {
    pub fn new() -> Self {
        Self {
            frames: BTreeMap::new(),
        }
    }

    /// The halves, thirds and wide thirds.
    pub fn builtin() -> Self {
        let third = 1.0 / 3.0;
        let mut table = Self::new();
        table.insert("h1", Rect::new(0.0, 0.0, 0.5, 1.0));
        table.insert("h2", Rect::new(0.5, 0.0, 0.5, 1.0));
        table.insert("t1", Rect::new(0.0, 0.0, third, 1.0));
        table.insert("t2", Rect::new(third, 0.0, third, 1.0));
        table.insert("t3", Rect::new(2.0 * third, 0.0, third, 1.0));
        table.insert("tt1", Rect::new(0.0, 0.0, 2.0 * third, 1.0));
        table.insert("tt2", Rect::new(third, 0.0, 2.0 * third, 1.0));
        table
    }

    /// Builtins with `extra` added on top, replacing same-named entries.
    pub fn with_overrides<'a>(extra: impl IntoIterator<Item = (&'a String, &'a Rect)>) -> Self {
        let mut table = Self::builtin();
        for (name, rect) in extra {
            table.insert(name, *rect);
        }
        table
    }

    fn insert(&mut self, name: &str, proportion: Rect) {
        self.frames.insert(name.to_string(), proportion);
    }

    pub fn get(&self, name: &str) -> Option<&Rect> {
        self.frames.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.frames.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(String::as_str)
    }

    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Rect>, LayoutError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name)
                    .copied()
                    .ok_or_else(|| LayoutError::UnknownLayout(name.to_string()))
            })
            .collect()
    }

    pub fn compose(&self, container: &Rect, name: &str) -> Result<Rect, LayoutError> {
        let proportion = self
            .get(name)
            .ok_or_else(|| LayoutError::UnknownLayout(name.to_string()))?;
        Ok(compose_frame(container, proportion))
    }

    pub fn next_frame<S: AsRef<str>>(
        &self,
        container: &Rect,
        names: &[S],
        current: &Rect,
    ) -> Result<Rect, LayoutError> {
        let proportions = self.resolve(names)?;
        next_frame(container, &proportions, current).ok_or(LayoutError::EmptySequence)
    }
}

impl Default for FrameTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CYCLE: [&str; 5] = ["h1", "h2", "t1", "t2", "t3"];

    fn landscape() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 800.0)
    }

    #[test]
    fn composes_halves_and_thirds_on_landscape() {
        let table = FrameTable::builtin();
        let screen = landscape();

        assert_eq!(
            table.compose(&screen, "h1").unwrap(),
            Rect::new(0.0, 0.0, 500.0, 800.0)
        );
        assert_eq!(
            table.compose(&screen, "h2").unwrap(),
            Rect::new(500.0, 0.0, 500.0, 800.0)
        );
        assert_eq!(
            table.compose(&screen, "t1").unwrap(),
            Rect::new(0.0, 0.0, 333.0, 800.0)
        );
        assert_eq!(
            table.compose(&screen, "t2").unwrap(),
            Rect::new(334.0, 0.0, 333.0, 800.0)
        );
        assert_eq!(
            table.compose(&screen, "t3").unwrap(),
            Rect::new(667.0, 0.0, 333.0, 800.0)
        );
        assert_eq!(
            table.compose(&screen, "tt2").unwrap(),
            Rect::new(334.0, 0.0, 666.0, 800.0)
        );
    }

    #[test]
    fn offsets_by_container_origin() {
        let table = FrameTable::builtin();
        let screen = Rect::new(1440.0, 25.0, 1920.0, 1055.0);
        assert_eq!(
            table.compose(&screen, "h2").unwrap(),
            Rect::new(2400.0, 25.0, 960.0, 1055.0)
        );
    }

    #[test]
    fn portrait_container_splits_along_height() {
        let h1 = Rect::new(0.0, 0.0, 0.5, 1.0);
        let h2 = Rect::new(0.5, 0.0, 0.5, 1.0);
        let portrait = Rect::new(0.0, 0.0, 800.0, 1000.0);

        assert_eq!(
            compose_frame(&portrait, &h1),
            Rect::new(0.0, 0.0, 800.0, 500.0)
        );
        assert_eq!(
            compose_frame(&portrait, &h2),
            Rect::new(0.0, 500.0, 800.0, 500.0)
        );
    }

    #[test]
    fn composed_frames_stay_inside_container() {
        let table = FrameTable::builtin();
        let containers = [
            landscape(),
            Rect::new(0.0, 0.0, 800.0, 1000.0),
            Rect::new(-1080.0, 120.0, 1080.0, 1895.0),
            Rect::new(1440.0, 25.0, 2561.0, 1415.0),
            Rect::new(0.0, 0.0, 7.0, 3.0),
        ];

        for container in &containers {
            for name in table.names() {
                let frame = table.compose(container, name).unwrap();
                assert!(
                    container.contains(&frame),
                    "{} = {:?} escapes {:?}",
                    name,
                    frame,
                    container
                );
            }
        }
    }

    #[test]
    fn composing_twice_is_identical() {
        let table = FrameTable::builtin();
        let screen = Rect::new(3.0, 7.0, 1511.0, 944.0);
        for name in table.names() {
            assert_eq!(
                table.compose(&screen, name).unwrap(),
                table.compose(&screen, name).unwrap()
            );
        }
    }

    #[test]
    fn window_on_h1_advances_to_h2() {
        let table = FrameTable::builtin();
        let screen = landscape();
        let h1 = table.compose(&screen, "h1").unwrap();
        let h2 = table.compose(&screen, "h2").unwrap();

        assert_eq!(table.next_frame(&screen, &CYCLE, &h1).unwrap(), h2);
    }

    #[test]
    fn repeated_presses_walk_the_whole_cycle() {
        let table = FrameTable::builtin();
        let screen = landscape();
        let expected: Vec<Rect> = CYCLE
            .iter()
            .map(|name| table.compose(&screen, name).unwrap())
            .collect();

        let mut window = Rect::new(10.0, 10.0, 300.0, 200.0);
        let mut visited = Vec::new();
        for _ in 0..CYCLE.len() {
            window = table.next_frame(&screen, &CYCLE, &window).unwrap();
            visited.push(window);
        }

        assert_eq!(visited, expected);
    }

    #[test]
    fn unknown_position_resets_to_first() {
        let table = FrameTable::builtin();
        let screen = landscape();
        let window = Rect::new(12.0, 40.0, 600.0, 400.0);

        assert_eq!(
            table.next_frame(&screen, &CYCLE, &window).unwrap(),
            table.compose(&screen, "h1").unwrap()
        );
    }

    #[test]
    fn last_frame_restarts_instead_of_sticking() {
        let table = FrameTable::builtin();
        let screen = landscape();
        let t3 = table.compose(&screen, "t3").unwrap();
        let next = table.next_frame(&screen, &CYCLE, &t3).unwrap();

        assert_eq!(next, table.compose(&screen, "h1").unwrap());
        assert_ne!(next, t3);
    }

    #[test]
    fn off_by_one_pixel_does_not_advance() {
        let table = FrameTable::builtin();
        let screen = landscape();
        let mut h1 = table.compose(&screen, "h1").unwrap();
        h1.width += 1.0;

        assert_eq!(
            table.next_frame(&screen, &CYCLE, &h1).unwrap(),
            table.compose(&screen, "h1").unwrap()
        );
    }

    #[test]
    fn two_element_cycle_toggles() {
        let table = FrameTable::builtin();
        let screen = landscape();
        let tt1 = table.compose(&screen, "tt1").unwrap();
        let tt2 = table.compose(&screen, "tt2").unwrap();
        let names = ["tt1", "tt2"];

        assert_eq!(table.next_frame(&screen, &names, &tt1).unwrap(), tt2);
        assert_eq!(table.next_frame(&screen, &names, &tt2).unwrap(), tt1);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let table = FrameTable::builtin();
        let err = table
            .next_frame(&landscape(), &["h1", "q9"], &Rect::default())
            .unwrap_err();
        assert_eq!(err, LayoutError::UnknownLayout("q9".to_string()));
    }

    #[test]
    fn empty_sequence_is_an_error() {
        let table = FrameTable::builtin();
        let names: [&str; 0] = [];
        assert_eq!(
            table.next_frame(&landscape(), &names, &Rect::default()),
            Err(LayoutError::EmptySequence)
        );
        assert_eq!(next_frame(&landscape(), &[], &Rect::default()), None);
    }

    #[test]
    fn overrides_replace_and_extend_builtins() {
        let extra = BTreeMap::from([
            ("h1".to_string(), Rect::new(0.0, 0.0, 0.6, 1.0)),
            ("q1".to_string(), Rect::new(0.0, 0.0, 0.25, 1.0)),
        ]);
        let table = FrameTable::with_overrides(&extra);

        assert_eq!(table.get("h1"), Some(&Rect::new(0.0, 0.0, 0.6, 1.0)));
        assert_eq!(table.get("q1"), Some(&Rect::new(0.0, 0.0, 0.25, 1.0)));
        assert!(table.contains("tt2"));
    }
}
