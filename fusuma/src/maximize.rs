use crate::host::WindowId;
use fusuma_layout::Rect;
use std::collections::VecDeque;

/// Windows remembered at once. Windows closed while maximized are never
/// restored, so the oldest entries are dropped past this.
const MAX_SAVED: usize = 32;

/// Frames windows had before they were maximized, oldest first.
#[derive(Debug, Default)]
pub struct Maximize {
    saved: VecDeque<(WindowId, Rect)>,
}

impl Maximize {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame to apply for a toggle, or `None` when there is nothing to do.
    ///
    /// A window exactly filling `visible` with a remembered frame goes back
    /// to it. Any other window is maximized and its frame remembered.
    pub fn toggle(&mut self, id: Option<WindowId>, current: Rect, visible: Rect) -> Option<Rect> {
        if current == visible {
            let restored = id.and_then(|id| self.take(id));
            if restored.is_none() {
                tracing::debug!("Window {:?} already maximized with no saved frame", id);
            }
            return restored;
        }

        if let Some(id) = id {
            self.remember(id, current);
        }
        Some(visible)
    }

    pub fn clear(&mut self, id: WindowId) {
        if self.take(id).is_some() {
            tracing::debug!("Cleared unmaximized frame for window {}", id);
        }
    }

    #[cfg(test)]
    pub fn saved(&self, id: WindowId) -> Option<Rect> {
        self.saved
            .iter()
            .find(|(saved_id, _)| *saved_id == id)
            .map(|(_, frame)| *frame)
    }

    #[cfg(test)]
    pub fn remembered(&self) -> usize {
        self.saved.len()
    }

    fn take(&mut self, id: WindowId) -> Option<Rect> {
        let index = self.saved.iter().position(|(saved_id, _)| *saved_id == id)?;
        self.saved.remove(index).map(|(_, frame)| frame)
    }

    fn remember(&mut self, id: WindowId, frame: Rect) {
        self.take(id);
        if self.saved.len() == MAX_SAVED {
            if let Some((evicted, _)) = self.saved.pop_front() {
                tracing::debug!("Forgetting unmaximized frame for window {}", evicted);
            }
        }
        self.saved.push_back((id, frame));
    }
}
