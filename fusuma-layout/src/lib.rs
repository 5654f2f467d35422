pub mod frame;
pub mod place;
pub mod rect;
pub mod translate;

pub use frame::{compose_frame, next_frame, FrameTable, LayoutError};
pub use place::{center_in, next_screen, screen_for};
pub use rect::Rect;
pub use translate::{FrameMove, FrameRatio, ScreenTranslate};
