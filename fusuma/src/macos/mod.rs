mod accessibility;
mod host;
mod hotkey;
mod screen;
mod workspace;

pub use accessibility::{is_trusted, is_trusted_with_prompt};
pub use host::MacHost;
pub use hotkey::HotkeyManager;
pub use workspace::ActivationWatcher;
