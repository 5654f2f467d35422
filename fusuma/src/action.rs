use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    CycleLayout { layouts: Vec<String> },
    MoveToNextScreen { mode: ScreenMode },
    ToggleMaximize,
    Center,
}

/// How a window is carried over to the next screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenMode {
    /// Keep the window's relative position and size.
    Scale,
    /// Keep the window's size, offset to the same place on the new screen.
    Translate,
}

impl Action {
    pub fn cycle(layouts: &[&str]) -> Self {
        Action::CycleLayout {
            layouts: layouts.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_tagged_json() {
        let action: Action =
            serde_json::from_str(r#"{"type":"cycle_layout","layouts":["tt1","tt2"]}"#).unwrap();
        assert_eq!(action, Action::cycle(&["tt1", "tt2"]));

        let action: Action =
            serde_json::from_str(r#"{"type":"move_to_next_screen","mode":"translate"}"#).unwrap();
        assert_eq!(
            action,
            Action::MoveToNextScreen {
                mode: ScreenMode::Translate
            }
        );

        let action: Action = serde_json::from_str(r#"{"type":"toggle_maximize"}"#).unwrap();
        assert_eq!(action, Action::ToggleMaximize);
    }

    #[test]
    fn rejects_unknown_mode() {
        let result: Result<Action, _> =
            serde_json::from_str(r#"{"type":"move_to_next_screen","mode":"teleport"}"#);
        assert!(result.is_err());
    }
}
