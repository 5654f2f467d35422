use crate::action::{Action, ScreenMode};
use crate::hotkey::parse_hotkey;
use anyhow::{Context, Result};
use fusuma_layout::{FrameTable, Rect};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub key: String,
    pub action: Action,
}

impl Binding {
    fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }
}

/// Contents of `~/.config/fusuma/config.json`. Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub open_at_login: bool,
    /// Bundle identifiers quit when they lose focus with no windows.
    pub close_on_blur: Vec<String>,
    /// Extra proportional frames, merged over h1/h2/t1/t2/t3/tt1/tt2.
    pub frames: BTreeMap<String, Rect>,
    pub bindings: Vec<Binding>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            open_at_login: true,
            close_on_blur: vec![
                "com.apple.Preview".to_string(),
                "com.apple.ActivityMonitor".to_string(),
                "com.apple.Console".to_string(),
            ],
            frames: BTreeMap::new(),
            bindings: vec![
                Binding::new("hyper-z", Action::cycle(&["h1", "h2", "t1", "t2", "t3"])),
                Binding::new("hyper-shift-z", Action::cycle(&["tt1", "tt2"])),
                Binding::new(
                    "hyper-tab",
                    Action::MoveToNextScreen {
                        mode: ScreenMode::Scale,
                    },
                ),
                Binding::new(
                    "hyper-shift-tab",
                    Action::MoveToNextScreen {
                        mode: ScreenMode::Translate,
                    },
                ),
                Binding::new("hyper-c", Action::ToggleMaximize),
                Binding::new("hyper-shift-c", Action::Center),
            ],
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("fusuma").join("config.json"))
    }

    /// Read and validate `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::from_json(&contents)
            .with_context(|| format!("Invalid config: {}", path.display()))?;

        tracing::info!(
            "Loaded config from {:?} with {} bindings",
            path,
            config.bindings.len()
        );
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn frame_table(&self) -> FrameTable {
        FrameTable::with_overrides(&self.frames)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, frame) in &self.frames {
            let fields = [frame.x, frame.y, frame.width, frame.height];
            if fields.iter().any(|v| !(0.0..=1.0).contains(v)) {
                anyhow::bail!("Frame '{}' has fields outside 0..=1: {:?}", name, frame);
            }
            if frame.x + frame.width > 1.0 || frame.y + frame.height > 1.0 {
                anyhow::bail!("Frame '{}' extends past the screen: {:?}", name, frame);
            }
        }

        let table = self.frame_table();
        let mut seen = HashSet::new();
        for binding in &self.bindings {
            let hotkey = parse_hotkey(&binding.key)
                .with_context(|| format!("Invalid key in binding '{}'", binding.key))?;
            if !seen.insert(hotkey) {
                anyhow::bail!("Key '{}' is bound more than once", binding.key);
            }

            if let Action::CycleLayout { layouts } = &binding.action {
                if layouts.is_empty() {
                    anyhow::bail!("Binding '{}' cycles through no layouts", binding.key);
                }
                table
                    .resolve(layouts.as_slice())
                    .with_context(|| format!("Invalid layout in binding '{}'", binding.key))?;
            }
        }

        Ok(())
    }
}
