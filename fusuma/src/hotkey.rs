use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub key_code: u16,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub cmd: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    #[cfg(test)]
    pub const HYPER: Modifiers = Modifiers {
        cmd: true,
        alt: true,
        ctrl: true,
        shift: false,
    };

    #[cfg(test)]
    pub const HYPER_SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Self::HYPER
    };

    pub fn is_hyper(&self) -> bool {
        self.cmd && self.alt && self.ctrl
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotkeyError {
    #[error("empty key string")]
    Empty,
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
    #[error("unknown key: {0}")]
    UnknownKey(String),
}

/// Parse chords like `hyper-z`, `hyper-shift-tab` or `cmd-alt-left`.
pub fn parse_hotkey(key_str: &str) -> Result<Hotkey, HotkeyError> {
    let parts: Vec<&str> = key_str.split('-').filter(|p| !p.is_empty()).collect();
    let (key_part, modifier_parts) = parts.split_last().ok_or(HotkeyError::Empty)?;

    let mut modifiers = Modifiers::default();
    for part in modifier_parts {
        match part.to_lowercase().as_str() {
            "hyper" => {
                modifiers.cmd = true;
                modifiers.alt = true;
                modifiers.ctrl = true;
            }
            "cmd" | "super" | "command" => modifiers.cmd = true,
            "alt" | "opt" | "option" => modifiers.alt = true,
            "ctrl" | "control" => modifiers.ctrl = true,
            "shift" => modifiers.shift = true,
            _ => return Err(HotkeyError::UnknownModifier(part.to_string())),
        }
    }

    let key_code = key_code(key_part).ok_or_else(|| HotkeyError::UnknownKey(key_part.to_string()))?;

    Ok(Hotkey {
        key_code,
        modifiers,
    })
}

pub fn format_hotkey(hotkey: &Hotkey) -> String {
    let m = hotkey.modifiers;
    let mut parts = Vec::new();
    if m.is_hyper() {
        parts.push("hyper");
    } else {
        if m.cmd {
            parts.push("cmd");
        }
        if m.alt {
            parts.push("alt");
        }
        if m.ctrl {
            parts.push("ctrl");
        }
    }
    if m.shift {
        parts.push("shift");
    }
    parts.push(key_name(hotkey.key_code).unwrap_or("unknown"));
    parts.join("-")
}

// ANSI virtual key codes.
const KEYS: &[(&str, u16)] = &[
    ("a", 0x00),
    ("s", 0x01),
    ("d", 0x02),
    ("f", 0x03),
    ("h", 0x04),
    ("g", 0x05),
    ("z", 0x06),
    ("x", 0x07),
    ("c", 0x08),
    ("v", 0x09),
    ("b", 0x0B),
    ("q", 0x0C),
    ("w", 0x0D),
    ("e", 0x0E),
    ("r", 0x0F),
    ("y", 0x10),
    ("t", 0x11),
    ("1", 0x12),
    ("2", 0x13),
    ("3", 0x14),
    ("4", 0x15),
    ("6", 0x16),
    ("5", 0x17),
    ("equal", 0x18),
    ("9", 0x19),
    ("7", 0x1A),
    ("minus", 0x1B),
    ("8", 0x1C),
    ("0", 0x1D),
    ("rightbracket", 0x1E),
    ("o", 0x1F),
    ("u", 0x20),
    ("leftbracket", 0x21),
    ("i", 0x22),
    ("p", 0x23),
    ("return", 0x24),
    ("l", 0x25),
    ("j", 0x26),
    ("quote", 0x27),
    ("k", 0x28),
    ("semicolon", 0x29),
    ("backslash", 0x2A),
    ("comma", 0x2B),
    ("slash", 0x2C),
    ("n", 0x2D),
    ("m", 0x2E),
    ("period", 0x2F),
    ("tab", 0x30),
    ("space", 0x31),
    ("grave", 0x32),
    ("delete", 0x33),
    ("escape", 0x35),
    ("f5", 0x60),
    ("f6", 0x61),
    ("f7", 0x62),
    ("f3", 0x63),
    ("f8", 0x64),
    ("f9", 0x65),
    ("f11", 0x67),
    ("f10", 0x6D),
    ("f12", 0x6F),
    ("f4", 0x76),
    ("f2", 0x78),
    ("f1", 0x7A),
    ("left", 0x7B),
    ("right", 0x7C),
    ("down", 0x7D),
    ("up", 0x7E),
];

fn key_code(key: &str) -> Option<u16> {
    let key = key.to_lowercase();
    let canonical = match key.as_str() {
        "enter" => "return",
        "backspace" => "delete",
        "esc" => "escape",
        other => other,
    };
    KEYS.iter()
        .find(|(name, _)| *name == canonical)
        .map(|&(_, code)| code)
}

fn key_name(code: u16) -> Option<&'static str> {
    KEYS.iter()
        .find(|&&(_, c)| c == code)
        .map(|&(name, _)| name)
}
