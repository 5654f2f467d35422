use crate::action::Action;
use crate::hotkey::{format_hotkey, parse_hotkey, Hotkey, HotkeyError, Modifiers};
use anyhow::{Context, Result};
use core_foundation::runloop::{kCFRunLoopCommonModes, CFRunLoop, CFRunLoopSource};
use core_graphics::event::{
    CGEventFlags, CGEventTap, CGEventTapLocation, CGEventTapOptions, CGEventTapPlacement,
    CGEventType, CallbackResult, EventField,
};
use std::collections::HashMap;
use std::sync::mpsc;

/// Turns bound key chords into `Action`s on a channel. Matching key-downs
/// are swallowed; everything else passes through.
pub struct HotkeyManager {
    bindings: HashMap<Hotkey, Action>,
    action_tx: mpsc::Sender<Action>,
    tap: Option<HotkeyTap>,
}

impl HotkeyManager {
    pub fn new(action_tx: mpsc::Sender<Action>) -> Self {
        Self {
            bindings: HashMap::new(),
            action_tx,
            tap: None,
        }
    }

    pub fn bind(&mut self, key_str: &str, action: Action) -> Result<(), HotkeyError> {
        let hotkey = parse_hotkey(key_str)?;
        tracing::info!("Binding {} to {:?}", format_hotkey(&hotkey), action);
        self.bindings.insert(hotkey, action);
        Ok(())
    }

    /// Install the event tap on the current run loop. Bindings added later
    /// take effect on the next `start`.
    pub fn start(&mut self) -> Result<()> {
        self.tap = Some(self.create_tap()?);
        tracing::info!("Hotkey tap started with {} bindings", self.bindings.len());
        Ok(())
    }

    fn create_tap(&self) -> Result<HotkeyTap> {
        let bindings = self.bindings.clone();
        let tx = self.action_tx.clone();

        let tap = CGEventTap::new(
            CGEventTapLocation::Session,
            CGEventTapPlacement::HeadInsertEventTap,
            CGEventTapOptions::Default,
            vec![CGEventType::KeyDown],
            move |_proxy, _event_type, event| {
                let key_code =
                    event.get_integer_value_field(EventField::KEYBOARD_EVENT_KEYCODE) as u16;
                let flags = event.get_flags();

                let hotkey = Hotkey {
                    key_code,
                    modifiers: Modifiers {
                        cmd: flags.contains(CGEventFlags::CGEventFlagCommand),
                        alt: flags.contains(CGEventFlags::CGEventFlagAlternate),
                        ctrl: flags.contains(CGEventFlags::CGEventFlagControl),
                        shift: flags.contains(CGEventFlags::CGEventFlagShift),
                    },
                };

                match bindings.get(&hotkey) {
                    Some(action) => {
                        tracing::debug!("Hotkey {} -> {:?}", format_hotkey(&hotkey), action);
                        if tx.send(action.clone()).is_err() {
                            tracing::error!("Failed to send action from hotkey");
                        }
                        CallbackResult::Drop
                    }
                    None => CallbackResult::Keep,
                }
            },
        )
        .map_err(|_| {
            anyhow::anyhow!(
                "Failed to create event tap. Make sure Accessibility permission is granted."
            )
        })?;

        tap.enable();

        let source = tap
            .mach_port()
            .create_runloop_source(0)
            .map_err(|_| anyhow::anyhow!("Failed to create run loop source"))
            .context("Hotkey tap")?;

        CFRunLoop::get_current().add_source(&source, unsafe { kCFRunLoopCommonModes });

        Ok(HotkeyTap {
            _tap: tap,
            _source: source,
        })
    }
}

struct HotkeyTap {
    _tap: CGEventTap<'static>,
    _source: CFRunLoopSource,
}
