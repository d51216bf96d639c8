//! Type definitions for physical and logical key input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Modifier keys held while a virtual key is pressed.
    ///
    /// `OEM1` and `OEM2` stand for the layout-specific extra modifier keys found on
    /// some international layouts. `REGULAR` and `EXTENDED` are masks used to split
    /// a reported combination into its standard and layout-specific parts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub struct VirtualKeyModifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const CAPS_LOCK = 1 << 3;
        const OEM1 = 1 << 4;
        const OEM2 = 1 << 5;

        const REGULAR = Self::SHIFT.bits()
            | Self::CONTROL.bits()
            | Self::ALT.bits()
            | Self::CAPS_LOCK.bits();
        const EXTENDED = Self::OEM1.bits() | Self::OEM2.bits();
    }
}

impl VirtualKeyModifiers {
    pub const NONE: Self = Self::empty();

    /// Standard (non layout-specific) part of the combination.
    #[inline]
    pub fn regular(self) -> Self {
        self & Self::REGULAR
    }

    /// Layout-specific part of the combination.
    #[inline]
    pub fn extended(self) -> Self {
        self & Self::EXTENDED
    }
}

impl fmt::Display for VirtualKeyModifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "None");
        }
        let names = [
            (Self::SHIFT, "Shift"),
            (Self::CONTROL, "Control"),
            (Self::ALT, "Alt"),
            (Self::CAPS_LOCK, "CapsLock"),
            (Self::OEM1, "Oem1"),
            (Self::OEM2, "Oem2"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    write!(f, "+")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Platform key code identifying a hardware key, independent of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhysicalKey(pub u32);

impl fmt::Display for PhysicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", super::parsing::vk_to_key_name(self.0))
    }
}

/// A physical key press: hardware key plus the active modifier combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyState {
    pub key: PhysicalKey,
    pub modifiers: VirtualKeyModifiers,
}

impl KeyState {
    pub const fn new(key: PhysicalKey, modifiers: VirtualKeyModifiers) -> Self {
        Self { key, modifiers }
    }
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// Named logical keys of the editor's key-input alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VimKey {
    Nop,
    Enter,
    Tab,
    Escape,
    LineFeed,
    Back,
    Delete,
    Left,
    Up,
    Right,
    Down,
    Help,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Break,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    KeypadMultiply,
    KeypadPlus,
    KeypadMinus,
    KeypadDecimal,
    KeypadDivide,
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    LeftMouse,
    MiddleMouse,
    RightMouse,
}

impl VimKey {
    pub fn all_keys() -> &'static [VimKey] {
        &[
            VimKey::Nop,
            VimKey::Enter,
            VimKey::Tab,
            VimKey::Escape,
            VimKey::LineFeed,
            VimKey::Back,
            VimKey::Delete,
            VimKey::Left,
            VimKey::Up,
            VimKey::Right,
            VimKey::Down,
            VimKey::Help,
            VimKey::Insert,
            VimKey::Home,
            VimKey::End,
            VimKey::PageUp,
            VimKey::PageDown,
            VimKey::Break,
            VimKey::F1,
            VimKey::F2,
            VimKey::F3,
            VimKey::F4,
            VimKey::F5,
            VimKey::F6,
            VimKey::F7,
            VimKey::F8,
            VimKey::F9,
            VimKey::F10,
            VimKey::F11,
            VimKey::F12,
            VimKey::KeypadMultiply,
            VimKey::KeypadPlus,
            VimKey::KeypadMinus,
            VimKey::KeypadDecimal,
            VimKey::KeypadDivide,
            VimKey::Keypad0,
            VimKey::Keypad1,
            VimKey::Keypad2,
            VimKey::Keypad3,
            VimKey::Keypad4,
            VimKey::Keypad5,
            VimKey::Keypad6,
            VimKey::Keypad7,
            VimKey::Keypad8,
            VimKey::Keypad9,
            VimKey::LeftMouse,
            VimKey::MiddleMouse,
            VimKey::RightMouse,
        ]
    }

    /// Vim notation name, without the surrounding angle brackets.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nop => "Nop",
            Self::Enter => "CR",
            Self::Tab => "Tab",
            Self::Escape => "Esc",
            Self::LineFeed => "NL",
            Self::Back => "BS",
            Self::Delete => "Del",
            Self::Left => "Left",
            Self::Up => "Up",
            Self::Right => "Right",
            Self::Down => "Down",
            Self::Help => "Help",
            Self::Insert => "Insert",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Break => "Break",
            Self::F1 => "F1",
            Self::F2 => "F2",
            Self::F3 => "F3",
            Self::F4 => "F4",
            Self::F5 => "F5",
            Self::F6 => "F6",
            Self::F7 => "F7",
            Self::F8 => "F8",
            Self::F9 => "F9",
            Self::F10 => "F10",
            Self::F11 => "F11",
            Self::F12 => "F12",
            Self::KeypadMultiply => "kMultiply",
            Self::KeypadPlus => "kPlus",
            Self::KeypadMinus => "kMinus",
            Self::KeypadDecimal => "kPoint",
            Self::KeypadDivide => "kDivide",
            Self::Keypad0 => "k0",
            Self::Keypad1 => "k1",
            Self::Keypad2 => "k2",
            Self::Keypad3 => "k3",
            Self::Keypad4 => "k4",
            Self::Keypad5 => "k5",
            Self::Keypad6 => "k6",
            Self::Keypad7 => "k7",
            Self::Keypad8 => "k8",
            Self::Keypad9 => "k9",
            Self::LeftMouse => "LeftMouse",
            Self::MiddleMouse => "MiddleMouse",
            Self::RightMouse => "RightMouse",
        }
    }
}

/// A logical key press of the editor: a named key or a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyInput {
    Named(VimKey),
    Char(char),
}

impl From<VimKey> for KeyInput {
    fn from(key: VimKey) -> Self {
        KeyInput::Named(key)
    }
}

impl From<char> for KeyInput {
    fn from(c: char) -> Self {
        KeyInput::Char(c)
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyInput::Named(key) => write!(f, "<{}>", key.as_str()),
            KeyInput::Char(' ') => write!(f, "<Space>"),
            KeyInput::Char('<') => write!(f, "<lt>"),
            KeyInput::Char(c) => write!(f, "{}", c),
        }
    }
}

impl FromStr for KeyInput {
    type Err = anyhow::Error;

    /// Parses Vim notation (`<CR>`, `<k0>`, `<Space>`, `<lt>`) or a single character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(KeyInput::Char(c));
        }

        let name = s
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .ok_or_else(|| anyhow::anyhow!("Invalid key input: {}", s))?;

        match name.to_ascii_lowercase().as_str() {
            "space" => return Ok(KeyInput::Char(' ')),
            "lt" => return Ok(KeyInput::Char('<')),
            "return" | "enter" => return Ok(KeyInput::Named(VimKey::Enter)),
            "escape" => return Ok(KeyInput::Named(VimKey::Escape)),
            _ => {}
        }

        VimKey::all_keys()
            .iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(name))
            .map(|key| KeyInput::Named(*key))
            .ok_or_else(|| anyhow::anyhow!("Unknown key name: {}", s))
    }
}

/// What a physical key press resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VimKeyData {
    /// The press produces `key_input`; `text` is empty for purely virtual keys.
    Key { key_input: KeyInput, text: String },
    /// The press starts a dead-key sequence.
    DeadKey,
}

impl VimKeyData {
    pub fn key_input(&self) -> Option<KeyInput> {
        match self {
            VimKeyData::Key { key_input, .. } => Some(*key_input),
            VimKeyData::DeadKey => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            VimKeyData::Key { text, .. } => Some(text),
            VimKeyData::DeadKey => None,
        }
    }

    #[inline]
    pub fn is_dead_key(&self) -> bool {
        matches!(self, VimKeyData::DeadKey)
    }
}
