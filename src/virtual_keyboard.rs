//! Keyboard layout query capability and the per-build keyboard state.

use crate::keymap::types::VirtualKeyModifiers;

const VK_SHIFT: usize = 0x10;
const VK_CONTROL: usize = 0x11;
const VK_MENU: usize = 0x12;
const VK_CAPITAL: usize = 0x14;

/// Result of asking the layout what a key press produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyText {
    /// The press produces this text (possibly more than one character).
    Text(String),
    /// The press produces nothing yet but starts a dead-key sequence.
    DeadKey,
    /// The press produces nothing.
    None,
}

impl KeyText {
    pub fn text(&self) -> Option<&str> {
        match self {
            KeyText::Text(text) => Some(text),
            _ => None,
        }
    }

    #[inline]
    pub fn is_dead_key(&self) -> bool {
        matches!(self, KeyText::DeadKey)
    }
}

/// Text production and reverse lookup for the active keyboard layout.
pub trait VirtualKeyboard {
    /// Text produced by `virtual_key` under `modifiers`, with every key held down in
    /// `state` treated as pressed. OEM1/OEM2 resolve to the virtual keys recorded in
    /// `state`.
    fn try_get_text(
        &self,
        virtual_key: u32,
        modifiers: VirtualKeyModifiers,
        state: &KeyboardState,
    ) -> KeyText;

    /// Virtual key and modifier combination which produce `c`.
    fn try_map_char(&self, c: char) -> Option<(u32, VirtualKeyModifiers)>;
}

/// Outcome of looking for the virtual key behind an extended modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OemDiscovery {
    /// Not looked for yet.
    #[default]
    Pending,
    /// Looked for and not found. Never retried within the same build.
    Absent,
    Found(u32),
}

impl OemDiscovery {
    #[inline]
    pub fn virtual_key(&self) -> Option<u32> {
        match self {
            OemDiscovery::Found(vk) => Some(*vk),
            _ => None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, OemDiscovery::Pending)
    }
}

impl From<Option<u32>> for OemDiscovery {
    fn from(vk: Option<u32>) -> Self {
        match vk {
            Some(vk) => OemDiscovery::Found(vk),
            None => OemDiscovery::Absent,
        }
    }
}

/// Scratch keyboard-state buffer plus the layout record for one build.
#[derive(Debug, Clone)]
pub struct KeyboardState {
    keys: [bool; 256],
    pub oem1: OemDiscovery,
    pub oem2: OemDiscovery,
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            keys: [false; 256],
            oem1: OemDiscovery::Pending,
            oem2: OemDiscovery::Pending,
        }
    }

    /// State with already known extended modifier keys. Known slots are never probed.
    pub fn with_oem_modifiers(oem1: Option<u32>, oem2: Option<u32>) -> Self {
        let mut state = Self::new();
        if let Some(vk) = oem1 {
            state.oem1 = OemDiscovery::Found(vk);
        }
        if let Some(vk) = oem2 {
            state.oem2 = OemDiscovery::Found(vk);
        }
        state
    }

    #[inline]
    pub fn oem1_modifier_virtual_key(&self) -> Option<u32> {
        self.oem1.virtual_key()
    }

    #[inline]
    pub fn oem2_modifier_virtual_key(&self) -> Option<u32> {
        self.oem2.virtual_key()
    }

    /// Releases every key of the scratch buffer.
    pub fn clear(&mut self) {
        self.keys = [false; 256];
    }

    /// Marks `virtual_key` as held down. Codes outside 0..=255 are ignored.
    pub fn set_key(&mut self, virtual_key: u32) {
        if let Some(slot) = self.keys.get_mut(virtual_key as usize) {
            *slot = true;
        }
    }

    pub fn is_key_down(&self, virtual_key: u32) -> bool {
        self.keys
            .get(virtual_key as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Keys of the scratch buffer held down, ascending.
    pub fn held_keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, down)| **down)
            .map(|(vk, _)| vk as u32)
    }

    /// Win32 style 256 byte key array for `modifiers` on top of the scratch buffer.
    ///
    /// Held keys get the high bit, CapsLock gets the toggle bit. OEM1/OEM2 press the
    /// discovered modifier keys and are dropped when the slot has none.
    pub fn key_array(&self, modifiers: VirtualKeyModifiers) -> [u8; 256] {
        let mut array = [0u8; 256];
        for vk in self.held_keys() {
            array[vk as usize] |= 0x80;
        }
        if modifiers.contains(VirtualKeyModifiers::SHIFT) {
            array[VK_SHIFT] |= 0x80;
        }
        if modifiers.contains(VirtualKeyModifiers::CONTROL) {
            array[VK_CONTROL] |= 0x80;
        }
        if modifiers.contains(VirtualKeyModifiers::ALT) {
            array[VK_MENU] |= 0x80;
        }
        if modifiers.contains(VirtualKeyModifiers::CAPS_LOCK) {
            array[VK_CAPITAL] |= 0x01;
        }
        if modifiers.contains(VirtualKeyModifiers::OEM1)
            && let Some(vk) = self.oem1_modifier_virtual_key()
        {
            array[(vk & 0xFF) as usize] |= 0x80;
        }
        if modifiers.contains(VirtualKeyModifiers::OEM2)
            && let Some(vk) = self.oem2_modifier_virtual_key()
        {
            array[(vk & 0xFF) as usize] |= 0x80;
        }
        array
    }
}
