//! Virtual keyboard backed by a layout description file.
//!
//! Describes a layout as a list of key entries so a keyboard map can be built on
//! hosts without a native layout API, and so layouts can be replayed in tests.

use std::collections::HashMap;
use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::keymap::types::VirtualKeyModifiers;
use crate::virtual_keyboard::{KeyText, KeyboardState, VirtualKeyboard};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LayoutDescription {
    pub name: String,
    /// Key reported as the first extended modifier by character lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem1_virtual_key: Option<u32>,
    /// Key reported as the second extended modifier by character lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem2_virtual_key: Option<u32>,
    #[serde(default)]
    pub keys: Vec<LayoutKey>,
}

/// What one virtual key produces under one modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LayoutKey {
    pub virtual_key: u32,
    #[serde(default = "no_modifiers")]
    pub modifiers: VirtualKeyModifiers,
    /// Extra key which must be held down, e.g. an extended modifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub held: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub dead: bool,
}

fn no_modifiers() -> VirtualKeyModifiers {
    VirtualKeyModifiers::NONE
}

impl LayoutKey {
    pub fn text(virtual_key: u32, modifiers: VirtualKeyModifiers, text: &str) -> Self {
        Self {
            virtual_key,
            modifiers,
            held: None,
            text: Some(text.to_string()),
            dead: false,
        }
    }

    pub fn dead(virtual_key: u32, modifiers: VirtualKeyModifiers) -> Self {
        Self {
            virtual_key,
            modifiers,
            held: None,
            text: None,
            dead: true,
        }
    }

    pub fn with_held(mut self, held: u32) -> Self {
        self.held = Some(held);
        self
    }

    fn output(&self) -> KeyText {
        match &self.text {
            Some(text) => KeyText::Text(text.clone()),
            None if self.dead => KeyText::DeadKey,
            None => KeyText::None,
        }
    }
}

type EntryKey = (u32, VirtualKeyModifiers, Option<u32>);

/// [`VirtualKeyboard`] answering from a [`LayoutDescription`].
///
/// Extended modifiers in a query are folded into held keys through the discovered
/// keys of the [`KeyboardState`]. Entries support at most one held key.
#[derive(Debug, Clone)]
pub struct TableKeyboard {
    layout: LayoutDescription,
    entries: HashMap<EntryKey, KeyText>,
}

impl TableKeyboard {
    pub fn new(layout: LayoutDescription) -> anyhow::Result<Self> {
        let mut entries = HashMap::with_capacity(layout.keys.len());
        for key in &layout.keys {
            if key.virtual_key > 0xFF {
                anyhow::bail!("Virtual key {:#x} is out of range", key.virtual_key);
            }
            if key.modifiers.intersects(VirtualKeyModifiers::EXTENDED) {
                anyhow::bail!(
                    "Key {:#x}: extended modifiers must be given as a held key",
                    key.virtual_key
                );
            }
            if key.text.is_some() && key.dead {
                anyhow::bail!(
                    "Key {:#x}: an entry is either text or a dead key",
                    key.virtual_key
                );
            }
            // First entry wins
            entries
                .entry((key.virtual_key, key.modifiers, key.held))
                .or_insert_with(|| key.output());
        }
        Ok(Self { layout, entries })
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let layout: LayoutDescription = toml::from_str(content)?;
        Self::new(layout)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn layout(&self) -> &LayoutDescription {
        &self.layout
    }

    pub fn name(&self) -> &str {
        &self.layout.name
    }

    fn extended_flag(&self, held: Option<u32>) -> Option<VirtualKeyModifiers> {
        match held {
            None => Some(VirtualKeyModifiers::NONE),
            Some(vk) if Some(vk) == self.layout.oem1_virtual_key => {
                Some(VirtualKeyModifiers::OEM1)
            }
            Some(vk) if Some(vk) == self.layout.oem2_virtual_key => {
                Some(VirtualKeyModifiers::OEM2)
            }
            Some(_) => None,
        }
    }
}

impl VirtualKeyboard for TableKeyboard {
    fn try_get_text(
        &self,
        virtual_key: u32,
        modifiers: VirtualKeyModifiers,
        state: &KeyboardState,
    ) -> KeyText {
        let mut held: SmallVec<[u32; 4]> = state.held_keys().collect();

        if modifiers.contains(VirtualKeyModifiers::OEM1) {
            match state.oem1_modifier_virtual_key() {
                Some(vk) => held.push(vk),
                None => return KeyText::None,
            }
        }
        if modifiers.contains(VirtualKeyModifiers::OEM2) {
            match state.oem2_modifier_virtual_key() {
                Some(vk) => held.push(vk),
                None => return KeyText::None,
            }
        }

        held.sort_unstable();
        held.dedup();
        let held = match held.as_slice() {
            [] => None,
            [vk] => Some(*vk),
            _ => return KeyText::None,
        };

        self.entries
            .get(&(virtual_key, modifiers.regular(), held))
            .cloned()
            .unwrap_or(KeyText::None)
    }

    fn try_map_char(&self, c: char) -> Option<(u32, VirtualKeyModifiers)> {
        self.layout.keys.iter().find_map(|key| {
            let text = key.text.as_deref()?;
            let mut chars = text.chars();
            if chars.next() != Some(c) || chars.next().is_some() {
                return None;
            }
            let extended = self.extended_flag(key.held)?;
            Some((key.virtual_key, key.modifiers | extended))
        })
    }
}
