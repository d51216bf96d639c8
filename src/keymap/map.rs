//! Forward and reverse lookup tables produced by a build.

use std::collections::HashMap;

use serde::Serialize;
use smallvec::SmallVec;

use super::parsing::vk_to_key_name;
use super::types::*;

/// Physical key states able to produce one key input. Usually one or two
/// (main keyboard and keypad).
pub type KeyStateList = SmallVec<[KeyState; 2]>;

/// Translation tables between physical key presses and logical key input for one layout.
#[derive(Debug, Clone, Default)]
pub struct KeyboardMap {
    key_state_to_vim_key_data: HashMap<KeyState, VimKeyData>,
    key_input_to_key_states: HashMap<KeyInput, KeyStateList>,
    oem1_modifier_virtual_key: Option<u32>,
    oem2_modifier_virtual_key: Option<u32>,
}

impl KeyboardMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records `key_state` as producing `key_input` in both tables.
    ///
    /// A later mapping for the same key state replaces the forward entry. Reverse
    /// lists only ever grow and never hold the same key state twice.
    pub(crate) fn add_mapping(&mut self, key_state: KeyState, key_input: KeyInput, text: String) {
        tracing::trace!(%key_state, %key_input, ?text, "add mapping");
        self.key_state_to_vim_key_data
            .insert(key_state, VimKeyData::Key { key_input, text });

        let list = self.key_input_to_key_states.entry(key_input).or_default();
        if !list.contains(&key_state) {
            list.push(key_state);
        }
    }

    /// Records `key_state` as starting a dead-key sequence. Dead keys have no key input.
    pub(crate) fn add_dead_key(&mut self, key_state: KeyState) {
        tracing::trace!(%key_state, "add dead key");
        self.key_state_to_vim_key_data
            .insert(key_state, VimKeyData::DeadKey);
    }

    pub(crate) fn set_oem_modifier_virtual_keys(&mut self, oem1: Option<u32>, oem2: Option<u32>) {
        self.oem1_modifier_virtual_key = oem1;
        self.oem2_modifier_virtual_key = oem2;
    }

    #[inline]
    pub fn vim_key_data(&self, key_state: &KeyState) -> Option<&VimKeyData> {
        self.key_state_to_vim_key_data.get(key_state)
    }

    #[inline]
    pub fn key_input(&self, key_state: &KeyState) -> Option<KeyInput> {
        self.vim_key_data(key_state).and_then(VimKeyData::key_input)
    }

    pub fn is_dead_key(&self, key_state: &KeyState) -> bool {
        self.vim_key_data(key_state)
            .is_some_and(VimKeyData::is_dead_key)
    }

    /// Physical key states which produce `key_input`, empty when none does.
    #[inline]
    pub fn key_states(&self, key_input: &KeyInput) -> &[KeyState] {
        self.key_input_to_key_states
            .get(key_input)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn first_key_state(&self, key_input: &KeyInput) -> Option<KeyState> {
        self.key_states(key_input).first().copied()
    }

    pub fn oem1_modifier_virtual_key(&self) -> Option<u32> {
        self.oem1_modifier_virtual_key
    }

    pub fn oem2_modifier_virtual_key(&self) -> Option<u32> {
        self.oem2_modifier_virtual_key
    }

    /// Number of physical key states with a mapping.
    pub fn len(&self) -> usize {
        self.key_state_to_vim_key_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_state_to_vim_key_data.is_empty()
    }

    pub fn dead_key_count(&self) -> usize {
        self.key_state_to_vim_key_data
            .values()
            .filter(|data| data.is_dead_key())
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyState, &VimKeyData)> {
        self.key_state_to_vim_key_data.iter()
    }

    pub fn key_inputs(&self) -> impl Iterator<Item = (&KeyInput, &[KeyState])> {
        self.key_input_to_key_states
            .iter()
            .map(|(input, list)| (input, list.as_slice()))
    }

    /// Serializable snapshot, entries ordered by key code then modifiers.
    pub fn to_dump(&self) -> KeymapDump {
        let mut states: Vec<&KeyState> = self.key_state_to_vim_key_data.keys().collect();
        states.sort();

        let entries = states
            .into_iter()
            .map(|key_state| {
                let data = &self.key_state_to_vim_key_data[key_state];
                KeymapDumpEntry {
                    key: vk_to_key_name(key_state.key.0),
                    code: key_state.key.0,
                    modifiers: key_state.modifiers,
                    input: data.key_input().map(|input| input.to_string()),
                    text: data.text().map(str::to_string),
                    dead_key: data.is_dead_key(),
                }
            })
            .collect();

        KeymapDump {
            oem1_modifier_key: self.oem1_modifier_virtual_key.map(vk_to_key_name),
            oem2_modifier_key: self.oem2_modifier_virtual_key.map(vk_to_key_name),
            entries,
        }
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(&self.to_dump())?)
    }
}

/// Diagnostic snapshot of a [`KeyboardMap`].
#[derive(Debug, Clone, Serialize)]
pub struct KeymapDump {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oem1_modifier_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oem2_modifier_key: Option<String>,
    pub entries: Vec<KeymapDumpEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeymapDumpEntry {
    pub key: String,
    pub code: u32,
    pub modifiers: VirtualKeyModifiers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub dead_key: bool,
}
