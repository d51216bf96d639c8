//! Keyboard map construction for the active keyboard layout.
//!
//! A build runs in two passes. The first resolves named keys through fixed virtual
//! keys, records which characters the editor knows about and discovers extended
//! modifier keys along the way. The second sweeps every physical key across the
//! interesting modifier combinations to fill in characters and dead keys.

pub mod codes;
pub mod map;
pub mod oem;
pub mod parsing;
pub mod shift_state;
#[cfg(test)]
mod tests;
pub mod types;

use std::collections::HashMap;

use crate::virtual_keyboard::{KeyText, KeyboardState, VirtualKeyboard};

pub use codes::{KeyCodeSpace, StandardKeyCodes};
pub use map::{KeyStateList, KeyboardMap, KeymapDump, KeymapDumpEntry};
pub use parsing::{special_vim_key_to_virtual_key, standard_key_inputs};
pub use shift_state::interesting_modifiers;
pub use types::*;

/// Builds a [`KeyboardMap`] from a keyboard layout.
///
/// One builder serves exactly one build. Rebuild with a fresh builder whenever the
/// active layout changes.
pub struct KeyboardMapBuilder<'a> {
    virtual_keyboard: &'a dyn VirtualKeyboard,
    key_codes: &'a dyn KeyCodeSpace,
    state: KeyboardState,
    possible_modifier_virtual_keys: Option<Vec<u32>>,
    probe_count: usize,
}

impl<'a> KeyboardMapBuilder<'a> {
    pub fn new(virtual_keyboard: &'a dyn VirtualKeyboard, key_codes: &'a dyn KeyCodeSpace) -> Self {
        Self {
            virtual_keyboard,
            key_codes,
            state: KeyboardState::new(),
            possible_modifier_virtual_keys: None,
            probe_count: 0,
        }
    }

    /// Starts from `state`, typically one with already known extended modifier keys.
    pub fn with_state(mut self, state: KeyboardState) -> Self {
        self.state = state;
        self.state.clear();
        self
    }

    /// Layout record of the build so far.
    pub fn state(&self) -> &KeyboardState {
        &self.state
    }

    /// Number of extended modifier searches run so far.
    pub fn probe_count(&self) -> usize {
        self.probe_count
    }

    /// Builds the tables for `key_inputs`, the editor's logical key-input alphabet.
    pub fn create(&mut self, key_inputs: &[KeyInput]) -> KeyboardMap {
        let mut map = KeyboardMap::new();

        let char_map = self.build_key_input_data(&mut map, key_inputs);
        self.build_remaining_data(&mut map, &char_map);

        map.set_oem_modifier_virtual_keys(
            self.state.oem1_modifier_virtual_key(),
            self.state.oem2_modifier_virtual_key(),
        );
        tracing::debug!(
            key_states = map.len(),
            dead_keys = map.dead_key_count(),
            oem1 = ?map.oem1_modifier_virtual_key(),
            oem2 = ?map.oem2_modifier_virtual_key(),
            "keyboard map built"
        );
        map
    }

    /// Maps named keys to their fixed virtual keys and collects the known characters.
    fn build_key_input_data(
        &mut self,
        map: &mut KeyboardMap,
        key_inputs: &[KeyInput],
    ) -> HashMap<char, KeyInput> {
        let mut char_map = HashMap::with_capacity(key_inputs.len());

        for &key_input in key_inputs {
            match key_input {
                KeyInput::Named(VimKey::Nop) => continue,
                KeyInput::Named(key) => {
                    let virtual_key = special_vim_key_to_virtual_key(key);
                    debug_assert!(
                        virtual_key.is_some(),
                        "named key {:?} has neither a virtual key nor a character",
                        key
                    );
                    let Some(virtual_key) = virtual_key else {
                        tracing::warn!(?key, "named key without virtual key in alphabet");
                        continue;
                    };

                    // The layout may attach text to these keys too
                    let text = self
                        .virtual_keyboard
                        .try_get_text(virtual_key, VirtualKeyModifiers::NONE, &self.state)
                        .text()
                        .unwrap_or_default()
                        .to_string();

                    let Some(physical_key) = self.key_codes.key_from_virtual_key(virtual_key)
                    else {
                        tracing::trace!(?key, virtual_key, "no physical key");
                        continue;
                    };

                    let key_state = KeyState::new(physical_key, VirtualKeyModifiers::NONE);
                    map.add_mapping(key_state, key_input, text);
                }
                KeyInput::Char(c) => {
                    if let Some((virtual_key, modifiers)) = self.virtual_keyboard.try_map_char(c)
                        && modifiers.intersects(VirtualKeyModifiers::EXTENDED)
                    {
                        self.look_for_oem_modifiers(c, virtual_key, modifiers);
                    }

                    char_map.insert(c, key_input);
                }
            }
        }

        tracing::debug!(
            named = map.len(),
            chars = char_map.len(),
            "named keys resolved"
        );
        char_map
    }

    /// Sweeps every physical key across the interesting modifier combinations.
    ///
    /// When two key states produce the same character both are kept. When the same key
    /// state is visited twice the later visit wins.
    fn build_remaining_data(&mut self, map: &mut KeyboardMap, char_map: &HashMap<char, KeyInput>) {
        let shift_states = interesting_modifiers(&self.state);

        for key in self.key_codes.physical_keys() {
            let Some(virtual_key) = self.key_codes.virtual_key_from_key(key) else {
                continue;
            };

            for &modifiers in &shift_states {
                match self
                    .virtual_keyboard
                    .try_get_text(virtual_key, modifiers, &self.state)
                {
                    KeyText::Text(text) => {
                        let mut chars = text.chars();
                        if let (Some(c), None) = (chars.next(), chars.next())
                            && let Some(&key_input) = char_map.get(&c)
                        {
                            map.add_mapping(KeyState::new(key, modifiers), key_input, text);
                        }
                    }
                    KeyText::DeadKey => {
                        // Recorded without the modifiers which triggered it
                        map.add_dead_key(KeyState::new(key, VirtualKeyModifiers::NONE));
                    }
                    KeyText::None => {}
                }
            }
        }
    }
}
