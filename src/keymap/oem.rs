//! Discovery of the virtual keys behind layout-specific extended modifiers.

use crate::virtual_keyboard::{KeyText, KeyboardState, OemDiscovery, VirtualKeyboard};

use super::KeyboardMapBuilder;
use super::types::VirtualKeyModifiers;

/// Range of virtual keys which can act as modifiers on international layouts.
pub const POSSIBLE_MODIFIER_RANGE: std::ops::Range<u32> = 0xBA..0xE5;

impl KeyboardMapBuilder<'_> {
    /// Looks for the virtual key of the extended modifier in `modifiers` which `c` needs.
    ///
    /// Each slot is searched at most once per build, a failed search included. When
    /// both extended flags are reported there's no way to tell them apart with one probe
    /// so nothing is searched.
    pub(super) fn look_for_oem_modifiers(
        &mut self,
        c: char,
        virtual_key: u32,
        modifiers: VirtualKeyModifiers,
    ) {
        let regular = modifiers.regular();
        let extended = modifiers.extended();

        if extended == VirtualKeyModifiers::OEM1 {
            if self.state.oem1.is_pending() {
                let found = self.look_for_oem_modifier_single(c, virtual_key, regular);
                tracing::debug!(%c, ?found, "oem1 modifier search finished");
                self.state.oem1 = OemDiscovery::from(found);
            }
        } else if extended == VirtualKeyModifiers::OEM2 {
            if self.state.oem2.is_pending() {
                let found = self.look_for_oem_modifier_single(c, virtual_key, regular);
                tracing::debug!(%c, ?found, "oem2 modifier search finished");
                self.state.oem2 = OemDiscovery::from(found);
            }
        } else {
            tracing::debug!(%c, %modifiers, "ambiguous extended modifiers, not searching");
        }
    }

    /// First candidate which, held down, makes `virtual_key` produce `c` under `regular`.
    ///
    /// Only the candidate under test is held; the buffer is cleared before each one.
    fn look_for_oem_modifier_single(
        &mut self,
        c: char,
        virtual_key: u32,
        regular: VirtualKeyModifiers,
    ) -> Option<u32> {
        self.probe_count += 1;

        let virtual_keyboard = self.virtual_keyboard;
        let candidates = self
            .possible_modifier_virtual_keys
            .get_or_insert_with(|| possible_modifier_virtual_keys(virtual_keyboard))
            .clone();

        let mut buf = [0u8; 4];
        let target = c.encode_utf8(&mut buf);

        let mut found = None;
        for code in candidates {
            self.state.clear();
            self.state.set_key(code);

            if let KeyText::Text(text) =
                virtual_keyboard.try_get_text(virtual_key, regular, &self.state)
                && text == *target
            {
                found = Some(code);
                break;
            }
        }

        self.state.clear();
        found
    }
}

/// Virtual keys in [`POSSIBLE_MODIFIER_RANGE`] which on their own produce neither text
/// nor a dead key, i.e. behave like a modifier.
fn possible_modifier_virtual_keys(virtual_keyboard: &dyn VirtualKeyboard) -> Vec<u32> {
    let empty = KeyboardState::new();
    let list: Vec<u32> = POSSIBLE_MODIFIER_RANGE
        .filter(|vk| {
            let output = virtual_keyboard.try_get_text(*vk, VirtualKeyModifiers::NONE, &empty);
            output.text().is_none() && !output.is_dead_key()
        })
        .collect();
    tracing::trace!(count = list.len(), "possible modifier virtual keys");
    list
}
