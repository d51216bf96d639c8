//! Modifier combinations swept for every physical key.

use crate::virtual_keyboard::KeyboardState;

use super::types::VirtualKeyModifiers;

/// Gets the interesting shift state combinations for the layout.
///
/// Combinations no layout uses (Alt alone, Shift+Alt) are left out. Extended
/// modifier combinations are only included for the slots with a discovered key.
/// The order decides which mapping wins when two combinations produce the same key state.
pub fn interesting_modifiers(state: &KeyboardState) -> Vec<VirtualKeyModifiers> {
    use VirtualKeyModifiers as M;

    let mut list = vec![
        M::NONE,
        M::SHIFT,
        M::SHIFT | M::CONTROL,
        M::SHIFT | M::CONTROL | M::ALT,
        M::CONTROL,
        M::CONTROL | M::ALT,
        M::CAPS_LOCK,
    ];

    let has_oem1 = state.oem1_modifier_virtual_key().is_some();
    let has_oem2 = state.oem2_modifier_virtual_key().is_some();

    if has_oem1 {
        push_extended(&mut list, M::OEM1);
    }

    if has_oem2 {
        push_extended(&mut list, M::OEM2);
    }

    if has_oem1 && has_oem2 {
        let both = M::OEM1 | M::OEM2;
        list.extend([both, both | M::SHIFT, both | M::CONTROL, both | M::ALT]);
    }

    list
}

fn push_extended(list: &mut Vec<VirtualKeyModifiers>, oem: VirtualKeyModifiers) {
    use VirtualKeyModifiers as M;

    list.extend([
        oem,
        oem | M::SHIFT,
        oem | M::SHIFT | M::CONTROL,
        oem | M::SHIFT | M::ALT,
        oem | M::SHIFT | M::CONTROL | M::ALT,
        oem | M::CONTROL,
        oem | M::CONTROL | M::ALT,
        oem | M::ALT,
    ]);
}
