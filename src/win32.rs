//! Virtual keyboard over the active Win32 keyboard layout.

use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;

use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyboardLayout, MAPVK_VK_TO_VSC, MapVirtualKeyExW, ToUnicodeEx, VkKeyScanExW,
};
use windows::Win32::UI::TextServices::HKL;

use crate::keymap::types::VirtualKeyModifiers;
use crate::virtual_keyboard::{KeyText, KeyboardState, VirtualKeyboard};

/// Queries the keyboard layout active for the calling thread.
pub struct Win32VirtualKeyboard {
    hkl: HKL,
}

impl Win32VirtualKeyboard {
    /// Captures the layout active right now. Create a new instance after a layout change.
    pub fn new() -> Self {
        let hkl = unsafe { GetKeyboardLayout(0) };
        Self { hkl }
    }

    /// Locale identifier of the captured layout.
    pub fn layout_id(&self) -> u64 {
        self.hkl.0 as u64
    }

    fn to_unicode(&self, key_array: &[u8; 256], virtual_key: u32) -> i32 {
        let mut buffer = [0u16; 8];
        self.to_unicode_into(key_array, virtual_key, &mut buffer)
    }

    fn to_unicode_into(&self, key_array: &[u8; 256], virtual_key: u32, buffer: &mut [u16]) -> i32 {
        unsafe {
            let scancode = MapVirtualKeyExW(virtual_key, MAPVK_VK_TO_VSC, Some(self.hkl));
            ToUnicodeEx(
                virtual_key,
                scancode,
                key_array,
                buffer,
                0,
                Some(self.hkl),
            )
        }
    }
}

impl Default for Win32VirtualKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualKeyboard for Win32VirtualKeyboard {
    fn try_get_text(
        &self,
        virtual_key: u32,
        modifiers: VirtualKeyModifiers,
        state: &KeyboardState,
    ) -> KeyText {
        let key_array = state.key_array(modifiers);
        let mut buffer = [0u16; 8];
        let len = self.to_unicode_into(&key_array, virtual_key, &mut buffer);

        if len < 0 {
            // The layout keeps the pending dead key; translate again to consume it
            self.to_unicode(&key_array, virtual_key);
            return KeyText::DeadKey;
        }

        if len > 0 {
            let text = OsString::from_wide(&buffer[..len as usize]);
            if let Ok(text) = text.into_string() {
                return KeyText::Text(text);
            }
        }

        KeyText::None
    }

    fn try_map_char(&self, c: char) -> Option<(u32, VirtualKeyModifiers)> {
        let mut units = [0u16; 2];
        let [unit] = c.encode_utf16(&mut units) else {
            return None;
        };

        let result = unsafe { VkKeyScanExW(*unit, self.hkl) };
        if result == -1 {
            return None;
        }

        let virtual_key = (result as u16 & 0xFF) as u32;
        let shift_state = (result as u16 >> 8) as u8;

        let mut modifiers = VirtualKeyModifiers::NONE;
        modifiers.set(VirtualKeyModifiers::SHIFT, shift_state & 0x01 != 0);
        modifiers.set(VirtualKeyModifiers::CONTROL, shift_state & 0x02 != 0);
        modifiers.set(VirtualKeyModifiers::ALT, shift_state & 0x04 != 0);
        modifiers.set(VirtualKeyModifiers::OEM1, shift_state & 0x08 != 0);
        modifiers.set(VirtualKeyModifiers::OEM2, shift_state & 0x10 != 0);

        Some((virtual_key, modifiers))
    }
}
