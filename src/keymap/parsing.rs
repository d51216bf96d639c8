//! Virtual key tables and name parsing utilities.

use super::types::*;

/// Gets the virtual key code for a named key which maps to one very specific key.
///
/// Only named keys are covered. Character inputs and named keys without a dedicated
/// virtual key return `None`, which means they are resolved through the layout instead.
///
/// Constants follow the Win32 virtual key code table.
pub fn special_vim_key_to_virtual_key(key: VimKey) -> Option<u32> {
    let vk = match key {
        VimKey::Enter => 0x0D,
        VimKey::Tab => 0x09,
        VimKey::Escape => 0x1B,
        VimKey::LineFeed => 0x00,
        VimKey::Back => 0x08,
        VimKey::Delete => 0x2E,
        VimKey::Left => 0x25,
        VimKey::Up => 0x26,
        VimKey::Right => 0x27,
        VimKey::Down => 0x28,
        VimKey::Help => 0x2F,
        VimKey::Insert => 0x2D,
        VimKey::Home => 0x24,
        VimKey::End => 0x23,
        VimKey::PageUp => 0x21,
        VimKey::PageDown => 0x22,
        VimKey::Break => 0x03,
        VimKey::F1 => 0x70,
        VimKey::F2 => 0x71,
        VimKey::F3 => 0x72,
        VimKey::F4 => 0x73,
        VimKey::F5 => 0x74,
        VimKey::F6 => 0x75,
        VimKey::F7 => 0x76,
        VimKey::F8 => 0x77,
        VimKey::F9 => 0x78,
        VimKey::F10 => 0x79,
        VimKey::F11 => 0x7A,
        VimKey::F12 => 0x7B,
        VimKey::KeypadMultiply => 0x6A,
        VimKey::KeypadPlus => 0x6B,
        VimKey::KeypadMinus => 0x6D,
        VimKey::KeypadDecimal => 0x6E,
        VimKey::KeypadDivide => 0x6F,
        VimKey::Keypad0 => 0x60,
        VimKey::Keypad1 => 0x61,
        VimKey::Keypad2 => 0x62,
        VimKey::Keypad3 => 0x63,
        VimKey::Keypad4 => 0x64,
        VimKey::Keypad5 => 0x65,
        VimKey::Keypad6 => 0x66,
        VimKey::Keypad7 => 0x67,
        VimKey::Keypad8 => 0x68,
        VimKey::Keypad9 => 0x69,
        VimKey::Nop | VimKey::LeftMouse | VimKey::MiddleMouse | VimKey::RightMouse => {
            return None;
        }
    };
    Some(vk)
}

/// Default logical key-input alphabet.
///
/// Every named key first, in declaration order, followed by the printable ASCII
/// characters. Mouse keys are not part of the keyboard alphabet.
pub fn standard_key_inputs() -> Vec<KeyInput> {
    let named = VimKey::all_keys()
        .iter()
        .filter(|key| {
            !matches!(
                key,
                VimKey::LeftMouse | VimKey::MiddleMouse | VimKey::RightMouse
            )
        })
        .map(|key| KeyInput::Named(*key));
    let chars = (0x20u8..=0x7E).map(|b| KeyInput::Char(b as char));
    named.chain(chars).collect()
}

/// Converts virtual key code to key name string.
#[inline]
pub fn vk_to_key_name(vk: u32) -> String {
    match vk {
        // A-Z, 0-9
        0x41..=0x5A | 0x30..=0x39 => char::from_u32(vk)
            .map(|c| c.to_string())
            .unwrap_or_default(),
        // Numpad 0-9
        0x60..=0x69 => format!("NUMPAD{}", vk - 0x60),
        // F1-F24
        0x70..=0x87 => format!("F{}", vk - 0x70 + 1),
        0x03 => "CANCEL".to_string(),
        0x08 => "BACK".to_string(),
        0x09 => "TAB".to_string(),
        0x0C => "CLEAR".to_string(),
        0x0D => "RETURN".to_string(),
        0x10 => "SHIFT".to_string(),
        0x11 => "CTRL".to_string(),
        0x12 => "ALT".to_string(),
        0x13 => "PAUSE".to_string(),
        0x14 => "CAPITAL".to_string(),
        0x1B => "ESCAPE".to_string(),
        0x20 => "SPACE".to_string(),
        0x21 => "PAGEUP".to_string(),
        0x22 => "PAGEDOWN".to_string(),
        0x23 => "END".to_string(),
        0x24 => "HOME".to_string(),
        0x25 => "LEFT".to_string(),
        0x26 => "UP".to_string(),
        0x27 => "RIGHT".to_string(),
        0x28 => "DOWN".to_string(),
        0x2C => "SNAPSHOT".to_string(),
        0x2D => "INSERT".to_string(),
        0x2E => "DELETE".to_string(),
        0x2F => "HELP".to_string(),
        0x5B => "LWIN".to_string(),
        0x5C => "RWIN".to_string(),
        0x5D => "APPS".to_string(),
        // Numpad operators
        0x6A => "MULTIPLY".to_string(),
        0x6B => "ADD".to_string(),
        0x6C => "SEPARATOR".to_string(),
        0x6D => "SUBTRACT".to_string(),
        0x6E => "DECIMAL".to_string(),
        0x6F => "DIVIDE".to_string(),
        0x90 => "NUMLOCK".to_string(),
        0x91 => "SCROLL".to_string(),
        0xA0 => "LSHIFT".to_string(),
        0xA1 => "RSHIFT".to_string(),
        0xA2 => "LCTRL".to_string(),
        0xA3 => "RCTRL".to_string(),
        0xA4 => "LALT".to_string(),
        0xA5 => "RALT".to_string(),
        // OEM keys
        0xBA => "OEM_1".to_string(),
        0xBB => "OEM_PLUS".to_string(),
        0xBC => "OEM_COMMA".to_string(),
        0xBD => "OEM_MINUS".to_string(),
        0xBE => "OEM_PERIOD".to_string(),
        0xBF => "OEM_2".to_string(),
        0xC0 => "OEM_3".to_string(),
        0xC1 => "ABNT_C1".to_string(),
        0xC2 => "ABNT_C2".to_string(),
        0xDB => "OEM_4".to_string(),
        0xDC => "OEM_5".to_string(),
        0xDD => "OEM_6".to_string(),
        0xDE => "OEM_7".to_string(),
        0xDF => "OEM_8".to_string(),
        0xE1 => "OEM_AX".to_string(),
        0xE2 => "OEM_102".to_string(),
        // Unknown key - format as hex
        _ => format!("VK_{:02X}", vk),
    }
}

/// Parses a key name (as produced by [`vk_to_key_name`]) or a `0x` hex literal.
pub fn key_name_to_vk(key_name: &str) -> Option<u32> {
    let key = key_name.trim().to_uppercase();

    if let Some(hex) = key.strip_prefix("0X").or_else(|| key.strip_prefix("VK_"))
        && let Ok(vk) = u32::from_str_radix(hex, 16)
        && vk <= 0xFF
    {
        return Some(vk);
    }

    // letter and number keys
    if key.len() == 1
        && let Some(c) = key.chars().next()
        && (c.is_ascii_alphabetic() || c.is_ascii_digit())
    {
        return Some(c as u32);
    }

    // F1-F24
    if let Some(num) = key.strip_prefix('F')
        && let Ok(num) = num.parse::<u32>()
        && (1..=24).contains(&num)
    {
        return Some(0x70 + num - 1);
    }

    // Numpad keys
    if let Some(num) = key.strip_prefix("NUMPAD")
        && let Ok(num) = num.parse::<u32>()
        && num <= 9
    {
        return Some(0x60 + num);
    }

    match key.as_str() {
        "CANCEL" | "BREAK" => Some(0x03),
        "BACKSPACE" | "BACK" => Some(0x08),
        "TAB" => Some(0x09),
        "CLEAR" => Some(0x0C),
        "ENTER" | "RETURN" => Some(0x0D),
        "SHIFT" => Some(0x10),
        "CTRL" => Some(0x11),
        "ALT" => Some(0x12),
        "PAUSE" => Some(0x13),
        "CAPSLOCK" | "CAPITAL" => Some(0x14),
        "ESC" | "ESCAPE" => Some(0x1B),
        "SPACE" => Some(0x20),
        "PAGEUP" => Some(0x21),
        "PAGEDOWN" => Some(0x22),
        "END" => Some(0x23),
        "HOME" => Some(0x24),
        "LEFT" => Some(0x25),
        "UP" => Some(0x26),
        "RIGHT" => Some(0x27),
        "DOWN" => Some(0x28),
        "SNAPSHOT" => Some(0x2C),
        "INSERT" => Some(0x2D),
        "DELETE" => Some(0x2E),
        "HELP" => Some(0x2F),
        "LWIN" => Some(0x5B),
        "RWIN" => Some(0x5C),
        "APPS" => Some(0x5D),
        "MULTIPLY" => Some(0x6A),
        "ADD" => Some(0x6B),
        "SEPARATOR" => Some(0x6C),
        "SUBTRACT" => Some(0x6D),
        "DECIMAL" => Some(0x6E),
        "DIVIDE" => Some(0x6F),
        "NUMLOCK" => Some(0x90),
        "SCROLL" => Some(0x91),
        "LSHIFT" => Some(0xA0),
        "RSHIFT" => Some(0xA1),
        "LCTRL" => Some(0xA2),
        "RCTRL" => Some(0xA3),
        "LALT" => Some(0xA4),
        "RALT" => Some(0xA5),
        "OEM_1" => Some(0xBA),
        "OEM_PLUS" => Some(0xBB),
        "OEM_COMMA" => Some(0xBC),
        "OEM_MINUS" => Some(0xBD),
        "OEM_PERIOD" => Some(0xBE),
        "OEM_2" => Some(0xBF),
        "OEM_3" => Some(0xC0),
        "ABNT_C1" => Some(0xC1),
        "ABNT_C2" => Some(0xC2),
        "OEM_4" => Some(0xDB),
        "OEM_5" => Some(0xDC),
        "OEM_6" => Some(0xDD),
        "OEM_7" => Some(0xDE),
        "OEM_8" => Some(0xDF),
        "OEM_AX" => Some(0xE1),
        "OEM_102" => Some(0xE2),
        _ => None,
    }
}
