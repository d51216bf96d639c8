//! Layout descriptions shared by the integration tests.

#![allow(dead_code)]

use layout_keymap::TableKeyboard;

/// Small US style layout: letters, digits, keypad digits, a few punctuation keys.
pub const US_LAYOUT: &str = r#"
name = "US"

[[keys]]
virtual_key = 0x41
text = "a"

[[keys]]
virtual_key = 0x41
modifiers = "SHIFT"
text = "A"

[[keys]]
virtual_key = 0x41
modifiers = "CAPS_LOCK"
text = "A"

[[keys]]
virtual_key = 0x42
text = "b"

[[keys]]
virtual_key = 0x42
modifiers = "SHIFT"
text = "B"

[[keys]]
virtual_key = 0x31
text = "1"

[[keys]]
virtual_key = 0x31
modifiers = "SHIFT"
text = "!"

[[keys]]
virtual_key = 0x61
text = "1"

[[keys]]
virtual_key = 0x20
text = " "

[[keys]]
virtual_key = 0x09
text = "\t"

[[keys]]
virtual_key = 0xBD
text = "-"

[[keys]]
virtual_key = 0x6D
text = "-"
"#;

/// German style layout: dead accent keys and characters behind an extended modifier.
pub const EXTENDED_LAYOUT: &str = r##"
name = "Extended"
oem1_virtual_key = 0xE2

[[keys]]
virtual_key = 0x51
text = "q"

[[keys]]
virtual_key = 0x51
modifiers = "SHIFT"
text = "Q"

[[keys]]
virtual_key = 0x51
modifiers = "SHIFT"
held = 0xE2
text = "@"

[[keys]]
virtual_key = 0x45
text = "e"

[[keys]]
virtual_key = 0x45
held = 0xE2
text = "€"

[[keys]]
virtual_key = 0xDD
dead = true

[[keys]]
virtual_key = 0xDC
modifiers = "CAPS_LOCK"
dead = true

[[keys]]
virtual_key = 0xBF
text = "#"
"##;

pub fn us_keyboard() -> TableKeyboard {
    TableKeyboard::from_toml_str(US_LAYOUT).expect("Failed to parse US layout")
}

pub fn extended_keyboard() -> TableKeyboard {
    TableKeyboard::from_toml_str(EXTENDED_LAYOUT).expect("Failed to parse extended layout")
}
