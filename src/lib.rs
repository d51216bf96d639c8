//! Translation tables between an editor's logical key input and the physical key
//! presses of the active keyboard layout.
//!
//! [`KeyboardMapBuilder`] queries a [`VirtualKeyboard`] and produces a [`KeyboardMap`]
//! holding both directions of the translation.

pub mod cli;
pub mod config;
pub mod keymap;
pub mod logging;
pub mod table_keyboard;
pub mod virtual_keyboard;
#[cfg(windows)]
pub mod win32;

pub use config::AppConfig;
pub use keymap::{
    KeyCodeSpace, KeyInput, KeyState, KeyboardMap, KeyboardMapBuilder, PhysicalKey,
    StandardKeyCodes, VimKey, VimKeyData, VirtualKeyModifiers,
};
pub use table_keyboard::{LayoutDescription, LayoutKey, TableKeyboard};
pub use virtual_keyboard::{KeyText, KeyboardState, OemDiscovery, VirtualKeyboard};
