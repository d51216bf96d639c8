//! Platform key-code namespace used to express physical keys.

use super::parsing::vk_to_key_name;
use super::types::PhysicalKey;

/// Translation between virtual key codes and the platform's physical key codes.
pub trait KeyCodeSpace {
    /// Every physical key of the platform, in enumeration order.
    fn physical_keys(&self) -> Vec<PhysicalKey>;

    /// Physical key for a virtual key, or `None` when the platform has no such key.
    fn key_from_virtual_key(&self, virtual_key: u32) -> Option<PhysicalKey>;

    fn virtual_key_from_key(&self, key: PhysicalKey) -> Option<u32>;
}

/// Standard Windows virtual key table used directly as the physical key namespace.
///
/// Physical key codes equal their virtual key codes and are enumerated in ascending
/// order. Every code from 0x01 to 0xFE is swept, unnamed ones included, since layouts
/// put characters on keys such as 0xC1 or 0xE3. Mouse buttons have no physical key.
#[derive(Debug, Clone)]
pub struct StandardKeyCodes {
    keys: Vec<PhysicalKey>,
}

impl StandardKeyCodes {
    pub fn new() -> Self {
        let keys = (0x01..=0xFE)
            .filter(|vk| !Self::is_mouse_button(*vk))
            .map(PhysicalKey)
            .collect();
        Self { keys }
    }

    #[inline]
    fn is_mouse_button(vk: u32) -> bool {
        matches!(vk, 0x01 | 0x02 | 0x04..=0x06)
    }

    pub fn name(&self, key: PhysicalKey) -> String {
        vk_to_key_name(key.0)
    }
}

impl Default for StandardKeyCodes {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyCodeSpace for StandardKeyCodes {
    fn physical_keys(&self) -> Vec<PhysicalKey> {
        self.keys.clone()
    }

    fn key_from_virtual_key(&self, virtual_key: u32) -> Option<PhysicalKey> {
        self.keys
            .binary_search(&PhysicalKey(virtual_key))
            .ok()
            .map(|idx| self.keys[idx])
    }

    fn virtual_key_from_key(&self, key: PhysicalKey) -> Option<u32> {
        self.keys.binary_search(&key).ok().map(|_| key.0)
    }
}
