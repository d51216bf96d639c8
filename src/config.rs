use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::keymap::parsing::key_name_to_vk;
use crate::virtual_keyboard::KeyboardState;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Layout description used instead of the active system layout.
    #[serde(default)]
    pub layout_file: Option<String>,
    /// Known key behind the first extended modifier, skips probing for it.
    #[serde(default)]
    pub oem1_modifier_key: Option<String>,
    /// Known key behind the second extended modifier, skips probing for it.
    #[serde(default)]
    pub oem2_modifier_key: Option<String>,
    /// Where to write the built map, printed to stdout when absent.
    #[serde(default)]
    pub dump_path: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            layout_file: None,
            oem1_modifier_key: None,
            oem2_modifier_key: None,
            dump_path: None,
        }
    }
}

impl AppConfig {
    /// Load config from file, or create default if not exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if !path.as_ref().exists() {
            let default_config = Self::default();
            default_config.save_to_file(&path)?;
            return Ok(default_config);
        }
        Self::load_from_file(path)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: AppConfig = toml::from_str(&content)?;

        if config.log_level.trim().is_empty() {
            config.log_level = default_log_level();
        }
        // Fail on unknown key names now rather than during the build
        config.oem_modifier_virtual_keys()?;

        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let mut result = format!(
            "log_level = \"{}\"               # trace, debug, info, warn or error (RUST_LOG takes precedence)\n",
            self.log_level
        );

        // Optional settings are written commented out when unset
        let optional = [
            (
                "layout_file",
                &self.layout_file,
                "\"layout.toml\"",
                "Layout description to build from instead of the system layout",
            ),
            (
                "oem1_modifier_key",
                &self.oem1_modifier_key,
                "\"OEM_102\"",
                "Known first extended modifier key (skips probing)",
            ),
            (
                "oem2_modifier_key",
                &self.oem2_modifier_key,
                "\"OEM_8\"",
                "Known second extended modifier key (skips probing)",
            ),
            (
                "dump_path",
                &self.dump_path,
                "\"keymap.toml\"",
                "Write the built map here instead of stdout",
            ),
        ];
        for (name, value, example, comment) in optional {
            match value {
                Some(value) => {
                    result.push_str(&format!("{} = {:?}    # {}\n", name, value, comment))
                }
                None => result.push_str(&format!("# {} = {}    # {}\n", name, example, comment)),
            }
        }

        fs::write(path, result)?;
        Ok(())
    }

    /// Resolves the configured extended modifier key names to virtual keys.
    pub fn oem_modifier_virtual_keys(&self) -> anyhow::Result<(Option<u32>, Option<u32>)> {
        let resolve = |name: &Option<String>| -> anyhow::Result<Option<u32>> {
            match name {
                Some(name) => key_name_to_vk(name)
                    .map(Some)
                    .ok_or_else(|| anyhow::anyhow!("Unknown modifier key name: {}", name)),
                None => Ok(None),
            }
        };
        Ok((
            resolve(&self.oem1_modifier_key)?,
            resolve(&self.oem2_modifier_key)?,
        ))
    }

    /// Keyboard state seeded with the configured extended modifier keys.
    pub fn keyboard_state(&self) -> anyhow::Result<KeyboardState> {
        let (oem1, oem2) = self.oem_modifier_virtual_keys()?;
        Ok(KeyboardState::with_oem_modifiers(oem1, oem2))
    }
}
