use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use layout_keymap::cli::CliArgs;
use layout_keymap::keymap::standard_key_inputs;
use layout_keymap::{
    AppConfig, KeyboardMap, KeyboardMapBuilder, KeyboardState, StandardKeyCodes, TableKeyboard,
    VirtualKeyboard, logging,
};

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let config = AppConfig::load_or_create(&args.config)?;
    logging::init(&config.log_level);

    let state = config.keyboard_state()?;
    let layout_path = args
        .layout
        .clone()
        .or_else(|| config.layout_file.as_ref().map(PathBuf::from));

    let map = match layout_path {
        Some(path) => {
            let keyboard = TableKeyboard::load_from_file(&path)?;
            tracing::info!(
                layout = keyboard.name(),
                path = %path.display(),
                "building from layout file"
            );
            build(&keyboard, state)
        }
        None => build_system_layout(state)?,
    };

    tracing::info!(
        key_states = map.len(),
        dead_keys = map.dead_key_count(),
        "keyboard map ready"
    );

    if !args.lookup.is_empty() {
        for key_input in &args.lookup {
            let states: Vec<String> = map
                .key_states(key_input)
                .iter()
                .map(|state| state.to_string())
                .collect();
            if states.is_empty() {
                println!("{}: (none)", key_input);
            } else {
                println!("{}: {}", key_input, states.join(", "));
            }
        }
        return Ok(());
    }

    let dump = map.to_toml()?;
    let output = args
        .output
        .clone()
        .or_else(|| config.dump_path.as_ref().map(PathBuf::from));
    match output {
        Some(path) => {
            fs::write(&path, dump)?;
            tracing::info!(path = %path.display(), "keyboard map written");
        }
        None => print!("{}", dump),
    }

    Ok(())
}

fn build(keyboard: &dyn VirtualKeyboard, state: KeyboardState) -> KeyboardMap {
    let key_codes = StandardKeyCodes::new();
    let key_inputs = standard_key_inputs();
    KeyboardMapBuilder::new(keyboard, &key_codes)
        .with_state(state)
        .create(&key_inputs)
}

#[cfg(windows)]
fn build_system_layout(state: KeyboardState) -> Result<KeyboardMap> {
    let keyboard = layout_keymap::win32::Win32VirtualKeyboard::new();
    tracing::info!(
        layout_id = %format!("{:#x}", keyboard.layout_id()),
        "building from active layout"
    );
    Ok(build(&keyboard, state))
}

#[cfg(not(windows))]
fn build_system_layout(_state: KeyboardState) -> Result<KeyboardMap> {
    anyhow::bail!("No layout file given and this platform has no system layout support")
}
