//! Unit tests for keymap module.

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::keymap::oem::POSSIBLE_MODIFIER_RANGE;
    use crate::keymap::parsing::{key_name_to_vk, special_vim_key_to_virtual_key, vk_to_key_name};
    use crate::keymap::*;
    use crate::table_keyboard::{LayoutDescription, LayoutKey, TableKeyboard};
    use crate::virtual_keyboard::{KeyText, KeyboardState, OemDiscovery, VirtualKeyboard};

    use crate::keymap::types::VirtualKeyModifiers as M;

    /// Counts queries made while the scratch buffer holds a key, i.e. probing queries.
    struct CountingKeyboard {
        inner: TableKeyboard,
        probe_queries: Cell<usize>,
    }

    impl CountingKeyboard {
        fn new(inner: TableKeyboard) -> Self {
            Self {
                inner,
                probe_queries: Cell::new(0),
            }
        }
    }

    impl VirtualKeyboard for CountingKeyboard {
        fn try_get_text(
            &self,
            virtual_key: u32,
            modifiers: VirtualKeyModifiers,
            state: &KeyboardState,
        ) -> KeyText {
            if state.held_keys().next().is_some() {
                self.probe_queries.set(self.probe_queries.get() + 1);
            }
            self.inner.try_get_text(virtual_key, modifiers, state)
        }

        fn try_map_char(&self, c: char) -> Option<(u32, VirtualKeyModifiers)> {
            self.inner.try_map_char(c)
        }
    }

    fn keyboard(keys: Vec<LayoutKey>) -> TableKeyboard {
        keyboard_with_oem(keys, None, None)
    }

    fn keyboard_with_oem(
        keys: Vec<LayoutKey>,
        oem1: Option<u32>,
        oem2: Option<u32>,
    ) -> TableKeyboard {
        TableKeyboard::new(LayoutDescription {
            name: "Test".to_string(),
            oem1_virtual_key: oem1,
            oem2_virtual_key: oem2,
            keys,
        })
        .expect("Failed to create layout")
    }

    /// Letters with shift and caps lock, digits on both the main keyboard and the keypad.
    fn us_keys() -> Vec<LayoutKey> {
        let mut keys = Vec::new();
        for (i, c) in ('a'..='z').enumerate() {
            let vk = 0x41 + i as u32;
            let upper = c.to_ascii_uppercase().to_string();
            keys.push(LayoutKey::text(vk, M::NONE, &c.to_string()));
            keys.push(LayoutKey::text(vk, M::SHIFT, &upper));
            keys.push(LayoutKey::text(vk, M::CAPS_LOCK, &upper));
        }
        for (i, c) in ('0'..='9').enumerate() {
            keys.push(LayoutKey::text(0x30 + i as u32, M::NONE, &c.to_string()));
            keys.push(LayoutKey::text(0x60 + i as u32, M::NONE, &c.to_string()));
        }
        keys.push(LayoutKey::text(0x20, M::NONE, " "));
        keys.push(LayoutKey::text(0x0D, M::NONE, "\r"));
        keys.push(LayoutKey::text(0x6D, M::NONE, "-"));
        keys.push(LayoutKey::text(0xBD, M::NONE, "-"));
        keys.push(LayoutKey::text(0xBD, M::SHIFT, "_"));
        keys
    }

    fn build(keyboard: &dyn VirtualKeyboard, key_inputs: &[KeyInput]) -> KeyboardMap {
        let key_codes = StandardKeyCodes::new();
        KeyboardMapBuilder::new(keyboard, &key_codes).create(key_inputs)
    }

    fn key_state(vk: u32, modifiers: VirtualKeyModifiers) -> KeyState {
        KeyState::new(PhysicalKey(vk), modifiers)
    }

    fn key_data(key_input: impl Into<KeyInput>, text: &str) -> VimKeyData {
        VimKeyData::Key {
            key_input: key_input.into(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_special_key_table_covers_closed_set() {
        let special: Vec<VimKey> = VimKey::all_keys()
            .iter()
            .copied()
            .filter(|key| special_vim_key_to_virtual_key(*key).is_some())
            .collect();

        assert_eq!(special.len(), 44);
        for key in [
            VimKey::Nop,
            VimKey::LeftMouse,
            VimKey::MiddleMouse,
            VimKey::RightMouse,
        ] {
            assert_eq!(special_vim_key_to_virtual_key(key), None);
        }
    }

    #[test]
    fn test_special_key_table_constants() {
        assert_eq!(special_vim_key_to_virtual_key(VimKey::Enter), Some(0x0D));
        assert_eq!(special_vim_key_to_virtual_key(VimKey::Tab), Some(0x09));
        assert_eq!(special_vim_key_to_virtual_key(VimKey::Escape), Some(0x1B));
        assert_eq!(special_vim_key_to_virtual_key(VimKey::LineFeed), Some(0x00));
        assert_eq!(special_vim_key_to_virtual_key(VimKey::Back), Some(0x08));
        assert_eq!(special_vim_key_to_virtual_key(VimKey::Help), Some(0x2F));
        assert_eq!(special_vim_key_to_virtual_key(VimKey::Break), Some(0x03));
        assert_eq!(special_vim_key_to_virtual_key(VimKey::F1), Some(0x70));
        assert_eq!(special_vim_key_to_virtual_key(VimKey::F12), Some(0x7B));
        assert_eq!(special_vim_key_to_virtual_key(VimKey::KeypadMinus), Some(0x6D));
        assert_eq!(special_vim_key_to_virtual_key(VimKey::KeypadDecimal), Some(0x6E));
        assert_eq!(special_vim_key_to_virtual_key(VimKey::Keypad0), Some(0x60));
        assert_eq!(special_vim_key_to_virtual_key(VimKey::Keypad9), Some(0x69));
    }

    #[test]
    fn test_key_names_round_trip() {
        for vk in [0x41, 0x39, 0x65, 0x7B, 0x0D, 0xBD, 0xE2, 0x2F] {
            assert_eq!(key_name_to_vk(&vk_to_key_name(vk)), Some(vk));
        }
        assert_eq!(key_name_to_vk("oem_102"), Some(0xE2));
        assert_eq!(key_name_to_vk("0xDF"), Some(0xDF));
        assert_eq!(key_name_to_vk("VK_E5"), Some(0xE5));
        assert_eq!(key_name_to_vk("NOT_A_KEY"), None);
    }

    #[test]
    fn test_standard_key_codes() {
        let codes = StandardKeyCodes::new();
        let keys = codes.physical_keys();

        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(codes.key_from_virtual_key(0x0D), Some(PhysicalKey(0x0D)));
        assert_eq!(codes.key_from_virtual_key(0x00), None);
        assert_eq!(codes.key_from_virtual_key(0x01), None);
        assert_eq!(codes.key_from_virtual_key(0x05), None);
        assert_eq!(codes.key_from_virtual_key(0xFF), None);
        assert_eq!(codes.virtual_key_from_key(PhysicalKey(0x41)), Some(0x41));
        assert_eq!(codes.name(PhysicalKey(0xE2)), "OEM_102");

        // Unnamed codes still carry characters on some layouts
        for vk in [0x03, 0x92, 0x96, 0xC1, 0xC2, 0xE3, 0xE4, 0xE5, 0xFE] {
            assert_eq!(codes.key_from_virtual_key(vk), Some(PhysicalKey(vk)));
        }
        assert_eq!(keys.len(), 0xFE - 5);
        assert_eq!(codes.name(PhysicalKey(0xC1)), "ABNT_C1");
        assert_eq!(key_name_to_vk("abnt_c2"), Some(0xC2));
    }

    #[test]
    fn test_abnt_keys_are_swept() {
        let mut keys = us_keys();
        keys.push(LayoutKey::text(0xC1, M::NONE, "/"));
        keys.push(LayoutKey::text(0xC1, M::SHIFT, "?"));
        keys.push(LayoutKey::text(0xE3, M::NONE, ";"));
        let keyboard = keyboard(keys);

        let map = build(&keyboard, &standard_key_inputs());

        assert_eq!(
            map.key_states(&KeyInput::Char('/')),
            &[key_state(0xC1, M::NONE)]
        );
        assert_eq!(
            map.key_states(&KeyInput::Char('?')),
            &[key_state(0xC1, M::SHIFT)]
        );
        assert_eq!(
            map.vim_key_data(&key_state(0xE3, M::NONE)),
            Some(&key_data(';', ";"))
        );
    }

    #[test]
    fn test_interesting_modifiers_counts() {
        assert_eq!(interesting_modifiers(&KeyboardState::new()).len(), 7);
        assert_eq!(
            interesting_modifiers(&KeyboardState::with_oem_modifiers(Some(0xE2), None)).len(),
            15
        );
        assert_eq!(
            interesting_modifiers(&KeyboardState::with_oem_modifiers(None, Some(0xDF))).len(),
            15
        );
        assert_eq!(
            interesting_modifiers(&KeyboardState::with_oem_modifiers(Some(0xE2), Some(0xDF)))
                .len(),
            27
        );

        let mut absent = KeyboardState::new();
        absent.oem1 = OemDiscovery::Absent;
        assert_eq!(interesting_modifiers(&absent).len(), 7);
    }

    #[test]
    fn test_interesting_modifiers_order() {
        let list =
            interesting_modifiers(&KeyboardState::with_oem_modifiers(Some(0xE2), Some(0xDF)));

        assert_eq!(
            &list[..7],
            &[
                M::NONE,
                M::SHIFT,
                M::SHIFT | M::CONTROL,
                M::SHIFT | M::CONTROL | M::ALT,
                M::CONTROL,
                M::CONTROL | M::ALT,
                M::CAPS_LOCK,
            ]
        );
        assert_eq!(
            &list[7..15],
            &[
                M::OEM1,
                M::OEM1 | M::SHIFT,
                M::OEM1 | M::SHIFT | M::CONTROL,
                M::OEM1 | M::SHIFT | M::ALT,
                M::OEM1 | M::SHIFT | M::CONTROL | M::ALT,
                M::OEM1 | M::CONTROL,
                M::OEM1 | M::CONTROL | M::ALT,
                M::OEM1 | M::ALT,
            ]
        );
        assert_eq!(list[15], M::OEM2);
        assert_eq!(list[22], M::OEM2 | M::ALT);
        assert_eq!(
            &list[23..],
            &[
                M::OEM1 | M::OEM2,
                M::OEM1 | M::OEM2 | M::SHIFT,
                M::OEM1 | M::OEM2 | M::CONTROL,
                M::OEM1 | M::OEM2 | M::ALT,
            ]
        );
        assert!(!list.contains(&M::ALT));
    }

    #[test]
    fn test_special_key_with_empty_text() {
        let keyboard = keyboard(vec![]);
        let map = build(&keyboard, &[KeyInput::Named(VimKey::Enter)]);

        let enter = key_state(0x0D, M::NONE);
        assert_eq!(map.vim_key_data(&enter), Some(&key_data(VimKey::Enter, "")));
        assert_eq!(map.key_states(&KeyInput::Named(VimKey::Enter)), &[enter]);
    }

    #[test]
    fn test_special_key_keeps_layout_text() {
        let keyboard = keyboard(vec![LayoutKey::text(0x09, M::NONE, "\t")]);
        let map = build(&keyboard, &[KeyInput::Named(VimKey::Tab)]);

        assert_eq!(
            map.vim_key_data(&key_state(0x09, M::NONE)),
            Some(&key_data(VimKey::Tab, "\t"))
        );
    }

    #[test]
    fn test_special_key_without_physical_key_is_skipped() {
        let keyboard = keyboard(vec![]);
        let map = build(
            &keyboard,
            &[
                KeyInput::Named(VimKey::LineFeed),
                KeyInput::Named(VimKey::Nop),
            ],
        );

        assert!(map.is_empty());
        assert!(map.key_states(&KeyInput::Named(VimKey::LineFeed)).is_empty());
    }

    #[test]
    fn test_shifted_character() {
        let keyboard = keyboard(us_keys());
        let map = build(&keyboard, &[KeyInput::Char('a'), KeyInput::Char('A')]);

        assert_eq!(
            map.vim_key_data(&key_state(0x41, M::SHIFT)),
            Some(&key_data('A', "A"))
        );
        assert_eq!(
            map.vim_key_data(&key_state(0x41, M::NONE)),
            Some(&key_data('a', "a"))
        );
        assert_eq!(
            map.key_states(&KeyInput::Char('A')),
            &[key_state(0x41, M::SHIFT), key_state(0x41, M::CAPS_LOCK)]
        );
    }

    #[test]
    fn test_characters_outside_alphabet_are_ignored() {
        let keyboard = keyboard(vec![
            LayoutKey::text(0x41, M::NONE, "a"),
            LayoutKey::text(0x42, M::NONE, "bb"),
            LayoutKey::text(0x43, M::NONE, "c"),
        ]);
        let map = build(&keyboard, &[KeyInput::Char('a'), KeyInput::Char('b')]);

        assert_eq!(map.len(), 1);
        assert!(map.vim_key_data(&key_state(0x42, M::NONE)).is_none());
        assert!(map.vim_key_data(&key_state(0x43, M::NONE)).is_none());
        assert!(map.key_states(&KeyInput::Char('b')).is_empty());
    }

    #[test]
    fn test_dead_key_recorded_without_modifiers() {
        let keyboard = keyboard(vec![LayoutKey::dead(0xDE, M::CAPS_LOCK)]);
        let map = build(&keyboard, &[KeyInput::Char('a')]);

        assert!(map.is_dead_key(&key_state(0xDE, M::NONE)));
        assert!(map.vim_key_data(&key_state(0xDE, M::CAPS_LOCK)).is_none());
        assert_eq!(map.dead_key_count(), 1);
        assert_eq!(map.key_input(&key_state(0xDE, M::NONE)), None);
    }

    #[test]
    fn test_later_dead_key_replaces_earlier_mapping() {
        // NONE is swept before CAPS_LOCK, so the dead key overwrites the character
        let keyboard = keyboard(vec![
            LayoutKey::text(0xDE, M::NONE, "'"),
            LayoutKey::dead(0xDE, M::CAPS_LOCK),
        ]);
        let map = build(&keyboard, &[KeyInput::Char('\'')]);

        let state = key_state(0xDE, M::NONE);
        assert!(map.is_dead_key(&state));
        // The reverse table still knows the key produced the character
        assert_eq!(map.key_states(&KeyInput::Char('\'')), &[state]);
    }

    #[test]
    fn test_keypad_collision_last_write_wins() {
        let keyboard = keyboard(us_keys());
        let map = build(
            &keyboard,
            &[
                KeyInput::Named(VimKey::Keypad0),
                KeyInput::Named(VimKey::KeypadMinus),
                KeyInput::Char('0'),
                KeyInput::Char('-'),
            ],
        );

        // The sweep revisits the keypad key and replaces the named key mapping
        let numpad0 = key_state(0x60, M::NONE);
        assert_eq!(map.vim_key_data(&numpad0), Some(&key_data('0', "0")));
        assert_eq!(map.key_states(&KeyInput::Named(VimKey::Keypad0)), &[numpad0]);

        // Both keys produce the character, in key code order
        assert_eq!(
            map.key_states(&KeyInput::Char('0')),
            &[key_state(0x30, M::NONE), numpad0]
        );
        assert_eq!(
            map.key_states(&KeyInput::Char('-')),
            &[key_state(0x6D, M::NONE), key_state(0xBD, M::NONE)]
        );
        assert_eq!(
            map.first_key_state(&KeyInput::Char('-')),
            Some(key_state(0x6D, M::NONE))
        );
    }

    #[test]
    fn test_oem_modifier_discovery() {
        let mut keys = us_keys();
        keys.push(LayoutKey::text(0x51, M::SHIFT, "@").with_held(0xE2));
        let keyboard = keyboard_with_oem(keys, Some(0xE2), None);
        let key_codes = StandardKeyCodes::new();

        let mut builder = KeyboardMapBuilder::new(&keyboard, &key_codes);
        let map = builder.create(&[KeyInput::Char('q'), KeyInput::Char('@')]);

        assert_eq!(builder.state().oem1, OemDiscovery::Found(0xE2));
        assert!(builder.state().oem2.is_pending());
        assert_eq!(map.oem1_modifier_virtual_key(), Some(0xE2));
        assert_eq!(
            map.vim_key_data(&key_state(0x51, M::OEM1 | M::SHIFT)),
            Some(&key_data('@', "@"))
        );
        assert_eq!(
            map.key_states(&KeyInput::Char('@')),
            &[key_state(0x51, M::OEM1 | M::SHIFT)]
        );
    }

    #[test]
    fn test_oem2_modifier_discovery() {
        let mut keys = us_keys();
        keys.push(LayoutKey::text(0x52, M::NONE, "#").with_held(0xDF));
        let keyboard = keyboard_with_oem(keys, None, Some(0xDF));
        let key_codes = StandardKeyCodes::new();

        let mut builder = KeyboardMapBuilder::new(&keyboard, &key_codes);
        let map = builder.create(&[KeyInput::Char('r'), KeyInput::Char('#')]);

        assert_eq!(builder.probe_count(), 1);
        assert!(builder.state().oem1.is_pending());
        assert_eq!(builder.state().oem2, OemDiscovery::Found(0xDF));
        assert_eq!(interesting_modifiers(builder.state()).len(), 15);
        assert_eq!(map.oem1_modifier_virtual_key(), None);
        assert_eq!(map.oem2_modifier_virtual_key(), Some(0xDF));
        assert_eq!(
            map.key_states(&KeyInput::Char('#')),
            &[key_state(0x52, M::OEM2)]
        );
        assert_eq!(
            map.vim_key_data(&key_state(0x52, M::NONE)),
            Some(&key_data('r', "r"))
        );
    }

    #[test]
    fn test_both_oem_modifiers_held_together() {
        /// Answers `|` on 0x53 only while both discovered extended modifiers are held.
        struct ChordKeyboard {
            inner: TableKeyboard,
        }

        impl VirtualKeyboard for ChordKeyboard {
            fn try_get_text(
                &self,
                virtual_key: u32,
                modifiers: VirtualKeyModifiers,
                state: &KeyboardState,
            ) -> KeyText {
                let both = M::OEM1 | M::OEM2;
                if modifiers.extended() == both {
                    let held = state.oem1_modifier_virtual_key() == Some(0xE2)
                        && state.oem2_modifier_virtual_key() == Some(0xDF);
                    return match (virtual_key, modifiers.regular()) {
                        (0x53, M::NONE) if held => KeyText::Text("|".to_string()),
                        (0x53, M::SHIFT) if held => KeyText::Text("\\".to_string()),
                        _ => KeyText::None,
                    };
                }
                self.inner.try_get_text(virtual_key, modifiers, state)
            }

            fn try_map_char(&self, c: char) -> Option<(u32, VirtualKeyModifiers)> {
                self.inner.try_map_char(c)
            }
        }

        let mut keys = us_keys();
        keys.push(LayoutKey::text(0x51, M::NONE, "@").with_held(0xE2));
        keys.push(LayoutKey::text(0x52, M::NONE, "#").with_held(0xDF));
        let keyboard = ChordKeyboard {
            inner: keyboard_with_oem(keys, Some(0xE2), Some(0xDF)),
        };
        let key_codes = StandardKeyCodes::new();

        let mut builder = KeyboardMapBuilder::new(&keyboard, &key_codes);
        let map = builder.create(&standard_key_inputs());

        assert_eq!(builder.probe_count(), 2);
        assert_eq!(builder.state().oem1, OemDiscovery::Found(0xE2));
        assert_eq!(builder.state().oem2, OemDiscovery::Found(0xDF));
        assert_eq!(interesting_modifiers(builder.state()).len(), 27);

        let chord = M::OEM1 | M::OEM2;
        assert_eq!(
            map.vim_key_data(&key_state(0x53, chord)),
            Some(&key_data('|', "|"))
        );
        assert_eq!(map.key_states(&KeyInput::Char('|')), &[key_state(0x53, chord)]);
        assert_eq!(
            map.key_states(&KeyInput::Char('\\')),
            &[key_state(0x53, chord | M::SHIFT)]
        );
        assert_eq!(map.key_states(&KeyInput::Char('@')), &[key_state(0x51, M::OEM1)]);
        assert_eq!(map.key_states(&KeyInput::Char('#')), &[key_state(0x52, M::OEM2)]);
    }

    #[test]
    fn test_oem_modifier_search_runs_once() {
        // Both characters claim OEM1 but no candidate produces them
        let keyboard = keyboard_with_oem(
            vec![
                LayoutKey::text(0x51, M::NONE, "@").with_held(0xE5),
                LayoutKey::text(0x52, M::NONE, "#").with_held(0xE5),
            ],
            Some(0xE5),
            None,
        );
        let keyboard = CountingKeyboard::new(keyboard);
        let key_codes = StandardKeyCodes::new();

        let mut builder = KeyboardMapBuilder::new(&keyboard, &key_codes);
        let map = builder.create(&[KeyInput::Char('@'), KeyInput::Char('#')]);

        assert_eq!(builder.probe_count(), 1);
        assert_eq!(builder.state().oem1, OemDiscovery::Absent);
        assert_eq!(map.oem1_modifier_virtual_key(), None);
        assert!(map.is_empty());

        // One query per candidate, every key of the range is a candidate here
        let candidates = POSSIBLE_MODIFIER_RANGE.len();
        assert_eq!(keyboard.probe_queries.get(), candidates);
    }

    #[test]
    fn test_oem_candidates_exclude_text_and_dead_keys() {
        // 0xBA and 0xC0 would match too, but one produces text and the other is a
        // dead key so neither behaves like a modifier
        let keyboard = keyboard_with_oem(
            vec![
                LayoutKey::text(0xBA, M::NONE, ";"),
                LayoutKey::text(0x51, M::NONE, "@").with_held(0xBA),
                LayoutKey::dead(0xC0, M::NONE),
                LayoutKey::text(0x51, M::NONE, "@").with_held(0xC0),
                LayoutKey::text(0x51, M::NONE, "@").with_held(0xDF),
            ],
            Some(0xDF),
            None,
        );
        let key_codes = StandardKeyCodes::new();

        let mut builder = KeyboardMapBuilder::new(&keyboard, &key_codes);
        let map = builder.create(&[KeyInput::Char('@')]);

        assert_eq!(builder.probe_count(), 1);
        assert_eq!(builder.state().oem1, OemDiscovery::Found(0xDF));
        assert_eq!(
            map.key_states(&KeyInput::Char('@')),
            &[key_state(0x51, M::OEM1)]
        );
    }

    #[test]
    fn test_ambiguous_extended_modifiers_skip_search() {
        struct BothExtended;

        impl VirtualKeyboard for BothExtended {
            fn try_get_text(&self, _: u32, _: VirtualKeyModifiers, _: &KeyboardState) -> KeyText {
                KeyText::None
            }

            fn try_map_char(&self, _: char) -> Option<(u32, VirtualKeyModifiers)> {
                Some((0x51, M::OEM1 | M::OEM2))
            }
        }

        let key_codes = StandardKeyCodes::new();
        let mut builder = KeyboardMapBuilder::new(&BothExtended, &key_codes);
        builder.create(&[KeyInput::Char('@')]);

        assert_eq!(builder.probe_count(), 0);
        assert!(builder.state().oem1.is_pending());
        assert!(builder.state().oem2.is_pending());
    }

    #[test]
    fn test_seeded_modifier_is_not_searched() {
        let mut keys = us_keys();
        keys.push(LayoutKey::text(0x51, M::CONTROL, "@").with_held(0xE2));
        let keyboard = keyboard_with_oem(keys, Some(0xE2), None);
        let key_codes = StandardKeyCodes::new();

        let mut builder = KeyboardMapBuilder::new(&keyboard, &key_codes)
            .with_state(KeyboardState::with_oem_modifiers(Some(0xE2), None));
        let map = builder.create(&[KeyInput::Char('@')]);

        assert_eq!(builder.probe_count(), 0);
        assert_eq!(
            map.key_states(&KeyInput::Char('@')),
            &[key_state(0x51, M::OEM1 | M::CONTROL)]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "has neither a virtual key nor a character")]
    fn test_malformed_alphabet_fails_fast() {
        let keyboard = keyboard(vec![]);
        build(&keyboard, &[KeyInput::Named(VimKey::LeftMouse)]);
    }

    #[test]
    fn test_forward_entries_have_reverse_entries() {
        let keyboard = keyboard(us_keys());
        let map = build(&keyboard, &standard_key_inputs());

        assert!(!map.is_empty());
        for (key_state, data) in map.iter() {
            if let Some(key_input) = data.key_input() {
                assert!(
                    map.key_states(&key_input).contains(key_state),
                    "{} missing from reverse entry of {}",
                    key_state,
                    key_input
                );
            }
        }
        for (_, states) in map.key_inputs() {
            let mut sorted = states.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), states.len());
        }
    }

    #[test]
    fn test_dump_is_sorted_toml() {
        let keyboard = keyboard(us_keys());
        let map = build(&keyboard, &[KeyInput::Char('a'), KeyInput::Char('A')]);

        let dump = map.to_dump();
        assert_eq!(dump.entries.len(), 3);
        assert_eq!(dump.entries[0].key, "A");
        assert_eq!(dump.entries[0].modifiers, M::NONE);
        assert_eq!(dump.entries[1].modifiers, M::SHIFT);
        assert_eq!(dump.entries[2].modifiers, M::CAPS_LOCK);
        assert_eq!(dump.entries[2].input.as_deref(), Some("A"));

        let toml = map.to_toml().expect("Failed to serialize map");
        assert!(toml.contains("[[entries]]"));
        assert!(toml.contains("CAPS_LOCK"));
    }

    #[test]
    fn test_key_input_notation() {
        assert_eq!(KeyInput::Named(VimKey::Enter).to_string(), "<CR>");
        assert_eq!(KeyInput::Named(VimKey::Keypad3).to_string(), "<k3>");
        assert_eq!(KeyInput::Char(' ').to_string(), "<Space>");
        assert_eq!(KeyInput::Char('<').to_string(), "<lt>");

        assert_eq!("<cr>".parse::<KeyInput>().unwrap(), KeyInput::Named(VimKey::Enter));
        assert_eq!("<F11>".parse::<KeyInput>().unwrap(), KeyInput::Named(VimKey::F11));
        assert_eq!("<kPoint>".parse::<KeyInput>().unwrap(), KeyInput::Named(VimKey::KeypadDecimal));
        assert_eq!("<Space>".parse::<KeyInput>().unwrap(), KeyInput::Char(' '));
        assert_eq!("x".parse::<KeyInput>().unwrap(), KeyInput::Char('x'));
        assert!("<Bogus>".parse::<KeyInput>().is_err());
        assert!("xy".parse::<KeyInput>().is_err());
    }

    #[test]
    fn test_modifiers_display() {
        assert_eq!(M::NONE.to_string(), "None");
        assert_eq!((M::OEM1 | M::SHIFT).to_string(), "Shift+Oem1");
        assert_eq!(
            key_state(0x41, M::SHIFT | M::CONTROL).to_string(),
            "Shift+Control+A"
        );
        assert_eq!(M::REGULAR.regular(), M::REGULAR);
        assert_eq!((M::SHIFT | M::OEM2).extended(), M::OEM2);
    }
}
