// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keyboard bridge: the host delivers the currently-held abstract keys.
//!
//! The vocabulary is fixed and small; debouncing happens on the host side.

use std::collections::BTreeSet;
use std::sync::Mutex;

use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn as_smol(&self) -> SmolStr {
        SmolStr::new_static(self.as_str())
    }

    /// Map a host key name to the abstract vocabulary; unknown names drop.
    pub fn from_host(name: &str) -> Option<Key> {
        match name {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => None,
        }
    }
}

pub fn interpret_host_keys<I, S>(names: I) -> BTreeSet<Key>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().filter_map(|name| Key::from_host(name.as_ref())).collect()
}

/// Currently-held keys, replaced wholesale on every host event.
#[derive(Debug, Default)]
pub struct InputState {
    pressed: Mutex<BTreeSet<Key>>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_pressed(&self, keys: BTreeSet<Key>) {
        *self.pressed.lock().expect("input state poisoned") = keys;
    }

    pub fn pressed(&self) -> BTreeSet<Key> {
        self.pressed.lock().expect("input state poisoned").clone()
    }
}
