use std::fmt;

use serde::{Deserialize, Serialize};

use crate::num::parse_unsigned;

/// A Windows virtual-key code (`VK_*`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub u32);

// Central table of named keys: constant => spec name, virtual-key code.
// The first block is the classic table; the second holds keys that are mostly
// found on extended keyboards (function row beyond F11, media and browser
// keys). F12 is left out on purpose: the OS reserves it for the debugger.
macro_rules! key_table {
    ($m:ident) => {
        $m! {
            BACKSPACE => "backspace", 0x08,
            TAB => "tab", 0x09,
            ENTER => "enter", 0x0D,
            ESCAPE => "escape", 0x1B,
            SPACE => "space", 0x20,
            PAGE_UP => "pageup", 0x21,
            PAGE_DOWN => "pagedown", 0x22,
            END => "end", 0x23,
            HOME => "home", 0x24,
            LEFT_ARROW => "leftarrow", 0x25,
            UP_ARROW => "uparrow", 0x26,
            RIGHT_ARROW => "rightarrow", 0x27,
            DOWN_ARROW => "downarrow", 0x28,
            SELECT => "select", 0x29,
            INSERT => "insert", 0x2D,
            DELETE => "delete", 0x2E,
            DIGIT0 => "0", 0x30,
            DIGIT1 => "1", 0x31,
            DIGIT2 => "2", 0x32,
            DIGIT3 => "3", 0x33,
            DIGIT4 => "4", 0x34,
            DIGIT5 => "5", 0x35,
            DIGIT6 => "6", 0x36,
            DIGIT7 => "7", 0x37,
            DIGIT8 => "8", 0x38,
            DIGIT9 => "9", 0x39,
            A => "a", 0x41,
            B => "b", 0x42,
            C => "c", 0x43,
            D => "d", 0x44,
            E => "e", 0x45,
            F => "f", 0x46,
            G => "g", 0x47,
            H => "h", 0x48,
            I => "i", 0x49,
            J => "j", 0x4A,
            K => "k", 0x4B,
            L => "l", 0x4C,
            M => "m", 0x4D,
            N => "n", 0x4E,
            O => "o", 0x4F,
            P => "p", 0x50,
            Q => "q", 0x51,
            R => "r", 0x52,
            S => "s", 0x53,
            T => "t", 0x54,
            U => "u", 0x55,
            V => "v", 0x56,
            W => "w", 0x57,
            X => "x", 0x58,
            Y => "y", 0x59,
            Z => "z", 0x5A,
            F1 => "f1", 0x70,
            F2 => "f2", 0x71,
            F3 => "f3", 0x72,
            F4 => "f4", 0x73,
            F5 => "f5", 0x74,
            F6 => "f6", 0x75,
            F7 => "f7", 0x76,
            F8 => "f8", 0x77,
            F9 => "f9", 0x78,
            F10 => "f10", 0x79,
            F11 => "f11", 0x7A,

            PAUSE => "pause", 0x13,
            PRINT_SCREEN => "printscreen", 0x2C,
            APPS => "apps", 0x5D,
            SLEEP => "sleep", 0x5F,
            F13 => "f13", 0x7C,
            F14 => "f14", 0x7D,
            F15 => "f15", 0x7E,
            F16 => "f16", 0x7F,
            F17 => "f17", 0x80,
            F18 => "f18", 0x81,
            F19 => "f19", 0x82,
            F20 => "f20", 0x83,
            F21 => "f21", 0x84,
            F22 => "f22", 0x85,
            F23 => "f23", 0x86,
            F24 => "f24", 0x87,
            BROWSER_BACK => "browserback", 0xA6,
            BROWSER_FORWARD => "browserforward", 0xA7,
            BROWSER_REFRESH => "browserrefresh", 0xA8,
            BROWSER_STOP => "browserstop", 0xA9,
            BROWSER_SEARCH => "browsersearch", 0xAA,
            BROWSER_FAVORITES => "browserfavorites", 0xAB,
            BROWSER_HOME => "browserhome", 0xAC,
            VOLUME_MUTE => "volumemute", 0xAD,
            VOLUME_DOWN => "volumedown", 0xAE,
            VOLUME_UP => "volumeup", 0xAF,
            MEDIA_NEXT => "medianext", 0xB0,
            MEDIA_PREV => "mediaprev", 0xB1,
            MEDIA_STOP => "mediastop", 0xB2,
            MEDIA_PLAY_PAUSE => "mediaplaypause", 0xB3,
            LAUNCH_MAIL => "launchmail", 0xB4,
            LAUNCH_MEDIA => "launchmedia", 0xB5,
            LAUNCH_APP1 => "launchapp1", 0xB6,
            LAUNCH_APP2 => "launchapp2", 0xB7,
        }
    };
}

// Aliases that only apply to parsing specs (not emitted by to_spec).
const ALIASES: &[(&str, Key)] = &[
    ("esc", Key::ESCAPE),
    ("return", Key::ENTER),
    ("del", Key::DELETE),
    ("pgup", Key::PAGE_UP),
    ("pgdn", Key::PAGE_DOWN),
    ("left", Key::LEFT_ARROW),
    ("up", Key::UP_ARROW),
    ("right", Key::RIGHT_ARROW),
    ("down", Key::DOWN_ARROW),
];

macro_rules! define_keys {
    ( $( $k:ident => $s:expr, $v:expr, )* ) => {
        #[allow(missing_docs)]
        impl Key {
            $( pub const $k: Self = Self($v); )*
        }

        /// Spec name and key for every named key, in table order.
        const TABLE: &[(&str, Key)] = &[ $( ($s, Key::$k), )* ];
    };
}

key_table!(define_keys);

impl Key {
    /// Looks up a key by its table name, case-insensitively.
    ///
    /// Aliases such as `esc` or `pgdn` are accepted as well.
    pub fn from_name(s: &str) -> Option<Self> {
        TABLE
            .iter()
            .chain(ALIASES.iter())
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, k)| *k)
    }

    /// Parses a key spec: a table name first, then a numeric virtual-key code.
    ///
    /// Numeric codes use automatic radix detection (`0x41`, `65`, `0101`).
    /// A code of zero is not a key.
    pub fn from_spec(s: &str) -> Option<Self> {
        if let Some(k) = Self::from_name(s) {
            return Some(k);
        }
        parse_unsigned(s).filter(|code| *code != 0).map(Self)
    }

    /// Returns the canonical table name for this key, if it has one.
    pub fn name(self) -> Option<&'static str> {
        TABLE
            .iter()
            .find(|(_, k)| *k == self)
            .map(|(name, _)| *name)
    }

    /// Returns the spec string for this key: its table name, or `0x%08x`.
    pub fn to_spec(self) -> String {
        match self.name() {
            Some(name) => name.to_string(),
            None => format!("{:#010x}", self.0),
        }
    }

    /// The raw virtual-key code.
    pub fn code(self) -> u32 {
        self.0
    }

    /// Iterates over every named key in table order.
    pub fn all_named() -> impl Iterator<Item = Self> {
        TABLE.iter().map(|(_, k)| *k)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_spec())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(Key::from_spec("A"), Some(Key::A));
        assert_eq!(Key::from_spec("PageDown"), Some(Key::PAGE_DOWN));
        assert_eq!(Key::from_spec("F11"), Some(Key::F11));
        assert_eq!(Key::from_spec("esc"), Some(Key::ESCAPE));
    }

    #[test]
    fn f12_is_not_named() {
        assert_eq!(Key::from_name("f12"), None);
        assert_eq!(Key(0x7B).to_spec(), "0x0000007b");
    }

    #[test]
    fn numeric_fallback() {
        assert_eq!(Key::from_spec("0x41"), Some(Key::A));
        assert_eq!(Key::from_spec("123"), Some(Key(123)));
        assert_eq!(Key::from_spec("0"), Some(Key::DIGIT0));
        assert_eq!(Key::from_spec("0x0"), None);
        assert_eq!(Key::from_spec("nope"), None);
    }

    #[test]
    fn spec_rendering() {
        assert_eq!(Key::ENTER.to_spec(), "enter");
        assert_eq!(Key::DIGIT7.to_spec(), "7");
        assert_eq!(Key(0x1234).to_spec(), "0x00001234");
    }

    #[test]
    fn table_codes_and_names_are_unique() {
        let mut codes = HashSet::new();
        let mut names = HashSet::new();
        for (name, key) in TABLE {
            assert!(codes.insert(key.code()), "duplicate code {:#x}", key.code());
            assert!(names.insert(*name), "duplicate name {name}");
            assert_eq!(*name, name.to_ascii_lowercase());
        }
    }

    #[test]
    fn every_named_key_roundtrips() {
        for k in Key::all_named() {
            assert_eq!(Key::from_spec(&k.to_spec()), Some(k));
        }
    }
}
