use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

use crate::{Key, Modifiers, modifiers::PREFIXES};

/// A key chord: a set of modifiers plus a single key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Chord {
    /// Modifier keys held down for this chord. Never contains `NOREPEAT`.
    pub modifiers: Modifiers,
    /// The non-modifier key for this chord.
    pub key: Key,
}

impl Chord {
    /// Creates a chord from its parts.
    pub fn new(modifiers: Modifiers, key: Key) -> Self {
        Self {
            modifiers: modifiers - Modifiers::NOREPEAT,
            key,
        }
    }

    /// Parses a chord specification of the form `"ctrl-alt-r"`.
    ///
    /// - Modifier prefixes `ctrl-`, `shift-`, `alt-` and `win-` are matched
    ///   case-insensitively, in any order, consumed left to right.
    /// - The first text that is not a known prefix ends modifier parsing; the
    ///   remainder is the key spec (a table name or a numeric code).
    /// - Returns `None` when nothing is left for the key or it does not resolve.
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = Modifiers::empty();
        let mut rest = s;
        'prefixes: loop {
            for (prefix, m) in PREFIXES {
                let matched = rest
                    .get(..prefix.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
                if matched {
                    rest = &rest[prefix.len()..];
                    modifiers |= m;
                    continue 'prefixes;
                }
            }
            break;
        }
        if rest.is_empty() {
            return None;
        }
        let key = Key::from_spec(rest)?;
        Some(Self { modifiers, key })
    }

    /// Modifier flags for the OS registration call (see
    /// [`Modifiers::for_registration`]).
    pub fn registration_modifiers(&self) -> Modifiers {
        self.modifiers.for_registration()
    }

    /// Returns the canonical string form: `{ctrl-}{shift-}{alt-}{win-}<key>`.
    pub fn to_string_canonical(&self) -> String {
        format!("{}{}", self.modifiers.to_prefix(), self.key.to_spec())
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_canonical())
    }
}

impl Serialize for Chord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_canonical())
    }
}

impl<'de> Deserialize<'de> for Chord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| D::Error::custom(format!("invalid key combination: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parse_basic_chord() {
        let c = Chord::parse("ctrl-alt-r").expect("parse");
        assert_eq!(c.modifiers, Modifiers::CONTROL | Modifiers::ALT);
        assert_eq!(c.key, Key::R);
        assert_eq!(c.to_string(), "ctrl-alt-r");
    }

    #[test]
    fn prefixes_any_order_and_case() {
        let c = Chord::parse("ALT-Shift-cTrL-PageUp").expect("parse");
        assert_eq!(
            c.modifiers,
            Modifiers::CONTROL | Modifiers::SHIFT | Modifiers::ALT
        );
        assert_eq!(c.key, Key::PAGE_UP);
        assert_eq!(c.to_string(), "ctrl-shift-alt-pageup");
    }

    #[test]
    fn win_is_parsed_but_not_registered() {
        let c = Chord::parse("win-e").expect("parse");
        assert!(c.modifiers.contains(Modifiers::WIN));
        assert_eq!(c.to_string(), "win-e");
        assert_eq!(c.registration_modifiers(), Modifiers::NOREPEAT);
    }

    #[test]
    fn unknown_prefix_ends_modifier_parsing() {
        // "meta-" is not a modifier, so the whole remainder is the key spec.
        assert_eq!(Chord::parse("ctrl-meta-a"), None);
        let c = Chord::parse("ctrl-0x7b").expect("numeric key");
        assert_eq!(c.key, Key(0x7B));
        assert_eq!(c.to_string(), "ctrl-0x0000007b");
    }

    #[test]
    fn missing_key_fails() {
        assert_eq!(Chord::parse(""), None);
        assert_eq!(Chord::parse("ctrl-"), None);
        assert_eq!(Chord::parse("ctrl-shift-"), None);
        assert_eq!(Chord::parse("ctrl-f12"), None);
    }

    #[test]
    fn serde_uses_canonical_string() {
        let c: Chord = serde_json::from_str("\"Shift-Ctrl-F5\"").expect("deserialize");
        assert_eq!(
            serde_json::to_string(&c).expect("serialize"),
            "\"ctrl-shift-f5\""
        );
        assert!(serde_json::from_str::<Chord>("\"ctrl-\"").is_err());
    }

    /// Builds a spec string from modifier prefixes in the given order and casing.
    fn spec_from_parts(prefixes: &[(usize, bool)], key: &str) -> String {
        let mut out = String::new();
        for (idx, upper) in prefixes {
            let p = PREFIXES[*idx].0;
            if *upper {
                out.push_str(&p.to_ascii_uppercase());
            } else {
                out.push_str(p);
            }
        }
        out.push_str(key);
        out
    }

    fn key_strategy() -> impl Strategy<Value = String> {
        let named: Vec<String> = Key::all_named().map(Key::to_spec).collect();
        prop_oneof![
            proptest::sample::select(named),
            (1u32..=0xFFFF).prop_map(|c| format!("{c:#x}")),
            (1u32..=0xFFFF).prop_map(|c| c.to_string()),
        ]
    }

    proptest! {
        #[test]
        fn parse_format_parse_is_stable(
            prefixes in proptest::collection::vec((0usize..4, any::<bool>()), 0..6),
            key in key_strategy(),
        ) {
            let spec = spec_from_parts(&prefixes, &key);
            let first = Chord::parse(&spec);
            prop_assert!(first.is_some(), "spec {} should parse", spec);
            let first = first.unwrap();
            let again = Chord::parse(&first.to_string());
            prop_assert_eq!(Some(first), again);
        }
    }
}
