use std::sync::Arc;

use config::{Config, Entry};
use tracing::{debug, info, trace, warn};
use win_keycode::Chord;

use crate::deps::HotkeyApi;

/// Highest binding id handed to the OS; entries beyond it are not registered.
pub const MAX_HOTKEY_ID: u32 = 0xBFFF;

/// Registration outcome for one binding id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    /// The OS granted the id.
    Registered(Chord),
    /// The OS rejected the chord.
    Rejected(Chord),
    /// No `key`, or a key string that did not parse.
    Skipped,
}

/// Ids grouped by outcome, as produced by [`HotkeyRegistry::register_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Ids the OS granted.
    pub registered: Vec<u32>,
    /// Ids whose chord the OS rejected (usually duplicates).
    pub rejected: Vec<u32>,
    /// Ids with a missing or unparsable key.
    pub skipped: Vec<u32>,
}

/// Maps binding ids (0-based positions in `hotkey`) to registered chords.
///
/// Failed slots keep their position so ids stay stable; they are left out of
/// listings and never unregistered.
pub struct HotkeyRegistry {
    /// OS registration calls.
    api: Arc<dyn HotkeyApi>,
    /// One state per `hotkey` entry, indexed by id.
    slots: Vec<SlotState>,
    /// Tree the slots were built from.
    config: Option<Arc<Config>>,
}

impl HotkeyRegistry {
    /// Create an empty registry over `api`.
    pub fn new(api: Arc<dyn HotkeyApi>) -> Self {
        Self {
            api,
            slots: Vec::new(),
            config: None,
        }
    }

    /// Register every `hotkey` entry of `config`, in order, starting at id 0.
    ///
    /// Per-entry failures are logged and recorded; they never stop the
    /// remaining entries. Anything registered before is released first.
    pub fn register_all(&mut self, config: Arc<Config>) -> RegistrationReport {
        self.unregister_all();
        let mut report = RegistrationReport::default();
        for (index, entry) in config.hotkey.iter().enumerate() {
            let id = match u32::try_from(index) {
                Ok(id) if id <= MAX_HOTKEY_ID => id,
                _ => {
                    warn!(
                        "Hotkey {} exceeds id ceiling {:#x}; {} entries ignored",
                        index,
                        MAX_HOTKEY_ID,
                        config.hotkey.len() - index
                    );
                    break;
                }
            };
            let state = self.register_one(id, entry);
            match state {
                SlotState::Registered(_) => report.registered.push(id),
                SlotState::Rejected(_) => report.rejected.push(id),
                SlotState::Skipped => report.skipped.push(id),
            }
            self.slots.push(state);
        }
        debug!(
            "Hotkeys: {} registered, {} rejected, {} skipped",
            report.registered.len(),
            report.rejected.len(),
            report.skipped.len()
        );
        self.config = Some(config);
        report
    }

    fn register_one(&self, id: u32, entry: &Entry) -> SlotState {
        let Some(key) = entry.key.as_deref() else {
            debug!("Hotkey {} has no key", id);
            return SlotState::Skipped;
        };
        let Some(chord) = Chord::parse(key) else {
            warn!("Hotkey {} invalid string {:?}", id, key);
            return SlotState::Skipped;
        };
        match self.api.register(id, &chord) {
            Ok(()) => {
                info!("Register hotkey {} {} OK", id, chord);
                SlotState::Registered(chord)
            }
            Err(e) => {
                warn!("Register hotkey {} {} failed: {}", id, chord, e);
                SlotState::Rejected(chord)
            }
        }
    }

    /// Release every granted id and forget the tree. A no-op when empty.
    pub fn unregister_all(&mut self) {
        for (id, slot) in (0u32..).zip(&self.slots) {
            if let SlotState::Registered(chord) = slot {
                match self.api.unregister(id) {
                    Ok(()) => trace!("Unregistered hotkey {} {}", id, chord),
                    Err(e) => warn!("Unregister hotkey {} failed: {}", id, e),
                }
            }
        }
        self.slots.clear();
        self.config = None;
    }

    /// The entry whose position in `hotkey` equals `id`.
    pub fn resolve(&self, id: u32) -> Option<&Entry> {
        let config = self.config.as_ref()?;
        config.hotkey.get(usize::try_from(id).ok()?)
    }

    /// Chord registered for `id`, if the OS granted it.
    pub fn chord(&self, id: u32) -> Option<Chord> {
        match self.slots.get(usize::try_from(id).ok()?)? {
            SlotState::Registered(chord) => Some(*chord),
            _ => None,
        }
    }

    /// Granted ids, ascending.
    pub fn registered_ids(&self) -> Vec<u32> {
        (0u32..)
            .zip(&self.slots)
            .filter(|(_, s)| matches!(s, SlotState::Registered(_)))
            .map(|(id, _)| id)
            .collect()
    }

    /// `(combination, note)` for each granted id, in id order.
    pub fn describe(&self) -> Vec<(String, Option<String>)> {
        self.registered_ids()
            .into_iter()
            .filter_map(|id| {
                let chord = self.chord(id)?;
                let note = self.resolve(id).and_then(|e| e.note.clone());
                Some((chord.to_string(), note))
            })
            .collect()
    }

    /// Listing lines: `combination` or `combination, note`.
    pub fn describe_lines(&self) -> Vec<String> {
        self.describe()
            .into_iter()
            .map(|(combo, note)| match note {
                Some(n) => format!("{}, {}", combo, n),
                None => combo,
            })
            .collect()
    }

    /// True when no tree is installed.
    pub fn is_empty(&self) -> bool {
        self.config.is_none()
    }
}

#[cfg(test)]
mod tests {
    use config::load_from_str;
    use logging::LogBuffer;
    use tracing_subscriber::{Registry, layer::SubscriberExt};

    use super::*;
    use crate::test_support::MockHotkeyApi;

    fn registry() -> (HotkeyRegistry, MockHotkeyApi) {
        let api = MockHotkeyApi::new();
        (HotkeyRegistry::new(Arc::new(api.clone())), api)
    }

    fn config(text: &str) -> Arc<Config> {
        Arc::new(load_from_str(text).expect("config"))
    }

    #[test]
    fn ids_are_array_positions() {
        let (mut reg, api) = registry();
        let report = reg.register_all(config(
            r#"{"hotkey": [
                {"key": "ctrl-alt-t", "exec": "a.exe"},
                {"exec": "no-key.exe"},
                {"key": "bogus-key", "exec": "b.exe"},
                {"key": "win-shift-f1", "exec": "c.exe", "note": "C"}
            ]}"#,
        ));
        assert_eq!(report.registered, vec![0, 3]);
        assert_eq!(report.skipped, vec![1, 2]);
        assert!(report.rejected.is_empty());
        assert_eq!(reg.resolve(2).and_then(|e| e.exec.as_deref()), Some("b.exe"));
        assert_eq!(reg.resolve(4), None);
        assert_eq!(
            reg.describe_lines(),
            vec!["ctrl-alt-t".to_string(), "shift-win-f1, C".to_string()]
        );
        assert!(api.calls_contains("register:3:shift-win-f1"));
    }

    #[test]
    fn unregister_releases_only_granted_ids() {
        let (mut reg, api) = registry();
        reg.register_all(config(
            r#"{"hotkey": [{"key": "f1"}, {"key": "f1"}, {"key": "f2"}]}"#,
        ));
        reg.unregister_all();
        assert_eq!(api.unregistered(), vec![0, 2]);
        assert!(reg.is_empty());
        assert_eq!(reg.resolve(0), None);
        reg.unregister_all();
        assert_eq!(api.unregistered(), vec![0, 2]);
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let (reg, _api) = registry();
        assert_eq!(reg.resolve(0), None);
        assert!(reg.describe().is_empty());
    }

    #[test]
    fn ids_stop_at_ceiling() {
        let (mut reg, api) = registry();
        let count = MAX_HOTKEY_ID as usize + 2;
        // Hex codes never collide with table names, so every chord is distinct.
        let hotkey = (0..count)
            .map(|i| Entry {
                key: Some(format!("{:#x}", 0x1000 + i)),
                exec: Some("a.exe".into()),
                ..Entry::default()
            })
            .collect();
        let cfg = Arc::new(Config {
            hotkey,
            ..Config::default()
        });

        let logs = LogBuffer::new();
        let report = tracing::subscriber::with_default(Registry::default().with(logs.layer()), || {
            reg.register_all(cfg)
        });

        assert_eq!(report.registered.len(), MAX_HOTKEY_ID as usize + 1);
        assert_eq!(report.registered.last(), Some(&MAX_HOTKEY_ID));
        assert!(report.rejected.is_empty());
        assert!(report.skipped.is_empty());
        assert!(reg.chord(MAX_HOTKEY_ID).is_some());
        assert!(reg.chord(MAX_HOTKEY_ID + 1).is_none());

        let past = format!("register:{}:", MAX_HOTKEY_ID + 1);
        assert!(!api.calls().iter().any(|c| c.starts_with(&past)));
        assert_eq!(api.held_ids().len(), MAX_HOTKEY_ID as usize + 1);

        let warnings: Vec<_> = logs
            .snapshot()
            .into_iter()
            .filter(|e| e.level == "WARN")
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("1 entries ignored"));
    }

    #[test]
    fn os_rejection_keeps_slots_but_releases_nothing() {
        let (mut reg, api) = registry();
        api.set_fail_register(true);
        let report = reg.register_all(config(
            r#"{"hotkey": [{"key": "f1", "note": "one"}, {"key": "f2"}]}"#,
        ));
        assert_eq!(report.rejected, vec![0, 1]);
        assert!(report.registered.is_empty());
        assert!(reg.describe().is_empty());
        assert_eq!(reg.resolve(1).and_then(|e| e.key.as_deref()), Some("f2"));

        api.set_fail_register(false);
        reg.unregister_all();
        assert!(api.unregistered().is_empty());
        assert!(!api.calls().iter().any(|c| c.starts_with("unregister:")));
    }
}
