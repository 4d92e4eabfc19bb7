use std::collections::HashMap;

use config::TogglePolicy;

/// What triggered a dispatch; keys the per-binding toggle map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// A global hotkey, by binding id.
    Hotkey(u32),
    /// A user tray entry, by index into `systray`.
    Menu(usize),
    /// An `init` entry, by index.
    Init(usize),
}

/// Which mode a `find` invocation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// State A: apply the entry's `hide` mode.
    Hide,
    /// State B: apply the entry's `show` mode.
    Show,
}

/// Alternation state for the `find` action.
///
/// Every source starts in [`Phase::Hide`] and flips after each use. Under
/// [`TogglePolicy::Global`] all sources share one flag that survives reloads;
/// under [`TogglePolicy::Binding`] each source has its own flag, and those
/// flags are dropped on reload because ids may then name different entries.
#[derive(Debug, Default)]
pub struct ToggleState {
    /// Active policy.
    policy: TogglePolicy,
    /// Shared flag; `true` means the next use is [`Phase::Show`].
    global: bool,
    /// Per-source flags.
    bindings: HashMap<Source, bool>,
}

impl ToggleState {
    /// Create a toggle state with `policy`.
    pub fn new(policy: TogglePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Switch policy. Existing flags are kept.
    pub fn set_policy(&mut self, policy: TogglePolicy) {
        self.policy = policy;
    }

    /// Return the phase to use for `source`, then flip it.
    pub fn advance(&mut self, source: Source) -> Phase {
        let flag = match self.policy {
            TogglePolicy::Global => &mut self.global,
            TogglePolicy::Binding => self.bindings.entry(source).or_default(),
        };
        let phase = if *flag { Phase::Show } else { Phase::Hide };
        *flag = !*flag;
        phase
    }

    /// Forget per-binding flags.
    pub fn reset_bindings(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_policy_is_per_source() {
        let mut t = ToggleState::new(TogglePolicy::Binding);
        assert_eq!(t.advance(Source::Hotkey(0)), Phase::Hide);
        assert_eq!(t.advance(Source::Hotkey(1)), Phase::Hide);
        assert_eq!(t.advance(Source::Hotkey(0)), Phase::Show);
        assert_eq!(t.advance(Source::Menu(0)), Phase::Hide);
        assert_eq!(t.advance(Source::Hotkey(0)), Phase::Hide);
    }

    #[test]
    fn global_policy_is_shared() {
        let mut t = ToggleState::new(TogglePolicy::Global);
        assert_eq!(t.advance(Source::Hotkey(0)), Phase::Hide);
        assert_eq!(t.advance(Source::Menu(3)), Phase::Show);
        assert_eq!(t.advance(Source::Init(0)), Phase::Hide);
    }

    #[test]
    fn reset_only_clears_bindings() {
        let mut t = ToggleState::new(TogglePolicy::Global);
        t.advance(Source::Hotkey(0));
        t.set_policy(TogglePolicy::Binding);
        t.advance(Source::Hotkey(0));
        t.reset_bindings();
        assert_eq!(t.advance(Source::Hotkey(0)), Phase::Hide);
        t.set_policy(TogglePolicy::Global);
        assert_eq!(t.advance(Source::Hotkey(0)), Phase::Show);
    }
}
