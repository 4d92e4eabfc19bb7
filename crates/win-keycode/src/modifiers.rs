use bitflags::bitflags;

bitflags! {
    /// Modifier flags as understood by the Windows global hotkey API.
    ///
    /// Bit values match the `MOD_*` constants so the set can be handed to the
    /// OS unchanged.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Modifiers: u32 {
        /// Either Alt key.
        const ALT = 0x0001;
        /// Either Ctrl key.
        const CONTROL = 0x0002;
        /// Either Shift key.
        const SHIFT = 0x0004;
        /// Either Windows logo key.
        const WIN = 0x0008;
        /// Suppress keyboard auto-repeat for the registration.
        const NOREPEAT = 0x4000;
    }
}

/// Spec prefixes in canonical output order.
pub(crate) const PREFIXES: [(&str, Modifiers); 4] = [
    ("ctrl-", Modifiers::CONTROL),
    ("shift-", Modifiers::SHIFT),
    ("alt-", Modifiers::ALT),
    ("win-", Modifiers::WIN),
];

impl Modifiers {
    /// Flags to hand to the OS registration call for a user-specified set.
    ///
    /// `WIN` is dropped because combinations involving the Windows key are
    /// reserved by the operating system, and `NOREPEAT` is always added.
    pub fn for_registration(self) -> Self {
        (self - Self::WIN - Self::NOREPEAT) | Self::NOREPEAT
    }

    /// Renders the spec prefix string, e.g. `"ctrl-alt-"`.
    pub fn to_prefix(self) -> String {
        PREFIXES
            .iter()
            .filter(|(_, m)| self.contains(*m))
            .map(|(p, _)| *p)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_drops_win_and_adds_norepeat() {
        let m = Modifiers::CONTROL | Modifiers::WIN;
        assert_eq!(
            m.for_registration(),
            Modifiers::CONTROL | Modifiers::NOREPEAT
        );
        assert_eq!(Modifiers::empty().for_registration(), Modifiers::NOREPEAT);
    }

    #[test]
    fn prefix_order_is_fixed() {
        let m = Modifiers::WIN | Modifiers::ALT | Modifiers::SHIFT | Modifiers::CONTROL;
        assert_eq!(m.to_prefix(), "ctrl-shift-alt-win-");
        assert_eq!(Modifiers::NOREPEAT.to_prefix(), "");
    }
}
