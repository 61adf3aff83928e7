use bitflags::bitflags;

bitflags! {
    /// Work the host owes the bar after an update.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ChangeFlags: u8 {
        /// Bar height or a child's layout size changed
        const NEEDS_LAYOUT = 0b001;
        /// A child's translation, scale, alpha or color changed
        const NEEDS_PAINT  = 0b010;
        /// A snap animation is running and wants another frame
        const NEEDS_FRAME  = 0b100;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_accumulate() {
        let mut flags = ChangeFlags::empty();
        flags |= ChangeFlags::NEEDS_PAINT;
        flags |= ChangeFlags::NEEDS_LAYOUT;
        assert!(flags.contains(ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT));
        assert!(!flags.contains(ChangeFlags::NEEDS_FRAME));
    }
}
