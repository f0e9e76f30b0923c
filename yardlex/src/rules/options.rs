use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Rule configuration flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RuleOptions(u32);

impl RuleOptions {
    pub const NONE: RuleOptions = RuleOptions(0);

    /// Match patterns without regard to letter case
    pub const IGNORE_CASE: RuleOptions = RuleOptions(1);

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn contains(&self, other: RuleOptions) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn ignore_case(&self) -> bool {
        self.contains(Self::IGNORE_CASE)
    }
}

impl BitOr for RuleOptions {
    type Output = RuleOptions;

    fn bitor(self, rhs: Self) -> Self::Output {
        RuleOptions(self.0 | rhs.0)
    }
}

impl BitOrAssign for RuleOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for RuleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ignore_case() {
            f.write_str("IgnoreCase")
        } else {
            f.write_str("None")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        assert!(!RuleOptions::NONE.ignore_case());
        assert!(RuleOptions::IGNORE_CASE.ignore_case());

        let mut options = RuleOptions::default();
        options |= RuleOptions::IGNORE_CASE;
        assert_eq!(options, RuleOptions::NONE | RuleOptions::IGNORE_CASE);
        assert_eq!(options.to_string(), "IgnoreCase");
    }
}
