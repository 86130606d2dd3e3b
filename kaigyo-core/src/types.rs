//! Verdict flags and Unicode property value types

use std::fmt;
use std::ops::BitOr;

/// Classification of a candidate break position.
///
/// Values are powers of two so callers can test several verdicts with a
/// single mask:
///
/// ```
/// use kaigyo_core::BreakType;
///
/// let verdict = BreakType::MANDATORY;
/// assert!(verdict.intersects(BreakType::MANDATORY | BreakType::ALLOWED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreakType(u8);

impl BreakType {
    /// No rule decided this position
    pub const UNKNOWN: Self = Self(0);
    /// Breaking here is prohibited
    pub const FORBIDDEN: Self = Self(1);
    /// A break is required here
    pub const MANDATORY: Self = Self(2);
    /// A break opportunity exists here
    pub const ALLOWED: Self = Self(4);

    /// Raw flag bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if `self` and `other` share at least one flag bit
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for BreakType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for BreakType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::FORBIDDEN => "forbidden",
            Self::MANDATORY => "mandatory",
            Self::ALLOWED => "allowed",
            _ => "unknown",
        };
        f.write_str(name)
    }
}

macro_rules! abbrev_enum {
    ($(#[$doc:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(#[allow(missing_docs)] $variant,)+
        }

        impl $name {
            /// Parse the standard abbreviation, e.g. `"AL"` or `"Pi"`
            pub fn from_abbrev(s: &str) -> Option<Self> {
                match s {
                    $(stringify!($variant) => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// The standard abbreviation for this value
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

abbrev_enum! {
    /// UAX #14 Line_Break class.
    ///
    /// Carries both the resolved classes used by the matcher and the
    /// unresolved ones (`AI`, `SG`, `XX`, `SA`, `CJ`) that appear in raw
    /// table data before class assignment. `HH` exists only in the v17
    /// tables; the v16 tables keep those code points as `BA`.
    LineBreakClass {
        AL, HL, NU, SP, BK, CR, LF, NL, ZW, ZWJ, CM, GL, WJ, CL, CP, EX,
        SY, OP, QU, IS, NS, BA, BB, HY, HH, CB, IN, PR, PO, ID, EB, EM,
        JL, JV, JT, H2, H3, RI, AK, AS, AP, VF, VI, AI, SG, XX, SA, CJ, B2,
    }
}

abbrev_enum! {
    /// Unicode General_Category, by its two-letter code.
    GeneralCategory {
        Lu, Ll, Lt, Lm, Lo, Mn, Mc, Me, Nd, Nl, No, Pc, Pd, Ps, Pe, Pi,
        Pf, Po, Sm, Sc, Sk, So, Zs, Zl, Zp, Cc, Cf, Cs, Co, Cn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_type_mask() {
        assert!(BreakType::MANDATORY.intersects(BreakType::MANDATORY | BreakType::ALLOWED));
        assert!(BreakType::ALLOWED.intersects(BreakType::MANDATORY | BreakType::ALLOWED));
        assert!(!BreakType::FORBIDDEN.intersects(BreakType::MANDATORY | BreakType::ALLOWED));
        assert!(!BreakType::UNKNOWN.intersects(BreakType::FORBIDDEN));
    }

    #[test]
    fn test_break_type_bits_are_disjoint() {
        assert_eq!(BreakType::UNKNOWN.bits(), 0);
        assert_eq!(
            BreakType::FORBIDDEN.bits() & BreakType::MANDATORY.bits() & BreakType::ALLOWED.bits(),
            0
        );
    }

    #[test]
    fn test_class_abbreviations_round_trip() {
        for abbrev in ["AL", "ZWJ", "H3", "CJ", "HH", "B2"] {
            let class = LineBreakClass::from_abbrev(abbrev).unwrap();
            assert_eq!(class.as_str(), abbrev);
        }
        assert!(LineBreakClass::from_abbrev("QQ").is_none());
    }

    #[test]
    fn test_general_category_round_trip() {
        for abbrev in ["Lu", "Mn", "Pi", "Pf", "Cn"] {
            let gc = GeneralCategory::from_abbrev(abbrev).unwrap();
            assert_eq!(gc.as_str(), abbrev);
        }
        assert!(GeneralCategory::from_abbrev("Xy").is_none());
    }
}
