//! Line break class assignment
//!
//! Raw table classes pass through the UAX #14 §6.1 resolution before the
//! matcher sees them: ambiguous, surrogate and unknown code points become
//! alphabetic, South-East-Asian letters split on their general category,
//! and conditional Japanese starters become non-starters. A caller may
//! replace the whole resolution with a criterion function.

use std::sync::Arc;

use crate::types::{GeneralCategory, LineBreakClass};

/// Caller-supplied replacement for the standard class resolution.
///
/// Receives the raw table class and general category of each code point
/// and returns the class the matcher should see.
pub type Criterion =
    Arc<dyn Fn(LineBreakClass, GeneralCategory) -> LineBreakClass + Send + Sync>;

/// The standard resolution: AI/SG/XX → AL, SA by general category, CJ → NS.
pub fn resolve_class(raw: LineBreakClass, gc: GeneralCategory) -> LineBreakClass {
    match raw {
        LineBreakClass::AI | LineBreakClass::SG | LineBreakClass::XX => LineBreakClass::AL,
        LineBreakClass::SA => {
            if matches!(gc, GeneralCategory::Mn | GeneralCategory::Mc) {
                LineBreakClass::CM
            } else {
                LineBreakClass::AL
            }
        }
        LineBreakClass::CJ => LineBreakClass::NS,
        other => other,
    }
}

/// Resolve a raw class, preferring the criterion when one is given.
pub(crate) fn assign_class(
    raw: LineBreakClass,
    gc: GeneralCategory,
    criterion: Option<&Criterion>,
) -> LineBreakClass {
    match criterion {
        Some(f) => f(raw, gc),
        None => resolve_class(raw, gc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_classes_resolve_to_al() {
        for raw in [LineBreakClass::AI, LineBreakClass::SG, LineBreakClass::XX] {
            assert_eq!(resolve_class(raw, GeneralCategory::So), LineBreakClass::AL);
        }
    }

    #[test]
    fn test_sa_splits_on_general_category() {
        assert_eq!(
            resolve_class(LineBreakClass::SA, GeneralCategory::Mn),
            LineBreakClass::CM
        );
        assert_eq!(
            resolve_class(LineBreakClass::SA, GeneralCategory::Mc),
            LineBreakClass::CM
        );
        assert_eq!(
            resolve_class(LineBreakClass::SA, GeneralCategory::Lo),
            LineBreakClass::AL
        );
    }

    #[test]
    fn test_conditional_starters_become_non_starters() {
        assert_eq!(
            resolve_class(LineBreakClass::CJ, GeneralCategory::Lo),
            LineBreakClass::NS
        );
    }

    #[test]
    fn test_resolved_classes_pass_through() {
        for raw in [LineBreakClass::AL, LineBreakClass::NU, LineBreakClass::BK] {
            assert_eq!(resolve_class(raw, GeneralCategory::Cn), raw);
        }
    }

    #[test]
    fn test_criterion_replaces_resolution() {
        let identity: Criterion = Arc::new(|raw, _| raw);
        assert_eq!(
            assign_class(LineBreakClass::CJ, GeneralCategory::Lo, Some(&identity)),
            LineBreakClass::CJ
        );
        assert_eq!(
            assign_class(LineBreakClass::CJ, GeneralCategory::Lo, None),
            LineBreakClass::NS
        );
    }
}
