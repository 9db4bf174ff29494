//! Ordered strategy cascades for field extraction
//!
//! Each field's extractor is a list of named heuristics tried in order; the
//! first one that produces entries wins and its confidence becomes the
//! field's score. Later strategies never run once an earlier one succeeds.

use log::debug;

/// Which text a strategy scans. `Section` strategies receive the field's
/// segmented section, falling back to the full document when no section
/// header matched; `SectionOnly` strategies are skipped entirely in that
/// case instead of widening their scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Section,
    SectionOnly,
    FullText,
}

/// One heuristic in a cascade: a named pattern family with the confidence
/// its matches carry.
pub struct Strategy<C, T> {
    pub name: &'static str,
    pub confidence: f64,
    pub scope: Scope,
    pub run: fn(&C, &str) -> Vec<T>,
}

/// Entries produced by the first productive strategy of a cascade.
#[derive(Debug, Clone)]
pub struct CascadeOutcome<T> {
    pub entries: Vec<T>,
    pub strategy: &'static str,
    pub confidence: f64,
}

/// Run strategies in order, stopping at the first non-empty result. Returns
/// `None` when every strategy comes up empty: not-detected is data, not an
/// error.
pub fn run_cascade<C, T>(
    field: &str,
    strategies: &[Strategy<C, T>],
    ctx: &C,
    section_text: &str,
    full_text: &str,
) -> Option<CascadeOutcome<T>> {
    let has_section = !section_text.trim().is_empty();
    for strategy in strategies {
        let text = match strategy.scope {
            Scope::Section if has_section => section_text,
            Scope::Section => full_text,
            Scope::SectionOnly if has_section => section_text,
            Scope::SectionOnly => {
                debug!("{}: strategy '{}' skipped, no section", field, strategy.name);
                continue;
            }
            Scope::FullText => full_text,
        };

        let entries = (strategy.run)(ctx, text);
        if !entries.is_empty() {
            debug!(
                "{}: strategy '{}' matched {} entries",
                field,
                strategy.name,
                entries.len()
            );
            return Some(CascadeOutcome {
                entries,
                strategy: strategy.name,
                confidence: strategy.confidence,
            });
        }
        debug!("{}: strategy '{}' found nothing", field, strategy.name);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ctx;

    fn empty_pass(_: &Ctx, _: &str) -> Vec<String> {
        Vec::new()
    }

    fn echo_pass(_: &Ctx, text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    fn cascade() -> Vec<Strategy<Ctx, String>> {
        vec![
            Strategy {
                name: "first",
                confidence: 0.9,
                scope: Scope::Section,
                run: empty_pass,
            },
            Strategy {
                name: "second",
                confidence: 0.6,
                scope: Scope::FullText,
                run: echo_pass,
            },
        ]
    }

    #[test]
    fn test_cascade_stops_at_first_productive_strategy() {
        let strategies = vec![
            Strategy {
                name: "winner",
                confidence: 0.9,
                scope: Scope::Section,
                run: echo_pass,
            },
            Strategy {
                name: "never-reached",
                confidence: 0.1,
                scope: Scope::FullText,
                run: echo_pass,
            },
        ];
        let outcome = run_cascade("field", &strategies, &Ctx, "section", "full").unwrap();
        assert_eq!(outcome.strategy, "winner");
        assert_eq!(outcome.confidence, 0.9);
        assert_eq!(outcome.entries, vec!["section"]);
    }

    #[test]
    fn test_cascade_falls_through_empty_strategies() {
        let outcome = run_cascade("field", &cascade(), &Ctx, "section", "full").unwrap();
        assert_eq!(outcome.strategy, "second");
        assert_eq!(outcome.entries, vec!["full"]);
    }

    #[test]
    fn test_section_scope_uses_full_text_when_section_empty() {
        let strategies = vec![Strategy {
            name: "only",
            confidence: 0.9,
            scope: Scope::Section,
            run: echo_pass,
        }];
        let outcome = run_cascade("field", &strategies, &Ctx, "   ", "full").unwrap();
        assert_eq!(outcome.entries, vec!["full"]);
    }

    #[test]
    fn test_all_empty_yields_none() {
        let strategies = vec![Strategy {
            name: "only",
            confidence: 0.9,
            scope: Scope::Section,
            run: empty_pass,
        }];
        assert!(run_cascade("field", &strategies, &Ctx, "s", "f").is_none());
    }

    #[test]
    fn test_section_only_skipped_without_section() {
        let strategies = vec![
            Strategy {
                name: "section-only",
                confidence: 0.85,
                scope: Scope::SectionOnly,
                run: echo_pass,
            },
            Strategy {
                name: "fallback",
                confidence: 0.6,
                scope: Scope::FullText,
                run: echo_pass,
            },
        ];

        let outcome = run_cascade("field", &strategies, &Ctx, "", "full").unwrap();
        assert_eq!(outcome.strategy, "fallback");
        assert_eq!(outcome.confidence, 0.6);

        let outcome = run_cascade("field", &strategies, &Ctx, "section", "full").unwrap();
        assert_eq!(outcome.strategy, "section-only");
        assert_eq!(outcome.entries, vec!["section"]);
    }
}
