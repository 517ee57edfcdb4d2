//! Keyword flags: booleans computed from the lowercased description that
//! switch optional components on, plus the spoke/subscription count parser.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::classifier::PatternId;

/// A named keyword family. The flag is set when any keyword occurs in the
/// lowercased text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

impl FlagRule {
    pub const fn new(name: &'static str, keywords: &'static [&'static str]) -> Self {
        Self { name, keywords }
    }

    pub fn test(&self, text: &str) -> bool {
        contains_any(text, self.keywords)
    }
}

pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Evaluated flags for one input, keyed by flag name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flags(BTreeMap<String, bool>);

impl Flags {
    pub fn get(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn set(&mut self, name: &str, value: bool) {
        self.0.insert(name.to_string(), value);
    }

    pub fn count_set(&self) -> usize {
        self.0.values().filter(|v| **v).count()
    }

    pub fn into_map(self) -> BTreeMap<String, bool> {
        self.0
    }
}

pub fn extract_flags(rules: &[FlagRule], text: &str) -> Flags {
    let mut flags = Flags::default();
    for rule in rules {
        flags.set(rule.name, rule.test(text));
    }
    flags
}

/// Flags a pattern would compute for `text`. Unknown pattern ids yield an
/// empty map.
pub fn extract_flags_for_pattern(pattern_id: &str, text: &str) -> BTreeMap<String, bool> {
    let text = text.to_lowercase();
    match PatternId::parse(pattern_id) {
        Some(pattern) => extract_flags(pattern.flag_rules(), &text).into_map(),
        None => BTreeMap::new(),
    }
}

fn count_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+)\s*(?:spoke|subscription|suscripci|subscripci|subcripci)")
            .expect("valid regex")
    })
}

/// Repeat count for spokes/subscriptions named in `text`, or `default`.
/// Zero and unparseable counts fall back to the default.
pub fn requested_count(text: &str, default: usize) -> usize {
    count_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("hub and spoke para 7 suscripciones", 7)]
    #[test_case("hub and spoke para 4 subcripciones", 4)]
    #[test_case("12 spokes across regions", 12)]
    #[test_case("2 subscriptions", 2)]
    #[test_case("abc spokes", 3)]
    #[test_case("0 spokes", 3)]
    #[test_case("99999999999999999999999 spokes", 3)]
    #[test_case("hub with 5 regions and 6 spokes", 6)]
    fn requested_count_cases(text: &str, expected: usize) {
        assert_eq!(requested_count(text, 3), expected);
    }

    #[test]
    fn flags_are_independent() {
        const RULES: &[FlagRule] = &[
            FlagRule::new("has_db", &["sql", "database"]),
            FlagRule::new("has_cache", &["redis"]),
        ];
        let flags = extract_flags(RULES, "azure sql with nothing else");
        assert!(flags.get("has_db"));
        assert!(!flags.get("has_cache"));
        assert!(!flags.get("unknown"));
        assert_eq!(flags.count_set(), 1);
    }

    #[test]
    fn unknown_pattern_has_no_flags() {
        assert!(extract_flags_for_pattern("nope", "sql").is_empty());
    }

    #[test]
    fn pattern_flags_are_lowercased_before_matching() {
        let flags = extract_flags_for_pattern("security_architecture", "Azure FIREWALL with WAF");
        assert_eq!(flags.get("has_firewall"), Some(&true));
        assert_eq!(flags.get("has_waf"), Some(&true));
        assert_eq!(flags.get("has_siem"), Some(&false));
    }
}
