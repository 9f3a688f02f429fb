//! Ordered "first match wins" rule lists.
//!
//! Profile selection and subject colouring are both heuristic lookups whose
//! tie-break order matters. They are expressed as slices of [`Rule`]s and
//! evaluated with [`first_match`], so the order is the slice order and
//! nothing else.

/// A predicate paired with the value it selects.
#[derive(Debug, Clone, Copy)]
pub struct Rule<K, V> {
    /// Rule key, interpreted by the predicate passed to [`first_match`]
    pub key: K,
    /// Value selected when the rule matches
    pub value: V,
}

impl<K, V> Rule<K, V> {
    /// Create a rule.
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// Return the value of the first rule whose key satisfies `matches`.
///
/// # Examples
///
/// ```
/// use timetable_oxide::rules::{first_match, Rule};
///
/// let rules = [Rule::new("mat", 1), Rule::new("a", 2)];
/// assert_eq!(first_match(&rules, |k| "matematica".contains(k)), Some(&1));
/// assert_eq!(first_match(&rules, |k| "storia".contains(k)), Some(&2));
/// assert_eq!(first_match(&rules, |k| "fisic".contains(k)), None);
/// ```
pub fn first_match<'a, K, V>(rules: &'a [Rule<K, V>], matches: impl Fn(&K) -> bool) -> Option<&'a V> {
    rules.iter().find(|rule| matches(&rule.key)).map(|rule| &rule.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earlier_rule_wins_ties() {
        let rules = [Rule::new(2, "first"), Rule::new(4, "second")];
        assert_eq!(first_match(&rules, |k| 8 % k == 0), Some(&"first"));
    }

    #[test]
    fn test_empty_rule_list() {
        let rules: [Rule<u8, u8>; 0] = [];
        assert_eq!(first_match(&rules, |_| true), None);
    }
}
