//! Numeric-aware collation for skill ids, so `"Skill2"` sorts before `"Skill10"`.
//!
//! Follows the shape of the root locale order with numeric collation on:
//! whitespace < punctuation < symbols < digits < letters at the primary level,
//! digit runs compared by value, letters compared without accents or case.
//! Accents break primary ties, then case (lowercase first), then raw bytes, so
//! the order is total and sorting is deterministic.

use std::cmp::Ordering;

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// ASCII punctuation and symbols in root collation order.
const PUNCT_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Digit run, ordered by numeric value; leading zeros are ignored.
#[derive(Debug, Clone, Copy)]
struct Numeric<'a>(&'a str);

impl Numeric<'_> {
    fn significant(&self) -> &str {
        self.0.trim_start_matches('0')
    }
}

impl Ord for Numeric<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant(), other.significant());
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

impl PartialOrd for Numeric<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Numeric<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Numeric<'_> {}

/// Primary collation element. Variant order is the class order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Element<'a> {
    Space,
    Punct(usize),
    Symbol(u32),
    Number(Numeric<'a>),
    Letter(char),
}

#[derive(Debug, Default)]
struct CollationKey<'a> {
    primary: Vec<Element<'a>>,
    accents: Vec<bool>,
    upper: Vec<bool>,
}

impl<'a> CollationKey<'a> {
    fn push(&mut self, element: Element<'a>, accented: bool, upper: bool) {
        self.primary.push(element);
        self.accents.push(accented);
        self.upper.push(upper);
    }

    fn push_char(&mut self, c: char) {
        let mut base = None;
        let mut accented = false;
        decompose_canonical(c, |d| {
            if is_combining_mark(d) {
                accented = true;
            } else if base.is_none() {
                base = Some(d);
            }
        });

        let Some(base) = base else {
            // A lone combining mark accents the previous element.
            if let Some(last) = self.accents.last_mut() {
                *last = true;
            }
            return;
        };

        if base.is_whitespace() {
            self.push(Element::Space, accented, false);
        } else if base.is_alphabetic() {
            let folded = base.to_lowercase().next().unwrap_or(base);
            self.push(Element::Letter(folded), accented, base.is_uppercase());
        } else if let Some(rank) = PUNCT_ORDER.find(base) {
            self.push(Element::Punct(rank), accented, false);
        } else {
            self.push(Element::Symbol(base as u32), accented, false);
        }
    }
}

fn collation_key(s: &str) -> CollationKey<'_> {
    let mut key = CollationKey::default();
    let mut digits_start: Option<usize> = None;

    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() {
            digits_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = digits_start.take() {
            key.push(Element::Number(Numeric(&s[start..i])), false, false);
        }
        key.push_char(c);
    }
    if let Some(start) = digits_start {
        key.push(Element::Number(Numeric(&s[start..])), false, false);
    }
    key
}

pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ka = collation_key(a);
    let kb = collation_key(b);

    ka.primary
        .cmp(&kb.primary)
        .then_with(|| ka.accents.cmp(&kb.accents))
        .then_with(|| ka.upper.cmp(&kb.upper))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(items: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| natural_cmp(a, b));
        v
    }

    #[test]
    fn test_numeric_runs_compare_by_value() {
        assert_eq!(sorted(&["s10", "s2", "s1"]), vec!["s1", "s2", "s10"]);
        assert_eq!(
            sorted(&["Skill10", "Skill2", "Skill1"]),
            vec!["Skill1", "Skill2", "Skill10"]
        );
    }

    #[test]
    fn test_multiple_numeric_runs() {
        assert_eq!(
            sorted(&["k8s-1.10", "k8s-1.9", "k8s-1.2"]),
            vec!["k8s-1.2", "k8s-1.9", "k8s-1.10"]
        );
    }

    #[test]
    fn test_matches_locale_compare_numeric() {
        // Order produced by `localeCompare(b, undefined, { numeric: true })`.
        assert_eq!(
            sorted(&["s1", "s-x", "Skill10", "Skill-2", "f", "é", "ab", "a{"]),
            vec!["a{", "ab", "é", "f", "s-x", "s1", "Skill-2", "Skill10"]
        );
    }

    #[test]
    fn test_class_order() {
        assert_eq!(
            sorted(&["a", "1", "$", "-", " "]),
            vec![" ", "-", "$", "1", "a"]
        );
    }

    #[test]
    fn test_accents_ignored_until_tie() {
        assert_eq!(sorted(&["ef", "éa", "eb"]), vec!["éa", "eb", "ef"]);
        assert_eq!(natural_cmp("e", "é"), Ordering::Less);
        // Decomposed and precomposed forms share a primary key.
        assert_eq!(natural_cmp("e\u{301}x", "éy"), Ordering::Less);
    }

    #[test]
    fn test_case_insensitive_primary_order() {
        assert_eq!(sorted(&["beta", "Alpha", "gamma"]), vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(natural_cmp("s1", "S1"), Ordering::Less);
        assert_eq!(natural_cmp("S1", "s1"), Ordering::Greater);
    }

    #[test]
    fn test_leading_zeros_and_long_numbers() {
        assert_eq!(natural_cmp("s007", "s7"), Ordering::Less);
        assert_eq!(
            natural_cmp("id99999999999999999999", "id100000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("s", "s1"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }
}
