//! Keyword-cascade alloy classification.
//!
//! An ordered table of (category, predicate) rules is evaluated top to
//! bottom and the first match wins, so rule order is auditable in one place.
//! Matching is case-folded substring containment, not tokenization; the
//! false-positive risk that comes with that (e.g. "alloy" contains "al") is
//! an accepted property of the categorization.

use crate::domain::AlloyCategory;

struct Rule {
    category: AlloyCategory,
    matches: fn(&str, &str) -> bool,
}

/// Evaluation order is significant: Sn/Pb before Steel before Titanium
/// before Aluminum, so e.g. an "Sn-Pb solder" row lands in Tin Alloys even
/// though its composition could also read as something else.
static RULES: &[Rule] = &[
    Rule { category: AlloyCategory::Tin, matches: is_tin },
    Rule { category: AlloyCategory::Steel, matches: is_steel },
    Rule { category: AlloyCategory::Titanium, matches: is_titanium },
    Rule { category: AlloyCategory::Aluminum, matches: is_aluminum },
    Rule { category: AlloyCategory::Nickel, matches: is_nickel },
    Rule { category: AlloyCategory::Copper, matches: is_copper },
    Rule { category: AlloyCategory::Magnesium, matches: is_magnesium },
    Rule { category: AlloyCategory::Intermetallic, matches: is_intermetallic },
];

/// Maps a material name and composition string to exactly one category.
/// Absence of any matching keyword is the defined default path, not an
/// error.
pub fn classify_alloy(material: &str, composition: &str) -> AlloyCategory {
    let material = material.to_lowercase();
    let composition = composition.to_lowercase();
    for rule in RULES {
        if (rule.matches)(&material, &composition) {
            return rule.category;
        }
    }
    AlloyCategory::Other
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn is_tin(material: &str, composition: &str) -> bool {
    const KEYWORDS: &[&str] = &["sn", "tin", "pb", "lead"];
    contains_any(material, KEYWORDS) || contains_any(composition, KEYWORDS)
}

fn is_steel(material: &str, composition: &str) -> bool {
    contains_any(
        material,
        &["steel", "iron", "fe-", "mild steel", "carbon steel", "stainless"],
    ) || contains_any(composition, &["fe", "iron", "steel"])
}

fn is_titanium(material: &str, composition: &str) -> bool {
    contains_any(material, &["ti-", "titanium"])
        || (composition.contains("ti") && (composition.contains("al") || composition.contains("v")))
}

fn is_aluminum(material: &str, composition: &str) -> bool {
    contains_any(material, &["al", "aluminum", "aluminium"])
        || (composition.contains("al") && !composition.contains("ti"))
}

// Composition mentions of Ni are ignored here: "ni" also occurs inside
// "titanium", so a bare substring test would fire on every titanium grade.
// Only explicit name keywords assign Nickel.
fn is_nickel(material: &str, _composition: &str) -> bool {
    contains_any(material, &["ni-", "nickel", "inconel"])
}

fn is_copper(material: &str, composition: &str) -> bool {
    contains_any(material, &["cu-", "copper", "brass", "bronze"]) || composition.contains("cu")
}

fn is_magnesium(material: &str, composition: &str) -> bool {
    contains_any(material, &["mg-", "magnesium"]) || composition.contains("mg")
}

fn is_intermetallic(material: &str, _composition: &str) -> bool {
    contains_any(material, &["intermetallic", "fe-al", "ti-al"])
}
