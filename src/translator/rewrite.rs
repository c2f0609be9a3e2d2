//! Operator rewriting and known-malformed formula correction

use once_cell::sync::Lazy;
use regex::Regex;

/// Token substituted for the raw `tt` constant
pub const DEFAULT_TT_PLACEHOLDER: &str = "disambiguated";

/// Raw-notation rewrites, applied in this order
const OPERATOR_REWRITES: [(&str, &str); 5] = [
    ("->", "=>"),
    ("<>", "F "),
    ("[]", "G "),
    ("&&", "&"),
    ("||", "|"),
];

static SPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(" {2,}").expect("space-run pattern is a valid regex"));

/// Repair applied to one of the known malformed corpus formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// The formula is missing its final closing parenthesis
    AppendClosingParen,
    /// The formula carries one closing parenthesis too many
    DropTrailingParen,
}

/// Formulas of the ltl3tools suite that are broken after rewriting
const KNOWN_MALFORMED: [(&str, Correction); 2] = [
    ("G F (a => (c U d)", Correction::AppendClosingParen),
    ("G F (a => F d))", Correction::DropTrailingParen),
];

/// Rewrite raw property notation into the monitor's input syntax
///
/// `placeholder` replaces every `tt`. Runs of spaces collapse to one and the
/// result is trimmed.
pub fn rewrite_operators(raw: &str, placeholder: &str) -> String {
    let mut formula = raw.to_string();
    for (from, to) in OPERATOR_REWRITES {
        formula = formula.replace(from, to);
    }
    formula = formula.replace("tt", placeholder);

    SPACE_RUNS.replace_all(&formula, " ").trim().to_string()
}

/// Patch the two known malformed formulas; everything else passes unchanged
pub fn correct_known_malformed(formula: String) -> (String, Option<Correction>) {
    let Some(&(_, correction)) = KNOWN_MALFORMED.iter().find(|(bad, _)| *bad == formula) else {
        return (formula, None);
    };

    let mut fixed = formula;
    match correction {
        Correction::AppendClosingParen => fixed.push(')'),
        Correction::DropTrailingParen => {
            fixed.pop();
        }
    }
    (fixed, Some(correction))
}

/// Full normalization of a property body: rewriting then correction
pub fn normalize_property(raw: &str, placeholder: &str) -> (String, Option<Correction>) {
    correct_known_malformed(rewrite_operators(raw, placeholder))
}
