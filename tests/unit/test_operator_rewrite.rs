//! Unit tests for operator rewriting and the translator state machine

use patternbench::config::TranslatorConfig;
use patternbench::translator::rewrite::correct_known_malformed;
use patternbench::translator::{
    normalize_property, rewrite_operators, step, CorpusFormat, ParserState, RawLine,
    DEFAULT_TT_PLACEHOLDER,
};

#[cfg(test)]
mod rewrite_tests {
    use super::*;

    #[test]
    fn test_each_operator() {
        let cases = [
            ("p -> q", "p => q"),
            ("<>p", "F p"),
            ("[]p", "G p"),
            ("p && q", "p & q"),
            ("p || q", "p | q"),
            ("tt", "disambiguated"),
        ];
        for (raw, expected) in cases {
            assert_eq!(rewrite_operators(raw, DEFAULT_TT_PLACEHOLDER), expected, "input {raw:?}");
        }
    }

    #[test]
    fn test_rewrite_is_ordered() {
        // `<>` is rewritten before `[]`, so a box after a diamond still becomes G
        assert_eq!(
            rewrite_operators("<>[]p", DEFAULT_TT_PLACEHOLDER),
            "F G p"
        );
    }

    #[test]
    fn test_tt_inside_identifiers_is_replaced() {
        assert_eq!(
            rewrite_operators("butter", "X"),
            "buXer"
        );
    }

    #[test]
    fn test_normalized_input_is_unchanged() {
        let formula = "G (q & !r => (!p U r))";
        assert_eq!(rewrite_operators(formula, DEFAULT_TT_PLACEHOLDER), formula);
    }

    #[test]
    fn test_correction_exact_match_only() {
        let (fixed, correction) = correct_known_malformed("G F (a => (c U d) ".to_string());
        assert_eq!(fixed, "G F (a => (c U d) ");
        assert!(correction.is_none());
    }

    #[test]
    fn test_normalize_matches_example() {
        let (formula, correction) = normalize_property("<> ( a && <> b )", DEFAULT_TT_PLACEHOLDER);
        assert_eq!(formula, "F ( a & F b )");
        assert!(correction.is_none());
    }
}

#[cfg(test)]
mod state_machine_tests {
    use super::*;

    fn feed(lines: &[&str]) -> Vec<ParserState> {
        let config = TranslatorConfig::default();
        let mut state = ParserState::fresh();
        let mut states = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let raw = CorpusFormat::Ltl3Tools.classify(line);
            state = step(state, i as u64 + 1, raw, &config).unwrap().state;
            states.push(state.clone());
        }
        states
    }

    #[test]
    fn test_initial_state() {
        let state = ParserState::fresh();
        assert!(state.current_pattern.is_empty());
        assert!(state.expecting_header);
        assert!(!state.can_translate());
    }

    #[test]
    fn test_header_then_property_then_other() {
        let states = feed(&["PATTERN: Precedence", "- !p W s", "SCOPE: Globally"]);
        assert_eq!(states[0], ParserState::with_pattern("Precedence"));
        assert_eq!(states[1], ParserState::fresh());
        assert_eq!(states[2], ParserState::fresh());
    }

    #[test]
    fn test_later_header_replaces_earlier_one() {
        let states = feed(&["PATTERN: Absence", "PATTERN: Existence"]);
        assert_eq!(states[1], ParserState::with_pattern("Existence"));
    }

    #[test]
    fn test_break_clears_pending_header() {
        let config = TranslatorConfig::default();
        let state = ParserState::with_pattern("Absence");
        let state = step(state, 2, RawLine::SectionBreak, &config).unwrap().state;
        assert!(step(state, 3, RawLine::PropertyLine("[] p"), &config).is_err());
    }
}
