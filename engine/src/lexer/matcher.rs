use crate::{
    data::{SearchField, Searchable},
    lexer::{scoring::MatchOutcome, SearchTerm},
};

/// Best outcome of `term` across every searchable field of `entity`.
pub fn matches<T: Searchable>(entity: &T, term: &SearchTerm) -> MatchOutcome {
    let mut best = MatchOutcome::NoMatch;
    for field in entity.search_fields() {
        best = best.max(match_field(&field, term));
        if best == MatchOutcome::ExactMatch {
            break;
        }
    }
    best
}

/// Compares one field against one term, ignoring case.
///
/// Phrases must equal the whole field. Words only need to appear somewhere in
/// it. Absent fields never match.
pub fn match_field(field: &SearchField<'_>, term: &SearchTerm) -> MatchOutcome {
    let Some(text) = field.text else {
        return MatchOutcome::NoMatch;
    };
    if term.needle().is_empty() {
        return MatchOutcome::NoMatch;
    }
    let haystack = text.to_lowercase();
    if term.is_exact_phrase() {
        if haystack == term.needle() {
            MatchOutcome::ExactMatch
        } else {
            MatchOutcome::NoMatch
        }
    } else if haystack.contains(term.needle()) {
        MatchOutcome::PartialMatch
    } else {
        MatchOutcome::NoMatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::business::Business, data::user::User, lexer::Token};

    fn word(text: &str) -> SearchTerm {
        SearchTerm::new(Token::Word(text.to_string()))
    }

    fn phrase(text: &str) -> SearchTerm {
        SearchTerm::new(Token::Phrase(text.to_string()))
    }

    #[test]
    fn test_partial_match_is_case_insensitive_substring() {
        let business = Business::new(1, "David Test Centre");
        assert_eq!(matches(&business, &word("test")), MatchOutcome::PartialMatch);
        assert_eq!(matches(&business, &word("ENTR")), MatchOutcome::PartialMatch);
        assert_eq!(matches(&business, &word("Davids")), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_phrase_must_equal_whole_field() {
        let business = Business::new(1, "John Smith");
        assert_eq!(matches(&business, &phrase("john smith")), MatchOutcome::ExactMatch);
        assert_eq!(matches(&business, &phrase("John")), MatchOutcome::NoMatch);
        assert_eq!(matches(&business, &phrase("John Smith Jr")), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_phrase_is_never_partial() {
        let business = Business::new(1, "Mei Ru Bakery");
        assert_eq!(matches(&business, &phrase("Mei Ru")), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_best_outcome_across_fields() {
        let user = User::new(4, "Chin", "Tai", "chin@example.com").with_middle_name("Wui Wen");
        assert_eq!(matches(&user, &phrase("wui wen")), MatchOutcome::ExactMatch);
        assert_eq!(matches(&user, &word("wen")), MatchOutcome::PartialMatch);
        assert_eq!(matches(&user, &word("example")), MatchOutcome::PartialMatch);
    }

    #[test]
    fn test_absent_field_never_matches() {
        let field = SearchField::optional("nickname", None);
        assert_eq!(match_field(&field, &word("a")), MatchOutcome::NoMatch);
        assert_eq!(match_field(&field, &phrase(" ")), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_empty_field_only_equals_nothing() {
        let field = SearchField::new("nickname", "");
        assert_eq!(match_field(&field, &word("a")), MatchOutcome::NoMatch);
    }
}
