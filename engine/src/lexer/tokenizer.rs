use crate::{
    lexer::{Operator, QueryPlan, SearchTerm, Token},
    search_log,
};

/// Describes the input medium tokenizer
pub trait Tokenable<'a> {
    type Type;
    fn tokenize(input: Self::Type) -> Vec<Token>;
    fn parse(tokens: Vec<Token>) -> QueryPlan;
}

/// Processes raw search strings into tokens and fold plans.
///
/// Some examples of valid inputs:
///  - `david test`
///  - `John OR William AND Smith`
///  - `"Mei Ru" or "Ru Mei"`
///
/// Nothing is rejected. Unterminated quotes run to the end of the input and
/// operators with no term on one side are dropped.
pub struct StringTokenizer {}

impl StringTokenizer {
    /// Re-renders tokens as a query string that tokenizes back to the same
    /// sequence: words space-joined, phrases re-quoted.
    pub fn render(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<String>>()
            .join(" ")
    }

    fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
        if !word.is_empty() {
            tokens.push(Token::Word(std::mem::take(word)));
        }
    }
}

impl<'a> Tokenable<'a> for StringTokenizer {
    type Type = &'a str;

    fn tokenize(input: Self::Type) -> Vec<Token> {
        let mut chars = input.chars();
        let mut tokens = Vec::new();
        let mut word = String::new();
        while let Some(ch) = chars.next() {
            match ch {
                '"' => {
                    Self::flush_word(&mut word, &mut tokens);
                    let mut phrase = String::new();
                    for c in chars.by_ref() {
                        if c == '"' {
                            break;
                        }
                        phrase.push(c);
                    }
                    // Interior and edge whitespace is kept, blank phrases are not
                    if !phrase.trim().is_empty() {
                        tokens.push(Token::Phrase(phrase));
                    }
                }
                c if c.is_whitespace() => Self::flush_word(&mut word, &mut tokens),
                c => word.push(c),
            }
        }
        Self::flush_word(&mut word, &mut tokens);
        tokens
    }

    fn parse(tokens: Vec<Token>) -> QueryPlan {
        let mut plan = QueryPlan::empty();
        let mut pending: Option<Operator> = None;
        let mut discarded = 0usize;

        for token in tokens {
            if let Some(op) = token.operator() {
                // An operator with no left-hand side, or one overwritten by a
                // later operator, never reaches the plan
                if plan.is_empty() || pending.is_some() {
                    discarded += 1;
                }
                pending = Some(op);
                continue;
            }
            let op = if plan.is_empty() {
                Operator::And
            } else {
                pending.unwrap_or(Operator::And)
            };
            plan.push(op, SearchTerm::new(token));
            pending = None;
        }
        if pending.is_some() {
            discarded += 1;
        }

        if discarded > 0 {
            search_log!(
                debug,
                "Tokenizer",
                "query",
                "discarded {} stray operator(s), plan={}",
                discarded,
                plan
            );
        }
        plan
    }
}

/// Tokenizes and folds a raw query string in one step.
pub fn compile(query: &str) -> QueryPlan {
    StringTokenizer::parse(StringTokenizer::tokenize(query))
}
