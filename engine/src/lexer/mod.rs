//! The search language: tokens, operators and the left-to-right fold plan a
//! raw query string compiles into.
//!
//! There is no operator precedence and no grouping. `a OR b AND c` reads as
//! `(a OR b) AND c`, and terms with nothing between them are joined with AND.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod lexer;
pub mod matcher;
pub mod scoring;
pub mod tokenizer;

/// Describes a lexical unit of the search language
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Token {
    /// Unquoted run of non-whitespace characters, matched as a substring
    Word(String),
    /// Contents of a `"quoted span"`, matched against whole fields
    Phrase(String),
}

impl Token {
    pub fn text(&self) -> &str {
        match self {
            Token::Word(text) | Token::Phrase(text) => text,
        }
    }

    pub fn is_exact_phrase(&self) -> bool {
        matches!(self, Token::Phrase(_))
    }

    /// The boolean operator this token stands for. Only unquoted words can be
    /// operators; `"and"` in quotes is a literal search term.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Token::Word(word) => Operator::from_word(word),
            Token::Phrase(_) => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Word(word) => write!(f, "{}", word),
            Token::Phrase(phrase) => write!(f, "\"{}\"", phrase),
        }
    }
}

/// Boolean combinator joining a search term to everything before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    /// Case-insensitive recognition of `and` / `or`.
    pub fn from_word(word: &str) -> Option<Operator> {
        if word.eq_ignore_ascii_case("and") {
            Some(Operator::And)
        } else if word.eq_ignore_ascii_case("or") {
            Some(Operator::Or)
        } else {
            None
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::And => write!(f, "AND"),
            Operator::Or => write!(f, "OR"),
        }
    }
}

/// A token that takes part in matching, with its lowercased needle cached so
/// the matcher never re-folds the query text per candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    token: Token,
    needle: String,
}

impl SearchTerm {
    pub fn new(token: Token) -> SearchTerm {
        let needle = token.text().to_lowercase();
        SearchTerm { token, needle }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn text(&self) -> &str {
        self.token.text()
    }

    /// Lowercased term text used for comparisons.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn is_exact_phrase(&self) -> bool {
        self.token.is_exact_phrase()
    }
}

impl From<Token> for SearchTerm {
    fn from(token: Token) -> Self {
        SearchTerm::new(token)
    }
}

/// Left-fold evaluation plan: a leading term followed by `(operator, term)`
/// steps, applied strictly in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPlan {
    head: Option<SearchTerm>,
    steps: Vec<(Operator, SearchTerm)>,
}

impl QueryPlan {
    pub fn empty() -> QueryPlan {
        QueryPlan::default()
    }

    /// An empty plan comes from a query with no search terms and matches
    /// every candidate.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<&SearchTerm> {
        self.head.as_ref()
    }

    pub fn steps(&self) -> &[(Operator, SearchTerm)] {
        &self.steps
    }

    /// Number of search terms in the plan.
    pub fn len(&self) -> usize {
        match self.head {
            Some(_) => 1 + self.steps.len(),
            None => 0,
        }
    }

    pub fn terms(&self) -> impl Iterator<Item = &SearchTerm> {
        self.head
            .iter()
            .chain(self.steps.iter().map(|(_, term)| term))
    }

    /// Appends a term. The first term becomes the head and its operator is
    /// dropped, since there is nothing on its left to combine with.
    pub(crate) fn push(&mut self, op: Operator, term: SearchTerm) {
        if self.head.is_none() {
            self.head = Some(term);
        } else {
            self.steps.push((op, term));
        }
    }
}

impl Display for QueryPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(head) = &self.head else {
            return write!(f, "*");
        };
        let mut rendered = head.token().to_string();
        for (op, term) in &self.steps {
            let symbol = match op {
                Operator::And => "&&",
                Operator::Or => "||",
            };
            rendered = format!("({} {} {})", rendered, symbol, term.token());
        }
        write!(f, "{}", rendered)
    }
}
