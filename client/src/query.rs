use std::fmt::Display;

use crate::{ClientError, Result};

/// A single search term of the query language.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryTerm {
    /// Bare word, matched anywhere inside a field
    Word(String),
    /// Quoted phrase, matched against whole fields
    Phrase(String),
}

impl QueryTerm {
    pub fn word<S: Into<String>>(word: S) -> Self {
        QueryTerm::Word(word.into())
    }

    pub fn phrase<S: Into<String>>(phrase: S) -> Self {
        QueryTerm::Phrase(phrase.into())
    }

    /// Checks that the term renders to exactly one token of the same kind.
    pub fn validate(&self) -> Result<()> {
        match self {
            QueryTerm::Word(word) => {
                if word.is_empty() {
                    return Err(ClientError::EmptyTerm);
                }
                if word.chars().any(|c| c.is_whitespace() || c == '"') {
                    return Err(ClientError::InvalidWord(word.clone()));
                }
                if word.eq_ignore_ascii_case("and") || word.eq_ignore_ascii_case("or") {
                    return Err(ClientError::ReservedWord(word.clone()));
                }
                Ok(())
            }
            QueryTerm::Phrase(phrase) => {
                if phrase.trim().is_empty() {
                    return Err(ClientError::EmptyTerm);
                }
                if phrase.contains('"') {
                    return Err(ClientError::InvalidPhrase(phrase.clone()));
                }
                Ok(())
            }
        }
    }
}

impl Display for QueryTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryTerm::Word(word) => write!(f, "{}", word),
            QueryTerm::Phrase(phrase) => write!(f, "\"{}\"", phrase),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Display for Connective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Connective::And => write!(f, "AND"),
            Connective::Or => write!(f, "OR"),
        }
    }
}

/// Builder for search queries.
///
/// Terms are combined strictly left to right with no grouping, the same way
/// the server reads them: `word("a").or_word("b").and_word("c")` means
/// `(a OR b) AND c`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    head: Option<QueryTerm>,
    steps: Vec<(Connective, QueryTerm)>,
}

impl QueryBuilder {
    /// Create a new empty query builder. An empty query matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a bare word
    pub fn word<S: Into<String>>(word: S) -> Self {
        Self::new().and(QueryTerm::word(word))
    }

    /// Start with a quoted phrase
    pub fn phrase<S: Into<String>>(phrase: S) -> Self {
        Self::new().and(QueryTerm::phrase(phrase))
    }

    /// Add an AND condition. On an empty builder this becomes the first term.
    pub fn and(self, term: QueryTerm) -> Self {
        self.push(Connective::And, term)
    }

    /// Add an OR condition. On an empty builder this becomes the first term.
    pub fn or(self, term: QueryTerm) -> Self {
        self.push(Connective::Or, term)
    }

    pub fn and_word<S: Into<String>>(self, word: S) -> Self {
        self.and(QueryTerm::word(word))
    }

    pub fn or_word<S: Into<String>>(self, word: S) -> Self {
        self.or(QueryTerm::word(word))
    }

    pub fn and_phrase<S: Into<String>>(self, phrase: S) -> Self {
        self.and(QueryTerm::phrase(phrase))
    }

    pub fn or_phrase<S: Into<String>>(self, phrase: S) -> Self {
        self.or(QueryTerm::phrase(phrase))
    }

    fn push(mut self, connective: Connective, term: QueryTerm) -> Self {
        if self.head.is_none() {
            self.head = Some(term);
        } else {
            self.steps.push((connective, term));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Validate every term and render the query string
    pub fn to_query_string(&self) -> Result<String> {
        let Some(head) = &self.head else {
            return Ok(String::new());
        };
        head.validate()?;
        let mut query = head.to_string();
        for (connective, term) in &self.steps {
            term.validate()?;
            query.push_str(&format!(" {} {}", connective, term));
        }
        Ok(query)
    }
}
