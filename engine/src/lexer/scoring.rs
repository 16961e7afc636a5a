use serde::{Deserialize, Serialize};

use crate::{
    config::{DEFAULT_EXACT_WEIGHT, DEFAULT_PARTIAL_WEIGHT},
    lexer::Operator,
};

/// How well one entity matches one search term. Ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    NoMatch,
    /// Unquoted term found inside a field
    PartialMatch,
    /// Quoted term equal to a whole field
    ExactMatch,
}

impl MatchOutcome {
    pub fn is_match(self) -> bool {
        self != MatchOutcome::NoMatch
    }
}

/// Relevance contributed by each kind of term hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    pub exact: u32,
    pub partial: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            exact: DEFAULT_EXACT_WEIGHT,
            partial: DEFAULT_PARTIAL_WEIGHT,
        }
    }
}

impl Weights {
    pub fn weight(&self, outcome: MatchOutcome) -> u32 {
        match outcome {
            MatchOutcome::ExactMatch => self.exact,
            MatchOutcome::PartialMatch => self.partial,
            MatchOutcome::NoMatch => 0,
        }
    }
}

/// Running state of the left fold for a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relevance {
    pub matched: bool,
    pub score: u32,
}

impl Relevance {
    /// Result for every candidate of an empty query.
    pub fn everything() -> Relevance {
        Relevance {
            matched: true,
            score: 0,
        }
    }

    /// Seeds the fold from the outcome of the leading term.
    pub fn start(outcome: MatchOutcome, weights: &Weights) -> Relevance {
        Relevance {
            matched: outcome.is_match(),
            score: weights.weight(outcome),
        }
    }

    /// Folds the next `(operator, outcome)` step in.
    ///
    /// AND only adds score while the conjunction still holds. OR adds the
    /// weight of any hit, even when the left side already matched, and can
    /// bring back a candidate an earlier AND had ruled out.
    pub fn combine(self, op: Operator, outcome: MatchOutcome, weights: &Weights) -> Relevance {
        match op {
            Operator::And => {
                let matched = self.matched && outcome.is_match();
                let score = if matched {
                    self.score.saturating_add(weights.weight(outcome))
                } else {
                    self.score
                };
                Relevance { matched, score }
            }
            Operator::Or => Relevance {
                matched: self.matched || outcome.is_match(),
                score: self.score.saturating_add(weights.weight(outcome)),
            },
        }
    }
}
