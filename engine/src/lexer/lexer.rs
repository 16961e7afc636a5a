use crate::{
    data::Searchable,
    lexer::{
        matcher::matches,
        scoring::{Relevance, Weights},
        tokenizer::{StringTokenizer, Tokenable},
        QueryPlan, SearchTerm,
    },
    search_log,
};

///
/// QueryLexer compiles a raw search query once and evaluates it against any
/// number of candidates of a single entity type.
///
/// Evaluation of one candidate goes through these steps:
/// 1. The leading term seeds `(matched, score)` from its match outcome
/// 2. Every following `(operator, term)` step folds into that state, left to right
/// 3. The final state decides whether the candidate is kept and how it ranks
///
pub struct QueryLexer {
    /// Fold plan compiled from the raw query
    plan: QueryPlan,
    /// Relevance weight per match outcome
    weights: Weights,
}

/// Outcome of evaluating the plan against one candidate.
#[derive(Debug)]
pub struct Evaluation<'c, T> {
    pub entity: &'c T,
    pub relevance: Relevance,
}

impl QueryLexer {
    /// Create a new QueryLexer from a precompiled plan
    pub fn new(plan: QueryPlan, weights: Weights) -> QueryLexer {
        QueryLexer { plan, weights }
    }

    /// Create a new [`QueryLexer`] with default weights through tokenization
    /// of a raw query string
    pub fn from_str(query: &str) -> QueryLexer {
        Self::compile(query, Weights::default())
    }

    pub fn compile(query: &str, weights: Weights) -> QueryLexer {
        let tokens = StringTokenizer::tokenize(query);
        Self::new(StringTokenizer::parse(tokens), weights)
    }

    pub fn plan(&self) -> &QueryPlan {
        &self.plan
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Collect the text of every search term in plan order
    pub fn collect_terms(&self) -> Vec<&str> {
        self.plan.terms().map(SearchTerm::text).collect()
    }

    /// Runs the fold for a single candidate. An empty plan matches everything
    /// with zero relevance.
    pub fn evaluate_one<T: Searchable>(&self, entity: &T) -> Relevance {
        let Some(head) = self.plan.head() else {
            return Relevance::everything();
        };
        self.plan.steps().iter().fold(
            Relevance::start(matches(entity, head), &self.weights),
            |relevance, (op, term)| relevance.combine(*op, matches(entity, term), &self.weights),
        )
    }

    /// Evaluates every candidate, preserving candidate order. Non-matching
    /// candidates are kept in the output with `matched == false`.
    pub fn evaluate<'c, T, I>(&self, candidates: I) -> Vec<Evaluation<'c, T>>
    where
        T: Searchable + 'c,
        I: IntoIterator<Item = &'c T>,
    {
        search_log!(debug, "QueryLexer", T::KIND, "PLAN={}", self.plan);

        let evaluations: Vec<Evaluation<'c, T>> = candidates
            .into_iter()
            .map(|entity| Evaluation {
                entity,
                relevance: self.evaluate_one(entity),
            })
            .collect();

        search_log!(
            debug,
            "QueryLexer",
            T::KIND,
            "evaluated {} candidate(s), {} matched",
            evaluations.len(),
            evaluations.iter().filter(|e| e.relevance.matched).count()
        );
        evaluations
    }
}
