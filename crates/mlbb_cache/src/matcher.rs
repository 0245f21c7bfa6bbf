//! Name resolution: exact lookup with a fuzzy fallback.

use crate::{HeroCache, Snapshot, snapshot::fold_name};
use mlbb_api::HeroId;
use tracing::debug;

/// Similarity between a query and a candidate name on a 0-100 scale.
pub trait NameMatcher: Send + Sync {
    /// Score `candidate` against `query`; 100 is identical.
    fn score(&self, query: &str, candidate: &str) -> f64;
}

/// Normalised Levenshtein similarity over case-folded names.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinMatcher;

impl NameMatcher for LevenshteinMatcher {
    fn score(&self, query: &str, candidate: &str) -> f64 {
        strsim::normalized_levenshtein(&fold_name(query), &fold_name(candidate)) * 100.0
    }
}

/// How a name was resolved.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum Resolution {
    /// Case-insensitive exact match
    #[display("exact")]
    Exact,
    /// Best fuzzy candidate at or above the threshold
    #[display("fuzzy ({:.0})", score)]
    Fuzzy {
        /// Similarity of the accepted candidate
        score: f64,
    },
}

/// A resolved hero.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHero {
    /// Hero id
    pub id: HeroId,
    /// Display name with original casing
    pub name: String,
    /// How the query matched
    pub resolution: Resolution,
}

/// Exact-then-fuzzy resolver over the cache's current snapshot.
///
/// ```
/// use mlbb_cache::{HeroResolver, LevenshteinMatcher, NameMatcher};
///
/// let resolver = HeroResolver::new(LevenshteinMatcher, 80.0);
/// assert!(LevenshteinMatcher.score("laylaa", "Layla") >= 80.0);
/// assert_eq!(resolver.threshold(), 80.0);
/// ```
#[derive(Debug, Clone)]
pub struct HeroResolver<M = LevenshteinMatcher> {
    matcher: M,
    threshold: f64,
}

impl<M: NameMatcher> HeroResolver<M> {
    /// Create a resolver accepting fuzzy matches scoring at least `threshold`.
    pub fn new(matcher: M, threshold: f64) -> Self {
        Self { matcher, threshold }
    }

    /// Minimum accepted fuzzy score.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Resolve `query` against a snapshot.
    pub fn resolve_in(&self, snapshot: &Snapshot, query: &str) -> Option<ResolvedHero> {
        if let Some(id) = snapshot.lookup_by_name(query) {
            return Some(ResolvedHero {
                id: id.clone(),
                name: snapshot.display_name(id).unwrap_or(query).to_string(),
                resolution: Resolution::Exact,
            });
        }

        let (id, name, score) = snapshot
            .id_to_name()
            .iter()
            .map(|(id, name)| (id, name, self.matcher.score(query, name)))
            .max_by(|a, b| a.2.total_cmp(&b.2).then_with(|| b.1.cmp(a.1)))?;

        if score < self.threshold {
            debug!(query, best = %name, score, threshold = self.threshold, "No fuzzy match above threshold");
            return None;
        }

        debug!(query, matched = %name, score, "Fuzzy match accepted");
        Some(ResolvedHero {
            id: id.clone(),
            name: name.clone(),
            resolution: Resolution::Fuzzy { score },
        })
    }

    /// Resolve `query` against the cache's installed snapshot.
    ///
    /// Returns `None` before the first refresh.
    pub fn resolve<S>(&self, cache: &HeroCache<S>, query: &str) -> Option<ResolvedHero> {
        let snapshot = cache.snapshot()?;
        self.resolve_in(&snapshot, query)
    }
}

impl Default for HeroResolver<LevenshteinMatcher> {
    fn default() -> Self {
        Self::new(LevenshteinMatcher, 80.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names_score_100() {
        assert_eq!(LevenshteinMatcher.score("Tigreal", "tigreal"), 100.0);
    }

    #[test]
    fn distant_names_score_low() {
        assert!(LevenshteinMatcher.score("laylaa", "Tigreal") < 80.0);
    }
}
