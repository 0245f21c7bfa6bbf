//! Draft analysis: counter recommendations and team synergy.
//!
//! Scores combine two kinds of evidence. The curated [`MatchupBook`] says
//! who beats whom, and the live snapshot's detail documents carry upstream
//! `relation` lists (assist, strong, weak). Each source that supports a
//! claim adds [`EVIDENCE_WEIGHT`], capped at [`MAX_PAIR_SCORE`] per pair,
//! so a pair is scored on the 0-10 scale players are used to.

use mlbb_api::{HeroId, MatchupBook, Relation, matchup_key};
use mlbb_cache::Snapshot;
use std::collections::{HashMap, HashSet};

/// Points added by each independent piece of evidence.
pub const EVIDENCE_WEIGHT: f64 = 5.0;

/// Highest score a single pair can reach.
pub const MAX_PAIR_SCORE: f64 = 10.0;

/// A hero suggested against an enemy line-up.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSuggestion {
    /// Display name
    pub name: String,
    /// Sum of per-enemy scores
    pub score: f64,
    /// Enemies this hero counters, in input order
    pub against: Vec<String>,
}

/// Synergy of one pair on a team.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSynergy {
    /// First hero, in input order
    pub first: String,
    /// Second hero
    pub second: String,
    /// 0-10 score
    pub score: f64,
}

/// Synergy assessment for a team composition.
#[derive(Debug, Clone, PartialEq)]
pub struct SynergyReport {
    /// Mean over rated pairs, 0 when no pair is rated
    pub score: f64,
    /// Pairs with any synergy evidence
    pub rated: Vec<PairSynergy>,
    /// Pairs with no evidence either way
    pub unrated: usize,
    /// Team members with no detail document in the snapshot
    pub missing_detail: Vec<String>,
}

/// Evidence sources for one analysis.
///
/// Works without a snapshot; live relations then contribute nothing.
#[derive(Debug)]
pub struct Draft<'a> {
    book: &'a MatchupBook,
    snapshot: Option<&'a Snapshot>,
    ids: HashMap<String, HeroId>,
}

impl<'a> Draft<'a> {
    /// Combine the curated tables with an optional live snapshot.
    pub fn new(book: &'a MatchupBook, snapshot: Option<&'a Snapshot>) -> Self {
        let ids = snapshot
            .map(|snapshot| {
                snapshot
                    .id_to_name()
                    .iter()
                    .map(|(id, name)| (matchup_key(name), id.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            book,
            snapshot,
            ids,
        }
    }

    /// Best counters to `enemies`, highest score first, at most `limit`.
    ///
    /// Enemies themselves are never suggested. Ties are broken by name.
    pub fn recommend_counters(&self, enemies: &[String], limit: usize) -> Vec<CounterSuggestion> {
        let enemy_keys: HashSet<String> = enemies.iter().map(|e| matchup_key(e)).collect();

        let mut suggestions: Vec<CounterSuggestion> = self
            .candidates()
            .into_iter()
            .filter(|candidate| !enemy_keys.contains(&matchup_key(candidate)))
            .filter_map(|candidate| {
                let mut score = 0.0;
                let mut against = Vec::new();
                for enemy in enemies {
                    let pair = self.counter_score(&candidate, enemy);
                    if pair > 0.0 {
                        score += pair;
                        against.push(enemy.clone());
                    }
                }
                (score > 0.0).then_some(CounterSuggestion {
                    name: candidate,
                    score,
                    against,
                })
            })
            .collect();

        suggestions.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        suggestions.truncate(limit);
        suggestions
    }

    /// How strongly `candidate` counters `enemy`, 0-10.
    pub fn counter_score(&self, candidate: &str, enemy: &str) -> f64 {
        let mut evidence = 0u32;

        if self.book.matchup(candidate).is_some_and(|row| row.beats(enemy)) {
            evidence += 1;
        }
        if self.book.matchup(enemy).is_some_and(|row| row.loses_to(candidate)) {
            evidence += 1;
        }
        if self.relates(candidate, Relation::Strong, enemy) {
            evidence += 1;
        }
        if self.relates(enemy, Relation::Weak, candidate) {
            evidence += 1;
        }

        (f64::from(evidence) * EVIDENCE_WEIGHT).min(MAX_PAIR_SCORE)
    }

    /// Pairwise synergy of `team`.
    ///
    /// A pair scores when either hero's detail lists the other as an assist
    /// partner. The team score averages the rated pairs only; repeated
    /// names are counted once.
    pub fn team_synergy(&self, team: &[String]) -> SynergyReport {
        let mut seen = HashSet::new();
        let members: Vec<&String> = team
            .iter()
            .filter(|name| seen.insert(matchup_key(name)))
            .collect();

        let mut rated = Vec::new();
        let mut unrated = 0usize;
        for (idx, first) in members.iter().enumerate() {
            for second in &members[idx + 1..] {
                let evidence = [
                    self.relates(first, Relation::Assist, second),
                    self.relates(second, Relation::Assist, first),
                ]
                .into_iter()
                .filter(|hit| *hit)
                .count() as f64;
                if evidence > 0.0 {
                    rated.push(PairSynergy {
                        first: (*first).clone(),
                        second: (*second).clone(),
                        score: (evidence * EVIDENCE_WEIGHT).min(MAX_PAIR_SCORE),
                    });
                } else {
                    unrated += 1;
                }
            }
        }

        let score = if rated.is_empty() {
            0.0
        } else {
            rated.iter().map(|pair| pair.score).sum::<f64>() / rated.len() as f64
        };
        let missing_detail = members
            .iter()
            .filter(|name| self.detail_ids(name, Relation::Assist).is_none())
            .map(|name| (*name).clone())
            .collect();

        SynergyReport {
            score,
            rated,
            unrated,
            missing_detail,
        }
    }

    /// True if `hero`'s detail lists `other` under `relation`.
    fn relates(&self, hero: &str, relation: Relation, other: &str) -> bool {
        let Some(other_id) = self.ids.get(&matchup_key(other)) else {
            return false;
        };
        self.detail_ids(hero, relation)
            .is_some_and(|ids| ids.contains(other_id))
    }

    fn detail_ids(&self, hero: &str, relation: Relation) -> Option<Vec<HeroId>> {
        let snapshot = self.snapshot?;
        let id = self.ids.get(&matchup_key(hero))?;
        snapshot
            .get_detail(id)
            .map(|detail| detail.relation(relation))
    }

    /// Every hero either source knows, snapshot spelling preferred.
    fn candidates(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        let live = self
            .snapshot
            .map(|snapshot| snapshot.names())
            .unwrap_or_default();
        let curated = self.book.matchups().iter().map(|row| row.hero().as_str());
        for name in live.into_iter().chain(curated) {
            if seen.insert(matchup_key(name)) {
                names.push(name.to_string());
            }
        }
        names
    }
}
