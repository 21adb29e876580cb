use std::collections::HashMap;

use tracing::debug;

use super::super::domain::{Party, PartyId, Position, Question, TopicId, Vote};
use super::PartyMatch;

/// Outcome of comparing the user's position with a party's on one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Agreement {
    Exact,
    Partial,
    Opposed,
}

impl Agreement {
    /// Equality is checked first so that neutral/neutral earns full credit.
    pub(crate) fn between(user: Position, party: Position) -> Self {
        if user == party {
            Self::Exact
        } else if user == Position::Neutral || party == Position::Neutral {
            Self::Partial
        } else {
            Self::Opposed
        }
    }

    pub(crate) const fn credit(self) -> f64 {
        match self {
            Self::Exact => 1.0,
            Self::Partial => 0.5,
            Self::Opposed => 0.0,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct Score {
    pub(crate) matched: f64,
    pub(crate) possible: f64,
}

impl Score {
    fn record(&mut self, weight: f64, agreement: Agreement) {
        self.possible += weight;
        self.matched += weight * agreement.credit();
    }

    pub(crate) fn has_data(&self) -> bool {
        self.possible > 0.0
    }

    pub(crate) fn percentage(&self) -> u8 {
        if !self.has_data() {
            return 0;
        }
        ((self.matched / self.possible) * 100.0)
            .round()
            .clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PartyTally {
    pub(crate) party: Party,
    pub(crate) overall: Score,
    pub(crate) by_topic: HashMap<TopicId, Score>,
    pub(crate) questions_compared: u32,
}

impl PartyTally {
    pub(crate) fn topic_score(&self, topic: TopicId) -> Score {
        self.by_topic.get(&topic).copied().unwrap_or_default()
    }
}

/// Running weighted scores per party, kept in the store's party order.
#[derive(Debug)]
pub(crate) struct ScoreLedger {
    tallies: Vec<PartyTally>,
    index: HashMap<PartyId, usize>,
}

impl ScoreLedger {
    pub(crate) fn new(parties: &[Party]) -> Self {
        let mut tallies = Vec::with_capacity(parties.len());
        let mut index = HashMap::with_capacity(parties.len());
        for party in parties {
            if index.contains_key(&party.id) {
                continue;
            }
            index.insert(party.id, tallies.len());
            tallies.push(PartyTally {
                party: party.clone(),
                overall: Score::default(),
                by_topic: HashMap::new(),
                questions_compared: 0,
            });
        }
        Self { tallies, index }
    }

    pub(crate) fn record(
        &mut self,
        question: &Question,
        stance: Position,
        weight: f64,
        votes: &[Vote],
    ) {
        for vote in votes {
            let Some(tally) = self
                .index
                .get(&vote.party_id)
                .and_then(|slot| self.tallies.get_mut(*slot))
            else {
                debug!(question = %question.id, party = %vote.party_id, "skipping vote for unknown party");
                continue;
            };

            let agreement = Agreement::between(stance, vote.position);
            tally.questions_compared += 1;
            tally.overall.record(weight, agreement);
            tally
                .by_topic
                .entry(question.topic_id)
                .or_default()
                .record(weight, agreement);
        }
    }

    pub(crate) fn tallies(&self) -> &[PartyTally] {
        &self.tallies
    }

    /// Ranked descending by percentage; ties keep party order.
    pub(crate) fn party_matches(&self) -> Vec<PartyMatch> {
        let mut matches: Vec<PartyMatch> = self
            .tallies
            .iter()
            .map(|tally| PartyMatch {
                party_id: tally.party.id,
                party_name: tally.party.name.clone(),
                party_color: tally.party.color.clone(),
                match_percentage: tally.overall.percentage(),
                has_data: tally.overall.has_data(),
                questions_compared: tally.questions_compared,
            })
            .collect();
        matches.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        matches
    }
}
