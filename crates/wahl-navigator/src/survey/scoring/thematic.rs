use super::super::domain::Topic;
use super::tally::ScoreLedger;
use super::{ThematicResult, TopicPartyResult};

const PARTIES_PER_TOPIC: usize = 3;

/// Top parties per topic. Zero percentages are dropped whether they come from disagreement or
/// from missing votes, and topics left empty are omitted.
pub(crate) fn thematic_results(ledger: &ScoreLedger, topics: &[Topic]) -> Vec<ThematicResult> {
    topics
        .iter()
        .filter_map(|topic| {
            let mut party_results: Vec<TopicPartyResult> = ledger
                .tallies()
                .iter()
                .map(|tally| TopicPartyResult {
                    party_name: tally.party.name.clone(),
                    match_percentage: tally.topic_score(topic.id).percentage(),
                })
                .filter(|result| result.match_percentage > 0)
                .collect();

            if party_results.is_empty() {
                return None;
            }

            party_results.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
            party_results.truncate(PARTIES_PER_TOPIC);

            Some(ThematicResult {
                topic: topic.name.clone(),
                party_results,
            })
        })
        .collect()
}
