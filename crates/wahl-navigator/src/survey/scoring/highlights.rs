use super::super::domain::Position;
use super::{AnsweredQuestion, KeyMatch, PartyMatch};

const KEY_MATCH_LIMIT: usize = 3;

/// The first answers, in answer order, where the top party voted exactly like the user on a
/// non-neutral position.
pub(crate) fn key_matches(
    top_party: Option<&PartyMatch>,
    answered: &[AnsweredQuestion],
) -> Vec<KeyMatch> {
    let Some(top_party) = top_party else {
        return Vec::new();
    };

    answered
        .iter()
        .filter_map(|question| {
            let stance = question.user_answer.stance()?;
            if stance == Position::Neutral {
                return None;
            }
            let party_vote = question
                .party_votes
                .iter()
                .find(|vote| vote.party_id == top_party.party_id)?;
            (party_vote.vote == stance).then(|| describe(question, stance, &top_party.party_name))
        })
        .take(KEY_MATCH_LIMIT)
        .collect()
}

fn describe(question: &AnsweredQuestion, stance: Position, party_name: &str) -> KeyMatch {
    let direction = if stance == Position::Agree {
        "for"
    } else {
        "against"
    };
    KeyMatch {
        title: question.title.clone(),
        description: format!(
            "You and {party_name} both voted {direction} \"{}\".",
            question.title
        ),
    }
}
