use study_core::model::{DeckId, DeckRecommendation, RankName, StudyMode};

use super::LearningQuery;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecommendationVm {
    pub deck_id: DeckId,
    pub name: String,
    pub reason: String,
}

/// What the home page shows: the session action and the deck list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    pub signed_in: bool,
    pub recommendations: Vec<RecommendationVm>,
}

impl HomeVm {
    #[must_use]
    pub fn signed_out() -> Self {
        Self {
            signed_in: false,
            recommendations: Vec::new(),
        }
    }
}

#[must_use]
pub fn map_recommendations(items: &[DeckRecommendation]) -> Vec<RecommendationVm> {
    items
        .iter()
        .map(|item| RecommendationVm {
            deck_id: item.deck_id.clone(),
            name: item.deck_name.clone(),
            reason: item.reason.clone().unwrap_or_default(),
        })
        .collect()
}

/// Learning page link opened by a recommendation click.
#[must_use]
pub fn recommendation_link(deck_id: &DeckId, rank: &RankName, mode: StudyMode) -> LearningQuery {
    LearningQuery::new(deck_id, rank, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reason_renders_empty() {
        let items = vec![DeckRecommendation {
            deck_id: DeckId::new("7").unwrap(),
            deck_name: "Verbs".into(),
            reason: None,
        }];
        let vms = map_recommendations(&items);
        assert_eq!(vms[0].name, "Verbs");
        assert_eq!(vms[0].reason, "");
    }

    #[test]
    fn signed_out_home_has_no_recommendations() {
        let vm = HomeVm::signed_out();
        assert!(!vm.signed_in);
        assert!(vm.recommendations.is_empty());
    }

    #[test]
    fn recommendation_link_has_no_target_card() {
        let link = recommendation_link(
            &DeckId::new("7").unwrap(),
            &RankName::new("bronze").unwrap(),
            StudyMode::ThreeDay,
        );
        assert_eq!(link.to_string(), "deckId=7&mode=THREE_DAY&rankName=bronze");
        assert_eq!(link.target_card(), None);
    }
}
