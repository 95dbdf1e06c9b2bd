use serde::{Deserialize, Serialize};

use crate::model::ids::DeckId;

/// Backend suggestion of a deck to study next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckRecommendation {
    pub deck_id: DeckId,
    pub deck_name: String,
    pub reason: Option<String>,
}
