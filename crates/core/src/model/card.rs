use serde::{Deserialize, Serialize};

use crate::model::ids::CardId;

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

/// A question/answer unit served by the content API.
///
/// Cards are transient view data: they are replaced wholesale on every load
/// and never persisted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub question: String,
    /// Recommendation entries may omit the answer.
    #[serde(default)]
    pub answer: String,
}

impl Card {
    #[must_use]
    pub fn new(id: CardId, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
