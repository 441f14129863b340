use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One unit of turn content. Only text is ever produced here; anything else a
/// model sends back is kept as an opaque placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentBlock {
    Text(String),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl ConversationTurn {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::Text(text.into())],
        }
    }

    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentBlock::Text(text.into())],
        }
    }

    /// Text of the first text block, skipping non-text blocks. Empty when the
    /// turn carries no text at all.
    pub fn first_text(&self) -> String {
        self.content
            .iter()
            .find_map(|block| match block {
                ContentBlock::Text(text) => Some(text.clone()),
                ContentBlock::Other => None,
            })
            .unwrap_or_default()
    }
}

/// Ordered turn history for a single pipeline stage. Turns are only ever
/// appended. Serializes as the bare list of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conversation(Vec<ConversationTurn>);

impl Conversation {
    pub fn with_user_text(text: impl Into<String>) -> Self {
        Self(vec![ConversationTurn::user_text(text)])
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.0.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.0
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.0.last()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary_text: String,
    pub file_name: String,
}
