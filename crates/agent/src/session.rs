//! In-memory chat session: transcript ownership and turn supersession.
//!
//! Conversation state lives only for the life of the process. Each user
//! turn gets a monotonic sequence number; a turn whose work finishes after
//! a newer turn has begun is discarded instead of displayed, so a slow AI
//! round-trip can never overwrite a fresher answer.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use bharatshop_core::ScoredProduct;

use crate::llm::{QueryAnalyzer, ReplyGenerator};
use crate::pipeline::AssistedEngine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub sent_at: DateTime<Utc>,
    pub recommendations: Vec<ScoredProduct>,
}

impl ChatMessage {
    fn new(sender: Sender, text: String, recommendations: Vec<ScoredProduct>) -> Self {
        Self { id: Uuid::new_v4(), text, sender, sent_at: Utc::now(), recommendations }
    }
}

/// Handle for one user turn, allocated by [`ChatSession::begin_turn`].
#[derive(Clone, Debug)]
pub struct Turn {
    sequence: u64,
    text: String,
}

/// What happened to a completed turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The turn's bot reply was appended to the transcript.
    Replied { rate_limited: bool },
    /// A newer turn began before this one finished; its response was
    /// discarded.
    Superseded,
}

pub struct ChatSession<A, R> {
    assisted: AssistedEngine<A>,
    replies: R,
    transcript: Vec<ChatMessage>,
    latest_turn: u64,
}

impl<A: QueryAnalyzer, R: ReplyGenerator> ChatSession<A, R> {
    pub fn new(assisted: AssistedEngine<A>, replies: R) -> Self {
        Self { assisted, replies, transcript: Vec::new(), latest_turn: 0 }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Record the user message and allocate this turn's sequence number.
    /// Any earlier turn still in flight is now superseded.
    pub fn begin_turn(&mut self, text: &str) -> Turn {
        self.latest_turn += 1;
        self.transcript.push(ChatMessage::new(Sender::User, text.to_string(), Vec::new()));
        Turn { sequence: self.latest_turn, text: text.to_string() }
    }

    /// Run reply generation and assisted recommendation for a turn. The
    /// result is appended only if no newer turn has started meanwhile.
    pub async fn run_turn(&mut self, turn: Turn) -> TurnOutcome {
        let reply = self.replies.reply(&turn.text).await;
        let recommendation = self.assisted.recommend(&turn.text).await;

        if turn.sequence != self.latest_turn {
            tracing::debug!(
                sequence = turn.sequence,
                latest = self.latest_turn,
                "discarding superseded turn response"
            );
            return TurnOutcome::Superseded;
        }

        self.transcript.push(ChatMessage::new(Sender::Bot, reply, recommendation.products));
        TurnOutcome::Replied { rate_limited: recommendation.rate_limited }
    }

    /// Convenience for strictly sequential callers such as the CLI loop.
    pub async fn send(&mut self, text: &str) -> TurnOutcome {
        let turn = self.begin_turn(text);
        self.run_turn(turn).await
    }

    /// The most recent bot message, if any.
    pub fn last_reply(&self) -> Option<&ChatMessage> {
        self.transcript.iter().rev().find(|message| message.sender == Sender::Bot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::NullAnalyzer;
    use bharatshop_core::{RecommendationEngine, RecommenderConfig};

    fn session() -> ChatSession<NullAnalyzer, NullAnalyzer> {
        let engine = RecommendationEngine::with_demo_catalog(RecommenderConfig::assisted());
        ChatSession::new(AssistedEngine::new(engine, NullAnalyzer), NullAnalyzer)
    }

    #[tokio::test]
    async fn send_appends_user_and_bot_messages() {
        let mut session = session();
        let outcome = session.send("vegan snacks under ₹300").await;

        assert_eq!(outcome, TurnOutcome::Replied { rate_limited: false });
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[0].sender, Sender::User);

        let reply = session.last_reply().expect("bot reply");
        assert!(!reply.recommendations.is_empty());
        assert!(reply.text.contains("vegan snacks under ₹300"));
    }

    #[tokio::test]
    async fn stale_turn_is_discarded() {
        let mut session = session();
        let first = session.begin_turn("vegan snacks");
        let second = session.begin_turn("cotton kurta");

        // The older turn completes after the newer one began.
        assert_eq!(session.run_turn(first).await, TurnOutcome::Superseded);
        assert!(matches!(session.run_turn(second).await, TurnOutcome::Replied { .. }));

        // Only the newer turn produced a bot message.
        let bot_messages: Vec<_> = session
            .transcript()
            .iter()
            .filter(|message| message.sender == Sender::Bot)
            .collect();
        assert_eq!(bot_messages.len(), 1);
        assert!(bot_messages[0].text.contains("cotton kurta"));
    }

    #[tokio::test]
    async fn every_turn_serves_recommendations_when_catalog_non_empty() {
        let mut session = session();
        for message in ["hello", "anything at all", "vegan breakfast"] {
            session.send(message).await;
            let reply = session.last_reply().expect("bot reply");
            assert!(!reply.recommendations.is_empty(), "no products for {message:?}");
        }
    }
}
