//! In-process session history
//!
//! An append-only log of question/answer turns, empty at process start and
//! torn down with it. Nothing in the answering path reads it yet; it exists
//! for future multi-turn context. Owned by the request-handling layer via
//! `AppState` rather than living in a module-level global, and guarded for
//! concurrent request handlers.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use crate::config::HistoryConfig;

/// One recorded question/answer pair
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

/// Thread-safe chat history with an explicit retention policy
pub struct SessionHistory {
    turns: RwLock<Vec<ChatTurn>>,
    max_turns: Option<usize>,
}

impl SessionHistory {
    /// Create an empty history. `max_turns = None` retains every turn for
    /// the life of the process; `Some(n)` evicts the oldest past `n`.
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            turns: RwLock::new(Vec::new()),
            max_turns: config.max_turns,
        }
    }

    /// Append a turn, evicting the oldest if the cap is exceeded
    pub fn record(&self, question: impl Into<String>, answer: impl Into<String>) {
        let mut turns = self.turns.write();
        turns.push(ChatTurn {
            question: question.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        });
        if let Some(max) = self.max_turns {
            while turns.len() > max {
                turns.remove(0);
            }
        }
    }

    /// Number of retained turns
    pub fn len(&self) -> usize {
        self.turns.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.read().is_empty()
    }

    /// Take every retained turn, leaving the history empty
    pub fn drain(&self) -> Vec<ChatTurn> {
        std::mem::take(&mut *self.turns.write())
    }
}
