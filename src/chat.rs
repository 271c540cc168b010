//! Scripted assistant chat.
//!
//! Replies come from an ordered keyword table (first match wins) and are
//! delivered after a fixed typing delay by a spawned tokio task. The
//! session keeps an abort handle for every pending reply; closing or
//! dropping the session cancels them so a discarded view is never updated.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::task::{AbortHandle, JoinHandle};

use crate::ids::IdAllocator;
use crate::models::{ChatMessage, MessageSender};

// ═══════════════════════════════════════════
// Canned responses
// ═══════════════════════════════════════════

/// A keyword rule: any keyword contained in the input selects the response.
#[derive(Debug, Clone, Copy)]
pub struct ChatRule {
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

impl ChatRule {
    fn matches(&self, input: &str) -> bool {
        self.keywords.iter().any(|k| input.contains(k))
    }
}

pub const CHAT_RULES: &[ChatRule] = &[
    ChatRule {
        keywords: &["약", "복용", "먹었"],
        response: "약 복용 관리는 정말 중요하죠! 현재 등록된 약물들의 복용 상태를 확인해보니, 꾸준히 잘 관리하고 계시는 것 같아요. 정해진 시간에 복용하는 것이 효과적입니다.",
    },
    ChatRule {
        keywords: &["운동", "걸음", "활동"],
        response: "운동 기록을 보니 정말 꾸준히 하고 계시네요! 규칙적인 운동은 건강 관리의 핵심이에요. 오늘도 목표량 달성을 위해 화이팅하세요!",
    },
    ChatRule {
        keywords: &["건강", "상태", "컨디션"],
        response: "전반적인 건강 상태가 안정적으로 보이네요! 약물 복용도 잘 하시고, 운동도 꾸준히 하시니 정말 모범적이세요. 계속 이런 패턴을 유지하시면 좋겠어요.",
    },
    ChatRule {
        keywords: &["안녕", "인사"],
        response: "안녕하세요! 오늘도 건강 관리를 위해 도움이 필요하시면 언제든 말씀해 주세요. 어떤 것부터 확인해보실까요?",
    },
];

pub const FALLBACK_RESPONSE: &str = "네, 알겠습니다! 건강 관리와 관련해서 더 구체적으로 말씀해 주시면 정확한 정보를 제공해 드릴 수 있어요. 약물 복용, 운동, 건강 상태 중 어떤 부분이 궁금하신가요?";

pub const VOICE_INPUT_NOTICE: &str = "음성 인식 기능은 현재 개발 중입니다.";

/// Pick the canned reply for a user message.
pub fn generate_response(input: &str) -> &'static str {
    let input = input.to_lowercase();
    CHAT_RULES
        .iter()
        .find(|rule| rule.matches(&input))
        .map(|rule| rule.response)
        .unwrap_or(FALLBACK_RESPONSE)
}

/// Shown when the microphone button is pressed.
pub fn voice_input_notice() -> &'static str {
    VOICE_INPUT_NOTICE
}

fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

// ═══════════════════════════════════════════
// Transcript
// ═══════════════════════════════════════════

#[derive(Debug)]
struct Transcript {
    messages: Vec<ChatMessage>,
    is_typing: bool,
    ids: IdAllocator,
}

impl Transcript {
    fn push(&mut self, sender: MessageSender, message: String, timestamp: String) -> ChatMessage {
        let messages = &self.messages;
        let msg = ChatMessage {
            id: self.ids.next(|id| messages.iter().any(|m| m.id == id)),
            sender,
            message,
            timestamp,
        };
        self.messages.push(msg.clone());
        msg
    }
}

fn lock(transcript: &Mutex<Transcript>) -> MutexGuard<'_, Transcript> {
    transcript.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ═══════════════════════════════════════════
// Session
// ═══════════════════════════════════════════

/// A reply that will land in the transcript after the typing delay.
pub struct PendingReply {
    handle: JoinHandle<Option<ChatMessage>>,
}

impl PendingReply {
    /// Wait for delivery. `None` if the session was closed first.
    pub async fn wait(self) -> Option<ChatMessage> {
        self.handle.await.ok().flatten()
    }
}

/// One open chat view.
pub struct ChatSession {
    transcript: Arc<Mutex<Transcript>>,
    typing_delay: Duration,
    pending: Vec<AbortHandle>,
    closed: bool,
}

impl ChatSession {
    pub fn new(history: Vec<ChatMessage>, typing_delay: Duration) -> Self {
        let last = history.iter().map(|m| m.id).max().unwrap_or(0);
        Self {
            transcript: Arc::new(Mutex::new(Transcript {
                messages: history,
                is_typing: false,
                ids: IdAllocator::after(last),
            })),
            typing_delay,
            pending: Vec::new(),
            closed: false,
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        lock(&self.transcript).messages.clone()
    }

    pub fn is_typing(&self) -> bool {
        lock(&self.transcript).is_typing
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Append the user's message and schedule the assistant reply.
    ///
    /// Blank input and sends after `close()` are ignored. Must be called
    /// from within a tokio runtime.
    pub fn send_message(&mut self, input: &str, now: NaiveDateTime) -> Option<PendingReply> {
        if self.closed || input.trim().is_empty() {
            return None;
        }

        {
            let mut transcript = lock(&self.transcript);
            transcript.push(MessageSender::User, input.to_string(), format_timestamp(now));
            transcript.is_typing = true;
        }

        let response = generate_response(input);
        let transcript = Arc::clone(&self.transcript);
        let delay = self.typing_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut transcript = lock(&transcript);
            let reply = transcript.push(
                MessageSender::Ai,
                response.to_string(),
                format_timestamp(Local::now().naive_local()),
            );
            transcript.is_typing = false;
            Some(reply)
        });

        self.pending.retain(|h| !h.is_finished());
        self.pending.push(handle.abort_handle());
        tracing::debug!(pending = self.pending.len(), "Assistant reply scheduled");

        Some(PendingReply { handle })
    }

    /// Tear down the view: cancel pending replies and stop accepting input.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let mut cancelled = 0usize;
        for handle in self.pending.drain(..) {
            if !handle.is_finished() {
                handle.abort();
                cancelled += 1;
            }
        }
        lock(&self.transcript).is_typing = false;
        tracing::debug!(cancelled, "Chat session closed");
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.close();
    }
}
