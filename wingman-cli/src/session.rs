//! Per-action state for the coaching screens.
//!
//! Each user action owns an [`Action`]: a busy flag plus the last result.
//! Starting while busy is refused, a failure clears the busy flag and leaves
//! no result. Callers that drive their own event loop use the `begin_*` /
//! `finish_*` pairs; the async helpers do both around a single request.

use std::collections::BTreeSet;

use anyhow::Result;
use tracing::{debug, error};
use wingman_shared::{
    AdjustRequest, AdjustResponse, AnalysisResponse, AnalyzeRequest, BioRequest, BioResponse,
    Direction, OpenerRequest, OpenerResponse, Platform, ReplyRequest, ReplyResponse, Tone, Vibe,
};

use crate::client::BackendClient;

#[derive(Debug)]
pub struct Action<T> {
    busy: bool,
    result: Option<T>,
}

impl<T> Default for Action<T> {
    fn default() -> Self {
        Self {
            busy: false,
            result: None,
        }
    }
}

impl<T> Action<T> {
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Mark busy and hide the previous result. `false` if already in flight.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            debug!("Action already in flight, ignoring");
            return false;
        }
        self.busy = true;
        self.result = None;
        true
    }

    pub fn finish(&mut self, outcome: Result<T>) {
        self.busy = false;
        match outcome {
            Ok(value) => self.result = Some(value),
            Err(e) => error!("{:#}", e),
        }
    }
}

/// A request that has been started for one reply in the list.
#[derive(Debug, Clone)]
pub struct AdjustTicket {
    pub index: usize,
    generation: u64,
    pub request: AdjustRequest,
}

#[derive(Debug)]
pub struct ReplySession {
    pub message: String,
    pub tone: Tone,
    replies: Action<Vec<String>>,
    adjusting: BTreeSet<usize>,
    // Bumped on every new generation so stale adjust results are dropped.
    generation: u64,
}

impl Default for ReplySession {
    fn default() -> Self {
        Self {
            message: String::new(),
            tone: Tone::Smooth,
            replies: Action::default(),
            adjusting: BTreeSet::new(),
            generation: 0,
        }
    }
}

impl ReplySession {
    pub fn new(message: impl Into<String>, tone: Tone) -> Self {
        Self {
            message: message.into(),
            tone,
            ..Self::default()
        }
    }

    /// A session holding an existing list, e.g. to adjust a single reply.
    pub fn with_replies(replies: Vec<String>) -> Self {
        let mut session = Self::default();
        session.replies.result = Some(replies);
        session
    }

    pub fn replies(&self) -> &[String] {
        self.replies.result().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_adjusting(&self, index: usize) -> bool {
        self.adjusting.contains(&index)
    }

    pub fn can_generate(&self) -> bool {
        !self.message.trim().is_empty() && !self.replies.is_busy()
    }

    pub fn begin_generate(&mut self) -> Option<ReplyRequest> {
        if self.message.trim().is_empty() || !self.replies.begin() {
            return None;
        }
        self.generation += 1;
        self.adjusting.clear();
        Some(ReplyRequest::new(self.message.trim(), self.tone.clone()))
    }

    pub fn finish_generate(&mut self, outcome: Result<ReplyResponse>) {
        self.replies.finish(outcome.map(|response| response.replies));
    }

    /// Start adjusting one reply. Other replies stay interactive.
    pub fn begin_adjust(&mut self, index: usize, direction: Direction) -> Option<AdjustTicket> {
        if self.replies.is_busy() || self.adjusting.contains(&index) {
            return None;
        }
        let reply = self.replies().get(index)?.clone();
        self.adjusting.insert(index);
        Some(AdjustTicket {
            index,
            generation: self.generation,
            request: AdjustRequest::new(reply, direction),
        })
    }

    pub fn finish_adjust(&mut self, ticket: &AdjustTicket, outcome: Result<AdjustResponse>) {
        if ticket.generation != self.generation {
            debug!("Dropping adjust result for a replaced reply list");
            return;
        }
        self.adjusting.remove(&ticket.index);
        match outcome {
            Ok(response) => {
                if let Some(slot) = self
                    .replies
                    .result
                    .as_mut()
                    .and_then(|replies| replies.get_mut(ticket.index))
                {
                    *slot = response.reply;
                }
            }
            Err(e) => error!("{:#}", e),
        }
    }

    pub async fn generate(&mut self, client: &BackendClient) -> bool {
        let Some(request) = self.begin_generate() else {
            return false;
        };
        let outcome = client.generate_reply(&request).await;
        self.finish_generate(outcome);
        self.replies.result().is_some()
    }

    pub async fn adjust(
        &mut self,
        client: &BackendClient,
        index: usize,
        direction: Direction,
    ) -> bool {
        let Some(ticket) = self.begin_adjust(index, direction) else {
            return false;
        };
        let outcome = client.adjust_reply(&ticket.request).await;
        let ok = outcome.is_ok();
        self.finish_adjust(&ticket, outcome);
        ok
    }
}

#[derive(Debug, Default)]
pub struct AnalyzeSession {
    pub chat: String,
    pub analysis: Action<AnalysisResponse>,
}

impl AnalyzeSession {
    pub fn begin(&mut self) -> Option<AnalyzeRequest> {
        let chat = self.chat.trim();
        if chat.is_empty() || !self.analysis.begin() {
            return None;
        }
        Some(AnalyzeRequest::new(chat))
    }

    pub async fn run(&mut self, client: &BackendClient) -> Option<&AnalysisResponse> {
        let request = self.begin()?;
        let outcome = client.analyze_chat(&request).await;
        self.analysis.finish(outcome);
        self.analysis.result()
    }
}

#[derive(Debug, Default)]
pub struct OpenerSession {
    pub platform: Option<Platform>,
    pub openers: Action<OpenerResponse>,
}

impl OpenerSession {
    pub fn begin(&mut self) -> Option<OpenerRequest> {
        let platform = self.platform.clone()?;
        if !self.openers.begin() {
            return None;
        }
        Some(OpenerRequest::new(platform))
    }

    pub async fn run(&mut self, client: &BackendClient) -> Option<&OpenerResponse> {
        let request = self.begin()?;
        let outcome = client.generate_opener(&request).await;
        self.openers.finish(outcome);
        self.openers.result()
    }
}

#[derive(Debug, Default)]
pub struct BioSession {
    pub hobbies: String,
    pub vibe: Option<Vibe>,
    pub bios: Action<BioResponse>,
}

impl BioSession {
    pub fn begin(&mut self) -> Option<BioRequest> {
        let hobbies = self.hobbies.trim();
        if (hobbies.is_empty() && self.vibe.is_none()) || !self.bios.begin() {
            return None;
        }
        Some(BioRequest {
            hobbies: Some(hobbies.to_string()),
            vibe: self.vibe.map(|vibe| vibe.as_str().to_string()),
        })
    }

    pub async fn run(&mut self, client: &BackendClient) -> Option<&BioResponse> {
        let request = self.begin()?;
        let outcome = client.generate_bio(&request).await;
        self.bios.finish(outcome);
        self.bios.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_backend, unreachable_backend};
    use anyhow::anyhow;

    fn replies(items: &[&str]) -> ReplyResponse {
        ReplyResponse {
            replies: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn second_start_while_busy_is_refused() {
        let mut action: Action<u32> = Action::default();
        assert!(action.begin());
        assert!(action.is_busy());
        assert!(!action.begin());

        action.finish(Ok(7));
        assert!(!action.is_busy());
        assert_eq!(action.result(), Some(&7));
    }

    #[test]
    fn begin_hides_previous_result_and_failure_shows_none() {
        let mut action: Action<u32> = Action::default();
        action.begin();
        action.finish(Ok(1));

        assert!(action.begin());
        assert_eq!(action.result(), None);
        action.finish(Err(anyhow!("boom")));
        assert!(!action.is_busy());
        assert_eq!(action.result(), None);
    }

    #[test]
    fn blank_message_is_not_sent() {
        let mut session = ReplySession::new("   ", Tone::Smooth);
        assert!(!session.can_generate());
        assert!(session.begin_generate().is_none());
        assert!(!session.replies.is_busy());
    }

    #[test]
    fn message_is_trimmed() {
        let mut session = ReplySession::new("  hey there \n", Tone::Savage);
        let request = session.begin_generate().unwrap();
        assert_eq!(request.message.as_deref(), Some("hey there"));
        assert_eq!(request.tone, Some(Tone::Savage));
        assert!(session.begin_generate().is_none());
    }

    #[test]
    fn adjust_marks_only_its_own_index() {
        let mut session = ReplySession::new("hi", Tone::Calm);
        session.begin_generate().unwrap();
        session.finish_generate(Ok(replies(&["a", "b", "c"])));

        let ticket = session.begin_adjust(1, Direction::Bolder).unwrap();
        assert_eq!(ticket.request.reply.as_deref(), Some("b"));
        assert!(session.is_adjusting(1));
        assert!(!session.is_adjusting(0));
        assert!(session.begin_adjust(1, Direction::Safer).is_none());

        // Siblings stay interactive.
        let sibling = session.begin_adjust(2, Direction::Safer).unwrap();

        session.finish_adjust(&ticket, Ok(AdjustResponse { reply: "B!".to_string() }));
        assert_eq!(session.replies(), ["a", "B!", "c"]);
        assert!(!session.is_adjusting(1));
        assert!(session.is_adjusting(2));

        session.finish_adjust(&sibling, Err(anyhow!("upstream down")));
        assert_eq!(session.replies(), ["a", "B!", "c"]);
        assert!(!session.is_adjusting(2));
    }

    #[test]
    fn adjust_out_of_range_is_refused() {
        let mut session = ReplySession::with_replies(vec!["only".to_string()]);
        assert!(session.begin_adjust(3, Direction::Bolder).is_none());
        assert!(!session.is_adjusting(3));
    }

    #[test]
    fn stale_adjust_is_dropped_after_regenerate() {
        let mut session = ReplySession::new("hi", Tone::Playful);
        session.begin_generate().unwrap();
        session.finish_generate(Ok(replies(&["a", "b", "c"])));
        let ticket = session.begin_adjust(0, Direction::Bolder).unwrap();

        session.begin_generate().unwrap();
        assert!(session.replies().is_empty());
        assert!(session.begin_adjust(0, Direction::Bolder).is_none());
        session.finish_generate(Ok(replies(&["x", "y", "z"])));

        session.finish_adjust(&ticket, Ok(AdjustResponse { reply: "A!".to_string() }));
        assert_eq!(session.replies(), ["x", "y", "z"]);
    }

    #[test]
    fn opener_needs_a_platform() {
        let mut session = OpenerSession::default();
        assert!(session.begin().is_none());
        session.platform = Some(Platform::InPerson);
        let request = session.begin().unwrap();
        assert_eq!(request.platform, Some(Platform::InPerson));
    }

    #[test]
    fn bio_needs_hobbies_or_vibe() {
        let mut session = BioSession {
            hobbies: "  ".to_string(),
            ..BioSession::default()
        };
        assert!(session.begin().is_none());

        session.vibe = Some(Vibe::Adventurous);
        let request = session.begin().unwrap();
        assert_eq!(request.hobbies.as_deref(), Some(""));
        assert_eq!(request.vibe.as_deref(), Some("adventurous"));
    }

    #[test]
    fn analyze_needs_chat() {
        let mut session = AnalyzeSession::default();
        assert!(session.begin().is_none());
        session.chat = "them: lol\n".to_string();
        assert_eq!(session.begin().unwrap().chat.as_deref(), Some("them: lol"));
    }

    #[tokio::test]
    async fn generate_then_adjust_over_http() {
        let client = spawn_backend(|request| {
            Ok(if request.system.starts_with("Make this reply") {
                format!("{}!!", request.user)
            } else {
                "```json\n[\"one\", \"two\", \"three\"]\n```".to_string()
            })
        })
        .await;

        let mut session = ReplySession::new("what are you up to?", Tone::Smooth);
        assert!(session.generate(&client).await);
        assert_eq!(session.replies(), ["one", "two", "three"]);

        assert!(session.adjust(&client, 2, Direction::Bolder).await);
        assert_eq!(session.replies(), ["one", "two", "three!!"]);
        assert!(!session.is_adjusting(2));
    }

    #[tokio::test]
    async fn server_failure_clears_busy_and_shows_nothing() {
        let client = spawn_backend(|_| Err(anyhow!("model offline"))).await;

        let mut session = ReplySession::new("hi", Tone::Calm);
        assert!(!session.generate(&client).await);
        assert!(!session.replies.is_busy());
        assert!(session.replies().is_empty());

        let mut analyze = AnalyzeSession {
            chat: "me: hi".to_string(),
            ..AnalyzeSession::default()
        };
        assert!(analyze.run(&client).await.is_none());
        assert!(!analyze.analysis.is_busy());
    }

    #[tokio::test]
    async fn network_failure_clears_busy() {
        let client = unreachable_backend().await;
        let mut session = OpenerSession {
            platform: Some(Platform::Instagram),
            ..OpenerSession::default()
        };
        assert!(session.run(&client).await.is_none());
        assert!(!session.openers.is_busy());
    }
}
