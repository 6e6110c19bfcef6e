//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑，以及提交结果回写到状态的规则

use chrono::Local;
use tracing::{debug, info, warn};

use super::actions::{Action, Effect};
use super::state::App;
use crate::models::{ERROR_ANSWER, OverlapPolicy, SubmitOutcome, SubmitTicket};

/// PageUp/PageDown 每次滚动的行数
const SCROLL_STEP: u16 = 3;

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Quit => return Some(Effect::Quit),
            Action::FocusNext => self.focus = self.focus.next(),

            Action::Input(c) => self.question.push(c),
            Action::NewLine => self.question.push('\n'),
            Action::DeleteChar => {
                self.question.pop();
            }
            Action::Reset => self.set_question(String::new()),

            Action::ScrollUp => self.answer_scroll = self.answer_scroll.saturating_sub(SCROLL_STEP),
            Action::ScrollDown => self.answer_scroll = self.answer_scroll.saturating_add(SCROLL_STEP),

            Action::Submit => return Some(Effect::Submit(self.begin_submit())),
        }
        None
    }

    // ============ 提交相关 ============

    /// 记录一次新的提交，返回交给后台任务的 ticket
    pub fn begin_submit(&mut self) -> SubmitTicket {
        self.last_seq += 1;
        self.outstanding += 1;
        let ticket = SubmitTicket::new(self.last_seq, self.question.clone());
        info!(
            seq = ticket.seq,
            request_id = %ticket.request_id,
            outstanding = self.outstanding,
            "question submitted"
        );
        ticket
    }

    /// 把后台任务的结果写回回答，返回是否被采用
    pub fn apply_outcome(&mut self, outcome: SubmitOutcome) -> bool {
        self.outstanding = self.outstanding.saturating_sub(1);

        if self.overlap == OverlapPolicy::LatestWins && outcome.seq != self.last_seq {
            debug!(
                seq = outcome.seq,
                latest = self.last_seq,
                request_id = %outcome.request_id,
                "discarding superseded response"
            );
            return false;
        }

        self.answer = match outcome.result {
            Ok(text) => text,
            Err(e) => {
                warn!(seq = outcome.seq, request_id = %outcome.request_id, error = %e, "Error fetching data");
                ERROR_ANSWER.to_string()
            }
        };
        self.answered_at = Some(Local::now());
        self.answer_scroll = 0;
        true
    }
}
