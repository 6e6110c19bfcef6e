use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::ServiceError;

/// 请求失败时统一展示的回答
pub const ERROR_ANSWER: &str = "Error fetching data";

pub const TITLE: &str = "Ask your golf assistant any question";

pub const PLACEHOLDER: &str = "Type your question here...";

/// 固定的示例问题
pub const EXAMPLE_QUESTIONS: [&str; 3] = [
    "I am wondering if I should alter the width of my stance for my drives, can you provide some input?",
    "When I hit iron shots, my ball starts to the left and then curvers further to the left, I am a lefty, what should I do to fix this?",
    "What are some basic rules in green reading, and approaching long puts, please provide to bullet points on this.",
];

/// 请求体 `{"text": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct ProcessRequest<'a> {
    pub text: &'a str,
}

/// 响应体，只关心 `processed_text`
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessResponse {
    #[serde(default)]
    pub processed_text: Option<String>,
}

/// 一次提交：由视图生成，交给后台任务执行
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    pub seq: u64,
    pub request_id: Uuid,
    pub text: String,
}

impl SubmitTicket {
    pub fn new(seq: u64, text: String) -> Self {
        Self {
            seq,
            request_id: Uuid::new_v4(),
            text,
        }
    }
}

/// 后台任务完成后回送给事件循环的结果
#[derive(Debug)]
pub struct SubmitOutcome {
    pub seq: u64,
    pub request_id: Uuid,
    pub result: Result<String, ServiceError>,
}

impl SubmitOutcome {
    pub fn for_ticket(ticket: &SubmitTicket, result: Result<String, ServiceError>) -> Self {
        Self {
            seq: ticket.seq,
            request_id: ticket.request_id,
            result,
        }
    }
}

/// 多个请求同时在途时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// 只接受最新一次提交的结果
    #[default]
    LatestWins,
    /// 谁最后返回谁生效
    LastResponseWins,
}
