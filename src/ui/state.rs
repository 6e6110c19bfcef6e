//! App 状态定义 (Model)
//!
//! 视图拥有的全部状态：问题、回答，以及提交相关的簿记

use chrono::{DateTime, Local};

use crate::models::OverlapPolicy;

/// 应用状态
#[derive(Debug)]
pub struct App {
    pub question: String,
    pub answer: String,
    pub focus: Focus,
    pub overlap: OverlapPolicy,
    pub last_seq: u64,      // 最近一次发出的提交序号
    pub outstanding: usize, // 尚未返回的请求数
    pub answered_at: Option<DateTime<Local>>,
    pub answer_scroll: u16, // 回答区首行偏移，渲染时按实际高度收紧
}

/// 当前接收按键的控件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Question,
    SubmitButton,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Question => Focus::SubmitButton,
            Focus::SubmitButton => Focus::Question,
        }
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(overlap: OverlapPolicy) -> Self {
        Self {
            question: String::new(),
            answer: String::new(),
            focus: Focus::default(),
            overlap,
            last_seq: 0,
            outstanding: 0,
            answered_at: None,
            answer_scroll: 0,
        }
    }

    /// 用输入框的最新内容整体替换问题
    pub fn set_question(&mut self, text: impl Into<String>) {
        self.question = text.into();
    }

    pub fn is_waiting(&self) -> bool {
        self.outstanding > 0
    }
}
