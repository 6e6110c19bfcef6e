//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    FocusNext,

    // 问题输入框
    Input(char), // 输入字符
    NewLine,     // Enter（多行输入）
    DeleteChar,  // Backspace
    Reset,       // 清空问题

    // 回答区
    ScrollUp,   // PageUp
    ScrollDown, // PageDown

    Submit,
}

/// dispatch 之后需要事件循环执行的副作用
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Quit,
    Submit(crate::models::SubmitTicket),
}
