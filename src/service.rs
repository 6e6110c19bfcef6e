//! 文本处理服务客户端
//!
//! `TextProcessor` 是视图与远端服务之间的接缝，`HttpTextProcessor` 是基于
//! reqwest 的实现。`spawn_submit` 把一次提交放到 tokio 任务里执行，完成后
//! 通过 channel 把结果送回事件循环。

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::models::{ProcessRequest, ProcessResponse, SubmitOutcome, SubmitTicket};

/// 服务调用失败的原因，仅用于日志诊断
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response has no `processed_text` field")]
    MissingField,
}

#[async_trait]
pub trait TextProcessor: Send + Sync {
    async fn process(&self, text: &str) -> Result<String, ServiceError>;
}

pub struct HttpTextProcessor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTextProcessor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TextProcessor for HttpTextProcessor {
    #[instrument(skip(self, text), fields(endpoint = %self.endpoint, len = text.len()))]
    async fn process(&self, text: &str) -> Result<String, ServiceError> {
        // `.json()` 同时设置 Content-Type: application/json
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ProcessRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status));
        }

        let body = response.bytes().await?;
        let parsed: ProcessResponse = serde_json::from_slice(&body)?;
        debug!(bytes = body.len(), "response decoded");

        parsed.processed_text.ok_or(ServiceError::MissingField)
    }
}

/// 在后台执行一次提交，结果送回 `tx`
pub fn spawn_submit(
    processor: Arc<dyn TextProcessor>,
    ticket: SubmitTicket,
    tx: mpsc::UnboundedSender<SubmitOutcome>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        debug!(seq = ticket.seq, request_id = %ticket.request_id, "submit started");
        let result = processor.process(&ticket.text).await;
        // 接收端关闭说明视图已退出，结果直接丢弃
        let _ = tx.send(SubmitOutcome::for_ticket(&ticket, result));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    /// 测试中绕过环境变量里的代理设置
    fn processor_for(url: &str) -> HttpTextProcessor {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpTextProcessor::with_client(client, format!("{url}/process/"))
    }

    struct Stub {
        _server: mockito::ServerGuard,
        _mock: mockito::Mock,
        processor: HttpTextProcessor,
    }

    async fn stub(status: usize, body: &str) -> Stub {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/process/")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;
        let processor = processor_for(&server.url());
        Stub {
            _server: server,
            _mock: mock,
            processor,
        }
    }

    #[tokio::test]
    async fn test_success_returns_processed_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/process/")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "text": "Q" })))
            .with_status(200)
            .with_body(r#"{"processed_text": "A"}"#)
            .create_async()
            .await;

        let processor = processor_for(&server.url());
        let answer = processor.process("Q").await.unwrap();

        assert_eq!(answer, "A");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_question_is_still_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/process/")
            .match_body(Matcher::Json(json!({ "text": "" })))
            .with_status(200)
            .with_body(r#"{"processed_text": ""}"#)
            .expect(1)
            .create_async()
            .await;

        let processor = processor_for(&server.url());
        assert_eq!(processor.process("").await.unwrap(), "");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let Stub { _server, _mock, processor } = stub(500, r#"{"detail": "boom"}"#).await;
        let err = processor.process("Q").await.unwrap_err();
        assert!(matches!(err, ServiceError::Status(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_unparsable_body() {
        let Stub { _server, _mock, processor } = stub(200, "<html>nope</html>").await;
        let err = processor.process("Q").await.unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_missing_field() {
        let Stub { _server, _mock, processor } = stub(200, r#"{"answer": "A"}"#).await;
        let err = processor.process("Q").await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingField));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // 绑定后立即释放，得到一个没有监听者的端口
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let processor = processor_for(&format!("http://127.0.0.1:{port}"));
        let err = processor.process("Q").await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
    }

    #[tokio::test]
    async fn test_spawn_submit_reports_outcome() {
        let Stub { _server, _mock, processor } = stub(200, r#"{"processed_text": "A"}"#).await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticket = SubmitTicket::new(7, "Q".into());

        spawn_submit(Arc::new(processor), ticket.clone(), tx)
            .await
            .unwrap();

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.seq, 7);
        assert_eq!(outcome.request_id, ticket.request_id);
        assert_eq!(outcome.result.unwrap(), "A");
    }

    #[tokio::test]
    async fn test_view_answer_through_stubbed_service() {
        use crate::models::{ERROR_ANSWER, OverlapPolicy};
        use crate::ui::{App, Effect, actions::Action};

        let Stub { _server, _mock, processor } = stub(200, r#"{"processed_text": "A"}"#).await;
        let ok: Arc<dyn TextProcessor> = Arc::new(processor);

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let down: Arc<dyn TextProcessor> =
            Arc::new(processor_for(&format!("http://127.0.0.1:{port}")));

        for (processor, expected) in [(ok, "A"), (down, ERROR_ANSWER)] {
            let mut app = App::new(OverlapPolicy::LatestWins);
            app.set_question("Q");
            let Some(Effect::Submit(ticket)) = app.dispatch(Action::Submit) else {
                panic!("submit should produce a ticket");
            };

            let (tx, mut rx) = mpsc::unbounded_channel();
            spawn_submit(processor, ticket, tx).await.unwrap();
            assert!(app.apply_outcome(rx.recv().await.unwrap()));
            assert_eq!(app.answer, expected);
        }
    }
}
