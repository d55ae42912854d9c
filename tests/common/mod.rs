//! Shared test helpers: a scripted inference client.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quill::error::{QuillError, Result};
use quill::inference::{InferenceClient, InferenceRequest, InferenceResponse};

/// One scripted reply from the mock endpoint.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Timeout,
    ServerError(u16),
    Malformed,
}

/// Test client that captures requests and replays scripted replies in order.
/// When the script runs out, it keeps returning the last reply.
pub struct MockInferenceClient {
    replies: Mutex<Vec<Reply>>,
    requests: Mutex<Vec<InferenceRequest>>,
    calls: AtomicUsize,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn script(replies: impl IntoIterator<Item = Reply>) -> Self {
        let client = Self::new();
        client.replies.lock().unwrap().extend(replies);
        client
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<InferenceRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn next_reply(&self) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.remove(0)
        } else {
            replies
                .first()
                .cloned()
                .unwrap_or(Reply::Text(String::new()))
        }
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    fn model_id(&self) -> &str {
        "mock-model"
    }

    async fn invoke(&self, request: &InferenceRequest) -> Result<InferenceResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        match self.next_reply() {
            Reply::Text(text) => Ok(InferenceResponse { text }),
            Reply::Timeout => Err(QuillError::Timeout(300_000)),
            Reply::ServerError(status) => Err(QuillError::api(status, "scripted failure")),
            Reply::Malformed => Err(QuillError::MalformedResponse(
                "missing generation field".into(),
            )),
        }
    }
}
