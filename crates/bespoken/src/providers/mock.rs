use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use crate::errors::{ModelError, ModelResult};
use crate::providers::base::Backend;

/// A prompt as the backend received it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub prompt: String,
    pub system: Option<String>,
}

/// A mock backend that returns pre-configured replies and records what it was sent
#[derive(Clone)]
pub struct MockBackend {
    replies: Arc<Mutex<Vec<ModelResult<String>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    available: bool,
}

impl MockBackend {
    /// Create a new mock backend with a sequence of replies
    pub fn new(replies: Vec<ModelResult<String>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies)),
            requests: Arc::new(Mutex::new(Vec::new())),
            available: true,
        }
    }

    pub fn with_texts(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn version(&self) -> ModelResult<String> {
        if self.available {
            Ok("mock 1.0.0".to_string())
        } else {
            Err(ModelError::Io("No such file or directory (os error 2)".to_string()))
        }
    }

    async fn complete(&self, prompt: &str, system: Option<&str>) -> ModelResult<String> {
        self.requests.lock().unwrap().push(RecordedRequest {
            prompt: prompt.to_string(),
            system: system.map(String::from),
        });
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            // Return empty reply if no more pre-configured replies
            Ok(String::new())
        } else {
            replies.remove(0)
        }
    }
}
