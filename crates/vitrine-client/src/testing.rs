//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use vitrine_core::Failure;

use crate::transport::{Transport, TransportRequest, TransportResponse};

struct Script {
    gate: Option<oneshot::Receiver<()>>,
    outcome: Result<TransportResponse, Failure>,
}

/// Answers requests in order from a queue of scripted outcomes and records
/// every request it receives.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    scripts: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, response: TransportResponse) {
        self.push(None, Ok(response));
    }

    pub(crate) fn fail(&self, failure: Failure) {
        self.push(None, Err(failure));
    }

    /// Queues a response that is held back until the returned sender fires.
    pub(crate) fn respond_gated(&self, response: TransportResponse) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Some(rx), Ok(response));
        tx
    }

    pub(crate) fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().expect("requests mutex poisoned").clone()
    }

    fn push(&self, gate: Option<oneshot::Receiver<()>>, outcome: Result<TransportResponse, Failure>) {
        self.scripts
            .lock()
            .expect("scripts mutex poisoned")
            .push_back(Script { gate, outcome });
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, Failure> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(request);

        let script = self.scripts.lock().expect("scripts mutex poisoned").pop_front();
        let Some(script) = script else {
            return Err(Failure::with_message("no scripted response"));
        };

        if let Some(gate) = script.gate {
            let _ = gate.await;
        }
        script.outcome
    }
}
