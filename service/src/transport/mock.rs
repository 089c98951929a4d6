use std::{cell::RefCell, collections::VecDeque};

use async_trait::async_trait;
use futures::channel::oneshot;
use leptos::SignalGetUntracked;

use super::*;
use crate::LoadingState;

struct Scripted {
    gate: Option<oneshot::Receiver<()>>,
    outcome: Result<TransportResponse, TransportError>,
}

/// Replays scripted outcomes in order and records what it was sent.
#[derive(Default)]
pub(crate) struct MockTransport {
    script: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<GatewayRequest>>,
    observe: RefCell<Option<LoadingState>>,
    observed: RefCell<Vec<bool>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: &str) -> &Self {
        self.push(None, Ok(response(status, Some(body))))
    }

    pub(crate) fn respond_unreadable(&self, status: u16) -> &Self {
        self.push(None, Ok(response(status, None)))
    }

    pub(crate) fn fail(&self, error: TransportError) -> &Self {
        self.push(None, Err(error))
    }

    /// The response is held back until the returned sender fires or is dropped.
    pub(crate) fn respond_when_released(&self, status: u16, body: &str) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.push(Some(gate), Ok(response(status, Some(body))));
        release
    }

    /// Samples the loading signal each time a request reaches the transport.
    pub(crate) fn observe(&self, loading: LoadingState) {
        *self.observe.borrow_mut() = Some(loading);
    }

    pub(crate) fn observed(&self) -> Vec<bool> {
        self.observed.borrow().clone()
    }

    pub(crate) fn requests(&self) -> Vec<GatewayRequest> {
        self.requests.borrow().clone()
    }

    fn push(
        &self,
        gate: Option<oneshot::Receiver<()>>,
        outcome: Result<TransportResponse, TransportError>,
    ) -> &Self {
        self.script
            .borrow_mut()
            .push_back(Scripted { gate, outcome });
        self
    }
}

fn response(status: u16, body: Option<&str>) -> TransportResponse {
    TransportResponse {
        status,
        status_text: ::http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string(),
        body: body.map(str::to_string),
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: GatewayRequest) -> Result<TransportResponse, TransportError> {
        if let Some(loading) = *self.observe.borrow() {
            self.observed
                .borrow_mut()
                .push(loading.loading().get_untracked());
        }
        self.requests.borrow_mut().push(request);

        let scripted = self.script.borrow_mut().pop_front();
        match scripted {
            Some(Scripted { gate, outcome }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                outcome
            }
            None => Err(TransportError::Network("no scripted response".to_string())),
        }
    }
}
