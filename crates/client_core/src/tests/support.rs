//! Test doubles for the renderer, HTTP and storage ports.

use std::{
    collections::{BTreeSet, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use storage::KeyValueStore;

use crate::{
    error::FetchError,
    surface::{Control, Renderer, TriggerState, UsersView},
    transport::{HttpClient, HttpResponse},
};

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    DarkMode(bool),
    Count(i64),
    Trigger(TriggerState),
    Users(UsersView),
    Invalid(String),
    FormReset,
}

#[derive(Default)]
pub struct RecordingRenderer {
    missing: BTreeSet<Control>,
    calls: Mutex<Vec<RenderCall>>,
}

impl RecordingRenderer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn without(controls: &[Control]) -> Arc<Self> {
        Arc::new(Self {
            missing: controls.iter().copied().collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn record(&self, call: RenderCall) {
        self.calls.lock().expect("calls lock").push(call);
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn last_count(&self) -> Option<i64> {
        self.calls().into_iter().rev().find_map(|call| match call {
            RenderCall::Count(value) => Some(value),
            _ => None,
        })
    }

    pub fn last_dark_mode(&self) -> Option<bool> {
        self.calls().into_iter().rev().find_map(|call| match call {
            RenderCall::DarkMode(enabled) => Some(enabled),
            _ => None,
        })
    }

    pub fn last_trigger(&self) -> Option<TriggerState> {
        self.calls().into_iter().rev().find_map(|call| match call {
            RenderCall::Trigger(trigger) => Some(trigger),
            _ => None,
        })
    }

    pub fn last_users(&self) -> Option<UsersView> {
        self.calls().into_iter().rev().find_map(|call| match call {
            RenderCall::Users(view) => Some(view),
            _ => None,
        })
    }

    pub fn triggers(&self) -> Vec<TriggerState> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RenderCall::Trigger(trigger) => Some(trigger),
                _ => None,
            })
            .collect()
    }

    pub fn form_resets(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, RenderCall::FormReset))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn has_control(&self, control: Control) -> bool {
        !self.missing.contains(&control)
    }

    fn apply_dark_mode(&self, enabled: bool) {
        self.record(RenderCall::DarkMode(enabled));
    }

    fn show_count(&self, value: i64) {
        self.record(RenderCall::Count(value));
    }

    fn set_trigger(&self, trigger: &TriggerState) {
        self.record(RenderCall::Trigger(trigger.clone()));
    }

    fn replace_users(&self, view: UsersView) {
        self.record(RenderCall::Users(view));
    }

    fn show_invalid_submission(&self, message: &str) {
        self.record(RenderCall::Invalid(message.to_string()));
    }

    fn reset_form(&self) {
        self.record(RenderCall::FormReset);
    }
}

pub fn as_renderer(renderer: &Arc<RecordingRenderer>) -> Arc<dyn Renderer> {
    renderer.clone()
}

type ScriptedReply = (Duration, Result<HttpResponse, FetchError>);

/// Replies to successive GETs from a script, each after its own delay.
#[derive(Default)]
pub struct ScriptedHttpClient {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, delay: Duration, reply: Result<HttpResponse, FetchError>) -> Self {
        self.replies
            .lock()
            .expect("replies lock")
            .push_back((delay, reply));
        self
    }

    pub fn json(self, delay: Duration, body: &str) -> Self {
        self.reply(
            delay,
            Ok(HttpResponse {
                status: 200,
                body: body.as_bytes().to_vec(),
            }),
        )
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().expect("requested lock").clone()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.requested
            .lock()
            .expect("requested lock")
            .push(url.to_string());
        let next = self.replies.lock().expect("replies lock").pop_front();
        let Some((delay, reply)) = next else {
            return Err(FetchError::Network("no scripted reply".to_string()));
        };
        tokio::time::sleep(delay).await;
        reply
    }
}

pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(anyhow!("storage unavailable"))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("storage unavailable"))
    }
}
