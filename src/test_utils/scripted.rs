//! In-memory [`RankingService`] whose calls are answered by the test.
//!
//! Every call is recorded. Calls stay pending until the test resolves them,
//! in whatever order it likes, which is how response races are reproduced
//! deterministically. Health probes may instead be pre-scripted so a poller
//! can run unattended.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::{Notify, oneshot};

use crate::api::{HealthReport, RankingService, SearchRequest, SearchResult};
use crate::error::{IrError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Health,
    Categories,
    Subcategories(String),
    Search(SearchRequest),
}

/// Pre-scripted answer for the next health probe.
#[derive(Debug)]
pub enum HealthStep {
    Respond(Result<HealthReport>),
    /// Never answer; the caller's timeout decides.
    Hang,
}

enum Reply {
    Health(Result<HealthReport>),
    List(Result<Vec<String>>),
    Results(Result<Vec<SearchResult>>),
}

struct Pending {
    call: Call,
    tx: oneshot::Sender<Reply>,
}

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    pending: Vec<Pending>,
    health_script: VecDeque<HealthStep>,
}

#[derive(Default)]
pub struct ScriptedService {
    inner: Mutex<Inner>,
    changed: Notify,
}

impl ScriptedService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().calls.clone()
    }

    #[must_use]
    pub fn search_requests(&self) -> Vec<SearchRequest> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Search(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// Wait until at least `count` calls are pending.
    pub async fn wait_for_pending(&self, count: usize) {
        loop {
            let notified = self.changed.notified();
            if self.pending_count() >= count {
                return;
            }
            notified.await;
        }
    }

    /// Wait until at least `count` calls have been made.
    pub async fn wait_for_calls(&self, count: usize) {
        loop {
            let notified = self.changed.notified();
            if self.inner.lock().calls.len() >= count {
                return;
            }
            notified.await;
        }
    }

    pub fn script_health(&self, step: HealthStep) {
        self.inner.lock().health_script.push_back(step);
    }

    pub fn script_health_ok(&self, document_count: u64) {
        self.script_health(HealthStep::Respond(Ok(HealthReport {
            status: "ok".to_string(),
            document_count: Some(document_count),
        })));
    }

    pub fn resolve_health(&self, result: Result<HealthReport>) -> bool {
        self.resolve(|call| matches!(call, Call::Health), Reply::Health(result))
    }

    pub fn resolve_categories(&self, result: Result<Vec<String>>) -> bool {
        self.resolve(|call| matches!(call, Call::Categories), Reply::List(result))
    }

    pub fn resolve_subcategories(&self, category: &str, result: Result<Vec<String>>) -> bool {
        self.resolve(
            |call| matches!(call, Call::Subcategories(c) if c == category),
            Reply::List(result),
        )
    }

    pub fn resolve_search(&self, query: &str, result: Result<Vec<SearchResult>>) -> bool {
        self.resolve(
            |call| matches!(call, Call::Search(request) if request.query == query),
            Reply::Results(result),
        )
    }

    fn register(&self, call: Call) -> oneshot::Receiver<Reply> {
        let (tx, rx) = oneshot::channel();
        {
            let mut inner = self.inner.lock();
            inner.calls.push(call.clone());
            inner.pending.push(Pending { call, tx });
        }
        self.changed.notify_waiters();
        rx
    }

    fn resolve(&self, matches: impl Fn(&Call) -> bool, reply: Reply) -> bool {
        let pending = {
            let mut inner = self.inner.lock();
            let index = inner.pending.iter().position(|p| matches(&p.call));
            index.map(|i| inner.pending.remove(i))
        };
        let resolved = pending.is_some_and(|p| p.tx.send(reply).is_ok());
        self.changed.notify_waiters();
        resolved
    }
}

fn dropped() -> IrError {
    IrError::Unreachable("scripted call dropped".to_string())
}

impl RankingService for ScriptedService {
    async fn health(&self) -> Result<HealthReport> {
        let step = {
            let mut inner = self.inner.lock();
            let step = inner.health_script.pop_front();
            if step.is_some() {
                inner.calls.push(Call::Health);
            }
            step
        };
        match step {
            Some(HealthStep::Respond(result)) => {
                self.changed.notify_waiters();
                result
            }
            Some(HealthStep::Hang) => {
                self.changed.notify_waiters();
                std::future::pending::<Result<HealthReport>>().await
            }
            None => match self.register(Call::Health).await {
                Ok(Reply::Health(result)) => result,
                _ => Err(dropped()),
            },
        }
    }

    async fn categories(&self) -> Result<Vec<String>> {
        match self.register(Call::Categories).await {
            Ok(Reply::List(result)) => result,
            _ => Err(dropped()),
        }
    }

    async fn subcategories(&self, category: &str) -> Result<Vec<String>> {
        match self.register(Call::Subcategories(category.to_string())).await {
            Ok(Reply::List(result)) => result,
            _ => Err(dropped()),
        }
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        match self.register(Call::Search(request.clone())).await {
            Ok(Reply::Results(result)) => result,
            _ => Err(dropped()),
        }
    }
}
