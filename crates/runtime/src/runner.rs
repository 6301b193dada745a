//! Session task: one [`GameSession`] driven by wall-clock time.
//!
//! The task owns the session outright. Hosts talk to it through a
//! [`SessionHandle`]: commands go in over a bounded channel, events come back
//! over an unbounded one. Before any command is handled, the session is caught
//! up to the current time, so an expiry that is already due wins over an action
//! that arrives late.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::RuntimeConfig;
use crate::core::{Dispatch, GameSession, SessionObserver, SessionSnapshot};
use crate::types::{CompletionReport, GameAction};

/// Command delivered to the session task
#[derive(Debug)]
pub enum SessionCommand {
    Start,
    Dispatch(GameAction),
    Reset,
    Abort,
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Shutdown,
}

/// Event emitted by the session task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    /// `start` was refused; the session stays NotStarted
    StartFailed(String),
    /// A timer moved the game on (reveal, flip-back, pattern advance, snake step)
    Advanced,
    /// Result of a dispatched action, in command order
    Dispatched { action: GameAction, result: Dispatch },
    /// Exactly once per completed session
    Completed(CompletionReport),
    Aborted,
    Reset,
}

/// Observer forwarding session callbacks to the host
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self { tx }
    }
}

impl SessionObserver for ChannelObserver {
    fn on_complete(&mut self, report: &CompletionReport) {
        let _ = self.tx.send(SessionEvent::Completed(report.clone()));
    }

    fn on_abort(&mut self) {
        let _ = self.tx.send(SessionEvent::Aborted);
    }
}

/// Host side of a running session task
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<SessionCommand>,
    event_rx: mpsc::UnboundedReceiver<SessionEvent>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub async fn send(&self, command: SessionCommand) -> Result<()> {
        self.cmd_tx
            .send(command)
            .await
            .map_err(|_| anyhow!("session task has stopped"))
    }

    pub async fn start(&self) -> Result<()> {
        self.send(SessionCommand::Start).await
    }

    pub async fn dispatch(&self, action: GameAction) -> Result<()> {
        self.send(SessionCommand::Dispatch(action)).await
    }

    pub async fn reset(&self) -> Result<()> {
        self.send(SessionCommand::Reset).await
    }

    pub async fn abort(&self) -> Result<()> {
        self.send(SessionCommand::Abort).await
    }

    /// Current view of the session, caught up to now
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(SessionCommand::Snapshot(tx)).await?;
        rx.await.context("session task dropped the snapshot request")
    }

    /// Wait for the next event; `None` once the task has stopped
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.event_rx.recv().await
    }

    /// Next event if one is already queued
    pub fn try_event(&mut self) -> Option<SessionEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Stop the task and wait for it to finish
    pub async fn shutdown(self) -> Result<()> {
        // The task may already be gone; joining is what matters.
        let _ = self.cmd_tx.send(SessionCommand::Shutdown).await;
        self.task.await.context("session task panicked")
    }
}

/// Spawn a task driving `session`. Must be called inside a tokio runtime.
pub fn spawn_session<O: SessionObserver>(session: GameSession<O>, config: &RuntimeConfig) -> SessionHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(config.max_pending.max(1));
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let session = session.with_observer(ChannelObserver::new(event_tx.clone()));
    let driver = Driver {
        session,
        events: event_tx,
        last: Instant::now(),
        max_catch_up_ms: config.max_catch_up_ms.max(1),
    };
    let frame = Duration::from_millis(config.frame_ms.max(1));
    let task = tokio::spawn(driver.run(cmd_rx, frame));

    SessionHandle {
        cmd_tx,
        event_rx,
        task,
    }
}

struct Driver {
    session: GameSession<ChannelObserver>,
    events: mpsc::UnboundedSender<SessionEvent>,
    /// Wall-clock instant already fed into the session
    last: Instant,
    max_catch_up_ms: u64,
}

impl Driver {
    async fn run(mut self, mut cmd_rx: mpsc::Receiver<SessionCommand>, frame: Duration) {
        let mut ticker = tokio::time::interval(frame);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::debug!(game_id = %self.session.config().id, "session task started");

        loop {
            tokio::select! {
                biased;

                _ = ticker.tick() => self.catch_up(),

                cmd = cmd_rx.recv() => {
                    self.catch_up();
                    match cmd {
                        None | Some(SessionCommand::Shutdown) => break,
                        Some(cmd) => self.handle(cmd),
                    }
                }
            }
        }

        tracing::debug!(game_id = %self.session.config().id, "session task stopped");
    }

    /// Feed elapsed wall-clock time into the session, at most
    /// `max_catch_up_ms` per wake-up.
    fn catch_up(&mut self) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last).as_millis() as u64;
        if elapsed == 0 {
            return;
        }
        let transitions = self.session.transitions();
        if elapsed > self.max_catch_up_ms {
            tracing::debug!(elapsed, fed = self.max_catch_up_ms, "clamping missed time");
            self.session.advance(self.max_catch_up_ms);
            self.last = now;
        } else {
            self.session.advance(elapsed);
            // Keep the sub-millisecond remainder for the next wake-up
            self.last += Duration::from_millis(elapsed);
        }
        // Completion is reported by the observer instead
        if self.session.transitions() != transitions && self.session.is_running() {
            self.emit(SessionEvent::Advanced);
        }
    }

    fn handle(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::Start => match self.session.start() {
                Ok(true) => self.emit(SessionEvent::Started),
                Ok(false) => {}
                Err(err) => {
                    tracing::error!(error = %err, "session failed to start");
                    self.emit(SessionEvent::StartFailed(err.to_string()));
                }
            },
            SessionCommand::Dispatch(action) => {
                let result = self.session.dispatch(action);
                self.emit(SessionEvent::Dispatched { action, result });
            }
            SessionCommand::Reset => {
                self.session.reset();
                self.emit(SessionEvent::Reset);
            }
            SessionCommand::Abort => {
                self.session.abort();
            }
            SessionCommand::Snapshot(reply) => {
                let _ = reply.send(self.session.snapshot());
            }
            SessionCommand::Shutdown => {}
        }
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}
