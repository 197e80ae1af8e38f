//! Async host for a session.
//!
//! The session itself is synchronous and not shared. [`spawn`] moves it into a tokio task
//! that owns it exclusively; every caller talks to that task through a cloneable
//! [`SessionHandle`]. Commands are processed one at a time in arrival order, so input
//! commands and gravity ticks coming from different tasks never interleave inside a
//! single operation.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use tetromino_core::{GameSnapshot, KickStrategy, LockEvent, Session};

pub use tetromino_types as types;

use crate::types::{GameAction, SessionState};

/// Default capacity of the command channel
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Message delivered to the session task
#[derive(Debug)]
pub enum HostCommand {
    Apply {
        action: GameAction,
        reply: oneshot::Sender<bool>,
    },
    Snapshot {
        reply: oneshot::Sender<GameSnapshot>,
    },
    TakeEvent {
        reply: oneshot::Sender<Option<LockEvent>>,
    },
    Shutdown,
}

/// Cloneable handle to a hosted session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<HostCommand>,
}

/// Move `session` into its own task.
///
/// The join handle yields the session back once every handle is dropped or
/// [`SessionHandle::shutdown`] is called.
pub fn spawn<K>(session: Session<K>, capacity: usize) -> (SessionHandle, JoinHandle<Session<K>>)
where
    K: KickStrategy + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let task = tokio::spawn(run_session(session, rx));
    (SessionHandle { tx }, task)
}

async fn run_session<K: KickStrategy>(
    mut session: Session<K>,
    mut rx: mpsc::Receiver<HostCommand>,
) -> Session<K> {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            HostCommand::Apply { action, reply } => {
                let applied = session.apply_action(action);
                debug!(action = action.as_str(), applied, "host command");
                let _ = reply.send(applied);
            }
            HostCommand::Snapshot { reply } => {
                let _ = reply.send(session.snapshot());
            }
            HostCommand::TakeEvent { reply } => {
                let _ = reply.send(session.take_last_event());
            }
            HostCommand::Shutdown => break,
        }
    }
    info!(episode = session.episode(), score = session.score(), "session task stopped");
    session
}

impl SessionHandle {
    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> HostCommand) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| anyhow!("session task is not running"))?;
        rx.await.context("session task dropped the reply")
    }

    /// Apply one action; `Ok(false)` means the session rejected it
    pub async fn apply(&self, action: GameAction) -> Result<bool> {
        self.request(|reply| HostCommand::Apply { action, reply }).await
    }

    /// Parse and apply an action name such as `moveLeft` or `hardDrop`
    pub async fn apply_named(&self, name: &str) -> Result<bool> {
        let Some(action) = GameAction::from_str(name) else {
            warn!(name, "unknown action");
            return Err(anyhow!("unknown action: {name}"));
        };
        self.apply(action).await
    }

    pub async fn gravity_tick(&self) -> Result<bool> {
        self.apply(GameAction::GravityTick).await
    }

    pub async fn reset(&self) -> Result<bool> {
        self.apply(GameAction::Reset).await
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot> {
        self.request(|reply| HostCommand::Snapshot { reply }).await
    }

    /// Take the last lock event, if any
    pub async fn take_last_event(&self) -> Result<Option<LockEvent>> {
        self.request(|reply| HostCommand::TakeEvent { reply }).await
    }

    /// Stop the session task. Commands queued before this one are still processed.
    pub async fn shutdown(&self) -> Result<()> {
        self.tx
            .send(HostCommand::Shutdown)
            .await
            .map_err(|_| anyhow!("session task is not running"))
    }
}

/// Issue a gravity tick every `drop_interval_ms` until the game ends.
///
/// The interval is re-read after every tick so level changes take effect immediately.
/// Returns the number of ticks issued.
pub async fn drive_gravity(handle: &SessionHandle) -> Result<u64> {
    let mut ticks = 0u64;
    loop {
        let snapshot = handle.snapshot().await?;
        match snapshot.state {
            SessionState::GameOver => break,
            SessionState::Spawning => return Err(anyhow!("session has not been started")),
            SessionState::Falling => {}
        }

        tokio::time::sleep(Duration::from_millis(snapshot.drop_interval_ms as u64)).await;
        handle.gravity_tick().await?;
        ticks += 1;
    }
    debug!(ticks, "gravity driver finished");
    Ok(ticks)
}
