use anyhow::Result;
use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use log::{debug, error, info, warn};
use std::thread::{self, JoinHandle};

use crate::leaderboard::{ScoreEntry, ScoreStore};

// Command to control the reporter thread
enum ReportCommand {
    Submit(ScoreEntry),
    Refresh,
    Quit,
}

/// Latest leaderboard snapshot; `None` when the store could not be read
pub type LeaderboardSnapshot = Option<Vec<ScoreEntry>>;

/// Hands scores to the store on a worker thread so a slow or failing store never stalls a frame.
/// Delivery is best-effort: failures are logged and dropped.
#[derive(Resource)]
pub struct ScoreReporter {
    sender: Option<Sender<ReportCommand>>,
    snapshots: Receiver<LeaderboardSnapshot>,
    handle: Option<JoinHandle<()>>,
    latest: LeaderboardSnapshot,
}

impl ScoreReporter {
    pub fn spawn<S>(store: S, top_n: usize) -> Self
    where
        S: ScoreStore + Send + 'static,
    {
        let (sender, receiver) = bounded(64);
        // One slot: the worker swaps out an unread snapshot for the newer one
        let (snapshot_sender, snapshots) = bounded(1);
        let stale = snapshots.clone();

        let handle = thread::Builder::new()
            .name("score-reporter".to_string())
            .spawn(move || {
                if let Err(e) =
                    run_reporter_thread(store, top_n, &receiver, &snapshot_sender, &stale)
                {
                    error!("Score reporter stopped: {e:#}");
                }
            });

        let (sender, handle) = match handle {
            Ok(handle) => (Some(sender), Some(handle)),
            Err(e) => {
                error!("Could not start score reporter, scores will not be saved: {e}");
                (None, None)
            }
        };

        let reporter = Self {
            sender,
            snapshots,
            handle,
            latest: None,
        };
        reporter.refresh();
        reporter
    }

    /// Queue a finished round for the store
    pub fn submit(&self, name: &str, score: u32) -> bool {
        self.send(ReportCommand::Submit(ScoreEntry::new(name, score)))
    }

    /// Ask for a fresh leaderboard snapshot
    pub fn refresh(&self) -> bool {
        self.send(ReportCommand::Refresh)
    }

    /// Drain snapshots that arrived since the last poll. Returns true if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(snapshot) = self.snapshots.try_recv() {
            self.latest = snapshot;
            changed = true;
        }
        changed
    }

    pub fn leaderboard(&self) -> Option<&[ScoreEntry]> {
        self.latest.as_deref()
    }

    /// Block until the next snapshot arrives (tests and shutdown only)
    pub fn wait_for_snapshot(&mut self, timeout: std::time::Duration) -> bool {
        match self.snapshots.recv_timeout(timeout) {
            Ok(snapshot) => {
                self.latest = snapshot;
                self.poll();
                true
            }
            Err(_) => false,
        }
    }

    fn send(&self, command: ReportCommand) -> bool {
        let Some(sender) = &self.sender else {
            return false;
        };
        match sender.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("Score reporter is backed up, dropping request");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!("Score reporter is gone, dropping request");
                false
            }
        }
    }
}

impl Drop for ScoreReporter {
    fn drop(&mut self) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send(ReportCommand::Quit);
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_reporter_thread<S: ScoreStore>(
    mut store: S,
    top_n: usize,
    receiver: &Receiver<ReportCommand>,
    snapshots: &Sender<LeaderboardSnapshot>,
    stale: &Receiver<LeaderboardSnapshot>,
) -> Result<()> {
    debug!("Score reporter running");

    while let Ok(command) = receiver.recv() {
        match command {
            ReportCommand::Submit(entry) => {
                let (name, score) = (entry.name.clone(), entry.score);
                match store.submit(entry) {
                    Ok(()) => info!("Saved score {score} for {name}"),
                    Err(e) => error!("Failed to save score {score} for {name}: {e}"),
                }
            }
            ReportCommand::Refresh => {
                let snapshot = match store.top(top_n) {
                    Ok(entries) => Some(entries),
                    Err(e) => {
                        error!("Failed to load leaderboard: {e}");
                        None
                    }
                };
                publish_snapshot(snapshots, stale, snapshot)?;
            }
            ReportCommand::Quit => break,
        }
    }

    debug!("Score reporter exiting");
    Ok(())
}

// Replaces an unread snapshot so the newest one always reaches the UI
fn publish_snapshot(
    snapshots: &Sender<LeaderboardSnapshot>,
    stale: &Receiver<LeaderboardSnapshot>,
    snapshot: LeaderboardSnapshot,
) -> Result<()> {
    let mut pending = snapshot;
    loop {
        match snapshots.try_send(pending) {
            Ok(()) => return Ok(()),
            Err(TrySendError::Full(snapshot)) => {
                if stale.try_recv().is_ok() {
                    debug!("Replaced an unread leaderboard snapshot");
                }
                pending = snapshot;
            }
            Err(TrySendError::Disconnected(_)) => {
                anyhow::bail!("leaderboard receiver disconnected")
            }
        }
    }
}
