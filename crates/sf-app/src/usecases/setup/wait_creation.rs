use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, info_span, warn, Instrument};

use sf_core::ports::SetupProgressPort;
use sf_core::setup::SetupStatus;

/// Use case backing the "network is being created" page.
///
/// Polls the setup progress until the backend reports `Finished`. Poll errors
/// are logged and polling continues; stop waiting by dropping the future or
/// wrapping it in `tokio::time::timeout`.
pub struct WaitForNetworkCreation {
    progress: Arc<dyn SetupProgressPort>,
    interval: Duration,
}

impl WaitForNetworkCreation {
    pub fn new(progress: Arc<dyn SetupProgressPort>, interval: Duration) -> Self {
        // tokio::time::interval panics on a zero period.
        let interval = interval.max(Duration::from_millis(1));
        Self { progress, interval }
    }

    /// Returns the number of polls it took to observe `Finished`.
    pub async fn execute(&self) -> u32 {
        let span = info_span!(
            "usecase.wait_for_network_creation.execute",
            interval_ms = self.interval.as_millis() as u64
        );

        async {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut polls = 0u32;

            loop {
                ticker.tick().await;
                polls += 1;

                match self.progress.get_progress().await {
                    Ok(progress)
                        if SetupStatus::parse(&progress.status)
                            .is_some_and(SetupStatus::is_finished) =>
                    {
                        info!(polls, "Network creation finished");
                        return polls;
                    }
                    Ok(progress) => {
                        debug!(status = %progress.status, polls, "Network still being created");
                    }
                    Err(err) => {
                        warn!(error = %err, polls, "Failed to check setup progress");
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}
