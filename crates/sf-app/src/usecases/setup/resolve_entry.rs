use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use sf_core::setup::{resolve_next_step, WizardStep};

use crate::usecases::SettingsStore;

/// Use case run on entry to the setup wizard root.
///
/// Picks the next unfinished wizard step from the recorded setup status. When
/// the status cannot be looked up the wizard restarts at the first step;
/// earlier steps only overwrite the same keys again.
pub struct ResolveSetupEntry {
    store: Arc<SettingsStore>,
}

impl ResolveSetupEntry {
    pub fn new(store: Arc<SettingsStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> WizardStep {
        let span = info_span!("usecase.resolve_setup_entry.execute");

        async {
            match self.store.get().await {
                Ok(settings) => {
                    let status = settings.setup_status();
                    let step = resolve_next_step(status);
                    info!(
                        setup_status = status.unwrap_or("<none>"),
                        step = %step,
                        "Resolved setup entry step"
                    );
                    step
                }
                Err(err) => {
                    warn!(error = %err, "Setup status lookup failed, starting from the first step");
                    WizardStep::Network
                }
            }
        }
        .instrument(span)
        .await
    }
}
