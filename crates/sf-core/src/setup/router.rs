//! Maps a setup status to the next wizard page.

use std::fmt;

use crate::setup::SetupStatus;

/// Page of the setup wizard, or `Done` when the wizard should be left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Network,
    Endpoints,
    Content,
    Concepts,
    CustomConcepts,
    /// Waiting for the backend to finish creating the network.
    Creating,
    Done,
}

impl WizardStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Endpoints => "endpoints",
            Self::Content => "content",
            Self::Concepts => "concepts",
            Self::CustomConcepts => "custom-concepts",
            Self::Creating => "creating",
            Self::Done => "done",
        }
    }

    /// Frontend route of the step. `Done` leaves the wizard for the feed.
    pub fn route(self) -> &'static str {
        match self {
            Self::Network => "/setup/network",
            Self::Endpoints => "/setup/endpoints",
            Self::Content => "/setup/content",
            Self::Concepts => "/setup/concepts",
            Self::CustomConcepts => "/setup/custom-concepts",
            Self::Creating => "/setup/creating",
            Self::Done => "/",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Next unfinished wizard step for a recorded status.
///
/// Absent and unrecognised statuses start the wizard from the beginning.
pub fn resolve_next_step(status: Option<&str>) -> WizardStep {
    match status.and_then(SetupStatus::parse) {
        None | Some(SetupStatus::NotStarted) => WizardStep::Network,
        Some(SetupStatus::Named) => WizardStep::Endpoints,
        Some(SetupStatus::EndpointsConfigured) => WizardStep::Content,
        Some(SetupStatus::ContentConfigured) => WizardStep::Concepts,
        Some(SetupStatus::ConceptsConfigured) => WizardStep::CustomConcepts,
        Some(SetupStatus::Creating) => WizardStep::Creating,
        Some(SetupStatus::Finished) => WizardStep::Done,
    }
}
