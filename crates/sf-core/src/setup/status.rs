//! Setup stages and the forward-only transition policy.

use std::fmt;

/// Server-recorded progress through the setup wizard.
///
/// Variants are declared in wizard order, so the derived `Ord` is the stage
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SetupStatus {
    NotStarted,
    Named,
    EndpointsConfigured,
    ContentConfigured,
    ConceptsConfigured,
    /// The backend is provisioning the network.
    Creating,
    Finished,
}

impl SetupStatus {
    pub const ALL: [SetupStatus; 7] = [
        SetupStatus::NotStarted,
        SetupStatus::Named,
        SetupStatus::EndpointsConfigured,
        SetupStatus::ContentConfigured,
        SetupStatus::ConceptsConfigured,
        SetupStatus::Creating,
        SetupStatus::Finished,
    ];

    /// Parse a wire value. Returns `None` for stages this build does not rank.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Not Started" | "NotStarted" => Some(Self::NotStarted),
            "Named" => Some(Self::Named),
            "EndpointsConfigured" => Some(Self::EndpointsConfigured),
            "ContentConfigured" => Some(Self::ContentConfigured),
            "ConceptsConfigured" => Some(Self::ConceptsConfigured),
            "Creating" => Some(Self::Creating),
            "Finished" => Some(Self::Finished),
            _ => None,
        }
    }

    /// Canonical wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Named => "Named",
            Self::EndpointsConfigured => "EndpointsConfigured",
            Self::ContentConfigured => "ContentConfigured",
            Self::ConceptsConfigured => "ConceptsConfigured",
            Self::Creating => "Creating",
            Self::Finished => "Finished",
        }
    }

    /// Zero-based position in the stage ordering.
    pub fn position(self) -> usize {
        self as usize
    }

    pub fn is_finished(self) -> bool {
        self == Self::Finished
    }
}

impl fmt::Display for SetupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing an attempted status write with the known status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransition {
    /// Both stages are ranked and the attempt is not earlier than the current one.
    Advance,
    /// The ordering cannot judge the write (unknown stage or no current status),
    /// so it is let through.
    Unranked,
    /// The attempt would move the status back to an earlier ranked stage.
    Blocked {
        current: SetupStatus,
        attempted: SetupStatus,
    },
}

impl StatusTransition {
    pub fn evaluate(current: Option<&str>, attempted: &str) -> Self {
        let current = current.and_then(SetupStatus::parse);
        let attempted = SetupStatus::parse(attempted);

        match (current, attempted) {
            (Some(current), Some(attempted)) if attempted < current => {
                Self::Blocked { current, attempted }
            }
            (Some(_), Some(_)) => Self::Advance,
            _ => Self::Unranked,
        }
    }

    pub fn allows_write(&self) -> bool {
        !matches!(self, Self::Blocked { .. })
    }
}
