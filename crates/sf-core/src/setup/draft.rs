//! Fields of an in-progress setup wizard draft.

use std::fmt;

/// Prefix of the local storage keys holding draft fields.
pub const DRAFT_KEY_PREFIX: &str = "setup_";

/// JSON shape a draft field is submitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftValueKind {
    /// Free text, always a JSON string.
    Text,
    /// A JSON array (concept names or custom concept objects).
    List,
}

/// A form field collected across the wizard pages before the final submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    NetworkTitle,
    BackendApiUrl,
    MessengerUrl,
    OpenaiApiUrl,
    ApiToken,
    WritersNote,
    WorldSettings,
    Concepts,
    CustomConcepts,
}

impl DraftField {
    pub const ALL: [DraftField; 9] = [
        DraftField::NetworkTitle,
        DraftField::BackendApiUrl,
        DraftField::MessengerUrl,
        DraftField::OpenaiApiUrl,
        DraftField::ApiToken,
        DraftField::WritersNote,
        DraftField::WorldSettings,
        DraftField::Concepts,
        DraftField::CustomConcepts,
    ];

    /// Settings key the field is submitted under.
    pub fn settings_key(self) -> &'static str {
        match self {
            Self::NetworkTitle => "networkTitle",
            Self::BackendApiUrl => "backendApiUrl",
            Self::MessengerUrl => "messengerUrl",
            Self::OpenaiApiUrl => "openaiApiUrl",
            Self::ApiToken => "apiToken",
            Self::WritersNote => "writersNote",
            Self::WorldSettings => "worldSettings",
            Self::Concepts => "concepts",
            Self::CustomConcepts => "customConcepts",
        }
    }

    /// Local storage key of the field.
    pub fn storage_key(self) -> String {
        format!("{DRAFT_KEY_PREFIX}{}", self.settings_key())
    }

    pub fn value_kind(self) -> DraftValueKind {
        match self {
            Self::Concepts | Self::CustomConcepts => DraftValueKind::List,
            _ => DraftValueKind::Text,
        }
    }

    pub fn from_settings_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.settings_key() == key)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.settings_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_are_prefixed_settings_keys() {
        assert_eq!(DraftField::NetworkTitle.storage_key(), "setup_networkTitle");
        assert_eq!(DraftField::CustomConcepts.storage_key(), "setup_customConcepts");
    }

    #[test]
    fn from_settings_key_round_trips() {
        for field in DraftField::ALL {
            assert_eq!(DraftField::from_settings_key(field.settings_key()), Some(field));
        }
        assert_eq!(DraftField::from_settings_key("setupStatus"), None);
    }

    #[test]
    fn only_concept_fields_are_lists() {
        let lists: Vec<_> = DraftField::ALL
            .into_iter()
            .filter(|f| f.value_kind() == DraftValueKind::List)
            .collect();

        assert_eq!(lists, vec![DraftField::Concepts, DraftField::CustomConcepts]);
        assert_eq!(DraftField::NetworkTitle.value_kind(), DraftValueKind::Text);
    }
}
