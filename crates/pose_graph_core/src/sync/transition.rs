use bevy_reflect::{Reflect, std_traits::ReflectDefault};
use serde::{Deserialize, Serialize};

use crate::errors::{GraphError, GraphResult};

#[derive(Reflect, Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[reflect(Default)]
pub enum TransitionStatus {
    #[default]
    Start,
    InProcess,
    End,
}

#[derive(Reflect, Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[reflect(Default)]
pub enum SyncStyle {
    /// Source and destination keep their own clocks
    #[default]
    Async,
    /// Source stops advancing while the transition runs
    SourceFrozen,
    SourceToDestinationTimeSync,
    DestinationToSourceTimeSync,
    DestinationAndSourceTimeSync,
    KeyFrameSync,
}

impl SyncStyle {
    /// Fails for the styles that need cross-clip time alignment.
    pub fn ensure_supported(self) -> GraphResult<()> {
        match self {
            SyncStyle::Async | SyncStyle::SourceFrozen => Ok(()),
            SyncStyle::SourceToDestinationTimeSync
            | SyncStyle::DestinationToSourceTimeSync
            | SyncStyle::DestinationAndSourceTimeSync
            | SyncStyle::KeyFrameSync => Err(GraphError::UnsupportedSyncStyle(self)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TransitionPreferences {
    /// Restart the clip from its start time when the transition begins.
    pub reset_from_start: bool,
    /// Offset in ticks added to the start time on reset.
    pub offset: f32,
}

/// Transition state a state node hands down to the graph it owns.
///
/// Only the graph directly nested in the state sees it; deeper graphs are
/// evaluated without transition data.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TransitionSyncData {
    pub status: TransitionStatus,
    pub sync_style: SyncStyle,
    pub time_multiplier: f32,
    pub preferences: TransitionPreferences,
}

impl Default for TransitionSyncData {
    fn default() -> Self {
        Self {
            status: TransitionStatus::Start,
            sync_style: SyncStyle::Async,
            time_multiplier: 1.,
            preferences: TransitionPreferences::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::SyncStyle;
    use crate::errors::GraphError;

    #[test]
    fn time_sync_styles_are_unsupported() {
        assert!(SyncStyle::Async.ensure_supported().is_ok());
        assert!(SyncStyle::SourceFrozen.ensure_supported().is_ok());
        for style in [
            SyncStyle::SourceToDestinationTimeSync,
            SyncStyle::DestinationToSourceTimeSync,
            SyncStyle::DestinationAndSourceTimeSync,
            SyncStyle::KeyFrameSync,
        ] {
            assert_eq!(
                style.ensure_supported(),
                Err(GraphError::UnsupportedSyncStyle(style))
            );
        }
    }
}
