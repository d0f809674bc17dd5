//! Point-in-time view of a machine for debug overlays and assertions.

use crate::core::{Tag, TransitionRecord};
use serde::{Deserialize, Serialize};

/// Serializable summary of a machine's state.
///
/// Diagnostic only: it carries no states, guards or callbacks, so a machine
/// cannot be rebuilt from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineSnapshot<T: Tag> {
    pub current: T,
    pub time_in_state: f32,
    pub initialized: bool,
    /// Active group names, outermost first
    pub active_groups: Vec<String>,
    pub history: Vec<TransitionRecord<T>>,
}

impl<T: Tag> MachineSnapshot<T> {
    /// Render the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionCause;
    use crate::state_tags;

    state_tags! {
        enum TestTag {
            Patrol,
            Abduct,
        }
    }

    #[test]
    fn snapshot_renders_json() {
        let snapshot = MachineSnapshot {
            current: TestTag::Abduct,
            time_in_state: 0.25,
            initialized: true,
            active_groups: vec!["beam".to_string()],
            history: vec![TransitionRecord {
                from: TestTag::Patrol,
                to: TestTag::Abduct,
                cause: TransitionCause::Local,
                time_in_previous: 4.0,
            }],
        };

        let json = snapshot.to_json().unwrap();
        let back: MachineSnapshot<TestTag> = serde_json::from_str(&json).unwrap();

        assert!(json.contains("\"current\": \"Abduct\""));
        assert_eq!(back, snapshot);
    }
}
