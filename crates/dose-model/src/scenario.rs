use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// The two internal-dose scenarios computed for every task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    WithoutControls,
    WithControls,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 2] = [ScenarioKind::WithoutControls, ScenarioKind::WithControls];

    /// Scenario surfaced by the summary for the task-level toggle.
    pub fn from_controls_used(engineering_controls_used: bool) -> Self {
        if engineering_controls_used {
            ScenarioKind::WithControls
        } else {
            ScenarioKind::WithoutControls
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::WithoutControls => "without_controls",
            ScenarioKind::WithControls => "with_controls",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::WithoutControls => "Without engineering controls",
            ScenarioKind::WithControls => "With engineering controls",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| ModelError::UnknownChoice {
                kind: "scenario",
                value: s.to_string(),
            })
    }
}

/// Scenario-level state: totals plus the user's respirator decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternalDoseScenario {
    /// Derived, mrem.
    pub total_without_respirator: Option<f64>,
    /// Derived, mrem.
    pub total_with_respirator: Option<f64>,
    pub respirator_prescribed: bool,
    pub explanation: String,
}

impl InternalDoseScenario {
    /// Total that applies given the respirator decision.
    pub fn selected_total(&self) -> Option<f64> {
        if self.respirator_prescribed {
            self.total_with_respirator
        } else {
            self.total_without_respirator
        }
    }
}
