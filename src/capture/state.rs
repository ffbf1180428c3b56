/// Capture pipeline lifecycle states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running,
    Stopped,
    /// The receive loop hit a fatal transport error; capture has halted
    /// and the visualization will no longer refresh.
    Failed { message: String },
}

impl PipelineState {
    /// Check if transition from current state to target state is valid
    pub fn can_transition_to(&self, target: &PipelineState) -> bool {
        use PipelineState::*;

        matches!(
            (self, target),
            (Idle, Running) | (Running, Stopped) | (Running, Failed { .. })
        )
    }

    pub fn is_running(&self) -> bool {
        matches!(self, PipelineState::Running)
    }

    /// Get human-readable state name
    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
            Self::Stopped => "Stopped",
            Self::Failed { .. } => "Failed",
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::Idle
    }
}
