use std::fmt;

/// Lifecycle of a single leek run. Transitions are one-directional:
/// Initializing -> Running -> one of the ending states, or Error on a
/// failed initialization. Error permits another initialization attempt;
/// the ending states do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Initializing,
    Running,
    WonHeight,
    WonFertilizer,
    LostHeight,
    LostScythe,
    Aborted,
    Error,
}

impl Lifecycle {
    /// Ending states. Error is not one of them: a leek in Error can be
    /// re-initialized, a finished leek cannot.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Lifecycle::WonHeight
                | Lifecycle::WonFertilizer
                | Lifecycle::LostHeight
                | Lifecycle::LostScythe
                | Lifecycle::Aborted
        )
    }

    pub fn is_won(&self) -> bool {
        matches!(self, Lifecycle::WonHeight | Lifecycle::WonFertilizer)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Initializing => "initializing",
            Lifecycle::Running => "running",
            Lifecycle::WonHeight => "won_height",
            Lifecycle::WonFertilizer => "won_fertilizer",
            Lifecycle::LostHeight => "lost_height",
            Lifecycle::LostScythe => "lost_scythe",
            Lifecycle::Aborted => "aborted",
            Lifecycle::Error => "error",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the leek currently looks. Driven by the degradation counter,
/// not by the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Healthy,
    Degraded,
}

impl VisualState {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualState::Healthy => "healthy",
            VisualState::Degraded => "degraded",
        }
    }
}

impl fmt::Display for VisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
