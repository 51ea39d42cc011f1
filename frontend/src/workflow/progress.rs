//! Progress bar state and simulated progress plans.
//!
//! The backend exposes no progress signal. Each request is wrapped in a
//! fixed plan of checkpoints, some followed by a short pause so the bar
//! visibly moves. A real progress source can replace a plan without
//! touching the controller.

/// Visual tone of the bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressTone {
    /// 0%: the attempt failed
    Error,
    /// Anything between 0 and 100
    Active,
    /// 100%: done
    Success,
}

impl ProgressTone {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            ProgressTone::Error => "bg-danger",
            ProgressTone::Active => "bg-primary",
            ProgressTone::Success => "bg-success",
        }
    }
}

/// What the bar currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressState {
    /// 0..=100
    pub percent: u8,
    pub status: String,
}

impl ProgressState {
    pub fn new(percent: u8, status: impl Into<String>) -> Self {
        Self {
            percent: percent.min(100),
            status: status.into(),
        }
    }

    pub fn tone(&self) -> ProgressTone {
        match self.percent {
            0 => ProgressTone::Error,
            100 => ProgressTone::Success,
            _ => ProgressTone::Active,
        }
    }

    /// Bar label, e.g. `70%`.
    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// One checkpoint of a simulated plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressStep {
    pub percent: u8,
    pub status: &'static str,
    /// Pause after reporting this step
    pub delay_ms: u32,
}

impl ProgressStep {
    pub const fn new(percent: u8, status: &'static str) -> Self {
        Self {
            percent,
            status,
            delay_ms: 0,
        }
    }

    pub const fn paused(percent: u8, status: &'static str, delay_ms: u32) -> Self {
        Self {
            percent,
            status,
            delay_ms,
        }
    }

    pub fn state(&self) -> ProgressState {
        ProgressState::new(self.percent, self.status)
    }
}

/// Fixed checkpoints reported around one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedProgress {
    /// Reported before the request is sent
    pub before_request: &'static [ProgressStep],
    /// Reported after a successful reply, before results are rendered
    pub after_response: &'static [ProgressStep],
    /// Status at 100%
    pub complete: &'static str,
    /// Status at 0% after a failure
    pub failed: &'static str,
}

impl SimulatedProgress {
    pub fn complete_state(&self) -> ProgressState {
        ProgressState::new(100, self.complete)
    }

    pub fn failed_state(&self) -> ProgressState {
        ProgressState::new(0, self.failed)
    }

    /// Checkpoints in reporting order, excluding the final state.
    pub fn steps(&self) -> impl Iterator<Item = &ProgressStep> {
        self.before_request.iter().chain(self.after_response.iter())
    }
}
