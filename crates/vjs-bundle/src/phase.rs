//! Per-invocation build lifecycle.

/// Phases of one build invocation.
///
/// Phases only move forward. `Failed` is terminal and reachable from every
/// phase except `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildPhase {
    Idle,
    ParsingArgs,
    SynthesizingEntry,
    Configuring,
    Bundling,
    Reporting,
    CleaningUp,
    Done,
    Failed,
}

impl BuildPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Whether `self -> next` is a legal transition.
    pub fn can_advance_to(self, next: BuildPhase) -> bool {
        match (self, next) {
            (from, _) if from.is_terminal() => false,
            (_, Self::Failed) => true,
            (from, to) => to > from,
        }
    }
}

impl std::fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::ParsingArgs => "parsing arguments",
            Self::SynthesizingEntry => "synthesizing entry",
            Self::Configuring => "configuring",
            Self::Bundling => "bundling",
            Self::Reporting => "reporting",
            Self::CleaningUp => "cleaning up",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}
