//! Pipeline states.

use std::fmt;

/// Position of one invocation in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    /// Event received.
    Start,
    /// Input blob is readable.
    InputChecked,
    /// Extension maps to a supported image format.
    FormatChecked,
    /// Vision analysis succeeded.
    Analyzed,
    /// Metadata record stored.
    Published,
    /// Invocation finished, published or deliberately skipped.
    Done,
    /// Invocation failed.
    Aborted,
}

impl PipelineState {
    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Whether `next` is a legal successor.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Start, Self::InputChecked)
                | (Self::InputChecked, Self::FormatChecked | Self::Done)
                | (Self::FormatChecked, Self::Analyzed)
                | (Self::Analyzed, Self::Published)
                | (Self::Published, Self::Done)
                | (
                    Self::Start
                        | Self::InputChecked
                        | Self::FormatChecked
                        | Self::Analyzed
                        | Self::Published,
                    Self::Aborted
                )
        )
    }

    /// Lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::InputChecked => "input_checked",
            Self::FormatChecked => "format_checked",
            Self::Analyzed => "analyzed",
            Self::Published => "published",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
