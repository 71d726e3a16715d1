use std::fmt::Display;

use super::FeatureVector;

/// Binary watch decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchLabel {
    WontWatch,
    WillWatch,
}

impl WatchLabel {
    /// 0 = won't watch, 1 = will watch
    pub fn as_bit(self) -> u8 {
        match self {
            WatchLabel::WontWatch => 0,
            WatchLabel::WillWatch => 1,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WatchLabel::WontWatch => "Won't Watch",
            WatchLabel::WillWatch => "Will Watch",
        }
    }
}

impl Display for WatchLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A feature vector with its known outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledSample {
    pub features: FeatureVector,
    pub output: WatchLabel,
}
