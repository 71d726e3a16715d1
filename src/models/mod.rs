pub mod feature;
pub mod sample;

pub use feature::{Feature, FeatureError, FeatureVector, RawFeatureVector};
pub use sample::{LabeledSample, WatchLabel};
