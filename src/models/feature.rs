use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One of the five categorical inputs of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Genre,
    AgeRating,
    Length,
    Era,
    UserRating,
}

impl Feature {
    /// All features in form order
    pub const ALL: [Feature; 5] = [
        Feature::Genre,
        Feature::AgeRating,
        Feature::Length,
        Feature::Era,
        Feature::UserRating,
    ];

    /// Lowest legal code, shared by every feature
    pub const MIN_CODE: u8 = 1;

    /// Highest legal code for this feature
    pub fn max_code(self) -> u8 {
        match self {
            Feature::Genre | Feature::AgeRating => 5,
            Feature::Length | Feature::Era | Feature::UserRating => 4,
        }
    }

    /// Wire name, as used in JSON bodies and URL paths
    pub fn key(self) -> &'static str {
        match self {
            Feature::Genre => "genre",
            Feature::AgeRating => "age_rating",
            Feature::Length => "length",
            Feature::Era => "era",
            Feature::UserRating => "user_rating",
        }
    }

    /// Human-readable name for form labels
    pub fn display_name(self) -> &'static str {
        match self {
            Feature::Genre => "Genre",
            Feature::AgeRating => "Age Rating",
            Feature::Length => "Movie Length",
            Feature::Era => "Release Era",
            Feature::UserRating => "User Rating",
        }
    }

    /// Looks a feature up by its wire name
    pub fn from_key(key: &str) -> Option<Self> {
        Feature::ALL.into_iter().find(|feature| feature.key() == key)
    }

    fn check(self, value: i64) -> Result<u8, FeatureError> {
        u8::try_from(value)
            .ok()
            .filter(|code| (Self::MIN_CODE..=self.max_code()).contains(code))
            .ok_or(FeatureError::OutOfRange {
                feature: self,
                value,
                min: Self::MIN_CODE,
                max: self.max_code(),
            })
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Validation failures for feature input
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    #[error("{feature} must be between {min} and {max}, got {value}")]
    OutOfRange {
        feature: Feature,
        value: i64,
        min: u8,
        max: u8,
    },
}

/// Unchecked feature codes as submitted by a client
///
/// Fields are wide so that any JSON integer reaches range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RawFeatureVector {
    pub genre: i64,
    pub age_rating: i64,
    pub length: i64,
    pub era: i64,
    pub user_rating: i64,
}

/// A movie described by five in-range categorical codes
///
/// Only constructible through [`FeatureVector::new`] (or `TryFrom<RawFeatureVector>`),
/// so every value held by the scorer is inside its feature's declared range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureVector {
    genre: u8,
    age_rating: u8,
    length: u8,
    era: u8,
    user_rating: u8,
}

impl FeatureVector {
    pub fn new(
        genre: u8,
        age_rating: u8,
        length: u8,
        era: u8,
        user_rating: u8,
    ) -> Result<Self, FeatureError> {
        Self::try_from(RawFeatureVector {
            genre: genre.into(),
            age_rating: age_rating.into(),
            length: length.into(),
            era: era.into(),
            user_rating: user_rating.into(),
        })
    }

    pub fn genre(&self) -> u8 {
        self.genre
    }

    pub fn age_rating(&self) -> u8 {
        self.age_rating
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn era(&self) -> u8 {
        self.era
    }

    pub fn user_rating(&self) -> u8 {
        self.user_rating
    }

    /// Code of the given feature
    pub fn get(&self, feature: Feature) -> u8 {
        match feature {
            Feature::Genre => self.genre,
            Feature::AgeRating => self.age_rating,
            Feature::Length => self.length,
            Feature::Era => self.era,
            Feature::UserRating => self.user_rating,
        }
    }
}

impl TryFrom<RawFeatureVector> for FeatureVector {
    type Error = FeatureError;

    fn try_from(raw: RawFeatureVector) -> Result<Self, Self::Error> {
        Ok(Self {
            genre: Feature::Genre.check(raw.genre)?,
            age_rating: Feature::AgeRating.check(raw.age_rating)?,
            length: Feature::Length.check(raw.length)?,
            era: Feature::Era.check(raw.era)?,
            user_rating: Feature::UserRating.check(raw.user_rating)?,
        })
    }
}
