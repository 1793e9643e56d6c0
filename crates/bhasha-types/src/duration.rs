//! Duration buckets and their fixed hour values.
//!
//! Recording length is never entered directly. A contributor picks a coarse
//! bucket and the bucket maps to a fixed number of hours. Hours are held as
//! whole centi-hours so running totals stay exact.
//!
//! Unrecognised labels resolve to the table's first entry. Callers get a
//! [`BucketResolution`] that says whether that default was applied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A fixed duration-bucket table.
pub trait DurationBucket: Copy + Eq + fmt::Debug + 'static {
    /// Every bucket in table order.
    const TABLE: &'static [Self];

    /// Bucket applied when a label is not in the table.
    const DEFAULT: Self;

    /// Label shown to contributors, e.g. `"5-10 minutes"`.
    fn label(self) -> &'static str;

    /// Fixed duration in hundredths of an hour.
    fn centihours(self) -> u32;

    /// Fixed duration in hours.
    fn hours(self) -> f64 {
        f64::from(self.centihours()) / 100.0
    }

    /// Strict lookup by label.
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::TABLE.iter().copied().find(|b| b.label() == label)
    }

    /// Lookup that falls back to [`DurationBucket::DEFAULT`].
    fn resolve(label: &str) -> BucketResolution<Self> {
        match Self::from_label(label) {
            Some(bucket) => BucketResolution {
                bucket,
                fallback_from: None,
            },
            None => BucketResolution {
                bucket: Self::DEFAULT,
                fallback_from: Some(label.to_string()),
            },
        }
    }
}

/// Outcome of resolving a bucket label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketResolution<B> {
    pub bucket: B,
    /// The unrecognised label, when the default bucket was applied.
    pub fallback_from: Option<String>,
}


/// Audio recording length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioDuration {
    #[serde(rename = "2-3 minutes")]
    TwoToThree,
    #[serde(rename = "3-5 minutes")]
    ThreeToFive,
    #[serde(rename = "5-10 minutes")]
    FiveToTen,
    #[serde(rename = "10+ minutes")]
    TenPlus,
}

impl DurationBucket for AudioDuration {
    const TABLE: &'static [Self] = &[
        Self::TwoToThree,
        Self::ThreeToFive,
        Self::FiveToTen,
        Self::TenPlus,
    ];
    const DEFAULT: Self = Self::TwoToThree;

    fn label(self) -> &'static str {
        match self {
            Self::TwoToThree => "2-3 minutes",
            Self::ThreeToFive => "3-5 minutes",
            Self::FiveToTen => "5-10 minutes",
            Self::TenPlus => "10+ minutes",
        }
    }

    fn centihours(self) -> u32 {
        match self {
            Self::TwoToThree => 4,
            Self::ThreeToFive => 7,
            Self::FiveToTen => 12,
            Self::TenPlus => 25,
        }
    }
}

/// Video recording length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoDuration {
    #[serde(rename = "5-10 minutes")]
    FiveToTen,
    #[serde(rename = "10-15 minutes")]
    TenToFifteen,
    #[serde(rename = "15-20 minutes")]
    FifteenToTwenty,
    #[serde(rename = "20+ minutes")]
    TwentyPlus,
}

impl DurationBucket for VideoDuration {
    const TABLE: &'static [Self] = &[
        Self::FiveToTen,
        Self::TenToFifteen,
        Self::FifteenToTwenty,
        Self::TwentyPlus,
    ];
    const DEFAULT: Self = Self::FiveToTen;

    fn label(self) -> &'static str {
        match self {
            Self::FiveToTen => "5-10 minutes",
            Self::TenToFifteen => "10-15 minutes",
            Self::FifteenToTwenty => "15-20 minutes",
            Self::TwentyPlus => "20+ minutes",
        }
    }

    fn centihours(self) -> u32 {
        match self {
            Self::FiveToTen => 12,
            Self::TenToFifteen => 21,
            Self::FifteenToTwenty => 29,
            Self::TwentyPlus => 42,
        }
    }
}

macro_rules! bucket_text_impls {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_label(s).ok_or_else(|| TypeError::UnknownBucket(s.to_string()))
            }
        }
    };
}

bucket_text_impls!(AudioDuration);
bucket_text_impls!(VideoDuration);
