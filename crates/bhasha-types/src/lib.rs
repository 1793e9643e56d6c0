//! Foundation types for the Bhasha corpus ledger.
//!
//! This crate provides the identity, temporal, and record types shared by
//! every other Bhasha crate.
//!
//! # Key Types
//!
//! - [`ContributionId`]: UUID v7 contribution identifier
//! - [`SubmissionStamp`]: Monotonic submission timestamp
//! - [`ContributionKind`]: Audio, video, text, or image
//! - [`AudioDuration`] / [`VideoDuration`]: Duration buckets with their fixed hour values
//! - [`ContributionDraft`]: Unvalidated, kind-tagged form input
//! - [`Contribution`]: A stored record with derived fields

pub mod contribution;
pub mod draft;
pub mod duration;
pub mod error;
pub mod id;
pub mod kind;
pub mod temporal;

pub use contribution::{
    AudioRecord, Contribution, ContributionBody, ImageRecord, TextRecord, VideoRecord,
};
pub use draft::{
    clean_tags, parse_tags, AudioDraft, ContributionDraft, ImageDraft, TextDraft, VideoDraft,
};
pub use duration::{AudioDuration, BucketResolution, DurationBucket, VideoDuration};
pub use error::TypeError;
pub use id::ContributionId;
pub use kind::ContributionKind;
pub use temporal::SubmissionStamp;
