// src/models/metrics.rs
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Counts describing either a single document or the whole vault.
///
/// A per-document record always has `files == 1` and exactly one of `notes`
/// or `attachments` set to 1. The vault aggregate is the field-wise sum of
/// every per-document record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Metrics {
    pub files: u64,
    pub notes: u64,
    pub attachments: u64,
    pub size: u64,
    pub links: u64,
    pub words: u64,
}

impl Metrics {
    pub const ZERO: Self = Self {
        files: 0,
        notes: 0,
        attachments: 0,
        size: 0,
        links: 0,
        words: 0,
    };

    #[inline]
    #[must_use]
    pub const fn note(size: u64, links: u64, words: u64) -> Self {
        Self {
            files: 1,
            notes: 1,
            attachments: 0,
            size,
            links,
            words,
        }
    }

    /// Attachments are never tokenized, so links and words stay at zero.
    #[inline]
    #[must_use]
    pub const fn attachment(size: u64) -> Self {
        Self {
            files: 1,
            notes: 0,
            attachments: 1,
            size,
            links: 0,
            words: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            files: self.files.saturating_add(other.files),
            notes: self.notes.saturating_add(other.notes),
            attachments: self.attachments.saturating_add(other.attachments),
            size: self.size.saturating_add(other.size),
            links: self.links.saturating_add(other.links),
            words: self.words.saturating_add(other.words),
        }
    }

    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self {
            files: self.files.saturating_sub(other.files),
            notes: self.notes.saturating_sub(other.notes),
            attachments: self.attachments.saturating_sub(other.attachments),
            size: self.size.saturating_sub(other.size),
            links: self.links.saturating_sub(other.links),
            words: self.words.saturating_sub(other.words),
        }
    }
}

impl Add for Metrics {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Metrics {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl Sum for Metrics {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Metrics {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
