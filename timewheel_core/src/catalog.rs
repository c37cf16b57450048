// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed list of themes the widget cycles through.
//!
//! A [`ThemeCatalog`] is validated once at construction: it is non-empty and
//! its ids are exactly `1..=n` in order, so a theme's 0-based index is always
//! `id - 1`. Everything downstream (dot ids, rotation indices, navigation)
//! relies on that.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A span of years.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    /// First year.
    pub start: i32,
    /// Last year.
    pub end: i32,
}

/// A dated fact shown in the facts panel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fact {
    /// Year of the event.
    pub year: i32,
    /// What happened.
    pub description: String,
}

/// One selectable historical period.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Stable id, `1..=n`.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Covered years.
    pub period: Period,
    /// Facts in display order.
    pub facts: Vec<Fact>,
}

/// Why a list of themes was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// The list was empty.
    Empty,
    /// The theme at `index` does not have id `index + 1`.
    UnexpectedId {
        /// Position in the list.
        index: usize,
        /// The id that position requires.
        expected: u32,
        /// The id found there.
        found: u32,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("theme catalog is empty"),
            Self::UnexpectedId {
                index,
                expected,
                found,
            } => write!(
                f,
                "theme at position {index} has id {found}, expected {expected}"
            ),
        }
    }
}

impl core::error::Error for CatalogError {}

/// A validated, ordered list of themes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// Validates and wraps a list of themes.
    pub fn new(themes: Vec<Theme>) -> Result<Self, CatalogError> {
        if themes.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, theme) in themes.iter().enumerate() {
            let expected = u32::try_from(index + 1).unwrap_or(u32::MAX);
            if theme.id != expected {
                return Err(CatalogError::UnexpectedId {
                    index,
                    expected,
                    found: theme.id,
                });
            }
        }
        Ok(Self { themes })
    }

    /// Number of themes (and dots).
    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Number of themes as a `u32`; equal to the last theme's id.
    #[must_use]
    pub fn last_id(&self) -> u32 {
        self.themes.last().map_or(0, |theme| theme.id)
    }

    /// Always `false`; an empty catalog cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Does a theme with this id exist?
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.index_of(id).is_some()
    }

    /// 0-based position of a theme.
    #[must_use]
    pub fn index_of(&self, id: u32) -> Option<usize> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        (index < self.themes.len()).then_some(index)
    }

    /// Looks a theme up by id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Theme> {
        self.themes.get(self.index_of(id)?)
    }

    /// The theme selected on startup.
    #[must_use]
    pub fn first(&self) -> &Theme {
        &self.themes[0]
    }

    /// All themes in order.
    #[must_use]
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Iterates the themes in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Theme> {
        self.themes.iter()
    }

    /// The id after `id`, wrapping from the last theme to the first.
    #[must_use]
    pub fn next_id(&self, id: u32) -> Option<u32> {
        let index = self.index_of(id)?;
        Some(self.themes[(index + 1) % self.len()].id)
    }

    /// The id before `id`, wrapping from the first theme to the last.
    #[must_use]
    pub fn prev_id(&self, id: u32) -> Option<u32> {
        let index = self.index_of(id)?;
        Some(self.themes[(index + self.len() - 1) % self.len()].id)
    }
}

impl<'a> IntoIterator for &'a ThemeCatalog {
    type Item = &'a Theme;
    type IntoIter = core::slice::Iter<'a, Theme>;

    fn into_iter(self) -> Self::IntoIter {
        self.themes.iter()
    }
}
