//! [`Section`] progression definitions.

use std::{collections::BTreeSet, fmt};

use common::define_kind;
use tracing as log;

define_kind! {
    #[doc = "Step of a booking form."]
    enum Section {
        #[doc = "Size & Duration."]
        Size = 1,

        #[doc = "Date & Time."]
        Datetime = 2,
    }
}

impl Section {
    /// Returns the human-readable title of this [`Section`].
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Size => "Size & Duration",
            Self::Datetime => "Date & Time",
        }
    }
}

/// Progress through an ordered list of form sections.
///
/// At most one section is expanded at a time, and completion of a section
/// may move the focus to the next one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Progress<S> {
    /// Sections in their display order.
    order: Vec<S>,

    /// Currently expanded section, if any.
    expanded: Option<S>,

    /// Completed sections.
    completed: BTreeSet<S>,
}

impl<S: Copy + Ord + fmt::Debug> Progress<S> {
    /// Creates a new [`Progress`] over the provided sections `order`, with the
    /// first section expanded and nothing completed.
    ///
    /// Duplicated sections are kept in their first position only.
    #[must_use]
    pub fn new(order: impl IntoIterator<Item = S>) -> Self {
        let mut order = order.into_iter().collect::<Vec<_>>();
        let mut seen = BTreeSet::new();
        order.retain(|s| seen.insert(*s));
        Self {
            expanded: order.first().copied(),
            order,
            completed: BTreeSet::new(),
        }
    }

    /// Returns the sections in their display order.
    #[must_use]
    pub fn order(&self) -> &[S] {
        &self.order
    }

    /// Returns the currently expanded section, if any.
    #[must_use]
    pub fn expanded(&self) -> Option<S> {
        self.expanded
    }

    /// Indicates whether the provided `section` is expanded.
    #[must_use]
    pub fn is_expanded(&self, section: S) -> bool {
        self.expanded == Some(section)
    }

    /// Indicates whether the provided `section` is completed.
    #[must_use]
    pub fn is_completed(&self, section: S) -> bool {
        self.completed.contains(&section)
    }

    /// Indicates whether every section is completed.
    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.order.iter().all(|s| self.completed.contains(s))
    }

    /// Expands the provided `section`, collapsing any other one.
    pub fn expand(&mut self, section: S) {
        if self.check(section) {
            self.expanded = Some(section);
        }
    }

    /// Collapses the provided `section`, if it's the expanded one.
    pub fn collapse(&mut self, section: S) {
        if self.is_expanded(section) {
            self.expanded = None;
        }
    }

    /// Expands the provided `section` if it's collapsed, or collapses it
    /// otherwise.
    pub fn toggle(&mut self, section: S) {
        if self.is_expanded(section) {
            self.collapse(section);
        } else {
            self.expand(section);
        }
    }

    /// Marks the provided `section` as completed.
    ///
    /// With `auto_advance`, the section following it gets expanded, or
    /// everything is collapsed if it's the last one.
    pub fn mark_complete(&mut self, section: S, auto_advance: bool) {
        let Some(pos) = self.position(section) else {
            return;
        };
        _ = self.completed.insert(section);
        if auto_advance {
            self.expanded = self.order.get(pos + 1).copied();
        }
    }

    /// Marks the provided `section` as not completed, keeping the focus as is.
    pub fn mark_incomplete(&mut self, section: S) {
        _ = self.completed.remove(&section);
    }

    /// Returns this [`Progress`] to its initial state.
    pub fn reset(&mut self) {
        self.expanded = self.order.first().copied();
        self.completed.clear();
    }

    /// Returns position of the provided `section` in the order.
    fn position(&self, section: S) -> Option<usize> {
        let pos = self.order.iter().position(|s| *s == section);
        if pos.is_none() {
            log::debug!("ignoring unknown section {section:?}");
        }
        pos
    }

    /// Checks whether the provided `section` is a known one.
    fn check(&self, section: S) -> bool {
        self.position(section).is_some()
    }
}

impl Default for Progress<Section> {
    fn default() -> Self {
        Self::new(Section::ALL.iter().copied())
    }
}
