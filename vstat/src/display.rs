// src/display.rs
use crate::config::Settings;
use crate::format;
use crate::models::Metrics;
use clap::ValueEnum;

/// One figure of the vault totals, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Statistic {
    Notes,
    Attachments,
    Files,
    Links,
    Words,
    Size,
}

impl Statistic {
    pub const ALL: [Self; 6] = [
        Self::Notes,
        Self::Attachments,
        Self::Files,
        Self::Links,
        Self::Words,
        Self::Size,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Attachments => "attachments",
            Self::Files => "files",
            Self::Links => "links",
            Self::Words => "words",
            Self::Size => "size",
        }
    }

    #[must_use]
    pub fn render(self, metrics: &Metrics) -> String {
        match self {
            Self::Notes => format::decimal(metrics.notes, "notes"),
            Self::Attachments => format::decimal(metrics.attachments, "attachments"),
            Self::Files => format::decimal(metrics.files, "files"),
            Self::Links => format::decimal(metrics.links, "links"),
            Self::Words => format::decimal(metrics.words, "words"),
            Self::Size => format::bytes(metrics.size),
        }
    }

    /// The statistic after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Notes => Self::Attachments,
            Self::Attachments => Self::Files,
            Self::Files => Self::Links,
            Self::Links => Self::Words,
            Self::Words => Self::Size,
            Self::Size => Self::Notes,
        }
    }

    /// Turns this statistic on for individual mode.
    pub const fn enable_in(self, settings: &mut Settings) {
        match self {
            Self::Notes => settings.show_notes = true,
            Self::Attachments => settings.show_attachments = true,
            Self::Files => settings.show_files = true,
            Self::Links => settings.show_links = true,
            Self::Words => settings.show_words = true,
            Self::Size => settings.show_size = true,
        }
    }

    const fn shown_in(self, settings: &Settings) -> bool {
        match self {
            Self::Notes => settings.show_notes,
            Self::Attachments => settings.show_attachments,
            Self::Files => settings.show_files,
            Self::Links => settings.show_links,
            Self::Words => settings.show_words,
            Self::Size => settings.show_size,
        }
    }
}

/// One-line summary of the vault totals.
///
/// Either every enabled statistic side by side, or a single focused one
/// that [`StatusLine::cycle`] moves through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    individual: Option<Vec<Statistic>>,
    focus: Statistic,
}

impl StatusLine {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        let individual = settings.display_individual_items.then(|| {
            Statistic::ALL
                .into_iter()
                .filter(|statistic| statistic.shown_in(settings))
                .collect()
        });
        Self {
            individual,
            focus: Statistic::Notes,
        }
    }

    #[must_use]
    pub const fn with_focus(mut self, focus: Statistic) -> Self {
        self.focus = focus;
        self
    }

    #[inline]
    #[must_use]
    pub const fn focus(&self) -> Statistic {
        self.focus
    }

    /// Moves the focus to the next statistic. Has no effect when every
    /// enabled statistic is shown at once.
    pub const fn cycle(&mut self) {
        if self.individual.is_none() {
            self.focus = self.focus.next();
        }
    }

    #[must_use]
    pub fn render(&self, metrics: &Metrics) -> String {
        match &self.individual {
            Some(shown) => shown
                .iter()
                .map(|statistic| statistic.render(metrics))
                .collect::<Vec<_>>()
                .join("  "),
            None => self.focus.render(metrics),
        }
    }

    /// Every statistic, one per line.
    #[must_use]
    pub fn tooltip(metrics: &Metrics) -> String {
        Statistic::ALL
            .iter()
            .map(|statistic| statistic.render(metrics))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
