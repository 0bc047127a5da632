//! Page routing.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Search,
    HowItWorks,
    Privacy,
}

impl Page {
    pub const ALL: [Self; 3] = [Self::Search, Self::HowItWorks, Self::Privacy];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Search => "/",
            Self::HowItWorks => "/how-it-works",
            Self::Privacy => "/privacy",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::HowItWorks => "How it works",
            Self::Privacy => "Privacy",
        }
    }

    /// Unknown paths land on the search page.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|page| page.path() == path)
            .unwrap_or(Self::Search)
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|page| *page == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
