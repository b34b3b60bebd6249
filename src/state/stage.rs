use std::fmt;

/// Step of the per-URL crawl state machine
///
/// Stages run in declaration order. A URL leaves the machine early at
/// `CheckFresh` (skipped) or `Fetch` (failed); otherwise it passes `Store`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CrawlStage {
    CheckFresh,
    Fetch,
    Extract,
    Store,
}

impl CrawlStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckFresh => "check_fresh",
            Self::Fetch => "fetch",
            Self::Extract => "extract",
            Self::Store => "store",
        }
    }

    /// The stage that follows this one, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::CheckFresh => Some(Self::Fetch),
            Self::Fetch => Some(Self::Extract),
            Self::Extract => Some(Self::Store),
            Self::Store => None,
        }
    }
}

impl fmt::Display for CrawlStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
