use chrono::{DateTime, Duration, Utc};

/// Age thresholds for the freshness classifier, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessWindows {
    pub preferred_hours: i64,
    pub max_hours: i64,
}

impl Default for FreshnessWindows {
    fn default() -> Self {
        Self {
            preferred_hours: 24,
            max_hours: 48,
        }
    }
}

/// Classification of an article's age against the configured windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    VeryFresh,
    Fresh,
    Stale { age_hours: i64 },
    NoDate,
}

impl Freshness {
    /// Classify an optional timestamp against `now`. Pure; the same inputs
    /// always produce the same answer.
    #[must_use]
    pub fn classify(
        published_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        windows: FreshnessWindows,
    ) -> Freshness {
        let Some(ts) = published_at else {
            return Freshness::NoDate;
        };

        // Compare full durations; truncating to whole hours first would let
        // an article aged 48h30m slip inside a 48h window.
        let age = now - ts;
        if age <= Duration::hours(windows.preferred_hours) {
            Freshness::VeryFresh
        } else if age <= Duration::hours(windows.max_hours) {
            Freshness::Fresh
        } else {
            Freshness::Stale {
                age_hours: age.num_hours(),
            }
        }
    }

    #[must_use]
    pub fn is_fresh(&self) -> bool {
        matches!(self, Freshness::VeryFresh | Freshness::Fresh)
    }

    /// Human-readable age label, used in logs and the briefing context lines.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Freshness::VeryFresh => String::from("very fresh"),
            Freshness::Fresh => String::from("fresh"),
            Freshness::Stale { age_hours } => format!("stale ({age_hours}h old)"),
            Freshness::NoDate => String::from("no date"),
        }
    }
}
