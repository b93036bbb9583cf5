use std::fmt::{Display, Formatter};

/// How stale the reference round is relative to the as-of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalenessRisk {
    Low,
    Medium,
    High,
}

impl StalenessRisk {
    pub const fn from_days(days_since_last_round: i64) -> Self {
        if days_since_last_round > 365 {
            Self::High
        } else if days_since_last_round > 180 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH - last round >12 months ago",
            Self::Medium => "MEDIUM - last round >6 months ago",
            Self::Low => "LOW - last round within 6 months",
        }
    }
}

impl Display for StalenessRisk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Breadth of the resolved comparable peer group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerSetQuality {
    Low,
    Medium,
    High,
}

impl PeerSetQuality {
    pub const fn from_count(peer_count: usize) -> Self {
        if peer_count < 3 {
            Self::Low
        } else if peer_count < 5 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW - fewer than 3 comparable companies",
            Self::Medium => "MEDIUM - 3-4 comparable companies",
            Self::High => "HIGH - 5+ comparable companies",
        }
    }
}

impl Display for PeerSetQuality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
