use crate::DashboardStats;

/// Which dashboard number a card shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKey {
    TotalSurveys,
    ActiveSurveys,
    TotalResponses,
    CompletionRate,
}

/// Static description of a dashboard card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub key: MetricKey,
    pub label: &'static str,
    pub icon: &'static str,
}

/// The dashboard cards in display order. Read-only; see [`metric_cards`].
pub const METRIC_DESCRIPTORS: [MetricDescriptor; 4] = [
    MetricDescriptor {
        key: MetricKey::TotalSurveys,
        label: "Total Surveys",
        icon: "clipboard",
    },
    MetricDescriptor {
        key: MetricKey::ActiveSurveys,
        label: "Active Surveys",
        icon: "activity",
    },
    MetricDescriptor {
        key: MetricKey::TotalResponses,
        label: "Total Responses",
        icon: "inbox",
    },
    MetricDescriptor {
        key: MetricKey::CompletionRate,
        label: "Completion Rate",
        icon: "check-circle",
    },
];

/// A dashboard card ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricCard {
    pub key: MetricKey,
    pub label: &'static str,
    pub icon: &'static str,
    pub value: String,
}

impl MetricDescriptor {
    /// Format this descriptor's number out of `stats`.
    pub fn format_value(&self, stats: &DashboardStats) -> String {
        match self.key {
            MetricKey::TotalSurveys => stats.total_surveys.to_string(),
            MetricKey::ActiveSurveys => stats.active_surveys.to_string(),
            MetricKey::TotalResponses => stats.total_responses.to_string(),
            MetricKey::CompletionRate => format!("{:.1}%", stats.completion_rate),
        }
    }
}

/// Derive a fresh set of cards from the descriptor table.
pub fn metric_cards(stats: &DashboardStats) -> Vec<MetricCard> {
    METRIC_DESCRIPTORS
        .iter()
        .map(|descriptor| MetricCard {
            key: descriptor.key,
            label: descriptor.label,
            icon: descriptor.icon,
            value: descriptor.format_value(stats),
        })
        .collect()
}
