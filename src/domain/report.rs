//! Admin dashboard aggregates.

use serde::Serialize;

use super::audit::AuditEntry;
use super::profile::{plan_or_default, EntrepreneurProfile, ExplorerProfile};
use crate::config::{DEFAULT_PLAN, PLAN_LABELS, PREFERENCE_LABELS};

/// Counts over a fixed, ordered label set. Every label is present even when
/// its count is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl Histogram {
    /// Count the values that exactly match one of `labels`; others are dropped.
    pub fn tally<'a>(labels: &[&str], values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = vec![0u64; labels.len()];
        for value in values {
            if let Some(slot) = labels.iter().position(|label| *label == value) {
                counts[slot] += 1;
            }
        }
        Self::from_counts(labels, counts)
    }

    pub fn from_counts(labels: &[&str], values: Vec<u64>) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            values,
        }
    }

    /// Count for `label`, if it is one of the buckets.
    pub fn get(&self, label: &str) -> Option<u64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }
}

/// Entrepreneurs per plan. Plans outside the known set count as the default
/// plan.
pub fn plan_histogram(entrepreneurs: &[EntrepreneurProfile]) -> Histogram {
    Histogram::tally(
        &PLAN_LABELS,
        entrepreneurs.iter().map(|e| {
            let plan = plan_or_default(&e.plan);
            if PLAN_LABELS.contains(&plan) {
                plan
            } else {
                DEFAULT_PLAN
            }
        }),
    )
}

/// Explorers per preference. Unknown preferences are not counted.
pub fn preference_histogram(explorers: &[ExplorerProfile]) -> Histogram {
    Histogram::tally(
        &PREFERENCE_LABELS,
        explorers.iter().map(|e| e.preference.as_str()),
    )
}

/// Data for the roles chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleBreakdown {
    #[serde(rename = "Exploradores")]
    pub explorers: u64,
    #[serde(rename = "Emprendedores")]
    pub entrepreneurs: u64,
}

/// Everything the admin dashboard renders.
#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub total_users: u64,
    /// Users whose role tag is "explorador" in any case, profile or not.
    pub total_explorers: u64,
    pub total_entrepreneurs: u64,
    pub roles: RoleBreakdown,
    pub plans: Histogram,
    pub preferences: Histogram,
    pub actions: Histogram,
    pub entrepreneurs: Vec<EntrepreneurProfile>,
    pub explorers: Vec<ExplorerProfile>,
    /// Newest first.
    pub logs: Vec<AuditEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explorer_with(preference: &str) -> ExplorerProfile {
        ExplorerProfile {
            id: 1,
            user_id: 1,
            first_name: String::new(),
            second_name: String::new(),
            first_surname: String::new(),
            second_surname: String::new(),
            birth_date: None,
            phone: String::new(),
            preference: preference.into(),
        }
    }

    fn entrepreneur_with(plan: &str) -> EntrepreneurProfile {
        EntrepreneurProfile {
            id: 1,
            user_id: 1,
            first_name: String::new(),
            second_name: String::new(),
            first_surname: String::new(),
            second_surname: String::new(),
            birth_date: None,
            phone: String::new(),
            business_name: "x".into(),
            tax_id: "1".into(),
            category: String::new(),
            zone: String::new(),
            location: String::new(),
            plan: plan.into(),
        }
    }

    #[test]
    fn test_empty_input_keeps_all_buckets() {
        let prefs = preference_histogram(&[]);
        assert_eq!(prefs.labels.len(), 6);
        assert!(prefs.values.iter().all(|v| *v == 0));

        let plans = plan_histogram(&[]);
        assert_eq!(plans.labels, PLAN_LABELS.map(String::from).to_vec());
        assert_eq!(plans.values, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_unknown_preferences_dropped() {
        let hist = preference_histogram(&[
            explorer_with("Comida"),
            explorer_with("comida"),
            explorer_with("Deportes"),
            explorer_with("Compras"),
        ]);
        assert_eq!(hist.get("Comida"), Some(1));
        assert_eq!(hist.get("Compras"), Some(1));
        assert_eq!(hist.values.iter().sum::<u64>(), 2);
    }

    #[test]
    fn test_unknown_plans_fold_into_default() {
        let hist = plan_histogram(&[
            entrepreneur_with("Valvanera"),
            entrepreneur_with("Premium"),
            entrepreneur_with(""),
            entrepreneur_with("Sin Plan"),
        ]);
        assert_eq!(hist.get("Sin Plan"), Some(3));
        assert_eq!(hist.get("Valvanera"), Some(1));
        assert_eq!(hist.get("Diosa chia"), Some(0));
    }

    #[test]
    fn test_get_unknown_label() {
        let hist = Histogram::tally(&["a"], ["a", "a"]);
        assert_eq!(hist.get("a"), Some(2));
        assert_eq!(hist.get("b"), None);
    }
}
