use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of outing a date is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKind {
    Walk,
    Dinner,
    Movie,
    Trip,
    Anniversary,
    #[default]
    Other,
}

impl DateKind {
    pub const ALL: [DateKind; 6] = [
        DateKind::Walk,
        DateKind::Dinner,
        DateKind::Movie,
        DateKind::Trip,
        DateKind::Anniversary,
        DateKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateKind::Walk => "walk",
            DateKind::Dinner => "dinner",
            DateKind::Movie => "movie",
            DateKind::Trip => "trip",
            DateKind::Anniversary => "anniversary",
            DateKind::Other => "other",
        }
    }
}

impl fmt::Display for DateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown date kind '{s}'"))
    }
}

/// A planned date or outing belonging to a couple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatePlan {
    pub id: Uuid,
    pub couple_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub kind: DateKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DatePlan {
    pub fn new(
        couple_id: Uuid,
        title: String,
        description: Option<String>,
        scheduled_at: DateTime<Utc>,
        kind: DateKind,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            couple_id,
            title,
            description,
            scheduled_at,
            kind,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Filters for listing a couple's dates.
#[derive(Debug, Clone, Default)]
pub struct DateFilter {
    pub kind: Option<DateKind>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateFilter {
    pub fn matches(&self, date: &DatePlan) -> bool {
        self.kind.is_none_or(|k| k == date.kind)
            && self.from.is_none_or(|from| date.scheduled_at >= from)
            && self.to.is_none_or(|to| date.scheduled_at <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in DateKind::ALL {
            assert_eq!(kind.as_str().parse::<DateKind>().unwrap(), kind);
        }
        assert!("picnic".parse::<DateKind>().is_err());
    }

    #[test]
    fn filter_by_kind_and_range() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();
        let date = DatePlan::new(
            Uuid::new_v4(),
            "Tacos".to_string(),
            None,
            at,
            DateKind::Dinner,
        );

        assert!(DateFilter::default().matches(&date));
        assert!(
            DateFilter {
                kind: Some(DateKind::Dinner),
                from: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
                to: Some(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()),
            }
            .matches(&date)
        );
        assert!(
            !DateFilter {
                kind: Some(DateKind::Trip),
                ..Default::default()
            }
            .matches(&date)
        );
        assert!(
            !DateFilter {
                to: Some(Utc.with_ymd_and_hms(2024, 5, 31, 0, 0, 0).unwrap()),
                ..Default::default()
            }
            .matches(&date)
        );
    }
}
