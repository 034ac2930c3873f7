use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// OAuth tokens persisted between runs.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry as epoch seconds, the way the Strava token endpoint reports it.
    pub expires_at: i64,
}

impl Credentials {
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0).single()
    }

    pub fn is_expired(&self, now: DateTime<Utc>, margin_secs: i64) -> bool {
        self.expires_at <= now.timestamp() + margin_secs
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Distance goals in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub weekly: f64,
    pub yearly: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityTotal {
    pub period: Period,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Athlete {
    pub id: u64,
}

/// Summary activity as listed by `GET /athlete/activities`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Activity {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Metres.
    #[serde(default)]
    pub distance: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityTotals {
    #[serde(default)]
    pub count: u32,
    /// Metres.
    #[serde(default)]
    pub distance: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AthleteStats {
    #[serde(default)]
    pub ytd_run_totals: Option<ActivityTotals>,
}

/// What extract hands to transform.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivitySnapshot {
    pub week: ActivityTotal,
    pub year: ActivityTotal,
    pub runs_this_week: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub period: Period,
    pub distance_km: f64,
    pub goal_km: f64,
    pub percent: f64,
    pub remaining_km: f64,
    pub achieved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalSummary {
    pub weekly: GoalProgress,
    pub yearly: GoalProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeVariables {
    pub weekly_distance: f64,
    pub weekly_goal: f64,
    pub weekly_percent: f64,
    pub weekly_remaining: f64,
    pub yearly_distance: f64,
    pub yearly_goal: f64,
    pub yearly_percent: f64,
    pub yearly_remaining: f64,
}

/// Body of the TRMNL custom plugin webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrmnlPayload {
    pub merge_variables: MergeVariables,
}

impl From<&GoalSummary> for TrmnlPayload {
    fn from(summary: &GoalSummary) -> Self {
        Self {
            merge_variables: MergeVariables {
                weekly_distance: summary.weekly.distance_km,
                weekly_goal: summary.weekly.goal_km,
                weekly_percent: summary.weekly.percent,
                weekly_remaining: summary.weekly.remaining_km,
                yearly_distance: summary.yearly.distance_km,
                yearly_goal: summary.yearly.goal_km,
                yearly_percent: summary.yearly.percent,
                yearly_remaining: summary.yearly.remaining_km,
            },
        }
    }
}
