//! Scoring and trend reporting over a shooter's session history.
//!
//! Everything here is pure. Session slices are expected oldest first.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Exercise, PracticeSession, PracticeType, UnknownTag};

/// Fewer sessions than this yields [`Trend::InsufficientData`].
pub const MIN_TREND_SESSIONS: usize = 3;
/// Only the most recent sessions take part in the trend.
pub const TREND_WINDOW: usize = 5;
/// Half-average difference, on the metric's own scale, that counts as movement.
pub const TREND_THRESHOLD: f64 = 5.0;

pub const LOW_ACCURACY: f64 = 70.0;
pub const LOW_CONSISTENCY: f64 = 60.0;
pub const EXPERT_ACCURACY: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Ascending,
    Descending,
    Stable,
    InsufficientData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Accuracy,
    Score,
    Consistency,
}

impl std::str::FromStr for Metric {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "accuracy" => Ok(Metric::Accuracy),
            "score" => Ok(Metric::Score),
            "consistency" => Ok(Metric::Consistency),
            other => Err(UnknownTag {
                kind: "metric",
                value: other.to_string(),
            }),
        }
    }
}

/// `(new - old) / old * 100`, or 0 when there is no baseline.
pub fn improvement_percentage(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return 0.0;
    }
    (new - old) / old * 100.0
}

/// Hit rate in percent. `None` when nothing was fired.
pub fn accuracy(hits: i64, shots: i64) -> Option<f64> {
    (shots > 0).then(|| hits as f64 * 100.0 / shots as f64)
}

pub fn score_percentage(score: i64, max_score: i64) -> Option<f64> {
    (max_score > 0).then(|| score as f64 * 100.0 / max_score as f64)
}

/// `100 - population standard deviation`, clamped to `0..=100`.
pub fn consistency(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((100.0 - variance.sqrt()).clamp(0.0, 100.0))
}

/// Aggregate scores of one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionScore {
    pub session_id: Uuid,
    pub session_date: DateTime<Utc>,
    pub practice_type: PracticeType,
    pub shots_fired: i64,
    pub hits: i64,
    pub accuracy: Option<f64>,
    pub score_percentage: Option<f64>,
    pub consistency: Option<f64>,
}

impl SessionScore {
    pub fn from_exercises(session: &PracticeSession, exercises: &[Exercise]) -> Self {
        let shots_fired: i64 = exercises.iter().map(|e| i64::from(e.shots_fired)).sum();
        let hits: i64 = exercises.iter().map(|e| i64::from(e.hits)).sum();
        let score: i64 = exercises.iter().map(|e| i64::from(e.score)).sum();
        let max_score: i64 = exercises.iter().map(|e| i64::from(e.max_score)).sum();

        let per_exercise: Vec<f64> = exercises
            .iter()
            .filter_map(|e| accuracy(i64::from(e.hits), i64::from(e.shots_fired)))
            .collect();

        SessionScore {
            session_id: session.id,
            session_date: session.session_date,
            practice_type: session.practice_type,
            shots_fired,
            hits,
            accuracy: accuracy(hits, shots_fired),
            score_percentage: score_percentage(score, max_score),
            consistency: consistency(&per_exercise),
        }
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Accuracy => self.accuracy,
            Metric::Score => self.score_percentage,
            Metric::Consistency => self.consistency,
        }
    }
}

/// Classify the direction of the most recent values. Missing values count as 0.
pub fn trend_from_values(values: &[Option<f64>]) -> Trend {
    if values.len() < MIN_TREND_SESSIONS {
        return Trend::InsufficientData;
    }

    let window = &values[values.len().saturating_sub(TREND_WINDOW)..];
    let (first, second) = window.split_at(window.len() / 2);

    let average = |half: &[Option<f64>]| {
        half.iter().map(|v| v.unwrap_or(0.0)).sum::<f64>() / half.len() as f64
    };
    let delta = average(second) - average(first);

    if delta > TREND_THRESHOLD {
        Trend::Ascending
    } else if delta < -TREND_THRESHOLD {
        Trend::Descending
    } else {
        Trend::Stable
    }
}

pub fn performance_trend(sessions: &[SessionScore], metric: Metric) -> Trend {
    let values: Vec<Option<f64>> = sessions.iter().map(|s| s.metric(metric)).collect();
    trend_from_values(&values)
}

/// Advice for the given accuracy and consistency, in fixed rule order.
pub fn recommendations(accuracy: f64, consistency: f64) -> Vec<&'static str> {
    let mut tips = Vec::new();

    if accuracy < LOW_ACCURACY {
        tips.push("Go back to fundamentals: check stance, grip and sight alignment on every shot.");
        tips.push("Add dry-fire sessions to build a smooth, surprise trigger break.");
    }
    if consistency < LOW_CONSISTENCY {
        tips.push("Build a repeatable pre-shot routine and use it for every string.");
        tips.push("Shoot slower strings and track group size from session to session.");
    }
    if accuracy >= EXPERT_ACCURACY {
        tips.push("Increase distance or shrink the target to keep progressing.");
        tips.push("Add timed drills or competition stages to train under pressure.");
    }

    tips
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub session_count: usize,
    pub total_shots: i64,
    pub total_hits: i64,
    pub overall_accuracy: Option<f64>,
    pub average_consistency: Option<f64>,
    pub accuracy_trend: Trend,
    pub score_trend: Trend,
    pub improvement_percentage: f64,
    pub recommendations: Vec<&'static str>,
}

pub fn summarize(sessions: &[SessionScore]) -> StatsSummary {
    let total_shots: i64 = sessions.iter().map(|s| s.shots_fired).sum();
    let total_hits: i64 = sessions.iter().map(|s| s.hits).sum();
    let overall_accuracy = accuracy(total_hits, total_shots);

    let consistencies: Vec<f64> = sessions.iter().filter_map(|s| s.consistency).collect();
    let average_consistency = (!consistencies.is_empty())
        .then(|| consistencies.iter().sum::<f64>() / consistencies.len() as f64);

    let mut measured = sessions.iter().filter_map(|s| s.accuracy);
    let first = measured.next();
    let last = measured.last();
    let improvement = match (first, last) {
        (Some(old), Some(new)) => improvement_percentage(old, new),
        _ => 0.0,
    };

    let recommendations = match (overall_accuracy, average_consistency) {
        (Some(acc), Some(cons)) => recommendations(acc, cons),
        _ => Vec::new(),
    };

    StatsSummary {
        session_count: sessions.len(),
        total_shots,
        total_hits,
        overall_accuracy: overall_accuracy.map(round2),
        average_consistency: average_consistency.map(round2),
        accuracy_trend: performance_trend(sessions, Metric::Accuracy),
        score_trend: performance_trend(sessions, Metric::Score),
        improvement_percentage: round2(improvement),
        recommendations,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
