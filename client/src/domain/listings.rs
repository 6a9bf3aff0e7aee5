//! Read-only records shown on the dashboards.
//!
//! The field layout mirrors what the remote collaborator returns
//! (camelCase JSON). Content is opaque to the core; only the derived helpers
//! below interpret it.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A coding challenge a candidate can take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Collaborator-assigned identifier.
    pub id: u64,
    /// Headline shown on the card.
    pub title: String,
    /// One-paragraph brief.
    pub description: String,
    /// Minutes allowed to finish.
    pub time_limit: u32,
    /// Raw difficulty label; see [`Project::difficulty_level`].
    pub difficulty: String,
    /// Technology tags.
    pub tags: Vec<String>,
    /// Typical score for a finished attempt.
    pub estimated_score: u32,
    /// How many candidates have finished it.
    pub completions: u32,
}

impl Project {
    /// Classified difficulty; the raw string is left untouched.
    #[must_use]
    pub fn difficulty_level(&self) -> Difficulty {
        Difficulty::classify(&self.difficulty)
    }
}

/// Known difficulty bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Entry level.
    Beginner,
    /// Some experience expected.
    Intermediate,
    /// Senior level.
    Advanced,
    /// Hardest band.
    Expert,
    /// Anything the collaborator sends that is not a known band.
    Unrated,
}

impl Difficulty {
    /// Case-insensitive classification of a difficulty label.
    ///
    /// # Examples
    /// ```
    /// use echelon::domain::Difficulty;
    ///
    /// assert_eq!(Difficulty::classify("EXPERT"), Difficulty::Expert);
    /// assert_eq!(Difficulty::classify("legendary"), Difficulty::Unrated);
    /// ```
    #[must_use]
    pub fn classify(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "beginner" => Self::Beginner,
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            "expert" => Self::Expert,
            _ => Self::Unrated,
        }
    }
}

/// A candidate's evaluated attempt at a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Collaborator-assigned identifier.
    pub id: u64,
    /// Title of the project that was attempted.
    pub project_title: String,
    /// Calendar date, serialised as `YYYY-MM-DD`.
    ///
    /// Accepts a plain date or a full ISO 8601 date-time; only the date part
    /// is kept.
    #[serde(deserialize_with = "submission_date")]
    pub submitted_at: NaiveDate,
    /// Evaluated score out of 100.
    pub score: u32,
    /// Evaluation status label.
    pub status: String,
    /// Percentile band, e.g. `12th percentile`.
    pub rank: String,
    /// Reviewer comment.
    pub feedback: String,
}

/// Parse a submission timestamp into its calendar date.
///
/// An explicit offset keeps the date as written in that offset.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use echelon::domain::parse_submission_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15);
/// assert_eq!(parse_submission_date("2024-01-15"), date);
/// assert_eq!(parse_submission_date("2024-01-15T10:30:00Z"), date);
/// assert_eq!(parse_submission_date("last week"), None);
/// ```
#[must_use]
pub fn parse_submission_date(value: &str) -> Option<NaiveDate> {
    let raw = value.trim();
    raw.parse::<NaiveDate>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|at| at.date_naive()))
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|at| at.date()))
}

fn submission_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_submission_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "`{raw}` is neither a calendar date nor an ISO 8601 date-time"
        ))
    })
}

/// A ranked candidate shown to companies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Collaborator-assigned identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Overall score out of 100.
    pub score: u32,
    /// Number of completed projects.
    pub projects: u32,
    /// Headline skills.
    pub skills: Vec<String>,
    /// Ranking band, e.g. `Top 5%`.
    pub rank: String,
    /// Years of experience as written by the candidate.
    pub experience: String,
    /// Free-form location.
    pub location: String,
}

impl Candidate {
    /// First letter of each whitespace-separated part of the name.
    ///
    /// # Examples
    /// ```
    /// # use echelon::domain::Candidate;
    /// let candidate = Candidate {
    ///     id: 1,
    ///     name: "Sarah Chen".into(),
    ///     email: "sarah.chen@email.com".into(),
    ///     score: 96,
    ///     projects: 5,
    ///     skills: vec![],
    ///     rank: "Top 5%".into(),
    ///     experience: "5 years".into(),
    ///     location: "San Francisco, CA".into(),
    /// };
    /// assert_eq!(candidate.initials(), "SC");
    /// ```
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

/// Rounded mean of submission scores; `0` for an empty slice.
///
/// Rounds half up using integer arithmetic, so `[94, 87]` yields `91`.
///
/// # Examples
/// ```
/// use echelon::domain::average_score;
///
/// assert_eq!(average_score(&[]), 0);
/// ```
#[must_use]
pub fn average_score(submissions: &[Submission]) -> u32 {
    let count = u64::try_from(submissions.len()).unwrap_or(u64::MAX);
    let sum: u64 = submissions.iter().map(|s| u64::from(s.score)).sum();
    (2 * sum + count)
        .checked_div(2 * count)
        .map_or(0, |rounded| u32::try_from(rounded).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn submission(score: u32) -> Submission {
        Submission {
            id: u64::from(score),
            project_title: "Real-time Trading Dashboard".to_owned(),
            submitted_at: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
            score,
            status: "evaluated".to_owned(),
            rank: "12th percentile".to_owned(),
            feedback: "Clean architecture".to_owned(),
        }
    }

    #[rstest]
    #[case(&[], 0)]
    #[case(&[94, 87], 91)]
    #[case(&[90, 91], 91)]
    #[case(&[90, 90, 91], 90)]
    #[case(&[100], 100)]
    #[case(&[0, 1], 1)]
    fn average_rounds_half_up(#[case] scores: &[u32], #[case] expected: u32) {
        let submissions: Vec<_> = scores.iter().copied().map(submission).collect();
        assert_eq!(average_score(&submissions), expected);
    }

    #[rstest]
    #[case("Beginner", Difficulty::Beginner)]
    #[case("intermediate", Difficulty::Intermediate)]
    #[case(" Advanced ", Difficulty::Advanced)]
    #[case("Expert", Difficulty::Expert)]
    #[case("", Difficulty::Unrated)]
    fn difficulty_labels_classify(#[case] label: &str, #[case] expected: Difficulty) {
        assert_eq!(Difficulty::classify(label), expected);
    }

    #[rstest]
    fn submission_dates_use_iso_calendar_form() {
        let value = serde_json::to_value(submission(94)).expect("serialise");
        assert_eq!(value["submittedAt"], "2024-01-15");
        assert_eq!(value["projectTitle"], "Real-time Trading Dashboard");
    }

    #[rstest]
    #[case("2024-01-15")]
    #[case("2024-01-15T10:30:00Z")]
    #[case("2024-01-15T23:30:00-05:00")]
    #[case("2024-01-15T10:30:00.123+02:00")]
    #[case("2024-01-15T10:30:00")]
    fn submission_dates_accept_date_and_date_time(#[case] submitted_at: &str) {
        let record = serde_json::json!({
            "id": 94,
            "projectTitle": "Real-time Trading Dashboard",
            "submittedAt": submitted_at,
            "score": 94,
            "status": "evaluated",
            "rank": "12th percentile",
            "feedback": "Clean architecture",
        });

        let parsed: Submission = serde_json::from_value(record).expect("decode");

        assert_eq!(parsed, submission(94));
    }

    #[rstest]
    #[case("15/01/2024")]
    #[case("2024-13-01")]
    #[case("")]
    fn unreadable_submission_dates_are_rejected(#[case] submitted_at: &str) {
        let record = serde_json::json!({
            "id": 94,
            "projectTitle": "Real-time Trading Dashboard",
            "submittedAt": submitted_at,
            "score": 94,
            "status": "evaluated",
            "rank": "12th percentile",
            "feedback": "Clean architecture",
        });

        let err = serde_json::from_value::<Submission>(record).expect_err("bad date");

        assert!(err.to_string().contains("neither a calendar date"), "{err}");
    }

    #[rstest]
    #[case("Sarah Chen", "SC")]
    #[case("Marcus  Rodriguez", "MR")]
    #[case("Aisha", "A")]
    #[case("", "")]
    fn initials_skip_repeated_whitespace(#[case] name: &str, #[case] expected: &str) {
        let candidate = Candidate {
            id: 1,
            name: name.to_owned(),
            email: "c@email.com".to_owned(),
            score: 90,
            projects: 1,
            skills: Vec::new(),
            rank: "Top 10%".to_owned(),
            experience: "1 year".to_owned(),
            location: "Remote".to_owned(),
        };
        assert_eq!(candidate.initials(), expected);
    }
}
