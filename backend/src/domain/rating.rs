//! Ratings: one score and/or comment per user and content item.
//!
//! A submission overwrites only the fields it carries. A blank comment is
//! stored as `NULL`, so sending `""` clears an existing comment.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::content::{ContentId, ContentSummary, ExternalContentId};
use super::user::UserId;

/// Lowest accepted score.
pub const SCORE_MIN: i64 = 1;
/// Highest accepted score.
pub const SCORE_MAX: i64 = 5;

/// Validation errors for rating submissions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RatingValidationError {
    #[error("score must be between {min} and {max}", min = SCORE_MIN, max = SCORE_MAX)]
    ScoreOutOfRange { value: i64 },
    #[error("a score or a comment is required")]
    MissingScoreAndComment,
}

/// Star score between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    /// Validate a score.
    ///
    /// # Examples
    /// ```
    /// use reelmark::domain::Score;
    ///
    /// assert_eq!(Score::new(4).map(|s| s.get()), Ok(4));
    /// assert!(Score::new(6).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, RatingValidationError> {
        if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
            return Err(RatingValidationError::ScoreOutOfRange { value });
        }
        u8::try_from(value)
            .map(Self)
            .map_err(|_| RatingValidationError::ScoreOutOfRange { value })
    }

    /// Score as an integer.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Trim a comment and drop it when blank.
#[must_use]
pub fn normalize_comment(raw: Option<String>) -> Option<String> {
    raw.map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Validated rating request for one external content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingSubmission {
    content: ExternalContentId,
    score: Option<Score>,
    comment: Option<Option<String>>,
}

impl RatingSubmission {
    /// Build a submission.
    ///
    /// `comment` is `None` when the field was omitted and `Some(None)` when it
    /// was sent as `null`. At least one of the score or a non-blank comment
    /// must be present.
    pub fn new(
        content: ExternalContentId,
        score: Option<Score>,
        comment: Option<Option<String>>,
    ) -> Result<Self, RatingValidationError> {
        let comment = comment.map(normalize_comment);
        if score.is_none() && !matches!(comment, Some(Some(_))) {
            return Err(RatingValidationError::MissingScoreAndComment);
        }
        Ok(Self {
            content,
            score,
            comment,
        })
    }

    /// External identifier of the rated item.
    #[must_use]
    pub fn content(&self) -> &ExternalContentId {
        &self.content
    }

    /// Supplied score, if any.
    #[must_use]
    pub fn score(&self) -> Option<Score> {
        self.score
    }

    /// Supplied comment; `Some(None)` clears the stored comment.
    #[must_use]
    pub fn comment(&self) -> Option<Option<&str>> {
        self.comment.as_ref().map(Option::as_deref)
    }
}

/// Stored rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub id: Uuid,
    pub user_id: UserId,
    pub content_id: ContentId,
    pub score: Option<Score>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rating {
    /// New rating; unsupplied fields are stored as `NULL`.
    #[must_use]
    pub fn create(
        user_id: UserId,
        content_id: ContentId,
        submission: &RatingSubmission,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            content_id,
            score: submission.score,
            comment: submission.comment.clone().flatten(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the supplied fields and refresh `updated_at`.
    pub fn apply(&mut self, submission: &RatingSubmission, now: DateTime<Utc>) {
        if let Some(score) = submission.score {
            self.score = Some(score);
        }
        if let Some(comment) = &submission.comment {
            self.comment.clone_from(comment);
        }
        self.updated_at = now;
    }
}

/// Result of an upsert, flagging whether a row was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingUpsert {
    pub rating: Rating,
    pub created: bool,
}

impl RatingUpsert {
    /// Client-facing confirmation message.
    #[must_use]
    pub fn message(&self) -> &'static str {
        if self.created {
            "Rating created successfully"
        } else {
            "Rating updated successfully"
        }
    }
}

/// Rating joined with the rated content for listings.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingEntry {
    pub rating: Rating,
    pub content: ContentSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn external() -> ExternalContentId {
        ExternalContentId::new("v1").expect("external id")
    }

    fn score(value: i64) -> Score {
        Score::new(value).expect("score")
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    fn score_rejects_out_of_range(#[case] value: i64) {
        assert_eq!(
            Score::new(value),
            Err(RatingValidationError::ScoreOutOfRange { value })
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(None, Some(None))]
    #[case(None, Some(Some("   ".to_owned())))]
    fn submission_requires_score_or_comment(
        external: ExternalContentId,
        #[case] score_value: Option<Score>,
        #[case] comment: Option<Option<String>>,
    ) {
        assert_eq!(
            RatingSubmission::new(external, score_value, comment),
            Err(RatingValidationError::MissingScoreAndComment)
        );
    }

    #[rstest]
    fn submission_trims_comment(external: ExternalContentId) {
        let submission =
            RatingSubmission::new(external, None, Some(Some("  nice ".to_owned()))).expect("valid");
        assert_eq!(submission.comment(), Some(Some("nice")));
    }

    #[rstest]
    fn blank_comment_with_score_clears_comment(external: ExternalContentId) {
        let now = Utc::now();
        let first = RatingSubmission::new(external.clone(), Some(score(3)), Some(Some("ok".into())))
            .expect("valid");
        let mut rating = Rating::create(UserId::random(), ContentId::random(), &first, now);

        let second =
            RatingSubmission::new(external, Some(score(2)), Some(Some(String::new()))).expect("valid");
        rating.apply(&second, now);

        assert_eq!(rating.comment, None);
        assert_eq!(rating.score, Some(score(2)));
    }

    #[rstest]
    fn apply_keeps_omitted_fields(external: ExternalContentId) {
        let created_at = Utc::now();
        let first = RatingSubmission::new(external.clone(), Some(score(4)), None).expect("valid");
        let mut rating = Rating::create(UserId::random(), ContentId::random(), &first, created_at);
        assert_eq!(rating.comment, None);

        let later = created_at + chrono::Duration::minutes(5);
        let second =
            RatingSubmission::new(external, None, Some(Some("nice".into()))).expect("valid");
        rating.apply(&second, later);

        assert_eq!(rating.score, Some(score(4)));
        assert_eq!(rating.comment.as_deref(), Some("nice"));
        assert_eq!(rating.created_at, created_at);
        assert_eq!(rating.updated_at, later);
    }

    #[rstest]
    #[case(true, "Rating created successfully")]
    #[case(false, "Rating updated successfully")]
    fn upsert_messages_distinguish_outcomes(
        external: ExternalContentId,
        #[case] created: bool,
        #[case] expected: &str,
    ) {
        let submission = RatingSubmission::new(external, Some(score(5)), None).expect("valid");
        let rating = Rating::create(UserId::random(), ContentId::random(), &submission, Utc::now());
        assert_eq!(RatingUpsert { rating, created }.message(), expected);
    }
}
