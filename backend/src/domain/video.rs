//! Video catalogue view model.
//!
//! Provider results are reshaped into [`VideoCard`]s. A blank query or the
//! `popular` sentinel fans out across [`POPULAR_GENRES`].

use url::Url;

/// Genres queried for the popular feed, in display order.
pub const POPULAR_GENRES: [&str; 6] = ["action", "comedy", "drama", "horror", "romance", "documentary"];
/// Results requested per genre for the popular feed.
pub const POPULAR_PAGE_SIZE: u8 = 5;
/// Results requested for a literal search term.
pub const SEARCH_PAGE_SIZE: u8 = 15;
/// Title used when the provider gives nothing usable.
pub const UNTITLED: &str = "untitled";

const POPULAR_SENTINEL: &str = "popular";

/// How a catalogue search is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMode {
    /// Parallel fan-out over [`POPULAR_GENRES`].
    Popular,
    /// One query for a literal term.
    Term(String),
}

impl SearchMode {
    /// Interpret the optional `query` parameter.
    ///
    /// # Examples
    /// ```
    /// use reelmark::domain::SearchMode;
    ///
    /// assert_eq!(SearchMode::from_query(None), SearchMode::Popular);
    /// assert_eq!(SearchMode::from_query(Some(" Popular ")), SearchMode::Popular);
    /// assert_eq!(
    ///     SearchMode::from_query(Some(" comedy ")),
    ///     SearchMode::Term("comedy".to_owned())
    /// );
    /// ```
    #[must_use]
    pub fn from_query(query: Option<&str>) -> Self {
        match query.map(str::trim) {
            None | Some("") => Self::Popular,
            Some(term) if term.eq_ignore_ascii_case(POPULAR_SENTINEL) => Self::Popular,
            Some(term) => Self::Term(term.to_owned()),
        }
    }
}

/// Raw search hit returned by the video provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoHit {
    pub id: u64,
    pub page_url: Option<String>,
    pub image: Option<String>,
    pub video_links: Vec<String>,
}

/// Content card rendered by the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCard {
    pub id: String,
    pub title: String,
    pub genre: String,
    pub year: i32,
    pub poster: Option<String>,
    pub video_url: Option<String>,
}

impl VideoCard {
    /// Reshape a provider hit into a card tagged with `genre`.
    #[must_use]
    pub fn from_hit(hit: VideoHit, genre: &str, year: i32) -> Self {
        let title = hit
            .page_url
            .as_deref()
            .and_then(title_from_page_url)
            .unwrap_or_else(|| UNTITLED.to_owned());
        Self {
            id: hit.id.to_string(),
            title,
            genre: genre.to_owned(),
            year,
            poster: hit.image,
            video_url: hit.video_links.into_iter().next(),
        }
    }
}

/// Derive a readable title from a provider page URL such as
/// `https://www.pexels.com/video/surfer-riding-a-wave-857251/`.
#[must_use]
pub fn title_from_page_url(page_url: &str) -> Option<String> {
    let parsed = Url::parse(page_url).ok()?;
    let slug = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let words: Vec<&str> = slug
        .split('-')
        .filter(|word| !word.is_empty())
        .collect();
    let words = match words.split_last() {
        Some((last, rest)) if last.chars().all(|c| c.is_ascii_digit()) => rest,
        _ => words.as_slice(),
    };
    let joined = words.join(" ");
    let mut chars = joined.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, SearchMode::Popular)]
    #[case(Some(""), SearchMode::Popular)]
    #[case(Some("   "), SearchMode::Popular)]
    #[case(Some("POPULAR"), SearchMode::Popular)]
    #[case(Some("comedy"), SearchMode::Term("comedy".to_owned()))]
    fn search_mode_interprets_query(#[case] query: Option<&str>, #[case] expected: SearchMode) {
        assert_eq!(SearchMode::from_query(query), expected);
    }

    #[rstest]
    #[case("https://www.pexels.com/video/surfer-riding-a-wave-857251/", Some("Surfer riding a wave"))]
    #[case("https://www.pexels.com/video/clouds/", Some("Clouds"))]
    #[case("https://www.pexels.com/video/857251/", None)]
    #[case("not a url", None)]
    fn title_is_derived_from_slug(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(title_from_page_url(url).as_deref(), expected);
    }

    #[rstest]
    fn card_uses_first_link_and_fallback_title() {
        let hit = VideoHit {
            id: 42,
            page_url: None,
            image: Some("https://images.example/42.jpg".into()),
            video_links: vec!["https://video.example/a.mp4".into(), "https://video.example/b.mp4".into()],
        };
        let card = VideoCard::from_hit(hit, "drama", 2026);
        assert_eq!(card.id, "42");
        assert_eq!(card.title, UNTITLED);
        assert_eq!(card.genre, "drama");
        assert_eq!(card.year, 2026);
        assert_eq!(card.video_url.as_deref(), Some("https://video.example/a.mp4"));
    }

    #[rstest]
    fn card_without_files_has_no_video_url() {
        let card = VideoCard::from_hit(VideoHit::default(), "action", 2026);
        assert_eq!(card.video_url, None);
        assert_eq!(card.poster, None);
    }
}
