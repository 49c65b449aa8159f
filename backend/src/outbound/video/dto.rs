//! Wire types for the Pexels video search API.

use serde::Deserialize;

use crate::domain::VideoHit;

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponseDto {
    #[serde(default)]
    pub(super) videos: Vec<VideoDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct VideoDto {
    pub(super) id: u64,
    pub(super) url: Option<String>,
    pub(super) image: Option<String>,
    #[serde(default)]
    pub(super) video_files: Vec<VideoFileDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct VideoFileDto {
    pub(super) link: Option<String>,
}

impl SearchResponseDto {
    pub(super) fn into_hits(self) -> Vec<VideoHit> {
        self.videos.into_iter().map(VideoDto::into_hit).collect()
    }
}

impl VideoDto {
    fn into_hit(self) -> VideoHit {
        VideoHit {
            id: self.id,
            page_url: self.url,
            image: self.image,
            video_links: self
                .video_files
                .into_iter()
                .filter_map(|file| file.link)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn maps_videos_and_skips_linkless_files() {
        let body = r#"{
            "page": 1,
            "per_page": 2,
            "videos": [
                {
                    "id": 42,
                    "url": "https://www.pexels.com/video/ocean-waves-42/",
                    "image": "https://images.example/42.jpg",
                    "video_files": [{"link": null}, {"link": "https://videos.example/42.mp4"}]
                },
                {"id": 7}
            ]
        }"#;
        let hits = serde_json::from_str::<SearchResponseDto>(body)
            .expect("payload")
            .into_hits();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 42);
        assert_eq!(hits[0].video_links, vec!["https://videos.example/42.mp4".to_owned()]);
        assert_eq!(hits[1], VideoHit { id: 7, ..VideoHit::default() });
    }

    #[rstest]
    fn missing_videos_field_is_empty() {
        let parsed: SearchResponseDto = serde_json::from_str("{}").expect("payload");
        assert!(parsed.into_hits().is_empty());
    }
}
