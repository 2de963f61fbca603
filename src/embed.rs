//! Contract with the external embedded player: the URL we hand it, and the
//! state and error codes it reports back.

use serde::Serialize;

const EMBED_BASE: &str = "https://www.youtube.com/embed";

/// Build the embed URL for a video.
///
/// Controls shown, minimal branding, no related videos, inline playback,
/// captions loaded when available.
pub fn build_embed_reference(video_id: &str, autoplay: bool) -> String {
    let params = [
        ("autoplay", if autoplay { "1" } else { "0" }),
        ("controls", "1"),
        ("modestbranding", "1"),
        ("rel", "0"),
        ("enablejsapi", "1"),
        ("playsinline", "1"),
        ("html5", "1"),
        ("fs", "1"),
        ("cc_load_policy", "1"),
    ];
    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{EMBED_BASE}/{video_id}?{query}")
}

/// Playback state reported by the player, for the consumer's status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Unstarted => write!(f, "unstarted"),
            PlayerState::Ended => write!(f, "ended"),
            PlayerState::Playing => write!(f, "playing"),
            PlayerState::Paused => write!(f, "paused"),
            PlayerState::Buffering => write!(f, "buffering"),
            PlayerState::Cued => write!(f, "cued"),
        }
    }
}

impl PlayerState {
    /// Unrecognized codes map to `Unstarted`
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => PlayerState::Ended,
            1 => PlayerState::Playing,
            2 => PlayerState::Paused,
            3 => PlayerState::Buffering,
            5 => PlayerState::Cued,
            _ => PlayerState::Unstarted,
        }
    }
}

/// Error reported by the player. `Display` gives the message shown in place of the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerError {
    InvalidParameter,
    Html5Error,
    VideoNotFound,
    EmbeddingNotAllowed,
    Unknown,
}

impl std::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerError::InvalidParameter => write!(f, "invalid parameter"),
            PlayerError::Html5Error => write!(f, "HTML5 player error"),
            PlayerError::VideoNotFound => write!(f, "video not found"),
            PlayerError::EmbeddingNotAllowed => write!(f, "embedding not allowed"),
            PlayerError::Unknown => write!(f, "unknown player error"),
        }
    }
}

impl PlayerError {
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => PlayerError::InvalidParameter,
            5 => PlayerError::Html5Error,
            100 => PlayerError::VideoNotFound,
            101 | 150 => PlayerError::EmbeddingNotAllowed,
            _ => PlayerError::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_autoplay_on() {
        let url = build_embed_reference("dQw4w9WgXcQ", true);
        assert!(url.starts_with("https://www.youtube.com/embed/dQw4w9WgXcQ?"));
        assert!(url.contains("autoplay=1"));
        assert!(!url.contains("autoplay=0"));
    }

    #[test]
    fn test_embed_autoplay_off() {
        let url = build_embed_reference("dQw4w9WgXcQ", false);
        assert!(url.contains("dQw4w9WgXcQ"));
        assert!(url.contains("autoplay=0"));
    }

    #[test]
    fn test_embed_fixed_params() {
        let url = build_embed_reference("abc", false);
        assert_eq!(
            url,
            "https://www.youtube.com/embed/abc?autoplay=0&controls=1&modestbranding=1&rel=0\
             &enablejsapi=1&playsinline=1&html5=1&fs=1&cc_load_policy=1"
        );
    }

    #[test]
    fn test_player_state_codes() {
        assert_eq!(PlayerState::from_code(-1), PlayerState::Unstarted);
        assert_eq!(PlayerState::from_code(1), PlayerState::Playing);
        assert_eq!(PlayerState::from_code(2), PlayerState::Paused);
        assert_eq!(PlayerState::from_code(3), PlayerState::Buffering);
        assert_eq!(PlayerState::from_code(0), PlayerState::Ended);
        assert_eq!(PlayerState::from_code(42), PlayerState::Unstarted);
    }

    #[test]
    fn test_player_error_codes() {
        assert_eq!(PlayerError::from_code(2), PlayerError::InvalidParameter);
        assert_eq!(PlayerError::from_code(5), PlayerError::Html5Error);
        assert_eq!(PlayerError::from_code(100), PlayerError::VideoNotFound);
        assert_eq!(PlayerError::from_code(101), PlayerError::EmbeddingNotAllowed);
        assert_eq!(PlayerError::from_code(150), PlayerError::EmbeddingNotAllowed);
        assert_eq!(PlayerError::from_code(7), PlayerError::Unknown);
    }

    #[test]
    fn test_player_display() {
        assert_eq!(PlayerState::from_code(3).to_string(), "buffering");
        assert_eq!(PlayerError::from_code(150).to_string(), "embedding not allowed");
    }
}
