//! Option sets understood by the Gravatar avatar endpoint.
//!
//! Both enums carry an explicit variant → code table. The code is what goes
//! on the wire (`r=` and `d=` query parameters) and what config files and the
//! CLI accept.
//!
//! | Rating | Code |   | Default image | Code |
//! |--------|------|---|---------------|------|
//! | `G`    | `g`  |   | `Default`     | *(empty)* |
//! | `Pg`   | `pg` |   | `Http404`     | `404` |
//! | `R`    | `r`  |   | `MysteryMan`  | `mm` |
//! | `X`    | `x`  |   | `Identicon`   | `identicon` |
//! |        |      |   | `MonsterId`   | `monsterid` |
//! |        |      |   | `Wavatar`     | `wavatar` |
//! |        |      |   | `Retro`       | `retro` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseOptionError {
    #[error("unknown rating '{0}' (expected one of: g, pg, r, x)")]
    Rating(String),
    #[error(
        "unknown default image '{0}' (expected one of: default, 404, mm, identicon, monsterid, wavatar, retro)"
    )]
    DefaultImage(String),
}

/// Maximum content rating to request.
///
/// Gravatar users self-rate their images. Only `G` images are served unless
/// a higher rating is requested; a rating includes everything below it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rating {
    /// Suitable for display on all websites with any audience type.
    #[default]
    G,
    /// May contain rude gestures, provocatively dressed individuals, the
    /// lesser swear words, or mild violence.
    Pg,
    /// May contain harsh profanity, intense violence, nudity, or hard drug use.
    R,
    /// May contain hardcore sexual imagery or extremely disturbing violence.
    X,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::G, Rating::Pg, Rating::R, Rating::X];

    /// Short code sent as the `r=` parameter.
    pub fn code(self) -> &'static str {
        match self {
            Rating::G => "g",
            Rating::Pg => "pg",
            Rating::R => "r",
            Rating::X => "x",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Rating {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rating::ALL
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOptionError::Rating(s.to_string()))
    }
}

impl TryFrom<String> for Rating {
    type Error = ParseOptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rating> for String {
    fn from(value: Rating) -> Self {
        value.code().to_string()
    }
}

/// Built-in fallback image served when no avatar is registered for a hash.
///
/// Most of these generate a themed image unique to the email hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DefaultImage {
    /// The Gravatar logo.
    #[default]
    Default,
    /// Return an HTTP 404 instead of an image.
    Http404,
    /// A cartoon-style silhouette (does not vary by hash).
    MysteryMan,
    /// A geometric pattern.
    Identicon,
    /// A generated monster with varying colors and faces.
    MonsterId,
    /// Generated faces with differing features and backgrounds.
    Wavatar,
    /// 8-bit arcade-style pixelated faces.
    Retro,
}

impl DefaultImage {
    pub const ALL: [DefaultImage; 7] = [
        DefaultImage::Default,
        DefaultImage::Http404,
        DefaultImage::MysteryMan,
        DefaultImage::Identicon,
        DefaultImage::MonsterId,
        DefaultImage::Wavatar,
        DefaultImage::Retro,
    ];

    /// Short code sent as the `d=` parameter. Empty for [`DefaultImage::Default`].
    pub fn code(self) -> &'static str {
        match self {
            DefaultImage::Default => "",
            DefaultImage::Http404 => "404",
            DefaultImage::MysteryMan => "mm",
            DefaultImage::Identicon => "identicon",
            DefaultImage::MonsterId => "monsterid",
            DefaultImage::Wavatar => "wavatar",
            DefaultImage::Retro => "retro",
        }
    }
}

impl fmt::Display for DefaultImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DefaultImage {
    type Err = ParseOptionError;

    /// Accepts the wire code, or `"default"` for the empty code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("default") {
            return Ok(DefaultImage::Default);
        }
        DefaultImage::ALL
            .into_iter()
            .find(|d| d.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOptionError::DefaultImage(s.to_string()))
    }
}

impl TryFrom<String> for DefaultImage {
    type Error = ParseOptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DefaultImage> for String {
    fn from(value: DefaultImage) -> Self {
        value.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_codes() {
        let codes: Vec<_> = Rating::ALL.iter().map(|r| r.code()).collect();
        assert_eq!(codes, ["g", "pg", "r", "x"]);
    }

    #[test]
    fn rating_default_is_g() {
        assert_eq!(Rating::default(), Rating::G);
    }

    #[test]
    fn rating_parses_case_insensitively() {
        assert_eq!("PG".parse::<Rating>().unwrap(), Rating::Pg);
        assert_eq!("x".parse::<Rating>().unwrap(), Rating::X);
    }

    #[test]
    fn rating_rejects_unknown() {
        let err = "nc17".parse::<Rating>().unwrap_err();
        assert_eq!(err, ParseOptionError::Rating("nc17".into()));
        assert!(err.to_string().contains("nc17"));
    }

    #[test]
    fn default_image_codes() {
        let codes: Vec<_> = DefaultImage::ALL.iter().map(|d| d.code()).collect();
        assert_eq!(
            codes,
            ["", "404", "mm", "identicon", "monsterid", "wavatar", "retro"]
        );
    }

    #[test]
    fn default_image_display_matches_code() {
        assert_eq!(DefaultImage::MysteryMan.to_string(), "mm");
        assert_eq!(DefaultImage::Default.to_string(), "");
    }

    #[test]
    fn default_image_parses_codes_and_default_alias() {
        assert_eq!("404".parse::<DefaultImage>().unwrap(), DefaultImage::Http404);
        assert_eq!(
            "Identicon".parse::<DefaultImage>().unwrap(),
            DefaultImage::Identicon
        );
        assert_eq!("default".parse::<DefaultImage>().unwrap(), DefaultImage::Default);
        assert_eq!("".parse::<DefaultImage>().unwrap(), DefaultImage::Default);
    }

    #[test]
    fn default_image_rejects_unknown() {
        assert!(matches!(
            "robohash".parse::<DefaultImage>(),
            Err(ParseOptionError::DefaultImage(_))
        ));
    }

    #[test]
    fn options_serialize_as_codes() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            rating: Rating,
            default_image: DefaultImage,
        }

        let toml = toml::to_string(&Wrapper {
            rating: Rating::Pg,
            default_image: DefaultImage::Retro,
        })
        .unwrap();
        assert!(toml.contains(r#"rating = "pg""#));
        assert!(toml.contains(r#"default_image = "retro""#));

        let back: Wrapper = toml::from_str(&toml).unwrap();
        assert_eq!(back.rating, Rating::Pg);
        assert_eq!(back.default_image, DefaultImage::Retro);
    }
}
