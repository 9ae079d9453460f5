//! Fluent Gravatar `<img>` builder.
//!
//! ```
//! use gravatar_img::{DefaultImage, GravatarImage, Rating};
//!
//! let markup = GravatarImage::new(false)
//!     .email_address("test@example.com")
//!     .size(80)
//!     .rating(Rating::G)
//!     .default_image(DefaultImage::Identicon)
//!     .render()
//!     .unwrap();
//!
//! assert_eq!(
//!     markup.into_string(),
//!     r#"<img src="http://www.gravatar.com/avatar/55502f40dc8b7c769880b10874abc9d0?s=80&d=identicon&r=g" class="gravatar" alt="Gravatar image" />"#
//! );
//! ```
//!
//! ## URL shape
//!
//! ```text
//! {scheme}://{subdomain}.gravatar.com/avatar/{md5}?s={size}&d={default}[&f=y]&r={rating}
//! ```
//!
//! - Secure context or forced secure: `https://secure.gravatar.com`, otherwise
//!   `http://www.gravatar.com`.
//! - `d=` is the custom default image URL when one is set, otherwise the
//!   [`DefaultImage`] code (empty for the Gravatar logo).
//! - `&f=y` only when the default image is forced.
//!
//! Setters are order-independent and rendering is a pure function of the
//! accumulated fields, so the same builder renders the same markup every time.

use crate::config::AvatarConfig;
use crate::hash::email_hash;
use crate::options::{DefaultImage, Rating};
use crate::tag::ImgTag;
use maud::{Markup, Render};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvatarError {
    #[error("{0} is required")]
    MissingRequiredField(&'static str),
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

/// Source of the "is the current request served over TLS" signal.
///
/// Web frameworks implement this for their request type so the builder can be
/// created straight from the request; tests and templates can pass a `bool`.
pub trait SecureContext {
    fn is_secure(&self) -> bool;
}

impl SecureContext for bool {
    fn is_secure(&self) -> bool {
        *self
    }
}

/// Accumulated configuration for one avatar `<img>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravatarImage {
    email_address: Option<String>,
    size: u32,
    rating: Rating,
    default_image: DefaultImage,
    default_image_url: Option<String>,
    force_default_image: bool,
    force_secure_request: bool,
    is_secure_context: bool,
    tooltip: Option<String>,
}

impl GravatarImage {
    /// Start a builder. `is_secure_context` reflects whether the page that
    /// will embed the image is itself served over HTTPS.
    pub fn new(is_secure_context: bool) -> Self {
        Self {
            email_address: None,
            size: 0,
            rating: Rating::G,
            default_image: DefaultImage::Default,
            default_image_url: None,
            force_default_image: false,
            force_secure_request: false,
            is_secure_context,
            tooltip: None,
        }
    }

    pub fn for_context(context: &impl SecureContext) -> Self {
        Self::new(context.is_secure())
    }

    /// Seed a builder with site-wide defaults from [`AvatarConfig`].
    ///
    /// A configured default image URL is stored raw, or percent-encoded when
    /// `encode_default_image_url` is set.
    pub fn from_config(config: &AvatarConfig, is_secure_context: bool) -> Self {
        let builder = Self::new(is_secure_context)
            .size(config.size)
            .rating(config.rating)
            .default_image(config.default_image)
            .force_default_image(config.force_default_image)
            .force_secure_request(config.force_secure_request);
        match config.default_image_url.as_deref() {
            Some(url) if config.encode_default_image_url => builder.encoded_default_image_url(url),
            Some(url) => builder.default_image_url(url),
            None => builder,
        }
    }

    /// The address to hash. Stored verbatim: no trimming, no lower-casing.
    pub fn email_address(mut self, email: impl Into<String>) -> Self {
        self.email_address = Some(email.into());
        self
    }

    /// Square dimension in pixels. Not range-checked; left unset it is
    /// sent as `s=0`.
    pub fn size(mut self, pixels: u32) -> Self {
        self.size = pixels;
        self
    }

    pub fn rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    pub fn default_image(mut self, policy: DefaultImage) -> Self {
        self.default_image = policy;
        self
    }

    /// Custom fallback image, stored as given. Takes precedence over
    /// [`default_image`](Self::default_image) when non-empty.
    pub fn default_image_url(mut self, url: impl Into<String>) -> Self {
        self.default_image_url = Some(url.into());
        self
    }

    /// Percent-encode the stored default image URL in place.
    ///
    /// `false` leaves the builder untouched. With `true`, fails if no
    /// default image URL has been set yet.
    pub fn encode_default_image_url(mut self, should_encode: bool) -> Result<Self, AvatarError> {
        if !should_encode {
            return Ok(self);
        }
        let encoded = match self.default_image_url.as_deref() {
            Some(url) if !url.is_empty() => percent_encode(url),
            _ => {
                return Err(AvatarError::InvalidState(
                    "default image URL must be set before it can be encoded",
                ));
            }
        };
        self.default_image_url = Some(encoded);
        Ok(self)
    }

    /// Percent-encode `url` and store it as the default image URL.
    /// An empty `url` is ignored.
    pub fn encoded_default_image_url(mut self, url: &str) -> Self {
        if !url.is_empty() {
            self.default_image_url = Some(percent_encode(url));
        }
        self
    }

    pub fn force_default_image(mut self, force: bool) -> Self {
        self.force_default_image = force;
        self
    }

    /// Use the HTTPS endpoint even when the page itself is not secure.
    pub fn force_secure_request(mut self, force: bool) -> Self {
        self.force_secure_request = force;
        self
    }

    /// Rendered as the `title` attribute.
    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    fn is_secure(&self) -> bool {
        self.is_secure_context || self.force_secure_request
    }

    fn required_email(&self) -> Result<&str, AvatarError> {
        match self.email_address.as_deref() {
            Some(email) if !email.is_empty() => Ok(email),
            _ => Err(AvatarError::MissingRequiredField("email address")),
        }
    }

    /// The avatar URL that ends up in the `src` attribute.
    pub fn url(&self) -> Result<String, AvatarError> {
        let email = self.required_email()?;
        let (scheme, subdomain) = if self.is_secure() {
            ("https", "secure")
        } else {
            ("http", "www")
        };
        let default_param = match self.default_image_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => self.default_image.code(),
        };
        let force = if self.force_default_image { "&f=y" } else { "" };

        Ok(format!(
            "{scheme}://{subdomain}.gravatar.com/avatar/{hash}?s={size}&d={default_param}{force}&r={rating}",
            hash = email_hash(email),
            size = self.size,
            rating = self.rating.code(),
        ))
    }

    /// Build the `<img>` element.
    pub fn render(&self) -> Result<Markup, AvatarError> {
        let url = self.url()?;
        debug!(
            secure = self.is_secure(),
            size = self.size,
            rating = %self.rating,
            forced = self.force_default_image,
            "rendering gravatar image"
        );

        let mut tag = ImgTag::new()
            .attr("src", url)
            .attr("class", "gravatar")
            .attr("alt", "Gravatar image");
        if let Some(tooltip) = &self.tooltip {
            tag = tag.attr("title", tooltip.as_str());
        }
        Ok(tag.render())
    }

    /// [`render`](Self::render) as a plain string.
    pub fn to_html_string(&self) -> Result<String, AvatarError> {
        self.render().map(Markup::into_string)
    }

    /// Validate once, then embed directly in `maud::html!` templates.
    pub fn into_renderable(self) -> Result<RenderedAvatar, AvatarError> {
        self.render().map(RenderedAvatar)
    }
}

/// Markup of a successfully rendered avatar.
///
/// [`GravatarImage::render`] is fallible, so the builder itself is not
/// [`Render`]; this wrapper is.
#[derive(Debug, Clone)]
pub struct RenderedAvatar(Markup);

impl Render for RenderedAvatar {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.0.0);
    }
}

fn percent_encode(url: &str) -> String {
    url::form_urlencoded::byte_serialize(url.as_bytes()).collect()
}
