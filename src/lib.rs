//! # gravatar-img
//!
//! Renders `<img>` tags pointing at [Gravatar](https://gravatar.com) avatars.
//! An email address is hashed, combined with size, rating, and fallback
//! options into an avatar URL, and wrapped in a self-closing image element
//! ready to drop into a page.
//!
//! ```
//! use gravatar_img::{DefaultImage, GravatarImage, Rating};
//!
//! let html = GravatarImage::new(true)
//!     .email_address("someone@example.org")
//!     .size(48)
//!     .rating(Rating::Pg)
//!     .default_image(DefaultImage::Retro)
//!     .tooltip("Someone")
//!     .to_html_string()?;
//!
//! assert!(html.starts_with(r#"<img src="https://secure.gravatar.com/avatar/"#));
//! assert!(html.ends_with(r#"title="Someone" />"#));
//! # Ok::<(), gravatar_img::AvatarError>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`avatar`] | The fluent [`GravatarImage`] builder and URL construction |
//! | [`options`] | [`Rating`] and [`DefaultImage`] with their wire codes |
//! | [`hash`] | MD5 email hashing |
//! | [`tag`] | Self-closing `<img />` serialization with attribute escaping |
//! | [`config`] | Optional `gravatar.toml` with site-wide defaults |
//!
//! # Design Decisions
//!
//! ## Secure Context Is an Input
//!
//! Whether the embedding page is served over HTTPS is passed in when the
//! builder is created (a `bool`, or anything implementing [`SecureContext`]).
//! Nothing reads request state behind the caller's back, so the builder is
//! trivially testable outside a web server.
//!
//! ## Maud Interop
//!
//! Rendering returns [`maud::Markup`]. It is already escaped, so it embeds in
//! `html!` templates as-is. Since rendering can fail (no email address), the
//! builder itself is not `Render`; [`GravatarImage::into_renderable`]
//! validates once and hands back a value that is.

pub mod avatar;
pub mod config;
pub mod hash;
pub mod options;
pub mod tag;

pub use avatar::{AvatarError, GravatarImage, RenderedAvatar, SecureContext};
pub use config::{AvatarConfig, ConfigError};
pub use options::{DefaultImage, ParseOptionError, Rating};
