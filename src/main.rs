use clap::{Parser, Subcommand};
use gravatar_img::{DefaultImage, GravatarImage, Rating, config, hash};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Options shared by the commands that build an avatar.
#[derive(clap::Args, Clone)]
struct AvatarArgs {
    /// Email address to hash (used verbatim)
    #[arg(long)]
    email: String,

    /// Square image size in pixels
    #[arg(long)]
    size: Option<u32>,

    /// Maximum content rating: g, pg, r, x
    #[arg(long)]
    rating: Option<Rating>,

    /// Built-in fallback: default, 404, mm, identicon, monsterid, wavatar, retro
    #[arg(long)]
    default_image: Option<DefaultImage>,

    /// Custom fallback image URL (overrides --default-image)
    #[arg(long)]
    default_image_url: Option<String>,

    /// Percent-encode the default image URL, from the flag or gravatar.toml
    #[arg(long)]
    encode: bool,

    /// Always show the fallback image
    #[arg(long)]
    force_default: bool,

    /// Treat the embedding page as served over HTTPS
    #[arg(long)]
    secure: bool,

    /// Use the HTTPS endpoint regardless of --secure
    #[arg(long)]
    force_secure: bool,

    /// Title attribute for the image
    #[arg(long)]
    tooltip: Option<String>,
}

#[derive(Parser)]
#[command(name = "gravatar-img")]
#[command(about = "Render Gravatar <img> tags from email addresses")]
#[command(long_about = "\
Render Gravatar <img> tags from email addresses

Defaults for size, rating and fallback image are read from gravatar.toml in
the --config directory when present; flags override them.

A default image URL is percent-encoded when either --encode or the config's
encode_default_image_url is set, whichever source supplied the URL.

  gravatar-img render --email test@example.com --default-image identicon
  <img src=\"http://www.gravatar.com/avatar/55502f40dc8b7c769880b10874abc9d0?s=80&d=identicon&r=g\" class=\"gravatar\" alt=\"Gravatar image\" />

Run 'gravatar-img gen-config' to generate a documented gravatar.toml.

Set RUST_LOG=debug for diagnostics on stderr.")]
#[command(version)]
struct Cli {
    /// Directory containing gravatar.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the <img> tag
    Render(AvatarArgs),
    /// Print the avatar URL only
    Url(AvatarArgs),
    /// Print the MD5 hash of an email address
    Hash {
        #[arg(long)]
        email: String,
    },
    /// Print a stock gravatar.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => {
            let image = build_image(&cli.config, args)?;
            println!("{}", image.to_html_string()?);
        }
        Command::Url(args) => {
            let image = build_image(&cli.config, args)?;
            println!("{}", image.url()?);
        }
        Command::Hash { email } => {
            println!("{}", hash::email_hash(&email));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Layer CLI flags over the loaded config.
fn build_image(
    config_dir: &std::path::Path,
    args: AvatarArgs,
) -> Result<GravatarImage, Box<dyn std::error::Error>> {
    let site = config::load_config(config_dir)?;
    debug!(dir = %config_dir.display(), ?site, "loaded config");

    let mut image = GravatarImage::from_config(&site, args.secure).email_address(args.email);
    if let Some(size) = args.size {
        image = image.size(size);
    }
    if let Some(rating) = args.rating {
        image = image.rating(rating);
    }
    if let Some(policy) = args.default_image {
        image = image.default_image(policy);
    }
    match args.default_image_url {
        Some(url) => {
            let encode = args.encode || site.encode_default_image_url;
            image = image.default_image_url(url).encode_default_image_url(encode)?;
        }
        // A config URL is already encoded by `from_config` when the config asks for it.
        None if args.encode && !site.encode_default_image_url => {
            image = image.encode_default_image_url(true)?;
        }
        None => {}
    }
    if args.force_default {
        image = image.force_default_image(true);
    }
    if args.force_secure {
        image = image.force_secure_request(true);
    }
    if let Some(tooltip) = args.tooltip {
        image = image.tooltip(tooltip);
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravatar_img::config::CONFIG_FILENAME;
    use tempfile::TempDir;

    fn url_for(config: &str, flags: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILENAME), config).unwrap();
        let mut argv = vec!["gravatar-img", "url", "--email", "test@example.com"];
        argv.extend_from_slice(flags);
        let cli = Cli::try_parse_from(argv).unwrap();
        let Command::Url(args) = cli.command else {
            panic!("expected url command");
        };
        Ok(build_image(tmp.path(), args)?.url()?)
    }

    const ENCODING_CONFIG: &str = r#"
default_image_url = "http://config.example/a.png"
encode_default_image_url = true
"#;

    #[test]
    fn config_encode_applies_to_flag_url() {
        let url = url_for(ENCODING_CONFIG, &["--default-image-url", "http://flag.example/b.png"])
            .unwrap();
        assert!(url.contains("&d=http%3A%2F%2Fflag.example%2Fb.png&r="), "{url}");
    }

    #[test]
    fn config_url_is_encoded_once() {
        let url = url_for(ENCODING_CONFIG, &["--encode"]).unwrap();
        assert!(url.contains("&d=http%3A%2F%2Fconfig.example%2Fa.png&r="), "{url}");
    }

    #[test]
    fn encode_flag_applies_to_config_url() {
        let url = url_for(r#"default_image_url = "http://config.example/a.png""#, &["--encode"])
            .unwrap();
        assert!(url.contains("&d=http%3A%2F%2Fconfig.example%2Fa.png&r="), "{url}");
    }

    #[test]
    fn unencoded_flag_url_stays_raw() {
        let url = url_for("", &["--default-image-url", "http://flag.example/b.png"]).unwrap();
        assert!(url.contains("&d=http://flag.example/b.png&r="), "{url}");
    }

    #[test]
    fn encode_without_any_url_is_error() {
        assert!(url_for("", &["--encode"]).is_err());
    }
}
