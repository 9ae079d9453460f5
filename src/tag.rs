//! Self-closing `<img>` serialization.
//!
//! Maud renders void elements as `<img ...>`; avatar markup is emitted in the
//! XHTML-compatible `<img ... />` form, with attributes in insertion order.
//! The result is handed back as [`Markup`] so it drops into `html!` templates
//! without being escaped a second time.
//!
//! Attribute values go through [`maud::Escaper`], except `src`: the query
//! separators of a URL stay literal (`?s=80&d=mm`), only the characters that
//! could terminate the attribute or open a tag are escaped.

use maud::{Escaper, Markup, PreEscaped};
use std::fmt::{self, Write};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImgTag {
    attributes: Vec<(&'static str, String)>,
}

impl ImgTag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any earlier value under the same name.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    #[cfg(test)]
    fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn render(&self) -> Markup {
        PreEscaped(self.to_string())
    }
}

impl fmt::Display for ImgTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<img")?;
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"")?;
            if *name == "src" {
                escape_url_attr(value, f)?;
            } else {
                let mut escaped = String::with_capacity(value.len());
                write!(Escaper::new(&mut escaped), "{value}")?;
                f.write_str(&escaped)?;
            }
            f.write_char('"')?;
        }
        f.write_str(" />")
    }
}

fn escape_url_attr(value: &str, out: &mut impl Write) -> fmt::Result {
    for c in value.chars() {
        match c {
            '"' => out.write_str("&quot;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_self_closing_in_insertion_order() {
        let tag = ImgTag::new().attr("src", "a.png").attr("alt", "A");
        assert_eq!(tag.render().into_string(), r#"<img src="a.png" alt="A" />"#);
    }

    #[test]
    fn empty_tag() {
        assert_eq!(ImgTag::new().render().into_string(), "<img />");
    }

    #[test]
    fn attr_replaces_existing_value_in_place() {
        let tag = ImgTag::new()
            .attr("class", "a")
            .attr("alt", "x")
            .attr("class", "b");
        assert_eq!(tag.get("class"), Some("b"));
        assert_eq!(tag.render().into_string(), r#"<img class="b" alt="x" />"#);
    }

    #[test]
    fn display_matches_render() {
        let tag = ImgTag::new()
            .attr("src", "http://x/a?s=1&d=mm")
            .attr("title", "a & b");
        assert_eq!(tag.to_string(), tag.render().into_string());
        assert_eq!(
            tag.to_string(),
            r#"<img src="http://x/a?s=1&d=mm" title="a &amp; b" />"#
        );
    }

    #[test]
    fn escapes_regular_attributes() {
        let tag = ImgTag::new().attr("title", r#"Tom & "Jerry" <3"#);
        assert_eq!(
            tag.render().into_string(),
            r#"<img title="Tom &amp; &quot;Jerry&quot; &lt;3" />"#
        );
    }

    #[test]
    fn src_keeps_query_separators() {
        let tag = ImgTag::new().attr("src", r#"http://x/a?s=1&d=mm"><script>"#);
        assert_eq!(
            tag.render().into_string(),
            r#"<img src="http://x/a?s=1&d=mm&quot;&gt;&lt;script&gt;" />"#
        );
    }
}
