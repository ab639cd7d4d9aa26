//! Markdown to HTML fragment conversion.
//!
//! The generator treats conversion as a collaborator behind two small traits:
//! a [`Converter`] turns a markdown body into a [`Fragment`], and the fragment
//! renders itself to HTML text exactly once per page. Any implementation can
//! be plugged in; the bundled one is [`CommonMark`], backed by pulldown-cmark.

use crate::config::MarkdownConfig;
use pulldown_cmark::{Options, Parser, html};
use thiserror::Error;

/// Opaque failure raised by a [`Converter`]. The generator never inspects it.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ConversionError {
    message: String,
}

impl ConversionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Converted markup for one document.
pub trait Fragment {
    fn to_html(&self) -> String;
}

/// Turns a markdown document body into a [`Fragment`].
///
/// Converters must be `Sync` so a single instance can serve a parallel build.
pub trait Converter: Sync {
    type Fragment: Fragment;

    fn convert(&self, markdown: &str) -> Result<Self::Fragment, ConversionError>;
}

/// CommonMark converter with optional extensions.
#[derive(Debug, Clone)]
pub struct CommonMark {
    options: Options,
}

impl Default for CommonMark {
    /// Plain CommonMark, no extensions.
    fn default() -> Self {
        Self {
            options: Options::empty(),
        }
    }
}

impl CommonMark {
    pub fn new(config: &MarkdownConfig) -> Self {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, config.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, config.strikethrough);
        options.set(Options::ENABLE_FOOTNOTES, config.footnotes);
        options.set(Options::ENABLE_TASKLISTS, config.tasklists);
        options.set(Options::ENABLE_SMART_PUNCTUATION, config.smart_punctuation);
        Self { options }
    }
}

/// A markdown document waiting to be rendered by pulldown-cmark.
#[derive(Debug, Clone)]
pub struct CommonMarkFragment {
    source: String,
    options: Options,
}

impl Fragment for CommonMarkFragment {
    fn to_html(&self) -> String {
        let parser = Parser::new_ext(&self.source, self.options);
        let mut out = String::with_capacity(self.source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

impl Converter for CommonMark {
    type Fragment = CommonMarkFragment;

    fn convert(&self, markdown: &str) -> Result<Self::Fragment, ConversionError> {
        Ok(CommonMarkFragment {
            source: markdown.to_string(),
            options: self.options,
        })
    }
}
