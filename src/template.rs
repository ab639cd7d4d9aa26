//! Page template substitution.
//!
//! A template is plain HTML text with two placeholders:
//!
//! | Placeholder     | Replaced with                   |
//! |-----------------|---------------------------------|
//! | `{{ Title }}`   | the page title                  |
//! | `{{ Content }}` | the HTML fragment of the page   |
//!
//! Substitution is a literal text replacement of every occurrence. There is no
//! escaping, no nesting and no conditionals. A template missing a placeholder
//! is still valid; the page simply does not show that value.

use maud::{DOCTYPE, PreEscaped, html};

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Substitutes `title` and `fragment` into `template`.
///
/// The title is substituted first, then the content.
pub fn render(template: &str, title: &str, fragment: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, fragment)
}

/// Placeholders that do not occur anywhere in `template`.
pub fn missing_placeholders(template: &str) -> Vec<&'static str> {
    [TITLE_PLACEHOLDER, CONTENT_PLACEHOLDER]
        .into_iter()
        .filter(|p| !template.contains(p))
        .collect()
}

/// A minimal HTML5 page template containing both placeholders.
///
/// Used by the `gen-template` command as a starting point.
pub fn stock_template() -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (TITLE_PLACEHOLDER) }
                link rel="stylesheet" href="/index.css";
            }
            body {
                article {
                    (PreEscaped(CONTENT_PLACEHOLDER))
                }
            }
        }
    };
    markup.into_string()
}
