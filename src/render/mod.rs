//! Page rendering: markdown bodies and the HTML documents served to readers

mod html;
mod markdown;
mod pages;

pub use html::{entity_url, escape, format_date, url_for};
pub use markdown::MarkdownRenderer;
pub use pages::PageRenderer;
