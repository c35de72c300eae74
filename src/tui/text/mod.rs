//! Text utilities: markdown styling and line wrapping for the chat display.

mod markdown;
mod wrap;

pub(crate) use markdown::parse_markdown_inline;
pub(crate) use wrap::wrap_message;

#[cfg(test)]
mod tests;
