//! Rich text block renderer.
//!
//! Turns portable rich text (an ordered list of typed content blocks) into an
//! HTML string for one display language. Bilingual text inside blocks is
//! resolved with [`lontar_resolver`].
//!
//! # Architecture
//!
//! - [`ContentBlock`] decodes each block leniently: unknown or malformed
//!   blocks survive decoding and are skipped at render time with a warning.
//! - [`RichTextRenderer`] walks the blocks, grouping consecutive list-item
//!   paragraphs into flat `<ul>`/`<ol>` lists.
//! - Spans are rendered by [`render_span`], media blocks by internal markup
//!   helpers. Every literal text and attribute value goes through
//!   [`escape_html`].
//! - Galleries carry `data-*` attributes instead of inline handlers; the
//!   result lists a [`GalleryHandle`] per gallery.
//!
//! # Example
//!
//! ```
//! use lontar_renderer::{ContentBlock, RichTextRenderer};
//! use lontar_resolver::Language;
//!
//! let blocks: Vec<ContentBlock> = serde_json::from_str(r#"[
//!     {"_type": "block", "style": "h2", "children": [{"text": "Berita"}]},
//!     {"_type": "quote", "text": {"id": "Halo", "en": "Hello"}}
//! ]"#).unwrap();
//!
//! let result = RichTextRenderer::new(Language::En).render(&blocks);
//! assert_eq!(
//!     result.html,
//!     r#"<h2>Berita</h2><blockquote class="rich-quote"><p><em>Hello</em></p></blockquote>"#
//! );
//! assert!(result.warnings.is_empty());
//! ```

mod block;
mod gallery;
mod html;
mod renderer;
mod span;
mod state;
mod video;

pub use block::{
    BlockError, BlockStyle, ContentBlock, GalleryBlock, GalleryItem, GalleryLayout, ImageBlock,
    ListKind, MarkDefinition, Paragraph, QuoteBlock, Span, VideoEmbed,
};
pub use gallery::{
    CAROUSEL_SCROLL_FRACTION, CarouselTrack, Direction, GalleryHandle, GalleryIds,
    SlideshowState,
};
pub use renderer::{RenderResult, RichTextRenderer, render, render_localized};
pub use span::render_span;
pub use state::escape_html;
pub use video::extract_video_id;
