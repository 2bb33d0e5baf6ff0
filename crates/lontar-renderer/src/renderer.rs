//! Block sequence renderer.

use lontar_resolver::{Language, LanguageProvider, Localized, resolve_text};

use crate::block::{
    ContentBlock, GalleryBlock, GalleryItem, ImageBlock, Paragraph, QuoteBlock, VideoEmbed,
};
use crate::gallery::{GalleryHandle, GalleryIdGenerator, GalleryIds};
use crate::html::{self, ResolvedImage};
use crate::span::render_span_with;
use crate::state::{ListState, ListTag};
use crate::video::extract_video_id;

/// Result of rendering a block sequence.
#[derive(Clone, Debug, Default)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Blocks and items that were skipped, and why.
    pub warnings: Vec<String>,
    /// One handle per rendered gallery, in document order.
    pub galleries: Vec<GalleryHandle>,
}

/// Renders rich text blocks to HTML for one display language.
///
/// The renderer holds only configuration. Each call to
/// [`render`](Self::render) starts from fresh state, so one renderer can be
/// shared between threads and rendering the same blocks twice gives the same
/// output (unless [`GalleryIds::Random`] is selected).
///
/// # Example
///
/// ```
/// use lontar_renderer::{BlockStyle, ContentBlock, ListKind, Paragraph, RichTextRenderer};
/// use lontar_resolver::Language;
///
/// let blocks = [
///     ContentBlock::Paragraph(Paragraph::new(BlockStyle::Normal, &["One"]).in_list(ListKind::Bullet)),
///     ContentBlock::Paragraph(Paragraph::new(BlockStyle::Normal, &["Done"])),
/// ];
/// let result = RichTextRenderer::new(Language::Id).render(&blocks);
/// assert_eq!(result.html, "<ul><li>One</li></ul><p>Done</p>");
/// ```
#[derive(Clone, Debug, Default)]
pub struct RichTextRenderer {
    lang: Language,
    cdn_base: String,
    gallery_ids: GalleryIds,
}

impl RichTextRenderer {
    /// Renderer for `lang` with no CDN base and sequential gallery ids.
    #[must_use]
    pub fn new(lang: Language) -> Self {
        Self {
            lang,
            ..Self::default()
        }
    }

    /// Renderer for the provider's current language.
    #[must_use]
    pub fn from_provider<P: LanguageProvider + ?Sized>(provider: &P) -> Self {
        Self::new(provider.current_language())
    }

    /// Base URL that asset references are decoded against.
    #[must_use]
    pub fn with_cdn_base(mut self, cdn_base: impl Into<String>) -> Self {
        self.cdn_base = cdn_base.into();
        self
    }

    /// How gallery element ids are generated.
    #[must_use]
    pub fn with_gallery_ids(mut self, gallery_ids: GalleryIds) -> Self {
        self.gallery_ids = gallery_ids;
        self
    }

    /// Display language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.lang
    }

    /// Render a block sequence.
    #[must_use]
    pub fn render(&self, blocks: &[ContentBlock]) -> RenderResult {
        let mut pass = RenderPass::new(self);
        for block in blocks {
            pass.block(block);
        }
        pass.finish()
    }

    /// Render a bilingual body, falling back across languages like any other
    /// field. A missing body renders as empty.
    #[must_use]
    pub fn render_localized(&self, body: Option<&Localized<Vec<ContentBlock>>>) -> RenderResult {
        let blocks = body
            .and_then(|body| body.resolve(self.lang))
            .map_or(&[][..], Vec::as_slice);
        self.render(blocks)
    }
}

/// Render blocks for `lang` with default options, discarding warnings.
///
/// # Example
///
/// ```
/// use lontar_renderer::{ContentBlock, render};
/// use lontar_resolver::Language;
///
/// let blocks: Vec<ContentBlock> = serde_json::from_str(r#"[{"_type": "unknownKind"}]"#).unwrap();
/// assert_eq!(render(&blocks, Language::En), "");
/// ```
#[must_use]
pub fn render(blocks: &[ContentBlock], lang: Language) -> String {
    RichTextRenderer::new(lang).render(blocks).html
}

/// Render a bilingual body for `lang` with default options.
#[must_use]
pub fn render_localized(body: Option<&Localized<Vec<ContentBlock>>>, lang: Language) -> String {
    RichTextRenderer::new(lang).render_localized(body).html
}

/// State of a single render call.
struct RenderPass<'r> {
    renderer: &'r RichTextRenderer,
    output: String,
    list: ListState,
    warnings: Vec<String>,
    galleries: Vec<GalleryHandle>,
    ids: GalleryIdGenerator,
}

impl<'r> RenderPass<'r> {
    fn new(renderer: &'r RichTextRenderer) -> Self {
        Self {
            renderer,
            output: String::with_capacity(4096),
            list: ListState::default(),
            warnings: Vec::new(),
            galleries: Vec::new(),
            ids: GalleryIdGenerator::new(renderer.gallery_ids),
        }
    }

    fn finish(mut self) -> RenderResult {
        self.list.close(&mut self.output);
        RenderResult {
            html: self.output,
            warnings: self.warnings,
            galleries: self.galleries,
        }
    }

    fn lang(&self) -> Language {
        self.renderer.lang
    }

    fn block(&mut self, block: &ContentBlock) {
        if let ContentBlock::Paragraph(paragraph) = block {
            self.paragraph(paragraph);
            return;
        }

        self.list.close(&mut self.output);
        match block {
            ContentBlock::Paragraph(_) => {}
            ContentBlock::Image(image) => self.image(image),
            ContentBlock::Quote(quote) => self.quote(quote),
            ContentBlock::Gallery(gallery) => self.gallery(gallery),
            ContentBlock::Video(video) => self.video(video),
            ContentBlock::Unknown { block_type } => {
                tracing::warn!(block_type = %block_type, "Skipping unknown block");
                self.warnings
                    .push(format!("Skipped unknown block type: {block_type}"));
            }
            ContentBlock::Malformed { block_type, reason } => {
                tracing::warn!(%block_type, %reason, "Skipping malformed block");
                let message = if block_type.is_empty() {
                    format!("Skipped malformed block: {reason}")
                } else {
                    format!("Skipped malformed {block_type:?} block: {reason}")
                };
                self.warnings.push(message);
            }
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        let mut content = String::new();
        for span in &paragraph.children {
            content.push_str(&render_span_with(
                span,
                &paragraph.mark_defs,
                &mut self.warnings,
            ));
        }

        if let Some(kind) = paragraph.list_item {
            self.list.enter(ListTag::from(kind), &mut self.output);
            self.output.push_str("<li>");
            self.output.push_str(&content);
            self.output.push_str("</li>");
            return;
        }

        self.list.close(&mut self.output);
        if content.is_empty() && paragraph.style.is_normal() {
            return;
        }
        let element = paragraph.style.element();
        self.output.push('<');
        self.output.push_str(element);
        self.output.push('>');
        self.output.push_str(&content);
        self.output.push_str("</");
        self.output.push_str(element);
        self.output.push('>');
    }

    /// Resolve an image's URL and texts, or `None` if it has no usable asset.
    fn resolve_image(&self, image: &ImageBlock) -> Option<ResolvedImage> {
        let src = image
            .resolve_url(&self.renderer.cdn_base)
            .filter(|src| !src.is_empty())?;
        Some(ResolvedImage {
            src,
            alt: resolve_text(image.alt.as_ref(), self.lang()),
            caption: resolve_text(image.caption.as_ref(), self.lang()),
        })
    }

    fn image(&mut self, image: &ImageBlock) {
        let Some(resolved) = self.resolve_image(image) else {
            tracing::warn!("Skipping image without a resolvable asset");
            self.warnings
                .push("Skipped image with missing asset".to_owned());
            return;
        };
        html::image(&resolved, &mut self.output);
    }

    fn quote(&mut self, quote: &QuoteBlock) {
        let text = resolve_text(quote.text.as_ref(), self.lang());
        let cite = resolve_text(quote.cite.as_ref(), self.lang());
        if text.is_empty() && cite.is_empty() {
            return;
        }
        html::quote(&text, &cite, &mut self.output);
    }

    fn gallery(&mut self, gallery: &GalleryBlock) {
        let mut items = Vec::with_capacity(gallery.images.len());
        for (index, item) in gallery.images.iter().enumerate() {
            let image = match item {
                GalleryItem::Image(image) => image,
                GalleryItem::Malformed { reason } => {
                    tracing::warn!(index, %reason, "Dropping malformed gallery item");
                    self.warnings
                        .push(format!("Dropped malformed gallery item {index}: {reason}"));
                    continue;
                }
            };
            if let Some(resolved) = self.resolve_image(image) {
                items.push(resolved);
            } else {
                tracing::warn!(index, "Dropping gallery item without a resolvable asset");
                self.warnings
                    .push(format!("Dropped gallery item {index} with missing asset"));
            }
        }

        if items.is_empty() {
            tracing::warn!(layout = gallery.layout.as_str(), "Skipping empty gallery");
            self.warnings
                .push("Skipped gallery with no images".to_owned());
            return;
        }

        let id = self.ids.next_id();
        html::gallery(&id, gallery.layout, &items, &mut self.output);
        self.galleries.push(GalleryHandle {
            id,
            layout: gallery.layout,
            len: items.len(),
        });
    }

    fn video(&mut self, video: &VideoEmbed) {
        let Some(video_id) = extract_video_id(&video.url) else {
            tracing::warn!(url = %video.url, "Skipping video with unrecognized URL");
            let message = format!("Skipped video with unrecognized URL: {}", video.url);
            self.warnings.push(message);
            return;
        };
        let caption = resolve_text(video.caption.as_ref(), self.lang());
        html::video(video_id, &caption, &mut self.output);
    }
}
