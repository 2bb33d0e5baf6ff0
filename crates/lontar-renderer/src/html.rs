//! HTML markup for media blocks.
//!
//! All functions take already-resolved, unescaped values and append escaped
//! markup to `out`.

use std::fmt::Write;

use crate::block::GalleryLayout;
use crate::gallery::Direction;
use crate::state::escape_html;
use crate::video::EMBED_BASE;

/// An image whose URL and localized texts have been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedImage {
    pub(crate) src: String,
    pub(crate) alt: String,
    pub(crate) caption: String,
}

/// Append `<figcaption>` when the caption is non-empty.
fn figcaption(caption: &str, out: &mut String) {
    if !caption.is_empty() {
        let _ = write!(out, "<figcaption>{}</figcaption>", escape_html(caption));
    }
}

fn img(image: &ResolvedImage, out: &mut String) {
    let _ = write!(
        out,
        r#"<img src="{}" alt="{}" loading="lazy">"#,
        escape_html(&image.src),
        escape_html(&image.alt)
    );
}

/// Standalone image figure.
pub(crate) fn image(image: &ResolvedImage, out: &mut String) {
    out.push_str(r#"<figure class="rich-image">"#);
    img(image, out);
    figcaption(&image.caption, out);
    out.push_str("</figure>");
}

/// Pull-quote. Either part may be empty, but not both.
pub(crate) fn quote(text: &str, cite: &str, out: &mut String) {
    out.push_str(r#"<blockquote class="rich-quote">"#);
    if !text.is_empty() {
        let _ = write!(out, "<p><em>{}</em></p>", escape_html(text));
    }
    if !cite.is_empty() {
        let _ = write!(out, "<cite>\u{2014} {}</cite>", escape_html(cite));
    }
    out.push_str("</blockquote>");
}

/// Responsive video frame.
pub(crate) fn video(video_id: &str, caption: &str, out: &mut String) {
    let title = if caption.is_empty() { "Video" } else { caption };
    let _ = write!(
        out,
        r#"<figure class="rich-video"><div class="video-wrapper"><iframe src="{EMBED_BASE}{}" title="{}" loading="lazy" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe></div>"#,
        escape_html(video_id),
        escape_html(title)
    );
    figcaption(caption, out);
    out.push_str("</figure>");
}

/// Gallery root and its items.
pub(crate) fn gallery(id: &str, layout: GalleryLayout, items: &[ResolvedImage], out: &mut String) {
    let id = escape_html(id);
    let _ = write!(
        out,
        r#"<div class="rich-gallery rich-gallery-{layout}" id="{id}" data-layout="{layout}""#,
        layout = layout.as_str()
    );
    if layout == GalleryLayout::Slideshow {
        out.push_str(r#" data-current="0""#);
    }
    out.push('>');

    match layout {
        GalleryLayout::Grid => {
            for item in items {
                gallery_item(item, out);
            }
        }
        GalleryLayout::Carousel => {
            nav_button(&id, Direction::Previous, out);
            out.push_str(r#"<div class="gallery-track">"#);
            for item in items {
                gallery_item(item, out);
            }
            out.push_str("</div>");
            nav_button(&id, Direction::Next, out);
        }
        GalleryLayout::Slideshow => {
            out.push_str(r#"<div class="gallery-slides">"#);
            for (index, item) in items.iter().enumerate() {
                let active = if index == 0 { " active" } else { "" };
                let _ = write!(
                    out,
                    r#"<div class="gallery-slide{active}" data-index="{index}">"#
                );
                gallery_item(item, out);
                out.push_str("</div>");
            }
            out.push_str("</div>");
            nav_button(&id, Direction::Previous, out);
            nav_button(&id, Direction::Next, out);
            out.push_str(r#"<div class="gallery-indicators">"#);
            for index in 0..items.len() {
                let active = if index == 0 { " active" } else { "" };
                let _ = write!(
                    out,
                    r#"<button type="button" class="gallery-indicator{active}" data-gallery="{id}" data-index="{index}" aria-label="Slide {}"></button>"#,
                    index + 1
                );
            }
            out.push_str("</div>");
        }
    }

    out.push_str("</div>");
}

fn gallery_item(item: &ResolvedImage, out: &mut String) {
    out.push_str(r#"<figure class="gallery-item">"#);
    img(item, out);
    figcaption(&item.caption, out);
    out.push_str("</figure>");
}

/// Previous/next control; `id` is already escaped.
fn nav_button(id: &str, direction: Direction, out: &mut String) {
    let (label, glyph) = match direction {
        Direction::Previous => ("Previous", "&#8249;"),
        Direction::Next => ("Next", "&#8250;"),
    };
    let _ = write!(
        out,
        r#"<button type="button" class="gallery-nav gallery-{action}" data-gallery="{id}" data-action="{action}" aria-label="{label}">{glyph}</button>"#,
        action = direction.action()
    );
}
