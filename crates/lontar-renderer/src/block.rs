//! Content block model.
//!
//! Blocks are decoded one at a time from their JSON `_type` tag. Decoding a
//! block never fails as a whole: unknown tags and bodies that do not match
//! their tag become [`ContentBlock::Unknown`] and [`ContentBlock::Malformed`],
//! which the renderer skips with a warning.

use lontar_resolver::{AssetReference, Localized};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A single block of rich text content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// Text paragraph, heading or list item (`_type: "block"`).
    Paragraph(Paragraph),
    /// Single image (`_type: "image"`).
    Image(ImageBlock),
    /// Pull-quote with optional citation (`_type: "quote"`).
    Quote(QuoteBlock),
    /// Image gallery (`_type: "gallery"`).
    Gallery(GalleryBlock),
    /// Embedded video (`_type: "videoEmbed"`).
    Video(VideoEmbed),
    /// Block with a tag this renderer does not know.
    Unknown {
        /// The unrecognized `_type` value.
        block_type: String,
    },
    /// Block whose body could not be decoded.
    Malformed {
        /// The `_type` value, empty if the tag itself was missing.
        block_type: String,
        /// Why decoding failed.
        reason: String,
    },
}

/// Error decoding a block from JSON.
#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    /// The value has no string `_type` field.
    #[error("block has no _type")]
    MissingType,
    /// The `_type` is not one this renderer knows.
    #[error("unknown block type {0:?}")]
    Unknown(String),
    /// The body does not match its `_type`.
    #[error("malformed {block_type} block: {source}")]
    Malformed {
        /// The block's `_type`.
        block_type: String,
        /// Underlying decode error.
        source: serde_json::Error,
    },
}

impl ContentBlock {
    /// Decode a block, reporting why it could not be decoded.
    pub fn try_from_value(value: Value) -> Result<Self, BlockError> {
        let block_type = value
            .get("_type")
            .and_then(Value::as_str)
            .ok_or(BlockError::MissingType)?
            .to_owned();

        let decoded = match block_type.as_str() {
            "block" => serde_json::from_value(value).map(Self::Paragraph),
            "image" => serde_json::from_value(value).map(Self::Image),
            "quote" => serde_json::from_value(value).map(Self::Quote),
            "gallery" | "imageGallery" => serde_json::from_value(value).map(Self::Gallery),
            "videoEmbed" | "youtube" => serde_json::from_value(value).map(Self::Video),
            _ => return Err(BlockError::Unknown(block_type)),
        };

        decoded.map_err(|source| BlockError::Malformed { block_type, source })
    }

    /// Decode a block, folding failures into [`Unknown`](Self::Unknown) and
    /// [`Malformed`](Self::Malformed).
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match Self::try_from_value(value) {
            Ok(block) => block,
            Err(BlockError::Unknown(block_type)) => Self::Unknown { block_type },
            Err(err @ BlockError::MissingType) => Self::Malformed {
                block_type: String::new(),
                reason: err.to_string(),
            },
            Err(BlockError::Malformed { block_type, source }) => Self::Malformed {
                block_type,
                reason: source.to_string(),
            },
        }
    }

    /// The block's `_type` tag.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Paragraph(_) => "block",
            Self::Image(_) => "image",
            Self::Quote(_) => "quote",
            Self::Gallery(_) => "gallery",
            Self::Video(_) => "videoEmbed",
            Self::Unknown { block_type } | Self::Malformed { block_type, .. } => block_type,
        }
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Text block: a paragraph, heading, blockquote or list item.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// Block style.
    #[serde(default, deserialize_with = "null_as_default")]
    pub style: BlockStyle,
    /// List marker; `None` for ordinary paragraphs.
    #[serde(default)]
    pub list_item: Option<ListKind>,
    /// Inline text spans.
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Span>,
    /// Annotation definitions referenced by span marks.
    #[serde(default, deserialize_with = "null_as_default")]
    pub mark_defs: Vec<MarkDefinition>,
}

impl Paragraph {
    /// Paragraph of unmarked spans with the given style.
    pub fn new(style: BlockStyle, texts: &[&str]) -> Self {
        Self {
            style,
            children: texts.iter().map(|text| Span::plain(*text)).collect(),
            ..Self::default()
        }
    }

    /// Mark this paragraph as a list item.
    #[must_use]
    pub fn in_list(mut self, kind: ListKind) -> Self {
        self.list_item = Some(kind);
        self
    }
}

/// Paragraph style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStyle {
    /// Ordinary paragraph.
    #[default]
    Normal,
    /// Level 1 heading.
    H1,
    /// Level 2 heading.
    H2,
    /// Level 3 heading.
    H3,
    /// Level 4 heading.
    H4,
    /// Block quotation.
    Blockquote,
    /// Any other style; rendered as a normal paragraph.
    #[serde(other)]
    Other,
}

impl BlockStyle {
    /// HTML element wrapping a block of this style.
    pub(crate) fn element(self) -> &'static str {
        match self {
            Self::Normal | Self::Other => "p",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::Blockquote => "blockquote",
        }
    }

    pub(crate) fn is_normal(self) -> bool {
        matches!(self, Self::Normal | Self::Other)
    }
}

/// List marker of a list-item paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Unordered list item.
    Bullet,
    /// Ordered list item.
    Number,
    /// Unrecognized marker; rendered as a bullet.
    #[serde(other)]
    Other,
}

/// Run of text sharing one set of marks.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Span {
    /// Literal text, unescaped.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Decorators and annotation keys, applied in order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub marks: Vec<String>,
}

impl Span {
    /// Span without marks.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Span with the given marks.
    pub fn marked(text: impl Into<String>, marks: &[&str]) -> Self {
        Self {
            text: text.into(),
            marks: marks.iter().map(|mark| (*mark).to_owned()).collect(),
        }
    }
}

/// Annotation referenced from span marks by key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkDefinition {
    /// Key spans use to reference this definition.
    #[serde(rename = "_key", default, deserialize_with = "null_as_default")]
    pub key: String,
    /// Annotation kind; only `link` is rendered.
    #[serde(rename = "_type", default = "default_mark_type", deserialize_with = "null_as_link")]
    pub mark_type: String,
    /// Link target.
    #[serde(default)]
    pub href: Option<String>,
    /// Render the link as a button.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_button: bool,
}

fn default_mark_type() -> String {
    LINK_MARK_TYPE.to_owned()
}

fn null_as_link<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer)
        .map(|mark_type| mark_type.unwrap_or_else(default_mark_type))
}

pub(crate) const LINK_MARK_TYPE: &str = "link";

impl MarkDefinition {
    /// Link definition.
    pub fn link(key: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            mark_type: default_mark_type(),
            href: Some(href.into()),
            is_button: false,
        }
    }

    /// Set the button flag.
    #[must_use]
    pub fn button(mut self) -> Self {
        self.is_button = true;
        self
    }
}

/// Image block, also used for gallery items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ImageBlock {
    /// Already-resolved image URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Asset reference, decoded when no URL is given.
    #[serde(default)]
    pub asset: Option<AssetReference>,
    /// Alternative text.
    #[serde(default)]
    pub alt: Option<Localized<String>>,
    /// Caption shown below the image.
    #[serde(default)]
    pub caption: Option<Localized<String>>,
}

impl ImageBlock {
    /// Resolve the image URL: explicit `url` first, then the asset.
    #[must_use]
    pub fn resolve_url(&self, cdn_base: &str) -> Option<String> {
        match &self.url {
            Some(url) if !url.is_empty() => Some(url.clone()),
            _ => self.asset.as_ref()?.resolve(cdn_base),
        }
    }
}

/// Pull-quote block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct QuoteBlock {
    /// Quoted text.
    #[serde(default)]
    pub text: Option<Localized<String>>,
    /// Attribution.
    #[serde(default)]
    pub cite: Option<Localized<String>>,
}

/// Gallery block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct GalleryBlock {
    /// Gallery items, in display order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<GalleryItem>,
    /// Presentation of the items.
    #[serde(default, deserialize_with = "null_as_default")]
    pub layout: GalleryLayout,
}

/// One gallery entry.
///
/// Items are decoded independently so that one bad item does not discard
/// the rest of the gallery. Undecodable items keep their position for
/// reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryItem {
    /// Decoded image.
    Image(ImageBlock),
    /// Item whose body could not be decoded.
    Malformed {
        /// Why decoding failed.
        reason: String,
    },
}

impl From<ImageBlock> for GalleryItem {
    fn from(image: ImageBlock) -> Self {
        Self::Image(image)
    }
}

impl<'de> Deserialize<'de> for GalleryItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).map_or_else(
            |err| Self::Malformed {
                reason: err.to_string(),
            },
            Self::Image,
        ))
    }
}

/// Gallery presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryLayout {
    /// All items at once.
    #[default]
    Grid,
    /// Horizontally scrolling track.
    Carousel,
    /// One item at a time with indicators.
    Slideshow,
}

impl GalleryLayout {
    /// Layout name as used in markup.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Carousel => "carousel",
            Self::Slideshow => "slideshow",
        }
    }
}

/// Embedded video block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct VideoEmbed {
    /// Video page or embed URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Caption shown below the video.
    #[serde(default)]
    pub caption: Option<Localized<String>>,
}

/// Read an explicit `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
