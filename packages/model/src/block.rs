//! # Blocks
//!
//! A block is one content unit of a landing page. The set of variants is
//! closed: adding a sixth variant must break every exhaustive `match`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages offered by the code block language picker
pub const SUGGESTED_LANGUAGES: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "html",
    "css",
    "json",
    "bash",
];

/// Opaque block identifier, unique within a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Block type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Heading,
    Video,
    Button,
    Image,
    Code,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Heading,
        BlockKind::Video,
        BlockKind::Button,
        BlockKind::Image,
        BlockKind::Code,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Heading => "heading",
            BlockKind::Video => "video",
            BlockKind::Button => "button",
            BlockKind::Image => "image",
            BlockKind::Code => "code",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown block type: {}", s))
    }
}

/// Heading level, serialized as the numbers 1, 2 and 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn number(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HeadingLevel::H1),
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            other => Err(format!("heading level must be 1, 2 or 3, got {}", other)),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.number()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Standard => "4:3",
            AspectRatio::Square => "1:1",
        }
    }

    /// CSS `aspect-ratio` value
    pub fn css(self) -> &'static str {
        match self {
            AspectRatio::Widescreen => "16 / 9",
            AspectRatio::Standard => "4 / 3",
            AspectRatio::Square => "1 / 1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
}

impl ButtonVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Outline => "outline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl ButtonSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonSize::Sm => "sm",
            ButtonSize::Md => "md",
            ButtonSize::Lg => "lg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingProps {
    pub text: String,
    pub level: HeadingLevel,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProps {
    pub url: String,
    pub title: String,
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonProps {
    pub text: String,
    pub url: String,
    pub variant: ButtonVariant,
    pub size: ButtonSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// One content unit of a landing page.
///
/// Serializes as `{ id, type, order, props }` for heading/video/button and
/// `{ id, type, order, content? }` for image/code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Heading {
        id: BlockId,
        #[serde(default)]
        order: u32,
        props: HeadingProps,
    },
    Video {
        id: BlockId,
        #[serde(default)]
        order: u32,
        props: VideoProps,
    },
    Button {
        id: BlockId,
        #[serde(default)]
        order: u32,
        props: ButtonProps,
    },
    Image {
        id: BlockId,
        #[serde(default)]
        order: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<ImageContent>,
    },
    Code {
        id: BlockId,
        #[serde(default)]
        order: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<CodeContent>,
    },
}

impl Block {
    pub fn heading(id: impl Into<BlockId>, props: HeadingProps) -> Self {
        Block::Heading { id: id.into(), order: 0, props }
    }

    pub fn video(id: impl Into<BlockId>, props: VideoProps) -> Self {
        Block::Video { id: id.into(), order: 0, props }
    }

    pub fn button(id: impl Into<BlockId>, props: ButtonProps) -> Self {
        Block::Button { id: id.into(), order: 0, props }
    }

    pub fn image(id: impl Into<BlockId>, content: Option<ImageContent>) -> Self {
        Block::Image { id: id.into(), order: 0, content }
    }

    pub fn code(id: impl Into<BlockId>, content: Option<CodeContent>) -> Self {
        Block::Code { id: id.into(), order: 0, content }
    }

    pub fn id(&self) -> &BlockId {
        match self {
            Block::Heading { id, .. }
            | Block::Video { id, .. }
            | Block::Button { id, .. }
            | Block::Image { id, .. }
            | Block::Code { id, .. } => id,
        }
    }

    pub fn order(&self) -> u32 {
        match self {
            Block::Heading { order, .. }
            | Block::Video { order, .. }
            | Block::Button { order, .. }
            | Block::Image { order, .. }
            | Block::Code { order, .. } => *order,
        }
    }

    pub fn set_order(&mut self, value: u32) {
        match self {
            Block::Heading { order, .. }
            | Block::Video { order, .. }
            | Block::Button { order, .. }
            | Block::Image { order, .. }
            | Block::Code { order, .. } => *order = value,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { .. } => BlockKind::Heading,
            Block::Video { .. } => BlockKind::Video,
            Block::Button { .. } => BlockKind::Button,
            Block::Image { .. } => BlockKind::Image,
            Block::Code { .. } => BlockKind::Code,
        }
    }
}

/// Renumber `order` to match array position
pub fn renumber(blocks: &mut [Block]) {
    for (index, block) in blocks.iter_mut().enumerate() {
        block.set_order(index as u32);
    }
}
