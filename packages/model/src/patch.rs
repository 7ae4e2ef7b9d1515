//! # Partial Property Patches
//!
//! A patch carries only the fields an edit touches. Merging overwrites the
//! supplied fields and leaves the others alone.

use crate::block::{
    Align, AspectRatio, Block, BlockKind, ButtonSize, ButtonVariant, CodeContent, HeadingLevel,
    ImageContent,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<HeadingLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ButtonVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ButtonSize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Variant-specific partial update, tagged like the block it targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockPatch {
    Heading(HeadingPatch),
    Video(VideoPatch),
    Button(ButtonPatch),
    Image(ImagePatch),
    Code(CodePatch),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{patch} patch cannot be applied to a {block} block")]
pub struct PatchMismatch {
    pub block: BlockKind,
    pub patch: BlockKind,
}

impl BlockPatch {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockPatch::Heading(_) => BlockKind::Heading,
            BlockPatch::Video(_) => BlockKind::Video,
            BlockPatch::Button(_) => BlockKind::Button,
            BlockPatch::Image(_) => BlockKind::Image,
            BlockPatch::Code(_) => BlockKind::Code,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            BlockPatch::Heading(p) => p == &HeadingPatch::default(),
            BlockPatch::Video(p) => p == &VideoPatch::default(),
            BlockPatch::Button(p) => p == &ButtonPatch::default(),
            BlockPatch::Image(p) => p == &ImagePatch::default(),
            BlockPatch::Code(p) => p == &CodePatch::default(),
        }
    }
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

fn set_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        *target = value.clone();
    }
}

impl Block {
    /// Merge a patch into this block's property bag
    pub fn merge(&mut self, patch: &BlockPatch) -> Result<(), PatchMismatch> {
        match (self, patch) {
            (Block::Heading { props, .. }, BlockPatch::Heading(p)) => {
                set(&mut props.text, &p.text);
                set(&mut props.level, &p.level);
                set(&mut props.align, &p.align);
                Ok(())
            }
            (Block::Video { props, .. }, BlockPatch::Video(p)) => {
                set(&mut props.url, &p.url);
                set(&mut props.title, &p.title);
                set(&mut props.aspect_ratio, &p.aspect_ratio);
                Ok(())
            }
            (Block::Button { props, .. }, BlockPatch::Button(p)) => {
                set(&mut props.text, &p.text);
                set(&mut props.url, &p.url);
                set(&mut props.variant, &p.variant);
                set(&mut props.size, &p.size);
                Ok(())
            }
            (Block::Image { content, .. }, BlockPatch::Image(p)) => {
                let content = content.get_or_insert_with(ImageContent::default);
                set_opt(&mut content.image_url, &p.image_url);
                set_opt(&mut content.caption, &p.caption);
                Ok(())
            }
            (Block::Code { content, .. }, BlockPatch::Code(p)) => {
                let content = content.get_or_insert_with(CodeContent::default);
                set_opt(&mut content.code, &p.code);
                set_opt(&mut content.language, &p.language);
                Ok(())
            }
            (block, patch) => Err(PatchMismatch {
                block: block.kind(),
                patch: patch.kind(),
            }),
        }
    }
}
