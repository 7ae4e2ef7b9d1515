//! # Block Inspector
//!
//! Side-panel fields for the selected block. Heading, video and button
//! blocks are edited here; image and code blocks are edited inline and
//! have no fields.
//!
//! A field edit arrives as `(key, raw string)` and becomes a single-field
//! [`BlockPatch`] for `updateBlock`.

use funnel_model::{
    Block, BlockKind, BlockPatch, ButtonPatch, HeadingLevel, HeadingPatch, VideoPatch,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldInput {
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<&'static str>,
    },
    Select {
        options: &'static [SelectOption],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// One editable property of the selected block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub input: FieldInput,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InspectorError {
    #[error("{kind} blocks have no field `{key}`")]
    UnknownField { kind: BlockKind, key: String },

    #[error("Invalid value for `{key}`: {value}")]
    InvalidValue { key: String, value: String },
}

const LEVEL_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "1", label: "H1" },
    SelectOption { value: "2", label: "H2" },
    SelectOption { value: "3", label: "H3" },
];

const ALIGN_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "left", label: "左寄せ" },
    SelectOption { value: "center", label: "中央" },
    SelectOption { value: "right", label: "右寄せ" },
];

const ASPECT_RATIO_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "16:9", label: "16:9" },
    SelectOption { value: "4:3", label: "4:3" },
    SelectOption { value: "1:1", label: "1:1" },
];

const VARIANT_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "primary", label: "プライマリ" },
    SelectOption { value: "secondary", label: "セカンダリ" },
    SelectOption { value: "outline", label: "アウトライン" },
];

const SIZE_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "sm", label: "小" },
    SelectOption { value: "md", label: "中" },
    SelectOption { value: "lg", label: "大" },
];

fn text(key: &'static str, label: &'static str, value: &str, placeholder: Option<&'static str>) -> Field {
    Field {
        key,
        label,
        value: value.to_string(),
        input: FieldInput::Text { placeholder },
    }
}

fn select(key: &'static str, label: &'static str, value: &str, options: &'static [SelectOption]) -> Field {
    Field {
        key,
        label,
        value: value.to_string(),
        input: FieldInput::Select { options },
    }
}

/// Editable fields of `block`, in panel order
pub fn fields(block: &Block) -> Vec<Field> {
    match block {
        Block::Heading { props, .. } => vec![
            text("text", "テキスト", &props.text, None),
            select("level", "レベル", &props.level.number().to_string(), LEVEL_OPTIONS),
            select("align", "配置", props.align.as_str(), ALIGN_OPTIONS),
        ],
        Block::Video { props, .. } => vec![
            text("url", "動画URL", &props.url, Some("https://www.youtube.com/embed/...")),
            text("title", "タイトル", &props.title, None),
            select("aspectRatio", "アスペクト比", props.aspect_ratio.as_str(), ASPECT_RATIO_OPTIONS),
        ],
        Block::Button { props, .. } => vec![
            text("text", "ボタンテキスト", &props.text, None),
            text("url", "リンクURL", &props.url, Some("https://...")),
            select("variant", "スタイル", props.variant.as_str(), VARIANT_OPTIONS),
            select("size", "サイズ", props.size.as_str(), SIZE_OPTIONS),
        ],
        Block::Image { .. } | Block::Code { .. } => Vec::new(),
    }
}

/// Turn a panel edit into a patch for `kind`
pub fn edit(kind: BlockKind, key: &str, raw: &str) -> Result<BlockPatch, InspectorError> {
    let patch = match (kind, key) {
        (BlockKind::Heading, "text") => BlockPatch::Heading(HeadingPatch {
            text: Some(raw.to_string()),
            ..Default::default()
        }),
        (BlockKind::Heading, "level") => BlockPatch::Heading(HeadingPatch {
            level: Some(parse_level(raw)?),
            ..Default::default()
        }),
        (BlockKind::Heading, "align") => BlockPatch::Heading(HeadingPatch {
            align: Some(parse_choice(key, raw)?),
            ..Default::default()
        }),
        (BlockKind::Video, "url") => BlockPatch::Video(VideoPatch {
            url: Some(raw.to_string()),
            ..Default::default()
        }),
        (BlockKind::Video, "title") => BlockPatch::Video(VideoPatch {
            title: Some(raw.to_string()),
            ..Default::default()
        }),
        (BlockKind::Video, "aspectRatio") => BlockPatch::Video(VideoPatch {
            aspect_ratio: Some(parse_choice(key, raw)?),
            ..Default::default()
        }),
        (BlockKind::Button, "text") => BlockPatch::Button(ButtonPatch {
            text: Some(raw.to_string()),
            ..Default::default()
        }),
        (BlockKind::Button, "url") => BlockPatch::Button(ButtonPatch {
            url: Some(raw.to_string()),
            ..Default::default()
        }),
        (BlockKind::Button, "variant") => BlockPatch::Button(ButtonPatch {
            variant: Some(parse_choice(key, raw)?),
            ..Default::default()
        }),
        (BlockKind::Button, "size") => BlockPatch::Button(ButtonPatch {
            size: Some(parse_choice(key, raw)?),
            ..Default::default()
        }),
        _ => {
            return Err(InspectorError::UnknownField {
                kind,
                key: key.to_string(),
            })
        }
    };
    Ok(patch)
}

fn parse_level(raw: &str) -> Result<HeadingLevel, InspectorError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(|n| HeadingLevel::try_from(n).ok())
        .ok_or_else(|| InspectorError::InvalidValue {
            key: "level".to_string(),
            value: raw.to_string(),
        })
}

/// Select values use the same spelling as the wire format
fn parse_choice<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, InspectorError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string())).map_err(|_| {
        InspectorError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }
    })
}
