//! Utility classes shared by the authoring and public renderers

use funnel_model::{AspectRatio, ButtonSize, ButtonVariant, HeadingLevel};

pub(crate) fn heading_class(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "font-bold text-4xl",
        HeadingLevel::H2 => "font-bold text-3xl",
        HeadingLevel::H3 => "font-bold text-2xl",
    }
}

pub(crate) fn aspect_ratio_class(ratio: AspectRatio) -> &'static str {
    match ratio {
        AspectRatio::Widescreen => "aspect-video",
        AspectRatio::Standard => "aspect-[4/3]",
        AspectRatio::Square => "aspect-square",
    }
}

pub(crate) fn button_class(variant: ButtonVariant, size: ButtonSize) -> String {
    let variant = match variant {
        ButtonVariant::Primary => "bg-blue-600 text-white hover:bg-blue-700",
        ButtonVariant::Secondary => "bg-gray-600 text-white hover:bg-gray-700",
        ButtonVariant::Outline => {
            "border-2 border-blue-600 text-blue-600 hover:bg-blue-600 hover:text-white"
        }
    };
    let size = match size {
        ButtonSize::Sm => "px-4 py-2 text-sm",
        ButtonSize::Md => "px-6 py-3 text-base",
        ButtonSize::Lg => "px-8 py-4 text-lg",
    };
    format!("rounded-lg font-semibold transition-colors {} {}", variant, size)
}

/// Display name for a code language tag
pub(crate) fn language_label(language: &str) -> &str {
    match language {
        "javascript" => "JavaScript",
        "typescript" => "TypeScript",
        "python" => "Python",
        "html" => "HTML",
        "css" => "CSS",
        "json" => "JSON",
        "bash" => "Bash",
        other => other,
    }
}
