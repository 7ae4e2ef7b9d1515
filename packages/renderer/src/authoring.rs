//! # Authoring Renderer
//!
//! Editable view of the block list. Every block is wrapped in a
//! `data-block-id` container so the host can route clicks to
//! `selectBlock`, drags to the reorder controller, and input events to
//! `updateBlock`.
//!
//! ```text
//! <div class="block-list">
//!   <div class="block block-heading selected" data-block-id="…">
//!     …variant body…
//!   </div>
//! </div>
//! ```

use crate::context::{attr, escape_html, safe_url, Context, RenderOptions, MEDIA_SCHEMES};
use crate::styles::{aspect_ratio_class, button_class, heading_class, language_label};
use funnel_model::{
    walk_block, Block, BlockId, BlockVisitor, ButtonProps, CodeContent, HeadingProps,
    ImageContent, VideoProps, SUGGESTED_LANGUAGES,
};
use std::collections::HashMap;

pub const EMPTY_HINT: &str = "左側のパネルからブロックを追加してください";
pub const VIDEO_PLACEHOLDER: &str = "動画URLを入力してください";

/// Local edit/view toggle of an image block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageViewState {
    #[default]
    Edit,
    View,
}

/// UI state that lives beside the document but is never saved
#[derive(Debug, Clone, Default)]
pub struct AuthoringView {
    images: HashMap<BlockId, ImageViewState>,
}

impl AuthoringView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_image_state(&mut self, id: BlockId, state: ImageViewState) {
        self.images.insert(id, state);
    }

    /// Flip between edit and view; returns the new state
    pub fn toggle_image(&mut self, id: &BlockId, content: Option<&ImageContent>) -> ImageViewState {
        let next = match self.image_state(id, content) {
            ImageViewState::Edit => ImageViewState::View,
            ImageViewState::View => ImageViewState::Edit,
        };
        self.images.insert(id.clone(), next);
        next
    }

    /// Effective state: an image without a URL is always edited
    pub fn image_state(&self, id: &BlockId, content: Option<&ImageContent>) -> ImageViewState {
        if image_url(content).is_none() {
            return ImageViewState::Edit;
        }
        self.images.get(id).copied().unwrap_or(ImageViewState::View)
    }
}

fn image_url(content: Option<&ImageContent>) -> Option<&str> {
    content
        .and_then(|content| content.image_url.as_deref())
        .filter(|url| !url.is_empty())
}

/// Render `blocks` for editing, marking `selected`
pub fn render_authoring(
    blocks: &[Block],
    selected: Option<&BlockId>,
    view: &AuthoringView,
    options: RenderOptions,
) -> String {
    let mut ctx = Context::new(options);

    if blocks.is_empty() {
        ctx.open("<div class=\"block-list empty\">");
        ctx.add_line(&format!("<p>{}</p>", EMPTY_HINT));
        ctx.close("</div>");
        return ctx.into_output();
    }

    let mut ordered: Vec<&Block> = blocks.iter().collect();
    ordered.sort_by_key(|block| block.order());

    ctx.open("<div class=\"block-list\">");
    for block in ordered {
        let is_selected = selected == Some(block.id());
        ctx.open(&format!(
            "<div{}{}{}>",
            attr(
                "class",
                &format!(
                    "block block-{}{}",
                    block.kind(),
                    if is_selected { " selected" } else { "" }
                ),
            ),
            attr("data-block-id", block.id().as_str()),
            attr("data-order", &block.order().to_string()),
        ));
        walk_block(&mut AuthoringBlocks { ctx: &mut ctx, view }, block);
        ctx.close("</div>");
    }
    ctx.close("</div>");

    ctx.into_output()
}

struct AuthoringBlocks<'a> {
    ctx: &'a mut Context,
    view: &'a AuthoringView,
}

impl BlockVisitor for AuthoringBlocks<'_> {
    fn visit_heading(&mut self, _id: &BlockId, props: &HeadingProps) {
        let tag = props.level.tag();
        self.ctx.add_line(&format!(
            "<{tag}{}{}>{}</{tag}>",
            attr("class", heading_class(props.level)),
            attr("style", &format!("text-align: {}", props.align.as_str())),
            escape_html(&props.text),
        ));
    }

    fn visit_video(&mut self, _id: &BlockId, props: &VideoProps) {
        let ratio = aspect_ratio_class(props.aspect_ratio);
        let style = attr("style", &format!("aspect-ratio: {}", props.aspect_ratio.css()));

        match safe_url(&props.url, MEDIA_SCHEMES).filter(|url| !url.is_empty()) {
            Some(url) => {
                self.ctx.open(&format!(
                    "<div{}{}>",
                    attr("class", &format!("w-full {} bg-gray-900", ratio)),
                    style
                ));
                self.ctx.add_line(&format!(
                    "<iframe{}{} class=\"w-full h-full\" allowfullscreen></iframe>",
                    attr("src", url),
                    attr("title", &props.title),
                ));
                self.ctx.close("</div>");
            }
            None => {
                self.ctx.open(&format!(
                    "<div{}{}>",
                    attr("class", &format!("video-placeholder w-full {}", ratio)),
                    style
                ));
                self.ctx.add_line(&format!("<p>{}</p>", VIDEO_PLACEHOLDER));
                self.ctx.close("</div>");
            }
        }

        if !props.title.is_empty() {
            self.ctx.add_line(&format!(
                "<p class=\"video-title\">{}</p>",
                escape_html(&props.title)
            ));
        }
    }

    fn visit_button(&mut self, _id: &BlockId, props: &ButtonProps) {
        self.ctx.open("<div class=\"flex justify-center\">");
        self.ctx.add_line(&format!(
            "<span role=\"button\" aria-disabled=\"true\"{}>{}</span>",
            attr("class", &button_class(props.variant, props.size)),
            escape_html(&props.text),
        ));
        self.ctx.close("</div>");
    }

    fn visit_image(&mut self, id: &BlockId, content: Option<&ImageContent>) {
        let url = image_url(content);
        let caption = content
            .and_then(|content| content.caption.as_deref())
            .unwrap_or("");

        match (self.view.image_state(id, content), url) {
            (ImageViewState::View, Some(url)) => {
                self.ctx.open("<figure class=\"image-view\">");
                self.ctx.add_line(&format!(
                    "<img{}{}>",
                    attr("src", safe_url(url, MEDIA_SCHEMES).unwrap_or("")),
                    attr("alt", if caption.is_empty() { "画像" } else { caption }),
                ));
                self.ctx.add_line(
                    "<button type=\"button\" data-action=\"edit-image\">編集</button>",
                );
                self.ctx.add_line(&format!(
                    "<input type=\"text\" name=\"caption\"{} placeholder=\"キャプションを追加...\">",
                    attr("value", caption),
                ));
                self.ctx.close("</figure>");
            }
            _ => {
                self.ctx.open("<div class=\"image-editor\">");
                self.ctx.add_line("<span>画像を追加</span>");
                self.ctx.add_line(&format!(
                    "<input type=\"text\" name=\"imageUrl\"{} placeholder=\"画像URLを入力...\">",
                    attr("value", url.unwrap_or("")),
                ));
                if url.is_some() {
                    self.ctx.add_line(
                        "<button type=\"button\" data-action=\"view-image\">確定</button>",
                    );
                }
                self.ctx.close("</div>");
            }
        }
    }

    fn visit_code(&mut self, _id: &BlockId, content: Option<&CodeContent>) {
        let code = content.and_then(|content| content.code.as_deref()).unwrap_or("");
        let language = content
            .and_then(|content| content.language.as_deref())
            .unwrap_or("javascript");

        self.ctx.open("<div class=\"code-editor\">");
        self.ctx.open("<select name=\"language\">");
        let mut languages: Vec<&str> = SUGGESTED_LANGUAGES.to_vec();
        if !languages.contains(&language) {
            languages.push(language);
        }
        for option in languages {
            self.ctx.add_line(&format!(
                "<option{}{}>{}</option>",
                attr("value", option),
                if option == language { " selected" } else { "" },
                escape_html(language_label(option)),
            ));
        }
        self.ctx.close("</select>");
        self.ctx.add_line(&format!(
            "<textarea name=\"code\" placeholder=\"コードを入力...\" spellcheck=\"false\">{}</textarea>",
            escape_html(code)
        ));
        self.ctx.close("</div>");
    }
}
