//! # Public Renderer
//!
//! Read-only page for a published funnel. Buttons become real outbound
//! links; there is no selection and nothing is editable.

use crate::context::{attr, escape_html, safe_url, Context, RenderOptions, LINK_SCHEMES, MEDIA_SCHEMES};
use crate::error::RenderError;
use crate::styles::{aspect_ratio_class, button_class, heading_class};
use funnel_model::{
    walk_blocks, BlockId, BlockVisitor, ButtonProps, CodeContent, Funnel, HeadingProps,
    ImageContent, PublishedData, Theme, VideoProps,
};

const DEFAULT_TITLE: &str = "Funnel";

/// Render a published funnel's stored document.
///
/// An unpublished funnel is [`RenderError::NotFound`], the same outcome
/// callers report for a missing one.
pub fn render_published_funnel(
    funnel: &Funnel,
    options: RenderOptions,
) -> Result<String, RenderError> {
    if !funnel.is_published {
        tracing::debug!(slug = %funnel.slug, "Funnel is not published");
        return Err(RenderError::NotFound(funnel.slug.clone()));
    }

    let document = match funnel.document() {
        None => PublishedData::empty(),
        Some(decoded) => {
            let decoded = decoded?;
            for skipped in &decoded.skipped {
                tracing::warn!(
                    slug = %funnel.slug,
                    index = skipped.index,
                    block_type = ?skipped.block_type,
                    "Skipping block on public page"
                );
            }
            decoded.document
        }
    };

    let options = RenderOptions {
        title: options.title.clone().or_else(|| Some(funnel.name.clone())),
        ..options
    };
    Ok(render_public(&document, options))
}

/// Render `document` read-only, blocks in `order`
pub fn render_public(document: &PublishedData, options: RenderOptions) -> String {
    let mut ctx = Context::new(options);
    let full_page = ctx.options.full_page;

    if full_page {
        let title = ctx
            .options
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        ctx.add_line("<!DOCTYPE html>");
        ctx.open("<html lang=\"ja\">");
        compile_head(&title, &mut ctx);
        ctx.open("<body>");
    }

    ctx.open(&format!(
        "<main class=\"funnel-page\"{}>",
        theme_style(document.theme.as_ref())
    ));
    ctx.open("<div class=\"blocks\">");

    let mut blocks: Vec<_> = document.blocks.iter().collect();
    blocks.sort_by_key(|block| block.order());
    walk_blocks(&mut PublicBlocks { ctx: &mut ctx }, blocks);

    ctx.close("</div>");
    ctx.close("</main>");

    if full_page {
        ctx.close("</body>");
        ctx.close("</html>");
    }

    ctx.into_output()
}

fn compile_head(title: &str, ctx: &mut Context) {
    ctx.open("<head>");
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));
    ctx.close("</head>");
}

/// Theme as CSS custom properties on the page wrapper
fn theme_style(theme: Option<&Theme>) -> String {
    let Some(theme) = theme else {
        return String::new();
    };

    let mut declarations = Vec::new();
    if let Some(color) = &theme.primary_color {
        declarations.push(format!("--funnel-primary-color: {}", color));
    }
    if let Some(font) = &theme.font_family {
        declarations.push(format!("--funnel-font-family: {}", font));
    }

    if declarations.is_empty() {
        String::new()
    } else {
        attr("style", &declarations.join("; "))
    }
}

struct PublicBlocks<'a> {
    ctx: &'a mut Context,
}

impl BlockVisitor for PublicBlocks<'_> {
    fn visit_heading(&mut self, _id: &BlockId, props: &HeadingProps) {
        let tag = props.level.tag();
        self.ctx.add_line(&format!(
            "<{tag}{}{}>{}</{tag}>",
            attr("class", heading_class(props.level)),
            attr("style", &format!("text-align: {}", props.align.as_str())),
            escape_html(&props.text),
        ));
    }

    fn visit_video(&mut self, id: &BlockId, props: &VideoProps) {
        if props.url.is_empty() {
            return;
        }
        let Some(url) = safe_url(&props.url, MEDIA_SCHEMES) else {
            tracing::warn!(block = %id, "Skipping video with unsupported URL scheme");
            return;
        };

        self.ctx.open("<div class=\"w-full\">");
        self.ctx.open(&format!(
            "<div{}{}>",
            attr(
                "class",
                &format!("w-full {} bg-gray-900 rounded-2xl overflow-hidden", aspect_ratio_class(props.aspect_ratio)),
            ),
            attr("style", &format!("aspect-ratio: {}", props.aspect_ratio.css())),
        ));
        self.ctx.add_line(&format!(
            "<iframe{}{} class=\"w-full h-full\" allowfullscreen></iframe>",
            attr("src", url),
            attr("title", &props.title),
        ));
        self.ctx.close("</div>");
        if !props.title.is_empty() {
            self.ctx.add_line(&format!(
                "<h2 class=\"text-2xl font-black\">{}</h2>",
                escape_html(&props.title)
            ));
        }
        self.ctx.close("</div>");
    }

    fn visit_button(&mut self, _id: &BlockId, props: &ButtonProps) {
        self.ctx.open("<div class=\"flex justify-center\">");
        self.ctx.add_line(&format!(
            "<a{}{} target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            attr("href", safe_url(&props.url, LINK_SCHEMES).unwrap_or("#")),
            attr("class", &button_class(props.variant, props.size)),
            escape_html(&props.text),
        ));
        self.ctx.close("</div>");
    }

    fn visit_image(&mut self, id: &BlockId, content: Option<&ImageContent>) {
        let Some(content) = content else { return };
        let Some(url) = content.image_url.as_deref().filter(|url| !url.is_empty()) else {
            return;
        };
        let Some(url) = safe_url(url, MEDIA_SCHEMES) else {
            tracing::warn!(block = %id, "Skipping image with unsupported URL scheme");
            return;
        };
        let caption = content.caption.as_deref().filter(|caption| !caption.is_empty());

        self.ctx.open("<figure>");
        self.ctx.add_line(&format!(
            "<img{}{} class=\"w-full rounded-lg\">",
            attr("src", url),
            attr("alt", caption.unwrap_or("画像")),
        ));
        if let Some(caption) = caption {
            self.ctx
                .add_line(&format!("<figcaption>{}</figcaption>", escape_html(caption)));
        }
        self.ctx.close("</figure>");
    }

    fn visit_code(&mut self, _id: &BlockId, content: Option<&CodeContent>) {
        let Some(content) = content else { return };
        let Some(code) = content.code.as_deref().filter(|code| !code.is_empty()) else {
            return;
        };

        let class = content
            .language
            .as_deref()
            .filter(|language| !language.is_empty())
            .map(|language| attr("class", &format!("language-{}", language)))
            .unwrap_or_default();

        self.ctx
            .add_line(&format!("<pre><code{}>{}</code></pre>", class, escape_html(code)));
    }
}
