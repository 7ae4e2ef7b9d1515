use crate::block::{
    Block, BlockId, ButtonProps, CodeContent, HeadingProps, ImageContent, VideoProps,
};

/// Visitor over the block variants.
///
/// Every method is required, so adding a variant to [`Block`] forces every
/// renderer to handle it.
pub trait BlockVisitor {
    fn visit_heading(&mut self, id: &BlockId, props: &HeadingProps);

    fn visit_video(&mut self, id: &BlockId, props: &VideoProps);

    fn visit_button(&mut self, id: &BlockId, props: &ButtonProps);

    fn visit_image(&mut self, id: &BlockId, content: Option<&ImageContent>);

    fn visit_code(&mut self, id: &BlockId, content: Option<&CodeContent>);
}

pub fn walk_block<V: BlockVisitor>(visitor: &mut V, block: &Block) {
    match block {
        Block::Heading { id, props, .. } => visitor.visit_heading(id, props),
        Block::Video { id, props, .. } => visitor.visit_video(id, props),
        Block::Button { id, props, .. } => visitor.visit_button(id, props),
        Block::Image { id, content, .. } => visitor.visit_image(id, content.as_ref()),
        Block::Code { id, content, .. } => visitor.visit_code(id, content.as_ref()),
    }
}

pub fn walk_blocks<'a, V, I>(visitor: &mut V, blocks: I)
where
    V: BlockVisitor,
    I: IntoIterator<Item = &'a Block>,
{
    for block in blocks {
        walk_block(visitor, block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Align, HeadingLevel};

    #[derive(Default)]
    struct KindCollector {
        seen: Vec<String>,
    }

    impl BlockVisitor for KindCollector {
        fn visit_heading(&mut self, id: &BlockId, _props: &HeadingProps) {
            self.seen.push(format!("heading:{}", id));
        }

        fn visit_video(&mut self, id: &BlockId, _props: &VideoProps) {
            self.seen.push(format!("video:{}", id));
        }

        fn visit_button(&mut self, id: &BlockId, _props: &ButtonProps) {
            self.seen.push(format!("button:{}", id));
        }

        fn visit_image(&mut self, id: &BlockId, _content: Option<&ImageContent>) {
            self.seen.push(format!("image:{}", id));
        }

        fn visit_code(&mut self, id: &BlockId, _content: Option<&CodeContent>) {
            self.seen.push(format!("code:{}", id));
        }
    }

    #[test]
    fn test_walk_visits_in_sequence() {
        let blocks = vec![
            Block::code("c", None),
            Block::heading(
                "h",
                HeadingProps {
                    text: String::new(),
                    level: HeadingLevel::H1,
                    align: Align::Left,
                },
            ),
            Block::image("i", None),
        ];

        let mut collector = KindCollector::default();
        walk_blocks(&mut collector, &blocks);

        assert_eq!(collector.seen, vec!["code:c", "heading:h", "image:i"]);
    }
}
