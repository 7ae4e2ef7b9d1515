//! Default construction for new blocks

use crate::store::EditorStore;
use chrono::Utc;
use funnel_model::{
    Align, AspectRatio, Block, BlockId, BlockKind, ButtonProps, ButtonSize, ButtonVariant,
    CodeContent, HeadingLevel, HeadingProps, ImageContent, VideoProps,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_HEADING_TEXT: &str = "新しい見出し";
pub const DEFAULT_BUTTON_TEXT: &str = "クリック";
pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Hands out new blocks with placeholder content and fresh ids
/// of the form `block-<unix millis>-<9 base36 chars>`.
#[derive(Debug, Clone)]
pub struct BlockFactory {
    rng: StdRng,
}

impl BlockFactory {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic ids, for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_id(&mut self) -> BlockId {
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect();
        BlockId::new(format!("block-{}-{}", Utc::now().timestamp_millis(), suffix))
    }

    pub fn create(&mut self, kind: BlockKind) -> Block {
        let id = self.next_id();
        default_block(kind, id)
    }

    /// Like [`create`](Self::create), but never returns an id the store
    /// has already seen
    pub fn create_for(&mut self, store: &EditorStore, kind: BlockKind) -> Block {
        let mut id = self.next_id();
        while store.is_id_taken(&id) {
            id = self.next_id();
        }
        default_block(kind, id)
    }
}

impl Default for BlockFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Placeholder block of `kind`
pub fn default_block(kind: BlockKind, id: BlockId) -> Block {
    match kind {
        BlockKind::Heading => Block::heading(
            id,
            HeadingProps {
                text: DEFAULT_HEADING_TEXT.to_string(),
                level: HeadingLevel::H2,
                align: Align::Left,
            },
        ),
        BlockKind::Video => Block::video(
            id,
            VideoProps {
                url: String::new(),
                title: String::new(),
                aspect_ratio: AspectRatio::Widescreen,
            },
        ),
        BlockKind::Button => Block::button(
            id,
            ButtonProps {
                text: DEFAULT_BUTTON_TEXT.to_string(),
                url: String::new(),
                variant: ButtonVariant::Primary,
                size: ButtonSize::Md,
            },
        ),
        BlockKind::Image => Block::image(
            id,
            Some(ImageContent {
                image_url: Some(String::new()),
                caption: Some(String::new()),
            }),
        ),
        BlockKind::Code => Block::code(
            id,
            Some(CodeContent {
                code: Some(String::new()),
                language: Some(DEFAULT_CODE_LANGUAGE.to_string()),
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_shape() {
        let mut factory = BlockFactory::seeded(7);
        let id = factory.next_id();

        let parts: Vec<&str> = id.as_str().splitn(3, '-').collect();
        assert_eq!(parts[0], "block");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_ids_do_not_collide() {
        let mut factory = BlockFactory::seeded(42);
        let ids: HashSet<BlockId> = (0..1000).map(|_| factory.next_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_defaults_per_kind() {
        let mut factory = BlockFactory::seeded(1);
        for kind in BlockKind::ALL {
            assert_eq!(factory.create(kind).kind(), kind);
        }

        match factory.create(BlockKind::Heading) {
            Block::Heading { props, .. } => {
                assert_eq!(props.text, DEFAULT_HEADING_TEXT);
                assert_eq!(props.level, HeadingLevel::H2);
                assert_eq!(props.align, Align::Left);
            }
            other => panic!("unexpected block {:?}", other),
        }

        match factory.create(BlockKind::Code) {
            Block::Code { content, .. } => {
                assert_eq!(content.unwrap().language.as_deref(), Some("javascript"));
            }
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn test_create_for_skips_taken_ids() {
        let mut store = EditorStore::new();
        let mut first = BlockFactory::seeded(3);
        let block = first.create(BlockKind::Button);
        store.add_block(block.clone()).unwrap();

        // Same seed, so the first candidate id repeats unless the clock moved
        let mut replay = BlockFactory::seeded(3);
        let fresh = replay.create_for(&store, BlockKind::Button);
        assert_ne!(fresh.id(), block.id());
        assert!(store.add_block(fresh).is_ok());
    }
}
