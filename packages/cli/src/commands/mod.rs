pub mod create;
pub mod edit;
pub mod init;
pub mod preview;
pub mod publish;
pub mod render;
pub mod serve;

pub use create::{create, NewArgs};
pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use preview::{preview, PreviewArgs};
pub use publish::{publish, PublishArgs};
pub use render::{render, RenderArgs};
pub use serve::{serve, ServeArgs};
