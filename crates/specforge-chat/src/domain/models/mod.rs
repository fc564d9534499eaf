mod action;
mod content_block;
mod event;
mod exchange;
mod message;
mod role;
mod session;
mod spec;
mod spec_client;

pub use action::*;
pub use content_block::*;
pub use event::*;
pub use exchange::*;
pub use message::*;
pub use role::*;
pub use session::*;
pub use spec::*;
pub use spec_client::*;
