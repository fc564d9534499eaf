mod actions;
mod chat_state;
mod formatter;
mod pipeline;
mod sessions;
mod tokenizer;

pub use actions::*;
pub use chat_state::*;
pub use formatter::*;
pub use pipeline::*;
pub use sessions::*;
pub use tokenizer::*;
