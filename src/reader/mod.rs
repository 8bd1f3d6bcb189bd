pub mod page_reader;
pub mod render_queue;

pub use page_reader::{LoggingRenderer, PageRenderer, ReaderSession};
pub use render_queue::RenderQueue;
