pub mod style;
pub mod text;
pub mod time;

pub use style::paint;
pub use text::truncate;
pub use time::format_retrieved_at;
