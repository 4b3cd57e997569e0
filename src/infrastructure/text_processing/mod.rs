mod caption_formatter;
mod recursive_character_splitter;

pub use caption_formatter::format_captions;
pub use recursive_character_splitter::RecursiveCharacterSplitter;
