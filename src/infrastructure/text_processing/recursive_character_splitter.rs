use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::Chunk;

/// Fixed-window character splitter.
///
/// Windows are `chunk_size` chars long and start every
/// `chunk_size - chunk_overlap` chars, so neighbours share exactly
/// `chunk_overlap` chars. The final window ends at the end of the text.
#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, TextSplitterError> {
        if chunk_size == 0 {
            return Err(TextSplitterError::InvalidConfig(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(TextSplitterError::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }
}

impl TextSplitter for RecursiveCharacterSplitter {
    fn split(&self, text: &str) -> Result<Vec<Chunk>, TextSplitterError> {
        if text.trim().is_empty() {
            return Err(TextSplitterError::EmptyInput);
        }

        let chars: Vec<char> = text.chars().collect();
        let total_len = chars.len();
        let step = self.chunk_size - self.chunk_overlap;

        let mut chunks = Vec::with_capacity(total_len / step + 1);
        let mut offset = 0;
        loop {
            let end = (offset + self.chunk_size).min(total_len);
            let chunk_text: String = chars[offset..end].iter().collect();
            chunks.push(Chunk::new(chunks.len(), chunk_text, offset));

            if end == total_len {
                break;
            }
            offset += step;
        }

        Ok(chunks)
    }
}
