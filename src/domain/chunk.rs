/// A bounded slice of a transcript.
///
/// `index` is the only ordering key used downstream; `offset` is the
/// position of the first char of `text` inside the transcript, in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
    pub offset: usize,
}

impl Chunk {
    pub fn new(index: usize, text: String, offset: usize) -> Self {
        Self {
            index,
            text,
            offset,
        }
    }

    /// One-based position, as shown to the model and to humans.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
