mod local_caption_source;

pub use local_caption_source::LocalCaptionSource;
