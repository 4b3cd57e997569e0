use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::{CaptionSource, CaptionSourceError};
use crate::domain::ContentId;
use crate::infrastructure::text_processing::format_captions;

const CAPTION_EXTENSIONS: [&str; 3] = ["txt", "vtt", "srt"];

/// Reads pre-fetched captions from `<base>/<content_id>.{txt,vtt,srt}`.
///
/// `.txt` files are plain transcripts and are only trimmed; cue markup is
/// stripped from `.vtt` and `.srt` files.
pub struct LocalCaptionSource {
    base_path: PathBuf,
}

impl LocalCaptionSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait]
impl CaptionSource for LocalCaptionSource {
    async fn fetch(&self, content_id: &ContentId) -> Result<String, CaptionSourceError> {
        for extension in CAPTION_EXTENSIONS {
            let path = self
                .base_path
                .join(format!("{}.{}", content_id.as_str(), extension));

            match tokio::fs::read_to_string(&path).await {
                Ok(raw) => {
                    let transcript = match extension {
                        "txt" => raw.trim().to_string(),
                        _ => format_captions(&raw),
                    };
                    tracing::debug!(
                        content_id = %content_id,
                        path = %path.display(),
                        chars = transcript.chars().count(),
                        "Captions loaded"
                    );
                    if transcript.is_empty() {
                        return Err(CaptionSourceError::Unavailable {
                            content_id: content_id.clone(),
                            reason: "caption file is empty".to_string(),
                        });
                    }
                    return Ok(transcript);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(CaptionSourceError::Unavailable {
                        content_id: content_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Err(CaptionSourceError::Unavailable {
            content_id: content_id.clone(),
            reason: "no caption file found".to_string(),
        })
    }
}
