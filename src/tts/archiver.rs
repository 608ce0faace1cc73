use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::fs::OpenOptions;
use tracing::{debug, info, warn};

use super::fish_audio::structs::audio_format::AudioFormat;
use crate::errors::{constants::*, FishTTSError, Result};

/// Durable copy of a generated audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedOutput {
    pub file_name: String,
    pub path: PathBuf,
}

/// Keeps timestamped copies of generated audio in the cache directory.
#[derive(Debug, Clone)]
pub struct OutputArchiver {
    cache_dir: PathBuf,
}

impl OutputArchiver {
    /// Open the archive, creating the cache directory if it does not exist.
    pub async fn open(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();
        tokio::fs::create_dir_all(&cache_dir).await?;
        debug!(cache_dir = %cache_dir.display(), "Opened output archive");
        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Copy `source` into the archive under a name derived from the
    /// current time. `source` is left in place.
    pub async fn archive(&self, source: &Path, format: AudioFormat) -> Result<ArchivedOutput> {
        self.archive_at(source, format, Local::now()).await
    }

    #[tracing::instrument(skip(self))]
    pub(crate) async fn archive_at(
        &self,
        source: &Path,
        format: AudioFormat,
        at: DateTime<Local>,
    ) -> Result<ArchivedOutput> {
        let stem = format!(
            "{}{}",
            ARCHIVE_FILE_PREFIX,
            at.format(ARCHIVE_TIMESTAMP_FORMAT)
        );

        let mut reader = tokio::fs::File::open(source).await?;

        for attempt in 0..=MAX_ARCHIVE_DISAMBIGUATOR {
            let file_name = archive_file_name(&stem, attempt, format);
            let path = self.cache_dir.join(&file_name);

            // create_new keeps an earlier archive from the same second intact
            let mut writer = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(writer) => writer,
                Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err.into()),
            };

            let copied = match tokio::io::copy(&mut reader, &mut writer).await {
                Ok(copied) => copied,
                Err(err) => {
                    drop(writer);
                    if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                        warn!(
                            path = %path.display(),
                            error = %remove_err,
                            "Cannot remove partial archive"
                        );
                    }
                    return Err(err.into());
                }
            };
            info!(path = %path.display(), bytes = copied, "Archived generated audio");
            return Ok(ArchivedOutput { file_name, path });
        }

        Err(FishTTSError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("too many archived outputs named {}", stem),
        )))
    }
}

fn archive_file_name(stem: &str, attempt: u32, format: AudioFormat) -> String {
    if attempt == 0 {
        format!("{}.{}", stem, format.extension())
    } else {
        format!("{}_{}.{}", stem, attempt, format.extension())
    }
}
