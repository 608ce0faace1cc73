use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::{pin_mut, Stream, StreamExt};
use reqwest::{header, Client, StatusCode};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use super::structs::tts_request::TTSRequest;
use crate::credentials::credentials::Credentials;
use crate::errors::{
    constants::{MSGPACK_CONTENT_TYPE, TEMP_FILE_PREFIX},
    validation, FishTTSError, Result,
};

/// Client for the Fish Audio TTS endpoint.
#[derive(Clone, Debug)]
pub struct FishAudio {
    client: Client,
    temp_dir: PathBuf,
}

impl FishAudio {
    /// Create a client that writes its output files into `temp_dir`.
    ///
    /// The underlying HTTP client has no timeout; a request waits until the
    /// server closes the stream.
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self::with_client(Client::new(), temp_dir)
    }

    pub fn with_client(client: Client, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            temp_dir: temp_dir.into(),
        }
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Synthesize `request` and stream the audio into a new temp file.
    ///
    /// Returns the path of the temp file. Nothing is sent when the key or URL
    /// is empty, and the temp file is removed again if the stream fails.
    ///
    /// Example:
    /// ```rust,no_run
    /// # async fn run() -> fish_tts::Result<()> {
    /// use fish_tts::credentials::credentials::Credentials;
    /// use fish_tts::tts::fish_audio::{fish_audio::FishAudio, structs::tts_request::TTSRequest};
    ///
    /// let client = FishAudio::new(std::env::temp_dir());
    /// let request = TTSRequest::builder("Hello").build()?;
    /// let path = client
    ///     .synthesize(&Credentials::new("KEY", "https://api.fish.audio/v1/tts"), &request)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self, request), fields(format = %request.format()))]
    pub async fn synthesize(
        &self,
        credentials: &Credentials,
        request: &TTSRequest,
    ) -> Result<PathBuf> {
        validation::validate_credentials(&credentials.api_key, &credentials.api_url)?;

        let body = request.to_msgpack()?;
        debug!(body_len = body.len(), "Sending TTS request");

        let response = self
            .client
            .post(&credentials.api_url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", credentials.api_key),
            )
            .header(header::CONTENT_TYPE, MSGPACK_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(error = %err, "Cannot read body of rejected TTS request");
                    format!("<unreadable response body: {}>", err)
                }
            };
            warn!(status = status.as_u16(), "TTS request rejected");
            return Err(FishTTSError::remote_rejected(status.as_u16(), body));
        }

        let temp_file = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .suffix(&format!(".{}", request.format().extension()))
            .tempfile_in(&self.temp_dir)?;
        let (file, temp_path) = temp_file.into_parts();
        let mut file = tokio::fs::File::from_std(file);

        // temp_path deletes the file on drop until it is kept
        let written = write_stream(&mut file, response.bytes_stream()).await?;
        drop(file);
        let path = temp_path.keep().map_err(|err| err.error)?;

        info!(path = %path.display(), bytes = written, "Received synthesized audio");
        Ok(path)
    }
}

/// Copy every chunk of `stream` into `writer` and flush it.
pub async fn write_stream<W, S, E>(writer: &mut W, stream: S) -> Result<u64>
where
    W: AsyncWrite + Unpin,
    S: Stream<Item = std::result::Result<Bytes, E>>,
    FishTTSError: From<E>,
{
    pin_mut!(stream);

    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    writer.flush().await?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::io::Write;
    use tempfile::TempDir;

    fn credentials(server: &mockito::ServerGuard, api_key: &str) -> Credentials {
        Credentials::new(api_key, format!("{}/v1/tts", server.url()))
    }

    fn temp_files(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    #[tokio::test]
    async fn test_write_stream_concatenates_chunks() {
        let chunks = futures::stream::iter(vec![
            Ok::<_, std::io::Error>(Bytes::from_static(b"ID3")),
            Ok(Bytes::new()),
            Ok(Bytes::from_static(b"\x00\x01\x02")),
        ]);

        let mut output = Vec::new();
        let written = write_stream(&mut output, chunks).await.unwrap();
        assert_eq!(written, 6);
        assert_eq!(output, b"ID3\x00\x01\x02");
    }

    #[tokio::test]
    async fn test_write_stream_propagates_chunk_error() {
        let chunks = futures::stream::iter(vec![
            Ok(Bytes::from_static(b"abc")),
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "reset")),
        ]);

        let mut output = Vec::new();
        let result = write_stream(&mut output, chunks).await;
        assert!(matches!(result, Err(FishTTSError::Io(_))));
    }

    #[tokio::test]
    async fn test_synthesize_streams_body_to_temp_file() {
        let mut server = Server::new_async().await;
        let audio: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
        let request = TTSRequest::builder("Hello").build().unwrap();

        let mock = server
            .mock("POST", "/v1/tts")
            .match_header("authorization", "Bearer test-key")
            .match_header("content-type", "application/msgpack")
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(&audio)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let client = FishAudio::new(dir.path());
        let path = client
            .synthesize(&credentials(&server, "test-key"), &request)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(std::fs::read(&path).unwrap(), audio);
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp3"));
    }

    #[tokio::test]
    async fn test_synthesize_non_200_returns_status_and_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/tts")
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let client = FishAudio::new(dir.path());
        let request = TTSRequest::builder("Hello").build().unwrap();
        let error = client
            .synthesize(&credentials(&server, "test-key"), &request)
            .await
            .unwrap_err();

        mock.assert_async().await;
        let message = error.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("forbidden"));
        assert!(temp_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_synthesize_removes_temp_file_when_stream_breaks() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/tts")
            .with_status(200)
            .with_chunked_body(|w| {
                w.write_all(b"partial")?;
                Err(std::io::Error::other("connection cut"))
            })
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let client = FishAudio::new(dir.path());
        let request = TTSRequest::builder("Hello").build().unwrap();
        let result = client
            .synthesize(&credentials(&server, "test-key"), &request)
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FishTTSError::Http(_))));
        assert!(temp_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_rejection_with_unreadable_body_keeps_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/tts")
            .with_status(500)
            .with_chunked_body(|w| {
                w.write_all(b"inter")?;
                Err(std::io::Error::other("connection cut"))
            })
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let client = FishAudio::new(dir.path());
        let request = TTSRequest::builder("Hello").build().unwrap();
        let error = client
            .synthesize(&credentials(&server, "test-key"), &request)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            FishTTSError::RemoteRejected { status: 500, .. }
        ));
        assert!(error.to_string().contains("unreadable response body"));
    }

    #[tokio::test]
    async fn test_synthesize_without_key_sends_nothing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let client = FishAudio::new(dir.path());
        let request = TTSRequest::builder("Hello").build().unwrap();
        let result = client.synthesize(&credentials(&server, ""), &request).await;

        assert!(matches!(result, Err(FishTTSError::MissingApiKey)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_synthesize_without_url() {
        let dir = TempDir::new().unwrap();
        let client = FishAudio::new(dir.path());
        let request = TTSRequest::builder("Hello").build().unwrap();
        let result = client
            .synthesize(&Credentials::new("test-key", ""), &request)
            .await;

        assert!(matches!(result, Err(FishTTSError::MissingApiUrl)));
    }
}
