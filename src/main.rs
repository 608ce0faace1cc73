use std::path::PathBuf;

use clap::Parser;
use fish_tts::{
    errors::constants::{DEFAULT_CHUNK_LENGTH, DEFAULT_CONFIG_PATH, DEFAULT_MP3_BITRATE},
    trace::init_tracing_subscriber,
    AudioFormat, Config, ConversionInput, CredentialCache, Credentials, FishAudio, Latency,
    Mp3Bitrate, OutputArchiver, SpeechInput, SynthesisOptions, TTS,
};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "fish-tts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fish Audio text-to-speech client")]
struct Args {
    /// Text to convert to speech
    text: String,

    /// API key; defaults to the cached key
    #[arg(long)]
    api_key: Option<String>,

    /// API URL; defaults to the cached URL
    #[arg(long)]
    api_url: Option<String>,

    /// Reference audio used for voice cloning
    #[arg(long, value_name = "FILE")]
    reference_audio: Option<PathBuf>,

    /// Transcript of the reference audio
    #[arg(long, default_value = "")]
    reference_text: String,

    /// Id of a voice model stored on the server
    #[arg(long)]
    reference_id: Option<String>,

    #[arg(long, default_value_t = DEFAULT_CHUNK_LENGTH)]
    chunk_length: u16,

    /// wav, pcm or mp3
    #[arg(long, default_value = "mp3")]
    format: AudioFormat,

    /// 64, 128 or 192
    #[arg(long, default_value_t = DEFAULT_MP3_BITRATE)]
    mp3_bitrate: u16,

    /// normal or balanced
    #[arg(long, default_value = "normal")]
    latency: Latency,

    /// Disable server-side text normalization
    #[arg(long)]
    no_normalize: bool,

    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load config
    let config = Config::load(&args.config)?;
    let otel_guard = init_tracing_subscriber(&config.log_filter, config.otel_http_url.as_deref())?;
    debug!(?config, "Loaded config");

    let credential_cache = CredentialCache::new(&config.credential_file);
    let cached = credential_cache.load().await;
    let credentials = Credentials::new(
        args.api_key.unwrap_or(cached.api_key),
        args.api_url.unwrap_or(cached.api_url),
    );

    let options = SynthesisOptions {
        chunk_length: args.chunk_length,
        format: args.format,
        mp3_bitrate: Mp3Bitrate::try_from(args.mp3_bitrate)?,
        reference_id: args.reference_id,
        normalize: !args.no_normalize,
        latency: args.latency,
    };

    let mut speech = SpeechInput::new(args.text).with_options(options);
    if let Some(path) = args.reference_audio {
        speech = speech.with_reference(path, args.reference_text);
    }

    let temp_dir = config.temp_dir.clone().unwrap_or_else(std::env::temp_dir);
    let tts = TTS::new(
        credential_cache,
        FishAudio::new(temp_dir),
        OutputArchiver::open(&config.cache_dir).await?,
    );

    match tts.convert(ConversionInput { credentials, speech }).await {
        Ok(output) => {
            println!("{}", output.message());
            println!("{}", output.audio_path.display());
            Ok(())
        }
        Err(err) if err.is_user_facing() => {
            eprintln!("{}", err);
            drop(otel_guard);
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
