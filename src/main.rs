// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{error, warn, info, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::{Read, Write};
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use morse_translator::app_config::{self, AudioBackend, Config, PlaybackConfig};
use morse_translator::app_controller::Controller;
use morse_translator::errors::AudioError;
use morse_translator::player::PlaybackOutcome;

/// CLI Wrapper for AudioBackend to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliAudioBackend {
    Null,
    Wav,
    Cpal,
}

impl From<CliAudioBackend> for AudioBackend {
    fn from(cli_backend: CliAudioBackend) -> Self {
        match cli_backend {
            CliAudioBackend::Null => AudioBackend::Null,
            CliAudioBackend::Wav => AudioBackend::Wav,
            CliAudioBackend::Cpal => AudioBackend::Cpal,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert plain text to Morse code
    Encode {
        /// Text to encode (read from stdin when omitted); options go before it
        #[arg(value_name = "TEXT", allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Convert Morse code to plain text
    Decode {
        /// Morse code to decode (read from stdin when omitted); options go before it
        #[arg(value_name = "MORSE", allow_hyphen_values = true)]
        morse: Vec<String>,
    },

    /// Play Morse code as audio
    Play(PlayArgs),

    /// Menu-driven console for encoding, decoding and playback
    Interactive,

    /// Generate shell completions for morse
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Morse code to play, or plain text with --text (read from stdin when omitted).
    /// Options go before it.
    #[arg(value_name = "INPUT", allow_hyphen_values = true)]
    input: Vec<String>,

    /// Treat the input as plain text and encode it first
    #[arg(short, long)]
    text: bool,

    /// Morse unit (dot length) in milliseconds
    #[arg(short, long, conflicts_with = "wpm")]
    unit_ms: Option<u64>,

    /// Speed in words per minute (PARIS standard)
    #[arg(short, long)]
    wpm: Option<u32>,

    /// Tone frequency in Hz
    #[arg(short, long)]
    frequency: Option<u32>,

    /// Audio backend
    #[arg(short, long, value_enum)]
    backend: Option<CliAudioBackend>,

    /// Render to this WAV file (implies --backend wav)
    #[arg(long, value_name = "FILE")]
    wav: Option<PathBuf>,
}

/// Morse Code Translator
///
/// Converts text to Morse code and back, and plays Morse code as audio tones.
#[derive(Parser, Debug)]
#[command(name = "morse")]
#[command(version)]
#[command(about = "Text to Morse code translator with tone playback")]
#[command(long_about = "Converts plain text to Morse code and back, and plays Morse code as a 700 Hz tone.

EXAMPLES:
    morse encode Hello World                      # .... . .-.. .-.. --- / .-- --- .-. .-.. -..
    morse decode '... --- ...'                    # SOS
    morse play '... --- ...'                      # Play through the configured backend
    morse play --text --wpm 15 'CQ CQ'            # Encode, then play at 15 WPM
    morse play --wav sos.wav '... --- ...'        # Render to a WAV file
    morse interactive                             # Menu-driven console
    morse completions bash > morse.bash           # Generate bash completions
    morse -l debug decode -.-. --.-              # Options before the message

MESSAGES:
    Message arguments may start with '-' (Morse, negative numbers), so everything
    after the first message word is taken as message. Put options, including
    --log-level and --config-path, before it.

CONFIGURATION:
    Configuration is stored in morse.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "morse.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level.min(log::max_level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here; the effective level is set from CLI/config below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    // Completions don't need any configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "morse", &mut std::io::stdout());
        return Ok(());
    }

    // Load or create configuration
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    match cli.command {
        Commands::Encode { text } => {
            let controller = Controller::with_config(config)?;
            let input = join_or_stdin(text)?;
            println!("{}", controller.encode(&input));
        }
        Commands::Decode { morse } => {
            let controller = Controller::with_config(config)?;
            let input = join_or_stdin(morse)?;
            println!("{}", controller.decode(&input));
        }
        Commands::Play(args) => {
            run_play(args, config).await?;
        }
        Commands::Interactive => {
            let controller = Controller::with_config(config)?;
            let stdin = std::io::BufReader::new(std::io::stdin());
            controller.run_interactive(stdin, std::io::stdout()).await?;
        }
        Commands::Completions { .. } => unreachable!("handled before loading configuration"),
    }

    Ok(())
}

async fn run_play(args: PlayArgs, mut config: Config) -> Result<()> {
    apply_play_overrides(&args, &mut config.playback);

    let controller = Controller::with_config(config)?;
    let input = join_or_stdin(args.input)?;
    let morse = if args.text {
        controller.encode(&input)
    } else {
        input
    };

    if controller.plan_is_empty(&morse) {
        warn!("No Morse code to play");
        return Ok(());
    }

    let playback = &controller.config().playback;
    info!("Playing at {} WPM ({} ms unit, {} Hz) via {}",
          playback.wpm(), playback.unit_ms, playback.frequency_hz, playback.backend);
    debug!("Morse: {}", morse);

    match controller.play_until_interrupted(&morse).await {
        Ok(PlaybackOutcome::Completed) => {
            if playback.backend == AudioBackend::Wav {
                println!("{}", playback.wav_path);
            }
            Ok(())
        }
        Ok(PlaybackOutcome::Cancelled) => {
            warn!("Playback stopped before the end of the message");
            Ok(())
        }
        Err(e) if e.downcast_ref::<AudioError>().is_some_and(AudioError::is_unavailable) => {
            // Not fatal: report and exit normally
            error!("Audio playback is not available: {}", e);
            error!("Check your sound device, or render to a file with --wav <FILE>");
            Ok(())
        }
        Err(e) => Err(e).context("Playback failed"),
    }
}

fn apply_play_overrides(args: &PlayArgs, playback: &mut PlaybackConfig) {
    if let Some(unit_ms) = args.unit_ms {
        playback.unit_ms = unit_ms;
    }
    if let Some(wpm) = args.wpm {
        playback.unit_ms = PlaybackConfig::unit_from_wpm(wpm);
    }
    if let Some(frequency) = args.frequency {
        playback.frequency_hz = frequency;
    }
    if let Some(backend) = &args.backend {
        playback.backend = backend.clone().into();
    }
    if let Some(path) = &args.wav {
        playback.backend = AudioBackend::Wav;
        playback.wav_path = path.to_string_lossy().to_string();
    }
}

// Join positional words, or read all of stdin when there are none
fn join_or_stdin(words: Vec<String>) -> Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
}
