use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::app_config::{AudioBackend, Config};
use crate::audio;
use crate::codec::{MorseCodec, MorseDocument};
use crate::errors::AudioError;
use crate::player::{CancelToken, MorseTiming, PlaybackOutcome, PlaybackPlan, ThreadPacer, ToneSequencer};

// @module: Application controller for Morse translation and playback

// What a prompt produced
enum UserInput {
    Line(String),
    EndOfInput,
    Interrupted,
}

/// Main application controller used by the command-line shell
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Draw a progress bar while playing
    show_progress: bool,
}

impl Controller {
    /// Create a new controller for test purposes: silent backend, no progress bar
    pub fn new_for_test() -> Result<Self> {
        let mut config = Config::default();
        config.playback.backend = AudioBackend::Null;
        Ok(Self::with_config(config)?.with_progress(false))
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            show_progress: true,
        })
    }

    /// Enable or disable the playback progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encode text, warning about dropped characters
    pub fn encode(&self, text: &str) -> String {
        let encoded = MorseCodec::encode_detailed(text);
        if encoded.skipped > 0 {
            warn!("{} character(s) have no Morse code and were skipped", encoded.skipped);
        }
        encoded.morse
    }

    /// Decode Morse, warning about unknown patterns
    pub fn decode(&self, morse: &str) -> String {
        let decoded = MorseCodec::decode_detailed(morse);
        if decoded.unknown > 0 {
            warn!("{} unknown pattern(s) decoded as '?'", decoded.unknown);
        }
        decoded.text
    }

    /// Whether a Morse string would produce no tones at all
    pub fn plan_is_empty(&self, morse: &str) -> bool {
        let timing = MorseTiming::from_millis(self.config.playback.unit_ms);
        PlaybackPlan::build(&MorseDocument::parse(morse), &timing).tone_count() == 0
    }

    /// Play a Morse string on a blocking worker until done or cancelled
    pub async fn play(&self, morse: &str, cancel: CancelToken) -> Result<PlaybackOutcome> {
        let playback = self.config.playback.clone();
        let morse = morse.to_string();
        let show_progress = self.show_progress;

        let start_time = std::time::Instant::now();
        let outcome = tokio::task::spawn_blocking(move || -> Result<PlaybackOutcome, AudioError> {
            let sink = audio::create_sink(&playback)?;
            let pacer = ThreadPacer::new(cancel);
            let mut sequencer = ToneSequencer::from_config(&playback, sink, pacer);

            let plan = sequencer.plan(&morse);
            let progress_bar = Self::playback_progress_bar(&plan, show_progress);
            let result = sequencer.play_plan(&plan, |_, segment| {
                progress_bar.inc(segment.duration().as_millis() as u64);
            });
            progress_bar.finish_and_clear();
            result
        })
        .await
        .context("Playback task failed")??;

        debug!("Playback finished in {}", Self::format_duration(start_time.elapsed()));
        Ok(outcome)
    }

    /// Play a Morse string, stopping gracefully on Ctrl-C
    pub async fn play_until_interrupted(&self, morse: &str) -> Result<PlaybackOutcome> {
        let token = CancelToken::new();
        let watcher_token = token.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping playback");
                watcher_token.cancel();
            }
        });

        let result = self.play(morse, token).await;
        watcher.abort();
        result
    }

    /// Menu-driven console: encode, decode, play, exit.
    ///
    /// One Ctrl-C listener covers the whole session: it stops a playback in
    /// progress and ends the session at a prompt.
    pub async fn run_interactive<R, W>(&self, input: R, output: W) -> Result<()>
    where
        R: BufRead + Send + 'static,
        W: Write,
    {
        let (interrupt_tx, interrupts) = mpsc::unbounded_channel();
        let listener = tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if interrupt_tx.send(()).is_err() {
                    break;
                }
            }
        });

        let result = self.run_interactive_with(input, output, interrupts).await;
        listener.abort();
        result
    }

    /// Menu-driven console driven by an explicit interrupt channel
    pub async fn run_interactive_with<R, W>(
        &self,
        input: R,
        mut output: W,
        mut interrupts: UnboundedReceiver<()>,
    ) -> Result<()>
    where
        R: BufRead + Send + 'static,
        W: Write,
    {
        let mut lines = Self::spawn_line_reader(input);

        writeln!(output, "Morse Code Translator")?;
        writeln!(output, "---------------------")?;

        loop {
            writeln!(output)?;
            writeln!(output, "Choose an option:")?;
            writeln!(output, "1. Encode (Text to Morse)")?;
            writeln!(output, "2. Decode (Morse to Text)")?;
            writeln!(output, "3. Play Morse")?;
            writeln!(output, "4. Exit")?;
            write!(output, "Enter your choice (1-4): ")?;
            output.flush()?;

            let UserInput::Line(choice) = Self::next_input(&mut lines, &mut interrupts).await? else {
                writeln!(output)?;
                break;
            };

            match choice.trim() {
                "1" => {
                    write!(output, "Enter the plain text message: ")?;
                    output.flush()?;
                    let UserInput::Line(text) = Self::next_input(&mut lines, &mut interrupts).await? else {
                        writeln!(output)?;
                        break;
                    };
                    writeln!(output, "Encoded Morse Code: {}", self.encode(&text))?;
                }
                "2" => {
                    write!(output, "Enter the Morse code (space between letters, ' / ' between words): ")?;
                    output.flush()?;
                    let UserInput::Line(morse) = Self::next_input(&mut lines, &mut interrupts).await? else {
                        writeln!(output)?;
                        break;
                    };
                    writeln!(output, "Decoded Plain Text: {}", self.decode(&morse))?;
                }
                "3" => {
                    write!(output, "Enter the Morse code to play: ")?;
                    output.flush()?;
                    let UserInput::Line(morse) = Self::next_input(&mut lines, &mut interrupts).await? else {
                        writeln!(output)?;
                        break;
                    };
                    if self.plan_is_empty(&morse) {
                        writeln!(output, "No Morse code to play.")?;
                        continue;
                    }
                    match self.play_interruptible(&morse, &mut interrupts).await {
                        Ok(PlaybackOutcome::Completed) => writeln!(output, "Playback complete.")?,
                        Ok(PlaybackOutcome::Cancelled) => writeln!(output, "Playback stopped.")?,
                        Err(e) => {
                            warn!("Playback failed: {:#}", e);
                            writeln!(output, "Audio playback is not available: {}", e)?;
                        }
                    }
                }
                "4" => break,
                other => {
                    debug!("Invalid menu choice: {:?}", other);
                    writeln!(output, "Invalid choice. Please enter 1, 2, 3 or 4.")?;
                }
            }
        }

        writeln!(output, "Goodbye!")?;
        info!("Interactive session ended");
        Ok(())
    }

    // Play until done, cancelling on every interrupt received meanwhile
    async fn play_interruptible(
        &self,
        morse: &str,
        interrupts: &mut UnboundedReceiver<()>,
    ) -> Result<PlaybackOutcome> {
        let token = CancelToken::new();
        let playback = self.play(morse, token.clone());
        tokio::pin!(playback);

        loop {
            tokio::select! {
                result = &mut playback => return result,
                Some(()) = interrupts.recv() => {
                    warn!("Interrupted, stopping playback");
                    token.cancel();
                }
            }
        }
    }

    // Blocking reads live on their own thread so prompts can be interrupted.
    // The thread is detached: a read still pending at exit never holds up the runtime.
    fn spawn_line_reader<R: BufRead + Send + 'static>(mut input: R) -> UnboundedReceiver<std::io::Result<String>> {
        let (line_tx, lines) = mpsc::unbounded_channel();
        std::thread::spawn(move || loop {
            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {
                    let line = line.trim_end_matches(['\r', '\n']).to_string();
                    if line_tx.send(Ok(line)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = line_tx.send(Err(e));
                    break;
                }
            }
        });
        lines
    }

    async fn next_input(
        lines: &mut UnboundedReceiver<std::io::Result<String>>,
        interrupts: &mut UnboundedReceiver<()>,
    ) -> Result<UserInput> {
        tokio::select! {
            biased;
            Some(()) = interrupts.recv() => {
                debug!("Interrupted at prompt");
                Ok(UserInput::Interrupted)
            }
            line = lines.recv() => match line {
                Some(line) => Ok(UserInput::Line(line.context("Failed to read input")?)),
                None => Ok(UserInput::EndOfInput),
            },
        }
    }

    fn playback_progress_bar(plan: &PlaybackPlan, visible: bool) -> ProgressBar {
        let total_ms = plan.total_duration().as_millis() as u64;
        if !visible {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(total_ms);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ms ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Playing");
        progress_bar
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
