use anyhow::{Result, Context};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::Config;
use crate::caption_processor::{self, count_time_range_lines};
use crate::file_utils::{FileManager, FileType};
use crate::transcriber::{TranscriptionBackend, WhisperApi};
use crate::transcript_segmenter;

// @module: Application controller for caption workflows

/// Numbering toggle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingMode {
    /// Prepend sequential numbers to each cue
    Add,
    /// Strip sequence numbers from each cue
    Remove,
}

/// Main application controller for caption processing
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Convert an SRT file, or every SRT file under a directory, to WebVTT
    pub async fn run_convert(&self, input_path: PathBuf, output_path: Option<PathBuf>, force_overwrite: bool) -> Result<()> {
        if input_path.is_dir() {
            return self.run_convert_folder(&input_path, force_overwrite);
        }
        if !input_path.is_file() {
            return Err(anyhow::anyhow!("Input path does not exist: {:?}", input_path));
        }
        self.convert_file(&input_path, output_path.as_deref(), force_overwrite)
    }

    /// Convert every SRT file found under a directory
    fn run_convert_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<()> {
        let files = FileManager::find_files(input_dir, "srt")?;
        if files.is_empty() {
            warn!("No SRT files found in directory: {:?}", input_dir);
            return Ok(());
        }

        info!("Converting {} SRT file(s) in {:?}", files.len(), input_dir);

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut converted_count = 0;
        for file in &files {
            progress.set_message(
                file.file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
            if let Err(e) = self.convert_file(file, None, force_overwrite) {
                error!("Error converting {:?}: {}", file, e);
            } else {
                converted_count += 1;
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!("Finished converting {} of {} file(s)", converted_count, files.len());
        Ok(())
    }

    fn convert_file(&self, input_file: &Path, output_path: Option<&Path>, force_overwrite: bool) -> Result<()> {
        match FileManager::detect_file_type(input_file)? {
            FileType::Srt => {}
            other => {
                warn!("Input {:?} does not look like an SRT file (detected {:?}), converting anyway", input_file, other);
            }
        }

        let output_file = match output_path {
            Some(path) => path.to_path_buf(),
            None => FileManager::generate_output_path(
                input_file,
                input_file.parent().unwrap_or(Path::new(".")),
                "vtt",
            ),
        };
        if self.should_skip_existing(&output_file, force_overwrite) {
            return Ok(());
        }

        let content = FileManager::read_to_string(input_file)?;
        let vtt = caption_processor::convert_srt_to_vtt(&content);
        debug!(
            "Converted {:?}: {} cue(s)",
            input_file,
            count_time_range_lines(&vtt)
        );

        FileManager::write_to_file(&output_file, &vtt)?;
        info!("Success: {:?}", output_file);
        Ok(())
    }

    /// Add or remove cue numbering on a WebVTT file
    ///
    /// `compat` selects the historical lookahead heuristic for removal
    /// instead of the typed two-pass parse.
    pub fn run_number(
        &self,
        input_file: PathBuf,
        output_path: Option<PathBuf>,
        mode: NumberingMode,
        compat: bool,
        force_overwrite: bool,
    ) -> Result<()> {
        if !input_file.is_file() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        let content = FileManager::read_to_string(&input_file)?;
        let (result, default_ext) = match mode {
            NumberingMode::Add => (caption_processor::add_numbers_to_vtt(&content), "numbered.vtt"),
            NumberingMode::Remove if compat => {
                (caption_processor::remove_numbers_from_vtt_lenient(&content), "plain.vtt")
            }
            NumberingMode::Remove => (caption_processor::remove_numbers_from_vtt(&content), "plain.vtt"),
        };
        let transformed = result.with_context(|| format!("Failed to renumber {:?}", input_file))?;

        let output_file = match output_path {
            Some(path) => path,
            None => FileManager::generate_output_path(
                &input_file,
                input_file.parent().unwrap_or(Path::new(".")),
                default_ext,
            ),
        };
        if self.should_skip_existing(&output_file, force_overwrite) {
            return Ok(());
        }

        FileManager::write_to_file(&output_file, &transformed)?;
        info!("Success: {:?}", output_file);
        Ok(())
    }

    /// Transcribe an audio file via the configured service and write a
    /// synthesized WebVTT file
    pub async fn run_transcribe(&self, input_file: PathBuf, output_path: Option<PathBuf>, force_overwrite: bool) -> Result<()> {
        let backend = WhisperApi::with_config(&self.config.transcription);
        self.run_transcribe_with_backend(&backend, input_file, output_path, force_overwrite)
            .await
    }

    /// Transcription workflow with an injectable backend - used by tests
    pub async fn run_transcribe_with_backend(
        &self,
        backend: &dyn TranscriptionBackend,
        input_file: PathBuf,
        output_path: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<()> {
        if !input_file.is_file() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_file = match output_path {
            Some(path) => path,
            None => FileManager::generate_output_path(
                &input_file,
                input_file.parent().unwrap_or(Path::new(".")),
                "vtt",
            ),
        };
        if self.should_skip_existing(&output_file, force_overwrite) {
            return Ok(());
        }

        info!("Transcribing audio: {:?}", input_file);
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Waiting for transcription service...");
        spinner.enable_steady_tick(Duration::from_millis(120));

        let transcription_result = backend.transcribe(&input_file).await;
        spinner.finish_and_clear();

        // Upstream failures propagate typed so callers can tell a service
        // failure apart from a local formatting failure
        let transcript = transcription_result?;
        debug!("Received transcript of {} character(s)", transcript.len());

        let document = transcript_segmenter::segment_transcript(&transcript, &self.config.segmenter);
        if document.cues.is_empty() {
            warn!("Transcription produced no caption cues (empty transcript)");
        }

        FileManager::write_to_file(&output_file, &document.to_vtt_string(false))?;
        info!("Success: {:?} ({} cue(s))", output_file, document.cues.len());
        Ok(())
    }

    fn should_skip_existing(&self, output_file: &Path, force_overwrite: bool) -> bool {
        if output_file.exists() && !force_overwrite {
            warn!("Skipping, output already exists (use -f to force overwrite): {:?}", output_file);
            return true;
        }
        false
    }
}
