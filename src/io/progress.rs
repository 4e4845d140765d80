//! Progress display for batch mosaic generation

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Steps each mosaic goes through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Filling the grid from its seed
    Generate,
    /// Extracting and stitching segments
    Stitch,
    /// Writing the document
    Write,
}

impl Stage {
    /// Number of stages a finished mosaic has passed
    pub const COUNT: u64 = 3;

    const fn position(self) -> u64 {
        match self {
            Self::Generate => 0,
            Self::Stitch => 1,
            Self::Write => 2,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Generate => "generating",
            Self::Stitch => "stitching",
            Self::Write => "writing",
        }
    }
}

/// Coordinates progress bars for a batch of mosaics
///
/// Small batches get one bar per mosaic. Larger ones add an overall bar and
/// keep a rolling window of the most recent mosaics.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    mosaic_bars: Vec<ProgressBar>,
    /// (`name`, `stage reached`, `finished`) per started mosaic
    mosaic_states: Vec<(String, u64, bool)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>28} [{bar:20.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Mosaics: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a manager with no bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            mosaic_bars: Vec::new(),
            mosaic_states: Vec::new(),
        }
    }

    /// Create the bars for a batch of `mosaic_count` mosaics
    pub fn initialize(&mut self, mosaic_count: usize) {
        if mosaic_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(mosaic_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..mosaic_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(Stage::COUNT);
            bar.set_style(STAGE_STYLE.clone());
            self.mosaic_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Report that a mosaic entered a stage
    pub fn set_stage(&mut self, index: usize, name: &str, stage: Stage) {
        if index >= self.mosaic_states.len() {
            self.mosaic_states.resize(index + 1, (String::new(), 0, false));
        }
        if let Some(state) = self.mosaic_states.get_mut(index) {
            *state = (name.to_string(), stage.position(), false);
        }
        self.update_bars(stage.label());
    }

    /// Mark a mosaic as written
    pub fn complete(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.mosaic_states.get_mut(index) {
            state.1 = Stage::COUNT;
            state.2 = true;
        }
        self.update_bars("done");
    }

    /// Clear every bar from the terminal
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All mosaics written");
        }
        let _ = self.multi_progress.clear();
    }

    // Shows the most recent mosaics, newest last
    fn update_bars(&self, current_label: &str) {
        let started: Vec<_> = self
            .mosaic_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();
        let first_visible = started.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = started.get(first_visible..).unwrap_or(&[]);
        let newest = visible.len().saturating_sub(1);

        for (bar_index, (name, position, finished)) in visible.iter().enumerate() {
            if let Some(bar) = self.mosaic_bars.get(bar_index) {
                bar.set_position(*position);
                bar.set_prefix(name.clone());
                let message = if *finished {
                    "✓"
                } else if bar_index == newest {
                    current_label
                } else {
                    ""
                };
                bar.set_message(message.to_string());
            }
        }
    }
}
