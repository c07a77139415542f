use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{prefix:.bold} {wide_bar:.green/white} {pos}/{len} chunks [{elapsed_precise}<{eta_precise}, {per_sec}]";

const SPINNER_TEMPLATE: &str = "{spinner:.green} {prefix:.bold} {pos} chunks [{elapsed_precise}, {per_sec}]";

const PB_CHARS: &str = "━╸ ";

/// Chunks counter shown while the payload is being written
pub struct ProgressTracker {
    pb: ProgressBar
}

impl ProgressTracker {
    /// Bar if the total amount of chunks is known, spinner otherwise
    pub fn new(label: &str, total_chunks: Option<u64>) -> Self {
        let pb = match total_chunks {
            Some(total) => {
                let pb = ProgressBar::new(total);

                match ProgressStyle::with_template(BAR_TEMPLATE) {
                    Ok(style) => pb.with_style(style.progress_chars(PB_CHARS)),
                    Err(_) => pb
                }
            }

            None => {
                let pb = ProgressBar::new_spinner();

                pb.enable_steady_tick(Duration::from_millis(120));

                match ProgressStyle::with_template(SPINNER_TEMPLATE) {
                    Ok(style) => pb.with_style(style),
                    Err(_) => pb
                }
            }
        };

        pb.set_prefix(label.to_string());

        Self { pb }
    }

    #[inline]
    pub fn step(&self) {
        self.pb.inc(1);
    }

    #[inline]
    pub fn finish(self) {
        self.pb.finish();
    }

    /// Leave the bar as is after a failed download
    #[inline]
    pub fn abandon(self) {
        self.pb.abandon();
    }
}
