use emoji_tetris_core::GameObserver;

use crate::settings::SettingsStore;

/// Observer that persists the high score.
///
/// New records are kept in memory and written at game over, on [`flush`]
/// and when the recorder is dropped, so a run that keeps beating its own
/// record does not touch the disk every step.
///
/// [`flush`]: HighScoreRecorder::flush
#[derive(Debug)]
pub struct HighScoreRecorder {
    store: SettingsStore,
    saved: u32,
    best: u32,
}

impl HighScoreRecorder {
    /// `saved` is the high score already on disk.
    pub fn new(store: SettingsStore, saved: u32) -> Self {
        Self {
            store,
            saved,
            best: saved,
        }
    }

    /// High score last written to disk.
    pub fn saved(&self) -> u32 {
        self.saved
    }

    /// Best high score seen, written or not.
    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn is_dirty(&self) -> bool {
        self.best > self.saved
    }

    /// Write the best score if it is newer than what is on disk.
    pub fn flush(&mut self) {
        if !self.is_dirty() {
            return;
        }
        let best = self.best;
        match self.store.update(|s| s.high_score = s.high_score.max(best)) {
            Ok(_) => {
                log::debug!("saved high score {best}");
                self.saved = best;
            }
            Err(err) => log::warn!("failed to save high score: {err:#}"),
        }
    }
}

impl GameObserver for HighScoreRecorder {
    fn on_high_score_changed(&mut self, high_score: u32) {
        self.best = self.best.max(high_score);
    }

    fn on_game_over(&mut self, _score: u32, _level: u32, _lines: u32) {
        self.flush();
    }
}

impl Drop for HighScoreRecorder {
    fn drop(&mut self) {
        self.flush();
    }
}
