const BAR_CELLS: usize = 10;

/// Position within a topic session, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// One-based index of the current question.
    pub current: usize,
    pub total: usize,
}

impl SessionProgress {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.current as f64 * 100.0 / self.total as f64
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current >= self.total
    }

    /// Ten-cell text bar, e.g. `[███░░░░░░░] 30.0% (3/10)`.
    #[must_use]
    pub fn render_bar(&self) -> String {
        let percent = self.percent();
        format!(
            "{} {percent:.1}% ({}/{})",
            render_cells(percent),
            self.current,
            self.total
        )
    }
}

/// `[█████░░░░░]` with one filled cell per whole ten percent.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render_cells(percent: f64) -> String {
    let filled = ((percent / 10.0).floor().max(0.0) as usize).min(BAR_CELLS);
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(BAR_CELLS - filled)
    )
}
