/// Tracks the best evaluation accuracy and decides when training has
/// stalled.
///
/// The baseline starts at −∞ so the first observation always counts as an
/// improvement. Only a strictly higher accuracy resets the counter.
#[derive(Debug, Clone)]
pub struct EarlyStopping {
    threshold: usize,
    best: f64,
    since_improvement: usize,
}

impl EarlyStopping {
    pub fn new(threshold: usize) -> EarlyStopping {
        EarlyStopping { threshold, best: f64::NEG_INFINITY, since_improvement: 0 }
    }

    /// Records one epoch's accuracy; returns `true` once more than
    /// `threshold` consecutive epochs went by without improvement.
    pub fn observe(&mut self, accuracy: f64) -> bool {
        if accuracy > self.best {
            self.best = accuracy;
            self.since_improvement = 0;
        } else {
            self.since_improvement += 1;
        }
        self.since_improvement > self.threshold
    }

    pub fn best(&self) -> Option<f64> {
        if self.best.is_finite() { Some(self.best) } else { None }
    }

    pub fn since_improvement(&self) -> usize {
        self.since_improvement
    }
}
