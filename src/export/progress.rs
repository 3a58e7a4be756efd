/// Phase of an export, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExportStage {
    /// Decoding both photos.
    Loading,
    /// Computing the shared alignment.
    Aligning,
    /// Drawing frames.
    Rendering,
    /// Waiting for the encoder to finish.
    Encoding,
    /// Output is complete.
    Done,
}

/// Progress report delivered to an export's callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportProgress {
    /// Current phase.
    pub stage: ExportStage,
    /// Completion of the whole export, `0.0..=1.0`. Never decreases.
    pub fraction: f64,
}

/// Optional progress callback threaded through an export.
pub(crate) struct Reporter<'a> {
    cb: Option<&'a mut dyn FnMut(ExportProgress)>,
    last: f64,
}

impl<'a> Reporter<'a> {
    pub(crate) fn new(cb: Option<&'a mut dyn FnMut(ExportProgress)>) -> Self {
        Self { cb, last: 0.0 }
    }

    pub(crate) fn report(&mut self, stage: ExportStage, fraction: f64) {
        let fraction = if fraction.is_finite() {
            fraction.clamp(self.last, 1.0)
        } else {
            self.last
        };
        self.last = fraction;
        if let Some(cb) = self.cb.as_deref_mut() {
            cb(ExportProgress { stage, fraction });
        }
    }
}
