use crate::foundation::error::StitchError;

/// Receives progress and error notifications from a stitch.
///
/// Calls are made from the task awaiting [`crate::Stitcher::stitch`], never from the background
/// worker, so implementations may be tied to a UI thread.
pub trait Reporter {
    /// Toggle the loading indicator. Every `true` is followed by a `false`.
    fn show_content_loading(&self, loading: bool);

    /// Present a failure. Called at most once per stitch.
    fn show_error(&self, error: &StitchError);
}

/// Reporter that logs through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn show_content_loading(&self, loading: bool) {
        if loading {
            tracing::info!("stitching started");
        } else {
            tracing::debug!("stitching finished");
        }
    }

    fn show_error(&self, error: &StitchError) {
        tracing::error!(error = %error, "stitching failed");
    }
}
