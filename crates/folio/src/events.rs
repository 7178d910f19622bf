use folio_core::submit::SubmitOutcome;

#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigReload,
    SubmissionFinished(SubmitOutcome),
}
