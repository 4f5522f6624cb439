use crate::{ExitOutcome, Platform, RecorderError};

/// WHAT: Exit code 0 is a clean stop
/// WHY: The encoder finished normally and the file is complete
#[test]
fn given_zero_exit_code_when_classifying_then_clean() {
    assert_eq!(
        ExitOutcome::classify(&Platform::Linux, Some(0)),
        ExitOutcome::Clean
    );
}

/// WHAT: The platform stop code counts as success
/// WHY: The encoder reports 255 after being interrupted by a stop request
#[test]
fn given_stop_code_when_classifying_then_stopped_and_successful() {
    // Given/When: Exit code 255 on each supported platform
    for platform in [Platform::Windows, Platform::MacOs, Platform::Linux] {
        let outcome = ExitOutcome::classify(&platform, Some(255));

        // Then: Classified as a stop, which keeps the artifact
        assert_eq!(outcome, ExitOutcome::Stopped);
        assert!(outcome.check().is_ok());
    }
}

/// WHAT: Other codes and signal termination are failures
/// WHY: Partial files from crashed encoders must be discarded
#[test]
fn given_unexpected_exit_when_classifying_then_failed() {
    // Given/When: A non-zero code and a signal termination
    let crashed = ExitOutcome::classify(&Platform::Linux, Some(1));
    let killed = ExitOutcome::classify(&Platform::Linux, None);

    // Then: Both are failures carrying the original code
    assert_eq!(crashed, ExitOutcome::Failed(Some(1)));
    assert_eq!(killed, ExitOutcome::Failed(None));
    assert!(crashed.check().is_err());
    assert!(killed.check().is_err());
}

/// WHAT: Failed runs convert to an EncodingFailed error carrying the code
/// WHY: Callers report encoder crashes through the common error type
#[test]
fn given_failed_outcome_when_checked_then_encoding_failed() {
    // Given/When: A failed and a stopped outcome are checked
    let failed = ExitOutcome::Failed(Some(1)).check();
    let stopped = ExitOutcome::Stopped.check();

    // Then: Only the failure is an error, with its code preserved
    assert!(matches!(
        failed,
        Err(RecorderError::EncodingFailed { code: Some(1), .. })
    ));
    assert!(matches!(stopped, Ok(ExitOutcome::Stopped)));
}
