use std::time::Duration;

use caliper_bedrock::retry::JITTER_CEILING;
use caliper_bedrock::{AttemptError, RetryPolicy, with_retry};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn succeeds_after_two_failures_with_backoff() {
    let policy = RetryPolicy::default();
    let mut calls: Vec<Instant> = Vec::new();

    let result = with_retry(&policy, || {
        calls.push(Instant::now());
        let attempt = calls.len();
        async move {
            if attempt < 3 {
                Err(format!("failure {attempt}"))
            } else {
                Ok("success")
            }
        }
    })
    .await;

    assert_eq!(result.expect("third attempt succeeds"), "success");
    assert_eq!(calls.len(), 3);

    let first_wait = calls[1] - calls[0];
    assert!(first_wait >= Duration::from_millis(2000), "{first_wait:?}");
    assert!(first_wait < Duration::from_millis(2000) + JITTER_CEILING, "{first_wait:?}");

    let second_wait = calls[2] - calls[1];
    assert!(second_wait >= Duration::from_millis(4000), "{second_wait:?}");
    assert!(second_wait < Duration::from_millis(4000) + JITTER_CEILING, "{second_wait:?}");
}

#[tokio::test(start_paused = true)]
async fn exhausts_after_max_attempts_with_last_error() {
    let policy = RetryPolicy::default();
    let mut calls = 0;

    let result: Result<(), _> = with_retry(&policy, || {
        calls += 1;
        let attempt = calls;
        async move { Err(format!("failure {attempt}")) }
    })
    .await;

    let err = result.expect_err("every attempt fails");
    assert_eq!(calls, policy.max_attempts);
    assert_eq!(err.attempts, policy.max_attempts);
    match &err.last_error {
        AttemptError::Failed(message) => assert_eq!(message, "failure 3"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), "operation failed after 3 attempt(s): failure 3");
}

#[tokio::test(start_paused = true)]
async fn slow_attempts_time_out() {
    let policy = RetryPolicy {
        max_attempts: 2,
        timeout: Duration::from_millis(100),
        ..RetryPolicy::default()
    };
    let started = Instant::now();

    let result = with_retry(&policy, || async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok::<_, String>("too late")
    })
    .await;

    let err = result.expect_err("every attempt times out");
    assert_eq!(err.attempts, 2);
    assert!(err.last_error.is_timeout());
    assert_eq!(err.last_error.to_string(), "attempt timed out after 100ms");
    assert!(started.elapsed() < Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn timed_out_attempt_is_retried() {
    let policy = RetryPolicy {
        timeout: Duration::from_millis(500),
        ..RetryPolicy::default()
    };
    let mut calls = 0;

    let result = with_retry(&policy, || {
        calls += 1;
        let attempt = calls;
        async move {
            if attempt == 1 {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok::<_, String>(attempt)
        }
    })
    .await;

    assert_eq!(result.expect("second attempt succeeds"), 2);
}

#[tokio::test(start_paused = true)]
async fn immediate_success_does_not_wait() {
    let started = Instant::now();
    let result = with_retry(&RetryPolicy::default(), || async { Ok::<_, String>(42) }).await;
    assert_eq!(result.expect("succeeds"), 42);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[test]
fn next_delay_grows_and_caps() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.next_delay(Duration::from_millis(1000)), Duration::from_millis(2000));
    assert_eq!(policy.next_delay(Duration::from_millis(4000)), Duration::from_millis(8000));
    assert_eq!(policy.next_delay(Duration::from_millis(8000)), Duration::from_millis(10_000));
}

#[test]
fn validate_rejects_non_positive_settings() {
    assert!(RetryPolicy::default().validate().is_ok());

    let zero_attempts = RetryPolicy {
        max_attempts: 0,
        ..RetryPolicy::default()
    };
    assert!(zero_attempts.validate().is_err());

    let zero_timeout = RetryPolicy {
        timeout: Duration::ZERO,
        ..RetryPolicy::default()
    };
    assert!(zero_timeout.validate().is_err());

    let negative_factor = RetryPolicy {
        backoff_factor: -1.0,
        ..RetryPolicy::default()
    };
    assert!(negative_factor.validate().is_err());
}
