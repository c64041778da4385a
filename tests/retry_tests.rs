use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use anyhow::{Result, anyhow};
use dispatch_service::{models::retry::RetryConfig, utils::retry_with_backoff};
use tokio::time::Instant;

fn fast_config(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_delay_ms: 20,
        max_delay_ms: 100,
        backoff_multiplier: 2,
    }
}

/// Test: successful operations complete without retry
#[tokio::test]
async fn test_successful_operation_no_retry() -> Result<()> {
    let attempt_count = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&attempt_count);

    let result = retry_with_backoff(&fast_config(3), || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, anyhow::Error>("accepted")
        }
    })
    .await?;

    assert_eq!(result, "accepted");
    assert_eq!(
        attempt_count.load(Ordering::SeqCst),
        1,
        "Should only attempt once"
    );

    Ok(())
}

/// Test: transient failures are retried until the operation succeeds
#[tokio::test]
async fn test_transient_failures_are_retried() -> Result<()> {
    let attempt_count = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&attempt_count);

    let result = retry_with_backoff(&fast_config(5), || {
        let counter = Arc::clone(&counter);
        async move {
            let attempts = counter.fetch_add(1, Ordering::SeqCst);

            if attempts < 2 {
                Err(anyhow!("gateway timeout"))
            } else {
                Ok("accepted")
            }
        }
    })
    .await?;

    assert_eq!(result, "accepted");
    assert_eq!(
        attempt_count.load(Ordering::SeqCst),
        3,
        "Should retry twice then succeed"
    );

    Ok(())
}

/// Test: a persistent failure exhausts exactly max_attempts
#[tokio::test]
async fn test_persistent_failure_exhausts_attempts() -> Result<()> {
    let attempt_count = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&attempt_count);

    let result = retry_with_backoff(&fast_config(4), || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<String, _>(anyhow!("gateway unavailable"))
        }
    })
    .await;

    assert!(result.is_err(), "Should fail after max attempts");
    assert_eq!(
        attempt_count.load(Ordering::SeqCst),
        4,
        "Should attempt exactly max_attempts times"
    );

    Ok(())
}

/// Test: the delay between attempts never exceeds the configured cap
#[tokio::test]
async fn test_max_delay_cap_respected() -> Result<()> {
    let config = RetryConfig {
        max_attempts: 6,
        initial_delay_ms: 20,
        max_delay_ms: 60,
        backoff_multiplier: 2,
    };

    let start = Instant::now();
    let attempt_times = Arc::new(tokio::sync::Mutex::new(Vec::new()));
    let times = Arc::clone(&attempt_times);

    let _ = retry_with_backoff(&config, || {
        let times = Arc::clone(&times);
        async move {
            let elapsed = start.elapsed().as_millis();
            times.lock().await.push(elapsed);
            Err::<String, _>(anyhow!("gateway unavailable"))
        }
    })
    .await;

    let times = attempt_times.lock().await;
    assert_eq!(times.len(), 6);

    for i in 3..times.len() {
        let delay = times[i] - times[i - 1];
        assert!(
            delay <= (config.max_delay_ms * 13 / 10) as u128,
            "Delay {delay}ms should stay under the cap"
        );
    }

    Ok(())
}

/// Test: retry state is independent across concurrent operations
#[tokio::test]
async fn test_retry_state_independence() -> Result<()> {
    let config = Arc::new(fast_config(5));

    let config1 = Arc::clone(&config);
    let handle1 = tokio::spawn(async move {
        retry_with_backoff(&config1, || async {
            Err::<String, _>(anyhow!("always failing"))
        })
        .await
    });

    let config2 = Arc::clone(&config);
    let counter2 = Arc::new(AtomicU32::new(0));
    let counter2_clone = Arc::clone(&counter2);
    let handle2 = tokio::spawn(async move {
        retry_with_backoff(&config2, || {
            let counter = Arc::clone(&counter2_clone);
            async move {
                let attempts = counter.fetch_add(1, Ordering::SeqCst);
                if attempts < 2 {
                    Err(anyhow!("not yet"))
                } else {
                    Ok("accepted")
                }
            }
        })
        .await
    });

    let (result1, result2) = tokio::join!(handle1, handle2);

    assert!(result1.unwrap().is_err(), "Operation 1 should fail");
    assert!(result2.unwrap().is_ok(), "Operation 2 should succeed");
    assert_eq!(
        counter2.load(Ordering::SeqCst),
        3,
        "Operation 2 should make 3 attempts"
    );

    Ok(())
}
