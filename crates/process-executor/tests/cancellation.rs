//! Tests for cancellation-triggered process-tree kills

#![cfg(unix)]

use std::time::{Duration, Instant};

use process_executor::{CancellationToken, ProcessExecutor, ProcessOutcome, ShellDelegator};

#[smol_potat::test]
async fn cancelling_a_long_sleep_yields_killed_quickly() {
    let executor = ProcessExecutor::new();
    let token = CancellationToken::new();
    let trigger = token.clone();

    let start = Instant::now();
    let args = ["10".to_string()];
    let (result, ()) = futures::join!(
        executor.execute("sleep", &args, None, &token),
        async {
            smol::Timer::after(Duration::from_millis(100)).await;
            trigger.cancel();
        },
    );

    assert_eq!(result.outcome(), ProcessOutcome::Killed);
    assert!(result.killed);
    assert_eq!(result.exit_code, None);
    assert!(
        start.elapsed() < Duration::from_secs(5),
        "kill took {:?}, the full sleep must not run",
        start.elapsed()
    );
}

#[smol_potat::test]
async fn partial_output_survives_the_kill() {
    let executor = ProcessExecutor::new();
    let token = CancellationToken::new();
    let trigger = token.clone();

    let args = ["-c".to_string(), "echo early; sleep 10".to_string()];
    let (result, ()) = futures::join!(
        executor.execute(
            "sh",
            &args,
            None,
            &token,
        ),
        async {
            smol::Timer::after(Duration::from_millis(300)).await;
            trigger.cancel();
        },
    );

    assert!(result.killed);
    assert_eq!(result.stdout, "early\n");
}

#[smol_potat::test]
async fn delegated_pipeline_kill_reaches_the_shell_descendants() {
    let delegator = ShellDelegator::new();
    let token = CancellationToken::new();
    let trigger = token.clone();

    // The shell spawns both sleeps as its own children; if only the shell
    // died, the drain on the inherited pipes would hold this test for the
    // full 30 seconds.
    let commands = vec!["sleep 30".to_string(), "sleep 30".to_string()];

    let start = Instant::now();
    let (result, ()) = futures::join!(delegator.execute(&commands, None, &token), async {
        smol::Timer::after(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    assert!(result.killed);
    assert!(
        start.elapsed() < Duration::from_secs(5),
        "group kill took {:?}",
        start.elapsed()
    );
}

#[smol_potat::test]
async fn already_cancelled_token_still_reports_killed() {
    let executor = ProcessExecutor::new();
    let token = CancellationToken::new();
    token.cancel();

    let result = executor
        .execute("sleep", &["10".into()], None, &token)
        .await;

    assert!(result.killed);
}
