//! Tests for shell-delegated multi-stage pipelines

use process_executor::{CancellationToken, ProcessOutcome, ShellDelegator};

#[cfg(unix)]
#[smol_potat::test]
async fn two_stage_chain_matches_piping_by_hand() {
    let delegator = ShellDelegator::new();
    let token = CancellationToken::new();

    let commands = vec!["sort".to_string(), "head -2".to_string()];
    let result = delegator
        .execute(&commands, Some("banana\napple\ncherry\n"), &token)
        .await;

    assert_eq!(result.stdout, "apple\nbanana\n");
    assert_eq!(result.exit_code, Some(0));
    assert!(result.startup_error.is_none());
}

#[cfg(unix)]
#[smol_potat::test]
async fn duplicate_then_take_two_chain_keeps_the_first_line_twice() {
    let delegator = ShellDelegator::new();
    let token = CancellationToken::new();

    // Duplicate every line, then keep the first two: the first input line
    // comes back twice.
    let commands = vec!["sed p".to_string(), "head -2".to_string()];
    let result = delegator
        .execute(&commands, Some("one\ntwo\nthree\n"), &token)
        .await;

    assert_eq!(result.stdout, "one\none\n");
    assert_eq!(result.exit_code, Some(0));
}

#[cfg(unix)]
#[smol_potat::test]
async fn stage_quoting_is_preserved_for_the_shell() {
    let delegator = ShellDelegator::new();
    let token = CancellationToken::new();

    // The segment's own quotes must reach the shell untouched.
    let commands = vec!["grep 'b c'".to_string(), "wc -l".to_string()];
    let result = delegator
        .execute(&commands, Some("a\nb c\nd\n"), &token)
        .await;

    assert_eq!(result.stdout.trim(), "1");
    assert_eq!(result.exit_code, Some(0));
}

#[smol_potat::test]
async fn empty_command_list_is_a_startup_error() {
    let delegator = ShellDelegator::new();
    let token = CancellationToken::new();

    let result = delegator.execute(&[], None, &token).await;

    match result.outcome() {
        ProcessOutcome::StartupError(message) => {
            assert!(message.contains("no commands"));
        }
        other => panic!("expected startup error, got {other:?}"),
    }
}

#[smol_potat::test]
async fn single_command_is_redirected_to_the_direct_path() {
    let delegator = ShellDelegator::new();
    let token = CancellationToken::new();

    let result = delegator.execute(&["cat".to_string()], None, &token).await;

    match result.outcome() {
        ProcessOutcome::StartupError(message) => {
            assert!(message.contains("directly"));
        }
        other => panic!("expected startup error, got {other:?}"),
    }
}

#[cfg(unix)]
#[smol_potat::test]
async fn nonzero_exit_of_the_last_stage_is_reported_as_data() {
    let delegator = ShellDelegator::new();
    let token = CancellationToken::new();

    // grep with no match exits 1; that is an answer, not a crash.
    let commands = vec!["cat".to_string(), "grep zzz".to_string()];
    let result = delegator.execute(&commands, Some("a\nb\n"), &token).await;

    assert_eq!(result.outcome(), ProcessOutcome::Completed(Some(1)));
    assert_eq!(result.stdout, "");
}
