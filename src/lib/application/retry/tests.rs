use super::*;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

#[derive(Debug, Error)]
#[error("scripted failure #{0}")]
struct ScriptedError(u32);

/// Replays a fixed list of outcomes, one per attempt, recording when each
/// attempt started.
struct ScriptedTask {
    script: Mutex<VecDeque<Result<String, ScriptedError>>>,
    started: Mutex<Vec<Instant>>,
}

impl ScriptedTask {
    fn new(script: Vec<Result<&str, u32>>) -> Self {
        Self {
            script: Mutex::new(
                script
                    .into_iter()
                    .map(|step| step.map(String::from).map_err(ScriptedError))
                    .collect(),
            ),
            started: Mutex::new(Vec::new()),
        }
    }

    fn always_failing(times: u32) -> Self {
        Self::new((1..=times).map(Err).collect())
    }

    fn calls(&self) -> usize {
        self.started.lock().expect("lock").len()
    }

    fn start_times(&self) -> Vec<Instant> {
        self.started.lock().expect("lock").clone()
    }
}

#[async_trait]
impl RetryableTask for ScriptedTask {
    type Error = ScriptedError;

    async fn attempt(&self, _prompt: &str) -> Result<String, ScriptedError> {
        self.started.lock().expect("lock").push(Instant::now());
        self.script
            .lock()
            .expect("lock")
            .pop_front()
            .expect("task attempted more often than scripted")
    }
}

#[derive(Debug, Default)]
struct RecordingObserver {
    started: Vec<u32>,
    failed: Vec<u32>,
    retries: Vec<Duration>,
}

impl RetryObserver for RecordingObserver {
    fn attempt_started(&mut self, attempt: u32, _limit: u32) {
        self.started.push(attempt);
    }

    fn attempt_failed(&mut self, attempt: u32, _error: &dyn std::error::Error) {
        self.failed.push(attempt);
    }

    fn retry_scheduled(&mut self, _attempt: u32, delay: Duration) {
        self.retries.push(delay);
    }
}

fn policy(attempts: u32) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::from_secs(2))
}

#[tokio::test(start_paused = true)]
async fn permanent_failure_uses_every_attempt_and_returns_sentinel() {
    for limit in 1..=5 {
        let task = ScriptedTask::always_failing(limit);
        let mut observer = RecordingObserver::default();

        let outcome = run_with_retries(&task, "prompt", &policy(limit), &mut observer).await;

        assert_eq!(task.calls(), limit as usize);
        assert_eq!(outcome.attempts(), limit);
        assert!(matches!(
            &outcome,
            RetryOutcome::Exhausted { last_error: ScriptedError(n), .. } if *n == limit
        ));
        assert_eq!(outcome.into_message(), "Agent failed after multiple attempts.");
        assert_eq!(observer.started, (1..=limit).collect::<Vec<_>>());
        assert_eq!(observer.failed, (1..=limit).collect::<Vec<_>>());
        assert_eq!(observer.retries.len(), (limit - 1) as usize);
    }
}

#[tokio::test(start_paused = true)]
async fn success_stops_further_attempts() {
    for limit in 1..=4 {
        for success_at in 1..=limit {
            let mut script: Vec<Result<&str, u32>> = (1..success_at).map(Err).collect();
            script.push(Ok("answer"));
            let task = ScriptedTask::new(script);
            let mut observer = RecordingObserver::default();

            let outcome = run_with_retries(&task, "prompt", &policy(limit), &mut observer).await;

            assert!(outcome.is_success());
            assert_eq!(outcome.attempts(), success_at);
            assert_eq!(task.calls(), success_at as usize);
            assert_eq!(outcome.into_message(), "answer");
        }
    }
}

#[tokio::test(start_paused = true)]
async fn consecutive_attempts_are_separated_by_the_delay() {
    let delay = Duration::from_millis(750);
    let task = ScriptedTask::always_failing(4);
    let mut observer = RecordingObserver::default();

    run_with_retries(&task, "prompt", &RetryPolicy::new(4, delay), &mut observer).await;

    let starts = task.start_times();
    assert_eq!(starts.len(), 4);
    for pair in starts.windows(2) {
        assert!(pair[1].duration_since(pair[0]) >= delay);
    }
    assert!(observer.retries.iter().all(|scheduled| *scheduled == delay));
}

#[tokio::test(start_paused = true)]
async fn zero_attempts_still_runs_once() {
    let task = ScriptedTask::always_failing(1);
    let outcome = run_with_retries(
        &task,
        "prompt",
        &RetryPolicy::new(0, Duration::from_secs(2)),
        &mut RecordingObserver::default(),
    )
    .await;

    assert_eq!(task.calls(), 1);
    assert!(!outcome.is_success());
}

#[test]
fn default_policy_is_three_attempts_two_seconds_apart() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.attempts(), 3);
    assert_eq!(policy.delay(), Duration::from_secs(2));
}

#[test]
fn terminal_observer_prints_progress_lines() {
    let mut observer = TerminalObserver::new(Vec::new());
    observer.attempt_started(1, 3);
    observer.attempt_failed(1, &ScriptedError(1));
    observer.retry_scheduled(1, Duration::from_secs(2));
    observer.attempt_started(2, 3);

    let printed = String::from_utf8(observer.into_inner()).expect("utf8");
    assert_eq!(
        printed,
        "Attempt 1...\nError: scripted failure #1\nRetrying...\n\nAttempt 2...\n"
    );
}
