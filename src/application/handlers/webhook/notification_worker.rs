//! Notification queue and background worker.
//!
//! The webhook endpoint pushes normalized notifications onto a bounded
//! [`NotificationQueue`] and acknowledges immediately. The
//! [`NotificationWorker`] drains the queue and processes each job on its own
//! task, so a slow gateway call never holds up other notifications.
//!
//! ## Retries
//!
//! A job is re-enqueued after the policy's delay when processing failed
//! with a transient error or a payment is still awaiting approval. Retries
//! stop once the [`RetryPolicy`] budget is spent.
//!
//! ## Shutdown
//!
//! [`NotificationQueue::shutdown`] stops the worker loop and abandons pending
//! retry sleeps. Unfinished notifications rely on gateway redelivery.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, watch};

use crate::domain::billing::NotificationPayload;
use crate::ports::{NotificationOutcome, NotificationProcessor, ProcessingError};

use super::RetryPolicy;

/// One unit of queued work.
#[derive(Debug, Clone)]
pub struct NotificationJob {
    pub notification: NotificationPayload,
    /// 1 for the first delivery.
    pub attempt: u32,
}

impl NotificationJob {
    pub fn new(notification: NotificationPayload) -> Self {
        Self {
            notification,
            attempt: 1,
        }
    }

    fn next_attempt(self) -> Self {
        Self {
            attempt: self.attempt + 1,
            ..self
        }
    }
}

/// Why a job could not be enqueued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("notification queue is full")]
    Full,

    #[error("notification queue is shut down")]
    Closed,
}

/// Producer side of the notification queue. Cheap to clone.
#[derive(Clone)]
pub struct NotificationQueue {
    sender: mpsc::Sender<NotificationJob>,
    shutdown: Arc<watch::Sender<bool>>,
}

impl NotificationQueue {
    /// Enqueues a fresh notification without waiting.
    pub fn enqueue(&self, notification: NotificationPayload) -> Result<(), QueueError> {
        self.push(NotificationJob::new(notification))
    }

    fn push(&self, job: NotificationJob) -> Result<(), QueueError> {
        if self.is_shut_down() {
            return Err(QueueError::Closed);
        }
        self.sender.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => QueueError::Full,
            mpsc::error::TrySendError::Closed(_) => QueueError::Closed,
        })
    }

    /// Signals the worker to stop.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_shut_down(&self) -> bool {
        *self.shutdown.borrow()
    }
}

/// Consumer side: runs until shutdown.
pub struct NotificationWorker {
    processor: Arc<dyn NotificationProcessor>,
    policy: RetryPolicy,
    receiver: mpsc::Receiver<NotificationJob>,
    queue: NotificationQueue,
    shutdown: watch::Receiver<bool>,
}

impl NotificationWorker {
    /// Creates a worker and the queue that feeds it.
    pub fn new(
        processor: Arc<dyn NotificationProcessor>,
        policy: RetryPolicy,
        capacity: usize,
    ) -> (Self, NotificationQueue) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let queue = NotificationQueue {
            sender,
            shutdown: Arc::new(shutdown_tx),
        };

        let worker = Self {
            processor,
            policy,
            receiver,
            queue: queue.clone(),
            shutdown: shutdown_rx,
        };
        (worker, queue)
    }

    /// Receive loop. Returns after [`NotificationQueue::shutdown`].
    pub async fn run(mut self) {
        tracing::info!(
            max_attempts = self.policy.max_attempts,
            "Notification worker started"
        );

        loop {
            tokio::select! {
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
                job = self.receiver.recv() => match job {
                    Some(job) => self.dispatch(job),
                    None => break,
                },
            }
        }

        tracing::info!("Notification worker stopped");
    }

    /// Takes the next queued job without processing it.
    #[cfg(test)]
    pub(crate) fn try_next_job(&mut self) -> Option<NotificationJob> {
        self.receiver.try_recv().ok()
    }

    fn dispatch(&self, job: NotificationJob) {
        let processor = Arc::clone(&self.processor);
        let policy = self.policy.clone();
        let queue = self.queue.clone();
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            let result = processor.process(&job.notification).await;
            settle(job, result, &policy, &queue, shutdown).await;
        });
    }
}

/// Logs the final result or schedules the next attempt.
async fn settle(
    job: NotificationJob,
    result: Result<NotificationOutcome, ProcessingError>,
    policy: &RetryPolicy,
    queue: &NotificationQueue,
    mut shutdown: watch::Receiver<bool>,
) {
    let kind = job.notification.kind().to_string();
    let reference = job.notification.reference().unwrap_or("-").to_string();
    let attempt = job.attempt;

    let retryable = match &result {
        Ok(outcome) => outcome.awaiting_approval(),
        Err(err) => err.is_transient(),
    };

    if retryable {
        if let Some(delay) = policy.delay_for(attempt) {
            tracing::info!(
                kind = %kind,
                reference = %reference,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "Rescheduling notification"
            );
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    if let Err(e) = queue.push(job.next_attempt()) {
                        tracing::warn!(kind = %kind, reference = %reference, error = %e, "Could not re-enqueue notification");
                    }
                }
                _ = shutdown.wait_for(|stop| *stop) => {
                    tracing::info!(kind = %kind, reference = %reference, "Retry abandoned on shutdown");
                }
            }
            return;
        }
    }

    match result {
        Ok(outcome) if outcome.awaiting_approval() => tracing::warn!(
            kind = %kind,
            reference = %reference,
            attempt,
            "Payment still not approved after final attempt"
        ),
        Ok(outcome) => tracing::info!(
            kind = %kind,
            reference = %reference,
            attempt,
            activations = outcome.activations(),
            "Notification processed"
        ),
        Err(err) if err.is_transient() => tracing::warn!(
            kind = %kind,
            reference = %reference,
            attempt,
            error = %err,
            "Notification failed after exhausting retries"
        ),
        Err(err) => tracing::error!(
            kind = %kind,
            reference = %reference,
            attempt,
            error = %err,
            "Notification failed permanently"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::domain::billing::PaymentStatus;
    use crate::domain::foundation::DomainError;
    use crate::ports::{GatewayError, PaymentOutcome};

    /// Processor that replays a fixed script of results, repeating the last.
    struct ScriptedProcessor {
        script: Vec<Result<NotificationOutcome, ProcessingError>>,
        calls: AtomicUsize,
    }

    impl ScriptedProcessor {
        fn new(script: Vec<Result<NotificationOutcome, ProcessingError>>) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NotificationProcessor for ScriptedProcessor {
        async fn process(
            &self,
            _notification: &NotificationPayload,
        ) -> Result<NotificationOutcome, ProcessingError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let idx = n.min(self.script.len() - 1);
            self.script[idx].clone()
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(max_attempts)
            .with_initial_delay(Duration::from_millis(5))
            .with_max_delay(Duration::from_millis(20))
    }

    fn payment() -> NotificationPayload {
        NotificationPayload::Payment {
            id: "PAY1".to_string(),
        }
    }

    fn pending() -> Result<NotificationOutcome, ProcessingError> {
        Ok(NotificationOutcome::Payments(vec![PaymentOutcome::NotApproved {
            payment_id: "PAY1".to_string(),
            status: PaymentStatus::Pending,
        }]))
    }

    fn done() -> Result<NotificationOutcome, ProcessingError> {
        Ok(NotificationOutcome::Payments(vec![]))
    }

    async fn wait_for_calls(processor: &ScriptedProcessor, expected: usize) {
        for _ in 0..200 {
            if processor.calls() >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!(
            "expected {} calls, saw {}",
            expected,
            processor.calls()
        );
    }

    #[tokio::test]
    async fn transient_errors_are_retried_until_success() {
        let processor = ScriptedProcessor::new(vec![
            Err(GatewayError::not_found("payment PAY1").into()),
            Err(GatewayError::timeout("slow").into()),
            done(),
        ]);
        let (worker, queue) = NotificationWorker::new(processor.clone(), fast_policy(5), 8);
        let handle = tokio::spawn(worker.run());

        queue.enqueue(payment()).unwrap();
        wait_for_calls(&processor, 3).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(processor.calls(), 3);

        queue.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn retries_stop_at_budget() {
        let processor =
            ScriptedProcessor::new(vec![Err(GatewayError::not_found("payment PAY1").into())]);
        let (worker, queue) = NotificationWorker::new(processor.clone(), fast_policy(3), 8);
        let handle = tokio::spawn(worker.run());

        queue.enqueue(payment()).unwrap();
        wait_for_calls(&processor, 3).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(processor.calls(), 3);

        queue.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn pending_payments_are_rechecked() {
        let processor = ScriptedProcessor::new(vec![pending(), pending(), done()]);
        let (worker, queue) = NotificationWorker::new(processor.clone(), fast_policy(5), 8);
        let handle = tokio::spawn(worker.run());

        queue.enqueue(payment()).unwrap();
        wait_for_calls(&processor, 3).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(processor.calls(), 3);

        queue.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let processor = ScriptedProcessor::new(vec![Err(ProcessingError::Store(
            DomainError::database("connection reset"),
        ))]);
        let (worker, queue) = NotificationWorker::new(processor.clone(), fast_policy(5), 8);
        let handle = tokio::spawn(worker.run());

        queue.enqueue(payment()).unwrap();
        wait_for_calls(&processor, 1).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(processor.calls(), 1);

        queue.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_stops_worker_and_closes_queue() {
        let processor = ScriptedProcessor::new(vec![done()]);
        let (worker, queue) = NotificationWorker::new(processor, fast_policy(5), 8);
        let handle = tokio::spawn(worker.run());

        queue.shutdown();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("worker did not stop")
            .unwrap();

        assert_eq!(queue.enqueue(payment()), Err(QueueError::Closed));
    }

    #[tokio::test]
    async fn full_queue_rejects_without_blocking() {
        let processor = ScriptedProcessor::new(vec![done()]);
        // Worker not running, so nothing drains.
        let (_worker, queue) = NotificationWorker::new(processor, fast_policy(5), 1);

        queue.enqueue(payment()).unwrap();
        assert_eq!(queue.enqueue(payment()), Err(QueueError::Full));
    }

    #[test]
    fn job_attempts_increment() {
        let job = NotificationJob::new(payment());
        assert_eq!(job.attempt, 1);
        assert_eq!(job.next_attempt().attempt, 2);
    }
}
