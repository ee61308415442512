//! Completion - the handle a submitter gets back for one task
//!
//! # Usage
//! - async code: `completion.await`
//! - sync code: `completion.join()` (blocks the calling thread)
//!
//! Cancellation is not supported: dropping a `Completion` only discards the
//! result, the task still runs.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::thread;

use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task;

use crate::domain::errors::TaskError;

/// What a task produced, or why it produced nothing.
pub type Outcome<T> = Result<T, TaskError>;

enum State<T> {
    /// Outcome already known. `None` once it has been handed out.
    Ready(Option<Outcome<T>>),
    Pending(oneshot::Receiver<Outcome<T>>),
}

/// Pending or finished outcome of a submitted task.
pub struct Completion<T> {
    state: State<T>,
}

impl<T> Completion<T> {
    pub(crate) fn ready(outcome: Outcome<T>) -> Self {
        Self {
            state: State::Ready(Some(outcome)),
        }
    }

    /// Wrap the receiving end of a task's result channel.
    ///
    /// If the task already finished (always the case for inline execution)
    /// the handle starts out ready.
    pub(crate) fn from_receiver(mut rx: oneshot::Receiver<Outcome<T>>) -> Self {
        match rx.try_recv() {
            Ok(outcome) => Self::ready(outcome),
            Err(TryRecvError::Closed) => Self::ready(Err(TaskError::Dropped)),
            Err(TryRecvError::Empty) => Self {
                state: State::Pending(rx),
            },
        }
    }

    /// Whether the task had already finished when this handle was handed out.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }
}

impl<T: Send> Completion<T> {
    /// Block the current thread until the task finishes.
    ///
    /// Safe to call from anywhere, including pool workers and async code:
    /// - multi-thread runtime: the worker hands its queued tasks to another
    ///   thread while waiting (`block_in_place`)
    /// - current-thread runtime: the wait happens on a helper thread
    /// - no runtime: plain blocking receive
    pub fn join(self) -> Outcome<T> {
        let rx = match self.state {
            State::Ready(outcome) => return outcome.unwrap_or(Err(TaskError::Dropped)),
            State::Pending(rx) => rx,
        };

        let received = match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                task::block_in_place(|| rx.blocking_recv())
            }
            Ok(_) => thread::scope(|scope| {
                scope
                    .spawn(|| rx.blocking_recv())
                    .join()
                    .unwrap_or_else(|_| Ok(Err(TaskError::Dropped)))
            }),
            Err(_) => rx.blocking_recv(),
        };
        received.unwrap_or(Err(TaskError::Dropped))
    }
}

// No structural pinning: the outcome is moved out, never pinned.
impl<T> Unpin for Completion<T> {}

impl<T> Future for Completion<T> {
    type Output = Outcome<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let outcome = match &mut this.state {
            State::Ready(outcome) => outcome.take().unwrap_or(Err(TaskError::Dropped)),
            State::Pending(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(received) => received.unwrap_or(Err(TaskError::Dropped)),
                Poll::Pending => return Poll::Pending,
            },
        };
        this.state = State::Ready(None);
        Poll::Ready(outcome)
    }
}

impl<T> std::fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("ready", &self.is_ready())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_sender_makes_a_ready_handle() {
        let (tx, rx) = oneshot::channel();
        tx.send(Ok(5)).unwrap();

        let completion = Completion::from_receiver(rx);
        assert!(completion.is_ready());
        assert_eq!(completion.join(), Ok(5));
    }

    #[test]
    fn test_dropped_sender_reports_dropped() {
        let (tx, rx) = oneshot::channel::<Outcome<()>>();
        drop(tx);

        let completion = Completion::from_receiver(rx);
        assert_eq!(completion.join(), Err(TaskError::Dropped));
    }

    #[tokio::test]
    async fn test_pending_handle_resolves_when_sent() {
        let (tx, rx) = oneshot::channel();
        let completion = Completion::from_receiver(rx);
        assert!(!completion.is_ready());

        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            let _ = tx.send(Ok("done"));
        });

        assert_eq!(completion.await, Ok("done"));
    }

    #[tokio::test]
    async fn test_join_inside_current_thread_runtime() {
        let (tx, rx) = oneshot::channel();
        let completion = Completion::from_receiver(rx);

        let sender = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            let _ = tx.send(Ok(5));
        });

        assert_eq!(completion.join(), Ok(5));
        sender.join().unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_join_inside_multi_thread_runtime() {
        let (tx, rx) = oneshot::channel();
        let completion = Completion::from_receiver(rx);

        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            let _ = tx.send(Ok("joined"));
        });

        assert_eq!(completion.join(), Ok("joined"));
    }
}
