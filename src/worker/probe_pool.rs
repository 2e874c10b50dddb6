// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Probe Pool
 * Fixed-size worker group fed through a bounded work channel
 *
 * © 2026 Bountyy Oy
 */

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

/// Result of one work item. Failures are reported, never propagated.
#[derive(Debug)]
pub struct ProbeOutcome<T, R> {
    pub item: T,
    pub result: Result<R, String>,
}

impl<T, R> ProbeOutcome<T, R> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProbePool {
    workers: usize,
    queue_capacity: usize,
}

impl ProbePool {
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        Self {
            workers: workers.max(1),
            queue_capacity: queue_capacity.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `handler` over every item on the worker group.
    ///
    /// Outcomes arrive in completion order. A failing item is logged and
    /// returned as an error outcome; its siblings keep running.
    pub async fn run<T, R, F, Fut>(&self, items: Vec<T>, handler: F) -> Vec<ProbeOutcome<T, R>>
    where
        T: Clone + Debug + Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    {
        let total = items.len();
        let (work_tx, work_rx) = mpsc::channel::<T>(self.queue_capacity);
        let (result_tx, mut result_rx) = mpsc::channel::<ProbeOutcome<T, R>>(self.queue_capacity);
        let work_rx = Arc::new(Mutex::new(work_rx));
        let handler = Arc::new(handler);

        let feeder = tokio::spawn(async move {
            for item in items {
                if work_tx.send(item).await.is_err() {
                    break;
                }
            }
        });

        let mut workers = Vec::with_capacity(self.workers);
        for worker_id in 0..self.workers {
            let work_rx = Arc::clone(&work_rx);
            let result_tx = result_tx.clone();
            let handler = Arc::clone(&handler);

            workers.push(tokio::spawn(async move {
                loop {
                    let next = work_rx.lock().await.recv().await;
                    let Some(item) = next else {
                        break;
                    };

                    let result = match (*handler)(item.clone()).await {
                        Ok(value) => Ok(value),
                        Err(e) => {
                            warn!("[ProbePool] worker {} probe {:?} failed: {:#}", worker_id, item, e);
                            Err(e.to_string())
                        }
                    };

                    if result_tx.send(ProbeOutcome { item, result }).await.is_err() {
                        break;
                    }
                }
            }));
        }
        drop(result_tx);

        let mut outcomes = Vec::with_capacity(total);
        while let Some(outcome) = result_rx.recv().await {
            outcomes.push(outcome);
        }

        if let Err(e) = feeder.await {
            warn!("[ProbePool] feeder task failed: {}", e);
        }
        for worker in workers {
            if let Err(e) = worker.await {
                warn!("[ProbePool] worker task failed: {}", e);
            }
        }

        debug!("[ProbePool] {} of {} probes completed", outcomes.len(), total);
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_all_items_processed() {
        let pool = ProbePool::new(4, 2);
        let mut outcomes = pool
            .run((0..20).collect::<Vec<u32>>(), |n| async move { Ok::<_, anyhow::Error>(n * 2) })
            .await;

        outcomes.sort_by_key(|o| o.item);
        assert_eq!(outcomes.len(), 20);
        assert_eq!(outcomes[7].result, Ok(14));
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_siblings() {
        let pool = ProbePool::new(3, 8);
        let outcomes = pool
            .run(vec![1u32, 2, 3, 4, 5], |n| async move {
                if n % 2 == 0 {
                    anyhow::bail!("probe {} timed out", n);
                }
                Ok(n)
            })
            .await;

        assert_eq!(outcomes.len(), 5);
        assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 3);
        let failed = outcomes.iter().find(|o| o.item == 2).unwrap();
        assert_eq!(failed.result, Err("probe 2 timed out".to_string()));
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let pool = ProbePool::new(2, 16);

        let (a, p) = (Arc::clone(&active), Arc::clone(&peak));
        pool.run((0..10).collect::<Vec<u32>>(), move |_| {
            let (active, peak) = (Arc::clone(&a), Arc::clone(&p));
            async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                Ok::<_, anyhow::Error>(())
            }
        })
        .await;

        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
