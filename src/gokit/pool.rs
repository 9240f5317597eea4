use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

type TaskFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// One unit of work. The closure receives the id of the worker running it.
pub struct Task {
    run: Box<dyn FnOnce(usize) -> TaskFuture + Send>,
}

impl Task {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce(usize) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            run: Box::new(move |worker_id| Box::pin(f(worker_id))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub completed: usize,
    pub failed: usize,
    pub panicked: usize,
}

#[derive(Default)]
struct Counters {
    completed: AtomicUsize,
    failed: AtomicUsize,
    panicked: AtomicUsize,
}

/// Producer/consumer pool with a fixed number of workers sharing one queue.
///
/// Tasks are sent through [`Pool::entry`]. [`Pool::run`] finishes once every
/// entry sender is dropped and the queue is drained.
pub struct Pool {
    workers: usize,
    sender: mpsc::Sender<Task>,
    receiver: mpsc::Receiver<Task>,
}

impl Pool {
    /// `cap` workers, at least one.
    pub fn new(cap: usize) -> Self {
        let workers = cap.max(1);
        let (sender, receiver) = mpsc::channel(workers);
        Self {
            workers,
            sender,
            receiver,
        }
    }

    pub fn entry(&self) -> mpsc::Sender<Task> {
        self.sender.clone()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn run(self) -> PoolStats {
        let Pool {
            workers,
            sender,
            receiver,
        } = self;
        drop(sender);

        info!("Starting pool with {} workers", workers);
        let queue = Arc::new(Mutex::new(receiver));
        let counters = Arc::new(Counters::default());

        let handles: Vec<_> = (0..workers)
            .map(|worker_id| tokio::spawn(worker(worker_id, queue.clone(), counters.clone())))
            .collect();
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Pool worker stopped abnormally: {}", e);
            }
        }

        let stats = PoolStats {
            completed: counters.completed.load(Ordering::Relaxed),
            failed: counters.failed.load(Ordering::Relaxed),
            panicked: counters.panicked.load(Ordering::Relaxed),
        };
        info!("Pool drained: {:?}", stats);
        stats
    }
}

async fn worker(worker_id: usize, queue: Arc<Mutex<mpsc::Receiver<Task>>>, counters: Arc<Counters>) {
    loop {
        // The lock is released before the task runs.
        let next = queue.lock().await.recv().await;
        let Some(task) = next else {
            debug!("Worker {} found the queue closed", worker_id);
            break;
        };

        // Running the task on its own tokio task turns a panic into a JoinError.
        match tokio::spawn((task.run)(worker_id)).await {
            Ok(Ok(())) => {
                counters.completed.fetch_add(1, Ordering::Relaxed);
            }
            Ok(Err(e)) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!("Task on worker {} failed: {:#}", worker_id, e);
            }
            Err(e) => {
                counters.panicked.fetch_add(1, Ordering::Relaxed);
                warn!("Task on worker {} panicked: {}", worker_id, e);
            }
        }
    }
}
