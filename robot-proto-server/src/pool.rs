// Copyright © 2026 Robot Recall Contributors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

//! ## WORKER POOL
//!
//! A small pool of worker threads, each servicing exactly one
//! connection for its full lifetime: N long-lived threads pulling jobs
//! off one shared channel, without pulling in a dedicated thread-pool
//! crate for it.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// ## WORKER POOL
///
/// `worker_count` OS threads, each looping on the shared receiving end
/// of an `mpsc` channel until the pool is dropped and the sending end
/// is closed.
pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `worker_count` threads immediately. `worker_count` must
    /// be at least 1.
    pub fn new(worker_count: usize) -> Self {
        assert!(worker_count > 0, "worker pool needs at least one worker");

        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver: Arc<Mutex<Receiver<Job>>> = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            let receiver = Arc::clone(&receiver);
            workers.push(thread::spawn(move || Self::work(id, receiver)));
        }

        Self {
            sender: Some(sender),
            workers,
        }
    }

    /// Queues a job for whichever worker becomes free next. FIFO order
    /// across the shared channel, no further scheduling policy — each
    /// job runs to completion on a single worker before that worker
    /// looks for another.
    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(sender) = &self.sender {
            if sender.send(Box::new(job)).is_err() {
                log::error!("worker pool channel is closed, dropping job");
            }
        }
    }

    fn work(id: usize, receiver: Arc<Mutex<Receiver<Job>>>) {
        loop {
            let job = {
                // The lock is held only long enough to pop one job;
                // the job itself runs outside it so workers never
                // serialize on anything but the queue pop.
                let guard = receiver.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                guard.recv()
            };
            match job {
                Ok(job) => job(),
                Err(_) => {
                    log::debug!("worker {id} shutting down: queue closed");
                    break;
                }
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Dropping the sender unblocks every worker's `recv()` with an
        // `Err`, which is their signal to exit their loop.
        self.sender.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}
