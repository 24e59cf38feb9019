// Orchestrator - spawns the worker set and drives deterministic shutdown
//
// Shutdown protocol: join every producer first, then push exactly one
// sentinel per consumer. Consumers drain strictly FIFO, so no sentinel
// can overtake data already in flight, and every blocked consumer is
// eventually woken by either data or its sentinel.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::info;

use crate::application::constants::DEFAULT_WORKER_ITERATIONS;
use crate::application::consumer::{Consumer, ConsumerOutcome};
use crate::application::producer::Producer;
use crate::application::writer::MessageWriter;
use crate::domain::{BoundedQueue, Message, Role, WorkerId};
use crate::error::{AppError, Result};
use crate::port::id_provider::SequentialIds;
use crate::port::reporter::LogReporter;
use crate::port::think_time::UniformThinkTime;
use crate::port::{IdProvider, Reporter, ThinkTime};

/// Validated run parameters (the CLI's P / C / N / T plus the iteration
/// bound, which deliberately stays out of the invocation surface).
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// P: producer worker count
    pub producers: usize,
    /// C: consumer worker count
    pub consumers: usize,
    /// N: queue capacity
    pub capacity: usize,
    /// T: maximum think time between operations, in seconds
    pub max_delay_secs: u64,
    /// Productions per producer
    pub iterations_per_worker: u32,
}

impl RunConfig {
    pub fn new(producers: usize, consumers: usize, capacity: usize, max_delay_secs: u64) -> Self {
        Self {
            producers,
            consumers,
            capacity,
            max_delay_secs,
            iterations_per_worker: DEFAULT_WORKER_ITERATIONS,
        }
    }

    /// All four invocation parameters must be positive; checked before
    /// any queue or thread exists.
    pub fn validate(&self) -> Result<()> {
        if self.producers == 0 {
            return Err(AppError::Config("producer count must be positive".into()));
        }
        if self.consumers == 0 {
            return Err(AppError::Config("consumer count must be positive".into()));
        }
        if self.capacity == 0 {
            return Err(AppError::Config("queue capacity must be positive".into()));
        }
        if self.max_delay_secs == 0 {
            return Err(AppError::Config("max delay must be positive".into()));
        }
        if self.iterations_per_worker == 0 {
            return Err(AppError::Config(
                "iterations per worker must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Per-consumer removal bound: every consumer can absorb the entire
    /// possible production plus its own sentinel. Keeps consumer work
    /// finite while guaranteeing the sentinel, not the counter, is what
    /// normally ends a consumer, for any P/C/N combination.
    fn consumer_iteration_bound(&self) -> u64 {
        self.producers as u64 * self.iterations_per_worker as u64 + 1
    }
}

/// What a completed run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Data messages inserted across all producers
    pub produced: u64,
    /// Data messages removed across all consumers
    pub consumed: u64,
    /// Consumers that exited on their sentinel
    pub sentinels_received: u64,
}

/// Owns the queue, the shared ports, and the worker handle collections
/// for one bounded producer/consumer run.
pub struct Orchestrator {
    config: RunConfig,
    ids: Arc<dyn IdProvider>,
    think: Arc<dyn ThinkTime>,
    reporter: Arc<dyn Reporter>,
}

impl Orchestrator {
    /// Production wiring: sequential ids, uniform random think time from
    /// the configured T, log-line reporter.
    pub fn new(config: RunConfig) -> Self {
        let think = Arc::new(UniformThinkTime::from_secs(config.max_delay_secs));
        Self::with_ports(config, Arc::new(SequentialIds::new()), think, Arc::new(LogReporter))
    }

    /// Fully injected wiring (deterministic tests).
    pub fn with_ports(
        config: RunConfig,
        ids: Arc<dyn IdProvider>,
        think: Arc<dyn ThinkTime>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            config,
            ids,
            think,
            reporter,
        }
    }

    /// Execute one full run: validate, spawn, join producers, inject
    /// sentinels, join consumers.
    ///
    /// # Errors
    /// - `AppError::Config` before anything is created;
    /// - `AppError::InvalidCapacity` from queue creation;
    /// - `AppError::Spawn` if a worker thread cannot be created
    ///   (already-spawned workers keep running to completion);
    /// - `AppError::Join` if a worker panicked;
    /// - `AppError::InvalidState` if the queue lock was poisoned.
    pub fn run(&self) -> Result<RunReport> {
        self.config.validate()?;

        let queue = Arc::new(BoundedQueue::new(self.config.capacity)?);
        let writer = MessageWriter::new(Arc::clone(&self.ids));

        info!(
            producers = self.config.producers,
            consumers = self.config.consumers,
            capacity = self.config.capacity,
            max_delay_secs = self.config.max_delay_secs,
            iterations = self.config.iterations_per_worker,
            "starting run"
        );

        let producers = self.spawn_producers(&queue, &writer)?;
        let consumers = self.spawn_consumers(&queue)?;

        // Phase 1: producers finish their bounded work.
        let mut report = RunReport {
            produced: 0,
            consumed: 0,
            sentinels_received: 0,
        };
        for handle in producers {
            report.produced += join_worker(handle, Role::Producer)??;
        }
        info!(produced = report.produced, "all producers finished, injecting sentinels");

        // Phase 2: one sentinel per consumer, appended only after every
        // producer has stopped, so FIFO order drains all data first.
        for _ in 0..self.config.consumers {
            queue.push(writer.sentinel())?;
        }

        // Phase 3: consumers drain the remainder and stop.
        for handle in consumers {
            let outcome = join_worker(handle, Role::Consumer)??;
            report.consumed += outcome.consumed;
            if outcome.saw_sentinel {
                report.sentinels_received += 1;
            }
        }

        info!(
            produced = report.produced,
            consumed = report.consumed,
            sentinels_received = report.sentinels_received,
            "run complete"
        );
        Ok(report)
    }

    fn spawn_producers(
        &self,
        queue: &Arc<BoundedQueue<Message>>,
        writer: &MessageWriter,
    ) -> Result<Vec<JoinHandle<Result<u64>>>> {
        let mut handles = Vec::with_capacity(self.config.producers);
        for index in 0..self.config.producers {
            let worker = Producer::new(
                WorkerId::producer(index),
                Arc::clone(queue),
                writer.clone(),
                Arc::clone(&self.think),
                Arc::clone(&self.reporter),
                self.config.iterations_per_worker,
            );
            let handle = thread::Builder::new()
                .name(format!("producer-{index}"))
                .spawn(move || worker.run())
                .map_err(|source| AppError::Spawn {
                    role: Role::Producer,
                    source,
                })?;
            handles.push(handle);
        }
        Ok(handles)
    }

    fn spawn_consumers(
        &self,
        queue: &Arc<BoundedQueue<Message>>,
    ) -> Result<Vec<JoinHandle<Result<ConsumerOutcome>>>> {
        let bound = self.config.consumer_iteration_bound();
        let mut handles = Vec::with_capacity(self.config.consumers);
        for index in 0..self.config.consumers {
            let worker = Consumer::new(
                WorkerId::consumer(index),
                Arc::clone(queue),
                Arc::clone(&self.think),
                Arc::clone(&self.reporter),
                bound,
            );
            let handle = thread::Builder::new()
                .name(format!("consumer-{index}"))
                .spawn(move || worker.run())
                .map_err(|source| AppError::Spawn {
                    role: Role::Consumer,
                    source,
                })?;
            handles.push(handle);
        }
        Ok(handles)
    }
}

/// Join one worker thread; a panicked worker surfaces as `AppError::Join`.
fn join_worker<T>(handle: JoinHandle<Result<T>>, role: Role) -> Result<Result<T>> {
    handle.join().map_err(|_| AppError::Join { role })
}
