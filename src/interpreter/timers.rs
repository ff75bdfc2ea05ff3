/*
 * ==========================================================================
 * SWAZI - Lugha ya programu kwa Kiswahili
 * ==========================================================================
 *
 * Crate:    swazi (evaluator core)
 *
 * License:
 * This file is part of the Swazi programming language project.
 *
 * Swazi is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

/*!
 * Async Task Queue & Timer Runtime
 * --------------------------------
 *
 *  • subiri(fn, ...args) / queueMicrotask / queueMacrotask
 *  • setTimeout / setInterval / nap
 *  • clearTimeout / clearInterval
 *
 * Timers run on background threads but **callbacks always execute on the
 * interpreter thread**. Script values are not `Send`, so the shared queue
 * only carries job ids; the callbacks themselves stay in a table owned by
 * the consumer side.
 */

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::debug;

use crate::error::{EvalResult, SwaziError};
use crate::interpreter::environment::EnvRef;
use crate::interpreter::helpers::to_number;
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::{ObjectValue, Value};

pub type TimerId = u64;

/* ============================================================================
 * Shared (cross-thread) state
 * ============================================================================
 */

/// Work item crossing from producers to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    /// Directly enqueued callback.
    Immediate(u64),

    /// A timer reached its deadline.
    TimerFired(TimerId),
}

/// Scheduling parameters of one live timer.
#[derive(Debug)]
pub struct TimerEntry {
    pub id: TimerId,
    pub delay: Duration,

    /// `Some(period)` for intervals.
    pub interval: Option<Duration>,

    cancelled: AtomicBool,
}

impl TimerEntry {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
struct Shared {
    queue: Mutex<VecDeque<Job>>,
    ready: Condvar,
    timers: Mutex<HashMap<TimerId, Arc<TimerEntry>>>,
}

impl Shared {
    fn push(&self, job: Job) {
        self.queue.lock().push_back(job);
        self.ready.notify_one();
    }

    /// Removes a finished timer and wakes the loop so it can re-check
    /// its exit condition.
    fn retire(&self, id: TimerId) {
        self.timers.lock().remove(&id);
        let _queue = self.queue.lock();
        self.ready.notify_all();
    }
}

/* ============================================================================
 * Consumer side
 * ============================================================================
 */

struct PendingCallback {
    callback: Value,
    args: Vec<Value>,
}

/// The runtime's single FIFO callback queue plus its timer registry.
///
/// Created once per interpreter; dropped timers are cancelled and their
/// threads joined.
pub struct Scheduler {
    shared: Arc<Shared>,
    callbacks: RefCell<HashMap<u64, PendingCallback>>,
    handles: RefCell<HashMap<TimerId, JoinHandle<()>>>,
    next_id: Cell<u64>,
    slice: Duration,
}

impl Scheduler {
    pub fn new(slice: Duration) -> Self {
        Self {
            shared: Arc::new(Shared::default()),
            callbacks: RefCell::new(HashMap::new()),
            handles: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
            slice: slice.max(Duration::from_millis(1)),
        }
    }

    fn allocate_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    /// Appends `callback(args)` to the queue. Never blocks.
    pub fn enqueue(&self, callback: Value, args: Vec<Value>) -> u64 {
        let id = self.allocate_id();
        self.callbacks
            .borrow_mut()
            .insert(id, PendingCallback { callback, args });
        self.shared.push(Job::Immediate(id));
        id
    }

    /// Arms a timer whose thread enqueues `callback` after `delay`, and
    /// again every `delay` when `repeat` is set.
    pub fn set_timer(&self, delay: Duration, callback: Value, args: Vec<Value>, repeat: bool) -> EvalResult<TimerId> {
        let id = self.allocate_id();
        let entry = Arc::new(TimerEntry {
            id,
            delay,
            interval: repeat.then(|| delay.max(Duration::from_millis(1))),
            cancelled: AtomicBool::new(false),
        });

        self.callbacks
            .borrow_mut()
            .insert(id, PendingCallback { callback, args });
        self.shared.timers.lock().insert(id, entry.clone());

        let shared = self.shared.clone();
        let slice = self.slice;
        let spawned = thread::Builder::new()
            .name(format!("swazi-timer-{}", id))
            .spawn(move || run_timer(shared, entry, slice));

        match spawned {
            Ok(handle) => {
                self.handles.borrow_mut().insert(id, handle);
                debug!(timer = id, delay_ms = delay.as_millis() as u64, repeat, "armed timer");
                Ok(id)
            }
            Err(err) => {
                self.callbacks.borrow_mut().remove(&id);
                self.shared.timers.lock().remove(&id);
                Err(SwaziError::runtime_error(
                    format!("Failed to start timer thread: {}", err),
                    Span::builtin(),
                ))
            }
        }
    }

    /// Flags a timer as cancelled. Its thread exits at the next slice
    /// boundary; a fire already sitting in the queue is dropped.
    pub fn clear_timer(&self, id: TimerId) -> bool {
        let entry = self.shared.timers.lock().get(&id).cloned();
        self.callbacks.borrow_mut().remove(&id);
        match entry {
            Some(entry) => {
                entry.cancel();
                debug!(timer = id, "cancelled timer");
                true
            }
            None => false,
        }
    }

    pub fn live_timers(&self) -> usize {
        self.shared.timers.lock().len()
    }

    pub fn queued_jobs(&self) -> usize {
        self.shared.queue.lock().len()
    }

    /// Blocks until a job is available, returning `None` once the queue is
    /// empty and no timers remain.
    pub fn next_job(&self) -> Option<Job> {
        let mut queue = self.shared.queue.lock();
        loop {
            if let Some(job) = queue.pop_front() {
                return Some(job);
            }
            if self.shared.timers.lock().is_empty() {
                return None;
            }
            self.shared.ready.wait(&mut queue);
        }
    }

    /// Resolves a job to the callback it should run, if it is still wanted.
    pub fn take_callback(&self, job: Job) -> Option<(Value, Vec<Value>)> {
        let mut callbacks = self.callbacks.borrow_mut();
        match job {
            Job::Immediate(id) => callbacks.remove(&id).map(|p| (p.callback, p.args)),
            Job::TimerFired(id) => {
                let repeating = self
                    .shared
                    .timers
                    .lock()
                    .get(&id)
                    .map(|entry| entry.interval.is_some())
                    .unwrap_or(false);

                if repeating {
                    callbacks.get(&id).map(|p| (p.callback.clone(), p.args.clone()))
                } else {
                    callbacks.remove(&id).map(|p| (p.callback, p.args))
                }
            }
        }
    }

    /// Joins every timer thread that has already retired.
    pub fn reap(&self) {
        let live: Vec<TimerId> = self.shared.timers.lock().keys().copied().collect();
        let mut handles = self.handles.borrow_mut();
        let finished: Vec<TimerId> = handles.keys().copied().filter(|id| !live.contains(id)).collect();
        for id in finished {
            if let Some(handle) = handles.remove(&id) {
                let _ = handle.join();
            }
        }
    }

    /// Cancels all timers and waits for their threads.
    pub fn shutdown(&self) {
        for entry in self.shared.timers.lock().values() {
            entry.cancel();
        }
        self.callbacks.borrow_mut().clear();
        for (_, handle) in self.handles.borrow_mut().drain() {
            let _ = handle.join();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/* ============================================================================
 * Timer threads
 * ============================================================================
 */

fn run_timer(shared: Arc<Shared>, entry: Arc<TimerEntry>, slice: Duration) {
    let mut wait = entry.delay;
    loop {
        if !sleep_unless_cancelled(&entry, wait, slice) {
            break;
        }

        // A timer cleared while its fire is queued is filtered on the
        // consumer side.
        shared.push(Job::TimerFired(entry.id));

        match entry.interval {
            Some(period) => wait = period,
            None => break,
        }
    }
    shared.retire(entry.id);
}

/// Sleeps in `slice` steps. Returns `false` if cancelled first.
fn sleep_unless_cancelled(entry: &TimerEntry, total: Duration, slice: Duration) -> bool {
    let deadline = Instant::now() + total;
    loop {
        if entry.is_cancelled() {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return !entry.is_cancelled();
        }
        thread::sleep(slice.min(deadline - now));
    }
}

/* ============================================================================
 * Installing Built-in Timer Functions
 * ============================================================================
 */

/// Accepts `(ms, fn, ...rest)` and `(fn, ms, ...rest)`.
pub fn parse_timer_args(args: Vec<Value>, name: &str, span: Span) -> EvalResult<(Duration, Value, Vec<Value>)> {
    let mut args = args.into_iter();
    let first = args.next().unwrap_or(Value::Null);
    let second = args.next().unwrap_or(Value::Null);
    let rest: Vec<Value> = args.collect();

    let (ms, callback) = match (&first, &second) {
        (Value::Function(_), _) => (second, first),
        (_, Value::Function(_)) => (first, second),
        _ => {
            return Err(SwaziError::type_error(
                format!("{} expects a function and a delay in milliseconds", name),
                span,
            ))
        }
    };

    Ok((value_to_duration(&ms, span)?, callback, rest))
}

/// Negative, NaN and missing delays clamp to zero.
fn value_to_duration(value: &Value, span: Span) -> EvalResult<Duration> {
    if value.is_null() {
        return Ok(Duration::ZERO);
    }
    let ms = to_number(value, span)?;
    if ms.is_nan() || ms <= 0.0 {
        return Ok(Duration::ZERO);
    }
    Ok(Duration::from_secs_f64(ms.min(1.0e12) / 1000.0))
}

fn timer_id(args: &[Value], name: &str, span: Span) -> EvalResult<TimerId> {
    match args.first() {
        Some(Value::Number(n)) if *n >= 0.0 => Ok(*n as TimerId),
        _ => Err(SwaziError::type_error(format!("{}(id) requires a numeric timer id", name), span)),
    }
}

fn set_timeout(interp: &Interpreter, args: Vec<Value>, _env: &EnvRef, span: Span) -> EvalResult<Value> {
    let (delay, callback, rest) = parse_timer_args(args, "setTimeout", span)?;
    let id = interp.scheduler().set_timer(delay, callback, rest, false)?;
    Ok(Value::Number(id as f64))
}

fn set_interval(interp: &Interpreter, args: Vec<Value>, _env: &EnvRef, span: Span) -> EvalResult<Value> {
    let (delay, callback, rest) = parse_timer_args(args, "setInterval", span)?;
    let id = interp.scheduler().set_timer(delay, callback, rest, true)?;
    Ok(Value::Number(id as f64))
}

fn clear_timer(interp: &Interpreter, args: Vec<Value>, _env: &EnvRef, span: Span) -> EvalResult<Value> {
    let id = timer_id(&args, "clearTimeout", span)?;
    Ok(Value::Bool(interp.scheduler().clear_timer(id)))
}

/// `nap(ms, fn, ...args)`; `nap(ms)` alone just keeps the loop alive.
fn nap(interp: &Interpreter, args: Vec<Value>, _env: &EnvRef, span: Span) -> EvalResult<Value> {
    let (delay, callback, rest) = if args.len() <= 1 {
        let ms = args.into_iter().next().unwrap_or(Value::Null);
        (value_to_duration(&ms, span)?, Value::Null, Vec::new())
    } else {
        parse_timer_args(args, "nap", span)?
    };
    let id = interp.scheduler().set_timer(delay, callback, rest, false)?;
    Ok(Value::Number(id as f64))
}

fn enqueue(interp: &Interpreter, args: Vec<Value>, _env: &EnvRef, span: Span) -> EvalResult<Value> {
    let mut args = args.into_iter();
    let callback = match args.next() {
        Some(f @ Value::Function(_)) => f,
        _ => return Err(SwaziError::type_error("Expected a function to schedule", span)),
    };
    interp.scheduler().enqueue(callback, args.collect());
    Ok(Value::Null)
}

/// Installs timer and queue functions into the global environment.
///
/// This registers:
///  • setTimeout / setInterval / clearTimeout / clearInterval
///  • nap / subiri
///  • a `timers` object exposing all of the above plus
///    queueMicrotask / queueMacrotask
pub fn install_timers(env: &EnvRef) {
    let set_timeout_fn = Value::native("setTimeout", set_timeout);
    let set_interval_fn = Value::native("setInterval", set_interval);
    let clear_timeout_fn = Value::native("clearTimeout", clear_timer);
    let clear_interval_fn = Value::native("clearInterval", clear_timer);
    let nap_fn = Value::native("nap", nap);
    let subiri_fn = Value::native("subiri", enqueue);

    let module = ObjectValue::from_pairs([
        ("setTimeout", set_timeout_fn.clone()),
        ("setInterval", set_interval_fn.clone()),
        ("clearTimeout", clear_timeout_fn.clone()),
        ("clearInterval", clear_interval_fn.clone()),
        ("nap", nap_fn.clone()),
        ("queueMicrotask", Value::native("queueMicrotask", enqueue)),
        ("queueMacrotask", Value::native("queueMacrotask", enqueue)),
    ]);

    let mut env = env.borrow_mut();
    env.define("setTimeout", set_timeout_fn);
    env.define("setInterval", set_interval_fn);
    env.define("clearTimeout", clear_timeout_fn);
    env.define("clearInterval", clear_interval_fn);
    env.define("nap", nap_fn);
    env.define("subiri", subiri_fn);
    env.define("timers", Value::object(module));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noop() -> Value {
        Value::native("noop", |_, _, _, _| Ok(Value::Null))
    }

    #[test]
    fn immediate_jobs_drain_fifo() {
        let scheduler = Scheduler::new(Duration::from_millis(5));
        let a = scheduler.enqueue(noop(), vec![]);
        let b = scheduler.enqueue(noop(), vec![Value::Number(1.0)]);

        assert_eq!(scheduler.next_job(), Some(Job::Immediate(a)));
        assert_eq!(scheduler.next_job(), Some(Job::Immediate(b)));
        assert_eq!(scheduler.next_job(), None);
    }

    #[test]
    fn timer_fires_once_then_retires() {
        let scheduler = Scheduler::new(Duration::from_millis(5));
        let id = scheduler.set_timer(Duration::from_millis(10), noop(), vec![], false).unwrap();

        assert_eq!(scheduler.next_job(), Some(Job::TimerFired(id)));
        assert!(scheduler.take_callback(Job::TimerFired(id)).is_some());
        assert_eq!(scheduler.next_job(), None);
        assert_eq!(scheduler.live_timers(), 0);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let scheduler = Scheduler::new(Duration::from_millis(5));
        let id = scheduler.set_timer(Duration::from_secs(30), noop(), vec![], false).unwrap();
        assert!(scheduler.clear_timer(id));

        let started = Instant::now();
        assert_eq!(scheduler.next_job(), None);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn timer_args_accept_both_orders() {
        let (delay, callback, rest) =
            parse_timer_args(vec![Value::Number(20.0), noop(), Value::Number(1.0)], "setTimeout", Span::default()).unwrap();
        assert_eq!(delay, Duration::from_millis(20));
        assert!(matches!(callback, Value::Function(_)));
        assert_eq!(rest.len(), 1);

        let (delay, _, rest) = parse_timer_args(vec![noop(), Value::Number(-5.0)], "setTimeout", Span::default()).unwrap();
        assert_eq!(delay, Duration::ZERO);
        assert!(rest.is_empty());

        assert!(parse_timer_args(vec![Value::Number(1.0)], "setTimeout", Span::default()).is_err());
    }
}
