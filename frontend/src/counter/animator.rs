use std::cell::RefCell;
use std::rc::Rc;

use super::scheduler::FrameScheduler;

/// Ease-out exponential: fast start, long settle towards 1.
pub fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationRun {
    pub start: u64,
    pub target: u64,
    pub started_at: f64,
}

impl AnimationRun {
    pub fn progress(&self, now: f64, duration_ms: f64) -> f64 {
        if duration_ms <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / duration_ms).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, progress: f64) -> u64 {
        let span = self.target.saturating_sub(self.start) as f64;
        let value = self.start + (span * ease_out_expo(progress)).floor() as u64;
        value.min(self.target)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Retarget {
    /// Display jumped straight to the target, no frames will follow.
    Snapped,
    Started,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    Continue(u64),
    Finished(u64),
    Idle,
}

/// The displayed count and the run (if any) moving it forward.
#[derive(Clone, Debug, PartialEq)]
pub struct CountAnimation {
    display: u64,
    run: Option<AnimationRun>,
    duration_ms: f64,
}

impl CountAnimation {
    pub fn new(duration_ms: f64) -> Self {
        Self { display: 0, run: None, duration_ms }
    }

    pub fn display(&self) -> u64 {
        self.display
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Replaces any in-flight run. Never animates backwards: when the start is
    /// already at or past `target` the display snaps.
    pub fn retarget(&mut self, target: u64, start_from: Option<u64>, now: f64) -> Retarget {
        let start = start_from.unwrap_or(self.display);
        self.run = None;

        if start >= target {
            self.display = target;
            return Retarget::Snapped;
        }

        self.run = Some(AnimationRun { start, target, started_at: now });
        Retarget::Started
    }

    pub fn advance(&mut self, now: f64) -> Frame {
        let Some(run) = self.run else {
            return Frame::Idle;
        };

        let progress = run.progress(now, self.duration_ms);
        if progress >= 1.0 {
            // exact target, whatever floor() left behind
            self.display = run.target;
            self.run = None;
            return Frame::Finished(run.target);
        }

        self.display = run.value_at(progress);
        Frame::Continue(self.display)
    }

    pub fn cancel(&mut self) {
        self.run = None;
    }
}

struct Shared<S: FrameScheduler> {
    scheduler: S,
    animation: RefCell<CountAnimation>,
    pending: RefCell<Option<S::Handle>>,
    on_change: Box<dyn Fn(u64)>,
}

/// Drives a [`CountAnimation`] from a [`FrameScheduler`], one frame at a time.
///
/// At most one frame is ever pending. Retargeting or dropping the last clone
/// cancels it.
pub struct CounterAnimator<S: FrameScheduler> {
    shared: Rc<Shared<S>>,
}

impl<S: FrameScheduler> Clone for CounterAnimator<S> {
    fn clone(&self) -> Self {
        Self { shared: self.shared.clone() }
    }
}

impl<S> CounterAnimator<S>
where
    S: FrameScheduler + 'static,
    S::Handle: 'static,
{
    pub fn new(scheduler: S, duration_ms: f64, on_change: impl Fn(u64) + 'static) -> Self {
        Self {
            shared: Rc::new(Shared {
                scheduler,
                animation: RefCell::new(CountAnimation::new(duration_ms)),
                pending: RefCell::new(None),
                on_change: Box::new(on_change),
            }),
        }
    }

    pub fn display(&self) -> u64 {
        self.shared.animation.borrow().display()
    }

    pub fn is_running(&self) -> bool {
        self.shared.animation.borrow().is_running()
    }

    pub fn set_target(&self, target: u64, start_from: Option<u64>) {
        let now = self.shared.scheduler.now();
        let outcome = self.shared.animation.borrow_mut().retarget(target, start_from, now);
        let superseded = self.shared.pending.borrow_mut().take();
        drop(superseded);

        match outcome {
            Retarget::Snapped => (self.shared.on_change)(target),
            Retarget::Started => Self::schedule(&self.shared),
        }
    }

    pub fn cancel(&self) {
        self.shared.animation.borrow_mut().cancel();
        let pending = self.shared.pending.borrow_mut().take();
        drop(pending);
    }

    fn schedule(shared: &Rc<Shared<S>>) {
        let weak = Rc::downgrade(shared);
        let handle = shared.scheduler.request_frame(Box::new(move |timestamp| {
            if let Some(shared) = weak.upgrade() {
                Self::on_frame(&shared, timestamp);
            }
        }));
        let previous = shared.pending.borrow_mut().replace(handle);
        drop(previous);
    }

    fn on_frame(shared: &Rc<Shared<S>>, timestamp: f64) {
        let frame = shared.animation.borrow_mut().advance(timestamp);
        match frame {
            Frame::Continue(value) => {
                (shared.on_change)(value);
                Self::schedule(shared);
            }
            Frame::Finished(value) => {
                let done = shared.pending.borrow_mut().take();
                drop(done);
                (shared.on_change)(value);
            }
            Frame::Idle => {}
        }
    }
}
