use std::cell::Cell;
use std::rc::Rc;

use crate::config::{self, WAITLIST_DISPLAY_OFFSET};
use crate::counter::animator::CounterAnimator;
use crate::counter::scheduler::{AnimationFrames, FrameScheduler};
use crate::error::WaitlistError;
use crate::waitlist::store::{SupabaseStore, WaitlistStore, WaitlistSubmission};

pub type PageSync = CountSync<SupabaseStore, AnimationFrames>;

pub fn display_target(rows: u64) -> u64 {
    WAITLIST_DISPLAY_OFFSET.saturating_add(rows)
}

/// The store, or the reason there is none.
pub enum Waitlist<S> {
    Enabled(S),
    Disabled(WaitlistError),
}

impl Waitlist<SupabaseStore> {
    pub fn from_config() -> Self {
        match config::waitlist_settings() {
            Ok(settings) => Waitlist::Enabled(SupabaseStore::new(settings)),
            Err(err) => Waitlist::Disabled(err),
        }
    }
}

impl<S: WaitlistStore> Waitlist<S> {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Waitlist::Enabled(_))
    }

    pub fn configuration_error(&self) -> Option<&WaitlistError> {
        match self {
            Waitlist::Enabled(_) => None,
            Waitlist::Disabled(err) => Some(err),
        }
    }

    fn store(&self) -> Result<&S, WaitlistError> {
        match self {
            Waitlist::Enabled(store) => Ok(store),
            Waitlist::Disabled(err) => Err(err.clone()),
        }
    }

    pub async fn display_target(&self) -> Result<u64, WaitlistError> {
        let rows = self.store()?.count_rows().await?;
        Ok(display_target(rows))
    }

    /// Local checks only, no request. Blank emails are rejected before the
    /// configuration is even looked at.
    pub fn prepare(&self, email: &str) -> Result<WaitlistSubmission, WaitlistError> {
        let submission = WaitlistSubmission::new(email)?;
        self.store()?;
        Ok(submission)
    }

    pub async fn submit(&self, email: &str) -> Result<(), WaitlistError> {
        let submission = self.prepare(email)?;
        self.store()?.insert_row(&submission).await
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sweep {
    /// First load of the session: count up from zero.
    FromZero,
    FromCurrent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    Applied(u64),
    /// Previous fetch still in flight.
    Skipped,
}

struct FetchGuard<'a>(&'a Cell<bool>);

impl<'a> FetchGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Keeps the animated counter in step with the waitlist table.
pub struct CountSync<S, F: FrameScheduler> {
    waitlist: Rc<Waitlist<S>>,
    animator: CounterAnimator<F>,
    fetching: Rc<Cell<bool>>,
}

impl<S, F: FrameScheduler> Clone for CountSync<S, F> {
    fn clone(&self) -> Self {
        Self {
            waitlist: self.waitlist.clone(),
            animator: self.animator.clone(),
            fetching: self.fetching.clone(),
        }
    }
}

impl<S, F: FrameScheduler> PartialEq for CountSync<S, F> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.waitlist, &other.waitlist)
    }
}

impl<S, F> CountSync<S, F>
where
    S: WaitlistStore,
    F: FrameScheduler + 'static,
    F::Handle: 'static,
{
    pub fn new(waitlist: Waitlist<S>, animator: CounterAnimator<F>) -> Self {
        Self {
            waitlist: Rc::new(waitlist),
            animator,
            fetching: Rc::new(Cell::new(false)),
        }
    }

    pub fn waitlist(&self) -> &Waitlist<S> {
        &self.waitlist
    }

    pub fn animator(&self) -> &CounterAnimator<F> {
        &self.animator
    }

    #[cfg(test)]
    pub fn is_fetching(&self) -> bool {
        self.fetching.get()
    }

    /// Fetches the row count and retargets the counter. A failed fetch leaves
    /// the counter where it is.
    pub async fn refresh(&self, sweep: Sweep) -> Result<Refresh, WaitlistError> {
        if self.fetching.get() {
            return Ok(Refresh::Skipped);
        }
        let _guard = FetchGuard::enter(&self.fetching);

        let target = self.waitlist.display_target().await?;
        let start_from = match sweep {
            Sweep::FromZero => Some(0),
            Sweep::FromCurrent => None,
        };
        self.animator.set_target(target, start_from);
        Ok(Refresh::Applied(target))
    }

    /// Inserts the email and bumps the counter by one without refetching.
    pub async fn submit(&self, email: &str) -> Result<u64, WaitlistError> {
        self.waitlist.submit(email).await?;
        let target = self.animator.display() + 1;
        self.animator.set_target(target, None);
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{COUNT_ANIMATION_MS, SUPABASE_URL_VAR};
    use crate::counter::scheduler::manual::ManualFrames;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeState {
        rows: Cell<u64>,
        fail_count: Cell<bool>,
        fail_insert: Cell<bool>,
        count_calls: Cell<usize>,
        inserted: RefCell<Vec<String>>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    #[derive(Clone, Default)]
    struct FakeStore {
        state: Rc<FakeState>,
    }

    impl WaitlistStore for FakeStore {
        async fn count_rows(&self) -> Result<u64, WaitlistError> {
            self.state.count_calls.set(self.state.count_calls.get() + 1);
            let gate = self.state.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if self.state.fail_count.get() {
                return Err(WaitlistError::FetchFailed("offline".into()));
            }
            Ok(self.state.rows.get())
        }

        async fn insert_row(&self, submission: &WaitlistSubmission) -> Result<(), WaitlistError> {
            if self.state.fail_insert.get() {
                return Err(WaitlistError::SubmissionFailed("status 409".into()));
            }
            self.state.inserted.borrow_mut().push(submission.email.clone());
            Ok(())
        }
    }

    fn sync_with(waitlist: Waitlist<FakeStore>, frames: &ManualFrames) -> CountSync<FakeStore, ManualFrames> {
        let animator = CounterAnimator::new(frames.clone(), COUNT_ANIMATION_MS, |_| {});
        CountSync::new(waitlist, animator)
    }

    fn settle(frames: &ManualFrames, mut t: f64) -> f64 {
        while frames.pending() > 0 {
            t += 16.0;
            frames.tick(t);
        }
        t
    }

    fn missing_config() -> Waitlist<FakeStore> {
        Waitlist::Disabled(WaitlistError::ConfigurationMissing { missing: vec![SUPABASE_URL_VAR] })
    }

    #[test]
    fn initial_load_counts_up_from_zero() {
        let store = FakeStore::default();
        store.state.rows.set(10);
        let frames = ManualFrames::default();
        let sync = sync_with(Waitlist::Enabled(store), &frames);

        assert_eq!(block_on(sync.refresh(Sweep::FromZero)), Ok(Refresh::Applied(3016)));
        assert_eq!(sync.animator().display(), 0);

        frames.tick(16.0);
        let first = sync.animator().display();
        assert!(first < 3016);

        settle(&frames, 16.0);
        assert_eq!(sync.animator().display(), 3016);
    }

    #[test]
    fn successful_submission_bumps_without_refetching() {
        let store = FakeStore::default();
        store.state.rows.set(10);
        let frames = ManualFrames::default();
        let sync = sync_with(Waitlist::Enabled(store.clone()), &frames);

        block_on(sync.refresh(Sweep::FromZero)).unwrap();
        let t = settle(&frames, 0.0);
        assert_eq!(sync.animator().display(), 3016);

        assert_eq!(block_on(sync.submit(" ada@example.com ")), Ok(3017));
        assert_eq!(store.state.count_calls.get(), 1);
        assert_eq!(*store.state.inserted.borrow(), vec!["ada@example.com".to_string()]);
        assert!(sync.animator().is_running());

        settle(&frames, t);
        assert_eq!(sync.animator().display(), 3017);
    }

    #[test]
    fn failed_submission_leaves_counter_alone() {
        let store = FakeStore::default();
        store.state.fail_insert.set(true);
        let frames = ManualFrames::default();
        let sync = sync_with(Waitlist::Enabled(store), &frames);

        let err = block_on(sync.submit("ada@example.com")).unwrap_err();
        assert!(matches!(err, WaitlistError::SubmissionFailed(_)));
        assert_eq!(sync.animator().display(), 0);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn missing_configuration_rejects_locally() {
        let frames = ManualFrames::default();
        let sync = sync_with(missing_config(), &frames);

        assert!(!sync.waitlist().is_enabled());
        let err = block_on(sync.submit("ada@example.com")).unwrap_err();
        assert!(matches!(err, WaitlistError::ConfigurationMissing { .. }));
        assert!(err.user_message().starts_with("Waitlist submission is disabled"));

        let err = block_on(sync.refresh(Sweep::FromZero)).unwrap_err();
        assert!(matches!(err, WaitlistError::ConfigurationMissing { .. }));
        assert!(!sync.is_fetching());
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn blank_email_is_reported_before_configuration() {
        let frames = ManualFrames::default();
        let sync = sync_with(missing_config(), &frames);
        assert_eq!(block_on(sync.submit("   ")), Err(WaitlistError::InvalidEmail));
        assert!(matches!(
            sync.waitlist().prepare("ada@example.com"),
            Err(WaitlistError::ConfigurationMissing { .. })
        ));
    }

    #[test]
    fn failed_fetch_keeps_display_and_allows_next_poll() {
        let store = FakeStore::default();
        store.state.rows.set(4);
        let frames = ManualFrames::default();
        let sync = sync_with(Waitlist::Enabled(store.clone()), &frames);

        block_on(sync.refresh(Sweep::FromZero)).unwrap();
        let t = settle(&frames, 0.0);
        assert_eq!(sync.animator().display(), 3010);

        store.state.fail_count.set(true);
        let err = block_on(sync.refresh(Sweep::FromCurrent)).unwrap_err();
        assert!(matches!(err, WaitlistError::FetchFailed(_)));
        assert_eq!(sync.animator().display(), 3010);
        assert_eq!(frames.pending(), 0);

        store.state.fail_count.set(false);
        store.state.rows.set(6);
        assert_eq!(block_on(sync.refresh(Sweep::FromCurrent)), Ok(Refresh::Applied(3012)));
        frames.tick(t + 16.0);
        assert!(sync.animator().display() >= 3010);
        settle(&frames, t + 16.0);
        assert_eq!(sync.animator().display(), 3012);
    }

    #[test]
    fn poll_with_lower_count_snaps_down() {
        let store = FakeStore::default();
        store.state.rows.set(10);
        let frames = ManualFrames::default();
        let sync = sync_with(Waitlist::Enabled(store.clone()), &frames);

        block_on(sync.refresh(Sweep::FromZero)).unwrap();
        settle(&frames, 0.0);

        store.state.rows.set(5);
        assert_eq!(block_on(sync.refresh(Sweep::FromCurrent)), Ok(Refresh::Applied(3011)));
        assert_eq!(sync.animator().display(), 3011);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn overlapping_poll_is_skipped() {
        let store = FakeStore::default();
        store.state.rows.set(1);
        let (release, gate) = oneshot::channel();
        *store.state.gate.borrow_mut() = Some(gate);

        let frames = ManualFrames::default();
        let sync = sync_with(Waitlist::Enabled(store.clone()), &frames);
        let outcome = Rc::new(RefCell::new(None));

        let mut pool = LocalPool::new();
        {
            let sync = sync.clone();
            let outcome = outcome.clone();
            pool.spawner()
                .spawn_local(async move {
                    *outcome.borrow_mut() = Some(sync.refresh(Sweep::FromZero).await);
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert!(sync.is_fetching());

        assert_eq!(pool.run_until(sync.refresh(Sweep::FromCurrent)), Ok(Refresh::Skipped));
        assert_eq!(store.state.count_calls.get(), 1);

        release.send(()).unwrap();
        pool.run_until_stalled();
        assert_eq!(*outcome.borrow(), Some(Ok(Refresh::Applied(3007))));
        assert!(!sync.is_fetching());
    }
}
