use std::time::Duration;
use tracing::debug;
use crate::scene::{Catalog, Scene};
use crate::state::ControllerState;

/// Read-only view of the controller handed to renderers and subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    pub active_scene: &'a Scene,
    pub active_index: usize,
    pub scene_count: usize,
    pub scene_progress: f32,
    /// Seconds into the current pass: completed scenes plus the active scene's share
    pub elapsed: f32,
    pub total_duration: f32,
    /// Completed passes through the whole catalog
    pub passes: u64,
}

impl<'a> Snapshot<'a> {
    fn capture(catalog: &'a Catalog, state: &ControllerState, passes: u64) -> Self {
        let active_scene = catalog.scene(state.active_index);
        Self {
            active_scene,
            active_index: state.active_index,
            scene_count: catalog.len(),
            scene_progress: state.scene_progress,
            elapsed: catalog.offset_of(state.active_index) + state.scene_progress * active_scene.duration,
            total_duration: catalog.total_duration(),
            passes,
        }
    }

    /// How full the timeline bar of scene `index` is.
    pub fn bar_fill(&self, index: usize) -> f32 {
        if index < self.active_index {
            1.0
        } else if index > self.active_index {
            0.0
        } else {
            self.scene_progress
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Snapshot<'_>)>;

// One-shot advance, armed on scene entry.
#[derive(Debug, Clone, Copy)]
struct AdvanceTimer {
    epoch: u64,
    deadline: Duration,
}

// Per-frame progress sampling, runs until the scene is fully elapsed.
#[derive(Debug, Clone, Copy)]
struct ProgressSampler {
    epoch: u64,
    started_at: Duration,
    length: Duration,
}

/// Drives the storyboard: advances scenes on a per-scene timer and samples
/// intra-scene progress on every frame the host reports.
///
/// The controller never reads a clock. The host passes the time since mount to
/// [`tick`](Self::tick), or drives the two loops separately with
/// [`sample_frame`](Self::sample_frame) and [`fire_due_timers`](Self::fire_due_timers).
pub struct SlideshowController {
    catalog: Catalog,
    state: ControllerState,

    // Bumped on every scene entry. Timers and samplers armed for an older
    // epoch are never allowed to touch state.
    epoch: u64,
    advance: Option<AdvanceTimer>,
    sampler: Option<ProgressSampler>,
    passes: u64,

    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,

    shut_down: bool,
}

impl SlideshowController {
    /// Mounts the controller at `now` on the first scene.
    pub fn new(catalog: Catalog, now: Duration) -> Self {
        let mut controller = Self {
            catalog,
            state: ControllerState::new(),
            epoch: 0,
            advance: None,
            sampler: None,
            passes: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
            shut_down: false,
        };
        controller.enter_scene(0, now);
        controller
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn is_running(&self) -> bool {
        !self.shut_down
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::capture(&self.catalog, &self.state, self.passes)
    }

    /// Registers an observer. It immediately receives the current snapshot and
    /// then every subsequent change until it is removed or the controller shuts down.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        if self.shut_down {
            return id;
        }

        let mut subscriber: Subscriber = Box::new(subscriber);
        subscriber(&Snapshot::capture(&self.catalog, &self.state, self.passes));
        self.subscribers.push((id, subscriber));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// One host frame: sample progress for the active scene, then fire the
    /// advance timer if its deadline has passed.
    pub fn tick(&mut self, now: Duration) {
        self.sample_frame(now);
        self.fire_due_timers(now);
    }

    /// Progress sampling. Does nothing once the active scene is fully elapsed.
    pub fn sample_frame(&mut self, now: Duration) {
        if self.shut_down {
            return;
        }
        let Some(sampler) = self.sampler else {
            return;
        };
        if sampler.epoch != self.epoch {
            debug!(epoch = sampler.epoch, current = self.epoch, "dropping stale progress sampler");
            self.sampler = None;
            return;
        }

        let elapsed = now.saturating_sub(sampler.started_at);
        let progress = (elapsed.as_secs_f32() / sampler.length.as_secs_f32()).min(1.0);

        // A host clock stepping backwards must not rewind the bar
        if progress > self.state.scene_progress {
            self.state.scene_progress = progress;
            self.notify();
        }
        if elapsed >= sampler.length {
            self.sampler = None;
        }
    }

    /// Fires the advance timer if due. A host that stalled for longer than a
    /// scene gets one advance per elapsed scene duration, at most one pass per
    /// call. Returns the number of advances.
    pub fn fire_due_timers(&mut self, now: Duration) -> usize {
        if self.shut_down {
            return 0;
        }

        // At most one full pass per call, the rest is picked up on later frames
        let limit = self.catalog.len();
        let mut fired = 0;
        while fired < limit {
            let Some(timer) = self.advance.take() else {
                break;
            };
            if timer.epoch != self.epoch {
                debug!(epoch = timer.epoch, current = self.epoch, "dropping stale advance timer");
                continue;
            }
            if now < timer.deadline {
                self.advance = Some(timer);
                break;
            }

            let next = self.catalog.next_index(self.state.active_index);
            if next == 0 {
                self.passes += 1;
                debug!(passes = self.passes, "storyboard wrapped to the first scene");
            }
            // The next scene starts when this one was due, not when the host noticed
            self.enter_scene(next, timer.deadline);
            fired += 1;
        }
        fired
    }

    /// Cancels both loops and drops every subscriber. Later calls are no-ops.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.advance = None;
        self.sampler = None;
        self.subscribers.clear();
        debug!(index = self.state.active_index, "slideshow controller shut down");
    }

    fn enter_scene(&mut self, index: usize, at: Duration) {
        // Re-arming replaces whatever was pending for the previous scene
        self.epoch += 1;
        self.state.enter(index);

        let scene = self.catalog.scene(index);
        let length = self.catalog.length_of(index);
        debug!(index, id = scene.id, duration = scene.duration, "entering scene");

        self.advance = Some(AdvanceTimer { epoch: self.epoch, deadline: at.saturating_add(length) });
        self.sampler = Some(ProgressSampler { epoch: self.epoch, started_at: at, length });
        self.notify();
    }

    fn notify(&mut self) {
        let snapshot = Snapshot::capture(&self.catalog, &self.state, self.passes);
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&snapshot);
        }
    }
}

impl Drop for SlideshowController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
