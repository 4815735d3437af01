use runtime::coalescer::FrameCoalescer;
use runtime::frame::Frame;
use runtime::subscribers::{Subscribers, SubscriptionId};
use tracing::{debug, trace};

use crate::bridge::RenderBridge;
use crate::filter::{VisibleSet, filter_visible};
use crate::indicator::InteractionState;
use crate::point::EventPoint;
use crate::region::SelectorRegion;

/// Everything that can make a recompute pass due.
///
/// The four sources fire at wildly different rates (camera changes arrive
/// many times per second during a drag); all of them funnel into the same
/// single-flag coalescer, so burstiness never produces more than one pass
/// per frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Trigger {
    CameraChanged,
    DatasetReplaced,
    ViewportResized,
    RendererReady,
    InteractionStart,
    InteractionEnd,
}

impl Trigger {
    /// Maps the renderer's control-event names onto triggers.
    pub fn from_control_event(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Trigger::InteractionStart),
            "end" => Some(Trigger::InteractionEnd),
            "change" => Some(Trigger::CameraChanged),
            _ => None,
        }
    }
}

/// Result of one frame callback.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// No pass was pending for this frame.
    NotDue,
    /// A pass was due but the renderer could not supply a camera or canvas
    /// rect yet; retried on the next qualifying trigger.
    SkippedNotReady,
    /// One pass ran and its set was published.
    Published { count: usize },
}

/// The recompute scheduler and its wiring.
///
/// Owns the injected [`RenderBridge`], the current dataset snapshot, the
/// selector region, the coalescing flag, the interaction indicator, and the
/// subscriber registries. The host render loop calls [`Self::on_frame`] once
/// per animation frame; everything else is trigger plumbing.
///
/// Guarantees:
/// - At most one filter pass per frame, no matter how many triggers landed.
/// - At least one pass after any trigger, once a frame arrives.
/// - A pass reads camera, canvas rect, dataset and region at execution time,
///   so the published set never lags the inputs (last-write-wins).
/// - Interaction-end always yields one final authoritative pass.
pub struct VisibilityEngine<B: RenderBridge> {
    bridge: B,
    points: Vec<EventPoint>,
    region: SelectorRegion,
    coalescer: FrameCoalescer,
    interaction: InteractionState,
    visible_subs: Subscribers<VisibleSet>,
    interaction_subs: Subscribers<InteractionState>,
}

impl<B: RenderBridge> VisibilityEngine<B> {
    pub fn new(bridge: B, region: SelectorRegion) -> Self {
        Self {
            bridge,
            points: Vec::new(),
            region,
            coalescer: FrameCoalescer::new(),
            interaction: InteractionState::Idle,
            visible_subs: Subscribers::new(),
            interaction_subs: Subscribers::new(),
        }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Mutable access for hosts that drive the bridge directly (tests,
    /// headless replays).
    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    pub fn region(&self) -> SelectorRegion {
        self.region
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction
    }

    pub fn dataset(&self) -> &[EventPoint] {
        &self.points
    }

    /// Replaces the dataset snapshot wholesale and requests a pass.
    pub fn set_dataset(&mut self, points: Vec<EventPoint>) {
        self.points = points;
        self.trigger(Trigger::DatasetReplaced);
    }

    pub fn set_region(&mut self, region: SelectorRegion) {
        self.region = region;
        self.trigger(Trigger::ViewportResized);
    }

    /// Feeds one trigger into the scheduler.
    ///
    /// Every trigger qualifies for a pass; interaction triggers additionally
    /// advance the indicator. The pass itself runs in [`Self::on_frame`].
    pub fn trigger(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::InteractionStart => {
                self.advance_interaction(self.interaction.on_interaction_start());
            }
            Trigger::InteractionEnd => {
                self.advance_interaction(self.interaction.on_interaction_end());
            }
            _ => {}
        }

        if self.coalescer.request() {
            trace!(?trigger, "recompute pass scheduled");
        }
    }

    /// Frame callback; the host calls this once per animation frame.
    ///
    /// Runs at most one filter pass, reading every input at execution time.
    pub fn on_frame(&mut self, frame: Frame) -> PassOutcome {
        if !self.coalescer.take() {
            return PassOutcome::NotDue;
        }

        let Some(camera) = self.bridge.camera() else {
            debug!(frame = frame.index, "pass skipped: renderer camera not ready");
            return PassOutcome::SkippedNotReady;
        };
        let Some(rect) = self.bridge.canvas_rect() else {
            debug!(frame = frame.index, "pass skipped: canvas rect unavailable");
            return PassOutcome::SkippedNotReady;
        };

        let set = filter_visible(
            &self.bridge,
            &camera,
            &self.region,
            rect.center(),
            &self.points,
        );
        let count = set.len();
        trace!(frame = frame.index, count, "visible set published");
        self.visible_subs.notify(&set);

        // Any pass running while settling is, by construction, computed
        // after the interaction ended.
        self.advance_interaction(self.interaction.on_pass_published());

        PassOutcome::Published { count }
    }

    pub fn subscribe_visible_set(
        &mut self,
        listener: impl FnMut(&VisibleSet) + 'static,
    ) -> SubscriptionId {
        self.visible_subs.subscribe(listener)
    }

    pub fn unsubscribe_visible_set(&mut self, id: SubscriptionId) -> bool {
        self.visible_subs.unsubscribe(id)
    }

    pub fn subscribe_interaction(
        &mut self,
        listener: impl FnMut(&InteractionState) + 'static,
    ) -> SubscriptionId {
        self.interaction_subs.subscribe(listener)
    }

    pub fn unsubscribe_interaction(&mut self, id: SubscriptionId) -> bool {
        self.interaction_subs.unsubscribe(id)
    }

    /// Drops every registered listener.
    ///
    /// The engine owns its registries, so teardown cannot leak listeners.
    pub fn teardown(&mut self) {
        self.visible_subs.clear();
        self.interaction_subs.clear();
    }

    fn advance_interaction(&mut self, next: InteractionState) {
        if next == self.interaction {
            return;
        }
        self.interaction = next;
        self.interaction_subs.notify(&next);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use runtime::frame::Frame;

    use super::{PassOutcome, Trigger, VisibilityEngine};
    use crate::filter::VisibleSet;
    use crate::indicator::InteractionState;
    use crate::point::{EventId, EventPoint};
    use crate::region::SelectorRegion;
    use crate::synthetic::SyntheticBridge;

    fn engine_at(lat: f64, lon: f64) -> VisibilityEngine<SyntheticBridge> {
        VisibilityEngine::new(
            SyntheticBridge::looking_at(lat, lon),
            SelectorRegion::with_dampening(35.0, 0.85),
        )
    }

    fn two_point_dataset() -> Vec<EventPoint> {
        vec![
            EventPoint::new(EventId(1), 20.0, -30.0),
            EventPoint::new(EventId(2), -20.0, 150.0),
        ]
    }

    #[test]
    fn burst_of_camera_triggers_runs_one_pass() {
        let mut engine = engine_at(20.0, -30.0);
        engine.set_dataset(two_point_dataset());

        let passes = Rc::new(RefCell::new(0usize));
        let counter = Rc::clone(&passes);
        engine.subscribe_visible_set(move |_| *counter.borrow_mut() += 1);

        for _ in 0..10 {
            engine.trigger(Trigger::CameraChanged);
        }

        let frame = Frame::at_default_rate(0);
        assert!(matches!(
            engine.on_frame(frame),
            PassOutcome::Published { count: 1 }
        ));
        assert_eq!(*passes.borrow(), 1);

        // Nothing pending until the next trigger.
        assert_eq!(engine.on_frame(frame.next()), PassOutcome::NotDue);
        assert_eq!(*passes.borrow(), 1);
    }

    #[test]
    fn published_set_matches_end_to_end_scenario() {
        let mut engine = engine_at(20.0, -30.0);
        engine.set_dataset(two_point_dataset());

        let seen: Rc<RefCell<Option<VisibleSet>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        engine.subscribe_visible_set(move |set| *sink.borrow_mut() = Some(set.clone()));

        engine.on_frame(Frame::at_default_rate(0));
        let set = seen.borrow().clone().expect("a set was published");
        assert!(set.contains(EventId(1)));
        assert!(!set.contains(EventId(2)));
    }

    #[test]
    fn drag_end_pass_reads_camera_at_frame_time() {
        let mut engine = engine_at(20.0, -30.0);
        engine.set_dataset(two_point_dataset());
        engine.on_frame(Frame::at_default_rate(0));

        engine.trigger(Trigger::InteractionStart);
        engine.trigger(Trigger::InteractionEnd);
        // Camera keeps moving after the release but before the frame fires;
        // the published set must reflect the post-move camera.
        engine.bridge_mut().set_camera(-20.0, 150.0);

        let seen: Rc<RefCell<Option<VisibleSet>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        engine.subscribe_visible_set(move |set| *sink.borrow_mut() = Some(set.clone()));

        engine.on_frame(Frame::at_default_rate(1));
        let set = seen.borrow().clone().expect("a set was published");
        assert!(set.contains(EventId(2)));
        assert!(!set.contains(EventId(1)));
    }

    #[test]
    fn interaction_end_without_further_triggers_still_passes() {
        let mut engine = engine_at(0.0, 0.0);
        engine.set_dataset(vec![EventPoint::new(EventId(9), 0.0, 0.0)]);
        engine.on_frame(Frame::at_default_rate(0));

        engine.trigger(Trigger::InteractionStart);
        engine.on_frame(Frame::at_default_rate(1));
        engine.trigger(Trigger::InteractionEnd);

        assert!(matches!(
            engine.on_frame(Frame::at_default_rate(2)),
            PassOutcome::Published { count: 1 }
        ));
    }

    #[test]
    fn indicator_settles_only_after_a_post_end_pass() {
        let mut engine = engine_at(0.0, 0.0);

        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        engine.subscribe_interaction(move |s| sink.borrow_mut().push(*s));

        engine.trigger(Trigger::InteractionStart);
        assert_eq!(engine.interaction_state(), InteractionState::Dragging);

        // Publishes during the drag do not settle the indicator.
        engine.on_frame(Frame::at_default_rate(0));
        assert_eq!(engine.interaction_state(), InteractionState::Dragging);

        engine.trigger(Trigger::InteractionEnd);
        assert_eq!(engine.interaction_state(), InteractionState::Settling);

        engine.on_frame(Frame::at_default_rate(1));
        assert_eq!(engine.interaction_state(), InteractionState::Idle);

        assert_eq!(
            *states.borrow(),
            vec![
                InteractionState::Dragging,
                InteractionState::Settling,
                InteractionState::Idle
            ]
        );
    }

    #[test]
    fn not_ready_renderer_skips_silently_and_retries() {
        let mut engine = VisibilityEngine::new(
            SyntheticBridge::not_ready(),
            SelectorRegion::default(),
        );
        engine.set_dataset(vec![EventPoint::new(EventId(1), 0.0, 0.0)]);

        assert_eq!(
            engine.on_frame(Frame::at_default_rate(0)),
            PassOutcome::SkippedNotReady
        );
        // The flag was consumed; a skipped pass waits for the next trigger.
        assert_eq!(engine.on_frame(Frame::at_default_rate(1)), PassOutcome::NotDue);

        engine.bridge_mut().make_ready();
        engine.trigger(Trigger::RendererReady);
        assert!(matches!(
            engine.on_frame(Frame::at_default_rate(2)),
            PassOutcome::Published { count: 1 }
        ));
    }

    #[test]
    fn empty_dataset_publishes_an_empty_set() {
        let mut engine = engine_at(0.0, 0.0);
        engine.trigger(Trigger::CameraChanged);

        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        engine.subscribe_visible_set(move |set: &VisibleSet| *sink.borrow_mut() = Some(set.len()));

        assert!(matches!(
            engine.on_frame(Frame::at_default_rate(0)),
            PassOutcome::Published { count: 0 }
        ));
        assert_eq!(*seen.borrow(), Some(0));
    }

    #[test]
    fn resize_and_dataset_replace_request_passes() {
        let mut engine = engine_at(0.0, 0.0);
        engine.set_region(SelectorRegion::with_dampening(50.0, 0.85));
        assert!(matches!(
            engine.on_frame(Frame::at_default_rate(0)),
            PassOutcome::Published { .. }
        ));

        engine.set_dataset(vec![EventPoint::new(EventId(3), 0.0, 0.0)]);
        assert!(matches!(
            engine.on_frame(Frame::at_default_rate(1)),
            PassOutcome::Published { count: 1 }
        ));
    }

    #[test]
    fn teardown_drops_listeners() {
        let mut engine = engine_at(0.0, 0.0);
        let hits = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&hits);
        engine.subscribe_visible_set(move |_| *sink.borrow_mut() += 1);

        engine.teardown();
        engine.trigger(Trigger::CameraChanged);
        engine.on_frame(Frame::at_default_rate(0));
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn control_event_names_map_to_triggers() {
        assert_eq!(
            Trigger::from_control_event("start"),
            Some(Trigger::InteractionStart)
        );
        assert_eq!(
            Trigger::from_control_event("end"),
            Some(Trigger::InteractionEnd)
        );
        assert_eq!(
            Trigger::from_control_event("change"),
            Some(Trigger::CameraChanged)
        );
        assert_eq!(Trigger::from_control_event("wheel"), None);
    }
}
