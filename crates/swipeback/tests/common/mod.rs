//! Minimal navigation stack host shared by the integration tests.
//!
//! Owns the stack, a [`Scene`] and the controller, and plays the container's
//! part of the [`TransitionProvider`] protocol for push and pop.

#![allow(dead_code)]

use std::time::Duration;

use swipeback::{
    Container, Direction, GestureSample, InteractiveTransitionController, NavCommand, Operation,
    Rect, Scene, ScreenId, SessionId, SwipeConfig, TransitionCompletion, TransitionProvider,
    TransitionRequest,
};

pub const WIDTH: f64 = 320.0;
pub const HEIGHT: f64 = 480.0;
pub const FRAME: Duration = Duration::from_millis(16);

pub fn full_frame() -> Rect {
    Rect::from_size(WIDTH, HEIGHT)
}

pub struct NavStack {
    pub stack: Vec<ScreenId>,
    pub scene: Scene,
    pub ctl: InteractiveTransitionController,
    next_id: u64,
}

impl NavStack {
    /// A stack holding only a mounted root screen.
    pub fn new() -> Self {
        Self::with_config(SwipeConfig::default())
    }

    pub fn with_config(config: SwipeConfig) -> Self {
        let mut nav = Self {
            stack: Vec::new(),
            scene: Scene::new(),
            ctl: InteractiveTransitionController::new(config),
            next_id: 0,
        };
        let root = nav.new_screen();
        nav.scene.add(root);
        nav.stack.push(root);
        nav.ctl.screen_will_show(root, true);
        nav
    }

    pub fn new_screen(&mut self) -> ScreenId {
        let id = ScreenId(self.next_id);
        self.next_id += 1;
        self.scene.register(id, full_frame());
        id
    }

    pub fn root(&self) -> ScreenId {
        self.stack[0]
    }

    pub fn top(&self) -> ScreenId {
        self.stack[self.stack.len() - 1]
    }

    /// Push a fresh screen with the timed transition.
    pub fn push(&mut self) -> (ScreenId, Option<SessionId>) {
        let from = self.top();
        let to = self.new_screen();
        self.stack.push(to);
        self.ctl.screen_will_show(to, false);
        self.ctl.animator_for(Operation::Push, from, to);
        let driver = self.ctl.interactive_driver_for();
        let request = TransitionRequest::for_operation(Operation::Push, from, to, full_frame());
        let session = self.ctl.animate_transition(request, driver, &mut self.scene);
        (to, session)
    }

    /// Push and run the timed transition to completion.
    pub fn push_settled(&mut self) -> ScreenId {
        let (to, session) = self.push();
        assert!(session.is_some(), "push rejected");
        let done = self.settle();
        assert!(done.completed);
        to
    }

    /// Pop the top screen, timed unless a gesture is driving.
    pub fn pop(&mut self) -> Option<SessionId> {
        if self.stack.len() < 2 {
            return None;
        }
        let from = self.stack.pop()?;
        let to = self.top();
        self.ctl.screen_will_show(to, self.stack.len() == 1);
        self.ctl.animator_for(Operation::Pop, from, to);
        let driver = self.ctl.interactive_driver_for();
        let request = TransitionRequest::for_operation(Operation::Pop, from, to, full_frame());
        let session = self.ctl.animate_transition(request, driver, &mut self.scene);
        if session.is_none() {
            self.stack.push(from);
        }
        session
    }

    /// Deliver a sample to the top screen's recognizer.
    pub fn gesture(&mut self, sample: GestureSample) -> Option<NavCommand> {
        let target = self.top();
        self.gesture_on(target, sample)
    }

    pub fn gesture_on(&mut self, target: ScreenId, sample: GestureSample) -> Option<NavCommand> {
        let command = self.ctl.handle_gesture(Some(target), &sample, &mut self.scene);
        if command == Some(NavCommand::Pop) {
            self.pop();
        }
        command
    }

    pub fn tick(&mut self, dt: Duration) -> Option<TransitionCompletion> {
        let done = self.ctl.tick(dt, &mut self.scene)?;
        if done.request.direction == Direction::Reverse {
            if done.completed {
                self.ctl.screen_did_leave(done.request.from);
            } else {
                self.stack.push(done.request.from);
            }
        }
        Some(done)
    }

    /// Tick until the running transition finishes.
    pub fn settle(&mut self) -> TransitionCompletion {
        for _ in 0..200 {
            if let Some(done) = self.tick(FRAME) {
                return done;
            }
        }
        panic!("transition never settled");
    }

    pub fn x_of(&self, screen: ScreenId) -> f64 {
        self.scene.frame(screen).map_or(f64::NAN, |f| f.x)
    }
}
