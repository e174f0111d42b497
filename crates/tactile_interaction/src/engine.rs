//! Session arena and frame driver
//!
//! All interaction sessions live in a slotmap behind opaque [`SessionId`]
//! handles. Linked-element references are handle lookups into the arena,
//! never direct pointers, so removing a session cannot leave a dangling
//! reference in a peer — a stale handle simply contributes no coupling
//! force.
//!
//! Execution is single-threaded and frame-paced: the host calls
//! [`InteractionEngine::tick`] once per frame and keeps scheduling frames
//! while it returns `true`. Within a tick, each session reads the targets
//! its peers published on the *previous* tick, so coupling is one frame
//! behind and free of ordering dependence between sessions.

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use smallvec::SmallVec;
use thiserror::Error;
use tactile_core::events::InputEvent;
use tactile_core::geometry::{Rect, Vec3};
use tactile_physics::config::{MotionOverrides, SensitivityLevel};
use tactile_physics::field::{DirectionalField, LinkMode, LinkedContribution, SnapPoint};

use crate::session::{
    InteractionSession, LinkedElement, PhysicsState, SessionOptions, Transform,
};

new_key_type! {
    /// Opaque handle to an interaction session
    pub struct SessionId;
}

/// Errors from arena operations that address sessions explicitly
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown session handle")]
    UnknownSession,
    #[error("unknown link peer handle")]
    UnknownPeer,
    #[error("a session cannot link to itself")]
    SelfLink,
}

/// Arena of interaction sessions plus the published-target lookup for
/// linked-element coupling
pub struct InteractionEngine {
    sessions: SlotMap<SessionId, InteractionSession>,
    /// Each session's last-applied target in host coordinates. The only
    /// cross-session shared state; entries may be missing or stale and
    /// readers must tolerate both.
    published: SecondaryMap<SessionId, Vec3>,
}

impl InteractionEngine {
    pub fn new() -> Self {
        Self {
            sessions: SlotMap::with_key(),
            published: SecondaryMap::new(),
        }
    }

    /// Register an interactive element. The returned handle is the only
    /// way to address the session afterwards.
    pub fn insert(&mut self, options: SessionOptions) -> SessionId {
        let session = InteractionSession::new(options);
        let id = self.sessions.insert(session);
        let published = self.sessions[id].published_target();
        self.published.insert(id, published);
        tracing::debug!(?id, "session inserted");
        id
    }

    /// Tear a session down: drops its state and its published target.
    /// Peers holding links to it degrade to "no coupling force".
    pub fn remove(&mut self, id: SessionId) {
        if self.sessions.remove(id).is_some() {
            self.published.remove(id);
            tracing::debug!(?id, "session removed");
        }
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Route an input event to a session. Operations against a removed
    /// session are benign no-ops — detaching mid-interaction is an
    /// expected race, not an error.
    pub fn handle_event(&mut self, id: SessionId, event: &InputEvent) {
        match self.sessions.get_mut(id) {
            Some(session) => session.handle_event(event),
            None => tracing::trace!(?id, "event for detached session dropped"),
        }
    }

    /// Advance every session one frame. Returns true while any session
    /// still demands frames; the host stops scheduling when it goes false.
    pub fn tick(&mut self, dt: f32) -> bool {
        // Resolve coupling inputs from the previous tick's published targets
        let mut coupling: Vec<(SessionId, SmallVec<[LinkedContribution; 2]>)> =
            Vec::with_capacity(self.sessions.len());
        for (id, session) in self.sessions.iter() {
            let mut contributions: SmallVec<[LinkedContribution; 2]> = SmallVec::new();
            let center = session.bounds.center();
            for link in &session.links {
                // Missing entry: peer removed or never published. No force.
                let Some(peer_pos) = self.published.get(link.peer) else {
                    continue;
                };
                contributions.push(LinkedContribution {
                    offset: Vec3::new(peer_pos.x - center.x, peer_pos.y - center.y, peer_pos.z),
                    strength: link.strength,
                    mode: link.mode,
                    max_distance: link.max_distance,
                });
            }
            coupling.push((id, contributions));
        }

        let mut any_animating = false;
        for (id, contributions) in coupling {
            if let Some(session) = self.sessions.get_mut(id) {
                any_animating |= session.integrate(dt, &contributions);
            }
        }

        // Publish this tick's targets for the next one
        for (id, session) in self.sessions.iter() {
            self.published.insert(id, session.published_target());
        }

        any_animating
    }

    pub fn transform(&self, id: SessionId) -> Option<Transform> {
        self.sessions.get(id).map(|s| s.transform())
    }

    pub fn physics_state(&self, id: SessionId) -> Option<&PhysicsState> {
        self.sessions.get(id).map(|s| s.physics_state())
    }

    /// True while the session demands frames (the host's "animating" hint)
    pub fn is_animating(&self, id: SessionId) -> bool {
        self.sessions.get(id).is_some_and(|s| s.is_animating())
    }

    /// Replace a session's direct override layer and re-resolve its
    /// configuration in place
    pub fn update(&mut self, id: SessionId, overrides: MotionOverrides) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.update(overrides);
        }
    }

    pub fn reset(&mut self, id: SessionId) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.reset();
            self.published.insert(id, session.published_target());
        }
    }

    pub fn set_position(&mut self, id: SessionId, position: Vec3) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.set_position(position);
        }
    }

    pub fn set_bounds(&mut self, id: SessionId, bounds: Rect) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.set_bounds(bounds);
        }
    }

    pub fn set_disabled(&mut self, id: SessionId, disabled: bool) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.set_disabled(disabled);
        }
    }

    pub fn set_sensitivity(&mut self, id: SessionId, level: SensitivityLevel) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.set_sensitivity(level);
        }
    }

    pub fn set_reduced_motion(&mut self, id: SessionId, on: bool) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.set_reduced_motion(on);
        }
    }

    pub fn set_snap_points(&mut self, id: SessionId, points: Vec<SnapPoint>) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.set_snap_points(points);
        }
    }

    pub fn set_directional_field(&mut self, id: SessionId, field: Option<DirectionalField>) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.set_directional(field);
        }
    }

    /// Couple `id` to `peer`: the peer's published target contributes an
    /// attraction/repulsion term to `id`'s force field while within
    /// `max_distance`
    pub fn link(
        &mut self,
        id: SessionId,
        peer: SessionId,
        strength: f32,
        mode: LinkMode,
        max_distance: f32,
    ) -> Result<(), SessionError> {
        if id == peer {
            return Err(SessionError::SelfLink);
        }
        if !self.sessions.contains_key(peer) {
            return Err(SessionError::UnknownPeer);
        }
        let session = self
            .sessions
            .get_mut(id)
            .ok_or(SessionError::UnknownSession)?;
        session.links.push(LinkedElement {
            peer,
            strength,
            mode,
            max_distance,
        });
        Ok(())
    }

    /// Remove all links from `id` to `peer`
    pub fn unlink(&mut self, id: SessionId, peer: SessionId) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.links.retain(|link| link.peer != peer);
        }
    }

    /// Declared in the engine contract but not wired to the integrator.
    /// The warning is deliberate: integrators must know the guarantee is
    /// partial rather than discover a silent no-op.
    pub fn apply_force(&mut self, id: SessionId, force: Vec3) {
        tracing::warn!(
            ?id,
            ?force,
            "apply_force is not connected to the integrator; ignoring"
        );
    }

    /// See [`InteractionEngine::apply_force`]
    pub fn apply_impulse(&mut self, id: SessionId, impulse: Vec3) {
        tracing::warn!(
            ?id,
            ?impulse,
            "apply_impulse is not connected to the integrator; ignoring"
        );
    }

    /// See [`InteractionEngine::apply_force`]
    pub fn toggle_pause(&mut self, id: SessionId) {
        tracing::warn!(?id, "toggle_pause is not connected to the frame driver; ignoring");
    }
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new()
    }
}
