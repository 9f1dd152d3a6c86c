use std::time::Duration;

use bevy::prelude::*;

/// Stage of the opening camera move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraPhase {
    Intro,
    Settled,
}

impl CameraPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Settled => "settled",
        }
    }
}

/// Sent once when the camera cuts to a new phase.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CameraPhaseChanged {
    pub phase: CameraPhase,
    pub position: Vec3,
}

/// One-shot Intro → Settled schedule for the scene camera.
///
/// The pending transition is a timer owned here; cancelling drops it, and once
/// it has fired there is nothing left to fire again.
#[derive(Resource, Debug)]
pub struct CameraChoreographer {
    phase: CameraPhase,
    intro_timer: Option<Timer>,
    intro_position: Vec3,
    settled_position: Vec3,
}

impl CameraChoreographer {
    pub fn new(intro_delay: Duration, intro_position: Vec3, settled_position: Vec3) -> Self {
        Self {
            phase: CameraPhase::Intro,
            intro_timer: Some(Timer::new(intro_delay, TimerMode::Once)),
            intro_position,
            settled_position,
        }
    }

    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    /// Camera position for the current phase. There is no blending between
    /// the two shots; the camera cuts at the phase boundary.
    pub fn current_position(&self) -> Vec3 {
        match self.phase {
            CameraPhase::Intro => self.intro_position,
            CameraPhase::Settled => self.settled_position,
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.intro_timer.is_some()
    }

    /// Advance the schedule. Returns the new phase on the frame the transition
    /// happens and `None` on every other frame.
    pub fn tick(&mut self, delta: Duration) -> Option<CameraPhase> {
        let timer = self.intro_timer.as_mut()?;
        timer.tick(delta);
        if !timer.finished() {
            return None;
        }

        self.intro_timer = None;
        self.phase = CameraPhase::Settled;
        Some(self.phase)
    }

    /// Drop the pending transition. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.intro_timer.take().is_some()
    }
}

/// Ticks the choreographer with wall-clock time and announces the cut. The
/// virtual clock caps long frames, which would hold the intro past its delay
/// after a stall.
pub fn tick_camera_choreography(
    time: Res<Time<Real>>,
    choreographer: Option<ResMut<CameraChoreographer>>,
    mut phase_events: EventWriter<CameraPhaseChanged>,
) {
    let Some(mut choreographer) = choreographer else {
        return;
    };

    if let Some(phase) = choreographer.tick(time.delta()) {
        let position = choreographer.current_position();
        info!("Camera phase → {} at {:?}", phase.as_str(), position);
        phase_events.write(CameraPhaseChanged { phase, position });
    }
}
