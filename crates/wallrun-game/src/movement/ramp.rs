//! Linear speed ramps.
//!
//! A ramp is a scalar that moves toward a bound at a fixed rate while it is
//! armed. The owner arms it when the driving condition starts and cancels or
//! resets it when the condition ends, so no increment ever leaks from one
//! run into the next.

/// Direction a ramp travels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampKind {
    /// Rises toward the bound
    Accelerate,
    /// Falls toward the bound
    Decelerate,
}

#[derive(Debug, Clone)]
pub struct SpeedRamp {
    kind: RampKind,
    /// Value restored by `reset`
    rest: f32,
    bound: f32,
    /// Units per second
    rate: f32,
    value: f32,
    armed: bool,
}

impl SpeedRamp {
    /// Ramp that rises from `min` to `max`
    pub fn accelerating(min: f32, max: f32, rate: f32) -> Self {
        Self {
            kind: RampKind::Accelerate,
            rest: min,
            bound: max,
            rate: rate.max(0.0),
            value: min,
            armed: false,
        }
    }

    /// Ramp that falls to `floor` from wherever it is restarted
    pub fn decelerating(floor: f32, rate: f32) -> Self {
        Self {
            kind: RampKind::Decelerate,
            rest: floor,
            bound: floor,
            rate: rate.max(0.0),
            value: floor,
            armed: false,
        }
    }

    pub fn kind(&self) -> RampKind {
        self.kind
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn bound(&self) -> f32 {
        self.bound
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Whether the value has reached (or passed) the bound
    pub fn reached(&self) -> bool {
        match self.kind {
            RampKind::Accelerate => self.value >= self.bound,
            RampKind::Decelerate => self.value <= self.bound,
        }
    }

    /// Arm the ramp. Arming an armed or finished ramp does nothing.
    pub fn arm(&mut self) {
        if !self.reached() {
            self.armed = true;
        }
    }

    /// Start over from `value`, armed even if already at the bound
    pub fn restart_from(&mut self, value: f32) {
        self.value = value.max(0.0);
        self.armed = true;
    }

    /// Stop advancing, keeping the current value
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    /// Return to the rest value and stop advancing
    pub fn reset(&mut self) {
        self.value = self.rest;
        self.armed = false;
    }

    /// Advance one tick. Returns true on the tick the bound is reached.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.armed {
            return false;
        }

        if !self.reached() {
            let step = self.rate * dt.max(0.0);
            self.value = match self.kind {
                RampKind::Accelerate => (self.value + step).min(self.bound),
                RampKind::Decelerate => (self.value - step).max(self.bound),
            };
        }

        if self.reached() {
            self.armed = false;
            return true;
        }
        false
    }
}
