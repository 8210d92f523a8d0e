//! Per-frame animation state.

/// A scalar bouncing linearly between two bounds: a triangle wave.
///
/// Used for the red channel of the cube's tint colour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorOscillator {
    value: f32,
    step: f32,
    min: f32,
    max: f32,
}

impl ColorOscillator {
    /// Starts at `min`, moving up by `step` per frame.
    pub fn new(step: f32, min: f32, max: f32) -> Self {
        Self::starting_at(min, step, min, max)
    }

    pub fn starting_at(value: f32, step: f32, min: f32, max: f32) -> Self {
        Self {
            value: value.clamp(min, max),
            step,
            min,
            max,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Move one step. The direction flips only when the step would leave the
    /// bounds; landing exactly on a bound keeps the direction.
    pub fn advance(&mut self) -> f32 {
        let next = self.value + self.step;
        if next > self.max || next < self.min {
            self.step = -self.step;
        }
        self.value = (self.value + self.step).clamp(self.min, self.max);
        self.value
    }
}

impl Default for ColorOscillator {
    fn default() -> Self {
        Self::new(0.05, 0.0, 1.0)
    }
}
