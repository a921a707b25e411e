//! Horizontal sway.

/// Amplitude of the sway wave, in overlay units.
pub const SWAY_AMPLITUDE: f64 = 1.0;

/// Angular frequency of the sway wave, per millisecond of wall clock time.
pub const SWAY_FREQUENCY: f64 = 0.005;

/// `amplitude * sin(time * frequency)`.
pub fn sine_wave(amplitude: f64, time: f64, frequency: f64) -> f64 {
    amplitude * (time * frequency).sin()
}

/// Next horizontal position of a particle at `now_ms`.
///
/// The phase is the raw wall clock, not time since start, so every layer
/// sways in lockstep and only differs by accumulated offset.
pub fn sway(x: f64, sway_rate: f64, now_ms: u64) -> f64 {
    sine_wave(SWAY_AMPLITUDE, now_ms as f64, SWAY_FREQUENCY) + (x + sway_rate)
}
