use backdrop_common::WaveConfig;

/// Height of the wave field at a horizontal position for a given phase.
///
/// `sin(x*fx + phase) * ax + cos(z*fz + phase*ratio) * az` — a closed-form
/// field, deterministic in its inputs and independent across vertices. Cheap
/// enough to evaluate for tens of thousands of vertices per frame, which is
/// why it is used instead of a noise function or a physics step.
#[inline]
pub fn wave_height(x: f32, z: f32, phase: f32, wave: &WaveConfig) -> f32 {
    (x * wave.freq_x + phase).sin() * wave.amp_x
        + (z * wave.freq_z + phase * wave.phase_ratio).cos() * wave.amp_z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_bit_identical() {
        let wave = WaveConfig::default();
        let a = wave_height(12.5, -33.0, 4.71, &wave);
        let b = wave_height(12.5, -33.0, 4.71, &wave);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn bounded_by_amplitudes() {
        let wave = WaveConfig::default();
        let bound = wave.amp_x + wave.amp_z;
        let mut phase = 0.0;
        for i in 0..500 {
            let x = (i as f32) * 0.37 - 80.0;
            let z = (i as f32) * 0.29 - 70.0;
            let h = wave_height(x, z, phase, &wave);
            assert!(h.abs() <= bound + 1e-5, "height {h} out of bound at {i}");
            phase += 0.17;
        }
    }

    #[test]
    fn zero_amplitudes_flatten() {
        let wave = WaveConfig {
            amp_x: 0.0,
            amp_z: 0.0,
            ..WaveConfig::default()
        };
        assert_eq!(wave_height(10.0, 10.0, 1.0, &wave), 0.0);
    }

    #[test]
    fn phase_moves_the_field() {
        let wave = WaveConfig::default();
        let h0 = wave_height(5.0, 5.0, 0.0, &wave);
        let h1 = wave_height(5.0, 5.0, 1.0, &wave);
        assert_ne!(h0, h1);
    }
}
