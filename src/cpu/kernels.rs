use std::f32::consts::PI;

/// `(h - r)^2` normalized over the 2d disc of radius `h`. Zero from `h` on.
#[inline]
pub fn smoothing_kernel(dst: f32, radius: f32) -> f32 {
    if dst >= radius {
        return 0.;
    }

    let volume = PI * radius.powi(4) / 6.;
    (radius - dst).powi(2) / volume
}

/// Repulsion magnitude per unit strength, `(1 - r/h)^2` inside the radius.
#[inline]
pub fn repulsion_falloff(dst: f32, radius: f32) -> f32 {
    if dst <= 0. || dst >= radius {
        return 0.;
    }

    let falloff = 1. - dst / radius;
    falloff * falloff
}

/// Maps a summed density to `[0, 1)` for the background colour ramp.
#[inline]
pub fn density_intensity(density: f32, radius: f32) -> f32 {
    1. - (-density * PI * radius * radius / 6.).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_vanishes_at_radius() {
        assert_eq!(smoothing_kernel(100., 100.), 0.);
        assert_eq!(smoothing_kernel(150., 100.), 0.);
        assert!(smoothing_kernel(99., 100.) > 0.);
    }

    #[test]
    fn kernel_peaks_at_center() {
        let h = 100.;
        let peak = smoothing_kernel(0., h);

        assert!((peak * PI * h * h / 6. - 1.).abs() < 1e-5);
        assert!(smoothing_kernel(10., h) < peak);
    }

    #[test]
    fn falloff_ignores_coincident_particles() {
        assert_eq!(repulsion_falloff(0., 100.), 0.);
        assert_eq!(repulsion_falloff(50., 100.), 0.25);
    }

    #[test]
    fn intensity_saturates() {
        assert_eq!(density_intensity(0., 100.), 0.);
        assert!(density_intensity(1., 100.) > 0.99);
    }
}
