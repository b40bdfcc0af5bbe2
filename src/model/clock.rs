use std::time::{Duration, Instant};

pub struct Clock {
    start: Instant,
    last_update: Instant,
    current_delta: Duration,
    max_delta: Option<Duration>,
    frame: usize,
    pub fps_text: String,
    pub cpu_time_text: String,
}

impl Clock {
    const STATS_INTERVAL: usize = 20;

    pub fn new(max_delta_sec: Option<f32>) -> Self {
        Self::starting_at(Instant::now(), max_delta_sec)
    }

    pub fn starting_at(start: Instant, max_delta_sec: Option<f32>) -> Self {
        Self {
            start,
            last_update: start,
            current_delta: Duration::ZERO,
            max_delta: max_delta_sec.map(Duration::from_secs_f32),
            frame: 0,
            fps_text: "".to_string(),
            cpu_time_text: "".to_string(),
        }
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Advances one frame to `now`. Gaps longer than the max delta
    /// (debugger pauses, minimized windows) are capped.
    pub fn update_at(&mut self, now: Instant) {
        let delta = now.saturating_duration_since(self.last_update);

        self.current_delta = match self.max_delta {
            Some(max_delta) => delta.min(max_delta),
            None => delta,
        };
        self.last_update = now;
        self.frame += 1;

        if self.frame % Self::STATS_INTERVAL == 0 {
            let delta_sec = self.delta_sec();

            self.cpu_time_text = format!("Frame ms: {:.2}", delta_sec * 1000.);
            self.fps_text = format!("FPS: {:.0}", 1. / delta_sec.max(f32::EPSILON));
        }
    }

    pub fn delta(&self) -> Duration {
        self.current_delta
    }

    pub fn delta_sec(&self) -> f32 {
        self.current_delta.as_secs_f32()
    }

    pub fn elapsed_sec(&self) -> f32 {
        self.last_update.duration_since(self.start).as_secs_f32()
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// True on the frames where the stats texts were refreshed.
    pub fn stats_refreshed(&self) -> bool {
        self.frame > 0 && self.frame % Self::STATS_INTERVAL == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn delta_is_time_between_frames() {
        let t0 = Instant::now();
        let mut clock = Clock::starting_at(t0, None);

        let t1 = t0 + Duration::from_millis(16);
        let t2 = t1 + Duration::from_millis(33);

        clock.update_at(t1);
        clock.update_at(t2);

        assert!(close(clock.delta_sec(), 33. / 1000.));
        assert_eq!(clock.frame(), 2);
        assert!(close(clock.elapsed_sec(), 49. / 1000.));
    }

    #[test]
    fn long_stall_is_clamped() {
        let t0 = Instant::now();
        let mut clock = Clock::starting_at(t0, Some(0.1));

        clock.update_at(t0 + Duration::from_secs(5));

        assert!(close(clock.delta_sec(), 0.1));
    }

    #[test]
    fn stall_passes_through_without_clamp() {
        let t0 = Instant::now();
        let mut clock = Clock::starting_at(t0, None);

        clock.update_at(t0 + Duration::from_secs(5));

        assert!(close(clock.delta_sec(), 5.));
    }

    #[test]
    fn stats_refresh_every_twenty_frames() {
        let t0 = Instant::now();
        let mut clock = Clock::starting_at(t0, None);

        for i in 1..=20 {
            clock.update_at(t0 + Duration::from_millis(10 * i));
        }

        assert!(clock.stats_refreshed());
        assert_eq!(clock.fps_text, "FPS: 100");
        assert_eq!(clock.cpu_time_text, "Frame ms: 10.00");
    }
}
