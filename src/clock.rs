/// Cross-platform stopwatch that accumulates elapsed milliseconds over
/// start/stop cycles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    #[cfg(not(target_arch = "wasm32"))]
    started: Option<std::time::Instant>,
    #[cfg(target_arch = "wasm32")]
    started: Option<f64>,
    total_ms: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// # Panics
    /// If the clock is already running.
    pub fn start(&mut self) {
        assert!(!self.is_running(), "clock is already running");
        self.started = Some(now());
    }

    /// Stop the clock and return the milliseconds since the matching start.
    ///
    /// # Panics
    /// If the clock is not running.
    pub fn stop(&mut self) -> u64 {
        let Some(started) = self.started.take() else {
            panic!("clock is not running");
        };
        let elapsed = since(started);
        self.total_ms += elapsed;
        elapsed
    }

    /// Accumulated milliseconds, including the current run if any
    pub fn milliseconds(&self) -> u64 {
        self.total_ms + self.started.map_or(0, since)
    }

    pub fn seconds(&self) -> u64 {
        self.milliseconds() / 1000
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn now() -> std::time::Instant {
    std::time::Instant::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn since(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(target_arch = "wasm32")]
fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

#[cfg(target_arch = "wasm32")]
fn since(start: f64) -> u64 {
    (now() - start).max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_stop_returns_elapsed() {
        let mut clock = Clock::new();
        clock.start();
        sleep(Duration::from_millis(30));
        let elapsed = clock.stop();
        assert!(elapsed >= 30 && elapsed < 1000, "elapsed {}", elapsed);
        assert_eq!(clock.milliseconds(), elapsed);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_cycles_accumulate() {
        let mut clock = Clock::new();
        clock.start();
        sleep(Duration::from_millis(20));
        let first = clock.stop();
        clock.start();
        sleep(Duration::from_millis(40));
        // Live reading includes the running interval
        assert!(clock.milliseconds() >= first + 40);
        let second = clock.stop();
        assert_eq!(clock.milliseconds(), first + second);
        assert!(clock.milliseconds() >= 60);
    }

    #[test]
    #[should_panic(expected = "already running")]
    fn test_double_start_panics() {
        let mut clock = Clock::new();
        clock.start();
        clock.start();
    }

    #[test]
    #[should_panic(expected = "not running")]
    fn test_stop_without_start_panics() {
        Clock::new().stop();
    }
}
