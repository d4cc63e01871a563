use std::fmt;
use std::time::Instant;

/// Wall-clock timer around std::time::Instant. The elapsed time is reported
/// through the std::fmt::Display trait so it can be handed to the logger.
pub struct Timer {
    label: &'static str,
    time: Instant,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        Timer {
            label,
            time: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.time.elapsed().as_secs_f64()
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:>68} {:>8.2} s", self.label, self.elapsed_secs())
    }
}

#[test]
fn timer_reports_nonnegative_time() {
    let timer: Timer = Timer::start("elapsed time:");
    assert!(timer.elapsed_secs() >= 0.0);
    let line: String = format!("{}", timer);
    assert!(line.contains("elapsed time:"));
    assert!(line.ends_with(" s"));
}
