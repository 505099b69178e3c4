use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const SHORT: Duration = Duration::from_millis(200);
const LONG: Duration = Duration::from_millis(600);
const FLASH_GAP: Duration = Duration::from_millis(150);
const LETTER_GAP: Duration = Duration::from_millis(400);

/// Anything that can be switched on and off: a camera torch, a status LED,
/// a console line.
pub trait Torch: Send + Sync {
    fn set(&self, on: bool);
}

/// A torch that does nothing, for front ends without one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTorch;

impl Torch for NoTorch {
    fn set(&self, _on: bool) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub on: bool,
    pub duration: Duration,
}

fn letter(flash: Duration, pulses: &mut Vec<Pulse>) {
    for _ in 0..3 {
        pulses.push(Pulse {
            on: true,
            duration: flash,
        });
        pulses.push(Pulse {
            on: false,
            duration: FLASH_GAP,
        });
    }
}

/// S, O, S in Morse.
pub fn sos_pattern() -> Vec<Pulse> {
    let mut pulses = Vec::with_capacity(20);
    letter(SHORT, &mut pulses);
    pulses.push(Pulse {
        on: false,
        duration: LETTER_GAP,
    });
    letter(LONG, &mut pulses);
    pulses.push(Pulse {
        on: false,
        duration: LETTER_GAP,
    });
    letter(SHORT, &mut pulses);
    pulses
}

/// Plays the pattern on `torch`, waiting with `sleep` between pulses. The
/// torch always ends off.
pub fn run_sos(torch: &dyn Torch, sleep: impl Fn(Duration)) {
    for pulse in sos_pattern() {
        torch.set(pulse.on);
        sleep(pulse.duration);
    }
    torch.set(false);
}

/// Fire-and-forget blink sequence on its own thread.
pub fn spawn_sos(torch: Arc<dyn Torch>) -> JoinHandle<()> {
    thread::spawn(move || {
        tracing::info!("SOS flashlight sequence started");
        run_sos(torch.as_ref(), thread::sleep);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTorch(Mutex<Vec<bool>>);

    impl Torch for RecordingTorch {
        fn set(&self, on: bool) {
            self.0.lock().unwrap().push(on);
        }
    }

    #[test]
    fn pattern_is_three_short_three_long_three_short() {
        let flashes: Vec<Duration> = sos_pattern()
            .into_iter()
            .filter(|p| p.on)
            .map(|p| p.duration)
            .collect();
        assert_eq!(
            flashes,
            vec![SHORT, SHORT, SHORT, LONG, LONG, LONG, SHORT, SHORT, SHORT]
        );
        let total: Duration = sos_pattern().iter().map(|p| p.duration).sum();
        assert_eq!(total, Duration::from_millis(6 * 200 + 3 * 600 + 9 * 150 + 2 * 400));
    }

    #[test]
    fn run_ends_with_torch_off() {
        let torch = RecordingTorch::default();
        let slept = Mutex::new(Duration::ZERO);
        run_sos(&torch, |d| *slept.lock().unwrap() += d);
        let states = torch.0.lock().unwrap();
        assert_eq!(states.iter().filter(|on| **on).count(), 9);
        assert_eq!(states.last(), Some(&false));
        assert!(*slept.lock().unwrap() > Duration::from_secs(5));
    }

    #[test]
    fn spawned_sequence_finishes() {
        let torch = Arc::new(RecordingTorch::default());
        spawn_sos(torch.clone()).join().unwrap();
        assert_eq!(torch.0.lock().unwrap().last(), Some(&false));
    }
}
