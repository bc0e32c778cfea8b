use bevy::prelude::*;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::motion::PlayerInput;

// ===== Demo sequencer config =====
const CASE_DUR: f32 = 1.5; // seconds per case
const TAP_DUR: f32 = 0.15; // long enough for a grounded frame to see the jump

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunMode {
    Interactive,
    Demo,
    Random,
}

impl RunMode {
    /// Last recognised flag wins; unknown arguments are ignored.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mode = RunMode::Interactive;
        for a in args {
            match a.as_ref() {
                "--demo" => mode = RunMode::Demo,
                "--random" => mode = RunMode::Random,
                _ => {}
            }
        }
        mode
    }
}

/// Flags to hold for `dur` seconds.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct InputCase {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub dur: f32,
}

impl InputCase {
    const fn new(move_left: bool, move_right: bool, jump: bool, dur: f32) -> Self {
        Self {
            move_left,
            move_right,
            jump,
            dur,
        }
    }

    fn apply(&self, input: &mut PlayerInput) {
        input.move_left = self.move_left;
        input.move_right = self.move_right;
        input.jump_requested = self.jump;
    }
}

#[derive(Resource)]
pub struct DemoSeq {
    cases: Vec<InputCase>,
    i: usize,
    left: f32,
}

impl Default for DemoSeq {
    fn default() -> Self {
        let cases = vec![
            // walk right, stop, hop in place
            InputCase::new(false, true, false, CASE_DUR),
            InputCase::new(false, false, false, CASE_DUR),
            InputCase::new(false, false, true, TAP_DUR),
            InputCase::new(false, false, false, CASE_DUR),
            // running jump to the right
            InputCase::new(false, true, true, TAP_DUR),
            InputCase::new(false, true, false, CASE_DUR),
            // walk left into the wall and keep pushing
            InputCase::new(true, false, false, CASE_DUR * 4.0),
            // both directions held: stand still facing right
            InputCase::new(true, true, false, CASE_DUR),
            // hold jump: bounces every time it lands
            InputCase::new(false, false, true, CASE_DUR * 2.0),
            // running jump to the left
            InputCase::new(true, false, true, TAP_DUR),
            InputCase::new(true, false, false, CASE_DUR),
        ];
        let left = cases[0].dur;
        Self { cases, i: 0, left }
    }
}

impl DemoSeq {
    pub fn current(&self) -> InputCase {
        self.cases[self.i]
    }

    /// Count down the current case; on expiry move to the next one (wrapping) and return it.
    pub fn tick(&mut self, dt: f32) -> Option<InputCase> {
        self.left -= dt;
        if self.left > 0.0 {
            return None;
        }
        self.i = (self.i + 1) % self.cases.len();
        let case = self.cases[self.i];
        self.left = case.dur;
        Some(case)
    }
}

// Simple xorshift RNG (no external crates)
#[derive(Resource)]
pub struct TinyRng(u32);

impl TinyRng {
    pub fn seeded() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(1))
            .subsec_nanos()
            ^ 0xA3C59AC3;
        Self::from_seed(seed)
    }
    pub fn from_seed(seed: u32) -> Self {
        // xorshift is stuck at zero forever
        Self(if seed == 0 { 0xA3C59AC3 } else { seed })
    }
    fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
    fn f32(&mut self) -> f32 {
        (self.next_u32() as f32) / (u32::MAX as f32)
    }
    fn range_f32(&mut self, a: f32, b: f32) -> f32 {
        a + (b - a) * self.f32()
    }
    fn chance(&mut self, p: f32) -> bool {
        self.f32() < p
    }
}

#[derive(Resource)]
pub struct RandomCtrl {
    left: f32,
}

impl Default for RandomCtrl {
    fn default() -> Self {
        Self { left: 0.6 }
    }
}

/// Roll a new case. Jumps are short taps so the latched flag gets released again.
fn pick_random_case(rng: &mut TinyRng) -> InputCase {
    let (move_left, move_right) = match rng.next_u32() % 4 {
        0 => (true, false),
        1 => (false, true),
        2 => (true, true),
        _ => (false, false),
    };
    let jump = rng.chance(0.35);
    let dur = if jump {
        TAP_DUR
    } else {
        rng.range_f32(0.5, 2.5)
    };
    InputCase::new(move_left, move_right, jump, dur)
}

// ----------------- DEMO MODE DRIVER -----------------
pub fn demo_driver(time: Res<Time>, mut seq: ResMut<DemoSeq>, mut input: ResMut<PlayerInput>) {
    if let Some(case) = seq.tick(time.delta_seconds()) {
        debug!(?case, "demo: next input case");
    }
    seq.current().apply(&mut input);
}

// ----------------- RANDOM MODE DRIVER -----------------
pub fn random_driver(
    time: Res<Time>,
    mut rnd: ResMut<TinyRng>,
    mut ctrl: ResMut<RandomCtrl>,
    mut input: ResMut<PlayerInput>,
) {
    ctrl.left -= time.delta_seconds();
    if ctrl.left > 0.0 {
        return;
    }
    let case = pick_random_case(&mut rnd);
    ctrl.left = case.dur;
    case.apply(&mut input);
    debug!(?case, "random: next input case");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_mode_from_flags() {
        assert_eq!(RunMode::from_args(["hopper"]), RunMode::Interactive);
        assert_eq!(RunMode::from_args(["hopper", "--demo"]), RunMode::Demo);
        assert_eq!(RunMode::from_args(["hopper", "--random"]), RunMode::Random);
        assert_eq!(
            RunMode::from_args(["hopper", "--verbose", "--demo", "--random"]),
            RunMode::Random
        );
        assert_eq!(
            RunMode::from_args(Vec::<String>::new()),
            RunMode::Interactive
        );
    }

    #[test]
    fn demo_holds_case_until_expiry() {
        let mut seq = DemoSeq::default();
        let first = seq.current();
        assert_eq!(seq.tick(first.dur * 0.5), None);
        assert_eq!(seq.current(), first);

        let next = seq.tick(first.dur);
        assert_eq!(next, Some(seq.cases[1]));
        assert_eq!(seq.current(), seq.cases[1]);
    }

    #[test]
    fn demo_wraps_around() {
        let mut seq = DemoSeq::default();
        let n = seq.cases.len();
        for _ in 0..n {
            let d = seq.current().dur;
            assert!(seq.tick(d + 0.01).is_some());
        }
        assert_eq!(seq.i, 0);
    }

    #[test]
    fn demo_case_writes_all_flags() {
        let mut input = PlayerInput {
            move_left: true,
            move_right: true,
            jump_requested: true,
        };
        InputCase::new(false, true, false, 1.0).apply(&mut input);
        assert_eq!(
            input,
            PlayerInput {
                move_left: false,
                move_right: true,
                jump_requested: false,
            }
        );
    }

    #[test]
    fn rng_is_deterministic_per_seed() {
        let mut a = TinyRng::from_seed(1234);
        let mut b = TinyRng::from_seed(1234);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_still_produces_values() {
        let mut r = TinyRng::from_seed(0);
        assert_ne!(r.next_u32(), 0);
    }

    #[test]
    fn random_ranges_stay_in_bounds() {
        let mut r = TinyRng::from_seed(42);
        for _ in 0..1000 {
            let v = r.range_f32(0.5, 2.5);
            assert!((0.5..=2.5).contains(&v));
        }
    }

    #[test]
    fn random_jumps_are_taps() {
        let mut r = TinyRng::from_seed(7);
        for _ in 0..500 {
            let c = pick_random_case(&mut r);
            if c.jump {
                assert_eq!(c.dur, TAP_DUR);
            } else {
                assert!(c.dur >= 0.5 && c.dur <= 2.5);
            }
        }
    }
}
