use bevy::prelude::*;

// ===== Sprite & physics constants (units are logical px, per 50ms tick) =====
pub const SPRITE_SIZE: f32 = 50.0;
pub const MOVE_SPEED: f32 = 10.0;
pub const GRAVITY: f32 = 2.0; // downward (+)
pub const JUMP_VY0: f32 = -20.0; // negative = up
pub const TICK_MS: f32 = 50.0;

// Where the player lands when it is found below a shrunken floor
pub const FLOOR_FALLBACK_Y: f32 = 350.0;

pub const SPAWN_POS: Vec2 = Vec2::new(50.0, 0.0);

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    fn from_vx(vx: f32) -> Self {
        if vx < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Held/latched control flags. Written by key handlers or input drivers, read by [`update`].
#[derive(Resource, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PlayerInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_requested: bool,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Top edge of the sprite when it stands on the bottom of the screen.
    pub fn floor_y(&self) -> f32 {
        self.height - SPRITE_SIZE
    }

    pub fn max_x(&self) -> f32 {
        self.width - SPRITE_SIZE
    }
}

/// Motion state of the one and only player sprite. Top-left origin, y grows downward.
#[derive(Component, Clone, Copy, PartialEq, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub vx: f32, // px per tick
    pub vy: f32, // px per tick (positive downward)
    pub facing: Facing,
    pub grounded: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: SPAWN_POS,
            vx: 0.0,
            vy: 0.0,
            facing: Facing::Right,
            grounded: false,
        }
    }
}

/// Non-finite or negative frame times would poison every later frame; treat them as no time.
pub fn sanitize_dt(dt_ms: f32) -> f32 {
    if dt_ms.is_finite() && dt_ms > 0.0 {
        dt_ms
    } else {
        0.0
    }
}

/// One frame of motion. `dt_ms` is the elapsed time since the previous frame.
///
/// The order of the steps matters and reproduces a few quirks on purpose:
/// the left-edge snap looks at the position *before* this frame's move,
/// a rejected horizontal move keeps `vx`, and the grounded test is an exact
/// float comparison against the floor.
pub fn update(mut p: Player, input: &PlayerInput, dt_ms: f32, vp: Viewport) -> Player {
    let ticks = sanitize_dt(dt_ms) / TICK_MS;
    let floor_y = vp.floor_y();

    // Horizontal intent (both held cancel out)
    p.vx = 0.0;
    if input.move_right {
        p.vx += MOVE_SPEED;
    }
    if input.move_left {
        p.vx -= MOVE_SPEED;
    }
    p.facing = Facing::from_vx(p.vx);

    if p.pos.x < 0.0 {
        p.pos.x = 0.0;
    }

    // Below the floor: only happens after the floor moved up under us
    if p.pos.y > floor_y {
        p.pos.y = FLOOR_FALLBACK_Y;
        p.vy = 0.0;
    } else {
        p.vy += GRAVITY * ticks;
    }

    p.grounded = p.pos.y == floor_y;
    if input.jump_requested && p.grounded {
        p.vy = JUMP_VY0;
    }

    let new_x = p.pos.x + p.vx * ticks;
    let new_y = p.pos.y + p.vy * ticks;

    if new_y > floor_y {
        p.pos.y = floor_y;
        p.vy = 0.0;
    } else {
        p.pos.y = new_y;
    }

    // Out-of-range moves are dropped for this frame, vx is left alone
    if (0.0..=vp.max_x()).contains(&new_x) {
        p.pos.x = new_x;
    }

    if p.pos.y == floor_y {
        p.vy = 0.0;
    }

    p
}

/// Keep the player inside a freshly resized window.
/// Note the vertical test is against the full height, not the floor.
pub fn clamp_to_viewport(p: &mut Player, vp: Viewport) -> bool {
    let mut moved = false;
    if p.pos.x > vp.max_x() {
        p.pos.x = vp.max_x();
        moved = true;
    }
    if p.pos.y > vp.height {
        p.pos.y = vp.floor_y();
        moved = true;
    }
    moved
}
