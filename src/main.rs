use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized, WindowResolution};

mod driver;
mod input;
mod motion;

use driver::{DemoSeq, RandomCtrl, RunMode, TinyRng};
use motion::{Facing, Player, PlayerInput, Viewport, SPRITE_SIZE};

// ===== Window =====
const WINDOW_W: f32 = 800.0;
const WINDOW_H: f32 = 400.0;
const BACKGROUND: u8 = 220;

#[derive(Resource, Default)]
struct PlayerSprites {
    regular: Handle<Image>,
    flipped: Handle<Image>,
}

impl PlayerSprites {
    fn for_facing(&self, facing: Facing) -> &Handle<Image> {
        match facing {
            Facing::Right => &self.regular,
            Facing::Left => &self.flipped,
        }
    }
}

fn main() {
    let run_mode = RunMode::from_args(std::env::args().skip(1));

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(AssetPlugin {
                file_path: "assets".into(), // player.png / fplayer.png
                ..default()
            })
            // crisp pixels when the sprite is scaled up
            .set(ImagePlugin::default_nearest())
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "hopper".into(),
                    name: Some("hopper".into()),
                    resolution: WindowResolution::new(WINDOW_W, WINDOW_H),
                    resizable: true,
                    ..default()
                }),
                ..default()
            }),
    )
    .insert_resource(ClearColor(Color::srgb_u8(BACKGROUND, BACKGROUND, BACKGROUND)))
    .insert_resource(PlayerInput::default())
    .init_resource::<PlayerSprites>()
    .add_systems(Startup, (setup_camera, load_assets, spawn_player).chain())
    .add_systems(Update, (handle_resize, step_player, sync_sprite).chain());

    match run_mode {
        RunMode::Interactive => {
            app.add_systems(Update, input::handle_keyboard.before(step_player));
            info!("Running in INTERACTIVE mode (A/D to move, Space to jump; --demo or --random for hands-off modes).");
        }
        RunMode::Demo => {
            app.insert_resource(DemoSeq::default())
                .add_systems(Update, driver::demo_driver.before(step_player));
            info!("Running in DEMO mode (scripted input sequence).");
        }
        RunMode::Random => {
            app.insert_resource(TinyRng::seeded())
                .insert_resource(RandomCtrl::default())
                .add_systems(Update, driver::random_driver.before(step_player));
            info!("Running in RANDOM mode (random input cases).");
        }
    }

    app.run();
}

/// Camera so sprites can be drawn
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

/// Queue both facings; drawing starts once they arrive.
fn load_assets(asset_server: Res<AssetServer>, mut sprites: ResMut<PlayerSprites>) {
    sprites.regular = asset_server.load("player.png");
    sprites.flipped = asset_server.load("fplayer.png");
}

fn spawn_player(mut commands: Commands, sprites: Res<PlayerSprites>) {
    commands.spawn((
        SpriteBundle {
            texture: sprites.regular.clone(),
            sprite: Sprite {
                custom_size: Some(Vec2::splat(SPRITE_SIZE)),
                ..default()
            },
            ..default()
        },
        Player::default(),
    ));
}

fn viewport_of(win: &Window) -> Viewport {
    Viewport::new(win.width(), win.height())
}

/// Screen space (top-left origin, y down) to world space (centre origin, y up) for the sprite centre.
fn screen_to_world(pos: Vec2, vp: Viewport) -> Vec3 {
    let half = SPRITE_SIZE * 0.5;
    Vec3::new(
        pos.x + half - vp.width * 0.5,
        vp.height * 0.5 - (pos.y + half),
        0.0,
    )
}

/// Pull the player back inside the window after it shrinks.
fn handle_resize(mut events: EventReader<WindowResized>, mut q: Query<&mut Player>) {
    let Some(ev) = events.read().last() else {
        return;
    };
    let Ok(mut player) = q.get_single_mut() else {
        return;
    };
    let vp = Viewport::new(ev.width, ev.height);
    if motion::clamp_to_viewport(&mut player, vp) {
        debug!(
            width = vp.width,
            height = vp.height,
            pos = ?player.pos,
            "resize: player clamped into window"
        );
    }
}

/// Physics step for this frame.
fn step_player(
    time: Res<Time>,
    input: Res<PlayerInput>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut q: Query<&mut Player>,
) {
    let Ok(win) = windows.get_single() else {
        return;
    };
    let Ok(mut player) = q.get_single_mut() else {
        return;
    };

    let dt_ms = time.delta_seconds() * 1000.0;
    let next = motion::update(*player, &input, dt_ms, viewport_of(win));
    if input.jump_requested && next.grounded {
        debug!(x = next.pos.x, "jump");
    }
    trace!(pos = ?next.pos, vx = next.vx, vy = next.vy, grounded = next.grounded, "step");
    *player = next;
}

/// Place the sprite and pick the texture for the current facing.
fn sync_sprite(
    sprites: Res<PlayerSprites>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut q: Query<(&Player, &mut Transform, &mut Handle<Image>)>,
) {
    let Ok(win) = windows.get_single() else {
        return;
    };
    let vp = viewport_of(win);
    for (player, mut tf, mut texture) in &mut q {
        tf.translation = screen_to_world(player.pos, vp);
        let wanted = sprites.for_facing(player.facing);
        if *texture != *wanted {
            *texture = wanted.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_origin_maps_to_top_left_of_window() {
        let vp = Viewport::new(800.0, 400.0);
        let w = screen_to_world(Vec2::ZERO, vp);
        assert_eq!(w, Vec3::new(-375.0, 175.0, 0.0));
    }

    #[test]
    fn floor_position_touches_bottom_edge() {
        let vp = Viewport::new(800.0, 400.0);
        let w = screen_to_world(Vec2::new(vp.max_x(), vp.floor_y()), vp);
        assert_eq!(w.x + SPRITE_SIZE * 0.5, 400.0);
        assert_eq!(w.y - SPRITE_SIZE * 0.5, -200.0);
    }

    #[test]
    fn facing_selects_texture() {
        let sprites = PlayerSprites {
            regular: Handle::weak_from_u128(1),
            flipped: Handle::weak_from_u128(2),
        };
        assert_eq!(sprites.for_facing(Facing::Right), &sprites.regular);
        assert_eq!(sprites.for_facing(Facing::Left), &sprites.flipped);
        assert_ne!(sprites.regular, sprites.flipped);
    }
}
