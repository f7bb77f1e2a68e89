use ggez::event::{self, EventHandler};
use ggez::graphics::{self, Color, DrawMode, DrawParam, Mesh};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::{Context, GameError, GameResult};
use hitbox_collision::Rect;

use crate::level::Level;
use crate::player::Input;
use crate::tile_grid::Tile;

const FPS: u32 = 60;

const TILE_COLOR: Color = Color::new(0.35, 0.38, 0.45, 1.0);
const PLAYER_COLOR: Color = Color::new(0.95, 0.75, 0.2, 1.0);
const GROUNDED_COLOR: Color = Color::new(0.4, 0.85, 0.4, 1.0);

fn to_screen_rect(rect: &Rect) -> graphics::Rect {
    graphics::Rect::new(rect.x(), rect.y(), rect.w(), rect.h())
}

struct MainState {
    level: Level,
    tiles: Vec<Tile>,
}

impl MainState {
    fn new(level: Level) -> GameResult<MainState> {
        let tiles = level
            .grid
            .solid_tiles()
            .map_err(|e| GameError::CustomError(e.to_string()))?;
        Ok(MainState { level, tiles })
    }

    fn held_input(ctx: &Context) -> Input {
        Input {
            left: ctx.keyboard.is_key_pressed(KeyCode::Left),
            right: ctx.keyboard.is_key_pressed(KeyCode::Right),
            jump: ctx.keyboard.is_key_pressed(KeyCode::Space)
                || ctx.keyboard.is_key_pressed(KeyCode::Up),
        }
    }
}

impl EventHandler for MainState {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        // Fixed step, same as the headless run
        while ctx.time.check_update_time(FPS) {
            let input = Self::held_input(ctx);
            self.level
                .step(input, 1.0 / FPS as f32)
                .map_err(|e| GameError::CustomError(e.to_string()))?;
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, Color::BLACK);

        for tile in &self.tiles {
            let mesh = Mesh::new_rectangle(
                ctx,
                DrawMode::fill(),
                to_screen_rect(&tile.rect),
                TILE_COLOR,
            )?;
            canvas.draw(&mesh, DrawParam::new());
        }

        let player = &self.level.player;
        let color = if player.on_ground { GROUNDED_COLOR } else { PLAYER_COLOR };
        let mesh =
            Mesh::new_rectangle(ctx, DrawMode::fill(), to_screen_rect(&player.bounds), color)?;
        canvas.draw(&mesh, DrawParam::new());

        canvas.finish(ctx)?;
        Ok(())
    }

    fn key_down_event(
        &mut self,
        ctx: &mut Context,
        input: KeyInput,
        _repeated: bool,
    ) -> GameResult {
        if input.keycode == Some(KeyCode::Escape) {
            ctx.request_quit();
        }
        Ok(())
    }
}

pub fn run_visual(level: Level) -> GameResult {
    let size = level.grid.world_size();

    let cb = ggez::ContextBuilder::new("collision_demo", "author")
        .window_setup(ggez::conf::WindowSetup::default().title("Hitbox Collision"))
        .window_mode(ggez::conf::WindowMode::default().dimensions(size.x, size.y));

    let (ctx, event_loop) = cb.build()?;
    let state = MainState::new(level)?;
    event::run(ctx, event_loop, state)
}
