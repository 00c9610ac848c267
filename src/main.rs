use arboard::Clipboard;
use macroquad::prelude::*;
use macroquad::window::Conf;
use spiralfill::config::Config;
use spiralfill::layout;
use spiralfill::session::{Command, Session, TickOutcome};
use spiralfill::{Cell, CellPos};

const MARGIN: f32 = 20.0;
const INFO_HEIGHT: f32 = 110.0;

/// Visualization state
struct VisState {
    session: Session,
    config: Config,
    /// Spawner is being dragged with the mouse
    dragging: bool,
    last_placement: Option<CellPos>,
    exhausted: bool,
}

impl VisState {
    fn new(config: Config) -> Self {
        let session = Session::new(&config);
        VisState {
            session,
            config,
            dragging: false,
            last_placement: None,
            exhausted: false,
        }
    }

    fn cell_size(&self) -> f32 {
        self.config.visual.cell_size
    }

    /// Screen position of the top-left corner of a cell
    fn cell_origin(&self, pos: CellPos) -> (f32, f32) {
        let height = self.session.grid().height();
        let px = MARGIN + pos.x as f32 * self.cell_size();
        let py = INFO_HEIGHT + (height - 1 - pos.y) as f32 * self.cell_size();
        (px, py)
    }

    fn screen_to_cell(&self, mouse_x: f32, mouse_y: f32) -> CellPos {
        let height = self.session.grid().height();
        let cx = ((mouse_x - MARGIN) / self.cell_size()).floor() as i32;
        let row = ((mouse_y - INFO_HEIGHT) / self.cell_size()).floor() as i32;
        CellPos::new(cx, height - 1 - row)
    }

    fn handle_input(&mut self) {
        if is_key_pressed(KeyCode::Space) {
            self.dispatch(Command::StartSpawning);
        }
        if is_key_released(KeyCode::Space) {
            self.dispatch(Command::StopSpawning);
        }
        if is_key_pressed(KeyCode::X) {
            self.dispatch(Command::ClearBoard);
        }
        if is_key_pressed(KeyCode::C) {
            self.copy_to_clipboard();
        }

        let (mouse_x, mouse_y) = mouse_position();
        if is_mouse_button_pressed(MouseButton::Left) {
            if let Some(spawner) = self.session.spawner() {
                if self.screen_to_cell(mouse_x, mouse_y) == spawner {
                    self.dragging = true;
                }
            }
        }
        if self.dragging && is_mouse_button_released(MouseButton::Left) {
            self.dragging = false;
            let dropped = self.screen_to_cell(mouse_x, mouse_y);
            self.dispatch(Command::ReleaseSpawner { x: dropped.x, y: dropped.y });
        }
    }

    fn dispatch(&mut self, command: Command) {
        self.session.dispatch(command);
        if matches!(command, Command::ClearBoard | Command::ReleaseSpawner { .. }) {
            self.exhausted = false;
        }
    }

    fn update(&mut self) {
        match self.session.tick() {
            TickOutcome::Placed(placement) => self.last_placement = Some(placement.cell),
            TickOutcome::Exhausted => self.exhausted = true,
            TickOutcome::Waiting | TickOutcome::Idle => {}
        }
    }

    fn tile_color(&self, category: u32) -> Color {
        let colors = &self.config.visual.tile_colors;
        if colors.is_empty() {
            return ORANGE;
        }
        let [r, g, b] = colors[category as usize % colors.len()];
        Color::from_rgba(r, g, b, 255)
    }

    fn copy_to_clipboard(&self) {
        let text = layout::render(self.session.grid(), self.session.spawner());
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&text) {
                    log::warn!("Failed to copy to clipboard: {}", e);
                } else {
                    log::info!("Board layout copied to clipboard");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                log::warn!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(
            visual.background_r,
            visual.background_g,
            visual.background_b,
            255,
        ));

        let size = self.cell_size();
        for (pos, cell) in self.session.grid().cells() {
            let (px, py) = self.cell_origin(pos);
            let color = match cell {
                Cell::Obstacle => BLACK,
                Cell::Empty if (pos.x + pos.y) % 2 == 0 => WHITE,
                Cell::Empty => GRAY,
                Cell::Tile(category) => self.tile_color(category),
            };
            draw_rectangle(px, py, size - 1.0, size - 1.0, color);
        }

        if let Some(spawner) = self.session.spawner() {
            let (cx, cy) = if self.dragging {
                mouse_position()
            } else {
                let (px, py) = self.cell_origin(spawner);
                (px + size / 2.0, py + size / 2.0)
            };
            draw_circle(cx, cy, size * 0.35, DARKBLUE);
        }

        let status = if self.exhausted {
            "spiral left the board"
        } else if self.session.is_spawning() {
            "spawning"
        } else {
            "idle"
        };
        let info = format!(
            "Board {}x{}  tiles: {}  status: {}",
            self.session.grid().width(),
            self.session.grid().height(),
            self.session.grid().tile_count(),
            status
        );
        draw_text(&info, MARGIN, 24.0, 20.0, WHITE);
        draw_text("Hold Space: spawn   X: clear matches   Drag blue dot: move spawner", MARGIN, 48.0, 18.0, WHITE);
        draw_text("C: copy layout to clipboard   Esc: quit", MARGIN, 70.0, 18.0, WHITE);
        if let Some(last) = self.last_placement {
            draw_text(&format!("Last tile at ({}, {})", last.x, last.y), MARGIN, 92.0, 18.0, LIGHTGRAY);
        }
    }

    fn save_command_log(&self) {
        if let Some(command_log) = self.session.command_log() {
            let path = &self.config.logging.command_log_path;
            match command_log.save_to_file(path) {
                Ok(()) => log::info!("Command log saved to {}\n{}", path, command_log.summary()),
                Err(e) => log::error!("Failed to save command log to {}: {}", path, e),
            }
        }
    }
}

fn window_conf() -> Conf {
    let config = Config::load();
    Conf {
        window_title: config.visual.window_title,
        window_width: 900,
        window_height: 700,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = Config::load();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    let mut state = VisState::new(config);

    loop {
        state.handle_input();

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.update();
        state.draw();

        next_frame().await
    }

    state.save_command_log();
}
