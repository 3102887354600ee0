use macroquad::prelude::*;
use shared::{GameState, Marker, Occupant, Position, TileKind};

const BACKGROUND: Color = Color::new(0.1, 0.1, 0.1, 1.0);
const WALL_COLOR: Color = Color::new(0.45, 0.45, 0.45, 1.0);
const PORTAL_COLOR: Color = Color::new(0.2, 0.8, 0.3, 1.0);
const HIGHLIGHT: Color = Color::new(0.0, 0.67, 1.0, 1.0);

/// Height reserved below the grid for the status and help lines
const FOOTER: f32 = 56.0;
const MARGIN: f32 = 8.0;

pub const HELP_TEXT: &str = "WASD/arrows: move   E: freeze   Esc: quit";

/// Fill colour for one cell, `None` for empty floor
pub fn cell_color(occupant: Occupant) -> Option<Color> {
    match occupant {
        Occupant::Marker(Marker::Player) => Some(WHITE),
        Occupant::Marker(Marker::Enemy) => Some(RED),
        Occupant::Marker(Marker::Pickup) => Some(YELLOW),
        Occupant::Tile(tile) => match tile.kind {
            TileKind::Wall => Some(WALL_COLOR),
            TileKind::Portal => Some(PORTAL_COLOR),
            TileKind::Empty => None,
        },
    }
}

/// Largest square cell that fits the grid and the footer on screen
pub fn cell_size(screen_width: f32, screen_height: f32, columns: usize, rows: usize) -> f32 {
    if columns == 0 || rows == 0 {
        return 0.0;
    }
    let by_width = (screen_width - 2.0 * MARGIN) / columns as f32;
    let by_height = (screen_height - 2.0 * MARGIN - FOOTER) / rows as f32;
    by_width.min(by_height).floor().max(1.0)
}

pub struct Renderer {
    client_id: String,
}

impl Renderer {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }

    pub fn render(&self, state: Option<&GameState>) {
        clear_background(BACKGROUND);

        let Some(state) = state else {
            draw_text("Waiting for server...", MARGIN, 2.0 * MARGIN + 12.0, 24.0, WHITE);
            return;
        };

        let grid = &state.grid;
        let cell = cell_size(screen_width(), screen_height(), grid.width(), grid.height());

        for pos in grid.cells() {
            if let Some(color) = grid.occupant(pos).and_then(cell_color) {
                let (x, y) = self.origin(pos, cell);
                draw_rectangle(x, y, cell, cell, color);
            }
        }

        if let Some(own) = state.player(&self.client_id) {
            let (x, y) = self.origin(own.position, cell);
            draw_rectangle_lines(x, y, cell, cell, 2.0, HIGHLIGHT);
        }

        self.draw_footer(state, MARGIN + grid.height() as f32 * cell);
    }

    fn origin(&self, pos: Position, cell: f32) -> (f32, f32) {
        (MARGIN + pos.x as f32 * cell, MARGIN + pos.y as f32 * cell)
    }

    fn draw_footer(&self, state: &GameState, top: f32) {
        let status = &state.status;
        if !status.status_message.is_empty() {
            let color = if status.frozen { SKYBLUE } else { WHITE };
            draw_text(&status.status_message, MARGIN, top + 22.0, 24.0, color);
        }

        let help = if status.running {
            format!("{}   players: {}", HELP_TEXT, state.players.len())
        } else {
            "Game over. Esc: quit".to_string()
        };
        draw_text(&help, MARGIN, top + 44.0, 16.0, GRAY);
    }
}
