use crate::color::Color;
use crate::frame::Frame;
use crate::scene::Scene;
use crate::vec2::Vec2;

const BACKGROUND: u32 = 0x0018_1818;
const GRID_LINE: u32 = 0x0030_3030;
const PLAYER: u32 = 0x00FF_00FF;
const CROSSING: u32 = 0x00FF_80FF;

/// Player marker radius, in cells.
const PLAYER_RADIUS: f64 = 0.2;
/// Ray inspector marker radius, in cells.
const CROSSING_RADIUS: f64 = 0.08;

/// Extras drawn over a frame.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    /// Minimap cell size as a fraction of the framebuffer width.
    pub minimap_cell: f64,
    /// Grid crossings of an inspected ray, drawn on the minimap.
    pub crossings: Vec<Vec2>,
}

/// Clipped pixel writes into a `width` x `height` 0RGB buffer.
struct Canvas<'a> {
    buf: &'a mut [u32],
    width: usize,
    height: usize,
}

impl Canvas<'_> {
    #[inline]
    fn put(&mut self, x: i64, y: i64, color: u32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.buf[y as usize * self.width + x as usize] = color;
    }

    fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    /// Fill `[x0, x1) x [y0, y1)`, rounded to whole pixels.
    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: u32) {
        let clamp_x = |v: f64| v.round().clamp(0.0, self.width as f64) as usize;
        let clamp_y = |v: f64| v.round().clamp(0.0, self.height as f64) as usize;
        let (x0, x1) = (clamp_x(x0), clamp_x(x1));
        let (y0, y1) = (clamp_y(y0), clamp_y(y1));
        for y in y0..y1 {
            let row = y * self.width;
            self.buf[row + x0..row + x1.max(x0)].fill(color);
        }
    }

    fn line(&mut self, a: Vec2, b: Vec2, color: u32) {
        let (mut x, mut y) = (a.x.round() as i64, a.y.round() as i64);
        let (x1, y1) = (b.x.round() as i64, b.y.round() as i64);

        // Bresenham
        let dx = (x1 - x).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let dy = -(y1 - y).abs();
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_circle(&mut self, centre: Vec2, radius: f64, color: u32) {
        let r = radius.max(0.5);
        let (x0, x1) = ((centre.x - r).floor() as i64, (centre.x + r).ceil() as i64);
        let (y0, y1) = ((centre.y - r).floor() as i64, (centre.y + r).ceil() as i64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if p.squaredist(&centre) <= r * r {
                    self.put(x, y, color);
                }
            }
        }
    }
}

pub fn render_frame(
    buf: &mut [u32],
    width: usize,
    height: usize,
    scene: &Scene<Color>,
    frame: &Frame<'_, Color>,
    overlay: &Overlay,
) {
    let mut canvas = Canvas { buf, width, height };
    canvas.clear(BACKGROUND);
    draw_strips(&mut canvas, frame);
    draw_minimap(&mut canvas, scene, frame, overlay);
}

/// Perspective pass: one vertically centred strip per column that hit.
fn draw_strips(canvas: &mut Canvas<'_>, frame: &Frame<'_, Color>) {
    let resol = frame.columns.len();
    if resol == 0 {
        return;
    }
    let screen_w = canvas.width as f64;
    let screen_h = canvas.height as f64;
    let strip_w = (screen_w / resol as f64).ceil();

    for (index, strip) in frame.hits() {
        let strip_h = screen_h * strip.height;
        let x0 = index as f64 * strip_w;
        let y0 = (screen_h - strip_h) * 0.5;
        let color = strip.payload.brightness(strip.brightness as f32).to_pixel();
        canvas.fill_rect(x0, y0, x0 + strip_w, y0 + strip_h, color);
    }
}

/// Orthographic pass: the grid, the player and the camera wedge, drawn
/// straight from the scene without casting.
fn draw_minimap(
    canvas: &mut Canvas<'_>,
    scene: &Scene<Color>,
    frame: &Frame<'_, Color>,
    overlay: &Overlay,
) {
    let cell = canvas.width as f64 * overlay.minimap_cell;
    if cell <= 0.0 {
        return;
    }
    let origin = Vec2::new(canvas.width as f64, canvas.height as f64).scale(0.02);
    let to_screen = |p: Vec2| origin + p.scale(cell);

    let (w, h) = scene.size();
    let size = to_screen(Vec2::new(w as f64, h as f64));
    canvas.fill_rect(origin.x, origin.y, size.x, size.y, BACKGROUND);

    for (pos, color) in scene.occupied() {
        let a = to_screen(Vec2::new(pos.x as f64, pos.y as f64));
        let b = to_screen(Vec2::new(pos.x as f64 + 1.0, pos.y as f64 + 1.0));
        canvas.fill_rect(a.x, a.y, b.x, b.y, color.to_pixel());
    }

    for i in 0..=w {
        let x = i as f64;
        canvas.line(
            to_screen(Vec2::new(x, 0.0)),
            to_screen(Vec2::new(x, h as f64)),
            GRID_LINE,
        );
    }
    for i in 0..=h {
        let y = i as f64;
        canvas.line(
            to_screen(Vec2::new(0.0, y)),
            to_screen(Vec2::new(w as f64, y)),
            GRID_LINE,
        );
    }

    let wedge = &frame.wedge;
    let eye = to_screen(wedge.origin);
    canvas.fill_circle(eye, PLAYER_RADIUS * cell, PLAYER);
    canvas.line(to_screen(wedge.left), to_screen(wedge.right), PLAYER);
    canvas.line(eye, to_screen(wedge.left), PLAYER);
    canvas.line(eye, to_screen(wedge.right), PLAYER);

    if let Some(last) = overlay.crossings.last() {
        canvas.line(eye, to_screen(*last), CROSSING);
        for p in &overlay.crossings {
            canvas.fill_circle(to_screen(*p), CROSSING_RADIUS * cell, CROSSING);
        }
    }
}
