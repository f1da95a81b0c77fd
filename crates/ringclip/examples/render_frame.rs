//! Draw two layers, clip them, and print the frame as ASCII art.
//!
//! Usage:
//!   cargo run -p ringclip --example render_frame -- [width] [height]
//!
//! Each visible layer paints its spans with its own glyph; later layers
//! overwrite earlier ones, as a canvas redraw would.

use ringclip::prelude::*;

fn square(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

fn main() -> Result<(), LayerError> {
    let mut args = std::env::args().skip(1);
    let width: i32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);
    let height: i32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(30);

    let mut stack = LayerStack::new();
    let ring = stack.add_layer();
    stack.complete_outer_ring(ring, square(4, 4, 34, 26))?;
    stack.complete_inner_ring(ring, square(12, 10, 24, 20))?;
    let diamond = stack.add_layer();
    stack.complete_outer_ring(
        diamond,
        vec![
            Point::new(40, 2),
            Point::new(58, 15),
            Point::new(40, 28),
            Point::new(22, 15),
        ],
    )?;
    stack.apply(diamond, Edit::Translate { dx: -6, dy: 0 })?;
    let pieces = stack.clip_layers(ring, diamond)?;
    stack.set_visible(diamond, false)?;

    let glyphs = ['#', '+', '*', 'o'];
    let mut canvas = vec![vec!['.'; width.max(0) as usize + 1]; height.max(0) as usize + 1];
    for (k, (id, spans)) in stack.render(Frame::new(width, height)).into_iter().enumerate() {
        let glyph = glyphs[k % glyphs.len()];
        println!("{glyph} {} ({} spans)", stack.layer(id)?.name, spans.len());
        for s in spans {
            for x in s.x_start..=s.x_end {
                canvas[s.y as usize][x as usize] = glyph;
            }
        }
    }
    println!("clip pieces: {}", pieces.len());
    // y grows upwards in shape space
    for row in canvas.iter().rev() {
        println!("{}", row.iter().collect::<String>());
    }
    Ok(())
}
