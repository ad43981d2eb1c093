use image::{ImageBuffer, Rgb, RgbImage};

use crate::map_generator::Map;

pub struct TerrainRenderer;

impl TerrainRenderer {
    /// Renders a map to RGBA pixel data, each tile filling a `scale` x `scale`
    /// block with its biome color.
    pub fn render_to_pixels(map: &Map, scale: usize) -> Vec<u8> {
        let scale = scale.max(1);
        let img_width = map.width * scale;
        let img_height = map.height * scale;
        let mut pixels = vec![0u8; img_width * img_height * 4];

        for (x, y, tile) in map.tiles.cells() {
            let [r, g, b] = tile.biome().rgb8();
            for ty in 0..scale {
                let row_start = ((y * scale + ty) * img_width + x * scale) * 4;
                for tx in 0..scale {
                    let idx = row_start + tx * 4;
                    pixels[idx..idx + 4].copy_from_slice(&[r, g, b, 255]);
                }
            }
        }

        pixels
    }

    /// Renders a map to an image for PNG export
    pub fn render_to_image(map: &Map, scale: u32) -> RgbImage {
        let scale = scale.max(1);
        let width = map.width as u32 * scale;
        let height = map.height as u32 * scale;

        ImageBuffer::from_fn(width, height, |px, py| {
            let tile = &map.tiles[((px / scale) as usize, (py / scale) as usize)];
            Rgb(tile.biome().rgb8())
        })
    }

    /// Down-sampled glyph view of the whole map, at most `max_cols` x
    /// `max_rows` characters.
    pub fn render_ascii(map: &Map, max_cols: usize, max_rows: usize) -> String {
        let sample_x = (map.width / max_cols.max(1)).max(1);
        let sample_y = (map.height / max_rows.max(1)).max(1);

        let mut out = String::new();
        for y in (0..map.height).step_by(sample_y) {
            for x in (0..map.width).step_by(sample_x) {
                out.push(map.tiles[(x, y)].biome().glyph());
            }
            out.push('\n');
        }
        out
    }

    /// A `cols` x `rows` window centered on `player`, clamped to the map,
    /// with the player drawn as `@`.
    pub fn render_viewport(map: &Map, player: (usize, usize), cols: usize, rows: usize) -> String {
        let cols = cols.min(map.width);
        let rows = rows.min(map.height);
        let left = player.0.saturating_sub(cols / 2).min(map.width - cols);
        let top = player.1.saturating_sub(rows / 2).min(map.height - rows);

        let mut out = String::with_capacity((cols + 1) * rows);
        for y in top..top + rows {
            for x in left..left + cols {
                if (x, y) == player {
                    out.push('@');
                } else {
                    out.push(map.tiles[(x, y)].biome().glyph());
                }
            }
            out.push('\n');
        }
        out
    }
}
