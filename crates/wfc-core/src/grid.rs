//! A rectangular, row-major grid of tile atoms.
//!
//! Used both as the exemplar representation fed to the pattern extractor
//! and as the rendered output of a solve.

/// A rectangular grid of tile atoms, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    pub width: usize,
    pub height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: usize, height: usize, cells: Vec<T>) -> Self {
        assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// A grid filled entirely with one tile.
    pub fn filled(width: usize, height: usize, tile: T) -> Self {
        Self::new(width, height, vec![tile; width * height])
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.cells[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        self.cells[y * self.width + x] = value;
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }
}

#[cfg(feature = "image-io")]
mod image_io {
    use super::Grid;

    /// RGB tile atom used when an exemplar is loaded from an image file.
    pub type Rgb = [u8; 3];

    impl Grid<Rgb> {
        /// Load a grid from an image file, one tile atom per pixel.
        pub fn from_image(path: &std::path::Path) -> Result<Self, String> {
            let img = image::open(path).map_err(|e| e.to_string())?;
            let rgb = img.to_rgb8();
            let width = rgb.width() as usize;
            let height = rgb.height() as usize;
            let cells: Vec<Rgb> = rgb.pixels().map(|p| [p[0], p[1], p[2]]).collect();
            Ok(Grid::new(width, height, cells))
        }

        /// Save a grid to an image file, one pixel per tile atom.
        pub fn save(&self, path: &std::path::Path) -> Result<(), String> {
            let mut img = image::RgbImage::new(self.width as u32, self.height as u32);
            for y in 0..self.height {
                for x in 0..self.width {
                    let c = *self.get(x, y);
                    img.put_pixel(x as u32, y as u32, image::Rgb(c));
                }
            }
            img.save(path).map_err(|e| e.to_string())
        }
    }
}

#[cfg(feature = "image-io")]
pub use image_io::Rgb;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_round_trip() {
        let mut grid = Grid::filled(3, 2, '.');
        grid.set(1, 1, 'X');
        assert_eq!(*grid.get(1, 1), 'X');
        assert_eq!(*grid.get(0, 0), '.');
    }

    #[test]
    fn rows_iterates_in_row_major_order() {
        let grid = Grid::new(2, 2, vec!['a', 'b', 'c', 'd']);
        let rows: Vec<&[char]> = grid.rows().collect();
        assert_eq!(rows, vec![&['a', 'b'][..], &['c', 'd'][..]]);
    }
}
