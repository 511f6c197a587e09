use crate::error::{Error, Result};

/// Glyph that marks an empty cell in a text layout.
pub const EMPTY_GLYPH: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<P> {
    Empty,
    Occupied(P),
}

impl<P> Cell<P> {
    pub fn payload(&self) -> Option<&P> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(p) => Some(p),
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }
}

impl<P> From<Option<P>> for Cell<P> {
    fn from(value: Option<P>) -> Self {
        match value {
            Some(p) => Cell::Occupied(p),
            None => Cell::Empty,
        }
    }
}

/// Integer cell coordinates. May lie outside the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub x: i64,
    pub y: i64,
}

impl CellPos {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Rows of cells, `rows[y][x]`. Rows may differ in length on input; the
/// scene is as wide as its longest row and shorter rows are padded with
/// empty cells.
#[derive(Debug, Clone)]
pub struct Scene<P> {
    rows: Vec<Vec<Cell<P>>>,
    width: usize,
}

impl<P> Scene<P> {
    pub fn from_rows(mut rows: Vec<Vec<Cell<P>>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize_with(width, || Cell::Empty);
        }
        Self { rows, width }
    }

    /// An all-empty `width` x `height` scene.
    pub fn empty(width: usize, height: usize) -> Self {
        let rows = (0..height)
            .map(|_| (0..width).map(|_| Cell::Empty).collect())
            .collect();
        Self::from_rows(rows)
    }

    /// Build a scene from a text layout: one line per row, [`EMPTY_GLYPH`]
    /// for empty cells and any other glyph resolved through `legend`.
    /// Blank lines and surrounding whitespace are ignored.
    pub fn parse(layout: &str, mut legend: impl FnMut(char) -> Option<P>) -> Result<Self> {
        let mut rows = Vec::new();
        for (row, line) in layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
        {
            let mut cells = Vec::with_capacity(line.len());
            for (column, glyph) in line.chars().enumerate() {
                if glyph == EMPTY_GLYPH {
                    cells.push(Cell::Empty);
                    continue;
                }
                let payload =
                    legend(glyph).ok_or(Error::UnknownCellGlyph { glyph, row, column })?;
                cells.push(Cell::Occupied(payload));
            }
            rows.push(cells);
        }

        if rows.is_empty() {
            return Err(Error::EmptyScene);
        }
        Ok(Self::from_rows(rows))
    }

    /// `(width, height)`: the longest row length and the row count.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.rows.len())
    }

    pub fn contains(&self, cell: CellPos) -> bool {
        let (w, h) = self.size();
        0 <= cell.x && cell.x < w as i64 && 0 <= cell.y && cell.y < h as i64
    }

    /// Cell at `pos`, or `None` outside the scene.
    pub fn get(&self, pos: CellPos) -> Option<&Cell<P>> {
        if !self.contains(pos) {
            return None;
        }
        Some(&self.rows[pos.y as usize][pos.x as usize])
    }

    /// Payload of the occupied cell at `pos`; `None` when empty or outside.
    pub fn payload(&self, pos: CellPos) -> Option<&P> {
        self.get(pos).and_then(Cell::payload)
    }

    pub fn is_occupied(&self, pos: CellPos) -> bool {
        self.payload(pos).is_some()
    }

    /// Every occupied cell with its position, row by row.
    pub fn occupied(&self) -> impl Iterator<Item = (CellPos, &P)> {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().filter_map(move |(x, cell)| {
                cell.payload()
                    .map(|p| (CellPos::new(x as i64, y as i64), p))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Scene<char> {
        Scene::parse(
            "
            ..ab
            .c
            ....d
            ",
            |g| g.is_ascii_lowercase().then_some(g),
        )
        .unwrap()
    }

    #[test]
    fn size_uses_longest_row() {
        let scene = layout();
        assert_eq!(scene.size(), (5, 3));
        assert_eq!(Scene::<u8>::empty(7, 4).size(), (7, 4));
        assert_eq!(Scene::<u8>::from_rows(Vec::new()).size(), (0, 0));
    }

    #[test]
    fn contains_checks_both_axes() {
        let scene = layout();
        assert!(scene.contains(CellPos::new(0, 0)));
        assert!(scene.contains(CellPos::new(4, 2)));
        assert!(!scene.contains(CellPos::new(5, 0)));
        assert!(!scene.contains(CellPos::new(0, 3)));
        assert!(!scene.contains(CellPos::new(-1, 1)));
        assert!(!scene.contains(CellPos::new(1, -1)));
    }

    #[test]
    fn short_rows_read_as_empty() {
        let scene = layout();
        // Row 1 is ".c", inside the scene but beyond the row.
        assert_eq!(scene.get(CellPos::new(4, 1)), Some(&Cell::Empty));
        assert_eq!(scene.payload(CellPos::new(1, 1)), Some(&'c'));
        assert_eq!(scene.get(CellPos::new(9, 9)), None);
    }

    #[test]
    fn occupied_lists_payloads() {
        let scene = layout();
        let cells: Vec<_> = scene.occupied().map(|(p, c)| (p.x, p.y, *c)).collect();
        assert_eq!(
            cells,
            vec![(2, 0, 'a'), (3, 0, 'b'), (1, 1, 'c'), (4, 2, 'd')]
        );
    }

    #[test]
    fn parse_rejects_unknown_glyphs() {
        let err = Scene::parse("..\n.X", |g| (g == 'a').then_some(())).unwrap_err();
        match err {
            Error::UnknownCellGlyph { glyph, row, column } => {
                assert_eq!((glyph, row, column), ('X', 1, 1));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_empty_layout() {
        assert!(matches!(
            Scene::parse("  \n\n", |_| Some(())),
            Err(Error::EmptyScene)
        ));
    }
}
