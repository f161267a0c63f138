//! Day 20: Jurassic Jigsaw
//!
//! Every tile can be placed in 8 orientations (4 rotations of the tile and 4
//! of its mirror image). Edges are read as bit strings so that matching two
//! tiles is an integer comparison.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::input::{blank_line_groups, into_parse_error, into_solve_error};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 20, tags = ["2020", "search"])]
pub struct Solver;

pub type Grid = Vec<Vec<bool>>;

const MONSTER: [&str; 3] = [
    "                  # ",
    "#    ##    ##    ###",
    " #  #  #  #  #  #   ",
];

/// Rotate a square grid a quarter turn clockwise
pub fn rotate<T: Copy>(grid: &[Vec<T>]) -> Vec<Vec<T>> {
    let n = grid.len();
    (0..n)
        .map(|r| (0..n).map(|c| grid[n - 1 - c][r]).collect())
        .collect()
}

/// Mirror a grid left to right
pub fn flip<T: Copy>(grid: &[Vec<T>]) -> Vec<Vec<T>> {
    grid.iter()
        .map(|row| row.iter().rev().copied().collect())
        .collect()
}

pub fn orientations<T: Copy>(grid: &[Vec<T>]) -> Vec<Vec<Vec<T>>> {
    let mut all = Vec::with_capacity(8);
    for start in [grid.to_vec(), flip(grid)] {
        let mut g = start;
        for _ in 0..4 {
            let next = rotate(&g);
            all.push(g);
            g = next;
        }
    }
    all
}

fn edge_code(bits: impl Iterator<Item = bool>) -> u32 {
    bits.fold(0, |acc, b| (acc << 1) | u32::from(b))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: u64,
    pub grid: Grid,
}

/// A tile in one orientation, with its edges read top to bottom and left
/// to right
#[derive(Debug, Clone)]
struct Oriented {
    tile: usize,
    grid: Grid,
    top: u32,
    right: u32,
    bottom: u32,
    left: u32,
}

impl Oriented {
    fn new(tile: usize, grid: Grid) -> Self {
        let last = grid.len() - 1;
        Self {
            tile,
            top: edge_code(grid[0].iter().copied()),
            bottom: edge_code(grid[last].iter().copied()),
            left: edge_code(grid.iter().map(|row| row[0])),
            right: edge_code(grid.iter().map(|row| row[last])),
            grid,
        }
    }
}

fn parse_grid(rows: &[&str]) -> anyhow::Result<Grid> {
    rows.iter()
        .map(|row| {
            row.chars()
                .map(|c| match c {
                    '#' => Ok(true),
                    '.' => Ok(false),
                    other => Err(anyhow!("unexpected pixel '{other}'")),
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })
        .collect()
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Vec<Tile>> {
    let tiles = blank_line_groups(lines)
        .iter()
        .map(|group| -> anyhow::Result<Tile> {
            let (header, rows) = group.split_first().context("empty tile")?;
            let id = header
                .strip_prefix("Tile ")
                .and_then(|h| h.strip_suffix(':'))
                .with_context(|| format!("bad tile header '{header}'"))?
                .parse::<u64>()?;
            let grid = parse_grid(rows).with_context(|| format!("tile {id}"))?;
            Ok(Tile { id, grid })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let size = tiles.first().map(|t| t.grid.len()).context("no tiles")?;
    if !(3..=32).contains(&size) {
        bail!("tiles must be between 3 and 32 pixels wide");
    }
    if let Some(t) = tiles
        .iter()
        .find(|t| t.grid.len() != size || t.grid.iter().any(|row| row.len() != size))
    {
        bail!("tile {} is not a {size}x{size} square", t.id);
    }
    Ok(tiles)
}

fn reverse_edge(code: u32, size: usize) -> u32 {
    code.reverse_bits() >> (32 - size)
}

/// Ids of the tiles with two edges that match no other tile
pub fn find_corners(tiles: &[Tile]) -> anyhow::Result<Vec<u64>> {
    let size = tiles.first().map(|t| t.grid.len()).context("no tiles")?;
    let edges: Vec<[u32; 4]> = tiles
        .iter()
        .map(|t| {
            let o = Oriented::new(0, t.grid.clone());
            [o.top, o.right, o.bottom, o.left].map(|e| e.min(reverse_edge(e, size)))
        })
        .collect();

    let mut counts: HashMap<u32, usize> = HashMap::new();
    for &edge in edges.iter().flatten() {
        *counts.entry(edge).or_default() += 1;
    }

    let mut corners: Vec<u64> = tiles
        .iter()
        .zip(&edges)
        .filter(|(_, e)| e.iter().filter(|edge| counts[*edge] == 1).count() == 2)
        .map(|(t, _)| t.id)
        .collect();
    corners.sort_unstable();
    debug!(?corners, "corner tiles");
    if corners.len() != 4 {
        bail!("expected 4 corner tiles, found {}", corners.len());
    }
    Ok(corners)
}

struct Arrangement<'t> {
    side: usize,
    candidates: &'t [Oriented],
    placed: Vec<&'t Oriented>,
    used: Vec<bool>,
}

impl<'t> Arrangement<'t> {
    fn fits(&self, o: &Oriented) -> bool {
        let index = self.placed.len();
        if self.used[o.tile] {
            return false;
        }
        if index % self.side != 0 && self.placed[index - 1].right != o.left {
            return false;
        }
        index < self.side || self.placed[index - self.side].bottom == o.top
    }

    /// Depth-first placement in row-major order
    fn complete(&mut self) -> bool {
        if self.placed.len() == self.side * self.side {
            return true;
        }
        let candidates = self.candidates;
        for o in candidates {
            if !self.fits(o) {
                continue;
            }
            self.used[o.tile] = true;
            self.placed.push(o);
            if self.complete() {
                return true;
            }
            self.placed.pop();
            self.used[o.tile] = false;
        }
        false
    }
}

/// Arrange the tiles into a square, starting with a corner in the top left;
/// returns the oriented grids in row-major order
pub fn solve_image(tiles: &[Tile]) -> anyhow::Result<Vec<Grid>> {
    let side = (1..=tiles.len())
        .find(|s| s * s >= tiles.len())
        .filter(|s| s * s == tiles.len())
        .context("number of tiles is not a perfect square")?;
    let corner = find_corners(tiles)?[0];

    let candidates: Vec<Oriented> = tiles
        .iter()
        .enumerate()
        .flat_map(|(i, t)| orientations(&t.grid).into_iter().map(move |g| Oriented::new(i, g)))
        .collect();

    for start in candidates.iter().filter(|o| tiles[o.tile].id == corner) {
        let mut arrangement = Arrangement {
            side,
            candidates: &candidates,
            placed: vec![start],
            used: vec![false; tiles.len()],
        };
        arrangement.used[start.tile] = true;
        if arrangement.complete() {
            debug!(side, corner, "image assembled");
            return Ok(arrangement.placed.into_iter().map(|o| o.grid.clone()).collect());
        }
    }
    Err(anyhow!("tiles cannot be arranged into an image"))
}

/// Stitch the arranged tiles together with their borders removed
pub fn make_image(arranged: &[Grid]) -> Grid {
    let side = (arranged.len() as f64).sqrt() as usize;
    let size = arranged.first().map_or(0, Vec::len);
    let mut image = Vec::new();
    for tile_row in arranged.chunks(side.max(1)) {
        for r in 1..size.saturating_sub(1) {
            image.push(
                tile_row
                    .iter()
                    .flat_map(|g| g[r][1..size - 1].iter().copied())
                    .collect(),
            );
        }
    }
    image
}

fn monster_offsets() -> Vec<(usize, usize)> {
    MONSTER
        .iter()
        .enumerate()
        .flat_map(|(r, line)| {
            line.char_indices()
                .filter(|&(_, ch)| ch == '#')
                .map(move |(c, _)| (r, c))
        })
        .collect()
}

/// Whether a sea monster has its top left corner at (`row`, `column`)
pub fn monster_at(image: &Grid, row: usize, column: usize) -> bool {
    monster_offsets().iter().all(|&(dr, dc)| {
        image
            .get(row + dr)
            .and_then(|line| line.get(column + dc))
            .copied()
            .unwrap_or(false)
    })
}

fn monster_cells(image: &Grid) -> HashSet<(usize, usize)> {
    let offsets = monster_offsets();
    let (height, width) = (MONSTER.len(), MONSTER[0].len());
    let mut cells = HashSet::new();
    for row in 0..=image.len().saturating_sub(height) {
        for column in 0..=image.first().map_or(0, Vec::len).saturating_sub(width) {
            if monster_at(image, row, column) {
                cells.extend(offsets.iter().map(|&(dr, dc)| (row + dr, column + dc)));
            }
        }
    }
    cells
}

/// Number of `#` pixels that are not part of a sea monster, in the first
/// orientation of the image where monsters appear
pub fn water_roughness(image: &Grid) -> anyhow::Result<usize> {
    let total = image.iter().flatten().filter(|&&p| p).count();
    for (orientation, candidate) in orientations(image).iter().enumerate() {
        let cells = monster_cells(candidate);
        if !cells.is_empty() {
            debug!(orientation, cells = cells.len(), "sea monsters found");
            return Ok(total - cells.len());
        }
    }
    Err(anyhow!("no sea monsters in any orientation"))
}

fn corner_product(tiles: &[Tile]) -> anyhow::Result<u64> {
    Ok(find_corners(tiles)?.into_iter().product())
}

fn roughness(tiles: &[Tile]) -> anyhow::Result<usize> {
    water_roughness(&make_image(&solve_image(tiles)?))
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    corner_product(&parse(lines)?)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    roughness(&parse(lines)?)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Tile>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        corner_product(shared)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        roughness(shared)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
Tile 2311:
..##.#..#.
##..#.....
#...##..#.
####.#...#
##.##.###.
##...#.###
.#.#.#..##
..#....#..
###...#.#.
..###..###

Tile 1951:
#.##...##.
#.####...#
.....#..##
#...######
.##.#....#
.###.#####
###.##.##.
.###....#.
..#.#..#.#
#...##.#..

Tile 1171:
####...##.
#..##.#..#
##.#..#.#.
.###.####.
..###.####
.##....##.
.#...####.
#.##.####.
####..#...
.....##...

Tile 1427:
###.##.#..
.#..#.##..
.#.##.#..#
#.#.#.##.#
....#...##
...##..##.
...#.#####
.#.####.#.
..#..###.#
..##.#..#.

Tile 1489:
##.#.#....
..##...#..
.##..##...
..#...#...
#####...#.
#..#.#.#.#
...#.#.#..
##.#...##.
..##.##.##
###.##.#..

Tile 2473:
#....####.
#..#.##...
#.##..#...
######.#.#
.#...#.#.#
.#########
.###.#..#.
########.#
##...##.#.
..###.#.#.

Tile 2971:
..#.#....#
#...###...
#.#.###...
##.##..#..
.#####..##
.#..####.#
#..#.#..#.
..####.###
..#.#.###.
...#.#.#.#

Tile 2729:
...#.#.#.#
####.#....
..#.#.....
....#..#.#
.##..##.#.
.#.####...
####.#.#..
##.####...
##..#.##..
#.##...##.

Tile 3079:
#.#.#####.
.#..######
..#.......
######....
####.#..#.
.#...#.##.
#.#####.##
..#.###...
..#.......
..#.###...";

    const STITCHED: &str = "\
.#.#..#.##...#.##..#####
###....#.#....#..#......
##.##.###.#.#..######...
###.#####...#.#####.#..#
##.#....#.##.####...#.##
...########.#....#####.#
....#..#...##..#.#.###..
.####...#..#.....#......
#..#.##..#..###.#.##....
#.####..#.####.#.#.###..
###.#.#...#.######.#..##
#.####....##..########.#
##..##.#...#...#.#.#.#..
...#..#..#.#.##..###.###
.#.#....#.##.#...###.##.
###.#...#..#.##.######..
.#.#.###.##.##.#..#.##..
.####.###.#...###.#..#.#
..#.#..#..#.#.#.####.###
#..####...#.#.#.###.###.
#####..#####...###....##
#.##..#..#...#..####...#
.#.###..##..##..####.##.
...###...##...#...#..###";

    fn stitched() -> Grid {
        parse_grid(&STITCHED.lines().collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn test_rotate_and_flip() {
        let grid: Vec<Vec<char>> = ["ABC", "DEF", "GHI"]
            .iter()
            .map(|r| r.chars().collect())
            .collect();
        let rows = |g: Vec<Vec<char>>| -> Vec<String> {
            g.into_iter().map(|r| r.into_iter().collect()).collect()
        };
        assert_eq!(rows(rotate(&grid)), ["GDA", "HEB", "IFC"]);
        assert_eq!(rows(flip(&grid)), ["CBA", "FED", "IHG"]);
        assert_eq!(orientations(&grid).len(), 8);
    }

    #[test]
    fn test_parse() {
        let tiles = parse(EXAMPLE.lines()).unwrap();
        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles[0].id, 2311);
    }

    #[test]
    fn test_find_corners() {
        let tiles = parse(EXAMPLE.lines()).unwrap();
        assert_eq!(find_corners(&tiles).unwrap(), vec![1171, 1951, 2971, 3079]);
    }

    #[test]
    fn test_first() {
        assert_eq!(first(EXAMPLE.lines()).unwrap(), 20899048083289);
    }

    #[test]
    fn test_make_image() {
        let tiles = parse(EXAMPLE.lines()).unwrap();
        let image = make_image(&solve_image(&tiles).unwrap());
        assert!(orientations(&stitched()).contains(&image));
    }

    #[test]
    fn test_monster_at() {
        let image = flip(&rotate(&stitched()));
        assert!(monster_at(&image, 2, 2));
        assert!(monster_at(&image, 16, 1));
        assert!(!monster_at(&image, 0, 0));
    }

    #[test]
    fn test_second() {
        assert_eq!(second(EXAMPLE.lines()).unwrap(), 273);
    }

    #[test]
    fn test_ragged_tile() {
        assert!(parse(["Tile 1:", "#..", "##", "..."]).is_err());
    }
}
