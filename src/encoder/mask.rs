//! Mask application, penalty scoring (ISO/IEC 18004 7.8.3) and mask search.

use tracing::trace;

use crate::encoder::matrix::ModuleGrid;
use crate::models::{ECLevel, MaskPattern};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// XOR `mask` into every non-function module. Applying twice is a no-op.
pub fn apply_mask(grid: &mut ModuleGrid, mask: MaskPattern) {
    let size = grid.size();
    for y in 0..size {
        for x in 0..size {
            if !grid.is_function(x, y) && mask.is_masked(y, x) {
                grid.toggle(x, y);
            }
        }
    }
}

/// Lengths of the last seven runs of a row or column, newest first.
struct RunHistory {
    runs: [usize; 7],
}

impl RunHistory {
    fn new() -> Self {
        Self { runs: [0; 7] }
    }

    fn push(&mut self, run: usize) {
        self.runs.rotate_right(1);
        self.runs[0] = run;
    }

    /// dark:light:dark:light:dark at 1:1:3:1:1 with a 4-wide light run on
    /// either side.
    fn has_finder_like(&self) -> bool {
        let r = &self.runs;
        let n = r[1];
        n != 0
            && r[2] == n
            && r[3] == n * 3
            && r[4] == n
            && r[5] == n
            && r[0].max(r[6]) >= n * 4
    }
}

/// N1 and N3 over one line of modules.
fn line_penalty(line: impl Iterator<Item = bool>) -> u32 {
    let mut penalty = 0;
    let mut history = RunHistory::new();
    let mut color = false;
    let mut run = 0usize;

    for dark in line {
        if dark == color {
            run += 1;
            if run == 5 {
                penalty += PENALTY_N1;
            } else if run > 5 {
                penalty += 1;
            }
        } else {
            history.push(run);
            if !color && history.has_finder_like() {
                penalty += PENALTY_N3;
            }
            color = dark;
            run = 1;
        }
    }

    history.push(run);
    if color {
        // A light run of zero closes the line
        history.push(0);
    }
    if history.has_finder_like() {
        penalty += PENALTY_N3;
    }
    penalty
}

/// Total penalty of a square, row-major grid of `size` x `size` modules.
pub fn penalty(modules: &[u8], size: usize) -> u32 {
    debug_assert_eq!(modules.len(), size * size);
    let dark = |x: usize, y: usize| modules[y * size + x] != 0;
    let mut total = 0;

    for y in 0..size {
        total += line_penalty((0..size).map(|x| dark(x, y)));
    }
    for x in 0..size {
        total += line_penalty((0..size).map(|y| dark(x, y)));
    }

    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let color = dark(x, y);
            if color == dark(x + 1, y) && color == dark(x, y + 1) && color == dark(x + 1, y + 1) {
                total += PENALTY_N2;
            }
        }
    }

    let dark_count = modules.iter().filter(|&&m| m != 0).count();
    let all = size * size;
    let deviation = (dark_count * 20).abs_diff(all * 10);
    let k = ((deviation + all - 1) / all).saturating_sub(1);
    total += k as u32 * PENALTY_N4;

    total
}

/// Apply `fixed` or, when `None`, the mask with the lowest penalty; ties go
/// to the lower index. Leaves the grid masked with final format information.
pub fn apply_best_mask(grid: &mut ModuleGrid, level: ECLevel, fixed: Option<MaskPattern>) -> MaskPattern {
    let mask = fixed.unwrap_or_else(|| {
        let mut best = MaskPattern::Pattern0;
        let mut best_penalty = u32::MAX;
        for candidate in MaskPattern::ALL {
            apply_mask(grid, candidate);
            grid.set_format_information(level, candidate);
            let score = penalty(grid.modules(), grid.size());
            trace!(mask = candidate.index(), penalty = score, "mask candidate");
            if score < best_penalty {
                best = candidate;
                best_penalty = score;
            }
            apply_mask(grid, candidate);
        }
        best
    });

    apply_mask(grid, mask);
    grid.set_format_information(level, mask);
    mask
}
