//! Line-level diffing using Myers' algorithm.

use termdiff_core::DiffOp;

/// Minimal edit script between two line sequences.
///
/// Within every maximal changed run, deletions come before insertions
/// (in their original order), so the engine can pair delete/insert runs
/// positionally. Moving l-t-r in the edit grid removes a line from
/// `expected`, moving t-t-b adds a line from `actual`; a diagonal move
/// does both at once, is free, and is only allowed when the lines are
/// equal.
pub fn diff_ops(expected: &[String], actual: &[String]) -> Vec<DiffOp> {
    let mut mem = vec![(0..=expected.len()).collect::<Vec<usize>>()];
    for y in 0..actual.len() {
        let mut next = vec![y + 1];
        for x in 0..expected.len() {
            let mut v = mem[y][x + 1].min(next[x]) + 1;
            if expected[x] == actual[y] {
                v = v.min(mem[y][x]);
            }
            next.push(v);
        }
        mem.push(next);
    }

    // Backtracking walks the script back to front.
    let mut ops = Vec::with_capacity(expected.len().max(actual.len()));
    let mut x = expected.len();
    let mut y = actual.len();
    while x > 0 || y > 0 {
        if y == 0 {
            ops.push(DiffOp::Delete(expected[x - 1].clone()));
            x -= 1;
        } else if x == 0 {
            ops.push(DiffOp::Insert(actual[y - 1].clone()));
            y -= 1;
        } else if expected[x - 1] == actual[y - 1]
            && mem[y - 1][x - 1] <= mem[y][x - 1].min(mem[y - 1][x]) + 1
        {
            ops.push(DiffOp::Equal(expected[x - 1].clone()));
            x -= 1;
            y -= 1;
        } else if mem[y][x - 1] <= mem[y - 1][x] {
            ops.push(DiffOp::Delete(expected[x - 1].clone()));
            x -= 1;
        } else {
            ops.push(DiffOp::Insert(actual[y - 1].clone()));
            y -= 1;
        }
    }
    ops.reverse();

    normalize_runs(ops)
}

/// Reorder each maximal run of changed lines so all deletions precede
/// all insertions, preserving relative order on both sides.
///
/// Interleavings within a changed run are cost-equivalent; the engine's
/// positional pairing depends on the delete-run-then-insert-run shape.
fn normalize_runs(ops: Vec<DiffOp>) -> Vec<DiffOp> {
    let mut out = Vec::with_capacity(ops.len());
    let mut deletes = Vec::new();
    let mut inserts = Vec::new();

    for op in ops {
        match op {
            DiffOp::Delete(_) => deletes.push(op),
            DiffOp::Insert(_) => inserts.push(op),
            _ => {
                out.append(&mut deletes);
                out.append(&mut inserts);
                out.push(op);
            }
        }
    }
    out.append(&mut deletes);
    out.append(&mut inserts);
    out
}
