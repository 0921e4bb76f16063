/// Dense row-major cost matrix with at most as many rows as columns.
#[derive(Debug, Clone)]
pub(crate) struct CostMatrix {
    data: Vec<u32>,
    rows: usize,
    cols: usize,
}

impl CostMatrix {
    pub(crate) fn from_fn(rows: usize, cols: usize, mut cost: impl FnMut(usize, usize) -> u32) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(cost(row, col));
            }
        }
        CostMatrix { data, rows, cols }
    }

    fn get(&self, row: usize, col: usize) -> u32 {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }
}

/// Minimum total cost of assigning every row to a distinct column.
// Reference: Andrey Lopatin (https://cp-algorithms.com/graph/hungarian-algorithm.html).
pub(crate) fn min_cost_assignment(a: &CostMatrix) -> u32 {
    const INF: i64 = i64::max_value() / 4;

    let (n, m) = (a.rows, a.cols);
    assert!(n <= m, "more rows ({}) than columns ({})", n, m);
    if n == 0 {
        return 0;
    }

    // 1-indexed arrays with dummy 0 element
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; m + 1];
    let mut p = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0;
        let mut minv = vec![INF; m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = INF;
            let mut j1 = 0;

            for j in 1..=m {
                if !used[j] {
                    let cur = i64::from(a.get(i0 - 1, j - 1)) - u[i0] - v[j];
                    if cur < minv[j] {
                        minv[j] = cur;
                        way[j] = j0;
                    }
                    if minv[j] < delta {
                        delta = minv[j];
                        j1 = j;
                    }
                }
            }

            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;

            if p[j0] == 0 {
                break;
            }
        }

        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;

            if j0 == 0 {
                break;
            }
        }
    }

    // p[j] is the row assigned to column j
    (1..=m)
        .filter(|&j| p[j] != 0)
        .map(|j| a.get(p[j] - 1, j - 1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[u32]]) -> CostMatrix {
        CostMatrix::from_fn(rows.len(), rows[0].len(), |r, c| rows[r][c])
    }

    #[test]
    fn square() {
        let a = matrix(&[&[8, 4, 7], &[5, 2, 3], &[9, 4, 8]]);
        assert_eq!(min_cost_assignment(&a), 15);
    }

    #[test]
    fn more_columns_than_rows() {
        // the cheap column is shared so one row has to settle for its second choice
        let a = matrix(&[&[1, 9, 5], &[1, 9, 2]]);
        assert_eq!(min_cost_assignment(&a), 3);

        let a = matrix(&[&[7, 3, 1, 9]]);
        assert_eq!(min_cost_assignment(&a), 1);
    }

    #[test]
    fn empty() {
        let a = CostMatrix::from_fn(0, 3, |_, _| 1);
        assert_eq!(min_cost_assignment(&a), 0);
    }

    #[test]
    fn matches_brute_force() {
        // every permutation of 4 columns for a fixed pseudo-random 4x4 matrix
        let a = CostMatrix::from_fn(4, 4, |r, c| ((r * 7 + c * 13 + r * c * 5) % 11) as u32);
        let mut best = u32::max_value();
        for c0 in 0..4 {
            for c1 in 0..4 {
                for c2 in 0..4 {
                    for c3 in 0..4 {
                        let cols = [c0, c1, c2, c3];
                        let distinct = (0..4).all(|i| (0..i).all(|j| cols[i] != cols[j]));
                        if distinct {
                            let cost: u32 = (0..4).map(|r| a.get(r, cols[r])).sum();
                            best = best.min(cost);
                        }
                    }
                }
            }
        }
        assert_eq!(min_cost_assignment(&a), best);
    }
}
