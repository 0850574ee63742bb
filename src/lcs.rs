#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Same(usize, usize),
    Insert(usize),
    Delete(usize),
}

// cell(i, j) is the LCS length of a[..i] and b[..j].
struct Table {
    width: usize,
    cells: Vec<usize>,
}

impl Table {
    fn build<T: PartialEq>(a: &[T], b: &[T]) -> Self {
        let width = b.len() + 1;
        let mut cells = vec![0usize; (a.len() + 1) * width];

        for i in 1..=a.len() {
            for j in 1..=b.len() {
                cells[i * width + j] = if a[i - 1] == b[j - 1] {
                    cells[(i - 1) * width + (j - 1)] + 1
                } else {
                    cells[(i - 1) * width + j].max(cells[i * width + (j - 1)])
                };
            }
        }

        Self { width, cells }
    }

    fn cell(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.width + j]
    }
}

// Ties consume b first, so a run of changes comes out as deletions followed
// by insertions. merge_modifications depends on that order.
pub(crate) fn align<T: PartialEq>(a: &[T], b: &[T]) -> Vec<Step> {
    let table = Table::build(a, b);
    let mut steps = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (a.len(), b.len());

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
            steps.push(Step::Same(i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table.cell(i, j - 1) >= table.cell(i - 1, j)) {
            steps.push(Step::Insert(j - 1));
            j -= 1;
        } else {
            steps.push(Step::Delete(i - 1));
            i -= 1;
        }
    }

    steps.reverse();
    steps
}
