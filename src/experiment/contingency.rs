use serde::Serialize;

/// Click-through outcome for one variant group of an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOutcome {
    pub ab_test_id: i64,
    pub clicks: u64,
    pub exposures: u64,
}

impl GroupOutcome {
    pub fn click_rate(&self) -> f64 {
        if self.exposures == 0 {
            return 0.0;
        }
        self.clicks as f64 / self.exposures as f64
    }
}

/// 2x2 contingency table of (clicked, not clicked) x (variant).
///
/// Row per group, columns are clicks and non-clicks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContingencyTable {
    pub cells: [[u64; 2]; 2],
}

impl ContingencyTable {
    pub fn from_groups(a: &GroupOutcome, b: &GroupOutcome) -> Self {
        Self {
            cells: [
                [a.clicks, a.exposures - a.clicks],
                [b.clicks, b.exposures - b.clicks],
            ],
        }
    }

    /// A zero cell makes the chi-square statistic meaningless; callers must
    /// reject such tables instead of testing them.
    pub fn has_zero_cell(&self) -> bool {
        self.cells.iter().flatten().any(|&cell| cell == 0)
    }

    pub fn row_totals(&self) -> [u64; 2] {
        [
            self.cells[0][0] + self.cells[0][1],
            self.cells[1][0] + self.cells[1][1],
        ]
    }

    pub fn column_totals(&self) -> [u64; 2] {
        [
            self.cells[0][0] + self.cells[1][0],
            self.cells[0][1] + self.cells[1][1],
        ]
    }

    pub fn grand_total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_rows_from_groups() {
        let a = GroupOutcome {
            ab_test_id: 1,
            clicks: 50,
            exposures: 100,
        };
        let b = GroupOutcome {
            ab_test_id: 2,
            clicks: 30,
            exposures: 100,
        };
        let table = ContingencyTable::from_groups(&a, &b);

        assert_eq!(table.cells, [[50, 50], [30, 70]]);
        assert_eq!(table.row_totals(), [100, 100]);
        assert_eq!(table.column_totals(), [80, 120]);
        assert_eq!(table.grand_total(), 200);
        assert!(!table.has_zero_cell());
    }

    #[test]
    fn detects_zero_cells() {
        let table = ContingencyTable {
            cells: [[0, 100], [5, 95]],
        };
        assert!(table.has_zero_cell());

        let table = ContingencyTable {
            cells: [[10, 90], [5, 0]],
        };
        assert!(table.has_zero_cell());
    }

    #[test]
    fn group_outcome_serializes_camel_case() {
        let group = GroupOutcome {
            ab_test_id: 3,
            clicks: 12,
            exposures: 40,
        };
        let json = serde_json::to_value(group).unwrap();
        assert_eq!(json["abTestId"], 3);
        assert_eq!(json["clicks"], 12);
        assert_eq!(json["exposures"], 40);
    }

    #[test]
    fn click_rate_handles_empty_group() {
        let empty = GroupOutcome {
            ab_test_id: 9,
            clicks: 0,
            exposures: 0,
        };
        assert_eq!(empty.click_rate(), 0.0);

        let half = GroupOutcome {
            ab_test_id: 9,
            clicks: 25,
            exposures: 50,
        };
        assert!((half.click_rate() - 0.5).abs() < 1e-12);
    }
}
