//! Iteration-group down-sampling.
//!
//! Simulation output tables hold `population_size` consecutive rows per
//! iteration. Row `i` (0-based, by position) belongs to iteration group
//! `i / population_size`. A [`SamplingPlan`] keeps every group whose index is
//! a multiple of the stride, plus the last group, and drops the rest.
//!
//! Sampling is not idempotent: positions are recomputed on every pass, so
//! sampling an already-sampled table with the same plan reduces it further.

use crate::config::SamplerConfig;
use crate::core::error::{Result, SamplerError};
use crate::table::Table;

/// Iteration group of the row at `index`.
///
/// `population_size` must be non-zero.
pub fn iteration_group(index: usize, population_size: usize) -> usize {
    index / population_size
}

/// Which iteration groups survive sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
    population_size: usize,
    stride: usize,
}

impl SamplingPlan {
    /// Create a plan; both arguments must be positive
    pub fn new(population_size: usize, stride: usize) -> Result<Self> {
        if population_size == 0 {
            return Err(SamplerError::invalid_parameter(
                "population_size",
                "0",
                "must be a positive integer",
            ));
        }
        if stride == 0 {
            return Err(SamplerError::invalid_parameter(
                "stride",
                "0",
                "must be a positive integer",
            ));
        }
        Ok(SamplingPlan {
            population_size,
            stride,
        })
    }

    /// Plan described by a sampler configuration
    pub fn from_config(config: &SamplerConfig) -> Result<Self> {
        Self::new(config.population_size, config.stride)
    }

    /// Rows per iteration group
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Group stride
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Group of the row at `index`
    pub fn group_of(&self, index: usize) -> usize {
        iteration_group(index, self.population_size)
    }

    /// Last group of a table with `num_rows` rows, `None` when empty
    pub fn max_group(&self, num_rows: usize) -> Option<usize> {
        num_rows.checked_sub(1).map(|last| self.group_of(last))
    }

    /// Number of distinct groups in a table with `num_rows` rows
    pub fn num_groups(&self, num_rows: usize) -> usize {
        self.max_group(num_rows).map_or(0, |max| max + 1)
    }

    /// Whether `group` survives when the last group is `max_group`
    pub fn keeps(&self, group: usize, max_group: usize) -> bool {
        group % self.stride == 0 || group == max_group
    }

    /// Positions kept from a table with `num_rows` rows, ascending
    pub fn retained_indices(&self, num_rows: usize) -> Vec<usize> {
        let Some(max_group) = self.max_group(num_rows) else {
            return Vec::new();
        };
        (0..num_rows)
            .filter(|&i| self.keeps(self.group_of(i), max_group))
            .collect()
    }

    /// Number of rows kept from a table with `num_rows` rows.
    ///
    /// Every group but the last is full; the last keeps whatever rows it has.
    pub fn retained_count(&self, num_rows: usize) -> usize {
        match self.max_group(num_rows) {
            None => 0,
            Some(0) => num_rows,
            Some(max_group) => {
                let full_groups_kept = (max_group - 1) / self.stride + 1;
                let last_group_rows = num_rows - max_group * self.population_size;
                full_groups_kept * self.population_size + last_group_rows
            }
        }
    }

    /// Drop the rows of `table` that fall outside the plan.
    ///
    /// With `stamp_column`, the named column of every kept row is overwritten
    /// with that row's group index.
    pub fn apply(&self, mut table: Table, stamp_column: Option<usize>) -> SampledTable {
        let rows_before = table.num_rows();
        let num_groups = self.num_groups(rows_before);
        let retained = self.retained_indices(rows_before);

        let mut next = retained.iter().peekable();
        table.retain_positions(|position| {
            if next.peek() == Some(&&position) {
                next.next();
                true
            } else {
                false
            }
        });

        if let Some(column) = stamp_column {
            let plan = *self;
            table.set_column(column, |kept| plan.group_of(retained[kept]).to_string());
        }

        SampledTable {
            table,
            rows_before,
            num_groups,
        }
    }
}

/// Result of applying a [`SamplingPlan`] to a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledTable {
    /// Kept rows, original header
    pub table: Table,
    /// Row count before sampling
    pub rows_before: usize,
    /// Iteration groups present before sampling
    pub num_groups: usize,
}

impl SampledTable {
    /// Row count after sampling
    pub fn rows_after(&self) -> usize {
        self.table.num_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;

    fn numbered_table(num_rows: usize) -> Table {
        let headers = StringRecord::from(vec!["row", "iteration"]);
        let rows = (0..num_rows)
            .map(|i| {
                let id = i.to_string();
                StringRecord::from(vec![id.as_str(), "x"])
            })
            .collect();
        Table::new(headers, rows)
    }

    fn row_ids(table: &Table) -> Vec<usize> {
        table
            .rows()
            .iter()
            .map(|r| r[0].parse().unwrap())
            .collect()
    }

    #[test]
    fn test_iteration_group() {
        assert_eq!(iteration_group(0, 3), 0);
        assert_eq!(iteration_group(2, 3), 0);
        assert_eq!(iteration_group(3, 3), 1);
        assert_eq!(iteration_group(29, 3), 9);
    }

    #[test]
    fn test_plan_rejects_zero() {
        assert!(SamplingPlan::new(0, 10).is_err());
        assert!(SamplingPlan::new(5, 0).is_err());
        assert!(SamplingPlan::new(1, 1).is_ok());
    }

    #[test]
    fn test_pairs_of_rows_keep_first_and_last_group() {
        let plan = SamplingPlan::new(2, 10).unwrap();
        assert_eq!(plan.retained_indices(20), vec![0, 1, 18, 19]);
        assert_eq!(plan.retained_count(20), 4);
    }

    #[test]
    fn test_triples_keep_six_rows() {
        let plan = SamplingPlan::new(3, 10).unwrap();
        assert_eq!(plan.retained_indices(30), vec![0, 1, 2, 27, 28, 29]);
        assert_eq!(plan.retained_count(30), 6);
    }

    #[test]
    fn test_twenty_groups_keep_zero_ten_and_nineteen() {
        let plan = SamplingPlan::new(5, 10).unwrap();
        let kept = plan.retained_indices(100);
        assert_eq!(kept.len(), 15);
        let groups: Vec<usize> = kept.iter().map(|&i| plan.group_of(i)).collect();
        assert!(groups.iter().all(|g| [0, 10, 19].contains(g)));
        assert_eq!(plan.retained_count(100), 15);
    }

    #[test]
    fn test_last_group_that_is_a_multiple_is_counted_once() {
        let plan = SamplingPlan::new(2, 10).unwrap();
        // Groups 0..=10, group 10 is both a multiple and the last
        assert_eq!(plan.retained_indices(22), vec![0, 1, 20, 21]);
        assert_eq!(plan.retained_count(22), 4);
    }

    #[test]
    fn test_partial_last_group() {
        let plan = SamplingPlan::new(4, 10).unwrap();
        // 45 rows: groups 0..=11, group 11 has a single row
        assert_eq!(plan.max_group(45), Some(11));
        assert_eq!(plan.retained_indices(45), vec![0, 1, 2, 3, 40, 41, 42, 43, 44]);
        assert_eq!(plan.retained_count(45), 9);
    }

    #[test]
    fn test_empty_and_single_group() {
        let plan = SamplingPlan::new(5, 10).unwrap();
        assert_eq!(plan.max_group(0), None);
        assert_eq!(plan.num_groups(0), 0);
        assert!(plan.retained_indices(0).is_empty());
        assert_eq!(plan.retained_count(0), 0);
        assert_eq!(plan.retained_indices(3), vec![0, 1, 2]);
        assert_eq!(plan.retained_count(3), 3);
    }

    #[test]
    fn test_apply_keeps_rows_in_order() {
        let plan = SamplingPlan::new(2, 10).unwrap();
        let sampled = plan.apply(numbered_table(20), None);
        assert_eq!(sampled.rows_before, 20);
        assert_eq!(sampled.num_groups, 10);
        assert_eq!(sampled.rows_after(), 4);
        assert_eq!(row_ids(&sampled.table), vec![0, 1, 18, 19]);
        assert_eq!(sampled.table.headers(), &StringRecord::from(vec!["row", "iteration"]));
    }

    #[test]
    fn test_apply_stamps_group_index() {
        let plan = SamplingPlan::new(5, 10).unwrap();
        let sampled = plan.apply(numbered_table(100), Some(1));
        let stamps: Vec<&str> = sampled.table.rows().iter().map(|r| &r[1]).collect();
        assert_eq!(&stamps[..5], &["0"; 5]);
        assert_eq!(&stamps[5..10], &["10"; 5]);
        assert_eq!(&stamps[10..], &["19"; 5]);
    }

    #[test]
    fn test_sampling_is_not_idempotent() {
        let plan = SamplingPlan::new(2, 10).unwrap();
        let once = plan.apply(numbered_table(40), None);
        assert_eq!(row_ids(&once.table), vec![0, 1, 20, 21, 38, 39]);

        let twice = plan.apply(once.table, None);
        assert_eq!(row_ids(&twice.table), vec![0, 1, 38, 39]);
    }

    #[test]
    fn test_custom_stride() {
        let plan = SamplingPlan::new(1, 3).unwrap();
        assert_eq!(plan.retained_indices(8), vec![0, 3, 6, 7]);
        assert_eq!(plan.retained_count(8), 4);
    }
}
