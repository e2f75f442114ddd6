//! Group-by and pivot shaping
//!
//! Groups keyed by a categorical field, aggregating a numeric field.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::aggregates::{mean, round2};
use crate::models::{Dataset, PivotTable};
use crate::schema::Field;

/// Values of `value` grouped by `key`, groups in first-seen order
pub fn group_values(dataset: &Dataset, key: Field, value: Field) -> Vec<(String, Vec<f64>)> {
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for record in dataset {
        let (Some(label), Some(v)) = (record.category(key), record.numeric(value)) else {
            continue;
        };
        match index.get(label) {
            Some(&i) => groups[i].1.push(v),
            None => {
                index.insert(label, groups.len());
                groups.push((label.to_string(), vec![v]));
            }
        }
    }
    groups
}

/// Mean of `value` per `key` group, rounded to two decimals, groups sorted by label
pub fn group_mean(dataset: &Dataset, key: Field, value: Field) -> Vec<(String, f64)> {
    let mut sorted: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (label, values) in group_values(dataset, key, value) {
        sorted.insert(label, values);
    }

    sorted
        .into_iter()
        .filter_map(|(label, values)| mean(&values).map(|m| (label, round2(m))))
        .collect()
}

/// Pivot with `row_key` groups as rows, `column_key` groups as columns and
/// the sum of `value` in each cell
///
/// `row_order` fixes which rows appear and in what order: labels not listed
/// are dropped, listed labels absent from the data become all-zero rows.
/// Columns are every `column_key` label in the dataset, sorted, so a label
/// seen only on dropped rows still gets an all-zero column.
pub fn pivot_sum(
    dataset: &Dataset,
    row_key: Field,
    column_key: Field,
    value: Field,
    row_order: &[&str],
) -> PivotTable {
    let mut sums: BTreeMap<(usize, String), f64> = BTreeMap::new();
    let mut columns: BTreeSet<String> = BTreeSet::new();

    for record in dataset {
        let (Some(row), Some(column), Some(v)) = (
            record.category(row_key),
            record.category(column_key),
            record.numeric(value),
        ) else {
            continue;
        };
        columns.insert(column.to_string());
        let Some(row_index) = row_order.iter().position(|r| *r == row) else {
            continue;
        };
        *sums.entry((row_index, column.to_string())).or_insert(0.0) += v;
    }

    let columns: Vec<String> = columns.into_iter().collect();
    let cells = (0..row_order.len())
        .map(|r| {
            columns
                .iter()
                .map(|c| sums.get(&(r, c.clone())).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();

    PivotTable {
        rows: row_order.iter().map(|r| r.to_string()).collect(),
        columns,
        cells,
    }
}
