//! Grouped mean aggregation of prices.

use super::StatsCalculator;
use crate::data::{DataError, LaptopTable};
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean of a value column for one distinct key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean<K> {
    pub key: K,
    pub count: usize,
    pub mean: f64,
}

/// Group values by key; the result is ordered by ascending key.
pub fn mean_by<K: Ord + Clone>(keys: &[K], values: &[f64]) -> Vec<GroupMean<K>> {
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for (key, value) in keys.iter().zip(values) {
        groups.entry(key.clone()).or_default().push(*value);
    }

    groups
        .into_iter()
        .map(|(key, values)| GroupMean {
            key,
            count: values.len(),
            mean: StatsCalculator::mean(&values),
        })
        .collect()
}

/// Reorder groups from highest to lowest mean; equal means keep their order.
pub fn sort_by_mean_desc<K>(groups: &mut [GroupMean<K>]) {
    groups.sort_by(|a, b| {
        b.mean
            .partial_cmp(&a.mean)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Mean price per RAM size, smallest RAM first.
pub fn mean_price_by_ram(table: &LaptopTable) -> Result<Vec<GroupMean<i64>>, DataError> {
    Ok(mean_by(&table.ram()?, &table.prices()?))
}

/// Mean price per brand, most expensive brand first.
pub fn mean_price_by_company(table: &LaptopTable) -> Result<Vec<GroupMean<String>>, DataError> {
    let mut groups = mean_by(&table.companies()?, &table.prices()?);
    sort_by_mean_desc(&mut groups);
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::cleaned_table;

    #[test]
    fn test_brand_means_sorted_descending() {
        let table = cleaned_table(&[
            "A,Notebook,15.6,8GB,2.5GHz,256,,,,100,",
            "A,Notebook,15.6,8GB,2.5GHz,256,,,,300,",
            "B,Notebook,15.6,8GB,2.5GHz,256,,,,500,",
        ]);

        let groups = mean_price_by_company(&table).unwrap();
        let pairs: Vec<(String, f64)> = groups.into_iter().map(|g| (g.key, g.mean)).collect();
        assert_eq!(
            pairs,
            vec![("B".to_string(), 500.0), ("A".to_string(), 200.0)]
        );
    }

    #[test]
    fn test_ram_groups_ascending() {
        let table = cleaned_table(&[
            "HP,Notebook,15.6,16GB,2.5GHz,256,,,,1500,",
            "HP,Notebook,15.6,4GB,2.5GHz,,500,,,400,",
            "HP,Notebook,15.6,8GB,2.5GHz,256,,,,900,",
            "HP,Notebook,15.6,8GB,2.5GHz,256,,,,1100,",
        ]);

        let groups = mean_price_by_ram(&table).unwrap();
        let keys: Vec<i64> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![4, 8, 16]);
        assert_eq!(groups[1].count, 2);
        assert!((groups[1].mean - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_group_means_equal_overall_mean() {
        let keys = ["Dell", "HP", "Dell", "Apple", "HP", "Dell", "Asus"];
        let prices = [899.0, 575.0, 1249.5, 1339.69, 639.0, 2499.0, 1958.9];

        let groups = mean_by(&keys, &prices);
        let weighted: f64 = groups.iter().map(|g| g.mean * g.count as f64).sum();
        let overall = StatsCalculator::mean(&prices);

        assert!((weighted / prices.len() as f64 - overall).abs() < 1e-9);
        assert_eq!(groups.iter().map(|g| g.count).sum::<usize>(), prices.len());
    }

    #[test]
    fn test_ties_keep_key_order() {
        let mut groups = mean_by(&["b", "a", "c"], &[10.0, 10.0, 20.0]);
        sort_by_mean_desc(&mut groups);
        let keys: Vec<&str> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }
}
