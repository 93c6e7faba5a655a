//! Batch helpers.

use crate::record::LogRecord;

/// Index of the record with the highest level. On ties the first one wins.
pub fn select_representative(records: &[LogRecord]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, record) in records.iter().enumerate() {
        match best {
            Some(current) if records[current].level >= record.level => {}
            _ => best = Some(index),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;
    use proptest::prelude::*;

    fn batch(levels: &[u16]) -> Vec<LogRecord> {
        levels
            .iter()
            .enumerate()
            .map(|(i, value)| LogRecord::new(Level::from_value(*value), "app", &i.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(select_representative(&[]), None);
    }

    #[test]
    fn test_first_of_equal_maximums_wins() {
        assert_eq!(select_representative(&batch(&[200, 400, 300, 400])), Some(1));
        assert_eq!(select_representative(&batch(&[600, 600])), Some(0));
    }

    proptest! {
        #[test]
        fn prop_representative_is_first_maximum(
            levels in prop::collection::vec(
                prop::sample::select(vec![100u16, 200, 250, 300, 400, 500, 550, 600]),
                1..20,
            )
        ) {
            let records = batch(&levels);
            let max = *levels.iter().max().unwrap();
            let first = levels.iter().position(|l| *l == max).unwrap();
            prop_assert_eq!(select_representative(&records), Some(first));
        }
    }
}
