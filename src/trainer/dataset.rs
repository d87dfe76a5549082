//! Supervised examples derived from the move log

use crate::{
    Error, Result,
    corpus::MoveRecord,
    model::network::argmax,
    tictactoe::{
        CELL_COUNT,
        encoding::{encode_features, one_hot},
    },
};

/// Board snapshot as features, chosen cell as a one-hot label.
///
/// Derived on demand from a [`MoveRecord`]; never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub features: [f32; CELL_COUNT],
    pub label: [f32; CELL_COUNT],
}

impl TrainingExample {
    pub fn from_record(record: &MoveRecord) -> Self {
        Self {
            features: encode_features(record.board()),
            label: one_hot(record.cell()),
        }
    }

    /// The cell the label points at
    pub fn chosen_cell(&self) -> usize {
        argmax(&self.label)
    }
}

/// One example per record, in log order.
///
/// # Errors
///
/// Returns [`Error::EmptyCorpus`] when there is nothing to learn from.
pub fn build_dataset(records: &[MoveRecord]) -> Result<Vec<TrainingExample>> {
    if records.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    Ok(records.iter().map(TrainingExample::from_record).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{Board, Mark};

    #[test]
    fn test_one_example_per_record() {
        let first = MoveRecord::new(Board::new(), 4, Mark::Player).unwrap();
        let second = MoveRecord::new(first.board_after(), 0, Mark::Opponent).unwrap();

        let dataset = build_dataset(&[first, second]).unwrap();
        assert_eq!(dataset.len(), 2);

        assert_eq!(dataset[0].features, [0.0; 9]);
        assert_eq!(dataset[0].chosen_cell(), 4);
        assert_eq!(
            dataset[1].features,
            [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]
        );
        assert_eq!(dataset[1].chosen_cell(), 0);

        for example in &dataset {
            assert_eq!(example.label.iter().sum::<f32>(), 1.0);
            assert_eq!(example.label.iter().filter(|&&v| v == 1.0).count(), 1);
        }
    }

    #[test]
    fn test_empty_corpus() {
        assert!(matches!(build_dataset(&[]), Err(Error::EmptyCorpus)));
    }
}
