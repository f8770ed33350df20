//! Serializable views of a finished layout pass.

use serde::Serialize;
use waterfall_dom::NodeId;
use waterfall_types::error::Result;

/// One generated column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSnapshot {
    /// 1-based column order (`data-col-order`).
    pub order: usize,
    /// Measured height after placement.
    pub height: u32,
    /// Items in the column, top to bottom.
    pub items: Vec<NodeId>,
}

/// Column-by-column state of one widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutSnapshot {
    pub selector: String,
    pub columns: Vec<ColumnSnapshot>,
}

impl LayoutSnapshot {
    pub fn heights(&self) -> Vec<u32> {
        self.columns.iter().map(|c| c.height).collect()
    }

    pub fn item_count(&self) -> usize {
        self.columns.iter().map(|c| c.items.len()).sum()
    }

    /// Difference between the tallest and the shortest column.
    pub fn imbalance(&self) -> u32 {
        let heights = self.heights();
        match (heights.iter().max(), heights.iter().min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LayoutSnapshot {
        LayoutSnapshot {
            selector: ".waterfall__container".into(),
            columns: vec![
                ColumnSnapshot {
                    order: 1,
                    height: 300,
                    items: vec![4],
                },
                ColumnSnapshot {
                    order: 2,
                    height: 250,
                    items: vec![6, 5],
                },
            ],
        }
    }

    #[test]
    fn summary_values() {
        let snap = sample();
        assert_eq!(snap.heights(), vec![300, 250]);
        assert_eq!(snap.item_count(), 3);
        assert_eq!(snap.imbalance(), 50);
    }

    #[test]
    fn empty_snapshot_is_balanced() {
        let snap = LayoutSnapshot {
            selector: "#x".into(),
            columns: Vec::new(),
        };
        assert_eq!(snap.imbalance(), 0);
        assert_eq!(snap.item_count(), 0);
    }

    #[test]
    fn json_shape() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["selector"], ".waterfall__container");
        assert_eq!(value["columns"][1]["order"], 2);
        assert_eq!(value["columns"][1]["items"], serde_json::json!([6, 5]));
    }
}
