//! The order aggregation pass.
//!
//! Groups the flat production-record collection for one order into per-worker,
//! per-position, per-product-type, and per-process views. A single linear
//! pass over the filtered records; no side effects, safe to call from any
//! number of threads.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::error::CoreError;
use crate::parse::digit_count;
use crate::record::{Position, ProductionRecord};

/// Per-worker rollup within one order.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerSummary {
    pub record_count: u64,
    pub total_pieces: u64,
    pub total_stitches: u64,
    /// Distinct positions this worker touched, in first-seen order.
    pub positions: IndexSet<Position>,
    /// Date of the first record processed for this worker. Deliberately
    /// never overwritten by later records (which may predate it).
    pub date: String,
}

/// One record's appearance under a position heading.
#[derive(Debug, Clone, Serialize)]
pub struct PositionEntry {
    pub worker: String,
    pub quantity: String,
    pub stitch_count: String,
    pub date: String,
    pub embroidery_applied: bool,
}

/// Record-order position listings for the three positions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PositionBreakdown {
    pub front: Vec<PositionEntry>,
    pub side: Vec<PositionEntry>,
    pub back: Vec<PositionEntry>,
}

/// Distinct workers per product type, in first-occurrence order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductTypeBreakdown {
    pub cap: IndexSet<String>,
    pub bowl: IndexSet<String>,
    pub visor: IndexSet<String>,
}

/// Distinct workers per process, in first-occurrence order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessBreakdown {
    pub embroidery: IndexSet<String>,
    pub paint_application: IndexSet<String>,
    pub engraving_application: IndexSet<String>,
}

/// Order-wide numeric totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderTotals {
    pub total_pieces: u64,
    pub total_stitches: u64,
}

/// The full aggregation result for one order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub order_id: String,
    pub record_count: u64,
    pub by_worker: IndexMap<String, WorkerSummary>,
    pub by_position: PositionBreakdown,
    pub by_product_type: ProductTypeBreakdown,
    pub by_process: ProcessBreakdown,
    pub summary: OrderTotals,
}

/// Aggregate all records of `order_id` into an [`OrderSummary`].
///
/// Filtering uses exact string equality on the order id. Fails with
/// [`CoreError::NotFound`] when no record matches; any other input shape
/// produces a summary. Quantity and stitch-count fields go through
/// [`digit_count`], so malformed values contribute zero rather than erroring.
pub fn summarize_order(
    records: &[ProductionRecord],
    order_id: &str,
) -> Result<OrderSummary, CoreError> {
    let matched: Vec<&ProductionRecord> = records
        .iter()
        .filter(|r| r.order_id == order_id)
        .collect();

    if matched.is_empty() {
        return Err(CoreError::not_found("Order", order_id));
    }

    let mut by_worker: IndexMap<String, WorkerSummary> = IndexMap::new();
    let mut by_position = PositionBreakdown::default();
    let mut by_product_type = ProductTypeBreakdown::default();
    let mut by_process = ProcessBreakdown::default();
    let mut totals = OrderTotals::default();

    for record in &matched {
        let worker = record.worker_or_unknown().to_string();
        let pieces = digit_count(&record.quantity);
        let stitches = digit_count(&record.stitch_count);

        totals.total_pieces += pieces;
        totals.total_stitches += stitches;

        let entry = by_worker
            .entry(worker.clone())
            .or_insert_with(|| WorkerSummary {
                record_count: 0,
                total_pieces: 0,
                total_stitches: 0,
                positions: IndexSet::new(),
                date: record.date.clone(),
            });
        entry.record_count += 1;
        entry.total_pieces += pieces;
        entry.total_stitches += stitches;

        for position in Position::ALL {
            if !position.is_set(record) {
                continue;
            }
            entry.positions.insert(position);

            let item = PositionEntry {
                worker: worker.clone(),
                quantity: record.quantity.clone(),
                stitch_count: record.stitch_count.clone(),
                date: record.date.clone(),
                embroidery_applied: record.embroidery,
            };
            match position {
                Position::Front => by_position.front.push(item),
                Position::Side => by_position.side.push(item),
                Position::Back => by_position.back.push(item),
            }
        }

        if record.cap {
            by_product_type.cap.insert(worker.clone());
        }
        if record.bowl {
            by_product_type.bowl.insert(worker.clone());
        }
        if record.visor {
            by_product_type.visor.insert(worker.clone());
        }

        if record.embroidery {
            by_process.embroidery.insert(worker.clone());
        }
        if record.paint_application {
            by_process.paint_application.insert(worker.clone());
        }
        if record.engraving_application {
            by_process.engraving_application.insert(worker.clone());
        }
    }

    Ok(OrderSummary {
        order_id: order_id.to_string(),
        record_count: matched.len() as u64,
        by_worker,
        by_position,
        by_product_type,
        by_process,
        summary: totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ProductionRecord, RecordInput};
    use assert_matches::assert_matches;
    use chrono::Utc;

    /// Build a record with the given order, worker, counts, and a closure
    /// that flips whatever flags the test cares about.
    fn record(
        id: i64,
        order_id: &str,
        worker: &str,
        quantity: &str,
        stitches: &str,
        flags: impl FnOnce(&mut RecordInput),
    ) -> ProductionRecord {
        let mut input = RecordInput {
            order_id: order_id.to_string(),
            worker: worker.to_string(),
            date: format!("2026-08-{:02}", id),
            quantity: quantity.to_string(),
            stitch_count: stitches.to_string(),
            ..RecordInput::default()
        };
        flags(&mut input);
        ProductionRecord::from_input(id, Utc::now(), input)
    }

    #[test]
    fn record_count_matches_exact_order_filter() {
        let records = vec![
            record(1, "A1", "Ana", "1", "1", |_| {}),
            record(2, "A1", "Rui", "1", "1", |_| {}),
            record(3, "A10", "Ana", "1", "1", |_| {}),
            record(4, "a1", "Ana", "1", "1", |_| {}),
        ];

        let summary = summarize_order(&records, "A1").unwrap();
        // Exact equality: neither "A10" nor "a1" counts.
        assert_eq!(summary.record_count, 2);
    }

    #[test]
    fn totals_use_digit_extraction() {
        let records = vec![
            record(1, "A1", "Ana", "7pcs", "1.200", |_| {}),
            record(2, "A1", "Ana", "N/A", "300", |_| {}),
        ];

        let summary = summarize_order(&records, "A1").unwrap();
        assert_eq!(summary.summary.total_pieces, 7);
        assert_eq!(summary.summary.total_stitches, 1500);
    }

    #[test]
    fn missing_order_is_not_found() {
        let records = vec![record(1, "A1", "Ana", "1", "1", |_| {})];
        let result = summarize_order(&records, "B9");
        assert_matches!(result, Err(CoreError::NotFound { entity: "Order", .. }));
    }

    #[test]
    fn empty_record_set_is_not_found() {
        let result = summarize_order(&[], "A1");
        assert!(result.is_err());
    }

    #[test]
    fn per_worker_rollup_scenario() {
        // The worked scenario from the reporting requirements: two records
        // for Ana on order A1, one front and one side.
        let records = vec![
            record(1, "A1", "Ana", "10", "500", |f| f.front = true),
            record(2, "A1", "Ana", "5", "200", |f| f.side = true),
        ];

        let summary = summarize_order(&records, "A1").unwrap();
        let ana = &summary.by_worker["Ana"];
        assert_eq!(ana.record_count, 2);
        assert_eq!(ana.total_pieces, 15);
        assert_eq!(ana.total_stitches, 700);
        assert!(ana.positions.contains(&Position::Front));
        assert!(ana.positions.contains(&Position::Side));
        assert!(!ana.positions.contains(&Position::Back));

        assert_eq!(summary.summary.total_pieces, 15);
        assert_eq!(summary.summary.total_stitches, 700);
    }

    #[test]
    fn worker_date_is_first_record_and_never_overwritten() {
        let records = vec![
            record(9, "A1", "Ana", "1", "1", |_| {}),
            record(2, "A1", "Ana", "1", "1", |_| {}),
        ];

        let summary = summarize_order(&records, "A1").unwrap();
        // Record 9 is processed first, so its date sticks even though
        // record 2's date string sorts earlier.
        assert_eq!(summary.by_worker["Ana"].date, "2026-08-09");
    }

    #[test]
    fn product_type_workers_are_deduplicated() {
        let records = vec![
            record(1, "A1", "Ana", "1", "1", |f| f.cap = true),
            record(2, "A1", "Ana", "1", "1", |f| f.cap = true),
            record(3, "A1", "Rui", "1", "1", |f| f.cap = true),
        ];

        let summary = summarize_order(&records, "A1").unwrap();
        let cap: Vec<&String> = summary.by_product_type.cap.iter().collect();
        assert_eq!(cap, ["Ana", "Rui"], "each worker once, first-seen order");
    }

    #[test]
    fn position_entries_keep_record_order_and_raw_values() {
        let records = vec![
            record(1, "A1", "Ana", "10 pcs", "500", |f| {
                f.front = true;
                f.embroidery = true;
            }),
            record(2, "A1", "Rui", "5", "200", |f| f.front = true),
        ];

        let summary = summarize_order(&records, "A1").unwrap();
        assert_eq!(summary.by_position.front.len(), 2);
        assert_eq!(summary.by_position.front[0].worker, "Ana");
        // Raw strings are preserved in the listing, not the parsed values.
        assert_eq!(summary.by_position.front[0].quantity, "10 pcs");
        assert!(summary.by_position.front[0].embroidery_applied);
        assert!(!summary.by_position.front[1].embroidery_applied);
        assert!(summary.by_position.side.is_empty());
    }

    #[test]
    fn process_breakdown_collects_distinct_workers() {
        let records = vec![
            record(1, "A1", "Ana", "1", "1", |f| f.paint_application = true),
            record(2, "A1", "Rui", "1", "1", |f| f.engraving_application = true),
            record(3, "A1", "Ana", "1", "1", |f| f.paint_application = true),
        ];

        let summary = summarize_order(&records, "A1").unwrap();
        assert_eq!(summary.by_process.paint_application.len(), 1);
        assert_eq!(summary.by_process.engraving_application.len(), 1);
        assert!(summary.by_process.embroidery.is_empty());
    }

    #[test]
    fn empty_worker_uses_sentinel() {
        let records = vec![record(1, "A1", "   ", "3", "30", |_| {})];
        let summary = summarize_order(&records, "A1").unwrap();
        assert!(summary.by_worker.contains_key("Unknown"));
        assert_eq!(summary.by_worker["Unknown"].total_pieces, 3);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = vec![
            record(1, "A1", "Ana", "10", "500", |f| f.front = true),
            record(2, "A1", "Rui", "5", "200", |f| f.cap = true),
        ];

        let first = summarize_order(&records, "A1").unwrap();
        let second = summarize_order(&records, "A1").unwrap();
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }
}
