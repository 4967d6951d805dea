//! Unit tests for sw-table.

#[cfg(test)]
mod helpers {
    use chrono::NaiveDate;

    use sw_core::Timestamp;

    pub fn t(h: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }
}

// ── Rounding ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod round {
    use crate::{format_value, round_to};

    #[test]
    fn six_decimals() {
        assert_eq!(format_value(Some(1.23456789), 6), "1.234568");
        assert_eq!(round_to(1.23456789, 6), 1.234568);
    }

    #[test]
    fn ties_follow_binary_value() {
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-0.125, 2), -0.13);
        assert_eq!(round_to(2.675, 2), 2.68);
        assert_eq!(round_to(1.005, 2), 1.0);
        assert_eq!(format_value(Some(1.005), 2), "1");
    }

    #[test]
    fn shortest_form() {
        assert_eq!(format_value(Some(2.0), 6), "2");
        assert_eq!(format_value(Some(0.1), 6), "0.1");
        assert_eq!(format_value(Some(-3.5), 0), "-4");
    }

    #[test]
    fn zero_decimals_and_negative_zero() {
        assert_eq!(format_value(Some(12.49), 0), "12");
        assert_eq!(format_value(Some(-0.0000001), 6), "0");
    }

    #[test]
    fn missing_and_non_finite_are_blank() {
        assert_eq!(format_value(None, 6), "");
        assert_eq!(format_value(Some(f64::NAN), 6), "");
        assert_eq!(format_value(Some(f64::INFINITY), 6), "");
    }

    #[test]
    fn huge_values_unchanged() {
        assert_eq!(round_to(1e300, 6), 1e300);
        assert_eq!(round_to(123_456_789_012.345_67, 15), 123_456_789_012.345_67);
    }
}

// ── EntityTable ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod table {
    use sw_core::{EntityId, EntityKind};

    use super::helpers::t;
    use crate::{EntityTable, TableError, TableRow};

    fn table() -> EntityTable {
        EntityTable::new(EntityKind::Node, vec!["head".into(), "total_inflow".into()])
    }

    #[test]
    fn push_and_lookup() {
        let mut tb = table();
        tb.push(TableRow::new("N1", t(0), vec![Some(1.0), Some(0.5)])).unwrap();
        tb.push(TableRow::new("N1", t(1), vec![Some(2.0), None])).unwrap();
        assert_eq!(tb.len(), 2);
        assert_eq!(tb.column_index("total_inflow"), Some(1));
        assert_eq!(tb.column_index("flow"), None);
        let present: Vec<_> = tb.present(1).collect();
        assert_eq!(present, [(&EntityId::from("N1"), t(0), 0.5)]);
    }

    #[test]
    fn rejects_duplicate_key() {
        let mut tb = table();
        tb.push(TableRow::new("N1", t(0), vec![Some(1.0), None])).unwrap();
        let err = tb.push(TableRow::new("N1", t(0), vec![Some(9.0), None])).unwrap_err();
        assert!(matches!(err, TableError::DuplicateRow { .. }));
        assert_eq!(tb.len(), 1);
        // Same time, different id is fine.
        tb.push(TableRow::new("N2", t(0), vec![None, None])).unwrap();
    }

    #[test]
    fn rejects_wrong_arity() {
        let mut tb = table();
        let err = tb.push(TableRow::new("N1", t(0), vec![Some(1.0)])).unwrap_err();
        assert!(matches!(err, TableError::ArityMismatch { expected: 2, got: 1 }));
    }

    #[test]
    fn nan_stored_as_missing() {
        let mut tb = table();
        tb.push(TableRow::new("N1", t(0), vec![Some(f64::NAN), Some(1.0)])).unwrap();
        assert_eq!(tb.rows()[0].values, [None, Some(1.0)]);
    }

    #[test]
    fn require_column_names_kind() {
        let err = table().require_column("flow").unwrap_err();
        assert_eq!(err.to_string(), "node table has no `flow` column");
    }

    #[test]
    fn ids_first_seen_order() {
        let mut tb = table();
        for (id, h) in [("N2", 0), ("N1", 0), ("N2", 1)] {
            tb.push(TableRow::new(id, t(h), vec![None, None])).unwrap();
        }
        assert_eq!(tb.ids(), [&EntityId::from("N2"), &EntityId::from("N1")]);
    }

    #[test]
    fn points_sorted_by_time() {
        let mut tb = table();
        tb.push(TableRow::new("N1", t(2), vec![Some(3.0), None])).unwrap();
        tb.push(TableRow::new("N1", t(0), vec![Some(1.0), None])).unwrap();
        tb.push(TableRow::new("N1", t(1), vec![None, None])).unwrap();
        assert_eq!(tb.points(&EntityId::from("N1"), 0), [(t(0), 1.0), (t(2), 3.0)]);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use sw_core::{EntityId, EntityKind};

    use super::helpers::t;
    use crate::{EntityTableBuilder, TableError};

    #[test]
    fn folds_by_timestamp() {
        let n1 = EntityId::from("N1");
        let mut b = EntityTableBuilder::new(EntityKind::Node, vec!["head".into(), "depth".into()]);
        b.add_series(&n1, 0, [(t(0), 1.0), (t(1), 2.0)]).unwrap();
        // Different grid: t(1) shared, t(2) new.
        b.add_series(&n1, 1, [(t(2), 0.3), (t(1), 0.2)]).unwrap();
        let tb = b.build().unwrap();

        let rows: Vec<_> = tb.rows().iter().map(|r| (r.time, r.values.clone())).collect();
        assert_eq!(
            rows,
            [
                (t(0), vec![Some(1.0), None]),
                (t(1), vec![Some(2.0), Some(0.2)]),
                (t(2), vec![None, Some(0.3)]),
            ]
        );
    }

    #[test]
    fn entity_order_is_insertion_order() {
        let mut b = EntityTableBuilder::new(EntityKind::Link, vec!["flow".into()]);
        let (c2, c1) = (EntityId::from("C2"), EntityId::from("C1"));
        b.add_entity(&c2);
        b.add_series(&c1, 0, [(t(0), 1.0)]).unwrap();
        b.add_series(&c2, 0, [(t(0), 2.0)]).unwrap();
        let tb = b.build().unwrap();
        assert_eq!(tb.ids(), [&c2, &c1]);
        assert_eq!(tb.kind(), EntityKind::Link);
    }

    #[test]
    fn column_out_of_range() {
        let mut b = EntityTableBuilder::new(EntityKind::Link, vec!["flow".into()]);
        let err = b.add_series(&EntityId::from("C1"), 1, [(t(0), 1.0)]).unwrap_err();
        assert!(matches!(err, TableError::ColumnIndex { index: 1, count: 1 }));
    }

    #[test]
    fn entity_without_values_has_no_rows() {
        let mut b = EntityTableBuilder::new(EntityKind::Node, vec!["head".into()]);
        b.add_entity(&EntityId::from("N1"));
        assert!(b.build().unwrap().is_empty());
    }
}

// ── ComparisonTable ───────────────────────────────────────────────────────────

#[cfg(test)]
mod comparison {
    use sw_core::{EntityId, EntityKind};

    use super::helpers::t;
    use crate::{ComparisonRow, ComparisonTable};

    fn row(id: &str, h: u32, a: f64, b: f64) -> ComparisonRow {
        ComparisonRow { id: EntityId::from(id), time: t(h), sim1: a, sim2: b }
    }

    #[test]
    fn sorted_on_construction() {
        let tb = ComparisonTable::new(
            EntityKind::Node,
            "head",
            vec![row("N2", 0, 1.0, 1.0), row("N1", 1, 2.0, 2.5), row("N1", 0, 1.0, 1.5)],
        );
        let keys: Vec<_> = tb.rows().iter().map(|r| (r.id.as_str(), r.time)).collect();
        assert_eq!(keys, [("N1", t(0)), ("N1", t(1)), ("N2", t(0))]);
    }

    #[test]
    fn headers() {
        let tb = ComparisonTable::new(EntityKind::Link, "flow", vec![]);
        assert_eq!(tb.headers(), ["id", "time", "flow_sim1", "flow_sim2"]);
        assert!(tb.is_empty());
    }

    #[test]
    fn per_entity_slices() {
        let tb = ComparisonTable::new(
            EntityKind::Node,
            "head",
            vec![row("B", 0, 1.0, 1.0), row("A", 0, 1.0, 1.0), row("B", 1, 2.0, 2.0), row("C", 0, 0.0, 0.0)],
        );
        assert_eq!(tb.ids(), [&EntityId::from("A"), &EntityId::from("B"), &EntityId::from("C")]);
        let b = tb.rows_for(&EntityId::from("B"));
        assert_eq!(b.len(), 2);
        assert_eq!(b[1].time, t(1));
        assert!(tb.rows_for(&EntityId::from("Z")).is_empty());
    }
}
