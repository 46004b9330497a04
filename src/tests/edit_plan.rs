use super::{EditPlan, Operation};
use crate::error::{IndexKind, StoreError};
use crate::section::{Direction, Field, FieldPosition, Section};
use crate::store::DocumentStore;
use serde_json::json;

fn plan_from(value: serde_json::Value) -> EditPlan {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_parse_tagged_operations() {
    let plan = plan_from(json!({
        "operations": [
            {"op": "changeColumnCount", "sectionIndex": 0, "count": 2},
            {"op": "addField", "field": {"id": "f1", "type": "text", "sectionIndex": 0, "columnIndex": 1}},
            {"op": "shiftSection", "sectionIndex": 1, "direction": "up"},
            {"op": "deleteField", "position": {"sectionIndex": 0, "columnIndex": 1, "fieldIndex": 0}},
            {"op": "resetSections"}
        ]
    }));

    assert_eq!(
        plan.operations,
        [
            Operation::ChangeColumnCount {
                section_index: 0,
                count: 2
            },
            Operation::AddField {
                field: Field::new("f1", "text").in_column(0, 1)
            },
            Operation::ShiftSection {
                section_index: 1,
                direction: Direction::Up
            },
            Operation::DeleteField {
                position: FieldPosition::new(0, 1, 0)
            },
            Operation::ResetSections,
        ]
    );
}

#[test]
fn test_apply_builds_two_column_section() {
    let mut store = DocumentStore::new(vec![Section::new("Form")]);
    let plan = plan_from(json!({
        "operations": [
            {"op": "changeColumnCount", "sectionIndex": 0, "count": 2},
            {"op": "addField", "field": {"id": "f1", "type": "text", "sectionIndex": 0, "columnIndex": 1}},
            {"op": "modifyField", "field": {
                "id": "f1", "type": "text",
                "sectionIndex": 0, "columnIndex": 1, "fieldIndex": 0,
                "label": "Name"
            }},
            {"op": "addSection", "section": {"name": "Extra"}},
            {"op": "setActiveSection", "index": 1}
        ]
    }));

    let applied = plan.apply(&mut store).unwrap();

    assert_eq!(applied, 5);
    assert_eq!(store.sections().len(), 2);
    assert_eq!(store.active_section_index(), 1);
    let columns = store.sections()[0].fields.as_ref().unwrap();
    assert!(columns[0].is_empty());
    assert_eq!(columns[1][0].config["label"], json!("Name"));
}

#[test]
fn test_apply_stops_at_first_failure() {
    let mut store = DocumentStore::new(vec![Section::new("Form")]);
    let plan = EditPlan {
        operations: vec![
            Operation::AddSection {
                section: Section::new("Second"),
            },
            Operation::DeleteSection { section_index: 4 },
            Operation::ResetSections,
        ],
    };

    let err = plan.apply(&mut store).unwrap_err();

    assert_eq!(err.step, 1);
    assert_eq!(err.operation, "deleteSection");
    assert_eq!(
        err.source,
        StoreError::InvalidIndex {
            kind: IndexKind::Section,
            index: 4,
            len: 2
        }
    );
    // The step before the failure stays applied, the one after never runs
    assert_eq!(store.sections().len(), 2);
    assert_eq!(store.sections()[1].name, "Second");
}

#[test]
fn test_template_round_trip_through_plan() {
    let mut store = DocumentStore::new(vec![Section::new("A"), Section::new("B")]);
    let plan = EditPlan {
        operations: vec![
            Operation::ResetSections,
            Operation::ModifySection {
                section: Section::new("Welcome"),
            },
            Operation::UseTemplate,
            Operation::ShiftSection {
                section_index: 0,
                direction: Direction::Down,
            },
        ],
    };

    plan.apply(&mut store).unwrap();

    let names: Vec<&str> = store.sections().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["B", "A"]);
}

#[test]
fn test_plan_serialises_with_op_tag() {
    let plan = EditPlan {
        operations: vec![Operation::ShiftField {
            position: FieldPosition::new(0, 0, 1),
            direction: Direction::Down,
        }],
    };

    assert_eq!(
        serde_json::to_value(&plan).unwrap(),
        json!({
            "operations": [{
                "op": "shiftField",
                "position": {"sectionIndex": 0, "columnIndex": 0, "fieldIndex": 1},
                "direction": "down"
            }]
        })
    );
}

#[test]
fn test_operation_names_match_tags() {
    let ops = [
        Operation::SetActiveSection { index: 0 },
        Operation::UseTemplate,
        Operation::ChangeColumnCount {
            section_index: 0,
            count: 1,
        },
    ];

    for op in ops {
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["op"], json!(op.name()));
    }
}
