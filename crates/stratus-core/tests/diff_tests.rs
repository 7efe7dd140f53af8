#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{infra_diff, infra_graph, load_graph};
use stratus_core::diff::{compute_diff, render_human_summary, DiffClassification, Relation};
use stratus_core::display::{ColumnDefinition, DisplayOptions, Format};
use stratus_core::graph::{parse_assertions, NodeRef, PropertyValue, ResourceType};

fn instance(id: &str) -> NodeRef {
    NodeRef::new(ResourceType::Instance, id)
}

#[test]
fn test_identical_snapshots() {
    let graph = infra_graph();
    let diff = compute_diff(&graph, &graph.clone());

    assert_eq!(diff.classification(), DiffClassification::Identical);
    assert!(!diff.has_changes());
    assert!(diff.inserted().is_empty());
    assert!(diff.deleted().is_empty());
    assert_eq!(diff.local_digest(), diff.remote_digest());
    assert_eq!(diff.unchanged_relations().len(), 5);
}

#[test]
fn test_inserted_and_deleted_nodes() {
    let diff = infra_diff();

    assert_eq!(diff.classification(), DiffClassification::Changed);
    assert_eq!(
        diff.inserted_nodes(),
        &[
            instance("inst_4"),
            instance("inst_5"),
            instance("inst_6"),
            NodeRef::new(ResourceType::Subnet, "new_subnet"),
        ]
    );
    assert_eq!(diff.deleted_nodes(), &[instance("inst_2")]);
}

#[test]
fn test_modified_properties_carry_both_values() {
    let diff = infra_diff();
    let modified = diff.modified_nodes();
    assert_eq!(modified.len(), 2);

    let inst_1 = &modified[0];
    assert_eq!(inst_1.node, instance("inst_1"));
    assert_eq!(inst_1.changes.len(), 1);
    assert_eq!(inst_1.changes[0].key, "Id");
    assert_eq!(
        inst_1.changes[0].old,
        Some(PropertyValue::Text("inst_1".to_string()))
    );
    assert_eq!(
        inst_1.changes[0].new,
        Some(PropertyValue::Text("new_id".to_string()))
    );

    let vpc_1 = &modified[1];
    assert_eq!(vpc_1.node, NodeRef::new(ResourceType::Vpc, "vpc_1"));
    assert_eq!(vpc_1.changes[0].key, "NewProp");
    assert_eq!(vpc_1.changes[0].new, None);
}

#[test]
fn test_relation_partition() {
    let diff = infra_diff();
    let sub_2 = NodeRef::new(ResourceType::Subnet, "sub_2");

    assert!(diff.deleted_relations().contains(&Relation {
        parent: sub_2.clone(),
        child: instance("inst_2"),
    }));
    assert_eq!(diff.inserted_relations().len(), 4);
    assert_eq!(diff.deleted_relations().len(), 1);
    // region->vpc x2, vpc->subnet x2, subnet->instance x2
    assert_eq!(diff.unchanged_relations().len(), 6);
}

#[test]
fn test_diff_is_antisymmetric() {
    let local = load_graph("local_infra_diff.rdf");
    let remote = load_graph("remote_infra_diff.rdf");
    let forward = compute_diff(&local, &remote);
    let backward = compute_diff(&remote, &local);

    assert_eq!(forward.inserted(), backward.deleted());
    assert_eq!(forward.deleted(), backward.inserted());
    assert_eq!(forward.inserted_nodes(), backward.deleted_nodes());
}

#[test]
fn test_changed_types_sorted() {
    let diff = infra_diff();
    assert_eq!(
        diff.changed_types(),
        vec![ResourceType::Instance, ResourceType::Subnet, ResourceType::Vpc]
    );
}

#[test]
fn test_json_report_omits_graphs() {
    let diff = infra_diff();
    let json = serde_json::to_value(&diff).unwrap();

    assert_eq!(json["classification"], "Changed");
    assert_eq!(json["deleted_nodes"][0]["id"], "inst_2");
    assert_eq!(json["deleted_nodes"][0]["resource_type"], "instance");
    assert!(json.get("local").is_none());
    assert!(json.get("remote").is_none());
}

#[test]
fn test_human_summary_for_fixture() {
    let diff = infra_diff();
    assert_eq!(
        render_human_summary(&diff),
        "4 inserted, 1 deleted, 2 modified (5 relations changed)\n\
         Types affected: instance, subnet, vpc\n"
    );
}

#[test]
fn test_timestamp_literals_compare_exactly() {
    let snapshot = |seen: &str| {
        format!(
            "/instance<inst_1>\t\"has_type\"@[]\t\"/instance\"^^type:text\n\
             /instance<inst_1>\t\"property\"@[]\t\"{{\"Key\":\"Seen\",\"Value\":\"{}\"}}\"^^type:text\n",
            seen
        )
    };
    let local = parse_assertions(&snapshot("2016-12-22T13:13:23+02:00")).unwrap();
    let remote = parse_assertions(&snapshot("2016-12-22T11:13:23Z")).unwrap();

    let diff = compute_diff(&local, &remote);
    assert!(diff.has_changes());
    assert_eq!(diff.modified_nodes().len(), 1);
    let change = &diff.modified_nodes()[0].changes[0];
    assert_eq!(change.key, "Seen");
    assert_eq!(
        change.old.as_ref().map(ToString::to_string).as_deref(),
        Some("2016-12-22T13:13:23+02:00")
    );
    assert_eq!(
        change.new.as_ref().map(ToString::to_string).as_deref(),
        Some("2016-12-22T11:13:23Z")
    );

    let csv = DisplayOptions::new()
        .with_headers(vec![ColumnDefinition::new("Seen")])
        .with_resource_type(ResourceType::Instance)
        .with_format(Format::Csv)
        .build(&local)
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(csv, "Seen\n2016-12-22T13:13:23+02:00");

    assert_eq!(local.to_string(), snapshot("2016-12-22T13:13:23+02:00"));
}
