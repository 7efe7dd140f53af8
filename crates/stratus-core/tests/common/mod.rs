use std::path::PathBuf;

use stratus_core::display::ColumnDefinition;
use stratus_core::{compute_diff, Graph, GraphDiff};

/// Path of a file under `tests/testdata`
#[allow(dead_code)]
pub fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

/// Load a fixture graph, panicking on malformed data
#[allow(dead_code)]
pub fn load_graph(name: &str) -> Graph {
    Graph::from_file(testdata(name)).unwrap_or_else(|e| panic!("fixture {}: {}", name, e))
}

/// Three instances in two subnets of two vpcs
#[allow(dead_code)]
pub fn infra_graph() -> Graph {
    load_graph("infra.rdf")
}

/// Three users, two of them with a password usage date
#[allow(dead_code)]
pub fn users_graph() -> Graph {
    load_graph("users.rdf")
}

/// Diff between the local and remote region snapshots
#[allow(dead_code)]
pub fn infra_diff() -> GraphDiff {
    let local = load_graph("local_infra_diff.rdf");
    let remote = load_graph("remote_infra_diff.rdf");
    compute_diff(&local, &remote)
}

/// Instance columns with the public ip under a friendly name
#[allow(dead_code)]
pub fn instance_headers() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("Id"),
        ColumnDefinition::new("Name"),
        ColumnDefinition::new("State"),
        ColumnDefinition::new("Type"),
        ColumnDefinition::new("PublicIp").with_friendly("Public IP"),
    ]
}
