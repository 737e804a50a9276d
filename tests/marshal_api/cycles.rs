//! Cycle safety
//!
//! Back-references to an ancestor are truncated to an empty nested value;
//! shared acyclic references are written in full.

use crate::fixtures::node;
use strata_client::prelude::*;

fn labelled(label: &str) -> SharedObject {
    Instance::new(&node())
        .with("Label", label)
        .unwrap()
        .into_shared()
}

/// Break parent links so the test graph can be freed
fn unlink(nodes: &[&SharedObject]) {
    for n in nodes {
        n.set("Parent", FieldValue::Null).unwrap();
        n.set("Children", FieldValue::Null).unwrap();
    }
}

#[test]
fn parent_child_back_reference_terminates() {
    let parent = labelled("root");
    let child = labelled("leaf");
    child.set("Parent", parent.clone()).unwrap();
    parent.set("Children", FieldValue::list([child.clone()])).unwrap();

    let marshaller = Marshaller::new();

    let bag = marshaller.flatten_object(&parent).unwrap();
    let children = bag.get("Children").and_then(Value::as_array).unwrap();
    let leaf = children[0].as_object().unwrap();
    assert_eq!(leaf.get("Label"), Some(&Value::from("leaf")));
    assert_eq!(leaf.get("Parent"), Some(&Value::Object(PropertyBag::new())));

    let props = marshaller.batch_properties_object(&parent).unwrap();
    let leaf = &props.object_array("Children").unwrap()[0];
    assert_eq!(leaf.non_ref_properties.get("Label"), Some(&Value::from("leaf")));
    assert_eq!(
        leaf.non_ref_properties.get("Parent"),
        Some(&Value::Object(PropertyBag::new()))
    );

    unlink(&[&parent, &child]);
}

#[test]
fn self_reference_from_plain_instance_terminates() {
    let a = labelled("a");
    a.set("Parent", a.clone()).unwrap();

    // the root is not itself on the path, so one extra level is written
    let root = a.read().clone();
    let bag = Marshaller::new().flatten(&root).unwrap();
    let parent = bag.get("Parent").and_then(Value::as_object).unwrap();
    assert_eq!(parent.get("Label"), Some(&Value::from("a")));
    assert_eq!(parent.get("Parent"), Some(&Value::Object(PropertyBag::new())));

    drop(root);
    unlink(&[&a]);
}

#[test]
fn diamond_is_not_truncated() {
    let shared = labelled("shared");
    let left = labelled("left");
    let right = labelled("right");
    left.set("Children", FieldValue::list([shared.clone()])).unwrap();
    right.set("Children", FieldValue::list([shared.clone()])).unwrap();
    let top = labelled("top");
    top.set("Children", FieldValue::list([left.clone(), right.clone()]))
        .unwrap();

    let bag = Marshaller::new().flatten_object(&top).unwrap();
    let branches = bag.get("Children").and_then(Value::as_array).unwrap();
    for branch in branches {
        let leaf = branch.as_object().unwrap().get("Children").and_then(Value::as_array).unwrap();
        assert_eq!(
            leaf[0].as_object().and_then(|o| o.get("Label")),
            Some(&Value::from("shared"))
        );
    }

    unlink(&[&top, &left, &right]);
}

#[test]
fn long_cycle_is_truncated_at_the_repeat() {
    let nodes: Vec<SharedObject> = (0..5).map(|i| labelled(&format!("n{}", i))).collect();
    for i in 0..5 {
        nodes[i].set("Parent", nodes[(i + 1) % 5].clone()).unwrap();
    }

    let bag = Marshaller::new().flatten_object(&nodes[0]).unwrap();
    let mut depth = 0;
    let mut current = &bag;
    while let Some(next) = current.get("Parent").and_then(Value::as_object) {
        if next.is_empty() {
            break;
        }
        depth += 1;
        current = next;
    }
    assert_eq!(depth, 4);

    unlink(&nodes.iter().collect::<Vec<_>>());
}

#[test]
fn concurrent_serialization_of_one_graph() {
    let parent = labelled("root");
    let child = labelled("leaf");
    child.set("Parent", parent.clone()).unwrap();
    parent.set("Children", FieldValue::list([child.clone()])).unwrap();

    let marshaller = Marshaller::new();
    let expected = marshaller.flatten_object(&parent).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| marshaller.flatten_object(&parent).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });

    unlink(&[&parent, &child]);
}
