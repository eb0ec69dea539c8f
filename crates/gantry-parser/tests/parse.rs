use gantry_core::model::ElementKind;
use gantry_parser::{ErrorCode, parse};

#[test]
fn test_simple_package() {
    let source = r#"
        package Vehicle {
            part Engine;
            part Wheel;
        }
    "#;

    let model = parse(source).expect("Failed to parse");

    assert_eq!(model.roots().len(), 1);
    let vehicle = &model.roots()[0];
    assert_eq!(vehicle.kind(), ElementKind::Package);
    assert_eq!(vehicle.name(), "Vehicle");
    assert_eq!(vehicle.children().len(), 2);
    assert_eq!(vehicle.children()[0].id(), "Vehicle::Engine");
    assert_eq!(vehicle.children()[1].id(), "Vehicle::Wheel");
}

#[test]
fn test_light_switch_model() {
    let source = r#"
        package Light {
            part Switch {
                port Power;
                state On;
                state Off;
                transition Off -> On [ pressed ];
            }
        }
    "#;

    let model = parse(source).expect("Failed to parse");

    let light = &model.roots()[0];
    let switch = &light.children()[0];
    assert_eq!(switch.kind(), ElementKind::Part);
    assert_eq!(switch.children().len(), 3);
    assert_eq!(switch.children()[0].kind(), ElementKind::Port);

    // The part owns its port.
    assert_eq!(model.compositions().len(), 1);
    assert_eq!(model.compositions()[0].source(), "Light::Switch");
    assert_eq!(model.compositions()[0].target(), "Light::Switch::Power");

    // The transition resolved against the sibling states.
    assert_eq!(model.transitions().len(), 1);
    let transition = &model.transitions()[0];
    assert!(transition.is_resolved());
    assert_eq!(transition.guard(), Some("pressed"));
    let (from, to) = transition.endpoints().unwrap();
    assert_eq!(from, "Light::Switch::Off");
    assert_eq!(to, "Light::Switch::On");
}

#[test]
fn test_legacy_block_dialect() {
    let source = r#"
        block Component { }
        block Sensor extends Component {
            part reading : Measurement;
        }
        block Measurement { }
    "#;

    let model = parse(source).expect("Failed to parse");

    assert_eq!(model.roots().len(), 3);
    assert!(model.roots().iter().all(|r| r.kind() == ElementKind::Block));

    assert_eq!(model.inheritances().len(), 1);
    assert_eq!(model.inheritances()[0].source(), "Sensor");
    assert_eq!(model.inheritances()[0].target(), "Component");

    assert_eq!(model.compositions().len(), 1);
    assert_eq!(model.compositions()[0].label(), Some("reading"));
    assert_eq!(model.compositions()[0].target(), "Measurement");
}

#[test]
fn test_mixed_dialects_coexist() {
    let source = r#"
        block Legacy {
            extends Base;
        }
        block Base { }
        part def Modern;
        item def Signal;
    "#;

    let model = parse(source).expect("Failed to parse");

    assert_eq!(model.roots().len(), 4);
    assert_eq!(model.roots()[2].kind(), ElementKind::Part);
    assert_eq!(model.roots()[3].kind(), ElementKind::ItemDef);
    assert_eq!(model.inheritances().len(), 1);
}

#[test]
fn test_port_links_to_item_defs() {
    let source = r#"
        item def Electricity;
        part Lamp {
            port supply : Electricity;
        }
    "#;

    let model = parse(source).expect("Failed to parse");

    assert_eq!(model.port_links().len(), 1);
    assert_eq!(model.port_links()[0].source(), "Lamp::supply");
    assert_eq!(model.port_links()[0].target(), "Electricity");

    let supply = &model.roots()[1].children()[0];
    assert_eq!(supply.display_label(), "supply : Electricity");
}

#[test]
fn test_unknown_statements_are_skipped() {
    let source = r#"
        package Plant {
            part Boiler;
            connect Boiler to Turbine;
            part Turbine;
            import ISO::Units;
        }
        requirement def Safety { text = "unharmed"; }
        part def Condenser;
    "#;

    let model = parse(source).expect("Failed to parse");

    // The connect, import, and requirement statements are foreign to the
    // subset; everything recognized still comes through.
    assert_eq!(model.roots().len(), 2);
    let plant = &model.roots()[0];
    assert_eq!(plant.children().len(), 2);
    assert_eq!(plant.children()[0].name(), "Boiler");
    assert_eq!(plant.children()[1].name(), "Turbine");
    assert_eq!(model.roots()[1].name(), "Condenser");
}

#[test]
fn test_empty_document_is_fatal() {
    for source in ["", "   \n\t  ", "// only a comment\n/* and another */"] {
        let err = parse(source).expect_err("empty input should fail");
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert!(!diag.message().is_empty());
    }
}

#[test]
fn test_unclosed_body_is_fatal() {
    let source = "package Broken {\n    part Inner;\n";

    let err = parse(source).expect_err("unclosed body should fail");
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code(), Some(ErrorCode::E101));

    // The primary label points at the `{` that was never closed.
    let open = source.find('{').unwrap();
    let primary = diag.labels().iter().find(|l| l.is_primary()).unwrap();
    assert_eq!(primary.span().start(), open);

    // A secondary label marks the end of input.
    assert!(diag.labels().iter().any(|l| l.is_secondary()));
}

#[test]
fn test_dangling_transition_is_kept() {
    let source = r#"
        part Controller {
            state Idle;
            transition Idle -> Missing;
        }
    "#;

    let model = parse(source).expect("Failed to parse");

    assert_eq!(model.transitions().len(), 1);
    assert!(!model.transitions()[0].is_resolved());
    assert_eq!(model.transitions()[0].target_name(), "Missing");
}

#[test]
fn test_anonymous_definitions_get_placeholder_names() {
    let source = r#"
        part {
            port Out;
        }
        part { }
    "#;

    let model = parse(source).expect("Failed to parse");

    assert_eq!(model.roots()[0].name(), "part#1");
    assert_eq!(model.roots()[1].name(), "part#2");
    assert_eq!(model.roots()[0].children()[0].id(), "part#1::Out");
}

#[test]
fn test_string_attribute_values() {
    let source = r#"
        package Control {
            label = "Main Controller";
            revision = 3;
        }
    "#;

    let model = parse(source).expect("Failed to parse");

    assert_eq!(
        model.roots()[0].attributes(),
        &[
            ("label".to_string(), "Main Controller".to_string()),
            ("revision".to_string(), "3".to_string()),
        ]
    );
}

#[test]
fn test_state_leaf_versus_state_machine() {
    let source = r#"
        part Door {
            state Locked;
            state Hinge {
                state Open;
                state Closed;
            }
        }
    "#;

    let model = parse(source).expect("Failed to parse");

    let door = &model.roots()[0];
    assert_eq!(door.children()[0].kind(), ElementKind::State);
    assert_eq!(door.children()[1].kind(), ElementKind::StateMachine);
    assert_eq!(door.children()[1].children().len(), 2);
}

#[test]
fn test_parse_is_deterministic() {
    let source = r#"
        package Light {
            part Switch {
                port Power;
                state On;
                state Off;
                transition Off -> On;
            }
        }
        block Fixture { part bulb : Bulb; }
        block Bulb { }
    "#;

    let first = parse(source).expect("Failed to parse");
    let second = parse(source).expect("Failed to parse");

    assert_eq!(first.element_count(), second.element_count());
    assert_eq!(first.compositions().len(), second.compositions().len());
    for (a, b) in first.compositions().iter().zip(second.compositions()) {
        assert_eq!(a.source(), b.source());
        assert_eq!(a.target(), b.target());
    }
}
