mod common;

use common::*;
use fhir_model_r5::*;

fn label(name: &str, index: Option<usize>) -> String {
    match index {
        Some(i) => format!("{name}[{i}]"),
        None => name.to_string(),
    }
}

/// Collects traversal events as readable strings, with optional gates.
#[derive(Default)]
struct EventLog {
    events: Vec<String>,
    prune_field: Option<&'static str>,
    skip_type: Option<&'static str>,
}

impl Visitor for EventLog {
    fn pre_visit(&mut self, node: &dyn Visitable) -> bool {
        self.skip_type != Some(node.type_name())
    }

    fn visit_start(&mut self, name: &str, index: Option<usize>, node: &dyn Visitable) {
        self.events
            .push(format!("start {} ({})", label(name, index), node.type_name()));
    }

    fn visit(&mut self, name: &str, _index: Option<usize>, _node: &dyn Visitable) -> bool {
        self.prune_field != Some(name)
    }

    fn visit_end(&mut self, name: &str, index: Option<usize>, _node: &dyn Visitable) {
        self.events.push(format!("end {}", label(name, index)));
    }

    fn visit_list_start(&mut self, name: &str, len: usize) {
        self.events.push(format!("list+ {name} ({len})"));
    }

    fn visit_list_end(&mut self, name: &str, len: usize) {
        self.events.push(format!("list- {name} ({len})"));
    }

    fn visit_str(&mut self, name: &str, index: Option<usize>, value: &str) {
        self.events.push(format!("str {} = {value}", label(name, index)));
    }

    fn visit_bool(&mut self, name: &str, index: Option<usize>, value: bool) {
        self.events.push(format!("bool {} = {value}", label(name, index)));
    }
}

#[test]
fn test_fields_are_visited_in_declaration_order() {
    let team = CareTeam::builder()
        .with_id("t-1")
        .with_status(CareTeamStatus::Active)
        .with_name("Night shift")
        .with_subject(reference_to("Patient/p-1"))
        .build()
        .unwrap();

    let mut log = EventLog::default();
    team.accept("CareTeam", None, &mut log);

    assert_eq!(
        log.events,
        vec![
            "start CareTeam (CareTeam)",
            "str id = t-1",
            "str status = active",
            "str name = Night shift",
            "start subject (Reference)",
            "str reference = Patient/p-1",
            "end subject",
            "end CareTeam",
        ]
    );
}

#[test]
fn test_list_fields_wrap_their_items_with_indexes() {
    let endpoint = Endpoint::builder()
        .add_header("Authorization: Bearer <redacted>")
        .add_header("Prefer: return=minimal")
        .build_unvalidated();

    let mut log = EventLog::default();
    endpoint.accept("Endpoint", None, &mut log);

    assert_eq!(
        log.events,
        vec![
            "start Endpoint (Endpoint)",
            "list+ header (2)",
            "str header[0] = Authorization: Bearer <redacted>",
            "str header[1] = Prefer: return=minimal",
            "list- header (2)",
            "end Endpoint",
        ]
    );
}

#[test]
fn test_visit_gate_prunes_children_but_keeps_the_frame() {
    let team = home_care_team();
    let mut log = EventLog {
        prune_field: Some("participant"),
        ..EventLog::default()
    };
    team.accept("CareTeam", None, &mut log);

    assert!(
        log.events
            .iter()
            .any(|e| e == "start participant[0] (CareTeam.Participant)")
    );
    assert!(log.events.iter().any(|e| e == "end participant[0]"));
    // Nothing below the pruned frame leaks out.
    assert!(!log.events.iter().any(|e| e.contains("member")));
    assert!(!log.events.iter().any(|e| e.contains("coding")));
}

#[test]
fn test_pre_visit_gate_skips_a_node_entirely() {
    let team = CareTeam::builder()
        .with_status(CareTeamStatus::Active)
        .with_subject(reference_to("Patient/p-1"))
        .build()
        .unwrap();

    let mut log = EventLog {
        skip_type: Some("Reference"),
        ..EventLog::default()
    };
    team.accept("CareTeam", None, &mut log);

    assert!(!log.events.iter().any(|e| e.contains("subject")));
    assert!(log.events.iter().any(|e| e == "str status = active"));
}

#[test]
fn test_any_resource_traverses_like_the_wrapped_resource() {
    let team = home_care_team();
    let mut direct = EventLog::default();
    team.accept("CareTeam", None, &mut direct);

    let any: AnyResource = team.into();
    let mut wrapped = EventLog::default();
    any.accept("CareTeam", None, &mut wrapped);

    assert_eq!(wrapped.events, direct.events);
}

#[test]
fn test_has_children_reflects_populated_fields() {
    let empty = Reference::builder().build_unvalidated();
    assert!(!empty.has_children());

    let populated = reference_to("Patient/p-1");
    assert!(populated.has_children());
}
