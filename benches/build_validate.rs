use criterion::{Criterion, criterion_group, criterion_main};
use fhir_model_r5::*;
use std::hint::black_box;

fn large_care_team() -> CareTeamBuilder {
    let mut builder = CareTeam::builder()
        .with_id("bench-team")
        .with_status(CareTeamStatus::Active)
        .with_name("Benchmark care team")
        .with_subject(
            Reference::builder()
                .with_reference("Patient/bench")
                .build_unvalidated(),
        );

    // A participant roster wide enough to exercise the nested walks.
    for i in 0..100 {
        let role = CodeableConcept::builder()
            .add_coding(
                Coding::builder()
                    .with_system("http://snomed.info/sct")
                    .with_code(format!("22220{i}"))
                    .build_unvalidated(),
            )
            .build_unvalidated();
        builder = builder.add_participant(
            CareTeamParticipant::builder()
                .with_role(role)
                .with_member(
                    Reference::builder()
                        .with_reference(format!("Practitioner/p-{i}"))
                        .build_unvalidated(),
                )
                .build_unvalidated(),
        );
    }

    builder
}

/// Counts frames; keeps the traversal honest without allocating.
#[derive(Default)]
struct NodeCounter {
    nodes: usize,
}

impl Visitor for NodeCounter {
    fn visit_start(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) {
        self.nodes += 1;
    }
}

fn bench_validating_build(c: &mut Criterion) {
    c.bench_function("validating_build", |b| {
        b.iter(|| black_box(large_care_team().build()).unwrap())
    });
}

fn bench_unvalidated_build(c: &mut Criterion) {
    c.bench_function("unvalidated_build", |b| {
        b.iter(|| black_box(large_care_team().build_unvalidated()))
    });
}

fn bench_validation_pass(c: &mut Criterion) {
    let team = large_care_team().build_unvalidated();

    c.bench_function("validation_pass", |b| {
        b.iter(|| black_box(team.validate()))
    });
}

fn bench_value_hash(c: &mut Criterion) {
    let team = large_care_team().build_unvalidated();

    c.bench_function("value_hash_cold", |b| {
        b.iter(|| black_box(team.clone().value_hash()))
    });
    c.bench_function("value_hash_memoized", |b| {
        team.value_hash();
        b.iter(|| black_box(team.value_hash()))
    });
}

fn bench_visitor_walk(c: &mut Criterion) {
    let team = large_care_team().build_unvalidated();

    c.bench_function("visitor_walk", |b| {
        b.iter(|| {
            let mut counter = NodeCounter::default();
            team.accept("CareTeam", None, &mut counter);
            black_box(counter.nodes)
        })
    });
}

criterion_group!(
    benches,
    bench_validating_build,
    bench_unvalidated_build,
    bench_validation_pass,
    bench_value_hash,
    bench_visitor_walk
);
criterion_main!(benches);
