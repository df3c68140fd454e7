//! Generation Throughput Benchmarks
//!
//! Measures end-to-end generation (ordering, emission, layout) for synthetic
//! services of increasing size, per backend.
//!
//! # Model Sizes
//!
//! - **Small**: 4 operations, each with a request and a response structure
//! - **Medium**: 32 operations
//! - **Large**: 128 operations, every response nesting a list and a map

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Map, Value, json};
use shapegen_codegen::generate;
use shapegen_core::{Backend, GeneratorSettings, ShapeGraph};
use std::hint::black_box;

const NAMESPACE: &str = "bench.synthetic";

// ============================================================================
// Synthetic Models
// ============================================================================

fn shape_id(name: &str) -> String {
    format!("{}#{}", NAMESPACE, name)
}

fn synthetic_model(operations: usize) -> ShapeGraph {
    let mut shapes = Map::new();

    shapes.insert(
        shape_id("Status"),
        json!({
            "type": "string",
            "traits": { "smithy.api#enum": [
                { "value": "ACTIVE", "name": "ACTIVE" },
                { "value": "RETIRED", "name": "RETIRED" }
            ]}
        }),
    );
    shapes.insert(
        shape_id("Entry"),
        json!({
            "type": "structure",
            "members": {
                "key": { "target": "smithy.api#String", "traits": { "smithy.api#required": {} } },
                "weight": { "target": "smithy.api#Float" },
                "payload": { "target": "smithy.api#Blob" },
                "status": { "target": shape_id("Status") }
            }
        }),
    );
    shapes.insert(
        shape_id("EntryList"),
        json!({ "type": "list", "member": { "target": shape_id("Entry") } }),
    );
    shapes.insert(
        shape_id("EntriesByKey"),
        json!({
            "type": "map",
            "key": { "target": "smithy.api#String" },
            "value": { "target": shape_id("EntryList") }
        }),
    );

    let mut operation_refs = Vec::new();
    for i in 0..operations {
        let request = format!("Op{}Request", i);
        let response = format!("Op{}Response", i);

        shapes.insert(
            shape_id(&request),
            json!({
                "type": "structure",
                "members": {
                    "id": { "target": "smithy.api#String", "traits": { "smithy.api#required": {} } },
                    "limit": { "target": "smithy.api#Integer" },
                    "since": { "target": "smithy.api#Timestamp" }
                }
            }),
        );
        shapes.insert(
            shape_id(&response),
            json!({
                "type": "structure",
                "members": {
                    "entries": { "target": shape_id("EntryList") },
                    "index": { "target": shape_id("EntriesByKey") },
                    "total": { "target": "smithy.api#Long" }
                }
            }),
        );
        shapes.insert(
            shape_id(&format!("Op{}", i)),
            json!({
                "type": "operation",
                "input": { "target": shape_id(&request) },
                "output": { "target": shape_id(&response) }
            }),
        );
        operation_refs.push(json!({ "target": shape_id(&format!("Op{}", i)) }));
    }

    shapes.insert(
        shape_id("Synthetic"),
        json!({ "type": "service", "version": "1.0", "operations": operation_refs }),
    );

    let document = json!({ "smithy": "2.0", "shapes": Value::Object(shapes) });
    ShapeGraph::from_json_str(&document.to_string()).unwrap()
}

fn settings(backends: Vec<Backend>) -> GeneratorSettings {
    let mut settings = GeneratorSettings::new(shape_id("Synthetic"));
    settings.generate_client_stubs = true;
    settings.backends = backends;
    settings
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_model_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_all_backends");

    for operations in [4usize, 32, 128] {
        let graph = synthetic_model(operations);
        let settings = settings(Backend::ALL.to_vec());

        group.throughput(Throughput::Elements(operations as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(operations),
            &operations,
            |b, _| b.iter(|| generate(black_box(&graph), black_box(&settings)).unwrap()),
        );
    }

    group.finish();
}

fn bench_per_backend(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_per_backend");
    let graph = synthetic_model(32);

    for backend in Backend::ALL {
        let settings = settings(vec![backend]);

        group.bench_with_input(BenchmarkId::new("backend", backend), &backend, |b, _| {
            b.iter(|| generate(black_box(&graph), black_box(&settings)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_model_size, bench_per_backend);

criterion_main!(benches);
