use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

use super::*;
use crate::logic::config::RecordPolicy;
use crate::logic::features::FEATURE_COUNT;
use crate::logic::validate::validate;

#[test]
fn test_read_batch_from_bytes() {
    let csv = "a,b,label\n1,2,normal\n3.5,4,ddos\n";
    let batch = read_batch_from_bytes(csv.as_bytes()).unwrap();

    assert_eq!(batch.headers, vec!["a", "b", "label"]);
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.value(1, "a"), Some("3.5"));
    assert_eq!(batch.value(0, "missing"), None);
}

#[test]
fn test_ragged_csv_is_parse_error() {
    let csv = "a,b\n1,2\n3\n";
    let err = read_batch_from_bytes(csv.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), "parse_error");
}

#[test]
fn test_header_only_batch_is_empty() {
    let batch = read_batch_from_bytes(b"a,b\n").unwrap();
    assert!(batch.is_empty());
}

#[test]
fn test_generator_is_deterministic_for_seed() {
    let a = generate(&mut StdRng::seed_from_u64(7), TrafficKind::Portscan, 5);
    let b = generate(&mut StdRng::seed_from_u64(7), TrafficKind::Portscan, 5);
    assert_eq!(a, b);
}

#[test]
fn test_generated_attack_shapes() {
    let mut rng = StdRng::seed_from_u64(42);

    for labelled in generate(&mut rng, TrafficKind::Ddos, 50) {
        let flow = &labelled.flow;
        assert!(flow.flow_packets_per_sec > 500.0);
        assert!(flow.destination_port == 80.0 || flow.destination_port == 443.0);
        assert!(flow.values().iter().all(|v| v.is_finite()));
    }

    for labelled in generate(&mut rng, TrafficKind::Portscan, 50) {
        assert_eq!(labelled.flow.syn_flag_count, 1.0);
    }

    for labelled in generate(&mut rng, TrafficKind::Normal, 50) {
        let flow = &labelled.flow;
        assert!(flow.ack_flag_count >= 1.0);
        assert!(flow.packet_length_variance >= 2_500.0);
    }
}

#[test]
fn test_mixed_proportions() {
    let flows = generate_mixed(&mut StdRng::seed_from_u64(1), 200);
    let count = |kind: TrafficKind| flows.iter().filter(|f| f.kind == kind).count();

    assert_eq!(flows.len(), 200);
    assert_eq!(count(TrafficKind::Normal), 100);
    assert_eq!(count(TrafficKind::Ddos), 50);
    assert_eq!(count(TrafficKind::Portscan), 30);
    assert_eq!(count(TrafficKind::Generic), 20);
}

#[test]
fn test_written_csv_passes_schema_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("combined.csv");
    let flows = generate_mixed(&mut StdRng::seed_from_u64(3), 40);

    write_csv(&path, &flows).unwrap();

    let batch = read_batch_from_path(&path).unwrap();
    assert_eq!(batch.headers.len(), FEATURE_COUNT + 1);
    assert_eq!(batch.headers.last().map(String::as_str), Some(LABEL_COLUMN));
    assert_eq!(batch.value(0, LABEL_COLUMN), Some("normal"));

    let validated = validate(&batch, RecordPolicy::FailFast).unwrap();
    assert_eq!(validated.flows.len(), 40);
    assert_eq!(validated.flows[0].flow, flows[0].flow);
}
