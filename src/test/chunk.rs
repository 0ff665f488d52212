use crate::net::{DeviceId, Network};

fn line_route(net: &mut Network, hops: usize) -> Vec<DeviceId> {
    (0..hops).map(|i| net.add_npu(format!("npu{i}"))).collect()
}

#[test]
fn chunk_cursor_walks_its_route() {
    let mut net = Network::default();
    let route = line_route(&mut net, 3);

    let chunk = net.make_chunk(100, route.clone(), None);
    assert_eq!(chunk.src(), route[0]);
    assert_eq!(chunk.dest(), route[2]);
    assert_eq!(chunk.at(), route[0]);
    assert!(chunk.has_next());
    assert_eq!(chunk.next(), Some(route[1]));

    let chunk = chunk.advance();
    assert_eq!(chunk.at(), route[1]);
    assert!(chunk.has_next());

    let chunk = chunk.advance();
    assert_eq!(chunk.at(), route[2]);
    assert!(!chunk.has_next());
    assert_eq!(chunk.next(), None);
}

#[test]
fn chunk_ids_are_unique_per_network() {
    let mut net = Network::default();
    let route = line_route(&mut net, 2);

    let a = net.make_chunk(10, route.clone(), None);
    let b = net.make_chunk(10, route, None);
    assert_ne!(a.id, b.id);
}

#[test]
#[should_panic(expected = "route must not be empty")]
fn empty_route_is_rejected() {
    let mut net = Network::default();
    let _ = net.make_chunk(10, Vec::new(), None);
}

#[test]
#[should_panic(expected = "size must be positive")]
fn zero_size_is_rejected() {
    let mut net = Network::default();
    let route = line_route(&mut net, 2);
    let _ = net.make_chunk(0, route, None);
}
