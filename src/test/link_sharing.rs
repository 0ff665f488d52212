use crate::demo::InjectChunk;
use crate::net::{ChunkCallback, DeviceId};
use crate::sim::{EventQueue, EventTime};
use crate::topo::Topology;
use std::sync::{Arc, Mutex};

type FinishLog = Arc<Mutex<Vec<(u32, u64)>>>;

fn record(log: &FinishLog, id: u32) -> Option<ChunkCallback> {
    let log = Arc::clone(log);
    Some(Box::new(move |sim: &mut EventQueue| {
        log.lock().expect("log lock").push((id, sim.now().0));
    }))
}

#[test]
fn solo_transfer_takes_latency_plus_serialization() {
    let mut topo = Topology::fully_connected(2, 10.0, EventTime(7));
    let mut sim = EventQueue::default();
    let log: FinishLog = Arc::new(Mutex::new(Vec::new()));

    let route = topo.route(DeviceId(0), DeviceId(1));
    assert_eq!(route, vec![DeviceId(0), DeviceId(1)]);

    sim.schedule(
        EventTime::ZERO,
        InjectChunk {
            size: 100,
            route,
            on_done: record(&log, 0),
        },
    );
    sim.run(topo.world_mut());

    // 7ns 传播 + 100B / (10B/ns) 串行化
    assert_eq!(&*log.lock().expect("log lock"), &[(0, 17)]);
    assert_eq!(topo.net().stats.completed_chunks, 1);
    assert_eq!(topo.net().stats.completed_bytes, 100);
}

#[test]
fn equal_simultaneous_chunks_finish_together_at_k_times_solo() {
    let mut topo = Topology::fully_connected(2, 10.0, EventTime::ZERO);
    let mut sim = EventQueue::default();
    let log: FinishLog = Arc::new(Mutex::new(Vec::new()));

    for id in 0..4 {
        let route = topo.route(DeviceId(0), DeviceId(1));
        sim.schedule(
            EventTime::ZERO,
            InjectChunk {
                size: 100,
                route,
                on_done: record(&log, id),
            },
        );
    }
    sim.run(topo.world_mut());

    // 4 笔等长传输等分带宽，全部在 4×(100/10) 完成
    let log = log.lock().expect("log lock");
    assert_eq!(log.len(), 4);
    for &(_, finish) in log.iter() {
        assert_eq!(finish, 40);
    }
    assert_eq!(sim.now(), EventTime(40));
}

#[test]
fn staggered_arrival_shares_then_restores_full_rate() {
    let mut topo = Topology::fully_connected(2, 10.0, EventTime::ZERO);
    let mut sim = EventQueue::default();
    let log: FinishLog = Arc::new(Mutex::new(Vec::new()));

    let route = topo.route(DeviceId(0), DeviceId(1));
    // A：100B 于 t=0 注入，独占速率 10
    sim.schedule(
        EventTime::ZERO,
        InjectChunk {
            size: 100,
            route: route.clone(),
            on_done: record(&log, 0),
        },
    );
    // B：50B 于 t=4 注入，此时 A 已传 40B（剩 60）
    sim.schedule(
        EventTime(4),
        InjectChunk {
            size: 50,
            route,
            on_done: record(&log, 1),
        },
    );
    sim.run(topo.world_mut());

    // t=4 起两者各分得速率 5：B 在 4+50/5=14 完成；
    // A 在 [4,14] 再传 50B（剩 10），恢复满速后在 14+10/10=15 完成。
    // 被取代的旧完成事件（A 原定 t=10）必须被静默丢弃。
    assert_eq!(&*log.lock().expect("log lock"), &[(1, 14), (0, 15)]);
    assert_eq!(topo.net().stats.completed_chunks, 2);
    // A 在 t=4 改期的完成事件（t=16）仍会被访问并作为过期事件丢弃
    assert_eq!(sim.now(), EventTime(16));
}

#[test]
fn departure_frees_capacity_for_survivors() {
    let mut topo = Topology::fully_connected(2, 10.0, EventTime::ZERO);
    let mut sim = EventQueue::default();
    let log: FinishLog = Arc::new(Mutex::new(Vec::new()));

    let route = topo.route(DeviceId(0), DeviceId(1));
    sim.schedule(
        EventTime::ZERO,
        InjectChunk {
            size: 100,
            route: route.clone(),
            on_done: record(&log, 0),
        },
    );
    sim.schedule(
        EventTime::ZERO,
        InjectChunk {
            size: 50,
            route,
            on_done: record(&log, 1),
        },
    );
    sim.run(topo.world_mut());

    // 共享速率 5：B 在 t=10 完成；A 剩 50B 恢复满速，t=15 完成
    assert_eq!(&*log.lock().expect("log lock"), &[(1, 10), (0, 15)]);
}

#[test]
fn active_rates_always_sum_to_bandwidth() {
    let mut topo = Topology::fully_connected(2, 10.0, EventTime::ZERO);
    let mut sim = EventQueue::default();
    let log: FinishLog = Arc::new(Mutex::new(Vec::new()));

    let route = topo.route(DeviceId(0), DeviceId(1));
    sim.schedule(
        EventTime::ZERO,
        InjectChunk {
            size: 100,
            route: route.clone(),
            on_done: record(&log, 0),
        },
    );
    sim.schedule(
        EventTime::ZERO,
        InjectChunk {
            size: 200,
            route,
            on_done: record(&log, 1),
        },
    );

    // 空闲链路速率为 0
    {
        let link = topo
            .net()
            .link_between(DeviceId(0), DeviceId(1))
            .expect("link 0 -> 1");
        assert_eq!(link.active_count(), 0);
        assert_eq!(link.rate(), 0.0);
    }

    // t=0 批次结束后两笔都已被接纳
    sim.proceed(topo.world_mut());
    {
        let link = topo
            .net()
            .link_between(DeviceId(0), DeviceId(1))
            .expect("link 0 -> 1");
        assert_eq!(link.active_count(), 2);
        assert_eq!(link.rate(), 5.0);
        assert_eq!(link.rate() * link.active_count() as f64, link.bandwidth);
    }

    // t=10 的批次只是 A 原定的过期完成事件被丢弃，共享不变
    sim.proceed(topo.world_mut());
    assert_eq!(sim.now(), EventTime(10));
    {
        let link = topo
            .net()
            .link_between(DeviceId(0), DeviceId(1))
            .expect("link 0 -> 1");
        assert_eq!(link.active_count(), 2);
        assert_eq!(link.rate(), 5.0);
    }

    // t=20 A 真正离开后，幸存者独占全部带宽
    sim.proceed(topo.world_mut());
    assert_eq!(sim.now(), EventTime(20));
    {
        let link = topo
            .net()
            .link_between(DeviceId(0), DeviceId(1))
            .expect("link 0 -> 1");
        assert_eq!(link.active_count(), 1);
        assert_eq!(link.rate(), 10.0);
    }

    sim.run(topo.world_mut());
    let link = topo
        .net()
        .link_between(DeviceId(0), DeviceId(1))
        .expect("link 0 -> 1");
    assert_eq!(link.active_count(), 0);
    assert_eq!(link.rate(), 0.0);
}

#[test]
fn multi_hop_pays_latency_and_serialization_per_hop() {
    let mut topo = Topology::switch(2, 10.0, EventTime(3));
    let mut sim = EventQueue::default();
    let log: FinishLog = Arc::new(Mutex::new(Vec::new()));

    let route = topo.route(DeviceId(0), DeviceId(1));
    assert_eq!(route, vec![DeviceId(0), DeviceId(2), DeviceId(1)]);

    sim.schedule(
        EventTime::ZERO,
        InjectChunk {
            size: 100,
            route,
            on_done: record(&log, 0),
        },
    );
    sim.run(topo.world_mut());

    // 每跳 3ns 传播 + 10ns 串行化，两跳共 26ns
    assert_eq!(&*log.lock().expect("log lock"), &[(0, 26)]);
}

#[test]
fn switch_uplink_is_the_contention_point() {
    // 两个源同时向同一目的经交换机发送：
    // 上行链路各自独占，交换机到目的的下行链路被两笔共享。
    let mut topo = Topology::switch(3, 10.0, EventTime::ZERO);
    let mut sim = EventQueue::default();
    let log: FinishLog = Arc::new(Mutex::new(Vec::new()));

    for (id, src) in [(0, DeviceId(0)), (1, DeviceId(1))] {
        let route = topo.route(src, DeviceId(2));
        sim.schedule(
            EventTime::ZERO,
            InjectChunk {
                size: 100,
                route,
                on_done: record(&log, id),
            },
        );
    }
    sim.run(topo.world_mut());

    // 上行各 10ns；下行两笔同时到达，等分速率 5 → 各需 20ns
    let log = log.lock().expect("log lock");
    assert_eq!(log.len(), 2);
    for &(_, finish) in log.iter() {
        assert_eq!(finish, 30);
    }
}

#[test]
fn completion_callback_can_chain_the_next_transfer() {
    let mut topo = Topology::fully_connected(2, 10.0, EventTime::ZERO);
    let mut sim = EventQueue::default();
    let log: FinishLog = Arc::new(Mutex::new(Vec::new()));

    let route = topo.route(DeviceId(0), DeviceId(1));
    let back_route = topo.route(DeviceId(1), DeviceId(0));

    let chained = record(&log, 1);
    let log_first = Arc::clone(&log);
    sim.schedule(
        EventTime::ZERO,
        InjectChunk {
            size: 100,
            route,
            on_done: Some(Box::new(move |sim: &mut EventQueue| {
                log_first.lock().expect("log lock").push((0, sim.now().0));
                // 完成后立刻回程发一笔
                sim.schedule(
                    sim.now(),
                    InjectChunk {
                        size: 100,
                        route: back_route,
                        on_done: chained,
                    },
                );
            })),
        },
    );
    sim.run(topo.world_mut());

    assert_eq!(&*log.lock().expect("log lock"), &[(0, 10), (1, 20)]);
}
