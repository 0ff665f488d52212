//! 传输仿真
//!
//! 读取拓扑描述文件，注入其中列出的传输，运行到完成，
//! 输出每笔传输的完成时刻（FCT），可选写出轨迹 JSON。

use clap::Parser;
use flowsim_rs::demo::InjectChunk;
use flowsim_rs::net::{DeviceId, DeviceKind};
use flowsim_rs::sim::{EventQueue, EventTime};
use flowsim_rs::topo::NetworkSpec;
use flowsim_rs::viz::{TraceDeviceInfo, TraceDeviceKind, TraceEvent, TraceEventKind, TraceLogger};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Parser)]
#[command(name = "transfer-sim", about = "在拓扑描述上运行批量传输仿真")]
struct Args {
    /// Path to topology spec JSON
    #[arg(long)]
    spec: PathBuf,

    /// 输出轨迹 JSON 文件
    #[arg(long)]
    trace_json: Option<PathBuf>,

    /// 运行到该时刻（ns）为止；默认运行到全部完成
    #[arg(long)]
    until_ns: Option<u64>,
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let raw = fs::read_to_string(&args.spec).expect("read topology spec");
    let spec: NetworkSpec = serde_json::from_str(&raw).expect("parse topology spec");

    let mut topo = spec.build().unwrap_or_else(|err| {
        eprintln!("invalid topology spec: {err}");
        std::process::exit(2);
    });

    let trace = Arc::new(Mutex::new(TraceLogger::default()));

    // 元信息作为 t=0 的第一条轨迹事件
    {
        let devices = (0..topo.devices_count())
            .map(|i| {
                let dev = topo.net().device(DeviceId(i));
                TraceDeviceInfo {
                    id: i,
                    name: dev.name().to_string(),
                    kind: match dev.kind() {
                        DeviceKind::Npu => TraceDeviceKind::Npu,
                        DeviceKind::Switch => TraceDeviceKind::Switch,
                    },
                }
            })
            .collect();
        trace.lock().expect("trace lock").push(TraceEvent {
            t_ns: 0,
            chunk_id: None,
            kind: TraceEventKind::Meta {
                devices,
                links_count: topo.net().links_count(),
                dims: topo.npus_count_per_dim().to_vec(),
            },
        });
    }

    let mut sim = EventQueue::default();
    let completions: Arc<Mutex<Vec<(usize, u64)>>> = Arc::new(Mutex::new(Vec::new()));

    for (idx, t) in spec.transfers.iter().enumerate() {
        let route = topo.route(DeviceId(t.src), DeviceId(t.dest));

        trace.lock().expect("trace lock").push(TraceEvent {
            t_ns: t.start_ns,
            chunk_id: Some(idx as u64),
            kind: TraceEventKind::ChunkInjected {
                src: t.src,
                dest: t.dest,
                size_bytes: t.size_bytes,
                hops: route.len() - 1,
            },
        });

        let completions = Arc::clone(&completions);
        let trace = Arc::clone(&trace);
        let dest = t.dest;
        sim.schedule(
            EventTime(t.start_ns),
            InjectChunk {
                size: t.size_bytes,
                route,
                on_done: Some(Box::new(move |sim: &mut EventQueue| {
                    let finish = sim.now().0;
                    completions.lock().expect("completions lock").push((idx, finish));
                    trace.lock().expect("trace lock").push(TraceEvent {
                        t_ns: finish,
                        chunk_id: Some(idx as u64),
                        kind: TraceEventKind::ChunkDelivered { dest },
                    });
                })),
            },
        );
    }

    match args.until_ns {
        Some(until) => sim.run_until(EventTime(until), topo.world_mut()),
        None => sim.run(topo.world_mut()),
    }

    let mut done = completions.lock().expect("completions lock").clone();
    done.sort_unstable();
    for (idx, finish) in &done {
        let t = &spec.transfers[*idx];
        println!(
            "chunk_fct idx={} src={} dest={} bytes={} start_ns={} finish_ns={}",
            idx, t.src, t.dest, t.size_bytes, t.start_ns, finish
        );
    }

    println!(
        "done @ {:?}, completed_chunks={}, completed_bytes={}",
        sim.now(),
        topo.net().stats.completed_chunks,
        topo.net().stats.completed_bytes
    );

    if let Some(path) = args.trace_json {
        let trace = trace.lock().expect("trace lock");
        let json = serde_json::to_string_pretty(&trace.events).expect("serialize trace");
        fs::write(&path, json).expect("write trace json");
        println!("trace written to {}", path.display());
    }
}
