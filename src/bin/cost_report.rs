//! 拓扑造价报告
//!
//! 读取拓扑描述文件，输出总造价与逐维构件造价分解。

use clap::Parser;
use flowsim_rs::topo::NetworkSpec;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cost-report", about = "计算拓扑描述文件的美元造价")]
struct Args {
    /// Path to topology spec JSON
    #[arg(long)]
    spec: PathBuf,
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

    let topo = spec.build().unwrap_or_else(|err| {
        eprintln!("invalid topology spec: {err}");
        std::process::exit(2);
    });

    for dim in 0..topo.dims_count() {
        println!(
            "dim_cost dim={} kind={:?} npus={} bandwidth_gbps={} latency_ns={} cost={:.2}",
            dim,
            topo.kind_of_dim(dim),
            topo.npus_count_of_dim(dim),
            topo.bandwidth_of_dim(dim),
            topo.latency_of_dim(dim).0,
            topo.get_topology_cost_block(dim)
        );
    }

    println!(
        "topology_cost total={:.2} npus={} devices={} links={}",
        topo.get_topology_cost(),
        topo.npus_count(),
        topo.devices_count(),
        topo.net().links_count()
    );
}
