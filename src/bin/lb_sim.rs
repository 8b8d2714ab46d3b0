//! 负载均衡仿真
//!
//! 运行一个 JSON 描述的实验，打印汇总并可选输出完整报告。

use clap::Parser;
use lbsim_rs::experiment::{ExperimentConfig, SyncPlan, run_experiment};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "lb-sim", about = "分布式负载均衡控制器仿真：视图陈旧性对选路的影响")]
struct Args {
    /// Path to experiment.json
    #[arg(long)]
    experiment: PathBuf,

    /// Output report JSON file
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// 覆盖同步周期（秒，仿真时间）；0 表示关闭同步
    #[arg(long)]
    sync_period: Option<f64>,

    /// 仿真运行到多少秒；默认运行到事件队列为空
    #[arg(long)]
    until: Option<f64>,
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> lbsim_rs::Result<()> {
    let mut cfg = ExperimentConfig::load(&args.experiment)?;
    if let Some(period) = args.sync_period {
        cfg.sync = (period > 0.0).then_some(SyncPlan { period });
    }

    let report = run_experiment(&cfg, args.until)?;

    println!(
        "done @ {:.3}s, arrivals={}, admitted={}, dropped={}, departures={}, syncs={}, peak_util={:.3}",
        report.now,
        report.stats.arrivals,
        report.stats.admitted,
        report.stats.dropped,
        report.stats.departures,
        report.syncs,
        report.stats.peak_util
    );
    for (idx, admitted) in report.stats.admitted_by_ctrl.iter().enumerate() {
        println!("ctrl {idx}: admitted={admitted}");
    }

    if let Some(path) = &args.json_out {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }
    Ok(())
}
