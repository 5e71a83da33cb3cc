use anyhow::Context;
use clap::Parser;
use gui_bridge::bridge::{gui_bind_address, GuiBridge};
use gui_bridge::model::VisualizationModel;
use std::fs;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Headless driver for the WiFi scan radar")]
struct Args {
    /// Render a fixed number of frames headless and print a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Scan JSON to replay instead of a generated scan
    #[arg(long)]
    records: Option<PathBuf>,
    /// JSON object mapping six-hex-digit OUIs to vendor names
    #[arg(long)]
    vendor_table: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    light: bool,
    #[arg(long, default_value_t = 120)]
    frames: usize,
    #[arg(long, default_value_t = 12)]
    access_points: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Where the offline run writes its JSON snapshot
    #[arg(long, default_value = "tools/data/radar_snapshot.json")]
    report: PathBuf,
    /// Keep the HTTP bridge alive for live scans and pointer input
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.light, args.frames, args.access_points, args.seed)
    };
    if args.records.is_some() {
        workflow_config.records = args.records.clone();
    }
    if args.vendor_table.is_some() {
        workflow_config.vendor_table = args.vendor_table.clone();
    }

    let runner = Runner::new(workflow_config);
    let records = runner.load_records()?;

    if args.offline {
        let result = runner.execute(records.clone())?;

        println!(
            "Offline run -> frames {}, records {}, access points {}, commands/frame {}",
            result.frames_painted,
            result.snapshot.record_count,
            result.snapshot.groups.len(),
            result.commands_last_frame
        );
        for line in &result.probe_detail {
            println!("  {}", line);
        }

        if let Some(parent) = args.report.parent() {
            fs::create_dir_all(parent)?;
        }
        let report = serde_json::to_string_pretty(&result.snapshot)
            .context("serializing radar snapshot")?;
        fs::write(&args.report, report)
            .with_context(|| format!("writing report {}", args.report.display()))?;
    }

    if args.serve {
        let gui_bridge = GuiBridge::new(VisualizationModel::new(runner.build_engine()?));
        gui_bridge.publish(records)?;
        gui_bridge.spawn_server(gui_bind_address());
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
