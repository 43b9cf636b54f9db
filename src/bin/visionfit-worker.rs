// ABOUTME: Worker binary — drains the vision queue and runs the pipeline against each submitted photo
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! # VisionFit Worker Binary
//!
//! Standalone worker process: owns an [`InProcessVisionQueue`], runs
//! [`VisionWorker::run`] forever. A surrounding service enqueues tasks onto
//! the same queue instance (out of scope here — see [`visionfit_server::collaborators`]
//! for the stated seam) and awaits results through it.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use visionfit_server::config::{AnthroRatios, PipelineConfig};
use visionfit_server::logging::LoggingConfig;
use visionfit_server::queue::{InProcessVisionQueue, VisionWorker};
use visionfit_server::vision::reference_pipeline;

#[derive(Parser)]
#[command(name = "visionfit-worker")]
#[command(about = "Drains the vision work queue and runs the image-analysis pipeline")]
struct Args {
    /// Number of concurrent drain loops to run. Defaults to the pipeline
    /// configuration's `worker_concurrency`.
    #[arg(long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    LoggingConfig::from_env().init()?;
    let config = PipelineConfig::from_env()?;
    let anthro_ratios = AnthroRatios::default();
    let concurrency = args.concurrency.unwrap_or(config.worker_concurrency).max(1);

    info!(concurrency, "starting visionfit worker");

    let queue = Arc::new(InProcessVisionQueue::new());
    let pipeline = Arc::new(reference_pipeline());

    let mut handles = Vec::with_capacity(concurrency);
    for lane in 0..concurrency {
        let queue_handle: Arc<dyn visionfit_server::queue::VisionQueue> = Arc::clone(&queue);
        let worker = VisionWorker::new(queue_handle, Arc::clone(&pipeline), config, anthro_ratios);
        handles.push(tokio::spawn(async move {
            info!(lane, "worker lane started");
            worker.run().await;
        }));
    }

    for handle in handles {
        handle.await?;
    }

    Ok(())
}
