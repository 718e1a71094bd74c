use std::path::PathBuf;

use clap::Args;
use studybalance_core::api;
use studybalance_core::ClusterModel;

use super::common::{print_json, read_week};

#[derive(Args)]
pub struct PlanArgs {
    /// Week JSON file (reads stdin when omitted)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let model = ClusterModel::build()?;
    let week = read_week(args.file.as_ref())?;
    let response = api::plan_week(&model, &week.logs)?;
    print_json(&response)
}
