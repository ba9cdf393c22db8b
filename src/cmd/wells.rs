use crate::reports;
use clap::Args;
use runlog::analysis::RunAnalysis;
use runlog::error::{LogError, LogResult};

#[derive(Args, Debug, Clone)]
pub struct WellsArgs {
    /// Case to inspect. Defaults to the best case of the last iteration.
    #[arg(short = 'C', long)]
    pub case: Option<String>,
}

pub fn run(args: &WellsArgs, analysis: &RunAnalysis, as_json: bool) -> LogResult<()> {
    let case = match &args.case {
        Some(id) => analysis
            .cases
            .get(id)
            .ok_or_else(|| LogError::UnknownCase(id.clone()))?,
        None => analysis
            .final_best()
            .ok_or_else(|| LogError::UnknownCase("<final best>".to_string()))?,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&case.wells)?);
        return Ok(());
    }

    reports::print_well_report(case);
    Ok(())
}
