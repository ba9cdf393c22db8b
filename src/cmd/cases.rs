use crate::reports;
use clap::Args;
use runlog::analysis::RunAnalysis;
use runlog::error::LogResult;
use runlog::model::Case;

#[derive(Args, Debug, Clone)]
pub struct CasesArgs {
    /// Show only the N cases with the highest objective.
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Only cases that define this well.
    #[arg(short, long)]
    pub well: Option<String>,
}

pub fn run(args: &CasesArgs, analysis: &RunAnalysis, as_json: bool) -> LogResult<()> {
    let mut cases: Vec<&Case> = analysis
        .cases
        .cases()
        .iter()
        .filter(|c| match &args.well {
            Some(name) => c.well(name).is_some(),
            None => true,
        })
        .collect();

    if let Some(n) = args.top {
        cases.sort_by(|a, b| b.objective_function_value.total_cmp(&a.objective_function_value));
        cases.truncate(n);
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&cases)?);
        return Ok(());
    }

    println!("\n📋 {} cases", cases.len());
    reports::print_case_list(&cases);
    Ok(())
}
