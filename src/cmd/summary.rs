use crate::reports;
use clap::Args;
use runlog::analysis::RunAnalysis;
use runlog::error::LogResult;
use serde_json::json;

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    /// Skip the per-iteration table.
    #[arg(long, default_value_t = false)]
    pub no_iterations: bool,
}

pub fn run(args: &SummaryArgs, analysis: &RunAnalysis, as_json: bool) -> LogResult<()> {
    let iterations = analysis.best_per_iteration();

    if as_json {
        let out = json!({
            "schemaVersion": analysis.schema_version,
            "cases": analysis.cases.len(),
            "warnings": analysis.cases.warnings(),
            "optimizer": analysis.optimizer.status(),
            "bestPerIteration": iterations,
            "simulations": {
                "count": analysis.simulations.len(),
                "totalDuration": analysis.simulations.total_duration(),
                "meanDuration": analysis.simulations.mean_duration(),
            },
            "runner": analysis.runner,
            "rejectedRows": analysis.rejected_rows,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("\n🔎 === RUN SUMMARY === 🔎");
    reports::print_overview(analysis);
    if !args.no_iterations {
        reports::print_iteration_report(&iterations);
    }
    if let Some(best) = analysis.final_best() {
        println!(
            "\n🏆 Final best: {} (objective {:.4})",
            best.id, best.objective_function_value
        );
    }
    Ok(())
}
