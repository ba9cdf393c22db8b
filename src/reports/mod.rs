use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use runlog::analysis::{IterationBest, RunAnalysis};
use runlog::model::{Case, OptimizerStatus, RunnerStats, SimulationLedger};

const TIMESTAMP_DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn print_overview(analysis: &RunAnalysis) {
    let mut table = base_table();
    table.set_header(vec![
        Cell::new("Run").add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);

    table.add_row(vec!["Cases collected".to_string(), analysis.cases.len().to_string()]);
    table.add_row(vec![
        "Iterations".to_string(),
        analysis.optimizer.iterations().to_string(),
    ]);
    if let Some(status) = analysis.optimizer.status() {
        add_status_rows(&mut table, status);
    }
    add_simulation_rows(&mut table, &analysis.simulations);
    if let Some(stats) = &analysis.runner {
        add_runner_rows(&mut table, stats);
    }
    if !analysis.rejected_rows.is_empty() {
        table.add_row(vec![
            Cell::new("Rejected rows").fg(Color::Yellow),
            Cell::new(analysis.rejected_rows.len()),
        ]);
    }

    right_align(&mut table, 1..=1);
    println!("{}", table);
}

fn add_status_rows(table: &mut Table, status: &OptimizerStatus) {
    table.add_row(vec!["Current iteration".to_string(), status.iteration.to_string()]);
    table.add_row(vec![
        "Evaluated cases".to_string(),
        opt(status.evaluated_cases),
    ]);
    table.add_row(vec!["Queued cases".to_string(), opt(status.queued_cases)]);
    table.add_row(vec![
        "Recently evaluated".to_string(),
        opt(status.recently_evaluated_cases),
    ]);
    table.add_row(vec![
        "Tentative best".to_string(),
        status.tentative_best_case_id.clone(),
    ]);
    table.add_row(vec!["Step length".to_string(), opt(status.step_length)]);
}

fn add_simulation_rows(table: &mut Table, ledger: &SimulationLedger) {
    table.add_row(vec!["Simulations".to_string(), ledger.len().to_string()]);
    table.add_row(vec![
        "Total sim time (s)".to_string(),
        ledger.total_duration().to_string(),
    ]);
    table.add_row(vec![
        "Mean sim time (s)".to_string(),
        opt(ledger.mean_duration().map(|m| format!("{:.1}", m))),
    ]);
    table.add_row(vec![
        "Shortest sim (s)".to_string(),
        opt(ledger.shortest().map(|r| r.duration)),
    ]);
    table.add_row(vec![
        "Longest sim (s)".to_string(),
        opt(ledger.longest().map(|r| r.duration)),
    ]);
}

fn add_runner_rows(table: &mut Table, stats: &RunnerStats) {
    table.add_row(vec![
        "Elapsed (s)".to_string(),
        format!("{:.1}", stats.elapsed_secs),
    ]);
    table.add_row(vec!["Total cases".to_string(), stats.total_cases.to_string()]);
    table.add_row(vec![
        "Bookkept cases".to_string(),
        stats.bookkept_cases.to_string(),
    ]);
    table.add_row(vec![
        "Invalid cases".to_string(),
        stats.invalid_cases.to_string(),
    ]);
    table.add_row(vec![
        "Timed out sims".to_string(),
        stats.timed_out_simulations.to_string(),
    ]);
}

pub fn print_iteration_report(rows: &[IterationBest<'_>]) {
    let mut table = base_table();
    table.set_header(vec![
        Cell::new("Iter").add_attribute(Attribute::Bold),
        Cell::new("Best Case"),
        Cell::new("Objective").fg(Color::Cyan),
        Cell::new("Timestamp"),
        Cell::new("Wells"),
    ]);

    for row in rows {
        match row.case {
            Some(case) => table.add_row(vec![
                Cell::new(row.iteration),
                Cell::new(row.case_id),
                Cell::new(format!("{:.4}", case.objective_function_value)),
                Cell::new(case.timestamp.format(TIMESTAMP_DISPLAY)),
                Cell::new(case.well_names().join(", ")),
            ]),
            None => table.add_row(vec![
                Cell::new(row.iteration),
                Cell::new(row.case_id),
                Cell::new("?").fg(Color::Red),
                Cell::new("-"),
                Cell::new("-"),
            ]),
        };
    }

    right_align(&mut table, 0..=0);
    right_align(&mut table, 2..=2);
    println!("\n📈 Best case per iteration");
    println!("{}", table);
}

pub fn print_case_list(cases: &[&Case]) {
    let mut table = base_table();
    table.set_header(vec![
        Cell::new("Case").add_attribute(Attribute::Bold),
        Cell::new("Timestamp"),
        Cell::new("Eval"),
        Cell::new("Objective").fg(Color::Cyan),
        Cell::new("Vars"),
        Cell::new("Wells"),
    ]);

    for case in cases {
        let eval = if case.evaluated {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(&case.id),
            Cell::new(case.timestamp.format(TIMESTAMP_DISPLAY)),
            eval,
            Cell::new(format!("{:.4}", case.objective_function_value)),
            Cell::new(case.variables.len()),
            Cell::new(case.wells.len()),
        ]);
    }

    right_align(&mut table, 3..=5);
    println!("{}", table);
}

pub fn print_well_report(case: &Case) {
    println!(
        "\n🛢️  Wells of case {} (objective {:.4})",
        case.id, case.objective_function_value
    );
    let mut table = base_table();
    table.set_header(vec![
        Cell::new("Well").add_attribute(Attribute::Bold),
        Cell::new("Heel X"),
        Cell::new("Heel Y"),
        Cell::new("Heel Z"),
        Cell::new("Toe X"),
        Cell::new("Toe Y"),
        Cell::new("Toe Z"),
        Cell::new("Length").fg(Color::Cyan),
    ]);

    for well in &case.wells {
        let mut cells = vec![Cell::new(&well.name)];
        cells.extend(
            well.heel
                .iter()
                .chain(well.toe.iter())
                .map(|v| Cell::new(format!("{:.2}", v))),
        );
        cells.push(Cell::new(format!("{:.2}", well.length())));
        table.add_row(cells);
    }

    right_align(&mut table, 1..=7);
    println!("{}", table);
}
