#![allow(dead_code)]

use runlog::model::{NameMap, Variable};
use runlog::table::LogTable;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CASE_HEADER: &str = "TimeStamp,CaseID,Evaluated,ObjFunVal";
pub const OPT_HEADER: &str = "TimeStamp,Iteration,EvaluatedCases,QueuedCases,RecentlyEvaluatedCases,TentativeBestCaseID,TentativeBestCaseOFValue,StepLength";
pub const SIM_HEADER: &str = "StartTime,EndTime,Duration,CaseID";

pub fn table(text: &str) -> LogTable {
    LogTable::from_reader(Cursor::new(text.to_string())).unwrap()
}

/// Name map holding `id -> name` for every pair.
pub fn names(pairs: &[(&str, &str)]) -> NameMap {
    pairs.iter().map(|(id, name)| (*id, *name)).collect()
}

pub fn var(name: &str, value: f64) -> Variable {
    Variable::new(format!("id-{}", name), name, value)
}

/// Builder for a case-log row: timestamp, id, flag, objective, then pairs.
pub struct CaseRow {
    id: String,
    evaluated: bool,
    objective: f64,
    pairs: Vec<(String, String)>,
}

impl CaseRow {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            evaluated: true,
            objective: 0.0,
            pairs: Vec::new(),
        }
    }

    pub fn unevaluated(mut self) -> Self {
        self.evaluated = false;
        self
    }

    pub fn objective(mut self, v: f64) -> Self {
        self.objective = v;
        self
    }

    pub fn var(mut self, id: &str, value: &str) -> Self {
        self.pairs.push((id.to_string(), value.to_string()));
        self
    }

    pub fn fields(&self) -> Vec<String> {
        let mut f = vec![
            "2017-04-03T12:00:00Z".to_string(),
            self.id.clone(),
            self.evaluated.to_string(),
            self.objective.to_string(),
        ];
        for (id, v) in &self.pairs {
            f.push(id.clone());
            f.push(v.clone());
        }
        f
    }

    pub fn line(&self) -> String {
        self.fields().join(",")
    }
}

/// Case-log text with a header sized for `var_count` variable pairs.
pub fn case_log(var_count: usize, rows: &[CaseRow]) -> String {
    let mut out = CASE_HEADER.to_string();
    for _ in 0..var_count {
        out.push_str(",ReaVarID,ReaVarVal");
    }
    out.push('\n');
    for r in rows {
        out.push_str(&r.line());
        out.push('\n');
    }
    out
}

/// Optimizer-log text from `(iteration, best id)` rows.
pub fn optimizer_log(rows: &[(u32, &str)]) -> String {
    let mut out = format!("{}\n", OPT_HEADER);
    for (i, (iter, id)) in rows.iter().enumerate() {
        out.push_str(&format!(
            "2017-04-03T12:00:00Z,{},{},0,1,{},{}.5,{}\n",
            iter,
            i + 1,
            id,
            i,
            50.0 / (*iter as f64)
        ));
    }
    out
}

/// Name map covering one spline well with heel/toe coordinates.
pub const WELL_NAME_MAP: &str = "UUID,name
{h-x},SplinePoint#PROD1#heel#x
{h-y},SplinePoint#PROD1#heel#y
{h-z},SplinePoint#PROD1#heel#z
{t-x},SplinePoint#PROD1#toe#x
{t-y},SplinePoint#PROD1#toe#y
{t-z},SplinePoint#PROD1#toe#z
{bhp},BHP#PROD1#0
";

pub struct RunDir {
    dir: TempDir,
}

impl RunDir {
    /// A small but complete run: three cases over two iterations.
    pub fn sample() -> Self {
        let run = Self::empty();
        run.write("log_property_uuid_name_map.csv", WELL_NAME_MAP);

        let well_case = |id: &str, obj: f64, x: &str| {
            CaseRow::new(id)
                .objective(obj)
                .var("{h-x}", x)
                .var("{h-y}", "200")
                .var("{h-z}", "1700")
                .var("{t-x}", "650")
                .var("{t-y}", "200")
                .var("{t-z}", "1700")
                .var("{bhp}", "150")
        };
        run.write(
            "log_cases.csv",
            &case_log(
                7,
                &[
                    well_case("{c1}", 10.0, "100"),
                    well_case("{c2}", 25.0, "150"),
                    well_case("{c3}", 30.0, "250"),
                    well_case("{c4}", 0.0, "300").unevaluated(),
                ],
            ),
        );
        run.write(
            "log_optimization.csv",
            &optimizer_log(&[(1, "{c1}"), (1, "{c2}"), (2, "{c3}")]),
        );
        run.write(
            "log_simulation.csv",
            &format!(
                "{}\n\
                 2017-04-03T12:00:00,2017-04-03T12:00:40,40,{{c1}}\n\
                 2017-04-03T12:01:00,2017-04-03T12:01:20,20,{{c2}}\n\
                 2017-04-03T12:02:00,2017-04-03T12:02:30,30,{{c3}}\n",
                SIM_HEADER
            ),
        );
        run.write(
            "log_runner.csv",
            "ElapsedSecs,TotalCases,SimulatedCases,BookkeepedCases,InvalidCases,TimedOutSimulations\n\
             12.5,4,3,1,0,0\n",
        );
        run
    }

    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        write!(f, "{}", content).unwrap();
        path
    }

    pub fn remove(&self, name: &str) {
        std::fs::remove_file(self.dir.path().join(name)).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
