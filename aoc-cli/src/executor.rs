//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single solver execution
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Set on the result that paid for parsing the input
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    context: ExecutionContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread needs, shared by reference across the pool
struct ExecutionContext {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: ExecutionContext {
                registry,
                inputs: InputStore::new(config.input_dir.clone(), config.input_override.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.context.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let ctx = &self.context;
        ctx.registry
            .storage()
            .iter_info()
            .filter(|info| ctx.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| ctx.day_filter.is_none_or(|d| info.day == d))
            .filter_map(|info| {
                Some(WorkItem {
                    year: info.year,
                    day: info.day,
                    parts: select_parts(ctx.part_filter, info.parts)?,
                })
            })
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let ctx = &self.context;

        match ctx.parallelize_by {
            ParallelizeBy::Sequential => run_in_order(&work_items, &tx, ctx),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();
                self.thread_pool.install(|| {
                    by_year
                        .par_iter()
                        .map(|items| run_in_order(items, &tx, ctx).err())
                        .reduce(|| None, merge_errors)
                        .map_or(Ok(()), Err)
                })
            }
            // Part differs from Day only inside run_work
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .map(|work| run_work(work, &tx, ctx).err())
                    .reduce(|| None, merge_errors)
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

/// Parts to run given the `--part` filter; `None` when the solver has no
/// such part
fn select_parts(part_filter: Option<u8>, max_parts: u8) -> Option<RangeInclusive<u8>> {
    match part_filter {
        Some(p) if (1..=max_parts).contains(&p) => Some(p..=p),
        Some(_) => None,
        None if max_parts > 0 => Some(1..=max_parts),
        None => None,
    }
}

fn merge_errors(
    first: Option<ArcExecutorError>,
    second: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match second {
        Some(b) => Some(ArcExecutorError::combine_opt(first, b)),
        None => first,
    }
}

fn run_in_order(
    items: &[WorkItem],
    tx: &Sender<SolverResult>,
    ctx: &ExecutionContext,
) -> Result<(), ArcExecutorError> {
    items
        .iter()
        .map(|work| run_work(work, tx, ctx).err())
        .fold(None, merge_errors)
        .map_or(Ok(()), Err)
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Run every requested part of one day
///
/// Missing inputs and parse failures are reported as failed parts rather
/// than errors, so the remaining days still run.
fn run_work(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    ctx: &ExecutionContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let input = match ctx.inputs.read(year, day) {
        Ok(input) => input,
        Err(source) => {
            let error: ArcExecutorError = ExecutorError::Input { year, day, source }.into();
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    if ctx.parallelize_by == ParallelizeBy::Part {
        // One solver instance per part; collect keeps part order
        let results: Vec<SolverResult> = work
            .parts
            .clone()
            .into_par_iter()
            .map(|part| match ctx.registry.create_solver(year, day, &input) {
                Ok(mut solver) => {
                    let parse = solver.parse_duration();
                    solve_part(&mut solver, part, Some(parse))
                }
                Err(e) => SolverResult::failed(year, day, part, ExecutorError::from(e).into()),
            })
            .collect();
        for result in results {
            send(tx, result)?;
        }
        return Ok(());
    }

    match ctx.registry.create_solver(year, day, &input) {
        Ok(mut solver) => {
            let mut parse = Some(solver.parse_duration());
            for part in work.parts.clone() {
                send(tx, solve_part(&mut solver, part, parse.take()))?;
            }
        }
        Err(e) => {
            warn!(year, day, error = %e, "solver could not be created");
            let error: ArcExecutorError = ExecutorError::from(e).into();
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
        }
    }
    Ok(())
}

fn solve_part<'a>(
    solver: &mut Box<dyn DynSolver + 'a>,
    part: u8,
    parse_duration: Option<TimeDelta>,
) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());
    debug!(year, day, part, lines = solver.input_lines(), "solving");
    match solver.solve(part) {
        Ok(result) => SolverResult {
            year,
            day,
            part,
            solve_duration: result.duration,
            answer: Ok(result.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            parse_duration,
            ..SolverResult::failed(
                year,
                day,
                part,
                ExecutorError::from(aoc_solver::SolverError::from(e)).into(),
            )
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use aoc_solver::{AocParser, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    /// Sums the numbers of the input; part 2 multiplies them
    #[derive(aoc_solver::AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Numbers;

    impl AocParser for Numbers {
        type SharedData<'a> = Vec<u64>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .split_whitespace()
                .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
                .collect()
        }
    }

    impl PartSolver<1> for Numbers {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<u64>().to_string())
        }
    }

    impl PartSolver<2> for Numbers {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().product::<u64>().to_string())
        }
    }

    fn executor(dir: &TempDir, args: &[&str]) -> Executor {
        let dir_arg = dir.path().to_string_lossy().into_owned();
        let mut argv = vec!["aoc", "--input-dir", dir_arg.as_str()];
        argv.extend_from_slice(args);
        let config = Config::from_args(Args::try_parse_from(argv).unwrap()).unwrap();
        let builder = aoc_solver::register_solver!(SolverRegistryBuilder::new(), Numbers, 2020, 1);
        let builder = aoc_solver::register_solver!(builder.unwrap(), Numbers, 2020, 2);
        let registry = aoc_solver::register_solver!(builder.unwrap(), Numbers, 2020, 3)
            .unwrap()
            .build();
        Executor::new(registry, &config).unwrap()
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<SolverResult> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn test_select_parts() {
        assert_eq!(select_parts(None, 2), Some(1..=2));
        assert_eq!(select_parts(Some(2), 2), Some(2..=2));
        assert_eq!(select_parts(Some(2), 1), None);
        assert_eq!(select_parts(None, 0), None);
    }

    #[test]
    fn test_collect_work_items_filters() {
        let dir = TempDir::new().unwrap();
        let all = executor(&dir, &[]).collect_work_items();
        assert_eq!(all.len(), 3);

        let one = executor(&dir, &["-d", "2", "-p", "2"]).collect_work_items();
        assert_eq!(
            one,
            vec![WorkItem {
                year: 2020,
                day: 2,
                parts: 2..=2
            }]
        );
        assert!(executor(&dir, &["-y", "2019"]).collect_work_items().is_empty());
    }

    #[test]
    fn test_missing_and_bad_inputs_fail_only_their_day() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2020_day01.txt"), "2 3 4").unwrap();
        fs::write(dir.path().join("2020_day03.txt"), "2 x").unwrap();

        for mode in ["sequential", "year", "day", "part"] {
            let results = run(&executor(&dir, &["--parallelize-by", mode]));
            assert_eq!(results.len(), 6, "{mode}");

            let answers: Vec<_> = results.iter().map(|r| r.answer.as_ref().ok().cloned()).collect();
            assert_eq!(
                answers,
                vec![Some("9".to_string()), Some("24".to_string()), None, None, None, None],
                "{mode}"
            );
            assert!(matches!(
                results[2].answer.as_ref().map_err(|e| e.inner()),
                Err(ExecutorError::Input { day: 2, .. })
            ));
            assert!(matches!(
                results[4].answer.as_ref().map_err(|e| e.inner()),
                Err(ExecutorError::Solver(aoc_solver::SolverError::ParseError(_)))
            ));
        }
    }

    #[test]
    fn test_blank_input_file_fails_parsing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2020_day01.txt"), "\n\n").unwrap();

        let results = run(&executor(&dir, &["-d", "1"]));
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| matches!(
            r.answer.as_ref().map_err(|e| e.inner()),
            Err(ExecutorError::Solver(aoc_solver::SolverError::ParseError(
                ParseError::EmptyInput
            )))
        )));
    }

    #[test]
    fn test_send_failures_are_merged() {
        let dir = TempDir::new().unwrap();
        let executor = executor(&dir, &["--parallelize-by", "sequential"]);
        let (tx, rx) = std::sync::mpsc::channel();
        drop(rx);

        let err = executor.execute(tx).unwrap_err();
        assert_eq!(err.count(), 3);
        assert!(matches!(err.inner(), ExecutorError::Multiple(_)));
    }

    #[test]
    fn test_merge_errors_keeps_order() {
        let error = |n: usize| -> ArcExecutorError { ExecutorError::ThreadPool(n.to_string()).into() };
        assert!(merge_errors(None, None).is_none());
        assert_eq!(merge_errors(Some(error(1)), None).map(|e| e.count()), Some(1));

        let merged = merge_errors(merge_errors(None, Some(error(1))), Some(error(2))).unwrap();
        match merged.inner() {
            ExecutorError::Multiple(errors) => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                assert_eq!(
                    messages,
                    vec!["Thread pool creation failed: 1", "Thread pool creation failed: 2"]
                );
            }
            other => panic!("expected merged errors, got {other}"),
        }
    }

    #[test]
    fn test_parse_time_counted_once_per_instance() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2020_day01.txt"), "5 6").unwrap();

        let day = run(&executor(&dir, &["-d", "1", "--parallelize-by", "day"]));
        assert!(day[0].parse_duration.is_some());
        assert!(day[1].parse_duration.is_none());

        let part = run(&executor(&dir, &["-d", "1", "--parallelize-by", "part"]));
        assert!(part.iter().all(|r| r.parse_duration.is_some()));
    }
}
