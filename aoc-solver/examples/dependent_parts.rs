//! Part 2 reusing work done by part 1
//!
//! The shared data is handed to both parts by `&mut`, so part 1 can leave the
//! sorted adapter chain behind for part 2. Part 2 still works on its own.
//!
//! Run with: cargo run --example dependent_parts

use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(Debug)]
pub struct Adapters {
    ratings: Vec<u64>,
    chain: Option<Vec<u64>>,
}

impl Adapters {
    /// Outlet, every adapter in order, then the device
    fn chain(&mut self) -> &[u64] {
        self.chain.get_or_insert_with(|| {
            let mut chain = vec![0];
            chain.extend(&self.ratings);
            chain.sort_unstable();
            if let Some(&last) = chain.last() {
                chain.push(last + 3);
            }
            chain
        })
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 10, tags = ["example", "dependent"])]
pub struct AdapterArray;

impl AocParser for AdapterArray {
    type SharedData<'a> = Adapters;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let ratings = input
            .lines()
            .map(|line| {
                line.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("Expected rating, got: {line}")))
            })
            .collect::<Result<_, _>>()?;
        Ok(Adapters {
            ratings,
            chain: None,
        })
    }
}

impl PartSolver<1> for AdapterArray {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (ones, threes) = shared.chain().windows(2).fold((0, 0), |(o, t), w| match w[1] - w[0] {
            1 => (o + 1, t),
            3 => (o, t + 1),
            _ => (o, t),
        });
        Ok((ones * threes).to_string())
    }
}

impl PartSolver<2> for AdapterArray {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        println!("chain cached by part 1: {}", shared.chain.is_some());
        let chain = shared.chain();
        let mut ways = vec![0u64; chain.len()];
        ways[0] = 1;
        for i in 1..chain.len() {
            ways[i] = (i.saturating_sub(3)..i)
                .filter(|&j| chain[i] - chain[j] <= 3)
                .map(|j| ways[j])
                .sum();
        }
        Ok(ways.last().copied().unwrap_or_default().to_string())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = SolverRegistryBuilder::new().register_all_plugins()?.build();

    let input = "16\n10\n15\n5\n1\n11\n7\n19\n6\n12\n4";
    let mut solver = registry.create_solver(2020, 10, input)?;
    for part in 1..=solver.parts() {
        let result = solver.solve(part)?;
        println!("Part {}: {} (took {})", result.part, result.answer, result.duration);
    }
    Ok(())
}
