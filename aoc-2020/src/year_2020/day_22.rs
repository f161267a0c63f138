//! Day 22: Crab Combat

use std::collections::{HashSet, VecDeque};

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::input::{blank_line_groups, into_parse_error, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 22, tags = ["2020", "simulation"])]
pub struct Solver;

pub type Deck = VecDeque<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<(Deck, Deck)> {
    let groups = blank_line_groups(lines);
    let [one, two] = groups.as_slice() else {
        bail!("expected exactly two decks");
    };
    let deck = |group: &[&str], header: &str| -> anyhow::Result<Deck> {
        let (first, cards) = group.split_first().context("empty deck section")?;
        if *first != header {
            bail!("expected '{header}', found '{first}'");
        }
        let cards: Vec<usize> = parse_lines(cards.iter().copied())?;
        Ok(cards.into())
    };
    Ok((deck(one.as_slice(), "Player 1:")?, deck(two.as_slice(), "Player 2:")?))
}

/// Sum of each card times its position counted from the bottom
pub fn score(deck: &Deck) -> usize {
    deck.iter().rev().enumerate().map(|(i, card)| (i + 1) * card).sum()
}

fn take_trick(winner: &mut Deck, own: usize, other: usize) {
    winner.push_back(own);
    winner.push_back(other);
}

pub fn combat(mut one: Deck, mut two: Deck) -> (Player, Deck) {
    while let (Some(&a), Some(&b)) = (one.front(), two.front()) {
        one.pop_front();
        two.pop_front();
        if a > b {
            take_trick(&mut one, a, b);
        } else {
            take_trick(&mut two, b, a);
        }
    }
    if two.is_empty() {
        (Player::One, one)
    } else {
        (Player::Two, two)
    }
}

/// Whether no draw in this game can ever lead to a sub-game
fn cannot_recurse(one: &Deck, two: &Deck) -> bool {
    match (one.iter().min(), two.iter().min()) {
        (Some(a), Some(b)) => a + b > one.len() + two.len(),
        _ => true,
    }
}

/// Play Recursive Combat; sub-games only need the winner, so they are
/// decided immediately when player 1 holds the highest card and no further
/// recursion can happen
pub fn recursive_combat(mut one: Deck, mut two: Deck, sub_game: bool) -> (Player, Deck) {
    if sub_game && one.iter().max() > two.iter().max() && cannot_recurse(&one, &two) {
        return (Player::One, one);
    }

    let mut seen: HashSet<(Deck, Deck)> = HashSet::new();
    while let (Some(&a), Some(&b)) = (one.front(), two.front()) {
        if !seen.insert((one.clone(), two.clone())) {
            return (Player::One, one);
        }
        one.pop_front();
        two.pop_front();

        let winner = if one.len() >= a && two.len() >= b {
            let sub_one = one.iter().take(a).copied().collect();
            let sub_two = two.iter().take(b).copied().collect();
            recursive_combat(sub_one, sub_two, true).0
        } else if a > b {
            Player::One
        } else {
            Player::Two
        };
        match winner {
            Player::One => take_trick(&mut one, a, b),
            Player::Two => take_trick(&mut two, b, a),
        }
    }
    if two.is_empty() {
        (Player::One, one)
    } else {
        (Player::Two, two)
    }
}

fn combat_score((one, two): &(Deck, Deck)) -> usize {
    score(&combat(one.clone(), two.clone()).1)
}

fn recursive_combat_score((one, two): &(Deck, Deck)) -> usize {
    score(&recursive_combat(one.clone(), two.clone(), false).1)
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(combat_score(&parse(lines)?))
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(recursive_combat_score(&parse(lines)?))
}

impl AocParser for Solver {
    type SharedData<'a> = (Deck, Deck);

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(combat_score(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(recursive_combat_score(shared).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: [&str; 13] = [
        "Player 1:", "9", "2", "6", "3", "1", "", "Player 2:", "5", "8", "4", "7", "10",
    ];

    #[test]
    fn test_parse() {
        let (one, two) = parse(EXAMPLE).unwrap();
        assert_eq!(one, Deck::from([9, 2, 6, 3, 1]));
        assert_eq!(two, Deck::from([5, 8, 4, 7, 10]));
    }

    #[test]
    fn test_score() {
        assert_eq!(score(&Deck::from([3, 2, 10, 6, 8, 5, 9, 4, 7, 1])), 306);
    }

    #[test]
    fn test_first() {
        assert_eq!(first(EXAMPLE).unwrap(), 306);
    }

    #[test]
    fn test_recursive_combat() {
        let (one, two) = parse(EXAMPLE).unwrap();
        assert_eq!(
            recursive_combat(one, two, false),
            (Player::Two, Deck::from([7, 5, 6, 2, 4, 1, 10, 8, 9, 3]))
        );
        assert_eq!(
            recursive_combat(Deck::from([3, 19]), Deck::from([30, 29, 14]), false),
            (Player::Two, Deck::from([14, 30, 3, 29, 19]))
        );
    }

    #[test]
    fn test_repeated_configuration() {
        let (winner, _) = recursive_combat(Deck::from([43, 19]), Deck::from([2, 29, 14]), false);
        assert_eq!(winner, Player::One);
    }

    #[test]
    fn test_second() {
        assert_eq!(second(EXAMPLE).unwrap(), 291);
    }

    #[test]
    fn test_missing_deck() {
        assert!(first(["Player 1:", "1", "2"]).is_err());
        assert!(first(["Player 2:", "1", "", "Player 1:", "2"]).is_err());
    }
}
