use crate::errors::CheckersResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::MoveGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub promotions: usize,
    pub end_states: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
        self.end_states += rhs.end_states;
    }
}

/// Count leaf plies `depth` levels below `game_state`.
pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> CheckersResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for child in generator.generate_successors(game_state)? {
        let counts = perft_recurse(generator, game_state, &child, depth, 1)?;
        total.merge(counts);
    }
    Ok(total)
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    parent: &GameState,
    state: &GameState,
    search_depth: u8,
    current_depth: u8,
) -> CheckersResult<PerftCounts> {
    if current_depth == search_depth {
        let mover = parent.side_to_move();
        let promoted = state.board().king_count(mover) > parent.board().king_count(mover);
        return Ok(PerftCounts {
            nodes: 1,
            captures: usize::from(state.is_capture()),
            promotions: usize::from(promoted),
            end_states: usize::from(state.is_end_state()),
        });
    }

    let mut total = PerftCounts::default();
    for child in generator.generate_successors(state)? {
        total.merge(perft_recurse(
            generator,
            state,
            &child,
            search_depth,
            current_depth + 1,
        )?);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::perft;
    use crate::game_state::checkers_rules::Rules;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::successor_generator::LegalSuccessorGenerator;

    #[test]
    fn opening_perft_counts() {
        let state = GameState::new_game(Rules::default());
        let gen = LegalSuccessorGenerator;

        assert_eq!(perft(&gen, &state, 0).expect("perft").nodes, 1);

        let d1 = perft(&gen, &state, 1).expect("perft");
        assert_eq!(d1.nodes, 7);
        assert_eq!(d1.captures, 0);

        let d2 = perft(&gen, &state, 2).expect("perft");
        assert_eq!(d2.nodes, 49);
        assert_eq!(d2.captures, 0);
        assert_eq!(d2.promotions, 0);
        assert_eq!(d2.end_states, 0);
    }
}
