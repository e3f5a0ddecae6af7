//! Crate root module declarations for the Plum Checkers engine.
//!
//! Exposes the board model, successor generation, minimax/alpha-beta search,
//! player controllers and utility helpers so the binaries, benches and tests
//! share stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod checkers_rules;
    pub mod checkers_types;
    pub mod game_state;
}

pub mod move_generation {
    pub mod capture_chains;
    pub mod move_generator;
    pub mod perft;
    pub mod successor_generator;
}

pub mod search {
    pub mod search_engine;
    pub mod transposition_table;
}

pub mod engines {
    pub mod ai_controller;
    pub mod controller;
    pub mod human_controller;
    pub mod random_controller;
}

pub mod utils {
    pub mod algebraic;
    pub mod config;
    pub mod match_harness;
    pub mod render_game_state;
}
