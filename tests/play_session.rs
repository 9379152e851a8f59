//! Interactive sessions driven by scripted input

use std::io::Cursor;

use tictactoe_td::{
    AgentConfig, HumanPlayer, Player, TdAgent, cli::commands::play::run_session,
    enumerate_states, initialize_vo, initialize_vx, pipeline::ConsoleObserver, ports::Observer,
};

type ScriptedHuman = HumanPlayer<Cursor<Vec<u8>>, Vec<u8>>;

fn human(symbol: Player, input: &str) -> ScriptedHuman {
    HumanPlayer::new(symbol, Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

fn greedy_agent(symbol: Player) -> TdAgent {
    let states = enumerate_states();
    let table = match symbol {
        Player::X => initialize_vx(&states),
        Player::O => initialize_vo(&states),
    };
    TdAgent::new(table, &AgentConfig::new().with_epsilon(0.0)).unwrap()
}

#[test]
fn human_wins_then_input_ends() {
    // An untrained greedy O takes the first empty cell each turn, so X wins
    // down the first column.
    let mut agent = greedy_agent(Player::O);
    let mut player = human(Player::X, "0,0\n1,0\n2,0\ny\n");
    let before = agent.values().summary();

    let stats = run_session(&mut agent, &mut player, &mut []).unwrap();

    assert_eq!(stats.games(), 1);
    assert_eq!(stats.tally.x_wins, 1);
    assert!(stats.input_closed);
    assert_ne!(agent.values().summary(), before);
}

#[test]
fn declining_another_game_ends_the_session() {
    let mut agent = greedy_agent(Player::O);
    let mut player = human(Player::X, "0,0\n1,0\n2,0\nn\n");

    let stats = run_session(&mut agent, &mut player, &mut []).unwrap();

    assert_eq!(stats.games(), 1);
    assert!(!stats.input_closed);
    assert!(agent.history().is_empty());
}

#[test]
fn invalid_lines_are_retried_within_a_game() {
    let mut agent = greedy_agent(Player::O);
    let mut player = human(Player::X, "zero\n0,0\n0,1\n5,5\n1,0\n2,0\nn\n");

    let stats = run_session(&mut agent, &mut player, &mut []).unwrap();

    assert_eq!(stats.tally.x_wins, 1);
    let (_, output) = player.into_inner();
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Invalid move"));
    assert!(output.contains("Cell 0,1 is already taken."));
}

#[test]
fn agent_moves_first_when_human_plays_o() {
    let mut agent = greedy_agent(Player::X);
    let mut player = human(Player::O, "");
    let mut observers: Vec<Box<dyn Observer>> = vec![Box::new(ConsoleObserver::new(Vec::new()))];

    let stats = run_session(&mut agent, &mut player, &mut observers).unwrap();

    assert_eq!(stats.games(), 0);
    assert!(stats.input_closed);
    // The opening move of the abandoned game is forgotten
    assert!(agent.history().is_empty());
}

#[test]
fn abandoned_game_leaves_no_trace_in_the_next_session() {
    let mut agent = greedy_agent(Player::X);
    let mut quitter = human(Player::O, "");
    run_session(&mut agent, &mut quitter, &mut []).unwrap();
    assert!(agent.history().is_empty());

    // X opens at 0,0 and then takes the first empty cell; O never blocks
    let opening = agent.values().summary();
    let mut player = human(Player::O, "1,0\n1,1\nn\n");
    let stats = run_session(&mut agent, &mut player, &mut []).unwrap();

    assert_eq!(stats.tally.x_wins, 1);
    assert!(agent.history().is_empty());
    assert_ne!(agent.values().summary(), opening);
}
