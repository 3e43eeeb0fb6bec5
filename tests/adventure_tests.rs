//! Adventure Phase behavior on hand-built boards.

use terrablocks::{
    Board, Direction, GameEvent, GameState, GenerationConfig, PlayerInput, Position, TerraResult,
    TerrainType,
};

fn quiet_config() -> GenerationConfig {
    let mut config = GenerationConfig::for_testing(21);
    config.treasure_chance = 0.0;
    config.safe_haven_chance = 0.0;
    config
}

#[test]
fn test_enemies_spawn_on_every_hazard() -> TerraResult<()> {
    let board = Board::from_rows(&["f=====", "!=!==!", "======"])?;
    let game_state = GameState::new_with_board(quiet_config(), board)?;

    let adventure = game_state.adventure().unwrap();
    let mut spawns: Vec<Position> = adventure.enemies.iter().map(|enemy| enemy.position).collect();
    spawns.sort_by_key(|pos| (pos.y, pos.x));
    assert_eq!(
        spawns,
        vec![Position::new(0, 1), Position::new(2, 1), Position::new(5, 1)]
    );
    Ok(())
}

#[test]
fn test_enemy_chases_after_player_moves() -> TerraResult<()> {
    let board = Board::from_rows(&["f=====", "======", "=====!"])?;
    let mut config = quiet_config();
    config.enemy_x_bias = 1.0;
    let mut game_state = GameState::new_with_board(config, board)?;

    game_state.handle_input(PlayerInput::Move(Direction::East));
    let events = game_state.update(0.016);

    assert!(events
        .iter()
        .any(|event| matches!(event, GameEvent::EnemyMoved { to, .. } if *to == Position::new(4, 2))));
    let adventure = game_state.adventure().unwrap();
    assert_eq!(adventure.enemies[0].position, Position::new(4, 2));
    Ok(())
}

#[test]
fn test_no_enemy_steps_without_player_moves() -> TerraResult<()> {
    let board = Board::from_rows(&["f===", "===!"])?;
    let mut game_state = GameState::new_with_board(quiet_config(), board)?;

    for _ in 0..10 {
        assert!(game_state.update(0.5).is_empty());
    }
    assert_eq!(
        game_state.adventure().unwrap().enemies[0].position,
        Position::new(3, 1)
    );
    Ok(())
}

#[test]
fn test_collisions_until_defeat() -> TerraResult<()> {
    let board = Board::from_rows(&["f!"])?;
    let mut config = quiet_config();
    config.player_health = 2;
    let mut game_state = GameState::new_with_board(config, board)?;
    game_state.score = 30;

    let first = game_state.handle_input(PlayerInput::Move(Direction::East));
    assert!(matches!(first[0], GameEvent::Collision { health_left: 1, .. }));
    assert_eq!(game_state.score, 5);

    let second = game_state.handle_input(PlayerInput::Move(Direction::East));
    assert!(second.contains(&GameEvent::PlayerDefeated));
    assert_eq!(game_state.score, 0);
    assert_eq!(game_state.statistics.collisions, 2);

    assert!(game_state
        .handle_input(PlayerInput::Move(Direction::East))
        .is_empty());
    Ok(())
}

#[test]
fn test_treasure_and_haven_rewards() -> TerraResult<()> {
    let board = Board::from_rows(&["f===", "===="])?;
    let mut config = quiet_config();
    config.treasure_chance = 1.0;
    config.safe_haven_chance = 1.0;
    config.safe_haven_rows = 1;
    let mut game_state = GameState::new_with_board(config.clone(), board)?;

    assert_eq!(game_state.board.row(1).unwrap(), &[TerrainType::SafeHaven; 4]);
    assert_eq!(game_state.adventure().unwrap().treasures.len(), 7);

    game_state.handle_input(PlayerInput::Move(Direction::East));
    assert_eq!(game_state.score, config.treasure_value as u64);

    game_state.handle_input(PlayerInput::Move(Direction::South));
    let expected = 2 * config.treasure_value + config.safe_haven_bonus;
    assert_eq!(game_state.score, expected as u64);
    assert_eq!(game_state.statistics.safe_havens_reached, 1);

    // Leaving and coming back pays no second bonus
    game_state.handle_input(PlayerInput::Move(Direction::North));
    game_state.handle_input(PlayerInput::Move(Direction::South));
    assert_eq!(game_state.statistics.safe_havens_reached, 1);
    Ok(())
}

#[test]
fn test_player_cannot_enter_empty_or_hazard() -> TerraResult<()> {
    let board = Board::from_rows(&["f.", "=="])?;
    let mut game_state = GameState::new_with_board(quiet_config(), board)?;

    assert!(game_state
        .handle_input(PlayerInput::Move(Direction::East))
        .is_empty());
    assert!(game_state
        .handle_input(PlayerInput::Move(Direction::North))
        .is_empty());
    let moved = game_state.handle_input(PlayerInput::Move(Direction::South));
    assert_eq!(
        moved,
        vec![GameEvent::PlayerMoved {
            from: Position::new(0, 0),
            to: Position::new(0, 1)
        }]
    );
    Ok(())
}
