//! Configuration files, board snapshots and text rendering.

use std::fs;
use tempfile::tempdir;
use terrablocks::{
    generation::utils, AsciiRenderer, AutoBuilder, Board, GameState, GenerationConfig, Generator,
    TerraError, TerraResult,
};

#[test]
fn test_config_file_round_trip() -> TerraResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("terrablocks.json");

    let mut config = GenerationConfig::new(77).with_size(8, 12);
    config.hazard_max_component_size = 2;
    config.enemy_x_bias = 0.5;
    config.save_to_file(&path)?;

    assert_eq!(GenerationConfig::load_from_file(&path)?, config);
    Ok(())
}

#[test]
fn test_config_file_errors() -> TerraResult<()> {
    let dir = tempdir()?;

    let missing = GenerationConfig::load_from_file(dir.path().join("missing.json"));
    assert!(matches!(missing, Err(TerraError::Io(_))));

    let out_of_range = dir.path().join("bad.json");
    fs::write(&out_of_range, r#"{ "treasure_chance": 2.0 }"#)?;
    assert!(matches!(
        GenerationConfig::load_from_file(&out_of_range),
        Err(TerraError::InvalidConfig(_))
    ));
    Ok(())
}

#[test]
fn test_built_board_snapshot() -> TerraResult<()> {
    let config = GenerationConfig::new(2024).with_size(8, 10);
    let mut rng = utils::create_rng(&config);
    let board = AutoBuilder::new().generate(&config, &mut rng)?;

    let dir = tempdir()?;
    let path = dir.path().join("board.json");
    fs::write(&path, board.to_json()?)?;
    let restored = Board::from_json(&fs::read_to_string(&path)?)?;

    assert_eq!(restored, board);
    assert_eq!(restored.to_rows(), board.to_rows());
    Ok(())
}

#[test]
fn test_snapshot_with_wrong_dimensions_is_rejected() {
    let json = r#"{ "width": 3, "height": 1, "cells": [["Forest", "Empty"]] }"#;
    assert!(matches!(
        Board::from_json(json),
        Err(TerraError::InvalidState(_))
    ));
}

#[test]
fn test_ascii_frame_of_adventure() -> TerraResult<()> {
    let board = Board::from_rows(&["^~~.", "====", "=!=="])?;
    let mut config = GenerationConfig::for_testing(1);
    config.treasure_chance = 0.0;
    config.safe_haven_chance = 0.0;
    let game_state = GameState::new_with_board(config, board)?;

    let frame = AsciiRenderer::render(&game_state);
    assert_eq!(frame, "@~~.\n====\n=E==");
    Ok(())
}

#[test]
fn test_ascii_frame_shows_falling_piece() -> TerraResult<()> {
    let game_state = GameState::new(GenerationConfig::for_testing(6))?;
    let frame = AsciiRenderer::render(&game_state);
    let piece = game_state.current_piece().unwrap();

    let glyph = piece.terrain.glyph();
    let drawn = frame.chars().filter(|c| *c == glyph).count();
    assert_eq!(drawn, 4);
    assert_eq!(frame.lines().count(), 8);
    Ok(())
}
