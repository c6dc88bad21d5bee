use gold_tile::{Cell, Error, Game, GameConfig, HandOpt, IllegalMove, Move, Turns};

fn game(seed: u64) -> Game {
    let config = GameConfig {
        seed,
        ..GameConfig::default()
    };
    Game::new(config, vec![HandOpt::local("Ann"), HandOpt::local("Bo")]).unwrap()
}

#[test]
fn test_first_play_off_origin_is_rejected() {
    let mut game = game(21);
    let tile = game.active_hand().tiles().iter().next().unwrap().clone();
    let mut m = Move::pass();
    m.add_cell(tile, Cell::new(3, 3));

    assert_eq!(
        game.legality(&m),
        Some(IllegalMove::MissesStart { start: Cell::ORIGIN })
    );
    assert!(matches!(game.finish_turn(m), Err(Error::IllegalMove { .. })));
    assert!(game.board().is_empty());
}

#[test]
fn test_turn_log_round_trips() {
    let mut game = game(8);
    let opening = game.suggest_move();
    game.finish_turn(opening).unwrap();
    game.finish_turn(Move::pass()).unwrap();

    let mut swap = Move::pass();
    let tile = game.active_hand().tiles().iter().next().unwrap().clone();
    swap.add_swap_tile(tile);
    game.finish_turn(swap).unwrap();

    let text = game.turns().to_string();
    assert!(text.starts_with("turns{{"));
    let parsed: Turns = text.parse().unwrap();
    assert_eq!(&parsed, game.turns());
    assert_eq!(parsed.index_last_play(), 1);
    assert_eq!(parsed.trailing_non_plays(), 2);
}

#[test]
fn test_hands_rotate_past_resigned() {
    let config = GameConfig {
        seed: 13,
        ..GameConfig::default()
    };
    let opts = vec![
        HandOpt::local("A"),
        HandOpt::local("B"),
        HandOpt::local("C"),
    ];
    let mut game = Game::new(config, opts).unwrap();
    let resigning = game.hands().current_index();
    let rack = game.active_hand().tiles().clone();
    game.finish_turn(Move::resign(&rack)).unwrap();

    for _ in 0..3 {
        assert!(!game.is_over());
        assert_ne!(game.hands().current_index(), resigning);
        game.finish_turn(Move::pass()).unwrap();
    }
    assert_eq!(game.hands().count_working(), 2);
    // Two rounds of the two working hands without a play
    assert_eq!(game.turns().trailing_non_plays(), 4);
    assert!(game.is_over());
}

#[test]
fn test_tiles_are_conserved_through_play() {
    let opts = vec![
        HandOpt::automatic("A", 0.0),
        HandOpt::automatic("B", 0.0),
        HandOpt::automatic("C", 0.3),
    ];
    let config = GameConfig {
        seed: 99,
        hand_size: 5,
        ..GameConfig::default()
    };
    let total = config.tile_count();
    let mut game = Game::new(config, opts).unwrap();

    for _ in 0..30 {
        if game.is_over() {
            break;
        }
        let m = game.suggest_move();
        assert!(game.is_legal_move(&m), "suggested illegal move {}", m);
        game.finish_turn(m).unwrap();

        let racks: usize = game.hands().iter().map(|h| h.count_tiles()).sum();
        assert_eq!(game.board().count() + racks + game.stock().count(), total);
    }
    assert!(!game.board().is_empty());
}
