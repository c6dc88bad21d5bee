use gold_tile::{Game, GameConfig, HandOpt, Tiles};

fn main() {
    println!("Gold Tile\n");

    let config = GameConfig {
        seed: 42,
        ..GameConfig::default()
    };
    let opts = vec![
        HandOpt::automatic("North", 0.0),
        HandOpt::automatic("South", 0.1),
    ];
    let mut game = match Game::new(config, opts) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("cannot start: {}", e);
            return;
        }
    };

    println!("Opening racks:");
    for hand in game.hands().iter() {
        let run: Tiles = hand.longest_run();
        println!("  {:<8} {}  longest run {}", hand.name(), hand.tiles(), run);
    }
    println!("\n{} plays first\n", game.active_hand().name());

    while !game.is_over() {
        let m = game.suggest_move();
        match game.finish_turn(m.clone()) {
            Ok(report) => println!(
                "{:>3}. {:<8} {:<40} +{}",
                game.turns().len(),
                report.hand,
                m.to_string(),
                report.points + report.bonus
            ),
            Err(e) => {
                eprintln!("move rejected: {}", e);
                return;
            }
        }
    }

    println!("\n{}", game.board());
    for hand in game.hands().iter() {
        println!("  {}", hand);
    }
    println!("\n{}", game.turns());
    println!("last play ends at move {}", game.turns().index_last_play());
}
