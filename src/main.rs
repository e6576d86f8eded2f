mod ui;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use duel::battle::{ActionId, BattleSession, Dice, Submission};
use duel::config::GameConfig;
use duel::logging::init_file_logging;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use ui::battle_scene::render_battle;
use ui::menu_scene::{render_menu, MenuItem, MenuState};

enum Screen {
    Menu,
    Battle(Box<BattleSession>),
}

/// What the main loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Stay,
    Menu,
    Quit,
}

fn print_help() {
    println!("Elemental Duel - turn-based elemental rock-paper-scissors\n");
    println!("Usage: duel [options]\n");
    println!("Options:");
    println!("  --config <path>  Load settings from a JSON file");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
}

/// `Ok(None)` means the program already printed what was asked and should exit.
fn parse_args(args: &[String]) -> Result<Option<Option<PathBuf>>> {
    let mut config_path = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args.get(i + 1).context("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--version" | "-V" => {
                println!("duel {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            other => anyhow::bail!("unknown argument `{}` (run 'duel --help' for usage)", other),
        }
        i += 1;
    }
    Ok(Some(config_path))
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let Some(config_path) = parse_args(&args)? else {
        return Ok(());
    };

    let (config, config_error) = match GameConfig::load(config_path.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (GameConfig::default(), Some(e)),
    };

    let _log_guard = init_file_logging(&config.log_filter).context("failed to set up logging")?;
    if let Some(e) = config_error {
        tracing::warn!("{}; using default settings", e);
    }
    tracing::info!("duel {} starting", env!("CARGO_PKG_VERSION"));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: &GameConfig) -> Result<()> {
    let mut rng = rand::rng();
    let mut screen = Screen::Menu;
    let mut menu = MenuState::default();
    let frame_time = Duration::from_millis(config.frame_ms.max(1));
    let mut last_tick = Instant::now();

    loop {
        match &mut screen {
            Screen::Menu => {
                terminal.draw(|f| render_menu(f, f.size(), &menu))?;

                if event::poll(frame_time)? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        match key.code {
                            KeyCode::Up | KeyCode::Char('k') => menu.move_up(),
                            KeyCode::Down | KeyCode::Char('j') => menu.move_down(),
                            KeyCode::Enter => match menu.selected() {
                                MenuItem::Play => {
                                    let session = BattleSession::new(config.battle.clone(), &mut rng);
                                    screen = Screen::Battle(Box::new(session));
                                    last_tick = Instant::now();
                                }
                                MenuItem::Quit => break,
                            },
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                            _ => {}
                        }
                    }
                }
            }
            Screen::Battle(session) => {
                let now = Instant::now();
                let elapsed = now.duration_since(last_tick).as_millis() as u64;
                last_tick = now;
                session.tick(elapsed, &mut rng);

                let view: &BattleSession = session;
                terminal.draw(|f| render_battle(f, f.size(), view))?;

                if event::poll(frame_time)? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        match handle_battle_key(session, key.code, &mut rng) {
                            Flow::Stay => {}
                            Flow::Menu => {
                                tracing::info!(wins = session.wins(), "battle abandoned");
                                screen = Screen::Menu;
                            }
                            Flow::Quit => break,
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn handle_battle_key<D: Dice>(session: &mut BattleSession, code: KeyCode, dice: &mut D) -> Flow {
    match code {
        KeyCode::Char(' ') => {
            session.skip_wait(dice);
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            session.start_new_battle(dice);
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return Flow::Quit,
        KeyCode::Esc => return Flow::Menu,
        KeyCode::Char(c) => {
            if let Some(action) = ActionId::from_hotkey(c) {
                if let Submission::OnCooldown { remaining } = session.submit_player_action(action) {
                    tracing::debug!(?action, remaining, "action still cooling down");
                }
            }
        }
        _ => {}
    }
    Flow::Stay
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel::battle::BattlePhase;
    use duel::config::BattleConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session(rng: &mut ChaCha8Rng) -> BattleSession {
        BattleSession::new(BattleConfig::default(), rng)
    }

    #[test]
    fn test_digit_submits_action() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut s = session(&mut rng);

        assert_eq!(handle_battle_key(&mut s, KeyCode::Char('2'), &mut rng), Flow::Stay);
        assert_eq!(s.phase(), BattlePhase::AwaitingOpponent);
        assert_eq!(s.player_choice(), Some(ActionId::Scissors));
    }

    #[test]
    fn test_space_skips_then_continues() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut s = session(&mut rng);

        handle_battle_key(&mut s, KeyCode::Char('1'), &mut rng);
        handle_battle_key(&mut s, KeyCode::Char(' '), &mut rng);
        assert_eq!(s.phase(), BattlePhase::RoundResolved);

        handle_battle_key(&mut s, KeyCode::Char(' '), &mut rng);
        assert!(matches!(
            s.phase(),
            BattlePhase::AwaitingPlayer | BattlePhase::BattleOver
        ));
        assert_eq!(s.round(), 1);
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut s = session(&mut rng);

        handle_battle_key(&mut s, KeyCode::Char('9'), &mut rng);
        handle_battle_key(&mut s, KeyCode::Char('r'), &mut rng);
        assert_eq!(s.phase(), BattlePhase::AwaitingPlayer);
    }

    #[test]
    fn test_escape_and_quit() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut s = session(&mut rng);

        assert_eq!(handle_battle_key(&mut s, KeyCode::Esc, &mut rng), Flow::Menu);
        assert_eq!(handle_battle_key(&mut s, KeyCode::Char('q'), &mut rng), Flow::Quit);
    }

    #[test]
    fn test_parse_args() {
        let args: Vec<String> = ["duel", "--config", "/tmp/duel.json"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            parse_args(&args).unwrap(),
            Some(Some(PathBuf::from("/tmp/duel.json")))
        );
        assert!(parse_args(&["duel".to_string(), "--bogus".to_string()]).is_err());
        assert!(parse_args(&["duel".to_string(), "--config".to_string()]).is_err());
    }
}
