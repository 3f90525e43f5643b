//! Math Adventure entry point
//!
//! Native builds run a terminal session on stdin/stdout. The web build's
//! entry point lives in `math_adventure::web`.

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::io::{self, BufRead, Write};
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use math_adventure::view::{NextStep, QuestionCard};
    use math_adventure::{AudioManager, Difficulty, Game, QuestionId, Screen, Settings};

    const OPTION_KEYS: [char; 4] = ['a', 'b', 'c', 'd'];

    /// Wall-clock time on the question being shown, fed to `Game::tick`
    /// one whole second at a time
    #[derive(Debug, Default)]
    struct AnswerClock {
        /// Question id, when it appeared, seconds already ticked
        shown: Option<(QuestionId, Instant, u64)>,
    }

    impl AnswerClock {
        /// Restart whenever a different question is on screen
        fn observe(&mut self, id: Option<QuestionId>, now: Instant) {
            match id {
                Some(id) if self.shown.map(|(seen, _, _)| seen) == Some(id) => {}
                Some(id) => self.shown = Some((id, now, 0)),
                None => self.shown = None,
            }
        }

        /// Seconds elapsed since the last call that have not been ticked yet
        fn take_pending(&mut self, now: Instant) -> u64 {
            let Some((_, at, ticked)) = self.shown.as_mut() else {
                return 0;
            };
            let elapsed = now.saturating_duration_since(*at).as_secs();
            let pending = elapsed.saturating_sub(*ticked);
            *ticked += pending;
            pending
        }
    }

    /// Seed from the first argument, else the clock
    fn seed_from_args() -> u64 {
        std::env::args()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(0)
            })
    }

    fn render(screen: &Screen, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        match screen {
            Screen::Menu {
                title,
                tagline,
                world_names,
            } => {
                writeln!(out, "=== {} ===", title)?;
                writeln!(out, "{}", tagline)?;
                writeln!(out, "Worlds: {}", world_names.join(" | "))?;
                writeln!(out, "[enter] Start Journey")?;
            }
            Screen::WorldIntro { world, score, .. } => {
                writeln!(out, "--- {} ({}) ---", world.name, world.theme)?;
                writeln!(out, "{}", world.description)?;
                writeln!(out, "Tables {} to {} | Score {}", world.min_table, world.max_table, score)?;
                writeln!(out, "[enter] Start Exploring")?;
            }
            Screen::Question(card) => render_question(card, out)?,
            Screen::LevelComplete {
                world,
                boss_name,
                boss_emoji,
                boss_description,
                score,
            } => {
                writeln!(out, "Level complete in {}! Score {}", world.name, score)?;
                writeln!(out, "{} {}: {}", boss_emoji, boss_name, boss_description)?;
                writeln!(out, "[enter] Fight {}!", boss_name)?;
            }
            Screen::BossDefeated {
                badge, next, score, ..
            } => {
                writeln!(out, "Guardian defeated! Badge earned: {}", badge)?;
                writeln!(out, "Score {}", score)?;
                match next {
                    NextStep::NextWorld => writeln!(out, "[enter] Travel to Next World")?,
                    NextStep::FinalBattle => writeln!(out, "[enter] Enter Final Battle!")?,
                }
            }
            Screen::BossIntro {
                name,
                emoji,
                description,
                question_count,
                min_table,
                max_table,
                required_correct,
            } => {
                writeln!(out, "{} {} {}", emoji, name, emoji)?;
                writeln!(out, "{}", description)?;
                writeln!(out, "  - {} Ultimate Questions", question_count)?;
                writeln!(out, "  - Mixed Tables ({}-{})", min_table, max_table)?;
                writeln!(out, "  - Must get {}/{} correct", required_correct, question_count)?;
                writeln!(out, "[enter] Start Final Battle")?;
            }
            Screen::Victory {
                title,
                score,
                badges,
            } => {
                writeln!(out, "*** VICTORY: {} ***", title)?;
                writeln!(out, "Final score {}", score)?;
                writeln!(out, "Badges: {}", badges.join(", "))?;
                writeln!(out, "[enter] Play Again")?;
            }
            Screen::GameOver { message, score, .. } => {
                writeln!(out, "GAME OVER (score {})", score)?;
                writeln!(out, "{}", message)?;
                writeln!(out, "[enter] Retry Level   [menu] Main Menu")?;
            }
        }
        write!(out, "> ")?;
        out.flush()
    }

    fn render_question(card: &QuestionCard, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{} | {} | Score {}", card.header, card.position(), card.score)?;
        if let Some(boss) = &card.boss {
            let filled = (boss.health / 10.0).ceil() as usize;
            writeln!(
                out,
                "{} {} [{:<10}] {:.0}%",
                boss.emoji,
                boss.name,
                "#".repeat(filled),
                boss.health
            )?;
        }
        match &card.feedback {
            Some(feedback) => {
                writeln!(out, "{} (+{})", feedback.message, feedback.points)?;
                writeln!(out, "{}", feedback.detail)?;
                writeln!(out, "[enter] Continue")?;
            }
            None => {
                if card.difficulty == Difficulty::Hard {
                    writeln!(out, "[{}]", card.difficulty.as_str())?;
                }
                writeln!(out, "Solve the Equation: {}", card.prompt)?;
                for (key, option) in OPTION_KEYS.iter().zip(&card.options) {
                    writeln!(out, "  {}) {}", key, option)?;
                }
            }
        }
        Ok(())
    }

    /// Pick an option by letter or by typed value
    fn parse_answer(input: &str, options: &[u32]) -> Option<u32> {
        let mut chars = input.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(i) = OPTION_KEYS.iter().position(|&k| k == c.to_ascii_lowercase()) {
                return options.get(i).copied();
            }
        }
        input.parse().ok()
    }

    pub fn run() -> io::Result<()> {
        let seed = seed_from_args();
        log::info!("Math Adventure (native) starting, seed {}", seed);

        let mut settings = Settings::load();
        let mut audio = AudioManager::from_settings(&settings);
        audio.init();

        let mut game = Game::new(seed);
        let mut clock = AnswerClock::default();

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut lines = stdin.lock().lines();

        loop {
            let screen = game.screen();

            clock.observe(game.current_question().map(|q| q.id), Instant::now());

            render(&screen, &mut stdout)?;
            let Some(line) = lines.next() else {
                break;
            };
            let input = line?.trim().to_string();

            let result = match (input.as_str(), &screen) {
                ("q" | "quit", _) => break,
                ("mute", _) => {
                    let enabled = settings.toggle_sound();
                    audio.apply_settings(&settings);
                    settings.save();
                    println!("Sound {}", if enabled { "on" } else { "off" });
                    Ok(())
                }
                ("menu", Screen::GameOver { .. }) => game.return_to_menu(),
                (_, Screen::Question(card)) if card.accepts_answer() => {
                    match parse_answer(&input, &card.options) {
                        Some(value) => {
                            for _ in 0..clock.take_pending(Instant::now()) {
                                game.tick();
                            }
                            game.handle_answer(value).map(|_| ())
                        }
                        None => {
                            println!("Pick a, b, c or d");
                            Ok(())
                        }
                    }
                }
                _ => game.advance(),
            };

            if let Err(err) = result {
                log::warn!("{}", err);
                println!("({})", err);
            }
            audio.handle_events(&game.drain_events());
        }

        audio.dispose();
        log::info!("Final score {}", game.stats().score);
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use std::time::Duration;

        use super::*;

        fn answer_after(
            game: &mut Game,
            clock: &mut AnswerClock,
            now: Instant,
            value: u32,
        ) -> bool {
            for _ in 0..clock.take_pending(now) {
                game.tick();
            }
            game.handle_answer(value).is_ok()
        }

        #[test]
        fn test_clock_ticks_each_second_once() {
            let t0 = Instant::now();
            let mut clock = AnswerClock::default();
            clock.observe(Some(QuestionId(1)), t0);
            assert_eq!(clock.take_pending(t0 + Duration::from_millis(3200)), 3);
            assert_eq!(clock.take_pending(t0 + Duration::from_millis(3900)), 0);
            assert_eq!(clock.take_pending(t0 + Duration::from_millis(4200)), 1);

            // Same question again keeps the count
            clock.observe(Some(QuestionId(1)), t0 + Duration::from_secs(5));
            assert_eq!(clock.take_pending(t0 + Duration::from_millis(5100)), 1);

            clock.observe(Some(QuestionId(2)), t0 + Duration::from_secs(6));
            assert_eq!(clock.take_pending(t0 + Duration::from_millis(6500)), 0);

            clock.observe(None, t0 + Duration::from_secs(7));
            assert_eq!(clock.take_pending(t0 + Duration::from_secs(20)), 0);
        }

        #[test]
        fn test_rejected_answer_keeps_speed_bonus() {
            let mut game = Game::new(42);
            game.start_game().unwrap();
            game.start_level().unwrap();

            let t0 = Instant::now();
            let mut clock = AnswerClock::default();
            let q = game.current_question().unwrap().clone();
            clock.observe(Some(q.id), t0);

            assert!(!q.has_option(999));
            assert!(!answer_after(&mut game, &mut clock, t0 + Duration::from_millis(3200), 999));
            let still_shown = game.current_question().map(|q| q.id);
            clock.observe(still_shown, t0 + Duration::from_millis(3300));
            assert!(answer_after(
                &mut game,
                &mut clock,
                t0 + Duration::from_millis(4200),
                q.correct_answer
            ));
            assert_eq!(game.stats().score, 15);
        }

        #[test]
        fn test_parse_answer_by_letter_or_value() {
            let options = [12, 15, 18, 21];
            assert_eq!(parse_answer("b", &options), Some(15));
            assert_eq!(parse_answer("D", &options), Some(21));
            assert_eq!(parse_answer("18", &options), Some(18));
            assert_eq!(parse_answer("e", &options), None);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(err) = terminal::run() {
        log::error!("Terminal session failed: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is math_adventure::web::wasm_start, this is just to satisfy the compiler
}
