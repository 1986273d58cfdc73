//! The interactive moderator session.
//!
//! Reads commands from stdin, turns them into engine actions, and persists
//! the snapshot after every transition. The advance timer is cooperative:
//! it is checked between inputs, so a scheduled advance fires on the next
//! prompt after its window elapses.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;

use nw_engine::action::{Action, StepPayload};
use nw_engine::config::SessionConfig;
use nw_engine::host::{AdvanceTimer, Narration, SnapshotStore, SystemClock};
use nw_engine::role::RoleId;
use nw_engine::rules::RuleKey;
use nw_engine::seat::SeatNo;
use nw_engine::state::SessionState;
use nw_engine::step::{self, StepDescriptor, StepId, StepStatus};
use nw_engine::{apply_action, start_new_game};

use crate::store::FileStore;
use crate::timer::WallTimer;

/// Narration sink that prints the script line instead of playing audio.
struct ConsoleNarration;

impl Narration for ConsoleNarration {
    fn speak(&self, step: &StepDescriptor) {
        println!("  {}", step.script.italic());
    }
}

/// A parsed console line.
enum Input {
    Act(Action),
    Begin,
    Show(Show),
    Save,
    Help,
    Quit,
    Unknown(String),
}

/// Read-only views of the session.
enum Show {
    Status,
    Seats,
    Log,
    Step,
    Export,
}

struct Console {
    store: FileStore,
    clock: SystemClock,
    narration: ConsoleNarration,
    timer: WallTimer,
}

impl Console {
    /// Adopt the next snapshot: print what changed, re-arm the advance
    /// timer, and persist.
    fn absorb(&mut self, prev: &SessionState, next: SessionState) -> SessionState {
        let fresh = next.log.len().saturating_sub(prev.log.len());
        for entry in next.log.entries()[..fresh].iter().rev() {
            println!("  {} {}", "*".dimmed(), entry.message);
        }

        if next.step != prev.step
            && let Some(id) = next.step
        {
            let descriptor = step::lookup(id);
            println!("  {} {}", "Step:".bold(), descriptor.title);
            if next.audio_unlocked {
                self.narration.speak(descriptor);
            }
        }

        self.timer.cancel();
        if next.step_status == StepStatus::Playing
            && let Some(delay) = next
                .step
                .map(step::lookup)
                .and_then(StepDescriptor::auto_advance_after)
        {
            self.timer.arm(delay);
        }

        if let Err(e) = self.store.save(&next) {
            println!("  {}", format!("warning: session not saved: {e}").yellow());
        }
        next
    }
}

pub fn run(file: &Path, seed: u64, players: Option<u32>) -> Result<(), String> {
    let mut console = Console {
        store: FileStore::new(file),
        clock: SystemClock,
        narration: ConsoleNarration,
        timer: WallTimer::new(),
    };
    let mut config = SessionConfig::default().with_seed(seed);
    if let Some(count) = players {
        config = config.with_players(count);
    }
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut state = match console.store.load() {
        Ok(Some(saved)) => {
            println!(
                "  {} saved session, round {}.",
                "Resuming".bold(),
                saved.round
            );
            saved
        }
        Ok(None) => SessionState::new(config.player_count),
        Err(e) => return Err(format!("failed to load session: {e}")),
    };

    println!(
        "  {} a table of {}. Type 'help' for commands.\n",
        "Moderating".bold(),
        state.player_count
    );

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        if console.timer.is_due() {
            console.timer.cancel();
            println!("  {}", "(scheduled advance)".dimmed());
            let next = apply_action(&state, Action::AdvanceStep, &console.clock);
            state = console.absorb(&state, next);
        }

        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match parse_line(input) {
            Input::Quit => {
                let _ = console.store.save(&state);
                break;
            }
            Input::Help => print_help(),
            Input::Save => {
                match console.store.save(&state) {
                    Ok(()) => println!("  Session saved."),
                    Err(e) => println!("  {}", e.to_string().yellow()),
                };
            }
            Input::Show(show) => render(&show, &state),
            Input::Begin => match start_new_game(&state, &mut rng, &console.clock) {
                Ok(next) => {
                    println!("  Roles dealt. Hand out cards with 'reveal'/'dealt'.");
                    state = console.absorb(&state, next);
                }
                Err(e) => println!("  {}", e.to_string().yellow()),
            },
            Input::Act(action) => {
                let next = apply_action(&state, action, &console.clock);
                state = console.absorb(&state, next);
            }
            Input::Unknown(cmd) => {
                println!("  Unknown command: {cmd}. Type 'help'.");
            }
        }
    }

    Ok(())
}

fn parse_line(input: &str) -> Input {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    let rest: Vec<&str> = parts.collect();

    match cmd.as_str() {
        "help" => Input::Help,
        "quit" | "q" => Input::Quit,
        "save" => Input::Save,
        "status" => Input::Show(Show::Status),
        "seats" => Input::Show(Show::Seats),
        "log" => Input::Show(Show::Log),
        "step" => Input::Show(Show::Step),
        "export" => Input::Show(Show::Export),
        "begin" => Input::Begin,
        "lock" => Input::Act(Action::LockRules),
        "audio" => Input::Act(Action::UnlockAudio),
        "dealt" => Input::Act(Action::AdvanceDealCursor),
        "night" => Input::Act(Action::StartStep {
            step: StepId::NightStart,
        }),
        "pause" => Input::Act(Action::PauseStep),
        "resume" => Input::Act(Action::ResumeStep),
        "skip" => Input::Act(Action::SkipStep),
        "next" | "advance" => Input::Act(Action::AdvanceStep),
        "reset" => Input::Act(Action::ResetSession),
        "players" => match rest.first().and_then(|s| s.parse().ok()) {
            Some(count) => Input::Act(Action::SetPlayerCount { count }),
            None => Input::Unknown("players <5-20>".to_string()),
        },
        "name" => match (rest.first().and_then(|s| s.parse().ok()), rest.len()) {
            (Some(seat), n) if n >= 2 => Input::Act(Action::SetSeatName {
                seat,
                name: rest[1..].join(" "),
            }),
            _ => Input::Unknown("name <seat> <name>".to_string()),
        },
        "role" => match (
            rest.first().copied().and_then(RoleId::parse),
            rest.get(1).copied().and_then(parse_switch),
        ) {
            (Some(role), Some(enabled)) => Input::Act(Action::ToggleRole { role, enabled }),
            _ => Input::Unknown("role <id> on|off".to_string()),
        },
        "rule" => match (
            rest.first().copied().and_then(RuleKey::parse),
            rest.get(1).copied().and_then(parse_switch),
        ) {
            (Some(rule), Some(value)) => Input::Act(Action::SetRule { rule, value }),
            _ => Input::Unknown("rule <name> on|off".to_string()),
        },
        "reveal" => match rest.first().and_then(|s| s.parse().ok()) {
            Some(seat) => Input::Act(Action::MarkSeatRevealed { seat }),
            None => Input::Unknown("reveal <seat>".to_string()),
        },
        "kill" => seat_commit(rest.first().copied(), "kill <seat>|none"),
        "check" => seat_commit(rest.first().copied(), "check <seat>"),
        "shoot" => seat_commit(rest.first().copied(), "shoot <seat>|none"),
        "witch" => match parse_witch(&rest) {
            Some(payload) => Input::Act(Action::CommitInput { payload }),
            None => Input::Unknown("witch save|pass [poison <seat>]".to_string()),
        },
        "votes" => match parse_votes(&rest.join(" ")) {
            Some(matrix) => Input::Act(Action::CommitInput {
                payload: StepPayload::Votes { matrix },
            }),
            None => Input::Unknown("votes <target>:<voter,voter>;...".to_string()),
        },
        other => Input::Unknown(other.to_string()),
    }
}

/// Build a seat-select commit, `none` meaning no target.
fn seat_commit(arg: Option<&str>, usage: &str) -> Input {
    match parse_seat_or_none(arg) {
        Some(target) => Input::Act(Action::CommitInput {
            payload: StepPayload::Seat { target },
        }),
        None => Input::Unknown(usage.to_string()),
    }
}

fn parse_switch(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn parse_seat_or_none(arg: Option<&str>) -> Option<Option<SeatNo>> {
    match arg? {
        "none" | "no" | "-" => Some(None),
        s => s.parse().ok().map(Some),
    }
}

/// Parse `witch save|pass [poison <seat>]`.
fn parse_witch(rest: &[&str]) -> Option<StepPayload> {
    let save = match *rest.first()? {
        "save" => true,
        "pass" => false,
        _ => return None,
    };
    let poison_target = match rest.get(1) {
        Some(&"poison") => Some(rest.get(2)?.parse().ok()?),
        Some(_) => return None,
        None => None,
    };
    Some(StepPayload::Witch {
        save,
        poison_target,
    })
}

/// Parse a vote matrix like `7:2,3;9:1,4`.
fn parse_votes(s: &str) -> Option<BTreeMap<SeatNo, BTreeSet<SeatNo>>> {
    let mut matrix = BTreeMap::new();
    for group in s.split(';').filter(|g| !g.trim().is_empty()) {
        let (target, voters) = group.trim().split_once(':')?;
        let target: SeatNo = target.trim().parse().ok()?;
        let voters: BTreeSet<SeatNo> = voters
            .split(',')
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().parse().ok())
            .collect::<Option<_>>()?;
        matrix.insert(target, voters);
    }
    if matrix.is_empty() { None } else { Some(matrix) }
}

fn render(show: &Show, state: &SessionState) {
    match show {
        Show::Status => {
            println!("  Phase: {} | Round: {}", state.phase, state.round);
            match state.step {
                Some(id) => {
                    let descriptor = step::lookup(id);
                    println!("  Step: {} ({:?})", descriptor.title, state.step_status);
                }
                None => println!("  Step: none"),
            }
            let res = &state.runtime.resources;
            println!(
                "  Antidote: {} | Poison: {} | Shot: {}",
                held(res.antidote_available),
                held(res.poison_available),
                held(res.shot_available)
            );
            if let Some(seat) = state.runtime.pending.hunter_shot_from {
                println!("  Pending hunter shot from seat {seat}.");
            }
            if state.runtime.day.re_vote_count > 0 {
                println!("  Re-votes today: {}", state.runtime.day.re_vote_count);
            }
        }
        Show::Seats => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Seat", "Name", "Role", "Camp", "Alive", "Shown"]);
            for seat in &state.seats {
                table.add_row(vec![
                    seat.seat_no.to_string(),
                    seat.name.clone(),
                    seat.role.map(|r| r.to_string()).unwrap_or_default(),
                    seat.camp.map(|c| c.to_string()).unwrap_or_default(),
                    if seat.alive { "yes" } else { "no" }.to_string(),
                    if seat.revealed { "yes" } else { "" }.to_string(),
                ]);
            }
            println!("{table}");
        }
        Show::Log => {
            if state.log.is_empty() {
                println!("  Log is empty.");
                return;
            }
            for entry in state.log.entries().iter().take(10) {
                println!("  [r{} {}] {}", entry.round, entry.phase, entry.message);
            }
        }
        Show::Step => match state.step {
            Some(id) => {
                let descriptor = step::lookup(id);
                println!("  {} ({:?})", descriptor.title, state.step_status);
                println!("  {}", descriptor.script);
                if descriptor.requires_input {
                    println!("  Waiting for input: {}", state.input_committed);
                }
                if let Some(delay) = descriptor.auto_advance_after() {
                    println!("  Auto-advance after {}s.", delay.as_secs());
                }
            }
            None => println!("  No active step. 'begin' deals roles, 'night' starts play."),
        },
        Show::Export => print!("{}", state.log.export_text()),
    }
}

fn held(available: bool) -> &'static str {
    if available { "held" } else { "spent" }
}

fn print_help() {
    println!(
        "\
  Setup:
    players <n>           resize the table (5-20)
    name <seat> <name>    label a seat
    role <id> on|off      toggle a role in the pool
    rule <name> on|off    toggle a table rule
    lock                  freeze rules and pool
    audio                 enable narration lines
    begin                 deal roles and enter hand-out
    reveal <seat>         mark a card as shown
    dealt                 move to the next seat

  Play:
    night                 start the first night step
    next                  advance the current step
    skip                  skip the current step
    pause / resume        hold the current step
    kill <seat>|none      wolves' target
    check <seat>          seer's check
    witch save|pass [poison <seat>]
    votes 7:2,3;9:1,4     day vote matrix
    shoot <seat>|none     hunter's shot

  Other:
    status / seats / step / log / export
    save / reset / quit"
    );
}
