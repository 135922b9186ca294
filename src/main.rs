// Shift Board
// Headless entry point: prints one day's schedule and optionally asks for advice

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};

use shift_board::models::pattern::LABOR_ROWS;
use shift_board::models::shift::Position;
use shift_board::models::staff::Roster;
use shift_board::models::timeline::TimeSlot;
use shift_board::services::advice::{AdviceService, UNAVAILABLE_MESSAGE};
use shift_board::services::board::ShiftBoard;
use shift_board::services::daily::{DragPayload, DropTarget};
use shift_board::services::interval::{Gesture, IntervalHost};
use shift_board::services::settings::SettingsService;
use shift_board::utils::date::{date_key, parse_date_key};

struct Args {
    date: NaiveDate,
    advice: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args> {
    let mut date = None;
    let mut advice = false;
    for arg in args {
        match arg.as_str() {
            "--advice" => advice = true,
            other if date.is_none() => {
                date = Some(parse_date_key(other).context("Usage: shift-board [YYYY-MM-DD] [--advice]")?)
            }
            other => return Err(anyhow!("Unexpected argument '{}'", other)),
        }
    }
    Ok(Args {
        date: date.unwrap_or_else(|| Local::now().date_naive()),
        advice,
    })
}

/// A few assignments and a sample pattern so there is something to show.
fn seed_sample_day(board: &mut ShiftBoard, date: NaiveDate) {
    let day = board.day_mut(date);
    for (staff, position, hour) in [
        ("s1", Position::Grill, 9.0),
        ("s2", Position::Salad, 10.0),
        ("s4", Position::Hall, 11.0),
        ("s5", Position::PcPacking, 14.5),
    ] {
        let target = DropTarget {
            slot: TimeSlot::nearest(hour),
            position,
        };
        let outcome = day.drop_staff(&DragPayload::new_assignment(staff), target);
        log::debug!("Seeded {} at {}: {:?}", staff, hour, outcome);
    }

    let patterns = board.patterns_mut();
    for (row, hour) in [("h1", 10.0), ("k1", 9.0)] {
        let gesture = Gesture::Create {
            row_key: row.to_string(),
            at: TimeSlot::nearest(hour),
        };
        if patterns.pointer_down(gesture, 0.0) {
            patterns.pointer_up();
        }
    }
}

fn print_day(board: &ShiftBoard, date: NaiveDate) {
    let holiday = board
        .holidays()
        .label(date)
        .map(|label| format!(" {}", label))
        .unwrap_or_default();
    println!("{} ({:?}){}", date_key(date), board.day_kind(date), holiday);

    if let Some(day) = board.day(date) {
        for position in Position::ALL {
            let shifts = day.shifts_in(position);
            if shifts.is_empty() {
                continue;
            }
            println!("{} [{}h]", position, day.position_hours(position));
            for shift in shifts {
                let name = board
                    .roster()
                    .get(&shift.row_key.staff_id)
                    .map(|staff| staff.name.as_str())
                    .unwrap_or(shift.row_key.staff_id.0.as_str());
                println!("  {}  {}", shift.span(), name);
            }
        }
    }

    if let Some(pattern) = board.active_pattern(date) {
        println!("Pattern: {} [{}h]", pattern.name, pattern.total_hours());
        for row in LABOR_ROWS {
            let hours = pattern.row_hours(row.id);
            if hours > 0.0 {
                println!("  {} {}h", row.label, hours);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Shift Board");

    let args = parse_args(std::env::args().skip(1))?;
    let settings = SettingsService::with_default_path().load_or_default();
    let mut board = ShiftBoard::new(settings.clone(), Roster::demo())
        .context("Invalid operating hours in settings")?;

    seed_sample_day(&mut board, args.date);
    print_day(&board, args.date);

    if args.advice {
        if let Some(request) = board.begin_advice(args.date) {
            let reply = tokio::task::spawn_blocking(move || {
                let service = AdviceService::from_settings(&settings);
                request.send(&service)
            })
            .await;
            board.finish_advice();

            match reply {
                Ok(text) => println!("\n{}", text),
                Err(e) => {
                    log::error!("Advice task failed: {}", e);
                    println!("\n{}", UNAVAILABLE_MESSAGE);
                }
            }
        }
    }

    Ok(())
}
