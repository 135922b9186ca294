// Benchmark for the interval engine
// Measures pointer-move updates and full drags on a busy daily grid

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shift_board::models::shift::{Position, ShiftId, ShiftInterval, Span};
use shift_board::models::timeline::{TimeSlot, Timeline};
use shift_board::services::daily::{DailyScheduleSurface, DragPayload, DropTarget};
use shift_board::services::interval::{
    begin_session, update_session, Edge, Gesture, IntervalHost, TrackMetrics,
};

const WIDTH: f32 = 1440.0;

fn span(start: f64, end: f64) -> Span {
    Span::new(TimeSlot::nearest(start), TimeSlot::nearest(end)).unwrap()
}

fn bench_update_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_session");
    let timeline = Timeline::default();
    let shift = ShiftInterval::new(ShiftId(1), "h1", span(9.0, 12.0));

    let gestures = [
        ("create", Gesture::Create { row_key: "h1", at: TimeSlot::nearest(9.0) }),
        ("move", Gesture::Move { target: ShiftId(1) }),
        ("resize", Gesture::Resize { target: ShiftId(1), edge: Edge::End }),
    ];

    for (name, gesture) in gestures {
        let session = begin_session(gesture, Some(&shift), 500.0, timeline, 2, || ShiftId(2))
            .unwrap()
            .session;
        group.bench_function(name, |b| {
            b.iter(|| {
                update_session(
                    black_box(&session),
                    black_box(733.0),
                    black_box(WIDTH),
                    black_box(timeline.slot_count()),
                )
            });
        });
    }

    group.finish();
}

fn busy_day(staff: usize) -> DailyScheduleSurface {
    let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let mut day = DailyScheduleSurface::new(date, Timeline::default(), 2);
    for i in 0..staff {
        let staff_id = format!("s{}", i);
        for (n, position) in Position::ALL.iter().enumerate() {
            let target = DropTarget {
                slot: TimeSlot::nearest(6.0 + (n * 3) as f64),
                position: *position,
            };
            day.drop_staff(&DragPayload::new_assignment(staff_id.as_str()), target);
        }
    }
    day
}

fn bench_full_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_drag");

    for staff in [5, 20, 80].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(staff), staff, |b, &staff| {
            let base = busy_day(staff);
            let track = TrackMetrics::new(0.0, WIDTH, Timeline::default());
            b.iter(|| {
                let mut day = base.clone();
                let id = day.shifts()[0].id;
                day.pointer_down(Gesture::Move { target: id }, 0.0);
                for step in 0..40 {
                    day.pointer_move(black_box(step as f32 * 10.0), track.width);
                }
                day.pointer_up()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update_session, bench_full_drag);
criterion_main!(benches);
